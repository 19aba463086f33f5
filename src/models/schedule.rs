use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{City, PrayerTimeSet};

/// Where day 0 of a weekly schedule came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleOrigin {
    Remote,
    Generated,
}

impl ScheduleOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScheduleOrigin::Remote => "remote",
            ScheduleOrigin::Generated => "generated",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySchedule {
    pub date: NaiveDate,
    pub hijri_label: String,
    pub times: PrayerTimeSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySchedule {
    pub city: City,
    pub origin: ScheduleOrigin,
    /// Seven consecutive days, index 0 = today.
    pub days: Vec<DailySchedule>,
}

impl WeeklySchedule {
    pub fn today(&self) -> &DailySchedule {
        &self.days[0]
    }
}
