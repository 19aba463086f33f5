use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

use super::prayer::hhmm;
use super::Prayer;
use crate::utils::format::{format_phrase, format_time};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPrayer {
    pub prayer: Prayer,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    /// `HH:MM:SS` until `end`; seconds are always `00`.
    pub remaining: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextPrayer {
    pub prayer: Prayer,
    #[serde(with = "hhmm")]
    pub time: NaiveTime,
    /// Set when every prayer of today has passed and this is tomorrow's Fajr.
    pub is_tomorrow: bool,
    pub remaining_minutes: u32,
}

impl NextPrayer {
    pub fn label(&self) -> String {
        if self.is_tomorrow {
            format!("{} (yarın)", self.prayer.display_name())
        } else {
            self.prayer.display_name().to_string()
        }
    }

    /// "<H> saat <M> dakika"
    pub fn remaining_phrase(&self) -> String {
        format_phrase(self.remaining_minutes)
    }
}

/// The current/next view over one day's times at a given instant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerWindow {
    pub current: CurrentPrayer,
    pub next: NextPrayer,
}

impl std::fmt::Display for PrayerWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {} {} ({})",
            self.current.prayer.display_name(),
            self.next.label(),
            format_time(self.next.time),
            self.next.remaining_phrase()
        )
    }
}
