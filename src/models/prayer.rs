use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const MINUTES_PER_DAY: i32 = 24 * 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Sunrise,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    /// The fixed order used for every "next" scan and index lookup.
    pub const ALL: [Prayer; 6] = [
        Prayer::Fajr,
        Prayer::Sunrise,
        Prayer::Dhuhr,
        Prayer::Asr,
        Prayer::Maghrib,
        Prayer::Isha,
    ];

    pub fn index(self) -> usize {
        match self {
            Prayer::Fajr => 0,
            Prayer::Sunrise => 1,
            Prayer::Dhuhr => 2,
            Prayer::Asr => 3,
            Prayer::Maghrib => 4,
            Prayer::Isha => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Sunrise => "sunrise",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }

    /// Turkish name, as used by the remote API and shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Prayer::Fajr => "İmsak",
            Prayer::Sunrise => "Güneş",
            Prayer::Dhuhr => "Öğle",
            Prayer::Asr => "İkindi",
            Prayer::Maghrib => "Akşam",
            Prayer::Isha => "Yatsı",
        }
    }
}

impl std::fmt::Display for Prayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Prayer {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "İmsak" | "imsak" => return Ok(Prayer::Fajr),
            "Güneş" | "güneş" | "gunes" => return Ok(Prayer::Sunrise),
            "Öğle" | "öğle" | "ogle" => return Ok(Prayer::Dhuhr),
            "İkindi" | "ikindi" => return Ok(Prayer::Asr),
            "Akşam" | "akşam" | "aksam" => return Ok(Prayer::Maghrib),
            "Yatsı" | "yatsı" | "yatsi" => return Ok(Prayer::Isha),
            _ => {}
        }
        match s.trim().to_lowercase().as_str() {
            "fajr" => Ok(Prayer::Fajr),
            "sunrise" | "shuruq" => Ok(Prayer::Sunrise),
            "dhuhr" | "zuhr" | "dhuhur" => Ok(Prayer::Dhuhr),
            "asr" => Ok(Prayer::Asr),
            "maghrib" => Ok(Prayer::Maghrib),
            "isha" => Ok(Prayer::Isha),
            _ => Err(anyhow::anyhow!("Unknown prayer: {}", s)),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("malformed time '{0}', expected HH:MM")]
    MalformedTime(String),
}

/// Parse a wall-clock "HH:MM" string.
pub fn parse_time(s: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M")
        .map_err(|_| ScheduleError::MalformedTime(s.to_string()))
}

pub fn minutes_since_midnight(t: NaiveTime) -> i32 {
    (t.hour() * 60 + t.minute()) as i32
}

/// Inverse of [`minutes_since_midnight`]; wraps into a single day.
pub fn time_from_minutes(minutes: i32) -> NaiveTime {
    let m = minutes.rem_euclid(MINUTES_PER_DAY) as u32;
    NaiveTime::from_hms_opt(m / 60, m % 60, 0).unwrap_or(NaiveTime::MIN)
}

/// Serde adapter that reads and writes a `NaiveTime` as "HH:MM".
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_time(&raw).map_err(serde::de::Error::custom)
    }
}

/// The six wall-clock times of one civil day, no date or timezone attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrayerTimeSet {
    #[serde(with = "hhmm")]
    pub fajr: NaiveTime,
    #[serde(with = "hhmm")]
    pub sunrise: NaiveTime,
    #[serde(with = "hhmm")]
    pub dhuhr: NaiveTime,
    #[serde(with = "hhmm")]
    pub asr: NaiveTime,
    #[serde(with = "hhmm")]
    pub maghrib: NaiveTime,
    #[serde(with = "hhmm")]
    pub isha: NaiveTime,
}

impl PrayerTimeSet {
    /// Build from six "HH:MM" strings in fixed order.
    pub fn parse(raw: [&str; 6]) -> Result<Self, ScheduleError> {
        Ok(Self {
            fajr: parse_time(raw[0])?,
            sunrise: parse_time(raw[1])?,
            dhuhr: parse_time(raw[2])?,
            asr: parse_time(raw[3])?,
            maghrib: parse_time(raw[4])?,
            isha: parse_time(raw[5])?,
        })
    }

    pub fn from_array(times: [NaiveTime; 6]) -> Self {
        Self {
            fajr: times[0],
            sunrise: times[1],
            dhuhr: times[2],
            asr: times[3],
            maghrib: times[4],
            isha: times[5],
        }
    }

    pub fn get(&self, prayer: Prayer) -> NaiveTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Sunrise => self.sunrise,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// (prayer, time) pairs in fixed order.
    pub fn entries(&self) -> [(Prayer, NaiveTime); 6] {
        Prayer::ALL.map(|p| (p, self.get(p)))
    }
}
