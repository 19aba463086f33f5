//! Typed parsing of CollectAPI `pray/all` and `pray/single` responses.
//!
//! Both endpoints wrap their payload as `{ "success": bool, "result": [...] }`.
//! Anything other than `success: true` counts as a failed lookup.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer};

use super::SourceError;
use crate::models::prayer::parse_time;
use crate::models::{Prayer, PrayerTimeSet};

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default = "Vec::new")]
    result: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct VakitEntry {
    vakit: String,
    saat: String,
}

#[derive(Debug, Deserialize)]
struct SingleEntry {
    time: String,
    #[serde(deserialize_with = "number_or_string")]
    hour: u32,
    #[serde(deserialize_with = "number_or_string")]
    min: u32,
}

/// Remote answer to "when is <prayer> in <city>".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNextPrayer {
    pub prayer: Prayer,
    pub time: NaiveTime,
    pub hours: u32,
    pub minutes: u32,
}

impl RemoteNextPrayer {
    pub fn remaining_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }
}

fn number_or_string<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(u32),
        Text(String),
    }
    match Raw::deserialize(d)? {
        Raw::Num(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Parse a `pray/all` body into today's six times.
pub fn parse_all(body: &str) -> Result<PrayerTimeSet, SourceError> {
    let envelope: Envelope<VakitEntry> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(SourceError::Unsuccessful);
    }

    let mut slots: [Option<NaiveTime>; 6] = [None; 6];
    for entry in &envelope.result {
        // Entries the API adds beyond the six canonical ones are ignored.
        let Ok(prayer) = entry.vakit.parse::<Prayer>() else {
            continue;
        };
        let slot = &mut slots[prayer.index()];
        if slot.is_none() {
            *slot = Some(parse_time(&entry.saat)?);
        }
    }

    let mut times = [NaiveTime::MIN; 6];
    for prayer in Prayer::ALL {
        times[prayer.index()] = slots[prayer.index()].ok_or(SourceError::MissingPrayer(prayer))?;
    }
    Ok(PrayerTimeSet::from_array(times))
}

/// Parse a `pray/single` body; only the first result entry is used.
pub fn parse_single(body: &str, prayer: Prayer) -> Result<RemoteNextPrayer, SourceError> {
    let envelope: Envelope<SingleEntry> = serde_json::from_str(body)?;
    if !envelope.success {
        return Err(SourceError::Unsuccessful);
    }
    let first = envelope
        .result
        .into_iter()
        .next()
        .ok_or(SourceError::EmptyResult)?;
    Ok(RemoteNextPrayer {
        prayer,
        time: parse_time(&first.time)?,
        hours: first.hour,
        minutes: first.min,
    })
}
