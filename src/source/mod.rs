pub mod collectapi;
pub mod file;

use std::path::PathBuf;

use crate::config::AppConfig;
use crate::models::{Prayer, PrayerTimeSet, ScheduleError};

pub use collectapi::RemoteNextPrayer;
pub use file::JsonDirSource;

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("no remote source configured")]
    Offline,
    #[error("reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
    #[error("response was not successful")]
    Unsuccessful,
    #[error("response has no result entries")]
    EmptyResult,
    #[error("response has no time for {0}")]
    MissingPrayer(Prayer),
    #[error(transparent)]
    MalformedTime(#[from] ScheduleError),
    #[error("next-prayer lookup is not supported by this source")]
    Unsupported,
}

/// Provider of real prayer times, keyed by city name.
pub trait PrayerTimeSource {
    fn fetch_today(&self, city: &str) -> Result<PrayerTimeSet, SourceError>;

    fn fetch_next(&self, _city: &str, _prayer: Prayer) -> Result<RemoteNextPrayer, SourceError> {
        Err(SourceError::Unsupported)
    }
}

/// Always fails, so every load takes the generated fallback.
pub struct OfflineSource;

impl PrayerTimeSource for OfflineSource {
    fn fetch_today(&self, _city: &str) -> Result<PrayerTimeSet, SourceError> {
        Err(SourceError::Offline)
    }
}

pub fn from_config(config: &AppConfig) -> Box<dyn PrayerTimeSource> {
    match &config.source.responses_dir {
        Some(dir) => Box::new(JsonDirSource::new(dir.clone())),
        None => Box::new(OfflineSource),
    }
}

/// Turkish-aware lower-casing followed by folding Turkish letters to ASCII.
/// "İstanbul" → "istanbul", "IĞDIR" → "igdir".
pub fn normalize_city(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(|c| match c {
            'İ' => 'i'.to_lowercase(),
            'I' => 'ı'.to_lowercase(),
            other => other.to_lowercase(),
        })
        .map(|c| match c {
            'ı' => 'i',
            'ğ' => 'g',
            'ü' => 'u',
            'ş' => 's',
            'ç' => 'c',
            'ö' => 'o',
            other => other,
        })
        .collect()
}
