use std::path::{Path, PathBuf};

use super::collectapi::{parse_all, parse_single, RemoteNextPrayer};
use super::{normalize_city, PrayerTimeSource, SourceError};
use crate::models::{Prayer, PrayerTimeSet};

/// Reads recorded CollectAPI responses from a directory.
///
/// Layout: `<city>.json` holds a `pray/all` body, `<city>-<prayer>.json` a
/// `pray/single` body, where `<city>` is the normalized city name.
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn all_path(&self, city: &str) -> PathBuf {
        self.dir.join(format!("{}.json", normalize_city(city)))
    }

    pub fn single_path(&self, city: &str, prayer: Prayer) -> PathBuf {
        self.dir
            .join(format!("{}-{}.json", normalize_city(city), prayer.as_str()))
    }
}

fn read(path: &Path) -> Result<String, SourceError> {
    std::fs::read_to_string(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })
}

impl PrayerTimeSource for JsonDirSource {
    fn fetch_today(&self, city: &str) -> Result<PrayerTimeSet, SourceError> {
        let path = self.all_path(city);
        log::debug!("Reading prayer times for {} from {:?}", city, path);
        parse_all(&read(&path)?)
    }

    fn fetch_next(&self, city: &str, prayer: Prayer) -> Result<RemoteNextPrayer, SourceError> {
        parse_single(&read(&self.single_path(city, prayer))?, prayer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prayer::parse_time;

    #[test]
    fn reads_by_normalized_city_name() {
        let dir = tempfile::tempdir().unwrap();
        let body = r#"{"success":true,"result":[
            {"vakit":"İmsak","saat":"05:41"},{"vakit":"Güneş","saat":"07:05"},
            {"vakit":"Öğle","saat":"12:55"},{"vakit":"İkindi","saat":"15:47"},
            {"vakit":"Akşam","saat":"18:18"},{"vakit":"Yatsı","saat":"19:37"}]}"#;
        std::fs::write(dir.path().join("istanbul.json"), body).unwrap();

        let source = JsonDirSource::new(dir.path().to_path_buf());
        let times = source.fetch_today("İstanbul").unwrap();
        assert_eq!(times.dhuhr, parse_time("12:55").unwrap());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let source = JsonDirSource::new(dir.path().to_path_buf());
        assert!(matches!(
            source.fetch_today("Ankara"),
            Err(SourceError::Io { .. })
        ));
        assert!(matches!(
            source.fetch_next("Ankara", Prayer::Asr),
            Err(SourceError::Io { .. })
        ));
    }

    #[test]
    fn reads_single_prayer_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("ankara-asr.json"),
            r#"{"success":true,"result":[{"time":"15:50","hour":1,"min":50}]}"#,
        )
        .unwrap();
        let source = JsonDirSource::new(dir.path().to_path_buf());
        let next = source.fetch_next("Ankara", Prayer::Asr).unwrap();
        assert_eq!(next.hours, 1);
        assert_eq!(next.minutes, 50);
    }
}
