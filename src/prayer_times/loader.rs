use chrono::{Days, NaiveDate, NaiveTime};

use super::mock::{backfill, generate};
use super::resolver::resolve;
use crate::models::{City, DailySchedule, NextPrayer, PrayerTimeSet, ScheduleOrigin, WeeklySchedule};
use crate::source::PrayerTimeSource;
use crate::utils::hijri::hijri_label;

pub const DAYS_PER_WEEK: u64 = 7;

fn day_entry(today: NaiveDate, offset: u64, times: PrayerTimeSet) -> DailySchedule {
    let date = today.checked_add_days(Days::new(offset)).unwrap_or(today);
    DailySchedule {
        date,
        hijri_label: hijri_label(date),
        times,
    }
}

/// Seven days for `city` starting at `today`.
///
/// Today's times come from `source`; the rest of the week is derived from them.
/// Any source failure falls back to a fully generated week.
pub fn load_weekly(city: &City, source: &dyn PrayerTimeSource, today: NaiveDate) -> WeeklySchedule {
    match source.fetch_today(&city.name) {
        Ok(times) => {
            log::info!("Loaded prayer times for {} from source", city.name);
            let days = (0..DAYS_PER_WEEK)
                .map(|i| {
                    let set = if i == 0 { times } else { backfill(&times, i as i32) };
                    day_entry(today, i, set)
                })
                .collect();
            WeeklySchedule {
                city: city.clone(),
                origin: ScheduleOrigin::Remote,
                days,
            }
        }
        Err(e) => {
            log::warn!(
                "Prayer times for {} unavailable ({}), using generated schedule",
                city.name,
                e
            );
            generated_week(city, today)
        }
    }
}

pub fn generated_week(city: &City, today: NaiveDate) -> WeeklySchedule {
    let days = (0..DAYS_PER_WEEK)
        .map(|i| day_entry(today, i, generate(city.id, i as i64)))
        .collect();
    WeeklySchedule {
        city: city.clone(),
        origin: ScheduleOrigin::Generated,
        days,
    }
}

/// Next prayer, preferring the source's own answer over the local resolution.
pub fn next_prayer(
    times: &PrayerTimeSet,
    now: NaiveTime,
    city: &City,
    source: &dyn PrayerTimeSource,
) -> NextPrayer {
    let local = resolve(times, now).next;
    match source.fetch_next(&city.name, local.prayer) {
        Ok(remote) => NextPrayer {
            prayer: remote.prayer,
            time: remote.time,
            is_tomorrow: local.is_tomorrow,
            remaining_minutes: remote.remaining_minutes(),
        },
        Err(e) => {
            log::debug!("Remote next-prayer lookup failed ({}), using local", e);
            local
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prayer::parse_time;
    use crate::models::{city, Prayer};
    use crate::source::{OfflineSource, RemoteNextPrayer, SourceError};

    struct Fixed(PrayerTimeSet);

    impl PrayerTimeSource for Fixed {
        fn fetch_today(&self, _city: &str) -> Result<PrayerTimeSet, SourceError> {
            Ok(self.0)
        }

        fn fetch_next(&self, _city: &str, prayer: Prayer) -> Result<RemoteNextPrayer, SourceError> {
            Ok(RemoteNextPrayer {
                prayer,
                time: parse_time("15:51").map_err(SourceError::from)?,
                hours: 1,
                minutes: 51,
            })
        }
    }

    fn real_today() -> PrayerTimeSet {
        PrayerTimeSet::parse(["05:10", "06:45", "12:30", "15:50", "18:20", "19:50"]).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn remote_today_backfills_the_week() {
        let ankara = city::by_id(6);
        let week = load_weekly(&ankara, &Fixed(real_today()), date(2025, 3, 30));
        assert_eq!(week.origin, ScheduleOrigin::Remote);
        assert_eq!(week.days.len(), 7);
        assert_eq!(week.today().times, real_today());
        assert_eq!(week.days[3].times, backfill(&real_today(), 3));
        assert_eq!(week.days[6].date, date(2025, 4, 5));
        assert_eq!(week.days[2].hijri_label, "1 Cemaziyelevvel 1445");
    }

    #[test]
    fn failing_source_generates_every_day() {
        let ankara = city::by_id(6);
        let week = load_weekly(&ankara, &OfflineSource, date(2025, 3, 30));
        assert_eq!(week.origin, ScheduleOrigin::Generated);
        for (i, day) in week.days.iter().enumerate() {
            assert_eq!(day.times, generate(6, i as i64));
        }
        assert_eq!(week.today().times.fajr, parse_time("04:27").unwrap());
    }

    #[test]
    fn dates_are_consecutive() {
        let week = generated_week(&city::by_id(34), date(2024, 12, 29));
        let dates: Vec<NaiveDate> = week.days.iter().map(|d| d.date).collect();
        assert_eq!(dates[0], date(2024, 12, 29));
        assert_eq!(dates[3], date(2025, 1, 1));
        for pair in dates.windows(2) {
            assert_eq!(pair[1] - pair[0], chrono::Duration::days(1));
        }
    }

    #[test]
    fn next_prayer_prefers_source_answer() {
        let ankara = city::by_id(6);
        let now = parse_time("14:00").unwrap();
        let next = next_prayer(&real_today(), now, &ankara, &Fixed(real_today()));
        assert_eq!(next.prayer, Prayer::Asr);
        assert_eq!(next.remaining_minutes, 111);

        let local = next_prayer(&real_today(), now, &ankara, &OfflineSource);
        assert_eq!(local.remaining_minutes, 110);
    }
}
