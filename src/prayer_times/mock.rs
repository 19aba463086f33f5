//! Deterministic placeholder schedules for when no real data is available.
//!
//! Nothing here is astronomical. The formulas only need to look plausible and
//! stay stable for a given city and day.

use chrono::NaiveTime;

use crate::models::prayer::{minutes_since_midnight, parse_time, time_from_minutes};
use crate::models::{PrayerTimeSet, ScheduleError};

const BASE_HOURS: [i64; 6] = [4, 6, 12, 15, 18, 20];
const HOUR_JITTER_MOD: [i64; 6] = [2, 3, 2, 2, 3, 2];
const BASE_MINUTES: [i64; 6] = [15, 30, 15, 45, 10, 30];

/// Synthesize six times for `city_id` on `day_offset` days from today.
pub fn generate(city_id: i64, day_offset: i64) -> PrayerTimeSet {
    // Same residues as (city_id * 7) mod 30 and (day_offset * 2) mod 60, without overflow.
    let base = (city_id.rem_euclid(30) * 7).rem_euclid(30);
    let shift = day_offset.rem_euclid(30) * 2;

    let mut times = [NaiveTime::MIN; 6];
    for (i, slot) in times.iter_mut().enumerate() {
        let hour = BASE_HOURS[i] + base % HOUR_JITTER_MOD[i];
        let minute = (BASE_MINUTES[i] + base + shift).rem_euclid(60);
        *slot = time_from_minutes((hour * 60 + minute) as i32);
    }
    PrayerTimeSet::from_array(times)
}

/// Per-prayer minute deltas used to derive day `day` (1..=6) from a real today.
pub fn backfill_deltas(day: i32) -> [i32; 6] {
    [day - 1, day - 1, day, day + 1, day + 2, day + 1]
}

/// Shift a time by `delta` minutes, wrapping silently across midnight.
pub fn adjust_time(time: NaiveTime, delta: i32) -> NaiveTime {
    time_from_minutes(minutes_since_midnight(time) + delta)
}

/// String form of [`adjust_time`]. An empty input passes through as empty.
pub fn adjust_time_str(time: &str, delta: i32) -> Result<String, ScheduleError> {
    if time.trim().is_empty() {
        return Ok(String::new());
    }
    let parsed = parse_time(time)?;
    Ok(adjust_time(parsed, delta).format("%H:%M").to_string())
}

pub fn shift_set(times: &PrayerTimeSet, deltas: [i32; 6]) -> PrayerTimeSet {
    let entries = times.entries();
    let mut shifted = [NaiveTime::MIN; 6];
    for (i, (_, t)) in entries.iter().enumerate() {
        shifted[i] = adjust_time(*t, deltas[i]);
    }
    PrayerTimeSet::from_array(shifted)
}

/// Derive day `day` of a week from today's real times.
pub fn backfill(today: &PrayerTimeSet, day: i32) -> PrayerTimeSet {
    shift_set(today, backfill_deltas(day))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hhmm(set: &PrayerTimeSet) -> Vec<String> {
        set.entries()
            .iter()
            .map(|(_, t)| t.format("%H:%M").to_string())
            .collect()
    }

    #[test]
    fn ankara_today_matches_formula() {
        // base = 42 mod 30 = 12
        assert_eq!(
            hhmm(&generate(6, 0)),
            ["04:27", "06:42", "12:27", "15:57", "18:22", "20:42"]
        );
    }

    #[test]
    fn day_shift_moves_minutes_and_wraps_hour_free() {
        // base = 7; hour jitter 1/1/1/1/1/1, day shift 6
        assert_eq!(
            hhmm(&generate(1, 3)),
            ["05:28", "07:43", "13:28", "16:58", "19:23", "21:43"]
        );
        // base = 0, minutes stay under 60 by the modulo, hours never carry
        assert_eq!(generate(30, 20).asr.format("%H:%M").to_string(), "15:25");
    }

    #[test]
    fn generation_is_deterministic() {
        for city in [-4, 0, 1, 6, 34, 81, 1_000_000] {
            for day in [-1, 0, 1, 6, 40] {
                assert_eq!(generate(city, day), generate(city, day));
            }
        }
    }

    #[test]
    fn extreme_inputs_do_not_overflow() {
        let set = generate(i64::MAX, i64::MIN);
        assert!(set.fajr.format("%H").to_string().starts_with('0'));
    }

    #[test]
    fn adjusts_and_wraps_minutes() {
        assert_eq!(adjust_time_str("05:10", 3).unwrap(), "05:13");
        assert_eq!(adjust_time_str("05:10", 55).unwrap(), "06:05");
        assert_eq!(adjust_time_str("23:58", 5).unwrap(), "00:03");
        assert_eq!(adjust_time_str("00:02", -5).unwrap(), "23:57");
    }

    #[test]
    fn empty_time_passes_through() {
        assert_eq!(adjust_time_str("", 4).unwrap(), "");
        assert!(adjust_time_str("5h10", 4).is_err());
    }

    #[test]
    fn shift_then_unshift_restores_original() {
        let set = PrayerTimeSet::parse(["05:10", "06:45", "12:30", "15:50", "18:20", "23:50"])
            .unwrap();
        for d in [-1500, -61, -1, 0, 1, 17, 600, 2000] {
            let there = shift_set(&set, [d; 6]);
            assert_eq!(shift_set(&there, [-d; 6]), set, "delta {d}");
        }
    }

    #[test]
    fn backfill_uses_per_prayer_deltas() {
        let today = PrayerTimeSet::parse(["05:10", "06:45", "12:30", "15:50", "18:20", "19:50"])
            .unwrap();
        assert_eq!(
            hhmm(&backfill(&today, 1)),
            ["05:10", "06:45", "12:31", "15:52", "18:23", "19:52"]
        );
        assert_eq!(
            hhmm(&backfill(&today, 6)),
            ["05:15", "06:50", "12:36", "15:57", "18:28", "19:57"]
        );
    }
}
