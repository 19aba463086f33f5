use chrono::NaiveTime;

use crate::models::prayer::{minutes_since_midnight, MINUTES_PER_DAY};
use crate::models::{CurrentPrayer, NextPrayer, Prayer, PrayerTimeSet, PrayerWindow};
use crate::utils::format::format_hms;

/// Work out which prayer window `now` falls in and which prayer comes next.
///
/// Only hours and minutes of `now` are considered. Pure: the same inputs always
/// give the same window.
pub fn resolve(times: &PrayerTimeSet, now: NaiveTime) -> PrayerWindow {
    let entries = times.entries();
    let now_minutes = minutes_since_midnight(now);

    let next_idx = entries
        .iter()
        .position(|(_, t)| minutes_since_midnight(*t) > now_minutes);

    let Some(next_idx) = next_idx else {
        // Past Isha: nothing is active until tomorrow's Fajr.
        let (_, fajr) = entries[Prayer::Fajr.index()];
        let (_, isha) = entries[Prayer::Isha.index()];
        let remaining = minutes_since_midnight(fajr) + MINUTES_PER_DAY - now_minutes;
        return PrayerWindow {
            current: CurrentPrayer {
                prayer: Prayer::Isha,
                start: isha,
                end: fajr,
                remaining: format_hms(0),
                is_active: false,
            },
            next: NextPrayer {
                prayer: Prayer::Fajr,
                time: fajr,
                is_tomorrow: true,
                remaining_minutes: remaining.max(0) as u32,
            },
        };
    };

    let (next_prayer, next_time) = entries[next_idx];
    // Before Fajr the window still reads as Isha, and counts as active.
    let current_idx = if next_idx > 0 {
        next_idx - 1
    } else {
        Prayer::Isha.index()
    };
    let (current_prayer, current_start) = entries[current_idx];
    let remaining = (minutes_since_midnight(next_time) - now_minutes).max(0);

    PrayerWindow {
        current: CurrentPrayer {
            prayer: current_prayer,
            start: current_start,
            end: next_time,
            remaining: format_hms(remaining as i64 * 60),
            is_active: true,
        },
        next: NextPrayer {
            prayer: next_prayer,
            time: next_time,
            is_tomorrow: false,
            remaining_minutes: remaining as u32,
        },
    }
}
