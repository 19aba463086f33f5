use chrono::{NaiveTime, Timelike};

use crate::models::prayer::minutes_since_midnight;
use crate::models::NextPrayer;
use crate::utils::format::format_hms;

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// Seconds from `now` until the next prayer; zero or negative once it has arrived.
pub fn seconds_until(next: &NextPrayer, now: NaiveTime) -> i64 {
    let mut target = minutes_since_midnight(next.time) as i64 * 60;
    if next.is_tomorrow {
        target += SECONDS_PER_DAY;
    }
    target - now.num_seconds_from_midnight() as i64
}

/// Live "HH:MM:SS" countdown to `next`.
///
/// Returns `None` once the target is reached; the caller then has to resolve the
/// window again before counting down to the following prayer.
pub fn live_countdown(next: &NextPrayer, now: NaiveTime) -> Option<String> {
    let secs = seconds_until(next, now);
    (secs > 0).then(|| format_hms(secs))
}
