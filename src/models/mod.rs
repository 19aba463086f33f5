pub mod city;
pub mod prayer;
pub mod schedule;
pub mod window;

pub use city::City;
pub use prayer::{Prayer, PrayerTimeSet, ScheduleError};
pub use schedule::{DailySchedule, ScheduleOrigin, WeeklySchedule};
pub use window::{CurrentPrayer, NextPrayer, PrayerWindow};
