use chrono::{Days, NaiveDateTime, NaiveTime};
use std::time::Duration;

use crate::models::{Prayer, PrayerTimeSet};
use crate::timers::DeferredTask;
use crate::utils::format::format_time;

/// One prayer-time alert, delivered when its wall-clock time arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrayerAlert {
    pub prayer: Prayer,
    pub time: NaiveTime,
    pub location: String,
}

impl PrayerAlert {
    pub fn title(&self) -> String {
        format!("{} Vakti", self.prayer.display_name())
    }

    pub fn body(&self) -> String {
        format!(
            "{} için {} vakti geldi: {}",
            self.location,
            self.prayer.display_name(),
            format_time(self.time)
        )
    }
}

/// How long until `time` next occurs. A time already passed today is
/// scheduled for tomorrow; a time equal to `now` is due immediately.
pub fn delay_until(time: NaiveTime, now: NaiveDateTime) -> Duration {
    let mut at = now.date().and_time(time);
    if at < now {
        at = at.checked_add_days(Days::new(1)).unwrap_or(at);
    }
    (at - now).to_std().unwrap_or(Duration::ZERO)
}

/// Holds one pending alert per prayer of the current schedule.
#[derive(Default)]
pub struct NotificationScheduler {
    pending: Vec<DeferredTask>,
}

impl NotificationScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel whatever is pending and schedule all six prayers of `times`.
    pub fn arm<F>(&mut self, times: &PrayerTimeSet, location: &str, now: NaiveDateTime, deliver: F)
    where
        F: Fn(PrayerAlert) + Clone + Send + 'static,
    {
        self.disarm();
        for (prayer, time) in times.entries() {
            let delay = delay_until(time, now);
            let alert = PrayerAlert {
                prayer,
                time,
                location: location.to_string(),
            };
            log::debug!(
                "Alert for {} at {} in {}s",
                prayer.display_name(),
                format_time(time),
                delay.as_secs()
            );
            let deliver = deliver.clone();
            self.pending
                .push(DeferredTask::spawn(delay, move || deliver(alert)));
        }
        log::info!("Armed {} prayer alerts for {}", self.pending.len(), location);
    }

    pub fn disarm(&mut self) {
        if !self.pending.is_empty() {
            log::info!("Cancelling {} pending prayer alerts", self.pending.len());
        }
        for task in &self.pending {
            task.cancel();
        }
        self.pending.clear();
    }

    pub fn pending(&self) -> usize {
        self.pending.iter().filter(|t| t.is_pending()).count()
    }
}

impl Drop for NotificationScheduler {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::prayer::parse_time;
    use chrono::NaiveDate;
    use tokio::sync::mpsc;
    use tokio::time::timeout;

    fn now_at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 3, 30)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn passed_times_roll_to_tomorrow() {
        let now = now_at(14, 0);
        assert_eq!(delay_until(parse_time("15:50").unwrap(), now).as_secs(), 110 * 60);
        assert_eq!(
            delay_until(parse_time("05:10").unwrap(), now).as_secs(),
            (24 * 60 - 14 * 60 + 5 * 60 + 10) * 60
        );
        assert_eq!(delay_until(parse_time("14:00").unwrap(), now), Duration::ZERO);
    }

    #[test]
    fn alert_text() {
        let alert = PrayerAlert {
            prayer: Prayer::Maghrib,
            time: parse_time("18:20").unwrap(),
            location: "Ankara".to_string(),
        };
        assert_eq!(alert.title(), "Akşam Vakti");
        assert_eq!(alert.body(), "Ankara için Akşam vakti geldi: 18:20");
    }

    #[tokio::test]
    async fn due_alert_fires_and_rearming_cancels_stale_ones() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut scheduler = NotificationScheduler::new();
        let now = now_at(14, 0);

        // Asr is exactly now, everything else is hours away.
        let times = PrayerTimeSet::parse(["05:10", "06:45", "12:30", "14:00", "18:20", "19:50"])
            .unwrap();
        let sink = tx.clone();
        scheduler.arm(&times, "Ankara", now, move |a| {
            let _ = sink.send(a);
        });
        let fired = timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fired.prayer, Prayer::Asr);
        assert_eq!(fired.location, "Ankara");
        tokio::task::yield_now().await;
        assert_eq!(scheduler.pending(), 5);

        let later = PrayerTimeSet::parse(["05:11", "06:46", "12:31", "15:52", "18:23", "19:52"])
            .unwrap();
        let sink = tx.clone();
        scheduler.arm(&later, "Konya", now, move |a| {
            let _ = sink.send(a);
        });
        assert_eq!(scheduler.pending(), 6);

        scheduler.disarm();
        assert_eq!(scheduler.pending(), 0);
        drop(tx);
        assert!(timeout(Duration::from_secs(5), rx.recv())
            .await
            .unwrap()
            .is_none());
    }
}
