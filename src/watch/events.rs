use std::time::Duration;

use crossterm::event::{self, Event as CEvent, KeyEvent};
use tokio::sync::mpsc;

use crate::notify::PrayerAlert;
use crate::timers::PeriodicTask;

const INPUT_POLL: Duration = Duration::from_millis(100);

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    /// Coarse tick: resolve the window again.
    Refresh,
    /// Fine tick: recompute the countdown only.
    Countdown,
    Alert(PrayerAlert),
}

/// Merges key input, both ticks and prayer alerts onto one channel.
///
/// Must be created inside a tokio runtime.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<Event>,
    rx: mpsc::UnboundedReceiver<Event>,
    _input: PeriodicTask,
    _refresh: PeriodicTask,
    _countdown: PeriodicTask,
}

impl EventHandler {
    pub fn new(refresh_every: Duration, countdown_every: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();

        let key_tx = tx.clone();
        // Zero-timeout polls only, so the runtime thread never blocks on input.
        let input = PeriodicTask::spawn("input", INPUT_POLL, move || {
            while event::poll(Duration::ZERO).unwrap_or(false) {
                match event::read() {
                    Ok(CEvent::Key(key)) => {
                        if key_tx.send(Event::Key(key)).is_err() {
                            return false;
                        }
                    }
                    Ok(_) => {}
                    Err(_) => return false,
                }
            }
            true
        });

        let refresh_tx = tx.clone();
        let refresh = PeriodicTask::spawn("refresh", refresh_every, move || {
            refresh_tx.send(Event::Refresh).is_ok()
        });

        let countdown_tx = tx.clone();
        let countdown = PeriodicTask::spawn("countdown", countdown_every, move || {
            countdown_tx.send(Event::Countdown).is_ok()
        });

        Self {
            tx,
            rx,
            _input: input,
            _refresh: refresh,
            _countdown: countdown,
        }
    }

    /// Sender for producers outside the handler, such as prayer alerts.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.tx.clone()
    }

    /// Never yields `None` while the handler is alive, since it holds a sender itself.
    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
