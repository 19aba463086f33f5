use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use crossterm::{
    cursor::MoveToColumn,
    event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    queue,
    style::Print,
    terminal::{self, Clear, ClearType},
};
use std::io::{self, Write};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::AppConfig;
use crate::models::{city, City, PrayerWindow, ScheduleOrigin, WeeklySchedule};
use crate::notify::{NotificationScheduler, PrayerAlert};
use crate::prayer_times::{live_countdown, load_weekly, resolve};
use crate::source::{self, PrayerTimeSource};
use crate::utils::format::{format_hms, format_time};
use crate::watch::events::{Event, EventHandler};

pub struct App {
    pub config: AppConfig,
    source: Box<dyn PrayerTimeSource>,
    pub city: City,
    pub week: WeeklySchedule,
    pub window: PrayerWindow,
    pub countdown: String,
    pub loaded_on: NaiveDate,
    pub last_alert: Option<PrayerAlert>,
    pub should_quit: bool,
    /// Settings changed from the keyboard and not yet saved.
    pub dirty: bool,
    alerts: NotificationScheduler,
    alert_tx: Option<UnboundedSender<Event>>,
}

impl App {
    pub fn new(config: AppConfig, source: Box<dyn PrayerTimeSource>, now: NaiveDateTime) -> Self {
        let city = city::by_id(config.location.city_id);
        let week = load_weekly(&city, source.as_ref(), now.date());
        let window = resolve(&week.today().times, now.time());
        let countdown =
            live_countdown(&window.next, now.time()).unwrap_or_else(|| format_hms(0));

        App {
            config,
            source,
            city,
            week,
            window,
            countdown,
            loaded_on: now.date(),
            last_alert: None,
            should_quit: false,
            dirty: false,
            alerts: NotificationScheduler::new(),
            alert_tx: None,
        }
    }

    /// Route prayer alerts into `tx` and arm them if notifications are enabled.
    pub fn attach_alerts(&mut self, tx: UnboundedSender<Event>, now: NaiveDateTime) {
        self.alert_tx = Some(tx);
        self.rearm(now);
    }

    pub fn pending_alerts(&self) -> usize {
        self.alerts.pending()
    }

    /// Fetch (or generate) the week again and re-arm alerts for it.
    pub fn load(&mut self, now: NaiveDateTime) {
        self.week = load_weekly(&self.city, self.source.as_ref(), now.date());
        self.loaded_on = now.date();
        self.refresh_window(now);
        self.rearm(now);
    }

    /// Coarse tick. Reloads on day rollover, otherwise re-resolves the window.
    pub fn refresh(&mut self, now: NaiveDateTime) {
        if now.date() != self.loaded_on {
            log::info!("Day changed to {}, reloading schedule", now.date());
            self.load(now);
        } else {
            self.refresh_window(now);
        }
    }

    /// Fine tick. Only re-resolves once the countdown has run out.
    pub fn tick_countdown(&mut self, now: NaiveDateTime) {
        if now.date() != self.loaded_on {
            self.load(now);
            return;
        }
        match live_countdown(&self.window.next, now.time()) {
            Some(countdown) => self.countdown = countdown,
            None => self.refresh_window(now),
        }
    }

    fn refresh_window(&mut self, now: NaiveDateTime) {
        self.window = resolve(&self.week.today().times, now.time());
        self.countdown =
            live_countdown(&self.window.next, now.time()).unwrap_or_else(|| format_hms(0));
    }

    fn rearm(&mut self, now: NaiveDateTime) {
        match (&self.alert_tx, self.config.notifications.enabled) {
            (Some(tx), true) => {
                let tx = tx.clone();
                self.alerts.arm(
                    &self.week.today().times,
                    &self.city.name,
                    now,
                    move |alert| {
                        let _ = tx.send(Event::Alert(alert));
                    },
                );
            }
            _ => self.alerts.disarm(),
        }
    }

    pub fn switch_city(&mut self, step: i64, now: NaiveDateTime) {
        self.city = city::cycle(self.city.id, step);
        self.config.location.city_id = self.city.id;
        self.dirty = true;
        self.load(now);
    }

    pub fn toggle_notifications(&mut self, now: NaiveDateTime) {
        self.config.notifications.enabled = !self.config.notifications.enabled;
        self.dirty = true;
        self.rearm(now);
    }

    pub fn on_alert(&mut self, alert: PrayerAlert) {
        self.last_alert = Some(alert);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: NaiveDateTime) {
        // Some terminals also report release and repeat events
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char(']') | KeyCode::Right => self.switch_city(1, now),
            KeyCode::Char('[') | KeyCode::Left => self.switch_city(-1, now),
            KeyCode::Char('r') => self.load(now),
            KeyCode::Char('n') => self.toggle_notifications(now),
            _ => {}
        }
    }

    pub fn status_line(&self) -> String {
        let current = &self.window.current;
        let current_str = if current.is_active {
            format!(
                "{} {}-{}",
                current.prayer.display_name(),
                format_time(current.start),
                format_time(current.end)
            )
        } else {
            current.prayer.display_name().to_string()
        };
        let mut line = format!(
            "{}  ·  Mevcut: {}  ·  Sonraki: {} {}  ·  {}",
            self.city.name,
            current_str,
            self.window.next.label(),
            format_time(self.window.next.time),
            self.countdown
        );
        if self.week.origin == ScheduleOrigin::Generated {
            line.push_str("  (tahmini)");
        }
        if self.config.notifications.enabled {
            line.push_str("  [bildirim açık]");
        }
        line
    }

    fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(
            out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(self.status_line())
        )?;
        out.flush()
    }
}

fn draw_alert(alert: &PrayerAlert, out: &mut impl Write) -> io::Result<()> {
    queue!(
        out,
        MoveToColumn(0),
        Clear(ClearType::CurrentLine),
        Print(format!("\x07{}: {}\r\n", alert.title(), alert.body()))
    )?;
    out.flush()
}

/// Run the live view until the user quits.
///
/// Timers and input polling share one current-thread runtime, so every state
/// change happens on this thread between awaits.
pub fn run(config: AppConfig) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("Starting timer runtime")?;
    runtime.block_on(run_live(config))
}

async fn run_live(config: AppConfig) -> Result<()> {
    let source = source::from_config(&config);
    let mut events = EventHandler::new(
        config.refresh.refresh_interval(),
        config.refresh.countdown_interval(),
    );
    let now = Local::now().naive_local();
    let mut app = App::new(config, source, now);
    app.attach_alerts(events.sender(), now);

    terminal::enable_raw_mode().context("Enabling raw terminal mode")?;
    let result = event_loop(&mut app, &mut events).await;
    let _ = terminal::disable_raw_mode();
    println!();

    if app.dirty {
        app.config.save().context("Saving config")?;
    }
    result
}

async fn event_loop(app: &mut App, events: &mut EventHandler) -> Result<()> {
    let mut out = io::stdout();
    app.draw(&mut out)?;

    while let Some(event) = events.next().await {
        let now = Local::now().naive_local();
        match event {
            Event::Key(key) => {
                app.handle_key(key, now);
                if app.should_quit {
                    break;
                }
            }
            Event::Refresh => app.refresh(now),
            Event::Countdown => app.tick_countdown(now),
            Event::Alert(alert) => {
                draw_alert(&alert, &mut out)?;
                app.on_alert(alert);
            }
        }
        app.draw(&mut out)?;
    }
    Ok(())
}
