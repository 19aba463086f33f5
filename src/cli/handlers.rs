use anyhow::{anyhow, Context, Result};
use chrono::Local;

use crate::cli::args::NotifyCommands;
use crate::config::AppConfig;
use crate::models::prayer::parse_time;
use crate::models::{city, City, PrayerWindow, ScheduleOrigin, WeeklySchedule};
use crate::prayer_times::mock::{adjust_time_str, generate};
use crate::prayer_times::{load_weekly, next_prayer, resolve};
use crate::source;
use crate::utils::format::{format_time, pad_display};

// ─── ANSI helpers ────────────────────────────────────────────────────────────

macro_rules! println_colored {
    ($color:expr, $($arg:tt)*) => {{
        print!("{}", $color);
        print!($($arg)*);
        println!("\x1b[0m");
    }};
}

const GREEN: &str = "\x1b[32m";
const AMBER: &str = "\x1b[33m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const GOLD: &str = "\x1b[38;2;196;160;68m";

fn resolve_city(config: &AppConfig, arg: Option<&str>) -> Result<City> {
    match arg {
        Some(name) => city::find(name)
            .ok_or_else(|| anyhow!("Unknown city '{}'. See `vakit cities`", name)),
        None => Ok(city::by_id(config.location.city_id)),
    }
}

fn load_week(config: &AppConfig, city: &City) -> WeeklySchedule {
    let source = source::from_config(config);
    let week = load_weekly(city, source.as_ref(), Local::now().date_naive());
    log::debug!("Schedule for {} is {}", city.name, week.origin.as_str());
    week
}

fn origin_note(week: &WeeklySchedule) {
    if week.origin == ScheduleOrigin::Generated {
        println_colored!(DIM, "  Tahmini değerler (kaynak kullanılamadı)");
    }
}

fn print_window(window: &PrayerWindow) {
    let current = &window.current;
    if current.is_active {
        println_colored!(
            GREEN,
            "  Mevcut: {} ({} - {}), kalan {}",
            current.prayer.display_name(),
            format_time(current.start),
            format_time(current.end),
            current.remaining
        );
    } else {
        println_colored!(DIM, "  Mevcut: {}", current.prayer.display_name());
    }
    println_colored!(
        AMBER,
        "  Sonraki: {} {} ({})",
        window.next.label(),
        format_time(window.next.time),
        window.next.remaining_phrase()
    );
}

// ─── Times ───────────────────────────────────────────────────────────────────

pub fn handle_times(config: &AppConfig, city_arg: Option<&str>, json: bool) -> Result<()> {
    let city = resolve_city(config, city_arg)?;
    let week = load_week(config, &city);
    let today = week.today();
    let now = Local::now().time();
    let window = resolve(&today.times, now);

    if json {
        let value = serde_json::json!({
            "city": city,
            "origin": week.origin,
            "date": today.date,
            "hijri_label": today.hijri_label,
            "times": today.times,
            "window": window,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!();
    println_colored!(
        GOLD,
        "  Namaz Vakitleri · {} ({}, {})",
        city.name,
        today.date.format("%Y-%m-%d"),
        today.hijri_label
    );
    println!();

    for (prayer, time) in today.times.entries() {
        let name = pad_display(prayer.display_name(), 8);
        let time_str = format_time(time);
        if prayer == window.next.prayer && !window.next.is_tomorrow {
            println_colored!(AMBER, "  {}  {}  ◀", name, time_str);
        } else if time <= now {
            println_colored!(DIM, "  {}  {}", name, time_str);
        } else {
            println_colored!(BOLD, "  {}  {}", name, time_str);
        }
    }

    println!();
    print_window(&window);
    origin_note(&week);
    println!();
    Ok(())
}

// ─── Week ────────────────────────────────────────────────────────────────────

pub fn handle_week(config: &AppConfig, city_arg: Option<&str>, json: bool) -> Result<()> {
    let city = resolve_city(config, city_arg)?;
    let week = load_week(config, &city);

    if json {
        println!("{}", serde_json::to_string_pretty(&week)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  Haftalık Vakitler · {}", city.name);
    println!();

    let mut header = format!("  {}  {}", pad_display("Tarih", 10), pad_display("Hicri", 20));
    for (prayer, _) in week.today().times.entries() {
        header.push_str(&pad_display(prayer.display_name(), 8));
    }
    println_colored!(DIM, "{}", header);

    for (i, day) in week.days.iter().enumerate() {
        let mut row = format!(
            "  {}  {}",
            day.date.format("%Y-%m-%d"),
            pad_display(&day.hijri_label, 20)
        );
        for (_, time) in day.times.entries() {
            row.push_str(&pad_display(&format_time(time), 8));
        }
        if i == 0 {
            println_colored!(BOLD, "{}", row);
        } else {
            println!("{}", row);
        }
    }

    println!();
    origin_note(&week);
    println!();
    Ok(())
}

// ─── Next ────────────────────────────────────────────────────────────────────

pub fn handle_next(
    config: &AppConfig,
    city_arg: Option<&str>,
    at: Option<&str>,
    json: bool,
) -> Result<()> {
    let city = resolve_city(config, city_arg)?;
    let week = load_week(config, &city);
    let times = week.today().times;

    let (now, is_now) = match at {
        Some(raw) => (parse_time(raw).with_context(|| format!("Parsing --at {}", raw))?, false),
        None => (Local::now().time(), true),
    };

    let mut window = resolve(&times, now);
    if is_now {
        // The source only knows about the real current time.
        let source = source::from_config(config);
        window.next = next_prayer(&times, now, &city, source.as_ref());
    }
    log::debug!("{}", window);

    if json {
        println!("{}", serde_json::to_string_pretty(&window)?);
        return Ok(());
    }

    println!();
    println_colored!(GOLD, "  {} · {}", city.name, now.format("%H:%M"));
    print_window(&window);
    println!();
    Ok(())
}

// ─── Mock / shift ────────────────────────────────────────────────────────────

pub fn handle_mock(city_id: i64, day: i64) -> Result<()> {
    let times = generate(city_id, day);
    println!();
    println_colored!(
        GOLD,
        "  Tahmini vakitler · şehir {} · gün {:+}",
        city_id,
        day
    );
    for (prayer, time) in times.entries() {
        println!("  {}  {}", pad_display(prayer.display_name(), 8), format_time(time));
    }
    println!();
    Ok(())
}

pub fn handle_shift(time: &str, minutes: i32) -> Result<()> {
    let shifted = adjust_time_str(time, minutes)?;
    println!("{}", shifted);
    Ok(())
}

// ─── Cities ──────────────────────────────────────────────────────────────────

pub fn handle_cities(config: &AppConfig, search: Option<&str>) -> Result<()> {
    let cities = city::search(search.unwrap_or(""));
    if cities.is_empty() {
        println_colored!(DIM, "  No city matches '{}'", search.unwrap_or(""));
        return Ok(());
    }
    for c in &cities {
        if c.id == config.location.city_id {
            println_colored!(GOLD, "  {}  {}  ●", c.code, c.name);
        } else {
            println!("  {}  {}", c.code, c.name);
        }
    }
    Ok(())
}

pub fn handle_city(config: &mut AppConfig, name: &str) -> Result<()> {
    let city = city::find(name).ok_or_else(|| anyhow!("Unknown city '{}'", name))?;
    config.location.city_id = city.id;
    config.save()?;
    println_colored!(GREEN, "  ✓ Default city set to {}", city.name);
    Ok(())
}

// ─── Notifications ───────────────────────────────────────────────────────────

pub fn handle_notify(config: &mut AppConfig, action: &NotifyCommands) -> Result<()> {
    match action {
        NotifyCommands::On => {
            config.notifications.enabled = true;
            config.save()?;
            println_colored!(GREEN, "  ✓ Prayer alerts enabled (shown in `vakit watch`)");
        }
        NotifyCommands::Off => {
            config.notifications.enabled = false;
            config.save()?;
            println_colored!(DIM, "  Prayer alerts disabled");
        }
        NotifyCommands::Test => {
            let city = city::by_id(config.location.city_id);
            println!("\x07");
            println_colored!(BOLD, "  Test Bildirimi");
            println!(
                "  {} için test bildirimi - {}",
                city.name,
                format_time(Local::now().time())
            );
            if !config.notifications.enabled {
                println_colored!(DIM, "  Alerts are off. Enable with `vakit notify on`");
            }
        }
    }
    Ok(())
}
