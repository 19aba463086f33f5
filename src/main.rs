mod cli;
mod config;
mod models;
mod notify;
mod prayer_times;
mod source;
mod timers;
mod utils;
mod watch;

use anyhow::{Context, Result};
use clap::Parser;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    match cli.command {
        // No subcommand → live view
        None | Some(Commands::Watch) => watch::app::run(config)?,
        Some(Commands::Times { city, json }) => {
            handlers::handle_times(&config, city.as_deref(), json)?;
        }
        Some(Commands::Week { city, json }) => {
            handlers::handle_week(&config, city.as_deref(), json)?;
        }
        Some(Commands::Next { city, at, json }) => {
            handlers::handle_next(&config, city.as_deref(), at.as_deref(), json)?;
        }
        Some(Commands::Mock { city_id, day }) => handlers::handle_mock(city_id, day)?,
        Some(Commands::Shift { time, minutes }) => handlers::handle_shift(&time, minutes)?,
        Some(Commands::Cities { search }) => {
            handlers::handle_cities(&config, search.as_deref())?;
        }
        Some(Commands::City { name }) => handlers::handle_city(&mut config, &name)?,
        Some(Commands::Notify { action }) => handlers::handle_notify(&mut config, &action)?,
    }

    Ok(())
}
