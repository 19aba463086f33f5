use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "vakit", version, author, about = "Prayer times for Turkish cities, with a live countdown")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Live view: current window, next prayer and a ticking countdown
    Watch,
    /// Show today's prayer times and the current window
    Times {
        /// City name or plate number (defaults to the configured city)
        #[arg(long)]
        city: Option<String>,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the seven-day schedule
    Week {
        #[arg(long)]
        city: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Resolve the current and next prayer at a given time
    Next {
        #[arg(long)]
        city: Option<String>,
        /// Time of day as HH:MM (defaults to now)
        #[arg(long)]
        at: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the generated fallback times for a city
    Mock {
        /// City plate number
        city_id: i64,
        /// Days from today
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        day: i64,
    },
    /// Shift an HH:MM time by a number of minutes, wrapping at midnight
    Shift {
        time: String,
        #[arg(allow_hyphen_values = true)]
        minutes: i32,
    },
    /// List cities, optionally filtered by name
    Cities {
        search: Option<String>,
    },
    /// Set the default city
    City {
        /// City name or plate number
        name: String,
    },
    /// Prayer-time notifications
    Notify {
        #[command(subcommand)]
        action: NotifyCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum NotifyCommands {
    /// Enable alerts in watch mode
    On,
    /// Disable alerts
    Off,
    /// Show a test alert now
    Test,
}
