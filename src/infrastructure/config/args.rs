use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::app_config::LogLevel;
use crate::domain::PriceRange;

/// Top-level command line.
#[derive(Debug, Parser)]
#[command(
    name = "autosphere",
    version,
    about = "Command-line client for the AutoSphere car marketplace",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Marketplace API root.
    #[arg(long, env = "AUTOSPHERE_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Host serving car images.
    #[arg(long, env = "AUTOSPHERE_MEDIA_HOST", global = true)]
    pub media_host: Option<String>,

    /// Request timeout in seconds.
    #[arg(long, value_name = "SECS", global = true)]
    pub request_timeout: Option<u64>,

    /// Action to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Subcommands.
///
/// Passwords are read from `AUTOSPHERE_PASSWORD` and
/// `AUTOSPHERE_CONFIRM_PASSWORD` when the flags are omitted, which keeps them
/// out of the process list and shell history.
#[derive(Debug, Clone, Subcommand)]
#[allow(missing_docs)]
pub enum Command {
    /// Show the featured cars.
    Featured,
    /// Browse the catalog.
    Browse(BrowseArgs),
    /// Log in and remember the session.
    Login {
        #[arg(long)]
        email: String,
        /// Account password.
        #[arg(long, env = "AUTOSPHERE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account and log in.
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// New account password.
        #[arg(long, env = "AUTOSPHERE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Same password again.
        #[arg(long, env = "AUTOSPHERE_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm_password: String,
    },
    /// List saved cars.
    Favorites,
    /// Add or remove a car from favorites.
    Toggle {
        /// Id of the car.
        car_id: String,
    },
    /// Forget the stored session.
    Logout,
    /// Show who is logged in.
    Whoami,
}

impl Command {
    /// Subcommand name, safe to log.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Featured => "featured",
            Self::Browse(_) => "browse",
            Self::Login { .. } => "login",
            Self::Signup { .. } => "signup",
            Self::Favorites => "favorites",
            Self::Toggle { .. } => "toggle",
            Self::Logout => "logout",
            Self::Whoami => "whoami",
        }
    }
}

/// Filters and page of the `browse` subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct BrowseArgs {
    /// Result page, starting at 1.
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Exact make, e.g. Toyota.
    #[arg(long)]
    pub make: Option<String>,

    /// Model year.
    #[arg(long)]
    pub year: Option<String>,

    /// Fuel type, e.g. Electric.
    #[arg(long)]
    pub fuel: Option<String>,

    /// One of `0-50000`, `50000-100000`, `100000-200000`, `200000+`.
    #[arg(long)]
    pub price_range: Option<PriceRange>,

    /// Free text search.
    #[arg(long)]
    pub search: Option<String>,
}
