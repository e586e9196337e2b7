//! Operator command line.

use clap::{Parser, Subcommand, ValueEnum};

/// Manage the users table
#[derive(Parser, Debug)]
#[command(name = "usersdb")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log output format
    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run pending database migrations
    Migrate,

    /// Create a user; prints the new id
    Create {
        email: String,

        /// Plaintext password; prefer the environment over the flag
        #[arg(long, env = "USER_PASSWORD", hide_env_values = true)]
        password: String,
    },

    /// Print a user by email as JSON
    Show {
        email: String,
    },
}
