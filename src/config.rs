//! Configuration and CLI argument handling

use clap::Parser;

use crate::timer::{CountDirection, TimerConfig};

/// CLI argument parsing structure
#[derive(Parser)]
#[command(name = "fittrack")]
#[command(about = "A state-managed HTTP server for personal fitness tracking")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "5000")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Initial interval duration in seconds
    #[arg(short = 'd', long, default_value = "120")]
    pub interval_duration: u32,

    /// Initial number of intervals per workout
    #[arg(short = 'c', long, default_value = "4")]
    pub interval_count: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Initial engine configuration. Saved per-user settings replace it via
    /// the settings endpoint.
    pub fn timer_config(&self) -> TimerConfig {
        TimerConfig {
            interval_duration: self.interval_duration,
            interval_count: self.interval_count,
            count_direction: CountDirection::Down,
            sound_enabled: true,
        }
    }
}
