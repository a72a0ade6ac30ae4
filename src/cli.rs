//! Command-line interface

use clap::{ArgAction, Parser};
use tracing::Level;

use crate::web::{ServerConfig, DEFAULT_BIND, DEFAULT_PORT};

/// Exit codes returned by the binary
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
}

/// Preview uploaded CSV files and convert them to XLSX
#[derive(Parser, Debug)]
#[command(name = "csvsheet", version, about)]
pub struct Cli {
    /// Port to listen on
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Address to bind to
    #[arg(short, long, default_value = DEFAULT_BIND)]
    pub bind: String,

    /// Maximum upload size in MB (unlimited when unset)
    #[arg(long, value_name = "MB")]
    pub upload_limit: Option<usize>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Log level selected by `-v` / `-q`
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::WARN;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }

    /// Server configuration from the parsed flags
    pub fn server_config(&self) -> ServerConfig {
        let config = ServerConfig::default()
            .with_port(self.port)
            .with_bind(&self.bind);
        match self.upload_limit {
            Some(mb) => config.with_upload_limit(mb.saturating_mul(1024 * 1024)),
            None => config,
        }
    }
}
