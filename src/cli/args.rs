//! CLI argument definitions using clap
//!
//! Commands:
//! - quill init --config <path>
//! - quill start --config <path> [--log-format json|pretty]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::observability::LogFormat;

/// Quill - a blogging backend
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the database schema and exit
    Init {
        /// Path to configuration file
        #[arg(long, default_value = "./quill.json")]
        config: PathBuf,
    },

    /// Start the HTTP server
    Start {
        /// Path to configuration file
        #[arg(long, default_value = "./quill.json")]
        config: PathBuf,

        /// Log line format: json or pretty
        #[arg(long, default_value = "json")]
        log_format: LogFormat,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
