//! Command-Line Interface

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Reachpad - virtual trackpad server driven by OSC control messages
#[derive(Parser, Debug)]
#[command(name = "reachpad")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server
    Run {
        /// Bind address (overrides config)
        #[arg(short, long)]
        bind: Option<String>,

        /// UDP port (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Record actions instead of injecting them
        #[arg(long)]
        dry_run: bool,
    },

    /// List registered address patterns
    Addresses,

    /// Initialize configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// View or modify configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., "server.port", "channels.joy-left.gain")
        key: String,

        /// Value to set
        value: String,
    },

    /// Get a specific configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// Reset configuration to defaults
    Reset {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
