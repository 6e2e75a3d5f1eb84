//! Configuration management for the editor binary.
//!
//! Handles:
//! - Command-line argument parsing
//! - Config file and dictionary location

use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::document::AUTOSAVE_INTERVAL;

const CONFIG_DIR_NAME: &str = "vertex-ideas";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Command-line arguments for the editor
#[derive(Debug, Parser)]
#[command(name = "ideas")]
#[command(about = "Vertex Ideas: a small annotating text editor")]
#[command(version)]
pub struct Args {
    /// File to open at startup
    pub file: Option<PathBuf>,

    /// Settings file to load and persist preferences to
    #[arg(long, help = "Path of the settings file")]
    pub config: Option<PathBuf>,

    /// Extra word list merged into the built-in dictionary
    #[arg(long, help = "Word list file, one word per line")]
    pub dictionary: Option<PathBuf>,

    /// Log level for the editor
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,

    /// Seconds between autosave ticks
    #[arg(long, default_value_t = AUTOSAVE_INTERVAL.as_secs())]
    pub autosave_interval: u64,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// File named on the command line
    pub file: Option<PathBuf>,
    /// Resolved settings file path
    pub config_path: PathBuf,
    pub dictionary: Option<PathBuf>,
    pub log_level: String,
    pub autosave_interval: Duration,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        if args.autosave_interval == 0 {
            bail!("--autosave-interval must be at least 1 second");
        }

        let config_path = args.config.unwrap_or_else(default_config_path);

        Ok(Config {
            file: args.file,
            config_path,
            dictionary: args.dictionary,
            log_level: args.log_level,
            autosave_interval: Duration::from_secs(args.autosave_interval),
        })
    }
}

/// `<config_dir>/vertex-ideas/config.toml`, or `config.toml` in the working
/// directory when the platform has no config directory.
pub fn default_config_path() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    }
}
