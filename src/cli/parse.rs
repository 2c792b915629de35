//! CLI parse: clap types for docview. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Docview CLI - drive a document list view against a snapshot fixture
#[derive(Parser)]
#[command(name = "docview")]
#[command(about = "Query, refresh and selection controller for document collections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (layered above the user config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a snapshot fixture through a mounted view until nothing is pending
    Watch {
        /// JSON array of result snapshots, returned one per execution
        fixture: PathBuf,
        /// Search term for the initial query
        #[arg(long)]
        query: Option<String>,
        /// Treat the collection as writeable (enables cache bypass and selection)
        #[arg(long)]
        writeable: bool,
        /// Override the refresh interval in milliseconds
        #[arg(long)]
        interval_ms: Option<u64>,
        /// Give up after this many milliseconds
        #[arg(long, default_value = "60000")]
        max_wait_ms: u64,
    },
    /// Print the effective configuration as JSON
    Config,
}
