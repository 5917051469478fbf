//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Mapset hitsound checker.
///
/// Compares the hitsounding of every difficulty in a mapset and reports cues
/// that are missing from some of them.
#[derive(Debug, Parser)]
#[command(name = "hs", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run checks over a mapset and print the findings.
    Check {
        /// Mapset JSON file, or `-` to read from stdin.
        mapset: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,

        /// Only run the given check (repeatable).
        #[arg(long, value_name = "ID")]
        only: Vec<String>,
    },

    /// Show which difficulties use their own hitsounding.
    Schemes {
        /// Mapset JSON file, or `-` to read from stdin.
        mapset: PathBuf,

        /// Output as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List the available checks.
    Checks,
}
