//! CLI command definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tableau - generate consistent character and scene art from a script
#[derive(Parser, Debug)]
#[command(name = "tableau")]
#[command(about = "Generate consistent character and scene art from a script", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate every pending character and scene of a script
    Run {
        /// Path to the script (TOML, or JSON with a .json extension)
        #[arg(long)]
        script: PathBuf,

        /// Output directory (defaults to `[output] dir` from configuration)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Extra configuration file layered over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show which items are complete without contacting the backend
    Status {
        /// Path to the script
        #[arg(long)]
        script: PathBuf,

        /// Output directory (defaults to `[output] dir` from configuration)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Extra configuration file consulted for the output directory
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Delete the progress ledger so the next run starts over
    Reset {
        /// Output directory (defaults to `[output] dir` from configuration)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Extra configuration file consulted for the output directory
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
