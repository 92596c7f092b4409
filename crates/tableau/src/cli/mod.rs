//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the tableau binary.

mod commands;
mod reset;
mod run;
mod status;

pub use commands::{Cli, Commands};
pub use reset::reset_progress;
pub use run::run_script;
pub use status::show_status;

use std::path::{Path, PathBuf};
use tableau::{TableauConfig, TableauResult};

/// Output directory from the command line, falling back to configuration.
pub fn resolve_output(output: Option<&Path>, config: Option<&Path>) -> TableauResult<PathBuf> {
    match output {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(TableauConfig::load_with_override(config)?.output.dir),
    }
}
