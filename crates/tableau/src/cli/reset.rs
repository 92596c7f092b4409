//! Ledger reset command handler.

use std::path::Path;
use tableau::{AssetLayout, ProgressLedger, TableauResult};

/// Delete the ledger under `output`. Artifacts are left in place.
pub async fn reset_progress(output: &Path) -> TableauResult<()> {
    let ledger = ProgressLedger::new(AssetLayout::new(output).ledger_path());
    if ledger.reset().await? {
        println!("Removed {}", ledger.path().display());
    } else {
        println!("No ledger at {}", ledger.path().display());
    }
    Ok(())
}
