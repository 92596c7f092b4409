//! Ledger inspection command handler.

use std::path::Path;
use tableau::{
    AssetStore, FileSystemAssetStore, ItemKind, LedgerState, ProgressLedger, Script,
    TableauResult,
};
use tracing::warn;

/// How one item looks on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemStatus {
    Pending,
    Complete,
    /// In the ledger, but its metadata record is missing or unreadable
    Damaged,
}

impl ItemStatus {
    fn mark(self) -> char {
        match self {
            ItemStatus::Pending => ' ',
            ItemStatus::Complete => 'x',
            ItemStatus::Damaged => '!',
        }
    }
}

async fn item_status(
    store: &FileSystemAssetStore,
    ledger: &LedgerState,
    kind: ItemKind,
    key: &str,
) -> ItemStatus {
    if !ledger.is_complete(kind, key) {
        return ItemStatus::Pending;
    }

    match store
        .read_metadata(&store.layout().metadata_path(kind, key))
        .await
    {
        Ok(_) => ItemStatus::Complete,
        Err(e) => {
            warn!(%kind, key, error = %e, "Ledger entry without readable metadata");
            ItemStatus::Damaged
        }
    }
}

/// Print completed and pending items of a script.
///
/// Items the ledger marks complete are checked against their metadata
/// record; a missing or corrupt record is flagged with `!`.
pub async fn show_status(script_path: &Path, output: &Path) -> TableauResult<()> {
    let script = Script::from_file(script_path)?;
    let store = FileSystemAssetStore::new(output);
    let ledger = ProgressLedger::new(store.layout().ledger_path())
        .load()
        .await?;

    let mut done = 0;
    let mut damaged = 0;
    let mut tally = |status: ItemStatus| match status {
        ItemStatus::Complete => done += 1,
        ItemStatus::Damaged => damaged += 1,
        ItemStatus::Pending => {}
    };

    println!("{}", script.title());
    println!("Characters:");
    for character in script.characters() {
        let status = item_status(&store, &ledger, ItemKind::Character, character.name()).await;
        tally(status);
        println!("  [{}] {}", status.mark(), character.name());
    }

    println!("Scenes:");
    for scene in script.scenes() {
        let key = scene.item_id();
        let status = item_status(&store, &ledger, ItemKind::Scene, &key).await;
        tally(status);
        println!("  [{}] {}", status.mark(), key);
    }

    println!("{} of {} items completed", done, script.item_count());
    if damaged > 0 {
        println!(
            "warning: {} completed item(s) have no readable metadata; run `tableau reset` to regenerate",
            damaged
        );
    }

    for unknown in script.unknown_references() {
        println!(
            "warning: scene {} references undeclared character '{}'",
            unknown.scene_number, unknown.name
        );
    }
    Ok(())
}
