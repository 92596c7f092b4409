//! Durable record of completed items.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tableau_core::ItemKind;
use tableau_error::{JsonError, StorageError, StorageErrorKind, TableauResult};
use tableau_storage::write_atomic;
use tracing::debug;

/// Completed characters and scenes.
///
/// Sets are ordered so the serialized ledger is stable between runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct LedgerState {
    /// Names of completed characters
    #[serde(default)]
    completed_characters: BTreeSet<String>,
    /// Keys (`scene_NNN`) of completed scenes
    #[serde(default)]
    completed_scenes: BTreeSet<String>,
}

impl LedgerState {
    /// Creates an empty ledger state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the item was completed in an earlier run or earlier in this one.
    pub fn is_complete(&self, kind: ItemKind, key: &str) -> bool {
        self.set(kind).contains(key)
    }

    /// Records an item as complete. Returns `false` if it already was.
    pub fn mark_complete(&mut self, kind: ItemKind, key: impl Into<String>) -> bool {
        let key = key.into();
        debug!(kind = %kind, key = %key, "Marking item complete");
        match kind {
            ItemKind::Character => self.completed_characters.insert(key),
            ItemKind::Scene => self.completed_scenes.insert(key),
        }
    }

    /// Number of completed items of both kinds.
    pub fn len(&self) -> usize {
        self.completed_characters.len() + self.completed_scenes.len()
    }

    /// Whether nothing has completed yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn set(&self, kind: ItemKind) -> &BTreeSet<String> {
        match kind {
            ItemKind::Character => &self.completed_characters,
            ItemKind::Scene => &self.completed_scenes,
        }
    }
}

/// Loads and saves the ledger file.
///
/// A missing file is an empty ledger. A file that exists but does not parse
/// is an error, never silently replaced.
#[derive(Debug, Clone, Getters)]
pub struct ProgressLedger {
    /// Location of the ledger file
    path: PathBuf,
}

impl ProgressLedger {
    /// Creates a ledger stored at `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads the ledger, or an empty state if none exists yet.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn load(&self) -> TableauResult<LedgerState> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No existing ledger, starting fresh");
                return Ok(LedgerState::new());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    self.path.display(),
                    e
                )))
                .into());
            }
        };

        let state: LedgerState = serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                path: self.path.display().to_string(),
                message: e.to_string(),
            })
        })?;

        debug!(
            characters = state.completed_characters.len(),
            scenes = state.completed_scenes.len(),
            "Loaded ledger"
        );
        Ok(state)
    }

    /// Persists the ledger through a temp file and a rename.
    #[tracing::instrument(skip(self, state), fields(path = %self.path.display(), completed = state.len()))]
    pub async fn save(&self, state: &LedgerState) -> TableauResult<()> {
        let json = serde_json::to_vec_pretty(state)
            .map_err(|e| JsonError::new(format!("Failed to serialize ledger: {}", e)))?;
        write_atomic(&self.path, &json).await?;
        debug!("Saved ledger");
        Ok(())
    }

    /// Deletes the ledger. Returns whether a file was removed.
    #[tracing::instrument(skip(self), fields(path = %self.path.display()))]
    pub async fn reset(&self) -> TableauResult<bool> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                tracing::info!("Ledger removed");
                Ok(true)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StorageError::new(StorageErrorKind::FileWrite(format!(
                "remove {}: {}",
                self.path.display(),
                e
            )))
            .into()),
        }
    }
}
