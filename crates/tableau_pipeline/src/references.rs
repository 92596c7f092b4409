//! Cross-run summary of character reference handles.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tableau_error::{JsonError, StorageError, StorageErrorKind, TableauResult};
use tableau_storage::write_atomic;
use tracing::debug;

/// Character name to handle and to local portrait path.
///
/// ```json
/// {
///   "uris": { "Mara": "https://cdn.example/mara.png" },
///   "files": { "Mara": "output/characters/mara.png" }
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct ReferenceSummary {
    /// Reference handle per character
    #[serde(default)]
    uris: BTreeMap<String, String>,
    /// Local canonical image per character
    #[serde(default)]
    files: BTreeMap<String, String>,
}

impl ReferenceSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the handle and local file of a character.
    pub fn record(&mut self, name: impl Into<String>, handle: impl Into<String>, file: impl Into<String>) {
        let name = name.into();
        self.uris.insert(name.clone(), handle.into());
        self.files.insert(name, file.into());
    }

    /// Handle recorded for a character.
    pub fn handle(&self, name: &str) -> Option<&str> {
        self.uris.get(name).map(String::as_str)
    }

    /// Loads the summary at `path`. A missing file is an empty summary.
    #[tracing::instrument(fields(path = %path.display()))]
    pub async fn load(path: &Path) -> TableauResult<Self> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No reference summary yet");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
                .into());
            }
        };

        let summary = serde_json::from_str(&contents).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(summary)
    }

    /// Writes the summary through a temp file and a rename.
    #[tracing::instrument(skip(self), fields(path = %path.display(), characters = self.uris.len()))]
    pub async fn save(&self, path: &Path) -> TableauResult<()> {
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| JsonError::new(format!("Failed to serialize reference summary: {}", e)))?;
        write_atomic(path, &json).await
    }
}
