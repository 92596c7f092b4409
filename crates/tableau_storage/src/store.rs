//! Asset store trait definition.

use crate::AssetLayout;
use derive_getters::Getters;
use std::path::{Path, PathBuf};
use tableau_core::ArtifactMetadata;
use tableau_error::TableauResult;

/// Where an artifact ended up and what it contained.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct StoredArtifact {
    /// Final path of the written file
    path: PathBuf,
    /// SHA-256 of the written bytes, hex encoded
    content_hash: String,
    /// Number of bytes written
    size_bytes: usize,
}

impl StoredArtifact {
    /// Create a new artifact record.
    pub fn new(path: PathBuf, content_hash: String, size_bytes: usize) -> Self {
        Self {
            path,
            content_hash,
            size_bytes,
        }
    }
}

/// Trait for persisting generated artifacts.
///
/// The orchestrator treats every error from `persist_*` as an item failure,
/// while an error from `scaffold` aborts the run.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    /// Path mapping used by this store.
    fn layout(&self) -> &AssetLayout;

    /// Create the output directory tree.
    async fn scaffold(&self) -> TableauResult<()>;

    /// Write binary content to `path`, creating parent directories.
    async fn persist_artifact(&self, bytes: &[u8], path: &Path) -> TableauResult<StoredArtifact>;

    /// Write a metadata record as pretty JSON to `path`.
    async fn persist_metadata(&self, record: &ArtifactMetadata, path: &Path) -> TableauResult<()>;

    /// Read a metadata record back.
    ///
    /// A missing file is `StorageErrorKind::NotFound`; unparsable content is
    /// `StorageErrorKind::Corrupt`.
    async fn read_metadata(&self, path: &Path) -> TableauResult<ArtifactMetadata>;
}
