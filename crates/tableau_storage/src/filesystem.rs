//! Filesystem-backed asset store.

use crate::{AssetLayout, AssetStore, StoredArtifact};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tableau_core::ArtifactMetadata;
use tableau_error::{JsonError, StorageError, StorageErrorKind, TableauResult};
use uuid::Uuid;

/// Compute the SHA-256 hash of data, hex encoded.
pub fn compute_hash(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Write `data` to `path` through a uniquely named temp file and a rename.
///
/// Parent directories are created as needed. If the rename fails the temp file
/// is removed on a best-effort basis.
#[tracing::instrument(skip(data), fields(path = %path.display(), size = data.len()))]
pub async fn write_atomic(path: &Path, data: &[u8]) -> TableauResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                "{}: {}",
                parent.display(),
                e
            )))
        })?;
    }

    let temp_path = temp_sibling(path);
    tokio::fs::write(&temp_path, data).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileWrite(format!(
            "{}: {}",
            temp_path.display(),
            e
        )))
    })?;

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(StorageError::new(StorageErrorKind::FileWrite(format!(
            "rename {} to {}: {}",
            temp_path.display(),
            path.display(),
            e
        )))
        .into());
    }

    tracing::debug!("Wrote file atomically");
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4()))
}

/// Asset store writing plain files under an [`AssetLayout`].
///
/// # Example Structure
///
/// ```text
/// output/
/// ├── characters/
/// │   ├── mara.png
/// │   ├── mara.json
/// │   └── variations/
/// │       ├── mara_0.png
/// │       └── mara_1.png
/// └── scenes/
///     ├── scene_001.png
///     ├── scene_001.json
///     └── variations/
/// ```
#[derive(Debug, Clone)]
pub struct FileSystemAssetStore {
    layout: AssetLayout,
}

impl FileSystemAssetStore {
    /// Create a store rooted at `root`. Nothing is touched until [`AssetStore::scaffold`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            layout: AssetLayout::new(root),
        }
    }
}

#[async_trait::async_trait]
impl AssetStore for FileSystemAssetStore {
    fn layout(&self) -> &AssetLayout {
        &self.layout
    }

    #[tracing::instrument(skip(self), fields(root = %self.layout.root().display()))]
    async fn scaffold(&self) -> TableauResult<()> {
        for dir in self.layout.directories() {
            tokio::fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::new(StorageErrorKind::DirectoryCreation(format!(
                    "{}: {}",
                    dir.display(),
                    e
                )))
            })?;
        }
        tracing::info!("Scaffolded output directories");
        Ok(())
    }

    #[tracing::instrument(skip(self, bytes), fields(path = %path.display(), size = bytes.len()))]
    async fn persist_artifact(&self, bytes: &[u8], path: &Path) -> TableauResult<StoredArtifact> {
        let hash = compute_hash(bytes);
        write_atomic(path, bytes).await?;

        tracing::debug!(hash = %hash, "Persisted artifact");
        Ok(StoredArtifact::new(path.to_path_buf(), hash, bytes.len()))
    }

    #[tracing::instrument(skip(self, record), fields(path = %path.display()))]
    async fn persist_metadata(&self, record: &ArtifactMetadata, path: &Path) -> TableauResult<()> {
        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| JsonError::new(format!("Failed to serialize metadata: {}", e)))?;
        write_atomic(path, &json).await
    }

    #[tracing::instrument(skip(self), fields(path = %path.display()))]
    async fn read_metadata(&self, path: &Path) -> TableauResult<ArtifactMetadata> {
        let data = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                StorageError::new(StorageErrorKind::NotFound(path.display().to_string()))
            } else {
                StorageError::new(StorageErrorKind::FileRead(format!(
                    "{}: {}",
                    path.display(),
                    e
                )))
            }
        })?;

        let record = serde_json::from_slice(&data).map_err(|e| {
            StorageError::new(StorageErrorKind::Corrupt {
                path: path.display().to_string(),
                message: e.to_string(),
            })
        })?;
        Ok(record)
    }
}
