//! Mapping from logical item names to output paths.

use std::path::{Path, PathBuf};
use strum::IntoEnumIterator;
use tableau_core::{ItemKind, sanitize_name};

const VARIATIONS_DIR: &str = "variations";
const LEDGER_FILE: &str = "progress.json";
const REFERENCE_SUMMARY_FILE: &str = "character_references.json";
const IMAGE_EXTENSION: &str = "png";
const METADATA_EXTENSION: &str = "json";

/// Output directory layout rooted at a single directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLayout {
    root: PathBuf,
}

impl AssetLayout {
    /// Create a layout rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Output root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding canonical artifacts of one kind.
    pub fn kind_dir(&self, kind: ItemKind) -> PathBuf {
        self.root.join(kind.dir_name())
    }

    /// Directory holding every variation of one kind.
    pub fn variations_dir(&self, kind: ItemKind) -> PathBuf {
        self.kind_dir(kind).join(VARIATIONS_DIR)
    }

    /// Every directory `scaffold` must create.
    pub fn directories(&self) -> Vec<PathBuf> {
        ItemKind::iter()
            .flat_map(|kind| [self.kind_dir(kind), self.variations_dir(kind)])
            .collect()
    }

    /// Canonical image path for an item.
    pub fn artifact_path(&self, kind: ItemKind, key: &str) -> PathBuf {
        self.kind_dir(kind)
            .join(format!("{}.{}", sanitize_name(key), IMAGE_EXTENSION))
    }

    /// Metadata record path for an item.
    pub fn metadata_path(&self, kind: ItemKind, key: &str) -> PathBuf {
        self.kind_dir(kind)
            .join(format!("{}.{}", sanitize_name(key), METADATA_EXTENSION))
    }

    /// Path of the `index`th variation of an item.
    pub fn variation_path(&self, kind: ItemKind, key: &str, index: usize) -> PathBuf {
        self.variations_dir(kind).join(format!(
            "{}_{}.{}",
            sanitize_name(key),
            index,
            IMAGE_EXTENSION
        ))
    }

    /// Progress ledger path.
    pub fn ledger_path(&self) -> PathBuf {
        self.root.join(LEDGER_FILE)
    }

    /// Reference summary path.
    pub fn reference_summary_path(&self) -> PathBuf {
        self.root.join(REFERENCE_SUMMARY_FILE)
    }
}
