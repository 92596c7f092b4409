//! Pipeline item identity and lifecycle.

use serde::{Deserialize, Serialize};

/// The two kinds of items the pipeline generates.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::EnumIter,
    derive_more::Display,
)]
pub enum ItemKind {
    /// Character reference portrait
    #[display("character")]
    Character,
    /// Narrative scene
    #[display("scene")]
    Scene,
}

impl ItemKind {
    /// Directory name used for this kind of artifact.
    pub fn dir_name(&self) -> &'static str {
        match self {
            ItemKind::Character => "characters",
            ItemKind::Scene => "scenes",
        }
    }
}

/// Lifecycle of a single item within one run.
///
/// Items already recorded in the progress ledger start out `Resolved` and are
/// never submitted again.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, derive_more::Display,
)]
pub enum ItemState {
    /// Not yet attempted in this run
    #[display("pending")]
    Pending,
    /// Handed to the backend, awaiting its answer
    #[display("submitted")]
    Submitted,
    /// Artifact, metadata and ledger entry written
    #[display("resolved")]
    Resolved,
    /// Attempted and gave up; stays pending in the ledger
    #[display("failed")]
    Failed,
}

impl ItemState {
    /// Whether the item ended the run with a persisted artifact.
    pub fn is_resolved(&self) -> bool {
        matches!(self, ItemState::Resolved)
    }
}
