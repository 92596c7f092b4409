//! Asset storage for the Tableau pipeline.
//!
//! Generated artifacts are written under a single output directory:
//!
//! ```text
//! <root>/characters/<name>.png
//! <root>/characters/<name>.json
//! <root>/characters/variations/<name>_<i>.png
//! <root>/scenes/scene_<NNN>.png
//! <root>/scenes/scene_<NNN>.json
//! <root>/scenes/variations/scene_<NNN>_<i>.png
//! <root>/progress.json
//! <root>/character_references.json
//! ```
//!
//! Every write goes through a temporary sibling file followed by a rename, so a
//! reader never observes a half-written artifact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod filesystem;
mod layout;
mod store;

pub use filesystem::{FileSystemAssetStore, compute_hash, write_atomic};
pub use layout::AssetLayout;
pub use store::{AssetStore, StoredArtifact};
