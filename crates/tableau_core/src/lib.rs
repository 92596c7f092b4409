//! Core data types for the Tableau asset generation pipeline.
//!
//! This crate provides the script model (characters and scenes), the backend
//! result abstraction, and the metadata record persisted next to every artifact.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod character;
mod generation;
mod item;
mod metadata;
mod naming;
mod scene;
mod script;

pub use character::{Character, CharacterBuilder};
pub use generation::{GenerationResult, GenerationResultBuilder, Variation, VariationBuilder};
pub use item::{ItemKind, ItemState};
pub use metadata::{ArtifactMetadata, ArtifactMetadataBuilder};
pub use naming::sanitize_name;
pub use scene::{Scene, SceneBuilder};
pub use script::{Script, ScriptBuilder, UnknownReference};
