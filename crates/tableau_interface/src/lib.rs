//! Trait definitions for the collaborators the Tableau pipeline drives.
//!
//! The pipeline never talks to the network itself. It consumes:
//! - an [`ImageBackend`] that turns prompts into [`GenerationResult`]s,
//! - an [`ImageFetcher`] that materialises backend-hosted images as bytes,
//! - optionally a [`ProgressObserver`] that is told about intermediate progress.
//!
//! [`GenerationResult`]: tableau_core::GenerationResult

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod observer;
mod traits;
mod upscale;

pub use observer::{LoggingObserver, ProgressObserver};
pub use traits::{ImageBackend, ImageFetcher};
pub use upscale::{UpscaleRequest, UpscaleRequestBuilder};
