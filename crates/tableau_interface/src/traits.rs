//! Trait definitions for the image backend and the binary fetch collaborator.

use crate::{ProgressObserver, UpscaleRequest};
use async_trait::async_trait;
use tableau_core::GenerationResult;
use tableau_error::TableauResult;

/// Remote image generation service.
///
/// Implementations wrap a single shared, rate-limited backend. The pipeline
/// calls these methods strictly sequentially and never submits two prompts
/// at once.
///
/// `Ok(None)` means the backend answered but produced nothing usable; `Err`
/// means the call itself failed. The pipeline treats both as a failure of
/// the current item only.
#[async_trait]
pub trait ImageBackend: Send + Sync {
    /// Establish a session. Failure here aborts the run.
    async fn connect(&self) -> TableauResult<()>;

    /// Submit a prompt and wait until the backend has rendered it.
    async fn submit_prompt(
        &self,
        prompt: &str,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>>;

    /// Upscale one variation of an earlier result.
    async fn upscale(
        &self,
        request: &UpscaleRequest,
        observer: Option<&dyn ProgressObserver>,
    ) -> TableauResult<Option<GenerationResult>>;

    /// Release the session.
    async fn disconnect(&self) -> TableauResult<()>;

    /// Backend name used in logs.
    fn backend_name(&self) -> &'static str;
}

/// Downloads backend-hosted images.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// Fetch the bytes behind `url`.
    async fn fetch(&self, url: &str) -> TableauResult<Vec<u8>>;
}
