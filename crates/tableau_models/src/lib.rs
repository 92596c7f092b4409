//! Concrete collaborators for the Tableau pipeline.
//!
//! - [`MidjourneyProxyClient`] drives a midjourney-proxy style REST service
//! - [`HttpImageFetcher`] downloads rendered images

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod fetcher;
mod midjourney;

pub use fetcher::HttpImageFetcher;
pub use midjourney::{
    ActionRequest, ActionRequestBuilder, ImagineRequest, ImagineRequestBuilder,
    MidjourneyProxyClient, SubmitResponse, TaskButton, TaskDto, TaskProperties, TaskStatus,
};
