//! midjourney-proxy REST integration.

mod client;
mod conversion;
mod dto;

pub use client::MidjourneyProxyClient;
pub use dto::{
    ActionRequest, ActionRequestBuilder, ImagineRequest, ImagineRequestBuilder, SubmitResponse,
    TaskButton, TaskDto, TaskProperties, TaskStatus,
};
