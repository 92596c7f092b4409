//! Configuration, submission pacing, and retry policy.
//!
//! The pipeline treats the image backend as a single shared, rate-limited
//! resource. This crate holds the knobs that keep it that way:
//!
//! - [`TableauConfig`] - layered TOML configuration (bundled defaults, user
//!   overrides, explicit files)
//! - [`Pacer`] - fixed courtesy delay after each item, plus an optional
//!   requests-per-minute ceiling enforced with governor
//! - [`RetryPolicy`] - bounded fixed-interval retries of a single backend call

mod config;
mod pacer;
mod retry;

pub use config::{
    BackendConfig, OutputConfig, PacingConfig, PromptConfig, RetryConfig, SelectionConfig,
    TableauConfig,
};
pub use pacer::Pacer;
pub use retry::RetryPolicy;
