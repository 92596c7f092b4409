//! Error types for the Tableau pipeline.
//!
//! This crate provides the foundation error types used throughout the Tableau workspace.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use tableau_error::{TableauResult, HttpError};
//!
//! fn fetch_image() -> TableauResult<Vec<u8>> {
//!     Err(HttpError::new("Connection refused"))?
//! }
//!
//! match fetch_image() {
//!     Ok(bytes) => println!("Got {} bytes", bytes.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod backend;
mod config;
mod error;
mod http;
mod json;
mod pipeline;
mod script;
mod storage;

pub use backend::{BackendError, BackendErrorKind};
pub use config::ConfigError;
pub use error::{TableauError, TableauErrorKind, TableauResult};
pub use http::HttpError;
pub use json::JsonError;
pub use pipeline::{PipelineError, PipelineErrorKind};
pub use script::{ScriptError, ScriptErrorKind};
pub use storage::{StorageError, StorageErrorKind};
