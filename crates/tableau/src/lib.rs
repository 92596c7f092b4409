//! Tableau - script-driven character and scene asset generation
//!
//! Tableau reads a script of characters and scenes, generates a reference
//! portrait for every character through an image backend, then renders every
//! scene with the portraits attached as character references. Progress is
//! recorded after each item so an interrupted run resumes where it stopped.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use tableau::{
//!     FileSystemAssetStore, GenerationOrchestrator, HttpImageFetcher, MidjourneyProxyClient,
//!     Script, TableauConfig,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = TableauConfig::load()?;
//!     let script = Script::from_file("script.toml")?;
//!
//!     let orchestrator = GenerationOrchestrator::new(
//!         MidjourneyProxyClient::from_config(&config.backend),
//!         HttpImageFetcher::new(),
//!         FileSystemAssetStore::new(&config.output.dir),
//!     )
//!     .with_config(&config);
//!
//!     let report = orchestrator.run(&script).await?;
//!     println!("{}", report);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - `tableau_error` - Error types
//! - `tableau_core` - Script, character, scene and result types
//! - `tableau_interface` - Backend and fetcher traits
//! - `tableau_rate_limit` - Configuration, pacing and retries
//! - `tableau_storage` - Filesystem asset store
//! - `tableau_pipeline` - Prompt composition, ledger and orchestrator
//! - `tableau_models` - midjourney-proxy client and HTTP fetcher
//!
//! This crate re-exports everything for convenience.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod logging;

pub use logging::{LoggingConfig, init_logging};

pub use tableau_core::*;
pub use tableau_error::*;
pub use tableau_interface::*;
pub use tableau_models::{HttpImageFetcher, MidjourneyProxyClient};
pub use tableau_pipeline::{
    GenerationOrchestrator, ItemOutcome, LedgerState, PhaseReport, ProgressLedger,
    PromptComposer, PromptStyle, ReferenceMap, ReferenceSummary, RunReport, RunState,
    SelectionPolicy,
};
pub use tableau_rate_limit::*;
pub use tableau_storage::*;
