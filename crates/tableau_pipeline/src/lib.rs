//! The Tableau generation pipeline.
//!
//! This crate turns a [`Script`](tableau_core::Script) into persisted character
//! portraits and scene images:
//!
//! - [`PromptComposer`] builds backend-ready prompts
//! - [`ProgressLedger`] records completed items so runs can resume
//! - [`ReferenceSummary`] keeps character reference handles across runs
//! - [`GenerationOrchestrator`] sequences the character phase before the
//!   scene phase and contains item failures
//!
//! # Example
//!
//! ```rust,ignore
//! use tableau_pipeline::GenerationOrchestrator;
//! use tableau_storage::FileSystemAssetStore;
//!
//! let orchestrator = GenerationOrchestrator::new(backend, fetcher, FileSystemAssetStore::new("output"))
//!     .with_config(&config);
//! let report = orchestrator.run(&script).await?;
//! println!("{}", report);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod composer;
mod ledger;
mod orchestrator;
mod references;
mod report;
mod selection;

pub use composer::{PromptComposer, PromptStyle, ReferenceMap};
pub use ledger::{LedgerState, ProgressLedger};
pub use orchestrator::{GenerationOrchestrator, RunState};
pub use references::ReferenceSummary;
pub use report::{ItemOutcome, PhaseReport, RunReport};
pub use selection::SelectionPolicy;
