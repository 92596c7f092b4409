//! Per-phase and per-run outcome summaries.

use derive_getters::Getters;
use tableau_core::{ItemKind, ItemState};

/// Outcome of one item within a phase.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct ItemOutcome {
    /// Character name or scene key
    key: String,
    /// Final state for this run
    state: ItemState,
    /// Completed in an earlier run and not submitted
    #[getter(rename = "is_skipped")]
    skipped: bool,
    /// Failure cause, when `state` is `Failed`
    error: Option<String>,
}

impl ItemOutcome {
    /// Item completed earlier and skipped.
    pub fn skipped(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ItemState::Resolved,
            skipped: true,
            error: None,
        }
    }

    /// Item generated and persisted in this run.
    pub fn resolved(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ItemState::Resolved,
            skipped: false,
            error: None,
        }
    }

    /// Item attempted and abandoned.
    pub fn failed(key: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            state: ItemState::Failed,
            skipped: false,
            error: Some(error.into()),
        }
    }
}

/// Outcomes of one phase, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct PhaseReport {
    /// Which phase
    kind: ItemKind,
    /// Item outcomes in processing order
    outcomes: Vec<ItemOutcome>,
}

impl PhaseReport {
    /// Starts an empty report for a phase.
    pub fn new(kind: ItemKind) -> Self {
        Self {
            kind,
            outcomes: Vec::new(),
        }
    }

    /// Appends an outcome.
    pub fn push(&mut self, outcome: ItemOutcome) {
        self.outcomes.push(outcome);
    }

    /// Items submitted to the backend in this run.
    pub fn attempted(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.skipped).count()
    }

    /// Items generated in this run.
    pub fn completed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| !o.skipped && o.state.is_resolved())
            .count()
    }

    /// Items skipped because an earlier run completed them.
    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.skipped).count()
    }

    /// Items that failed in this run.
    pub fn failed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.state == ItemState::Failed)
            .count()
    }

    /// Items of this phase that are complete after the run.
    pub fn done(&self) -> usize {
        self.completed() + self.skipped()
    }

    /// All items of this phase.
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

/// Summary of a whole run.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RunReport {
    /// Character phase
    characters: PhaseReport,
    /// Scene phase
    scenes: PhaseReport,
}

impl RunReport {
    /// Combines both phase reports.
    pub fn new(characters: PhaseReport, scenes: PhaseReport) -> Self {
        Self { characters, scenes }
    }

    /// Items complete after the run, including ones skipped on resume.
    pub fn done(&self) -> usize {
        self.characters.done() + self.scenes.done()
    }

    /// Items declared by the script.
    pub fn total(&self) -> usize {
        self.characters.total() + self.scenes.total()
    }

    /// Items that failed in this run.
    pub fn failed(&self) -> usize {
        self.characters.failed() + self.scenes.failed()
    }

    /// Items submitted to the backend in this run.
    pub fn attempted(&self) -> usize {
        self.characters.attempted() + self.scenes.attempted()
    }

    /// Whether every declared item is complete.
    pub fn is_complete(&self) -> bool {
        self.done() == self.total()
    }
}

impl std::fmt::Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} of {} items completed", self.done(), self.total())
    }
}
