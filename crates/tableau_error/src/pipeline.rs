//! Pipeline item failure types.

/// Reasons a single character or scene did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Backend produced no result for the submission
    #[display("No generation result for '{}'", _0)]
    NoResult(String),
    /// Backend result carried no variations
    #[display("Generation result for '{}' has no variations", _0)]
    EmptyVariations(String),
    /// Upscale of the selected variation produced no usable handle
    #[display("Upscale of '{}' returned no usable image", _0)]
    UpscaleFailed(String),
    /// A builder was given incomplete fields
    #[display("Builder error: {}", _0)]
    Builder(String),
}

/// Pipeline error with location tracking.
///
/// # Examples
///
/// ```
/// use tableau_error::{PipelineError, PipelineErrorKind};
///
/// let err = PipelineError::new(PipelineErrorKind::NoResult("Mara".to_string()));
/// assert!(format!("{}", err).contains("Mara"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific failure
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
