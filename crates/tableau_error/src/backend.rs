//! Backend error types.

/// Kinds of failures reported by the image generation backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum BackendErrorKind {
    /// Could not establish a session with the backend
    #[display("Connection failed: {}", _0)]
    Connection(String),
    /// The backend refused a submission
    #[display("Submission rejected: {}", _0)]
    Rejected(String),
    /// The backend answered with a payload we could not interpret
    #[display("Unexpected response: {}", _0)]
    UnexpectedResponse(String),
    /// A task did not finish within the allotted time
    #[display("Timed out waiting for task {}", _0)]
    Timeout(String),
    /// Operation attempted without an active session
    #[display("Not connected")]
    NotConnected,
}

/// Backend error with source location.
///
/// # Examples
///
/// ```
/// use tableau_error::{BackendError, BackendErrorKind};
///
/// let err = BackendError::new(BackendErrorKind::Connection("refused".to_string()));
/// assert!(format!("{}", err).contains("refused"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Backend Error: {} at line {} in {}", kind, line, file)]
pub struct BackendError {
    /// The kind of error that occurred
    pub kind: BackendErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl BackendError {
    /// Create a new BackendError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: BackendErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
