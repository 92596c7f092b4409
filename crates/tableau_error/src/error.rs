//! Top-level error wrapper types.

use crate::{
    BackendError, ConfigError, HttpError, JsonError, PipelineError, ScriptError, StorageError,
};

/// Every error condition the pipeline can surface.
///
/// # Examples
///
/// ```
/// use tableau_error::{TableauError, HttpError};
///
/// let http_err = HttpError::new("Connection failed");
/// let err: TableauError = http_err.into();
/// assert!(format!("{}", err).contains("HTTP Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum TableauErrorKind {
    /// HTTP error
    #[from(HttpError)]
    Http(HttpError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
    /// Image generation backend error
    #[from(BackendError)]
    Backend(BackendError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Storage error
    #[from(StorageError)]
    Storage(StorageError),
    /// Script loading or validation error
    #[from(ScriptError)]
    Script(ScriptError),
    /// Item-level pipeline failure
    #[from(PipelineError)]
    Pipeline(PipelineError),
}

/// Tableau error with kind discrimination.
///
/// # Examples
///
/// ```
/// use tableau_error::{TableauResult, ConfigError};
///
/// fn might_fail() -> TableauResult<()> {
///     Err(ConfigError::new("Missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Tableau Error: {}", _0)]
pub struct TableauError(Box<TableauErrorKind>);

impl TableauError {
    /// Create a new error from a kind.
    pub fn new(kind: TableauErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &TableauErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to TableauErrorKind
impl<T> From<T> for TableauError
where
    T: Into<TableauErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Tableau operations.
pub type TableauResult<T> = std::result::Result<T, TableauError>;
