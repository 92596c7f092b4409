//! Errors from HTTP transfers: image downloads and midjourney-proxy calls.

/// A failed HTTP exchange.
///
/// `status` is set when the server answered with a non-success status, and
/// left empty when no response arrived at all (refused connection, timeout,
/// truncated body).
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("HTTP Error: {} at line {} in {}", message, line, file)]
pub struct HttpError {
    /// What was requested and what went wrong
    pub message: String,
    /// Response status, if the server answered
    pub status: Option<u16>,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl HttpError {
    /// An exchange that produced no usable response.
    ///
    /// # Examples
    ///
    /// ```
    /// use tableau_error::HttpError;
    ///
    /// let err = HttpError::new("GET https://cdn.example/mara.png failed: connection refused");
    /// assert!(err.message.contains("mara.png"));
    /// assert!(err.status.is_none());
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: None,
            line: location.line(),
            file: location.file(),
        }
    }

    /// A response whose status was not a success.
    ///
    /// # Examples
    ///
    /// ```
    /// use tableau_error::HttpError;
    ///
    /// let err = HttpError::with_status("POST /mj/submit/imagine returned 401", 401);
    /// assert_eq!(err.status, Some(401));
    /// assert!(format!("{}", err).contains("imagine"));
    /// ```
    #[track_caller]
    pub fn with_status(message: impl Into<String>, status: u16) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            status: Some(status),
            line: location.line(),
            file: location.file(),
        }
    }
}
