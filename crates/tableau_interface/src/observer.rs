//! Progress observation.

/// Receives informational progress updates while a submission or upscale is
/// in flight.
///
/// Invocation count and timing are backend-defined. Observers must not
/// influence the outcome of the call they observe.
pub trait ProgressObserver: Send + Sync {
    /// Called with the current preview image (if any) and a progress label such as `"42%"`.
    fn on_progress(&self, uri: &str, progress: &str);
}

/// Observer that forwards progress to the tracing subscriber.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver {
    label: String,
}

impl LoggingObserver {
    /// Create an observer tagging events with `label` (usually the item id).
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, uri: &str, progress: &str) {
        tracing::debug!(item = %self.label, progress, uri, "Generation progress");
    }
}
