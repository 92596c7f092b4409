//! Choice of the canonical variation.

use tableau_core::Variation;
use tableau_rate_limit::SelectionConfig;
use tracing::warn;

/// Which of the returned variations becomes the canonical artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum SelectionPolicy {
    /// Pick the variation at a zero-based index
    #[display("index {}", _0)]
    Index(usize),
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        SelectionPolicy::Index(0)
    }
}

impl SelectionPolicy {
    /// Build the policy from the `[selection]` configuration section.
    pub fn from_config(config: &SelectionConfig) -> Self {
        SelectionPolicy::Index(config.index)
    }

    /// Select a variation, returning its index.
    ///
    /// An out-of-range index falls back to the first variation. Returns `None`
    /// only when `options` is empty.
    pub fn select<'a>(&self, options: &'a [Variation]) -> Option<(usize, &'a Variation)> {
        let SelectionPolicy::Index(index) = *self;
        if let Some(variation) = options.get(index) {
            return Some((index, variation));
        }
        let first = options.first()?;
        warn!(
            index,
            available = options.len(),
            "Selected variation out of range, using the first one"
        );
        Some((0, first))
    }
}
