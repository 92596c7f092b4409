//! Backend generation results.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One alternative rendering returned for a single submission.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[builder(setter(into))]
pub struct Variation {
    /// Backend identifier of the variation
    id: String,
    /// Backend content hash
    #[builder(default)]
    hash: String,
    /// Where the rendering can be downloaded
    uri: String,
}

/// Response of the backend for one submitted prompt or upscale.
///
/// `options` order is backend-defined and significant: index 0 is the
/// default pick.
///
/// # Examples
///
/// ```
/// use tableau_core::{GenerationResultBuilder, VariationBuilder};
///
/// let result = GenerationResultBuilder::default()
///     .id("msg-1")
///     .hash("abc")
///     .uri("https://cdn.example/grid.png")
///     .options(vec![
///         VariationBuilder::default()
///             .id("msg-1:1")
///             .uri("https://cdn.example/1.png")
///             .build()
///             .unwrap(),
///     ])
///     .build()
///     .unwrap();
///
/// assert_eq!(result.options().len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct GenerationResult {
    /// Backend message/task identifier
    id: String,
    /// Backend message hash, required for follow-up actions
    #[serde(default)]
    #[builder(default)]
    hash: String,
    /// Backend message flags, required for follow-up actions
    #[serde(default)]
    #[builder(default)]
    flags: u32,
    /// Primary image location
    #[serde(default)]
    #[builder(default)]
    uri: String,
    /// Alternative renderings
    #[serde(default)]
    #[builder(default)]
    options: Vec<Variation>,
}

impl GenerationResult {
    /// Identifiers of every variation, in backend order.
    pub fn variation_ids(&self) -> Vec<String> {
        self.options.iter().map(|v| v.id.clone()).collect()
    }
}
