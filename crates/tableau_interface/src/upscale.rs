//! Upscale request parameters.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Identifies one variation of an earlier result to upscale.
///
/// `index` is 1-based, matching the backend's `U1`..`U4` actions.
///
/// # Examples
///
/// ```
/// use tableau_interface::UpscaleRequestBuilder;
///
/// let request = UpscaleRequestBuilder::default()
///     .index(1u32)
///     .msg_id("task-42")
///     .hash("9f2c")
///     .flags(0u32)
///     .build()
///     .unwrap();
///
/// assert_eq!(*request.index(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct UpscaleRequest {
    /// 1-based variation index
    index: u32,
    /// Identifier of the result being upscaled
    msg_id: String,
    /// Hash of the result being upscaled
    #[builder(default)]
    hash: String,
    /// Flags of the result being upscaled
    #[builder(default)]
    flags: u32,
}
