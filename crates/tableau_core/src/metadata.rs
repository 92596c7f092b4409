//! Metadata record persisted next to each canonical artifact.

use chrono::{DateTime, Utc};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// What produced an artifact and where it lives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ArtifactMetadata {
    /// Prompt submitted to the backend
    prompt: String,
    /// Backend identifier of the submission
    generation_id: String,
    /// Variation chosen as canonical
    selected_variation_id: String,
    /// Every variation the backend returned
    all_variation_ids: Vec<String>,
    /// Where the canonical image was written
    local_path: String,
    /// When the artifact was persisted
    #[builder(default = "Utc::now()")]
    timestamp: DateTime<Utc>,
    /// SHA-256 of the canonical image bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    content_hash: Option<String>,
    /// Handle recorded for later reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    reference_handle: Option<String>,
}
