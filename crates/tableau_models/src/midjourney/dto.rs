//! midjourney-proxy data transfer objects.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of `POST /mj/submit/imagine`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[builder(setter(into))]
pub struct ImagineRequest {
    /// Full prompt including directives
    prompt: String,
}

/// Body of `POST /mj/submit/action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder, Getters)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct ActionRequest {
    /// Task whose button is pressed
    task_id: String,
    /// Button identifier
    custom_id: String,
}

/// Answer to any submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct SubmitResponse {
    /// 1 = submitted, 21 = already exists, 22 = queued, anything else = rejected
    code: i32,
    /// Human readable status
    #[serde(default)]
    description: Option<String>,
    /// New task id
    #[serde(default)]
    result: Option<String>,
}

impl SubmitResponse {
    /// Task id when the submission was accepted.
    pub fn accepted_task(&self) -> Option<&str> {
        match self.code {
            1 | 21 | 22 => self.result.as_deref().filter(|id| !id.is_empty()),
            _ => None,
        }
    }
}

/// Lifecycle of a proxy task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    /// Created, not yet sent to Discord
    NotStart,
    /// Sent, waiting for the bot
    Submitted,
    /// Waiting on a modal confirmation
    Modal,
    /// Rendering
    InProgress,
    /// Finished with an image
    Success,
    /// Finished without an image
    Failure,
    /// Cancelled
    Cancel,
    /// Any status this client does not know
    #[serde(other)]
    Unknown,
}

impl TaskStatus {
    /// Whether polling can stop.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Success | Self::Failure | Self::Cancel)
    }
}

/// Discord message details of a finished task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TaskProperties {
    /// Discord message id
    #[serde(default)]
    message_id: Option<String>,
    /// Discord message hash
    #[serde(default)]
    message_hash: Option<String>,
    /// Discord message flags
    #[serde(default)]
    flags: Option<u32>,
}

/// A button attached to a finished task (`U1`, `V2`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TaskButton {
    /// Identifier to send back in an action
    custom_id: String,
    /// Visible label
    #[serde(default)]
    label: String,
}

/// Answer of `GET /mj/task/{id}/fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
#[serde(rename_all = "camelCase")]
pub struct TaskDto {
    /// Task id
    id: String,
    /// Current status
    status: TaskStatus,
    /// Progress label such as `"42%"`
    #[serde(default)]
    progress: Option<String>,
    /// Preview or final image
    #[serde(default)]
    image_url: Option<String>,
    /// Failure cause
    #[serde(default)]
    fail_reason: Option<String>,
    /// Discord message details
    #[serde(default)]
    properties: TaskProperties,
    /// Follow-up actions
    #[serde(default)]
    buttons: Vec<TaskButton>,
}
