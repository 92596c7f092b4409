//! Scene declarations.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A narrative scene to be rendered once all characters are resolved.
///
/// # Examples
///
/// ```
/// use tableau_core::SceneBuilder;
///
/// let scene = SceneBuilder::default()
///     .scene_number(7u32)
///     .description("the handoff")
///     .characters(vec!["Mara".to_string(), "Ilse".to_string()])
///     .setting("a flooded arcade")
///     .mood("tense")
///     .action("Mara passes a sealed envelope")
///     .build()
///     .unwrap();
///
/// assert_eq!(scene.item_id(), "scene_007");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Scene {
    /// Ordering key, also used for output naming
    scene_number: u32,
    /// What happens in the scene
    description: String,
    /// Names of participating characters; the first one is emphasised
    #[serde(default)]
    #[builder(default)]
    characters: Vec<String>,
    /// Where the scene takes place
    #[serde(default)]
    #[builder(default)]
    setting: String,
    /// Emotional tone
    #[serde(default)]
    #[builder(default)]
    mood: String,
    /// Optional framing hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    camera_angle: Option<String>,
    /// Visible action of the characters
    #[serde(default)]
    #[builder(default)]
    action: String,
}

impl Scene {
    /// Ledger and file-name key for this scene (`scene_007`).
    pub fn item_id(&self) -> String {
        format!("scene_{:03}", self.scene_number)
    }
}
