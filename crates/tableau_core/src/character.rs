//! Character declarations.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// A character declared by a script.
///
/// The `reference_handle` stays empty until the character's portrait has been
/// generated; it is then the backend-issued URL later scenes use to keep the
/// character's appearance consistent.
///
/// # Examples
///
/// ```
/// use tableau_core::CharacterBuilder;
///
/// let mara = CharacterBuilder::default()
///     .name("Mara")
///     .description("a lanky courier with a shaved head")
///     .style_prompt("ink wash")
///     .build()
///     .unwrap();
///
/// assert_eq!(mara.name(), "Mara");
/// assert!(mara.reference_handle().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Character {
    /// Unique key within a script
    name: String,
    /// Physical description used in every prompt mentioning the character
    description: String,
    /// Character-specific style hints
    #[serde(default)]
    #[builder(default)]
    style_prompt: String,
    /// Backend handle of the generated portrait
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    reference_handle: Option<String>,
}

impl Character {
    /// Returns a copy of this character carrying the resolved reference handle.
    pub fn with_reference(&self, handle: impl Into<String>) -> Self {
        Self {
            reference_handle: Some(handle.into()),
            ..self.clone()
        }
    }
}
