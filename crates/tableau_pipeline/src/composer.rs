//! Prompt composition.
//!
//! Prompts are a comma-separated list of descriptive parts followed by
//! space-separated backend directives:
//!
//! ```text
//! <quality>, <description>, <style>, <art style>, <directive> --ar 2:3 --v 6.1 --style raw
//! ```
//!
//! Scene prompts additionally end with one `--cref <handle>` per referenced
//! character that already has a handle. The reference of the first character
//! listed in the scene is followed by `--cw <weight>`; when that character has
//! no handle, no weight is emitted.

use derive_getters::Getters;
use regex::Regex;
use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;
use tableau_core::{Character, Scene, Script};
use tableau_rate_limit::PromptConfig;

/// Character name to resolved reference handle.
pub type ReferenceMap = BTreeMap<String, String>;

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Valid whitespace regex"));

/// Vocabulary used by the [`PromptComposer`].
///
/// Defaults target a Midjourney-style backend. Any field can be replaced
/// through the `[prompt]` configuration section.
#[derive(Debug, Clone, PartialEq, Eq, Getters, derive_setters::Setters)]
#[setters(prefix = "with_", into)]
pub struct PromptStyle {
    /// Quality boilerplate leading every prompt
    quality: String,
    /// Reference-sheet directive for character prompts
    character_directive: String,
    /// Lighting and composition directive for scene prompts
    scene_directive: String,
    /// Aspect ratio of character sheets
    character_aspect: String,
    /// Aspect ratio of scenes
    scene_aspect: String,
    /// Backend model version
    version: String,
    /// Request the raw style
    style_raw: bool,
    /// Weight given to the first referenced character
    reference_weight: u32,
}

impl Default for PromptStyle {
    fn default() -> Self {
        Self {
            quality: "masterpiece, best quality, highly detailed".to_string(),
            character_directive:
                "full-body character reference sheet, multiple angles, front view, side view, back view, neutral pose, plain background"
                    .to_string(),
            scene_directive: "cinematic lighting, dramatic composition, detailed background"
                .to_string(),
            character_aspect: "2:3".to_string(),
            scene_aspect: "16:9".to_string(),
            version: "6.1".to_string(),
            style_raw: true,
            reference_weight: 100,
        }
    }
}

impl PromptStyle {
    /// Apply configuration overrides on top of this style.
    ///
    /// Only fields present in `config` are replaced.
    pub fn with_overrides(mut self, config: &PromptConfig) -> Self {
        if let Some(quality) = &config.quality {
            self.quality = quality.clone();
        }
        if let Some(directive) = &config.character_directive {
            self.character_directive = directive.clone();
        }
        if let Some(directive) = &config.scene_directive {
            self.scene_directive = directive.clone();
        }
        if let Some(aspect) = &config.character_aspect {
            self.character_aspect = aspect.clone();
        }
        if let Some(aspect) = &config.scene_aspect {
            self.scene_aspect = aspect.clone();
        }
        if let Some(version) = &config.version {
            self.version = version.clone();
        }
        if let Some(raw) = config.style_raw {
            self.style_raw = raw;
        }
        if let Some(weight) = config.reference_weight {
            self.reference_weight = weight;
        }
        self
    }

    fn format_directives(&self, aspect: &str) -> Vec<String> {
        let mut directives = Vec::new();
        if !aspect.trim().is_empty() {
            directives.push(format!("--ar {}", aspect.trim()));
        }
        if !self.version.trim().is_empty() {
            directives.push(format!("--v {}", self.version.trim()));
        }
        if self.style_raw {
            directives.push("--style raw".to_string());
        }
        directives
    }
}

/// Builds backend prompts for characters and scenes.
///
/// Composition is pure: identical inputs always yield identical prompts.
///
/// # Examples
///
/// ```
/// use tableau_core::CharacterBuilder;
/// use tableau_pipeline::PromptComposer;
///
/// let mara = CharacterBuilder::default()
///     .name("Mara")
///     .description("a lanky courier")
///     .build()
///     .unwrap();
///
/// let prompt = PromptComposer::default().compose_character(&mara, "graphic novel");
/// assert!(prompt.contains("a lanky courier, graphic novel"));
/// assert!(prompt.ends_with("--ar 2:3 --v 6.1 --style raw"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromptComposer {
    style: PromptStyle,
}

impl PromptComposer {
    /// Create a composer with the given vocabulary.
    pub fn new(style: PromptStyle) -> Self {
        Self { style }
    }

    /// The vocabulary in use.
    pub fn style(&self) -> &PromptStyle {
        &self.style
    }

    /// Prompt for a character reference sheet.
    pub fn compose_character(&self, character: &Character, art_style: &str) -> String {
        let parts: [&str; 5] = [
            self.style.quality.as_str(),
            character.description(),
            character.style_prompt(),
            art_style,
            self.style.character_directive.as_str(),
        ];

        assemble(
            parts.iter().map(|p| p.to_string()),
            self.style.format_directives(&self.style.character_aspect),
        )
    }

    /// Prompt for a scene.
    ///
    /// Characters unknown to the script appear as their bare name. Characters
    /// without an entry in `references` get no reference directive.
    pub fn compose_scene(&self, scene: &Scene, script: &Script, references: &ReferenceMap) -> String {
        let mut parts = vec![self.style.quality.clone()];
        parts.extend(
            scene
                .characters()
                .iter()
                .map(|name| character_clause(name, script.character(name))),
        );
        parts.push(scene.action().clone());
        if !scene.setting().trim().is_empty() {
            parts.push(format!("in {}", scene.setting().trim()));
        }
        parts.push(scene.mood().clone());
        if let Some(angle) = scene.camera_angle() {
            parts.push(angle.clone());
        }
        parts.push(script.art_style().clone());
        parts.push(self.style.scene_directive.clone());

        let mut directives = self.style.format_directives(&self.style.scene_aspect);
        directives.extend(self.reference_directives(scene, references));

        assemble(parts, directives)
    }

    /// One `--cref` per distinct resolved name. `--cw` belongs to the
    /// first-listed character only and is never moved to a later one.
    fn reference_directives(&self, scene: &Scene, references: &ReferenceMap) -> Vec<String> {
        let lead = scene.characters().first();
        let mut seen = HashSet::new();
        let mut directives = Vec::new();

        for name in scene.characters() {
            if !seen.insert(name.as_str()) {
                continue;
            }
            let Some(handle) = references.get(name).filter(|h| !h.trim().is_empty()) else {
                continue;
            };
            directives.push(format!("--cref {}", handle.trim()));
            if lead == Some(name) {
                directives.push(format!("--cw {}", self.style.reference_weight));
            }
        }

        directives
    }
}

fn character_clause(name: &str, character: Option<&Character>) -> String {
    let Some(character) = character else {
        return name.to_string();
    };

    let details: Vec<&str> = [character.description().as_str(), character.style_prompt().as_str()]
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .collect();

    if details.is_empty() {
        name.to_string()
    } else {
        format!("{} ({})", name, details.join(", "))
    }
}

fn normalise(part: &str) -> String {
    WHITESPACE.replace_all(part.trim(), " ").into_owned()
}

fn assemble(parts: impl IntoIterator<Item = String>, directives: Vec<String>) -> String {
    let body = parts
        .into_iter()
        .map(|p| normalise(&p))
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if directives.is_empty() {
        body
    } else {
        format!("{} {}", body, directives.join(" "))
    }
}
