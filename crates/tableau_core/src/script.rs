//! Script documents: the pipeline's sole required input.

use crate::{Character, Scene, sanitize_name};
use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use tableau_error::{ScriptError, ScriptErrorKind};

/// A scene mentioning a character the script never declares.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnknownReference {
    /// Scene carrying the reference
    pub scene_number: u32,
    /// The undeclared name
    pub name: String,
}

/// Complete script: characters to design and scenes to render.
///
/// # Example TOML Structure
///
/// ```toml
/// title = "Night Courier"
/// artStyle = "cinematic graphic novel"
///
/// [[characters]]
/// name = "Mara"
/// description = "a lanky courier with a shaved head"
/// stylePrompt = "ink wash"
///
/// [[scenes]]
/// sceneNumber = 1
/// description = "the handoff"
/// characters = ["Mara"]
/// setting = "a flooded arcade"
/// mood = "tense"
/// action = "Mara passes a sealed envelope"
/// ```
///
/// Scripts may also be written as JSON with the same camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Builder)]
#[serde(rename_all = "camelCase")]
#[builder(setter(into))]
pub struct Script {
    /// Human readable title
    title: String,
    /// Style directive applied to every prompt
    #[serde(default)]
    #[builder(default)]
    art_style: String,
    /// Characters in declaration order
    #[serde(default)]
    #[builder(default)]
    characters: Vec<Character>,
    /// Scenes in declaration order
    #[serde(default)]
    #[builder(default)]
    scenes: Vec<Scene>,
}

impl Script {
    /// Loads a script from a file, choosing JSON for `.json` files and TOML otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The document does not parse
    /// - Validation fails (empty title, duplicate or empty names, names sharing a file name, ...)
    #[tracing::instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ScriptError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            ScriptError::new(ScriptErrorKind::FileRead(format!("{}: {}", path.display(), e)))
        })?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let script = if is_json {
            Self::from_json_str(&content)?
        } else {
            content.parse()?
        };

        tracing::debug!(
            title = %script.title,
            characters = script.characters.len(),
            scenes = script.scenes.len(),
            "Loaded script"
        );
        Ok(script)
    }

    /// Parses and validates a JSON script document.
    pub fn from_json_str(content: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_json::from_str(content)
            .map_err(|e| ScriptError::new(ScriptErrorKind::JsonParse(e.to_string())))?;
        script.validate()?;
        Ok(script)
    }

    /// Checks structural invariants.
    ///
    /// Character names must be unique both as written and after
    /// [`sanitize_name`], since the sanitised form keys every output file.
    ///
    /// Unknown character names inside scenes are deliberately not checked here;
    /// see [`Script::unknown_references`].
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.title.trim().is_empty() {
            return Err(ScriptError::new(ScriptErrorKind::EmptyTitle));
        }

        let mut seen = HashSet::new();
        let mut file_names: HashMap<String, &str> = HashMap::new();
        for (index, character) in self.characters.iter().enumerate() {
            let name = character.name().trim();
            if name.is_empty() {
                return Err(ScriptError::new(ScriptErrorKind::EmptyCharacterName(index)));
            }
            if !seen.insert(name.to_string()) {
                return Err(ScriptError::new(ScriptErrorKind::DuplicateCharacter(
                    name.to_string(),
                )));
            }
            let file_name = sanitize_name(name);
            if let Some(earlier) = file_names.insert(file_name.clone(), name) {
                return Err(ScriptError::new(ScriptErrorKind::FileNameCollision(
                    earlier.to_string(),
                    name.to_string(),
                    file_name,
                )));
            }
            if character.description().trim().is_empty() {
                return Err(ScriptError::new(
                    ScriptErrorKind::EmptyCharacterDescription(name.to_string()),
                ));
            }
        }

        for scene in &self.scenes {
            if scene.description().trim().is_empty() {
                return Err(ScriptError::new(ScriptErrorKind::EmptySceneDescription(
                    *scene.scene_number(),
                )));
            }
        }

        Ok(())
    }

    /// Looks up a declared character by name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| c.name() == name)
    }

    /// Scene references to characters that are not declared.
    pub fn unknown_references(&self) -> Vec<UnknownReference> {
        self.scenes
            .iter()
            .flat_map(|scene| {
                scene
                    .characters()
                    .iter()
                    .filter(|name| self.character(name).is_none())
                    .map(|name| UnknownReference {
                        scene_number: *scene.scene_number(),
                        name: name.clone(),
                    })
            })
            .collect()
    }

    /// Total number of items the pipeline will attempt.
    pub fn item_count(&self) -> usize {
        self.characters.len() + self.scenes.len()
    }
}

impl FromStr for Script {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let script: Self = toml::from_str(s)
            .map_err(|e| ScriptError::new(ScriptErrorKind::TomlParse(e.to_string())))?;
        script.validate()?;
        Ok(script)
    }
}
