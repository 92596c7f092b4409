//! Script loading and validation errors.

/// Specific error conditions for script documents.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum ScriptErrorKind {
    /// Failed to read script file
    #[display("Failed to read script file: {}", _0)]
    FileRead(String),
    /// Failed to parse TOML content
    #[display("Failed to parse TOML: {}", _0)]
    TomlParse(String),
    /// Failed to parse JSON content
    #[display("Failed to parse JSON: {}", _0)]
    JsonParse(String),
    /// Script title is empty
    #[display("Script title cannot be empty")]
    EmptyTitle,
    /// A character was declared without a name
    #[display("Character #{} has an empty name", _0)]
    EmptyCharacterName(usize),
    /// Two characters share a name
    #[display("Character '{}' is declared more than once", _0)]
    DuplicateCharacter(String),
    /// Two character names map to the same output file name
    #[display("Characters '{}' and '{}' would share the file name '{}'", _0, _1, _2)]
    FileNameCollision(String, String, String),
    /// A character has no description
    #[display("Character '{}' has an empty description", _0)]
    EmptyCharacterDescription(String),
    /// A scene has no description
    #[display("Scene {} has an empty description", _0)]
    EmptySceneDescription(u32),
}

/// Error type for script operations.
///
/// # Examples
///
/// ```
/// use tableau_error::{ScriptError, ScriptErrorKind};
///
/// let err = ScriptError::new(ScriptErrorKind::DuplicateCharacter("Mara".to_string()));
/// assert!(format!("{}", err).contains("Mara"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Script Error: {} at line {} in {}", kind, line, file)]
pub struct ScriptError {
    /// The specific error condition
    pub kind: ScriptErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ScriptError {
    /// Create a new ScriptError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: ScriptErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
