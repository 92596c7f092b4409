//! Configuration structures for the pipeline.
//!
//! The configuration system supports:
//! - Bundled defaults (include_str! from tableau.toml)
//! - User overrides (~/.config/tableau/tableau.toml or ./tableau.toml)
//! - An explicit file passed by the caller, taking precedence over everything

use config::{Config, ConfigBuilder, File, FileFormat, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tableau_error::{ConfigError, TableauError, TableauResult};
use tracing::{debug, instrument};

/// Pause and throughput limits between backend submissions.
///
/// ```toml
/// [pacing]
/// delay_ms = 5000
/// requests_per_minute = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Fixed delay applied after every item, in milliseconds
    pub delay_ms: u64,

    /// Optional ceiling on submissions per minute
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requests_per_minute: Option<u32>,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            delay_ms: 5000,
            requests_per_minute: None,
        }
    }
}

/// Retry behaviour for a single backend call.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: u32,

    /// Pause between attempts, in milliseconds
    pub delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay_ms: 10_000,
        }
    }
}

/// Which variation becomes the canonical artifact.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// Zero-based variation index
    pub index: usize,

    /// Upscale the selected variation before persisting it
    pub upscale: bool,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            index: 0,
            upscale: true,
        }
    }
}

/// Optional overrides of the prompt vocabulary.
///
/// All fields are optional - only specified fields replace the built-in values.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PromptConfig {
    /// Quality boilerplate leading every prompt
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,

    /// Reference-sheet directive for character prompts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_directive: Option<String>,

    /// Lighting/composition directive for scene prompts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_directive: Option<String>,

    /// Aspect ratio of character sheets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub character_aspect: Option<String>,

    /// Aspect ratio of scenes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_aspect: Option<String>,

    /// Backend model version
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Whether to request the raw style
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style_raw: Option<bool>,

    /// Weight given to the first referenced character
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_weight: Option<u32>,
}

/// Where the backend lives and how patiently to poll it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Base URL of the generation service
    pub base_url: String,

    /// Interval between task status polls, in milliseconds
    pub poll_interval_ms: u64,

    /// Give up on a task after this many seconds
    pub poll_timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            poll_interval_ms: 3000,
            poll_timeout_secs: 600,
        }
    }
}

/// Where artifacts are written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root output directory
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("output"),
        }
    }
}

/// Root configuration structure.
///
/// # Example
///
/// ```toml
/// [pacing]
/// delay_ms = 5000
///
/// [selection]
/// index = 0
/// upscale = true
///
/// [backend]
/// base_url = "http://127.0.0.1:8080"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct TableauConfig {
    /// Submission pacing
    pub pacing: PacingConfig,
    /// Per-call retries
    pub retry: RetryConfig,
    /// Canonical variation selection
    pub selection: SelectionConfig,
    /// Prompt vocabulary overrides
    pub prompt: PromptConfig,
    /// Backend location and polling
    pub backend: BackendConfig,
    /// Output location
    pub output: OutputConfig,
}

impl TableauConfig {
    /// Load configuration from a single TOML file, ignoring bundled defaults
    /// for fields the file sets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> TableauResult<Self> {
        debug!("Loading configuration from file");

        Self::finish(Config::builder().add_source(File::from(path.as_ref())))
    }

    /// Load configuration with precedence: user override > bundled default.
    ///
    /// Configuration sources in order of precedence (later sources override earlier):
    /// 1. Bundled defaults (tableau.toml shipped with the library)
    /// 2. User config in home directory (~/.config/tableau/tableau.toml)
    /// 3. User config in current directory (./tableau.toml)
    ///
    /// User config files are optional and will be silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use tableau_rate_limit::TableauConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = TableauConfig::load()?;
    /// println!("pausing {} ms between items", config.pacing.delay_ms);
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> TableauResult<Self> {
        Self::load_with_override(None)
    }

    /// Same as [`TableauConfig::load`], with an explicit file layered on top.
    ///
    /// Unlike the implicit user files, an explicit file must exist.
    #[instrument]
    pub fn load_with_override(explicit: Option<&Path>) -> TableauResult<Self> {
        debug!("Loading configuration with precedence: explicit > current dir > home dir > bundled defaults");

        let mut builder = Self::layered_builder();

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path));
        }

        Self::finish(builder)
    }

    fn layered_builder() -> ConfigBuilder<DefaultState> {
        // Bundled default configuration
        const DEFAULT_CONFIG: &str = include_str!("../../../tableau.toml");

        let mut builder = Config::builder()
            // Start with bundled defaults
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        // Add user config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/tableau/tableau.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // Add user config from current directory (optional)
        builder.add_source(File::with_name("tableau").required(false))
    }

    fn finish(builder: ConfigBuilder<DefaultState>) -> TableauResult<Self> {
        builder
            .build()
            .map_err(|e| {
                TableauError::from(ConfigError::new(format!(
                    "Failed to build configuration: {}",
                    e
                )))
            })?
            .try_deserialize()
            .map_err(|e| {
                TableauError::from(ConfigError::new(format!(
                    "Failed to parse configuration: {}",
                    e
                )))
            })
    }
}
