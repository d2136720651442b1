//! TOML Configuration File Support
//!
//! Loads the navigator configuration from `~/.config/ui-navigator/navigator.toml`.
//!
//! # Configuration Priority
//!
//! Configuration values are loaded with the following priority (highest first):
//! 1. CLI arguments (via [`ConfigOverrides`])
//! 2. Environment variables
//! 3. TOML configuration file
//! 4. Default values
//!
//! # Example Configuration
//!
//! ```toml
//! [navigator]
//! default_view = "menu"
//! history_limit = 32
//!
//! [[elements]]
//! id = "menu"
//! layer = "screen"
//!
//! [[elements]]
//! id = "hud"
//! layer = "hud"
//! persistent = true
//! order = 10
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::element::{ElementId, Layer, UiElement};

// =============================================================================
// Error Types
// =============================================================================

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file at {path}: {source}")]
    ReadError {
        /// The path that was attempted
        path: PathBuf,
        /// The underlying IO error
        source: std::io::Error,
    },

    /// Failed to parse TOML
    #[error("Failed to parse TOML config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

// =============================================================================
// Configuration Source Tracking
// =============================================================================

/// Tracks where a configuration value came from
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Value from command-line argument
    Cli,
    /// Value from environment variable
    Env,
    /// Value from TOML configuration file
    File,
    /// Default value
    Default,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Cli => write!(f, "CLI"),
            Self::Env => write!(f, "environment"),
            Self::File => write!(f, "config file"),
            Self::Default => write!(f, "default"),
        }
    }
}

// =============================================================================
// TOML Configuration Structures
// =============================================================================

/// `[navigator]` section of the TOML configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorToml {
    /// Screen shown after initialization and when `go_back` runs out of history
    pub default_view: Option<String>,

    /// Maximum history depth (0 = unlimited)
    pub history_limit: Option<usize>,
}

/// One `[[elements]]` entry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementToml {
    /// Element identity
    pub id: String,

    /// Layer name (hud, screen, panel, overlay, debug)
    pub layer: Layer,

    /// Exempt from eviction and replacement hiding
    #[serde(default)]
    pub persistent: bool,

    /// Ordering key within the layer
    #[serde(default)]
    pub order: i32,
}

impl ElementToml {
    /// Build a hook-less element from this declaration
    #[must_use]
    pub fn to_element(&self) -> UiElement {
        UiElement::new(self.id.as_str(), self.layer)
            .persistent(self.persistent)
            .with_sort_order(self.order)
    }
}

/// Top-level TOML configuration structure
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfigToml {
    /// Navigator section
    pub navigator: NavigatorToml,

    /// Declared elements, in registration order
    pub elements: Vec<ElementToml>,
}

// =============================================================================
// Runtime Configuration
// =============================================================================

/// Runtime settings for a [`UiNavigator`](crate::navigator::UiNavigator)
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigatorConfig {
    /// Maximum history depth (0 = unlimited)
    pub history_limit: usize,
}

impl NavigatorConfig {
    /// Set the history limit
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self
    }
}

/// Configuration consolidated from file, environment and CLI
#[derive(Clone, Debug)]
pub struct NavigatorConfigFile {
    /// Runtime settings
    pub navigator: NavigatorConfig,

    /// Default primary view
    pub default_view: Option<ElementId>,

    /// Declared elements, in registration order
    pub elements: Vec<ElementToml>,

    /// Path to the config file that was loaded (if any)
    pub config_file_path: Option<PathBuf>,

    /// Source of configuration values
    source: ConfigSource,
}

impl Default for NavigatorConfigFile {
    fn default() -> Self {
        Self {
            navigator: NavigatorConfig::default(),
            default_view: None,
            elements: Vec::new(),
            config_file_path: None,
            source: ConfigSource::Default,
        }
    }
}

impl NavigatorConfigFile {
    /// Create a new configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the primary source of this configuration
    #[must_use]
    pub fn source(&self) -> ConfigSource {
        self.source
    }

    /// Set the configuration source
    pub fn set_source(&mut self, source: ConfigSource) {
        self.source = source;
    }

    /// Build the declared elements
    #[must_use]
    pub fn build_elements(&self) -> Vec<UiElement> {
        self.elements.iter().map(ElementToml::to_element).collect()
    }

    /// Check the declarations for consistency
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for empty or duplicate ids,
    /// or a default view that is not a declared screen.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for element in &self.elements {
            if element.id.trim().is_empty() {
                return Err(ConfigError::ValidationError(
                    "element id must not be empty".to_string(),
                ));
            }
            if !seen.insert(element.id.as_str()) {
                return Err(ConfigError::ValidationError(format!(
                    "element '{}' is declared more than once",
                    element.id
                )));
            }
        }

        if let Some(default_view) = &self.default_view {
            if !self.elements.is_empty() {
                match self.elements.iter().find(|e| e.id == default_view.as_str()) {
                    Some(e) if e.layer.is_primary() => {}
                    Some(e) => {
                        return Err(ConfigError::ValidationError(format!(
                            "default view '{default_view}' is on the {} layer, expected screen",
                            e.layer
                        )));
                    }
                    None => {
                        return Err(ConfigError::ValidationError(format!(
                            "default view '{default_view}' is not a declared element"
                        )));
                    }
                }
            }
        }

        Ok(())
    }
}

// =============================================================================
// Configuration Loading
// =============================================================================

/// Get the default configuration file path
///
/// Returns `$XDG_CONFIG_HOME/ui-navigator/navigator.toml` or
/// `~/.config/ui-navigator/navigator.toml` if `XDG_CONFIG_HOME` is not set.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("ui-navigator").join("navigator.toml"))
}

/// Load configuration from all sources with proper priority
///
/// # Errors
///
/// Returns an error if the config file exists but cannot be parsed or fails
/// validation. A missing config file is not an error (defaults are used).
pub fn load_config() -> Result<NavigatorConfigFile, ConfigError> {
    load_config_from_path(default_config_path())
}

/// Load configuration from a specific path
///
/// # Errors
///
/// Returns an error if the specified config file cannot be read, parsed or
/// validated.
pub fn load_config_from_path(path: Option<PathBuf>) -> Result<NavigatorConfigFile, ConfigError> {
    let mut config = NavigatorConfigFile::default();

    if let Some(ref config_path) = path {
        if config_path.exists() {
            let toml_content =
                std::fs::read_to_string(config_path).map_err(|e| ConfigError::ReadError {
                    path: config_path.clone(),
                    source: e,
                })?;

            let toml_config: NavigatorConfigToml = toml::from_str(&toml_content)?;
            apply_toml_config(&mut config, toml_config);
            config.config_file_path = Some(config_path.clone());
            config.source = ConfigSource::File;

            tracing::info!(
                path = %config_path.display(),
                elements = config.elements.len(),
                "Loaded configuration from file"
            );
        } else {
            tracing::debug!(
                path = %config_path.display(),
                "Config file not found, using defaults"
            );
        }
    }

    apply_env_config(&mut config);
    config.validate()?;

    Ok(config)
}

/// Parse configuration from a TOML string (no environment overrides)
///
/// # Errors
///
/// Returns an error if the TOML is malformed or fails validation.
pub fn parse_config(toml_content: &str) -> Result<NavigatorConfigFile, ConfigError> {
    let mut config = NavigatorConfigFile::default();
    let toml_config: NavigatorConfigToml = toml::from_str(toml_content)?;
    apply_toml_config(&mut config, toml_config);
    config.source = ConfigSource::File;
    config.validate()?;
    Ok(config)
}

/// Apply TOML configuration values to the config struct
fn apply_toml_config(config: &mut NavigatorConfigFile, toml: NavigatorConfigToml) {
    if let Some(view) = toml.navigator.default_view {
        config.default_view = Some(ElementId::new(view));
    }
    if let Some(limit) = toml.navigator.history_limit {
        config.navigator.history_limit = limit;
    }
    config.elements = toml.elements;
}

/// Apply environment variable overrides to the config
fn apply_env_config(config: &mut NavigatorConfigFile) {
    if let Ok(view) = std::env::var("NAVIGATOR_DEFAULT_VIEW") {
        config.default_view = Some(ElementId::new(view));
        config.source = ConfigSource::Env;
    }
    if let Ok(limit) = std::env::var("NAVIGATOR_HISTORY_LIMIT") {
        if let Ok(n) = limit.parse::<usize>() {
            config.navigator.history_limit = n;
            config.source = ConfigSource::Env;
        } else {
            tracing::warn!(value = %limit, "Ignoring invalid NAVIGATOR_HISTORY_LIMIT");
        }
    }
}

// =============================================================================
// CLI Override Support
// =============================================================================

/// Builder for applying CLI overrides to configuration
///
/// Use this after [`load_config`] to apply command-line argument overrides.
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    /// Default view override
    pub default_view: Option<String>,

    /// History limit override
    pub history_limit: Option<usize>,
}

impl ConfigOverrides {
    /// Create a new empty set of overrides
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set default view override
    #[must_use]
    pub fn with_default_view(mut self, view: impl Into<String>) -> Self {
        self.default_view = Some(view.into());
        self
    }

    /// Set history limit override
    #[must_use]
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit);
        self
    }

    /// Whether any override is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.default_view.is_none() && self.history_limit.is_none()
    }

    /// Apply the overrides and re-validate
    ///
    /// # Errors
    ///
    /// Returns an error if the overridden configuration is inconsistent.
    pub fn apply(self, config: &mut NavigatorConfigFile) -> Result<(), ConfigError> {
        if self.is_empty() {
            return Ok(());
        }
        if let Some(view) = self.default_view {
            config.default_view = Some(ElementId::new(view));
        }
        if let Some(limit) = self.history_limit {
            config.navigator.history_limit = limit;
        }
        config.source = ConfigSource::Cli;
        config.validate()
    }
}
