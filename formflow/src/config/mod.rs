//! Configuration management for formflow
//!
//! Configuration is loaded from multiple sources with clear precedence:
//!
//! 1. Environment variables (highest priority, `FORMFLOW_` prefix, `__` between levels)
//! 2. A TOML file (`./formflow.toml` unless a path is given)
//! 3. Hardcoded defaults (fallback)
//!
//! # Example Configuration
//!
//! ```toml
//! # formflow.toml
//! [render]
//! renderer = "basic"
//! target = "html5"
//! element_suffix = "<br>"
//! label_class = "control-label"
//!
//! [security]
//! token_ttl_secs = 3600
//!
//! [messages]
//! required = "Please fill this in"
//! ```
//!
//! `FORMFLOW_RENDER__TARGET=html4` overrides the render target.

use std::path::Path;

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::Target;

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "formflow.toml";

/// Configuration loading failure
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or did not match the expected shape
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),
}

/// Renderer settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// Built-in renderer name (`basic` or `basichtml`)
    pub renderer: String,

    /// HTML flavour; `html4` downgrades HTML5-only input types to `text`
    pub target: Target,

    /// Markup placed before each labelled element
    pub element_prefix: String,

    /// Markup placed after each labelled element
    pub element_suffix: String,

    /// CSS class for `<label>` tags
    pub label_class: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            renderer: "basic".to_string(),
            target: Target::Html5,
            element_prefix: String::new(),
            element_suffix: "<br>".to_string(),
            label_class: String::new(),
        }
    }
}

/// Token settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecuritySettings {
    /// Seconds a form token stays valid
    pub token_ttl_secs: u64,
}

impl Default for SecuritySettings {
    fn default() -> Self {
        Self {
            token_ttl_secs: 86400, // 24 hours
        }
    }
}

/// User-facing messages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MessageSettings {
    /// Required element left empty
    pub required: String,

    /// Submitted form id does not match this form
    pub id_mismatch: String,

    /// Submitted token is missing, stale or wrong
    pub token_mismatch: String,

    /// Top-of-form notice when anything failed
    pub form_errors: String,

    /// Submitted value is not one of a set's members
    pub invalid_choice: String,
}

impl Default for MessageSettings {
    fn default() -> Self {
        Self {
            required: "* Requires your input".to_string(),
            id_mismatch: "<p>An unexpected error occured. Form id mismatch.</p>".to_string(),
            token_mismatch: "<p>An unexpected error occured. Token mismatch.</p>".to_string(),
            form_errors: "There was a problem with your form. Please correct any errors and try again."
                .to_string(),
            invalid_choice: "Please choose from the available options.".to_string(),
        }
    }
}

/// Complete formflow configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormsConfig {
    /// Renderer settings
    #[serde(default)]
    pub render: RenderSettings,

    /// Token settings
    #[serde(default)]
    pub security: SecuritySettings,

    /// User-facing messages
    #[serde(default)]
    pub messages: MessageSettings,
}

impl FormsConfig {
    /// Load from `./formflow.toml` (if present) and the environment
    ///
    /// # Errors
    ///
    /// Returns an error if a source holds values of the wrong shape.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(DEFAULT_CONFIG_FILE)
    }

    /// Load from a specific TOML file (if present) and the environment
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use formflow::config::FormsConfig;
    ///
    /// # fn example() -> anyhow::Result<()> {
    /// let config = FormsConfig::load_from("./config/forms.toml")?;
    /// # Ok(())
    /// # }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if a source holds values of the wrong shape.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::figment(path.as_ref()).extract().map_err(|e| ConfigError::from(Box::new(e)))
    }

    /// The layered provider behind [`load_from`](Self::load_from)
    #[must_use]
    pub fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("FORMFLOW_").split("__"))
    }
}
