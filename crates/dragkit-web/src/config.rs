#![forbid(unsafe_code)]

//! Host configuration.
//!
//! [`HostConfig`] selects the input vocabulary, the ownership arbitration
//! mode, and whether continuous events are coalesced. With the `config`
//! feature it loads from TOML or JSON:
//!
//! ```toml
//! vocabulary = "auto"
//! arbitration = "first-wins"
//! coalesce_continuous = true
//!
//! [capabilities]
//! pointer_events = true
//! ```
//!
//! ```rust,ignore
//! let config = HostConfig::from_toml_file("dragkit.toml")?;
//! let config = HostConfig::from_json_str(json)?;
//! ```

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use dragkit_core::{InputVocabulary, PlatformCapabilities};

use crate::arbiter::ArbitrationMode;

// ---------------------------------------------------------------------------
// HostConfig
// ---------------------------------------------------------------------------

/// Which event vocabulary recognizers listen with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(rename_all = "kebab-case"))]
pub enum VocabularyChoice {
    /// Detect from [`CapabilityConfig::pointer_events`].
    #[default]
    Auto,
    Pointer,
    MouseAndTouch,
}

/// Host platform capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct CapabilityConfig {
    /// The host exposes the pointer-events API.
    pub pointer_events: bool,
}

impl Default for CapabilityConfig {
    fn default() -> Self {
        Self {
            pointer_events: true,
        }
    }
}

impl From<CapabilityConfig> for PlatformCapabilities {
    fn from(caps: CapabilityConfig) -> Self {
        Self {
            pointer_events: caps.pointer_events,
        }
    }
}

/// Configuration for a [`WebDragHost`](crate::host::WebDragHost) and the
/// sessions it serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct HostConfig {
    pub vocabulary: VocabularyChoice,
    pub arbitration: ArbitrationMode,
    /// Hold and coalesce `dragmove` until the host flushes.
    pub coalesce_continuous: bool,
    pub capabilities: CapabilityConfig,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            vocabulary: VocabularyChoice::Auto,
            arbitration: ArbitrationMode::FirstWins,
            coalesce_continuous: true,
            capabilities: CapabilityConfig::default(),
        }
    }
}

impl HostConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, HostConfigError> {
        toml::from_str(s).map_err(HostConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, HostConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(HostConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, HostConfigError> {
        serde_json::from_str(s).map_err(HostConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HostConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(HostConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Check the configuration for contradictions.
    ///
    /// Returns a list of problems. An empty list means the config is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.vocabulary == VocabularyChoice::Pointer && !self.capabilities.pointer_events {
            errors.push(
                "vocabulary: \"pointer\" requires capabilities.pointer_events = true".to_string(),
            );
        }
        errors
    }

    /// Like [`validate`](Self::validate), as a `Result`.
    pub fn validated(self) -> Result<Self, HostConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(HostConfigError::Validation(errors))
        }
    }

    /// The vocabulary recognizers on this host listen with.
    #[must_use]
    pub fn resolve_vocabulary(&self) -> InputVocabulary {
        match self.vocabulary {
            VocabularyChoice::Auto => InputVocabulary::detect(self.capabilities.into()),
            VocabularyChoice::Pointer => InputVocabulary::Pointer,
            VocabularyChoice::MouseAndTouch => InputVocabulary::MouseAndTouch,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a host configuration.
#[derive(Debug)]
pub enum HostConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for HostConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for HostConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
