//! Field configuration persistence
//!
//! Stores user preferences in `~/.config/chipfield/config.yaml`

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::contact::Contact;

/// How the session cleans up pending input before it becomes a token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SanitizeMode {
    /// Use the raw input
    None,
    /// Strip surrounding whitespace
    #[default]
    Trim,
    /// Strip surrounding whitespace and lowercase
    TrimLowercase,
}

impl SanitizeMode {
    /// Apply the mode. `None` means "use the raw input".
    pub fn apply(self, input: &str) -> Option<String> {
        match self {
            SanitizeMode::None => None,
            SanitizeMode::Trim => Some(input.trim().to_string()),
            SanitizeMode::TrimLowercase => Some(input.trim().to_lowercase()),
        }
    }
}

/// Field configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Fixed header stamped before the tokens
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Selected theme id (e.g., "default-light", "default-dark")
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Candidates offered by the match list
    #[serde(default)]
    pub contacts: Vec<Contact>,

    #[serde(default)]
    pub sanitize: SanitizeMode,
}

fn default_prefix() -> String {
    "To:".to_string()
}

fn default_theme() -> String {
    "default-light".to_string()
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            theme: default_theme(),
            contacts: Vec::new(),
            sanitize: SanitizeMode::default(),
        }
    }
}

impl FieldConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load config from a specific file, or return defaults if it is missing
    /// or unreadable
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::config_file()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    /// Save config to a specific file
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }
}
