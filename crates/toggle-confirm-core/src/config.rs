// Toggle confirmation configuration (texts, titles, button labels).

use serde::Deserialize;
use thiserror::Error;

/// Label shown on the dialog's accept button when none is configured.
pub const DEFAULT_CONFIRM_LABEL: &str = "Confirm";
/// Label shown on the dialog's reject button when none is configured.
pub const DEFAULT_CANCEL_LABEL: &str = "Cancel";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse toggle config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("validation error for field `{field}`: {message}")]
    Validation { field: String, message: String },
}

// ---------------------------------------------------------------------------
// ToggleConfig
// ---------------------------------------------------------------------------

/// Static confirmation settings for a single toggle.
///
/// Constructed once when the toggle is mounted and never mutated afterwards.
/// Empty strings are treated exactly like absent values. Keys use the
/// camelCase names of the declarative surface (`confirmOnText`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleConfig {
    /// Generic confirmation text, used for either direction.
    #[serde(default)]
    pub confirm_text: Option<String>,
    /// Text for the off -> on transition.
    #[serde(default)]
    pub confirm_on_text: Option<String>,
    /// Text for the on -> off transition.
    #[serde(default)]
    pub confirm_off_text: Option<String>,
    #[serde(default)]
    pub confirm_title: Option<String>,
    #[serde(default)]
    pub confirm_on_title: Option<String>,
    #[serde(default)]
    pub confirm_off_title: Option<String>,
    #[serde(default = "default_confirm_label")]
    pub confirm_label: String,
    #[serde(default = "default_cancel_label")]
    pub cancel_label: String,
}

fn default_confirm_label() -> String {
    DEFAULT_CONFIRM_LABEL.to_string()
}

fn default_cancel_label() -> String {
    DEFAULT_CANCEL_LABEL.to_string()
}

impl Default for ToggleConfig {
    fn default() -> Self {
        ToggleConfig {
            confirm_text: None,
            confirm_on_text: None,
            confirm_off_text: None,
            confirm_title: None,
            confirm_on_title: None,
            confirm_off_title: None,
            confirm_label: default_confirm_label(),
            cancel_label: default_cancel_label(),
        }
    }
}

impl ToggleConfig {
    /// Parse and validate a config from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: ToggleConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Whether any of the three content fields is set. When none is, the
    /// toggle behaves exactly like an unconfirmed one.
    pub fn is_enabled(&self) -> bool {
        non_empty(&self.confirm_text).is_some()
            || non_empty(&self.confirm_on_text).is_some()
            || non_empty(&self.confirm_off_text).is_some()
    }

    pub fn confirm_text(&self) -> Option<&str> {
        non_empty(&self.confirm_text)
    }

    pub fn confirm_on_text(&self) -> Option<&str> {
        non_empty(&self.confirm_on_text)
    }

    pub fn confirm_off_text(&self) -> Option<&str> {
        non_empty(&self.confirm_off_text)
    }

    pub fn confirm_title(&self) -> Option<&str> {
        non_empty(&self.confirm_title)
    }

    pub fn confirm_on_title(&self) -> Option<&str> {
        non_empty(&self.confirm_on_title)
    }

    pub fn confirm_off_title(&self) -> Option<&str> {
        non_empty(&self.confirm_off_title)
    }

    /// Check the button labels. Both must contain visible text.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let labels: &[(&str, &str)] = &[
            ("confirmLabel", &self.confirm_label),
            ("cancelLabel", &self.cancel_label),
        ];
        for (field, label) in labels {
            if label.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "must not be empty".into(),
                });
            }
        }
        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
