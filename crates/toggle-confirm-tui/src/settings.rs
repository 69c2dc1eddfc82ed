// Settings loading and parsing (config/toggles.toml).

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use toggle_confirm_core::{ClassOverrides, ConfigError, ToggleConfig};
use tracing::info;

/// File name of the toggle list, inside both `config/` and `defaults/`.
pub const SETTINGS_FILE: &str = "toggles.toml";

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// toggles.toml structs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(rename = "toggle", default)]
    pub toggles: Vec<ToggleEntry>,
    /// Dialog class overrides shared by every toggle.
    #[serde(default)]
    pub classes: ClassOverrides,
}

/// One `[[toggle]]` entry: a label, its starting value, and the
/// confirmation keys (`confirmText`, `confirmOnText`, ...) inline.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleEntry {
    pub label: String,
    #[serde(default)]
    pub initial: bool,
    #[serde(flatten)]
    pub confirm: ToggleConfig,
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate `config/toggles.toml` relative to `base_dir`.
///
/// Does not copy defaults. Prefer `load_settings()` for the binary.
pub fn load_settings_from(base_dir: &Path) -> Result<Settings, SettingsError> {
    let path = base_dir.join("config").join(SETTINGS_FILE);
    let text = std::fs::read_to_string(&path).map_err(|_| SettingsError::FileNotFound {
        path: path.clone(),
    })?;
    parse_settings(&text, &path)
}

/// Parse and validate settings text. `path` is only used in error messages.
pub fn parse_settings(text: &str, path: &Path) -> Result<Settings, SettingsError> {
    let settings: Settings = toml::from_str(text).map_err(|e| SettingsError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;
    validate(&settings)?;
    Ok(settings)
}

/// Seed `config/toggles.toml` from `defaults/` when it does not exist yet.
///
/// An existing settings file is never touched. Returns the path written, if
/// any.
pub fn ensure_settings_file(base_dir: &Path) -> Result<Option<PathBuf>, SettingsError> {
    let target = base_dir.join("config").join(SETTINGS_FILE);
    if target.exists() {
        return Ok(None);
    }
    let source = base_dir.join("defaults").join(SETTINGS_FILE);
    let copy_error = |message: String| SettingsError::DefaultsCopyError { message };

    let mut defaults = std::fs::File::open(&source)
        .map_err(|e| copy_error(format!("no settings to seed from {}: {e}", source.display())))?;
    if let Some(config_dir) = target.parent() {
        std::fs::create_dir_all(config_dir)
            .map_err(|e| copy_error(format!("failed to create {}: {e}", config_dir.display())))?;
    }

    let mut dest = match std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&target)
    {
        Ok(dest) => dest,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => return Ok(None),
        Err(e) => return Err(copy_error(format!("failed to create {}: {e}", target.display()))),
    };
    std::io::copy(&mut defaults, &mut dest)
        .map_err(|e| copy_error(format!("failed to write {}: {e}", target.display())))?;

    info!("Seeded {} from defaults", target.display());
    Ok(Some(target))
}

/// Copy defaults if needed, then load settings relative to `base_dir`.
pub fn load_settings(base_dir: &Path) -> Result<Settings, SettingsError> {
    ensure_settings_file(base_dir)?;
    load_settings_from(base_dir)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(settings: &Settings) -> Result<(), SettingsError> {
    if settings.toggles.is_empty() {
        return Err(SettingsError::ValidationError {
            field: "toggle".into(),
            message: "at least one toggle must be configured".into(),
        });
    }

    for (i, entry) in settings.toggles.iter().enumerate() {
        if entry.label.trim().is_empty() {
            return Err(SettingsError::ValidationError {
                field: format!("toggle[{i}].label"),
                message: "must not be empty".into(),
            });
        }
        entry.confirm.validate().map_err(|e| match e {
            ConfigError::Validation { field, message } => SettingsError::ValidationError {
                field: format!("toggle[{i}].{field}"),
                message,
            },
            other => SettingsError::ValidationError {
                field: format!("toggle[{i}]"),
                message: other.to_string(),
            },
        })?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn crate_root() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
    }

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "toggle-confirm-{name}-{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn parse(text: &str) -> Result<Settings, SettingsError> {
        parse_settings(text, Path::new("test.toml"))
    }

    #[test]
    fn default_settings_are_valid() {
        let path = crate_root().join("defaults").join(SETTINGS_FILE);
        let text = fs::read_to_string(&path).expect("defaults/toggles.toml should exist");
        let settings = parse_settings(&text, &path).expect("defaults should load");
        assert!(settings.toggles.len() >= 3);
        assert!(settings.toggles.iter().any(|t| !t.confirm.is_enabled()));
        assert!(settings.toggles.iter().any(|t| t.confirm.is_enabled()));
    }

    #[test]
    fn parse_inline_confirm_keys() {
        let settings = parse(
            r#"
            [[toggle]]
            label = "Airplane mode"
            confirmText = "Proceed?"
            confirmOffTitle = "Disable"

            [[toggle]]
            label = "Wi-Fi"
            initial = true

            [classes]
            merge = false
            confirm = "btn"
            "#,
        )
        .unwrap();

        assert_eq!(settings.toggles.len(), 2);
        let first = &settings.toggles[0];
        assert_eq!(first.label, "Airplane mode");
        assert!(!first.initial);
        assert_eq!(first.confirm.confirm_text(), Some("Proceed?"));
        assert_eq!(first.confirm.confirm_off_title(), Some("Disable"));
        assert_eq!(first.confirm.confirm_label, "Confirm");
        assert!(settings.toggles[1].initial);
        assert!(!settings.toggles[1].confirm.is_enabled());
        assert!(!settings.classes.merge);
        assert_eq!(settings.classes.resolve().get("confirm"), ["btn"]);
    }

    #[test]
    fn empty_toggle_list_rejected() {
        let err = parse("").unwrap_err();
        assert!(matches!(err, SettingsError::ValidationError { ref field, .. } if field == "toggle"));
    }

    #[test]
    fn blank_label_rejected() {
        let err = parse("[[toggle]]\nlabel = \" \"\n").unwrap_err();
        assert!(
            matches!(err, SettingsError::ValidationError { ref field, .. } if field == "toggle[0].label")
        );
    }

    #[test]
    fn blank_confirm_label_rejected_with_index() {
        let err = parse(
            "[[toggle]]\nlabel = \"a\"\n[[toggle]]\nlabel = \"b\"\nconfirmLabel = \"\"\n",
        )
        .unwrap_err();
        assert!(
            matches!(err, SettingsError::ValidationError { ref field, .. } if field == "toggle[1].confirmLabel"),
            "got {err}"
        );
    }

    #[test]
    fn invalid_toml_reports_path() {
        let err = parse("[[toggle]\n").unwrap_err();
        match err {
            SettingsError::ParseError { path, .. } => assert_eq!(path, Path::new("test.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_not_found() {
        let dir = scratch_dir("missing");
        let err = load_settings_from(&dir).unwrap_err();
        assert!(matches!(err, SettingsError::FileNotFound { .. }));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ensure_copies_defaults_once() {
        let dir = scratch_dir("ensure");
        fs::create_dir_all(dir.join("defaults")).unwrap();
        fs::write(
            dir.join("defaults").join(SETTINGS_FILE),
            "[[toggle]]\nlabel = \"x\"\n",
        )
        .unwrap();

        let copied = ensure_settings_file(&dir).unwrap();
        assert_eq!(copied, Some(dir.join("config").join(SETTINGS_FILE)));

        // A user edit survives the next run.
        fs::write(
            dir.join("config").join(SETTINGS_FILE),
            "[[toggle]]\nlabel = \"edited\"\n",
        )
        .unwrap();
        assert_eq!(ensure_settings_file(&dir).unwrap(), None);

        let settings = load_settings(&dir).unwrap();
        assert_eq!(settings.toggles[0].label, "edited");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ensure_only_seeds_the_settings_file() {
        let dir = scratch_dir("seed-only");
        fs::create_dir_all(dir.join("defaults")).unwrap();
        fs::write(dir.join("defaults").join(SETTINGS_FILE), "[[toggle]]\nlabel = \"x\"\n").unwrap();
        fs::write(dir.join("defaults").join("notes.txt"), "scratch").unwrap();

        ensure_settings_file(&dir).unwrap();
        assert!(dir.join("config").join(SETTINGS_FILE).is_file());
        assert!(!dir.join("config").join("notes.txt").exists());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ensure_with_existing_config_needs_no_defaults() {
        let dir = scratch_dir("config-only");
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(dir.join("config").join(SETTINGS_FILE), "[[toggle]]\nlabel = \"y\"\n").unwrap();
        assert_eq!(ensure_settings_file(&dir).unwrap(), None);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn ensure_without_any_directory_fails() {
        let dir = scratch_dir("empty");
        let err = ensure_settings_file(&dir).unwrap_err();
        assert!(matches!(err, SettingsError::DefaultsCopyError { .. }));
        let _ = fs::remove_dir_all(&dir);
    }
}
