//! Settings for the formsmith service.
//!
//! This module provides the [`Settings`] struct holding all service
//! configuration, a TOML loader, and [`SETTINGS`], a globally-accessible,
//! lazily-initialized settings instance.

use std::path::Path;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::FormsmithError;

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// The SQLite database file path, or `:memory:` for an in-memory store.
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "formsmith.sqlite3".to_string(),
        }
    }
}

/// The complete set of service settings.
///
/// # Examples
///
/// ```
/// use formsmith_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.bind_addr, "127.0.0.1:8000");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled.
    pub debug: bool,
    /// The secret key used for signing actor tokens.
    pub secret_key: String,
    /// The address the HTTP server binds to.
    pub bind_addr: String,
    /// The public base URL used when formatting share links
    /// (e.g. `https://forms.example.com`).
    pub public_base_url: String,

    // ── Database ─────────────────────────────────────────────────────

    /// Database configuration.
    pub database: DatabaseSettings,

    // ── Logging ──────────────────────────────────────────────────────

    /// The log level filter (e.g. "info", "debug", "formsmith_http=trace").
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            secret_key: String::new(),
            bind_addr: "127.0.0.1:8000".to_string(),
            public_base_url: "http://127.0.0.1:8000".to_string(),
            database: DatabaseSettings::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// Loads settings from a TOML string.
    ///
    /// Fields not present in the TOML keep their default values.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or cannot be deserialized.
    pub fn from_toml_str(toml_str: &str) -> Result<Self, FormsmithError> {
        toml::from_str(toml_str).map_err(|e| {
            FormsmithError::ConfigurationError(format!("Failed to parse settings TOML: {e}"))
        })
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, FormsmithError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            FormsmithError::ConfigurationError(format!(
                "Failed to read settings file '{}': {e}",
                path.as_ref().display()
            ))
        })?;
        Self::from_toml_str(&content)
    }
}

/// A lazily-initialized, globally-accessible settings container.
///
/// Call [`configure`](LazySettings::configure) once at startup, then use
/// [`get`](LazySettings::get) anywhere settings are needed.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

impl LazySettings {
    /// Creates a new, unconfigured `LazySettings`.
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Configures the global settings.
    ///
    /// # Errors
    ///
    /// Returns an error if settings have already been configured.
    pub fn configure(&self, settings: Settings) -> Result<(), FormsmithError> {
        self.inner.set(settings).map_err(|_| {
            FormsmithError::ConfigurationError("Settings already configured".to_string())
        })
    }

    /// Returns the configured settings, or defaults if never configured.
    pub fn get(&self) -> &Settings {
        self.inner.get_or_init(Settings::default)
    }
}

/// The global settings instance.
pub static SETTINGS: LazySettings = LazySettings::new();

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert!(settings.debug);
        assert!(settings.secret_key.is_empty());
        assert_eq!(settings.database.path, "formsmith.sqlite3");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_partial() {
        let settings = Settings::from_toml_str(
            r#"
            debug = false
            secret_key = "s3cret"

            [database]
            path = ":memory:"
            "#,
        )
        .unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.secret_key, "s3cret");
        assert_eq!(settings.database.path, ":memory:");
        // Unspecified fields keep defaults
        assert_eq!(settings.bind_addr, "127.0.0.1:8000");
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = Settings::from_toml_str("debug = maybe");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = Settings::from_toml_file("/nonexistent/formsmith.toml");
        assert!(matches!(
            result,
            Err(FormsmithError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_lazy_settings_defaults() {
        let lazy = LazySettings::new();
        assert!(lazy.get().debug);
    }

    #[test]
    fn test_lazy_settings_configure_twice() {
        let lazy = LazySettings::new();
        lazy.configure(Settings::default()).unwrap();
        assert!(lazy.configure(Settings::default()).is_err());
    }
}
