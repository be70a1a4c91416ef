//! Application configuration loaded from a TOML file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV: &str = "DIRED_CONFIG";

/// Top-level application configuration.
///
/// All fields have sensible defaults so the panel works without a config
/// file. Call [`Config::load`] to read from a TOML path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub log: LogConfig,
}

impl Config {
    /// Loads configuration from a TOML file at `path`.
    ///
    /// # Errors
    ///
    /// - [`CoreError::NotFound`] if the file does not exist.
    /// - [`CoreError::PermissionDenied`] if the file is not readable.
    /// - [`CoreError::ConfigParse`] if the TOML is malformed.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(e, path))?;
        toml::from_str(&content).map_err(|e| CoreError::ConfigParse(e.to_string()))
    }

    /// `$DIRED_CONFIG`, else `$HOME/.config/dired/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        std::env::var_os("HOME").map(|home| {
            PathBuf::from(home)
                .join(".config")
                .join("dired")
                .join("config.toml")
        })
    }

    /// Loads from `path`, falling back to defaults.
    ///
    /// A missing file is expected and silent; any other failure is returned
    /// alongside the defaults so the caller can log it once logging is up.
    pub fn load_or_default(path: Option<&Path>) -> (Self, Option<CoreError>) {
        let Some(path) = path else {
            return (Self::default(), None);
        };
        match Self::load(path) {
            Ok(config) => (config, None),
            Err(CoreError::NotFound(_)) => (Self::default(), None),
            Err(e) => (Self::default(), Some(e)),
        }
    }
}

/// Panel behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Upper bound for `..` navigation. `None` allows walking up to `/`.
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Restore the cursor row when re-entering a directory.
    #[serde(default = "default_true")]
    pub remember_cursor: bool,
    /// Ask before deleting from the keyboard.
    #[serde(default = "default_true")]
    pub confirm_delete: bool,
    /// Delete directories with their contents. When `false`, only empty
    /// directories can be deleted.
    #[serde(default = "default_true")]
    pub recursive_delete: bool,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            root: None,
            remember_cursor: true,
            confirm_delete: true,
            recursive_delete: true,
        }
    }
}

/// Log file settings. Logs never go to the terminal the panel draws on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_path")]
    pub path: PathBuf,
    /// A `tracing` level name: `error`, `warn`, `info`, `debug` or `trace`.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: default_log_path(),
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_path() -> PathBuf {
    PathBuf::from("/tmp/dired.log")
}

fn default_log_level() -> String {
    "debug".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn default_config_general() {
        let config = Config::default();

        assert!(config.general.root.is_none());
        assert!(config.general.remember_cursor);
        assert!(config.general.confirm_delete);
        assert!(config.general.recursive_delete);
    }

    #[test]
    fn default_config_log() {
        let config = Config::default();

        assert_eq!(config.log.path, PathBuf::from("/tmp/dired.log"));
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn load_full_toml() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[general]
root = "/srv/projects"
remember_cursor = false
confirm_delete = false
recursive_delete = false

[log]
path = "/var/log/dired.log"
level = "warn"
"#,
        )
        .unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.general.root, Some(PathBuf::from("/srv/projects")));
        assert!(!config.general.remember_cursor);
        assert!(!config.general.confirm_delete);
        assert!(!config.general.recursive_delete);
        assert_eq!(config.log.path, PathBuf::from("/var/log/dired.log"));
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn load_partial_toml_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general]\nconfirm_delete = false\n").unwrap();

        let config = Config::load(&path).unwrap();

        assert!(!config.general.confirm_delete);
        assert!(config.general.remember_cursor);
        assert!(config.general.recursive_delete);
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn load_empty_toml_uses_all_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();

        assert_eq!(config.general, GeneralConfig::default());
        assert_eq!(config.log, LogConfig::default());
    }

    #[test]
    fn load_nonexistent_returns_not_found() {
        let tmp = TempDir::new().unwrap();
        let result = Config::load(&tmp.path().join("nonexistent.toml"));
        assert!(matches!(result.unwrap_err(), CoreError::NotFound(_)));
    }

    #[test]
    fn load_invalid_toml_returns_config_parse() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "this is not valid [[[toml").unwrap();

        let result = Config::load(&path);
        assert!(matches!(result.unwrap_err(), CoreError::ConfigParse(_)));
    }

    #[test]
    fn load_or_default_is_silent_for_missing_file() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("none.toml");
        let (config, err) = Config::load_or_default(Some(&missing));
        assert!(err.is_none());
        assert_eq!(config.general, GeneralConfig::default());
    }

    #[test]
    fn load_or_default_reports_parse_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[general]\nroot = 42\n").unwrap();

        let (config, err) = Config::load_or_default(Some(&path));
        assert!(matches!(err, Some(CoreError::ConfigParse(_))));
        assert!(config.general.root.is_none());
    }
}
