//! Configuration resolution and loading.
//!
//! Resolution order: CLI argument → `BQ_CONFIG` → `BQ_CONFIG_DIR/quote.json`
//! → XDG config (`~/.config/blind-quote/quote.json`) → built-in defaults.

use bq_report::QuoteConfig;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Environment variable naming a config file.
pub const ENV_CONFIG_PATH: &str = "BQ_CONFIG";
/// Environment variable naming a config directory.
pub const ENV_CONFIG_DIR: &str = "BQ_CONFIG_DIR";
/// Config file name inside a config directory.
pub const CONFIG_FILENAME: &str = "quote.json";
/// Application name for XDG directories.
const APP_NAME: &str = "blind-quote";

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid JSON in config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error reading {path}: {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Semantic validation failed: {0}")]
    Invalid(String),
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConfigSource {
    CliArgument,
    Environment,
    XdgConfig,
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Loaded configuration with provenance.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: QuoteConfig,
    /// File the config was read from (None for built-in defaults).
    pub path: Option<PathBuf>,
    pub source: ConfigSource,
}

/// Resolve the config file path.
///
/// An explicit CLI path is returned even when it does not exist so that
/// loading reports it; every other candidate must exist to be chosen.
pub fn resolve_config_path(cli_path: Option<&Path>) -> (Option<PathBuf>, ConfigSource) {
    resolve_with(cli_path, |key| std::env::var(key).ok(), dirs::config_dir())
}

fn resolve_with(
    cli_path: Option<&Path>,
    lookup: impl Fn(&str) -> Option<String>,
    xdg_dir: Option<PathBuf>,
) -> (Option<PathBuf>, ConfigSource) {
    if let Some(path) = cli_path {
        return (Some(path.to_path_buf()), ConfigSource::CliArgument);
    }

    if let Some(path) = lookup(ENV_CONFIG_PATH).map(PathBuf::from) {
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(dir) = lookup(ENV_CONFIG_DIR) {
        let path = PathBuf::from(dir).join(CONFIG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::Environment);
        }
    }

    if let Some(xdg) = xdg_dir {
        let path = xdg.join(APP_NAME).join(CONFIG_FILENAME);
        if path.exists() {
            return (Some(path), ConfigSource::XdgConfig);
        }
    }

    (None, ConfigSource::BuiltinDefault)
}

/// Resolve and load the configuration, then validate it.
pub fn load_config(cli_path: Option<&Path>) -> Result<ResolvedConfig, ConfigError> {
    let (path, source) = resolve_config_path(cli_path);
    let config = match &path {
        Some(path) => load_config_file(path)?,
        None => QuoteConfig::default(),
    };

    config
        .validate()
        .map_err(|err| ConfigError::Invalid(err.to_string()))?;

    debug!(source = %source, path = ?path, "Configuration loaded");
    Ok(ResolvedConfig {
        config,
        path,
        source,
    })
}

/// Load a config file without resolution.
pub fn load_config_file(path: &Path) -> Result<QuoteConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.to_path_buf(),
        source,
    })?;

    QuoteConfig::from_json(&content).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn env(vars: &[(&str, String)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn write_config(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILENAME);
        std::fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::CliArgument.to_string(), "CLI argument");
        assert_eq!(ConfigSource::BuiltinDefault.to_string(), "builtin default");
    }

    #[test]
    fn test_cli_path_wins() {
        let dir = TempDir::new().unwrap();
        let env_path = write_config(dir.path(), "{}");
        let cli = PathBuf::from("/explicit/quote.json");
        let (path, source) = resolve_with(
            Some(&cli),
            env(&[(ENV_CONFIG_PATH, env_path.display().to_string())]),
            None,
        );
        assert_eq!(path, Some(cli));
        assert_eq!(source, ConfigSource::CliArgument);
    }

    #[test]
    fn test_env_file_then_env_dir() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "{}");

        let (found, source) = resolve_with(
            None,
            env(&[(ENV_CONFIG_PATH, path.display().to_string())]),
            None,
        );
        assert_eq!(found, Some(path.clone()));
        assert_eq!(source, ConfigSource::Environment);

        let (found, _) = resolve_with(
            None,
            env(&[
                (ENV_CONFIG_PATH, "/missing/quote.json".to_string()),
                (ENV_CONFIG_DIR, dir.path().display().to_string()),
            ]),
            None,
        );
        assert_eq!(found, Some(path));
    }

    #[test]
    fn test_xdg_then_default() {
        let xdg = TempDir::new().unwrap();
        let app_dir = xdg.path().join(APP_NAME);
        std::fs::create_dir_all(&app_dir).unwrap();

        let (found, source) = resolve_with(None, env(&[]), Some(xdg.path().to_path_buf()));
        assert_eq!(found, None);
        assert_eq!(source, ConfigSource::BuiltinDefault);

        let path = write_config(&app_dir, "{}");
        let (found, source) = resolve_with(None, env(&[]), Some(xdg.path().to_path_buf()));
        assert_eq!(found, Some(path));
        assert_eq!(source, ConfigSource::XdgConfig);
    }

    #[test]
    fn test_load_config_file_partial() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), r#"{"gst_rate": 0.15}"#);
        let config = load_config_file(&path).unwrap();
        assert_eq!(config.gst_rate, 0.15);
        assert_eq!(config.deposit_ratio, 0.5);
    }

    #[test]
    fn test_load_config_errors() {
        let err = load_config_file(Path::new("/nonexistent/quote.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));

        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), "{ not json");
        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_load_config_validates() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), r#"{"deposit_ratio": 0}"#);
        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_load_config_explicit() {
        let dir = TempDir::new().unwrap();
        let path = write_config(dir.path(), r#"{"default_terms": "Net 14."}"#);
        let resolved = load_config(Some(&path)).unwrap();
        assert_eq!(resolved.source, ConfigSource::CliArgument);
        assert_eq!(resolved.config.default_terms, "Net 14.");
    }
}
