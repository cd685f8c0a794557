//! Application configuration: `linkcard.ron` plus environment overrides.
//!
//! - `LINKCARD_CONFIG`: path of the RON file (default `./linkcard.ron`)
//! - `LINKCARD_SERVER_URL`: base URL of the card generation service
//! - `LINKCARD_OUTPUT_DIR`: directory downloads are written into

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use linkcard_engine::{EngineConfig, GenerateSettings};
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

const DEFAULT_CONFIG_FILE: &str = "linkcard.ron";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_image_bytes: u64,
    pub output_dir: PathBuf,
    pub log_destination: LogDestination,
    /// `error`, `warn`, `info`, `debug` or `trace`.
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        let generate = GenerateSettings::default();
        Self {
            server_url: generate.server_url,
            connect_timeout_secs: generate.connect_timeout.as_secs(),
            request_timeout_secs: generate.request_timeout.as_secs(),
            max_image_bytes: generate.max_bytes,
            output_dir: PathBuf::from("output"),
            log_destination: LogDestination::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            generate: GenerateSettings {
                server_url: self.server_url.clone(),
                connect_timeout: Duration::from_secs(self.connect_timeout_secs),
                request_timeout: Duration::from_secs(self.request_timeout_secs),
                max_bytes: self.max_image_bytes,
            },
            output_dir: self.output_dir.clone(),
        }
    }
}

/// Loaded configuration and problems met on the way.
///
/// Warnings are collected rather than logged because the logger is set up
/// from the loaded configuration.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: AppConfig,
    pub source: Option<PathBuf>,
    pub warnings: Vec<String>,
}

pub fn load() -> LoadedConfig {
    let path = std::env::var_os("LINKCARD_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));
    let mut loaded = load_from(&path);
    loaded.config = apply_env_overrides(loaded.config, |key| std::env::var(key).ok());
    loaded
}

pub fn load_from(path: &Path) -> LoadedConfig {
    let mut warnings = Vec::new();
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return LoadedConfig {
                config: AppConfig::default(),
                source: None,
                warnings,
            };
        }
        Err(err) => {
            warnings.push(format!("Failed to read config from {:?}: {}", path, err));
            return LoadedConfig {
                config: AppConfig::default(),
                source: None,
                warnings,
            };
        }
    };

    match parse(&content) {
        Ok(config) => LoadedConfig {
            config,
            source: Some(path.to_path_buf()),
            warnings,
        },
        Err(err) => {
            warnings.push(format!(
                "Failed to parse config from {:?}, using defaults: {}",
                path, err
            ));
            LoadedConfig {
                config: AppConfig::default(),
                source: None,
                warnings,
            }
        }
    }
}

pub fn parse(content: &str) -> Result<AppConfig, String> {
    ron::from_str(content).map_err(|err| err.to_string())
}

pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    if let Some(url) = lookup("LINKCARD_SERVER_URL").filter(|v| !v.trim().is_empty()) {
        config.server_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(dir) = lookup("LINKCARD_OUTPUT_DIR").filter(|v| !v.trim().is_empty()) {
        config.output_dir = PathBuf::from(dir);
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let config = parse(r#"(server_url: "https://cards.example.com", log_destination: Both)"#)
            .expect("parse");

        assert_eq!(config.server_url, "https://cards.example.com");
        assert_eq!(config.log_destination, LogDestination::Both);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.max_image_bytes, AppConfig::default().max_image_bytes);
    }

    #[test]
    fn missing_file_yields_defaults_without_warnings() {
        let dir = tempfile::TempDir::new().unwrap();
        let loaded = load_from(&dir.path().join("absent.ron"));

        assert_eq!(loaded.config, AppConfig::default());
        assert!(loaded.source.is_none());
        assert!(loaded.warnings.is_empty());
    }

    #[test]
    fn malformed_file_falls_back_with_warning() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("linkcard.ron");
        fs::write(&path, "(server_url: 42").unwrap();

        let loaded = load_from(&path);

        assert_eq!(loaded.config, AppConfig::default());
        assert_eq!(loaded.warnings.len(), 1);
    }

    #[test]
    fn environment_overrides_file_values() {
        let config = apply_env_overrides(AppConfig::default(), |key| match key {
            "LINKCARD_SERVER_URL" => Some(" http://10.0.0.2:3000/ ".to_string()),
            "LINKCARD_OUTPUT_DIR" => Some("cards".to_string()),
            _ => None,
        });

        assert_eq!(config.server_url, "http://10.0.0.2:3000");
        assert_eq!(config.output_dir, PathBuf::from("cards"));
        let engine = config.engine_config();
        assert_eq!(engine.generate.server_url, "http://10.0.0.2:3000");
    }
}
