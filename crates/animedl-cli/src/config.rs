//! config.yml loading
//!
//! The file is created with defaults on first run. On later runs the
//! user's values are merged over the defaults, so keys added in newer
//! versions get their default values.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use animedl_core::SessionConfig;
use serde_yaml::Value;
use thiserror::Error;

pub const FILE_NAME: &str = "config.yml";

const HEADER: &str = "# animedl configuration\n\
# fallback.runner_command: program that downloads a VVVVID show, called with the show id\n";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error at {path}: {source}")]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid yaml at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("validation error: {0}")]
    Validation(String),
}

/// Load `path` (default `./config.yml`), writing defaults if it does not exist.
pub fn load_or_create(path: Option<&Path>) -> Result<SessionConfig, ConfigError> {
    let path = path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(FILE_NAME));

    if !path.exists() {
        let config = SessionConfig::default();
        write(&config, &path)?;
        return Ok(config);
    }

    let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    parse_merged(&raw).map_err(|err| match err {
        ConfigError::Parse { source, .. } => ConfigError::Parse {
            path: path.clone(),
            source,
        },
        other => other,
    })
}

/// Parse user YAML on top of the defaults.
pub fn parse_merged(raw: &str) -> Result<SessionConfig, ConfigError> {
    let user: Value = serde_yaml::from_str(raw).map_err(|source| ConfigError::Parse {
        path: PathBuf::new(),
        source,
    })?;

    let mut merged = serde_yaml::to_value(SessionConfig::default())
        .map_err(|err| ConfigError::Validation(err.to_string()))?;
    merge_values(&mut merged, user);

    let config: SessionConfig =
        serde_yaml::from_value(merged).map_err(|err| ConfigError::Validation(err.to_string()))?;

    if config.client.requests_per_second <= 0.0 {
        return Err(ConfigError::Validation(
            "client.requests_per_second must be positive".to_string(),
        ));
    }
    if config.fallback.service_name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "fallback.service_name must not be empty".to_string(),
        ));
    }
    Ok(config)
}

pub fn write(config: &SessionConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let yaml =
        serde_yaml::to_string(config).map_err(|err| ConfigError::Validation(err.to_string()))?;
    fs::write(path, format!("{}{}", HEADER, yaml)).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Mapping(base_map), Value::Mapping(overlay_map)) => {
            for (key, value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => *base = overlay,
    }
}
