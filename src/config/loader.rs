use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::HealthHiveConfig;
use crate::core::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".healthhive.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML and reset any invalid section to its defaults
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<HealthHiveConfig, String> {
    let mut config = toml::from_str::<HealthHiveConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))?;
    config.sanitize();
    Ok(config)
}

pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<HealthHiveConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            tracing::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            tracing::warn!("{}. Using defaults.", e);
            None
        }
    }
}

pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        tracing::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` and its parents, at most `max_depth` directories
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for `.healthhive.toml`
pub fn load_config_from(start: PathBuf) -> HealthHiveConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            HealthHiveConfig::default()
        })
}

pub fn load_config() -> HealthHiveConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            tracing::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            HealthHiveConfig::default()
        }
    }
}

/// Load an explicitly requested config file; unlike discovery, failures are errors
pub fn load_config_from_path(path: &Path) -> Result<HealthHiveConfig> {
    let contents = read_config_file(path).map_err(|e| {
        Error::config_with_path(format!("cannot read config file: {}", e), path)
    })?;
    parse_and_validate_config(&contents).map_err(|e| Error::config_with_path(e, path))
}
