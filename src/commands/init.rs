use crate::config::CONFIG_FILE_NAME;
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# HealthHive Configuration

[priority]
# priority_score = control_rate - staleness_weight * days_since_last_clinic
urgent_below = 40.0
high_below = 55.0
moderate_below = 70.0
staleness_weight = 0.5

[heatmap]
# Lower bound of each color band, ascending
cutoffs = [0.0, 20.0, 40.0, 60.0, 80.0]

[route]
minutes_per_visit = 30

[prevalence]
# Share of registered patients estimated to have each condition
htn = 0.42
dm = 0.305
"#;

pub fn init_config(force: bool) -> Result<()> {
    let path = init_config_at(Path::new("."), force)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

/// Write the default config into `dir`, returning its path.
pub fn init_config_at(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if io::file_exists(&config_path) && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    io::write_file(&config_path, DEFAULT_CONFIG)?;
    tracing::info!("Wrote {}", config_path.display());
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, HealthHiveConfig};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_defaults() {
        let parsed = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(parsed, HealthHiveConfig::default());
    }

    #[test]
    fn test_init_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        init_config_at(temp.path(), false).unwrap();
        let err = init_config_at(temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));
        assert!(init_config_at(temp.path(), true).is_ok());
    }
}
