//! `.healthhive.toml` discovery, explicit paths and section sanitizing.

use healthhive::config::{load_config_from, load_config_from_path, HealthHiveConfig, CONFIG_FILE_NAME};
use healthhive::priority::PriorityConfig;
use indoc::indoc;
use std::fs;
use tempfile::TempDir;

#[test]
fn discovers_config_in_parent_directory() {
    let root = TempDir::new().unwrap();
    fs::write(
        root.path().join(CONFIG_FILE_NAME),
        indoc! {r#"
            [priority]
            staleness_weight = 1.0

            [route]
            minutes_per_visit = 20
        "#},
    )
    .unwrap();
    let nested = root.path().join("district").join("team");
    fs::create_dir_all(&nested).unwrap();

    let config = load_config_from(nested);
    assert_eq!(config.priority.staleness_weight, 1.0);
    assert_eq!(config.priority.urgent_below, 40.0);
    assert_eq!(config.route.minutes_per_visit, 20);
}

#[test]
fn missing_config_falls_back_to_defaults() {
    let root = TempDir::new().unwrap();
    assert_eq!(load_config_from(root.path().to_path_buf()), HealthHiveConfig::default());
}

#[test]
fn invalid_sections_reset_independently() {
    let root = TempDir::new().unwrap();
    let path = root.path().join("custom.toml");
    fs::write(
        &path,
        indoc! {r#"
            [priority]
            urgent_below = 80.0
            high_below = 50.0

            [heatmap]
            cutoffs = [0.0, 25.0, 50.0, 75.0, 90.0]

            [prevalence]
            htn = 1.5
            dm = 0.2
        "#},
    )
    .unwrap();

    let config = load_config_from_path(&path).unwrap();
    assert_eq!(config.priority, PriorityConfig::default());
    assert_eq!(config.heatmap.cutoffs, [0.0, 25.0, 50.0, 75.0, 90.0]);
    assert_eq!(config.prevalence.htn, 0.42);
}

#[test]
fn explicit_path_errors_are_reported() {
    let root = TempDir::new().unwrap();
    let missing = root.path().join("nope.toml");
    let err = load_config_from_path(&missing).unwrap_err();
    assert!(err.to_string().contains("nope.toml"));

    let broken = root.path().join("broken.toml");
    fs::write(&broken, "[priority\nurgent_below = ").unwrap();
    assert!(load_config_from_path(&broken).is_err());
}

#[test]
fn unparseable_discovered_config_is_ignored() {
    let root = TempDir::new().unwrap();
    fs::write(root.path().join(CONFIG_FILE_NAME), "not = [valid").unwrap();
    assert_eq!(load_config_from(root.path().to_path_buf()), HealthHiveConfig::default());
}
