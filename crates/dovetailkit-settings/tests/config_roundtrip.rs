// Config persistence tests

use dovetailkit_core::MeasurementSystem;
use dovetailkit_settings::{Config, SettingsError};
use tempfile::TempDir;

fn custom_config() -> Config {
    let mut config = Config::new();
    config.joint.num_tails = 4;
    config.joint.board_width = 240.0;
    config.joint.pin_bit_diameter = 6.35;
    config.layout.board_separation = 25.0;
    config.layout.depth_units = MeasurementSystem::Imperial;
    config
}

#[test]
fn test_toml_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let config = custom_config();
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_roundtrip_creates_parent_dirs() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("dovetail.json");

    let config = custom_config();
    config.save_to_file(&path).unwrap();
    assert!(path.exists());

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded.joint.num_tails, 4);
    assert_eq!(loaded.layout.depth_units, MeasurementSystem::Imperial);
}

#[test]
fn test_load_or_default_without_file() {
    let dir = TempDir::new().unwrap();
    let config = Config::load_or_default(&dir.path().join("missing.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_file_content() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::JsonError(_))
    ));

    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[joint]\nnum_tails = 0\n").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::InvalidSetting { .. })
    ));
}

#[test]
fn test_unsupported_extension_is_rejected_on_save() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.ini");
    assert!(Config::new().save_to_file(&path).is_err());
    assert!(!path.exists());
}
