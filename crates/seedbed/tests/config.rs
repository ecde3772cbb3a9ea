use seedbed::{ConfigError, DEFAULT_MAX_TEMPLATE_SLOTS, RegistryConfig, load_config};
use std::fs;

#[test]
fn config_defaults_are_sane() {
    let config = RegistryConfig::default();
    assert_eq!(config.max_template_slots, DEFAULT_MAX_TEMPLATE_SLOTS);
    assert!(config.validate().is_ok());
}

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("seedbed.toml");
    fs::write(&path, "max_template_slots = 3\n").expect("write config");

    let config = RegistryConfig::load(Some(&path)).expect("config load");
    assert_eq!(config.max_template_slots, 3);
}

#[test]
fn config_missing_keys_fall_back_to_defaults() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("seedbed.toml");
    fs::write(&path, "# nothing to override\n").expect("write config");

    let config: RegistryConfig = load_config(Some(&path)).expect("config load");
    assert_eq!(config, RegistryConfig::default());
}

#[test]
fn config_rejects_zero_slots() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("seedbed.toml");
    fs::write(&path, "max_template_slots = 0\n").expect("write config");

    let result = RegistryConfig::load(Some(&path));
    assert!(matches!(result, Err(ConfigError::Invalid { .. })));
}

#[test]
fn config_missing_file_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");

    let result = RegistryConfig::load(Some(dir.path().join("absent.toml")));
    assert!(matches!(result, Err(ConfigError::Config { context: Some(_), .. })));
}
