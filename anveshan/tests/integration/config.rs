//! Shipped configuration file.

use std::path::Path;

use anveshan::{EngineConfig, Error};

#[test]
fn shipped_config_matches_defaults() {
    let config = EngineConfig::load(Path::new("configs/explore.yaml")).unwrap();
    assert_eq!(config, EngineConfig::default());
}

#[test]
fn partial_yaml_fills_defaults() {
    let config = EngineConfig::from_yaml("sensor:\n  range: 150.0\nseed: 9\n").unwrap();
    assert_eq!(config.sensor.range, 150.0);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.motion, EngineConfig::default().motion);
}

#[test]
fn invalid_yaml_values_are_rejected() {
    let err = EngineConfig::from_yaml("grid:\n  cell_size: 0.0\n").unwrap_err();
    assert!(matches!(err, Error::InvalidConfig { field: "grid.cell_size", .. }));

    let err = EngineConfig::from_yaml("motion: fast\n").unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
