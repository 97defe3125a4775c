//! Top-level engine configuration and YAML loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::sections::{
    GraphSection, GridSection, MotionSection, SensorSection, StartSection, TargetSection,
};

/// Full engine configuration loaded from YAML
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sensor sector
    #[serde(default)]
    pub sensor: SensorSection,

    /// Grid layout
    #[serde(default)]
    pub grid: GridSection,

    /// Visibility graph
    #[serde(default)]
    pub graph: GraphSection,

    /// Motion limits
    #[serde(default)]
    pub motion: MotionSection,

    /// Target selection
    #[serde(default)]
    pub target: TargetSection,

    /// Initial pose
    #[serde(default)]
    pub start: StartSection,

    /// Seed for the dwell random source. `None` draws from OS entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EngineConfig {
    /// Load configuration from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Load from default config path (configs/explore.yaml), or defaults if absent
    pub fn load_default() -> Result<Self> {
        let path = Path::new("configs/explore.yaml");
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse from YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to YAML
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Set sensor range
    pub fn with_sensor_range(mut self, range: f32) -> Self {
        self.sensor.range = range;
        self
    }

    /// Set sensor half angle (radians)
    pub fn with_sensor_half_angle(mut self, half_angle: f32) -> Self {
        self.sensor.half_angle = half_angle;
        self
    }

    /// Set grid cell size
    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.grid.cell_size = cell_size;
        self
    }

    /// Set pivot offset
    pub fn with_pivot_offset(mut self, offset: f32) -> Self {
        self.graph.pivot_offset = offset;
        self
    }

    /// Set translation per tick
    pub fn with_linear_speed(mut self, speed: f32) -> Self {
        self.motion.linear_speed = speed;
        self
    }

    /// Set rotation per tick (radians)
    pub fn with_angular_speed(mut self, speed: f32) -> Self {
        self.motion.angular_speed = speed;
        self
    }

    /// Set start pose
    pub fn with_start(mut self, x: f32, y: f32, heading: f32) -> Self {
        self.start = StartSection { x, y, heading };
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check every value is usable
    pub fn validate(&self) -> Result<()> {
        positive("sensor.range", self.sensor.range)?;
        positive("sensor.half_angle", self.sensor.half_angle)?;
        if self.sensor.half_angle > std::f32::consts::PI {
            return Err(invalid("sensor.half_angle", "must not exceed pi"));
        }
        positive("grid.cell_size", self.grid.cell_size)?;
        positive("graph.pivot_offset", self.graph.pivot_offset)?;
        non_negative("graph.simplify_epsilon", self.graph.simplify_epsilon)?;
        positive("motion.linear_speed", self.motion.linear_speed)?;
        positive("motion.angular_speed", self.motion.angular_speed)?;
        non_negative("motion.heading_tolerance", self.motion.heading_tolerance)?;
        let p = self.motion.dwell_stop_probability;
        if !(0.0..=1.0).contains(&p) {
            return Err(invalid("motion.dwell_stop_probability", "must be in [0, 1]"));
        }
        if self.target.window == 0 {
            return Err(invalid("target.window", "must be at least 1"));
        }
        non_negative("target.frontier_gain", self.target.frontier_gain)?;
        non_negative("target.visit_increment", self.target.visit_increment)?;
        non_negative("target.demotion_penalty", self.target.demotion_penalty)?;
        let r = self.target.refinement_ratio;
        if !(r > 0.0 && r <= 1.0) {
            return Err(invalid("target.refinement_ratio", "must be in (0, 1]"));
        }
        non_negative("target.min_target_distance", self.target.min_target_distance)?;
        if !(self.start.x.is_finite() && self.start.y.is_finite() && self.start.heading.is_finite())
        {
            return Err(invalid("start", "pose must be finite"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: &str) -> Error {
    Error::InvalidConfig {
        field,
        reason: reason.to_string(),
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be non-negative, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_relative_eq!(config.sensor.range, 100.0);
        assert_relative_eq!(config.sensor.half_angle, std::f32::consts::FRAC_PI_4);
        assert_relative_eq!(config.grid.cell_size, 10.0);
        assert_relative_eq!(config.graph.pivot_offset, 10.0);
        assert_relative_eq!(config.motion.linear_speed, 10.0);
        assert_relative_eq!(config.motion.angular_speed, 0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = r#"
sensor:
  range: 150.0
grid:
  cell_size: 5.0
seed: 42
"#;
        let config = EngineConfig::from_yaml(yaml).unwrap();
        assert_relative_eq!(config.sensor.range, 150.0);
        assert_relative_eq!(config.sensor.half_angle, std::f32::consts::FRAC_PI_4);
        assert_relative_eq!(config.grid.cell_size, 5.0);
        assert_eq!(config.grid.margin, 2);
        assert_eq!(config.target.window, 5);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_empty_yaml_is_default() {
        let config = EngineConfig::from_yaml("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_yaml_roundtrip_preserves_values() {
        let config = EngineConfig::default().with_seed(7).with_cell_size(4.0);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(EngineConfig::from_yaml(&yaml).unwrap(), config);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let bad = EngineConfig::default().with_cell_size(0.0);
        assert!(matches!(
            bad.validate(),
            Err(Error::InvalidConfig { field: "grid.cell_size", .. })
        ));
        assert!(EngineConfig::default().with_sensor_half_angle(4.0).validate().is_err());
        assert!(EngineConfig::default().with_angular_speed(-1.0).validate().is_err());

        let mut config = EngineConfig::default();
        config.motion.dwell_stop_probability = 1.5;
        assert!(config.validate().is_err());

        assert!(EngineConfig::from_yaml("grid:\n  cell_size: -2.0\n").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EngineConfig::load(Path::new("/nonexistent/explore.yaml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
