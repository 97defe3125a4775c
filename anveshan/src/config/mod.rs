//! Engine configuration.
//!
//! Loaded from a single YAML file. Every section and field is optional and
//! falls back to the defaults in [`defaults`](self).
//!
//! # Example
//!
//! ```rust,ignore
//! use anveshan::config::EngineConfig;
//!
//! let config = EngineConfig::from_yaml("sensor:\n  range: 120.0\n")?;
//! assert_eq!(config.grid.cell_size, 10.0);
//! ```

mod defaults;
mod engine;
mod sections;

pub use engine::EngineConfig;
pub use sections::{
    GraphSection, GridSection, MotionSection, SensorSection, StartSection, TargetSection,
};
