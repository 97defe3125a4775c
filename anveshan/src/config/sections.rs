//! Configuration sections.

use serde::{Deserialize, Serialize};

use crate::core::WorldPoint;

use super::defaults;

/// Sensor sector geometry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SensorSection {
    /// Sensor range (world units). Cells must be strictly closer than this.
    #[serde(default = "defaults::sensor_range")]
    pub range: f32,

    /// Half of the field-of-view angle (radians)
    #[serde(default = "defaults::sensor_half_angle")]
    pub half_angle: f32,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            range: defaults::sensor_range(),
            half_angle: defaults::sensor_half_angle(),
        }
    }
}

/// Occupancy grid layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GridSection {
    /// Cell size (world units per cell)
    #[serde(default = "defaults::cell_size")]
    pub cell_size: f32,

    /// Extra cells added along each axis beyond the environment bounds
    #[serde(default = "defaults::grid_margin")]
    pub margin: usize,
}

impl Default for GridSection {
    fn default() -> Self {
        Self {
            cell_size: defaults::cell_size(),
            margin: defaults::grid_margin(),
        }
    }
}

/// Visibility graph construction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSection {
    /// Distance between a vertex and its pivots
    #[serde(default = "defaults::pivot_offset")]
    pub pivot_offset: f32,

    /// Max direction change (radians) for merging consecutive contour segments
    #[serde(default = "defaults::simplify_epsilon")]
    pub simplify_epsilon: f32,
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            pivot_offset: defaults::pivot_offset(),
            simplify_epsilon: defaults::simplify_epsilon(),
        }
    }
}

/// Agent motion limits
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MotionSection {
    /// Max translation per tick
    #[serde(default = "defaults::linear_speed")]
    pub linear_speed: f32,

    /// Max rotation per tick (radians)
    #[serde(default = "defaults::angular_speed")]
    pub angular_speed: f32,

    /// Heading error below which the agent translates instead of turning
    #[serde(default = "defaults::heading_tolerance")]
    pub heading_tolerance: f32,

    /// Per-tick probability of leaving a rotation dwell
    #[serde(default = "defaults::dwell_stop_probability")]
    pub dwell_stop_probability: f32,
}

impl Default for MotionSection {
    fn default() -> Self {
        Self {
            linear_speed: defaults::linear_speed(),
            angular_speed: defaults::angular_speed(),
            heading_tolerance: defaults::heading_tolerance(),
            dwell_stop_probability: defaults::dwell_stop_probability(),
        }
    }
}

/// Potential field and target selection
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetSection {
    /// Half-width (cells) of the frontier window summed around each cell
    #[serde(default = "defaults::window")]
    pub window: usize,

    /// Gain applied to each undiscovered cell, divided by its grid distance
    #[serde(default = "defaults::frontier_gain")]
    pub frontier_gain: f32,

    /// Radius (cells) of the visit and demotion kernels
    #[serde(default = "defaults::visit_radius")]
    pub visit_radius: usize,

    /// Visit score deposited at the agent cell each path-following tick
    #[serde(default = "defaults::visit_increment")]
    pub visit_increment: f32,

    /// Score deposited at an unreachable target
    #[serde(default = "defaults::demotion_penalty")]
    pub demotion_penalty: f32,

    /// Candidates within this fraction of the best potential are path-costed
    #[serde(default = "defaults::refinement_ratio")]
    pub refinement_ratio: f32,

    /// Candidates closer than this to the agent are skipped during refinement
    #[serde(default = "defaults::min_target_distance")]
    pub min_target_distance: f32,
}

impl Default for TargetSection {
    fn default() -> Self {
        Self {
            window: defaults::window(),
            frontier_gain: defaults::frontier_gain(),
            visit_radius: defaults::visit_radius(),
            visit_increment: defaults::visit_increment(),
            demotion_penalty: defaults::demotion_penalty(),
            refinement_ratio: defaults::refinement_ratio(),
            min_target_distance: defaults::min_target_distance(),
        }
    }
}

/// Initial agent pose
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StartSection {
    /// Start X
    #[serde(default = "defaults::start_x")]
    pub x: f32,

    /// Start Y
    #[serde(default = "defaults::start_y")]
    pub y: f32,

    /// Start heading (radians)
    #[serde(default)]
    pub heading: f32,
}

impl StartSection {
    /// Start position as a point
    pub fn position(&self) -> WorldPoint {
        WorldPoint::new(self.x, self.y)
    }
}

impl Default for StartSection {
    fn default() -> Self {
        Self {
            x: defaults::start_x(),
            y: defaults::start_y(),
            heading: 0.0,
        }
    }
}
