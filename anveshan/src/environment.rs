//! The static world: bounds plus obstacle polylines.

use serde::{Deserialize, Serialize};

use crate::core::{Polyline, Segment, WorldPoint};
use crate::error::{Error, Result};

/// Bounded rectangular environment `[0, width] × [0, height]` with static obstacles.
///
/// The four bounding edges are always solid walls in addition to the
/// obstacles. An environment with no obstacles is valid. Deserialization
/// goes through [`Environment::new`], so it is validated the same way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawEnvironment")]
pub struct Environment {
    width: f32,
    height: f32,
    obstacles: Vec<Polyline>,
}

/// Unvalidated serde form of [`Environment`]
#[derive(Deserialize)]
struct RawEnvironment {
    width: f32,
    height: f32,
    #[serde(default)]
    obstacles: Vec<Polyline>,
}

impl TryFrom<RawEnvironment> for Environment {
    type Error = Error;

    fn try_from(raw: RawEnvironment) -> Result<Self> {
        Self::new(raw.width, raw.height, raw.obstacles)
    }
}

impl Environment {
    /// Create an environment, validating bounds and obstacles
    pub fn new(width: f32, height: f32, obstacles: Vec<Polyline>) -> Result<Self> {
        if !(width.is_finite() && width > 0.0 && height.is_finite() && height > 0.0) {
            return Err(Error::InvalidEnvironment(format!(
                "bounds must be positive, got {}x{}",
                width, height
            )));
        }
        if let Some(idx) = obstacles.iter().position(|o| o.is_empty()) {
            return Err(Error::InvalidEnvironment(format!(
                "obstacle {} has no points",
                idx
            )));
        }
        if obstacles
            .iter()
            .flat_map(|o| o.points())
            .any(|p| !(p.x.is_finite() && p.y.is_finite()))
        {
            return Err(Error::InvalidEnvironment(
                "obstacle coordinates must be finite".into(),
            ));
        }
        Ok(Self {
            width,
            height,
            obstacles,
        })
    }

    /// Environment with no obstacles
    pub fn empty(width: f32, height: f32) -> Result<Self> {
        Self::new(width, height, Vec::new())
    }

    /// Width of the bounding rectangle
    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Height of the bounding rectangle
    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Static obstacles, in input order
    #[inline]
    pub fn obstacles(&self) -> &[Polyline] {
        &self.obstacles
    }

    /// Bounding rectangle as a closed polyline
    pub fn bounds(&self) -> Polyline {
        Polyline::rectangle(WorldPoint::ZERO, WorldPoint::new(self.width, self.height))
    }

    /// True if `p` lies inside the bounding rectangle (edges included)
    #[inline]
    pub fn contains(&self, p: &WorldPoint) -> bool {
        p.x >= 0.0 && p.x <= self.width && p.y >= 0.0 && p.y <= self.height
    }

    /// True if `p` lies strictly inside the bounding rectangle
    #[inline]
    pub fn contains_strict(&self, p: &WorldPoint) -> bool {
        p.x > 0.0 && p.x < self.width && p.y > 0.0 && p.y < self.height
    }

    /// Every solid wall segment: obstacle segments followed by the four bounding edges
    pub fn solid_walls(&self) -> Vec<Segment> {
        let bounds = self.bounds();
        self.obstacles
            .iter()
            .flat_map(|o| o.segments())
            .chain(bounds.segments())
            .collect()
    }
}
