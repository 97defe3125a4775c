//! Agent kinematics: bounded turning, path following and collision deflection.

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, MotionSection};
use crate::core::{Segment, WorldPoint, angle_diff, normalize_angle_positive};
use crate::grid::SensorSector;

/// In-place rotation direction.
///
/// With screen coordinates (Y down) an increasing heading turns clockwise.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rotation {
    /// Heading increases
    Clockwise,
    /// Heading decreases
    CounterClockwise,
}

impl Rotation {
    /// Sign applied to the angular speed
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Rotation::Clockwise => 1.0,
            Rotation::CounterClockwise => -1.0,
        }
    }
}

/// Position and heading.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AgentPose {
    /// Position in world coordinates
    pub position: WorldPoint,
    /// Heading in [0, 2π)
    pub heading: f32,
}

impl AgentPose {
    /// Create a pose, normalizing the heading
    pub fn new(position: WorldPoint, heading: f32) -> Self {
        Self {
            position,
            heading: normalize_angle_positive(heading),
        }
    }

    fn turn(&mut self, delta: f32) {
        self.heading = normalize_angle_positive(self.heading + delta);
    }
}

/// The exploring agent: pose plus sensor and speed limits.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// Current pose
    pub pose: AgentPose,
    /// Sensor range
    pub sensor_range: f32,
    /// Half of the sensor field of view (radians)
    pub sensor_half_angle: f32,
    /// Max translation per tick
    pub linear_speed: f32,
    /// Max rotation per tick (radians)
    pub angular_speed: f32,
}

impl Agent {
    /// Agent at the configured start pose
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            pose: AgentPose::new(config.start.position(), config.start.heading),
            sensor_range: config.sensor.range,
            sensor_half_angle: config.sensor.half_angle,
            linear_speed: config.motion.linear_speed,
            angular_speed: config.motion.angular_speed,
        }
    }

    /// Current sensor sector
    pub fn sensor(&self) -> SensorSector {
        SensorSector::new(
            self.pose.position,
            self.pose.heading,
            self.sensor_range,
            self.sensor_half_angle,
        )
    }
}

/// One manual motion input, fractions of the speed limits in [-1, 1].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SteerCommand {
    /// Forward (positive) or backward (negative) translation
    pub forward: f32,
    /// Heading change direction; positive turns clockwise on screen
    pub turn: f32,
}

/// Outcome of a translation attempt
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The agent moved (or had nothing to do)
    Moved,
    /// A solid wall was in the way; the agent turned instead
    Blocked {
        /// The first wall hit
        wall: Segment,
    },
}

/// Outcome of one path-following step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FollowOutcome {
    /// Turned towards the next waypoint
    Turning,
    /// Moved along the current segment
    Advanced,
    /// Snapped onto the next waypoint, which was popped
    WaypointReached,
    /// Translation blocked; deflection rotation applied
    Blocked,
    /// Fewer than two waypoints remain
    Arrived,
}

/// Bounded-speed motion with wall-collision deflection.
#[derive(Clone, Debug)]
pub struct MotionController {
    linear_speed: f32,
    angular_speed: f32,
    heading_tolerance: f32,
}

impl MotionController {
    /// Create from a motion config section
    pub fn new(config: &MotionSection) -> Self {
        Self {
            linear_speed: config.linear_speed,
            angular_speed: config.angular_speed,
            heading_tolerance: config.heading_tolerance,
        }
    }

    /// Create with default limits
    pub fn with_defaults() -> Self {
        Self::new(&MotionSection::default())
    }

    /// Turn in place by one angular step
    pub fn rotate(&self, pose: &mut AgentPose, rotation: Rotation) {
        pose.turn(rotation.sign() * self.angular_speed);
    }

    /// Turn towards `target_heading` by at most one angular step.
    ///
    /// Returns true once the heading matches, including when this step
    /// closed the remaining error.
    pub fn turn_towards(&self, pose: &mut AgentPose, target_heading: f32) -> bool {
        let error = angle_diff(pose.heading, target_heading);
        if error.abs() <= self.heading_tolerance {
            return true;
        }
        if error.abs() <= self.angular_speed {
            pose.heading = normalize_angle_positive(target_heading);
            return true;
        }
        pose.turn(error.signum() * self.angular_speed);
        false
    }

    /// Move to `to` unless a wall lies on the way.
    ///
    /// When blocked the translation is cancelled and the agent turns one
    /// angular step, in the direction given by the sign of the cross product
    /// of the movement direction and the wall direction.
    pub fn try_translate(&self, pose: &mut AgentPose, to: WorldPoint, walls: &[Segment]) -> MoveOutcome {
        let movement = Segment::new(pose.position, to);
        match walls.iter().find(|w| movement.blocked_after_start(w)) {
            Some(wall) => {
                let cross = movement.direction().cross(&wall.direction());
                let sign = if cross >= 0.0 { 1.0 } else { -1.0 };
                pose.turn(sign * self.angular_speed);
                MoveOutcome::Blocked { wall: *wall }
            }
            None => {
                pose.position = to;
                MoveOutcome::Moved
            }
        }
    }

    /// Advance along `path`, whose first point is the agent's position.
    ///
    /// Turns towards the segment `(path[0], path[1])` until aligned, then
    /// translates. A step that would overshoot `path[1]` snaps onto it and
    /// pops `path[0]`; otherwise `path[0]` tracks the new position.
    pub fn follow_path(
        &self,
        pose: &mut AgentPose,
        path: &mut Vec<WorldPoint>,
        walls: &[Segment],
    ) -> FollowOutcome {
        if path.len() < 2 {
            return FollowOutcome::Arrived;
        }
        let segment = Segment::new(path[0], path[1]);
        if segment.length() <= f32::EPSILON {
            path.remove(0);
            return FollowOutcome::WaypointReached;
        }

        let desired = path[0].angle_to(&path[1]);
        if !self.turn_towards(pose, desired) {
            return FollowOutcome::Turning;
        }
        pose.heading = normalize_angle_positive(desired);

        let step = pose.position.point_at(desired, self.linear_speed);
        let overshoot = segment.project(&step) >= 1.0;
        let to = if overshoot { path[1] } else { step };

        match self.try_translate(pose, to, walls) {
            MoveOutcome::Blocked { .. } => FollowOutcome::Blocked,
            MoveOutcome::Moved if overshoot => {
                path.remove(0);
                FollowOutcome::WaypointReached
            }
            MoveOutcome::Moved => {
                path[0] = pose.position;
                FollowOutcome::Advanced
            }
        }
    }

    /// Apply one manual input: turn, then translate with collision checking.
    pub fn steer(&self, pose: &mut AgentPose, command: SteerCommand, walls: &[Segment]) -> MoveOutcome {
        pose.turn(command.turn.clamp(-1.0, 1.0) * self.angular_speed);
        let forward = command.forward.clamp(-1.0, 1.0);
        if forward == 0.0 {
            return MoveOutcome::Moved;
        }
        let to = pose.position.point_at(pose.heading, forward * self.linear_speed);
        self.try_translate(pose, to, walls)
    }
}
