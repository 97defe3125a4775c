//! Exploration state machine states and per-tick reports.

use crate::error::Anomaly;

use super::motion::Rotation;

/// Exploration state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExplorationState {
    /// Waiting to select a target and plan
    #[default]
    Idle,

    /// Moving along the planned path
    FollowingPath,

    /// Dwelling in place, turning clockwise (screen)
    RotatingCW,

    /// Dwelling in place, turning counter-clockwise (screen)
    RotatingCCW,
}

impl ExplorationState {
    /// State name for logging
    pub fn name(&self) -> &'static str {
        match self {
            ExplorationState::Idle => "Idle",
            ExplorationState::FollowingPath => "FollowingPath",
            ExplorationState::RotatingCW => "RotatingCW",
            ExplorationState::RotatingCCW => "RotatingCCW",
        }
    }

    /// Dwell state for a rotation direction
    pub fn dwell(rotation: Rotation) -> Self {
        match rotation {
            Rotation::Clockwise => ExplorationState::RotatingCW,
            Rotation::CounterClockwise => ExplorationState::RotatingCCW,
        }
    }

    /// Rotation direction of a dwell state
    pub fn rotation(&self) -> Option<Rotation> {
        match self {
            ExplorationState::RotatingCW => Some(Rotation::Clockwise),
            ExplorationState::RotatingCCW => Some(Rotation::CounterClockwise),
            _ => None,
        }
    }
}

/// Who drives the agent
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ControlMode {
    /// The state machine selects targets and follows paths
    #[default]
    Autonomous,

    /// Motion comes from queued steer commands
    Manual,
}

impl ControlMode {
    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ControlMode::Autonomous => ControlMode::Manual,
            ControlMode::Manual => ControlMode::Autonomous,
        }
    }
}

/// Result of a single [`advance`](super::ExplorationEngine::advance).
#[derive(Clone, Debug, PartialEq)]
pub struct TickReport {
    /// Tick counter after this call
    pub tick: u64,

    /// State after this tick
    pub state: ExplorationState,

    /// Control mode during this tick
    pub mode: ControlMode,

    /// True if the engine was paused and nothing ran
    pub paused: bool,

    /// Cells discovered this tick
    pub newly_discovered: usize,

    /// Virtual walls traced this tick
    pub virtual_walls: usize,

    /// Visibility graph nodes
    pub graph_nodes: usize,

    /// Visibility graph edges
    pub graph_edges: usize,

    /// Whether a target was selected and a path planned this tick
    pub replanned: bool,

    /// Recoverable conditions observed this tick
    pub anomalies: Vec<Anomaly>,
}

impl TickReport {
    /// Report for a tick skipped while paused
    pub(super) fn paused(tick: u64, state: ExplorationState, mode: ControlMode) -> Self {
        Self {
            tick,
            state,
            mode,
            paused: true,
            newly_discovered: 0,
            virtual_walls: 0,
            graph_nodes: 0,
            graph_edges: 0,
            replanned: false,
            anomalies: Vec::new(),
        }
    }
}
