//! The per-tick exploration engine.

use log::{debug, info, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::boundary::{BoundaryTracer, VirtualWall};
use crate::config::EngineConfig;
use crate::core::WorldPoint;
use crate::environment::Environment;
use crate::error::{Anomaly, Error, Result};
use crate::grid::{OccupancyGrid, VisitField, discover};
use crate::pathfinding::{AStarPlanner, PathResult};
use crate::visibility::{GraphBuilder, VisibilityGraph};

use super::motion::{
    Agent, AgentPose, FollowOutcome, MotionController, MoveOutcome, Rotation, SteerCommand,
};
use super::potential::{Target, TargetSelector};
use super::state::{ControlMode, ExplorationState, TickReport};

/// Consecutive failed plans between repeated warnings
const PLAN_FAILURE_WARN_INTERVAL: usize = 10;

/// Owned copy of everything a display needs for one frame.
#[derive(Clone, Debug)]
pub struct EngineSnapshot {
    pub tick: u64,
    pub pose: AgentPose,
    pub state: ExplorationState,
    pub mode: ControlMode,
    pub paused: bool,
    pub grid: OccupancyGrid,
    pub virtual_walls: Vec<VirtualWall>,
    pub path: Vec<WorldPoint>,
    pub target: Option<Target>,
    pub coverage: f32,
}

/// Explores an [`Environment`] one tick at a time.
///
/// Each [`advance`](Self::advance) runs discovery from the current pose,
/// retraces the virtual walls, rebuilds the visibility graph and then either
/// steps the autonomous state machine or applies the queued manual command.
///
/// Randomness (dwell direction and dwell exit) comes from `R`. Use
/// [`with_rng`](Self::with_rng) to inject a generator for reproducible runs.
pub struct ExplorationEngine<R = StdRng> {
    config: EngineConfig,
    environment: Environment,
    grid: OccupancyGrid,
    visits: VisitField,
    tracer: BoundaryTracer,
    builder: GraphBuilder,
    graph: VisibilityGraph,
    virtual_walls: Vec<VirtualWall>,
    selector: TargetSelector,
    motion: MotionController,
    agent: Agent,
    state: ExplorationState,
    mode: ControlMode,
    paused: bool,
    path: Vec<WorldPoint>,
    target: Option<Target>,
    pending_steer: Option<SteerCommand>,
    failed_plans: usize,
    tick: u64,
    rng: R,
}

impl ExplorationEngine<StdRng> {
    /// Create an engine seeded from `config.seed`, or from the OS if unset
    pub fn new(config: EngineConfig, environment: Environment) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, environment, rng)
    }
}

impl<R: Rng> ExplorationEngine<R> {
    /// Create an engine drawing randomness from `rng`.
    ///
    /// The initial discovery, boundary trace and graph build run here, so
    /// the snapshots are meaningful before the first tick.
    pub fn with_rng(config: EngineConfig, environment: Environment, rng: R) -> Result<Self> {
        config.validate()?;
        let start = config.start.position();
        if !environment.contains_strict(&start) {
            return Err(Error::InvalidConfig {
                field: "start",
                reason: format!(
                    "({:.1},{:.1}) is outside the {}x{} environment",
                    start.x,
                    start.y,
                    environment.width(),
                    environment.height()
                ),
            });
        }

        let grid = OccupancyGrid::new(
            environment.width(),
            environment.height(),
            config.grid.cell_size,
            config.grid.margin,
        );
        let visits = VisitField::new(grid.width(), grid.height());
        let builder = GraphBuilder::new(&environment, config.graph.pivot_offset);

        let mut engine = Self {
            tracer: BoundaryTracer::new(config.graph.simplify_epsilon),
            selector: TargetSelector::new(config.target.clone()),
            motion: MotionController::new(&config.motion),
            agent: Agent::from_config(&config),
            config,
            environment,
            grid,
            visits,
            builder,
            graph: VisibilityGraph::default(),
            virtual_walls: Vec::new(),
            state: ExplorationState::Idle,
            mode: ControlMode::Autonomous,
            paused: false,
            path: Vec::new(),
            target: None,
            pending_steer: None,
            failed_plans: 0,
            tick: 0,
            rng,
        };
        let (discovered, _) = engine.refresh_world();

        info!(
            "[Explore] ready: grid {}x{} cells, {} obstacles, {} static pivots, {} cells seen at start",
            engine.grid.width(),
            engine.grid.height(),
            engine.environment.obstacles().len(),
            engine.builder.static_pivots().len(),
            discovered
        );
        Ok(engine)
    }

    /// Run one tick.
    ///
    /// While paused nothing changes and the report has `paused` set.
    pub fn advance(&mut self) -> TickReport {
        if self.paused {
            return TickReport::paused(self.tick, self.state, self.mode);
        }
        self.tick += 1;

        let (newly_discovered, mut anomalies) = self.refresh_world();
        let steer = self.pending_steer.take();
        let replanned = match self.mode {
            ControlMode::Autonomous => self.step_autonomous(&mut anomalies),
            ControlMode::Manual => {
                if let Some(command) = steer {
                    self.apply_steer(command, &mut anomalies);
                }
                false
            }
        };

        for anomaly in &anomalies {
            debug!("[Explore] tick {}: {} {}", self.tick, anomaly.code(), anomaly);
        }
        trace!(
            "[Explore] tick {} state={} pos=({:.1},{:.1}) heading={:.2} path={} new={}",
            self.tick,
            self.state.name(),
            self.agent.pose.position.x,
            self.agent.pose.position.y,
            self.agent.pose.heading,
            self.path.len(),
            newly_discovered
        );

        TickReport {
            tick: self.tick,
            state: self.state,
            mode: self.mode,
            paused: false,
            newly_discovered,
            virtual_walls: self.virtual_walls.len(),
            graph_nodes: self.graph.node_count(),
            graph_edges: self.graph.edge_count(),
            replanned,
            anomalies,
        }
    }

    /// Discovery, boundary tracing and graph rebuild from the current pose
    fn refresh_world(&mut self) -> (usize, Vec<Anomaly>) {
        let newly = discover(&mut self.grid, &self.agent.sensor(), self.builder.static_walls());
        self.virtual_walls = self.tracer.trace(&self.grid);
        self.graph = self.builder.build(&self.virtual_walls, &self.grid);

        let anomalies = self
            .virtual_walls
            .iter()
            .filter(|w| w.is_degenerate())
            .map(|w| Anomaly::DegenerateContour {
                component: w.component,
                cells: w.cells,
            })
            .collect();
        (newly, anomalies)
    }

    /// Step the state machine. Returns true if a plan was made.
    fn step_autonomous(&mut self, anomalies: &mut Vec<Anomaly>) -> bool {
        match self.state {
            ExplorationState::Idle => {
                self.plan(anomalies);
                self.state = ExplorationState::FollowingPath;
                true
            }
            ExplorationState::FollowingPath => {
                self.follow(anomalies);
                false
            }
            ExplorationState::RotatingCW | ExplorationState::RotatingCCW => {
                if let Some(rotation) = self.state.rotation() {
                    self.motion.rotate(&mut self.agent.pose, rotation);
                }
                let p = f64::from(self.config.motion.dwell_stop_probability);
                if self.rng.random_bool(p) {
                    trace!("[Explore] dwell finished after tick {}", self.tick);
                    self.state = ExplorationState::Idle;
                }
                false
            }
        }
    }

    fn plan(&mut self, anomalies: &mut Vec<Anomaly>) {
        let from = self.agent.pose.position;
        let Some(selection) = self.selector.select(&self.grid, &self.visits, &self.graph, from) else {
            debug!("[Explore] no eligible target");
            self.path.clear();
            self.target = None;
            return;
        };

        if selection.path.success {
            self.failed_plans = 0;
        } else {
            anomalies.push(Anomaly::PathNotFound {
                from,
                to: selection.target.point,
            });
            self.failed_plans += 1;
            if self.failed_plans % PLAN_FAILURE_WARN_INTERVAL == 0 {
                warn!(
                    "[Explore] {} consecutive targets unreachable (coverage {:.1}%)",
                    self.failed_plans,
                    self.grid.coverage() * 100.0
                );
            }
        }
        self.path = selection.path.path_world;
        self.target = Some(selection.target);
    }

    fn follow(&mut self, anomalies: &mut Vec<Anomaly>) {
        if self.path.is_empty() {
            if let Some(target) = self.target.take() {
                let settings = self.selector.settings();
                self.visits
                    .deposit(target.cell, settings.demotion_penalty, settings.visit_radius);
                debug!(
                    "[Explore] demoted unreachable target ({},{})",
                    target.cell.x, target.cell.y
                );
            }
            self.state = ExplorationState::Idle;
            return;
        }

        if self.path.len() == 1 {
            self.path.clear();
            let rotation = if self.rng.random::<bool>() {
                Rotation::Clockwise
            } else {
                Rotation::CounterClockwise
            };
            self.state = ExplorationState::dwell(rotation);
            debug!("[Explore] target reached, dwelling {}", self.state.name());
            return;
        }

        let settings = self.selector.settings();
        let cell = self.grid.world_to_cell(self.agent.pose.position);
        self.visits
            .deposit(cell, settings.visit_increment, settings.visit_radius);

        let outcome = self.motion.follow_path(
            &mut self.agent.pose,
            &mut self.path,
            self.builder.static_walls(),
        );
        if outcome == FollowOutcome::Blocked {
            anomalies.push(Anomaly::PathBlocked {
                at: self.agent.pose.position,
            });
            self.path.clear();
        }
    }

    fn apply_steer(&mut self, command: SteerCommand, anomalies: &mut Vec<Anomaly>) {
        let outcome = self
            .motion
            .steer(&mut self.agent.pose, command, self.builder.static_walls());
        if let MoveOutcome::Blocked { .. } = outcome {
            anomalies.push(Anomaly::PathBlocked {
                at: self.agent.pose.position,
            });
        }
    }

    /// Queue a manual command for the next tick (Manual mode only)
    pub fn steer(&mut self, command: SteerCommand) {
        self.pending_steer = Some(command);
    }

    /// Stop advancing until resumed
    pub fn pause(&mut self) {
        if !self.paused {
            info!("[Explore] paused at tick {}", self.tick);
        }
        self.paused = true;
    }

    /// Resume after [`pause`](Self::pause)
    pub fn resume(&mut self) {
        if self.paused {
            info!("[Explore] resumed at tick {}", self.tick);
        }
        self.paused = false;
    }

    /// Flip the paused flag, returning the new value
    pub fn toggle_pause(&mut self) -> bool {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
        self.paused
    }

    #[inline]
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Switch control mode.
    ///
    /// Any change drops the current path and target and returns to Idle.
    pub fn set_mode(&mut self, mode: ControlMode) {
        if mode == self.mode {
            return;
        }
        info!("[Explore] control mode {:?} -> {:?}", self.mode, mode);
        self.mode = mode;
        self.state = ExplorationState::Idle;
        self.path.clear();
        self.target = None;
        self.pending_steer = None;
    }

    /// Flip between autonomous and manual control, returning the new mode
    pub fn toggle_mode(&mut self) -> ControlMode {
        self.set_mode(self.mode.toggled());
        self.mode
    }

    #[inline]
    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    /// Plan from the agent's position to `goal` on the current graph
    pub fn plan_path(&self, goal: WorldPoint) -> PathResult {
        AStarPlanner::new(&self.graph, self.agent.pose.position).find_path(goal)
    }

    /// Discovery state
    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    /// Visit scores
    pub fn visits(&self) -> &VisitField {
        &self.visits
    }

    /// Walls around the undiscovered region, from the last refresh
    pub fn virtual_walls(&self) -> &[VirtualWall] {
        &self.virtual_walls
    }

    pub fn visibility_graph(&self) -> &VisibilityGraph {
        &self.graph
    }

    /// Remaining waypoints; the first is the agent's position
    pub fn path(&self) -> &[WorldPoint] {
        &self.path
    }

    pub fn pose(&self) -> AgentPose {
        self.agent.pose
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn state(&self) -> ExplorationState {
        self.state
    }

    /// Current exploration target, if any
    pub fn target(&self) -> Option<Target> {
        self.target
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Ticks run so far (paused calls excluded)
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Discovered fraction of the environment
    pub fn coverage(&self) -> f32 {
        self.grid.coverage()
    }

    /// Owned copy of the display state
    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            tick: self.tick,
            pose: self.agent.pose,
            state: self.state,
            mode: self.mode,
            paused: self.paused,
            grid: self.grid.clone(),
            virtual_walls: self.virtual_walls.clone(),
            path: self.path.clone(),
            target: self.target,
            coverage: self.grid.coverage(),
        }
    }
}
