//! Error types.
//!
//! [`Error`] covers construction-time failures: reading or parsing a config
//! file and rejecting invalid parameters or environments. Nothing that happens
//! during a tick is an error; recoverable runtime conditions are reported as
//! [`Anomaly`] values in the tick report and the engine retries next tick.

use crate::core::WorldPoint;

/// Construction-time error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failed to read a configuration file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse YAML
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// A configuration value is out of range
    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted field path, e.g. `grid.cell_size`
        field: &'static str,
        /// Human-readable constraint that was violated
        reason: String,
    },

    /// The environment cannot be explored as given
    #[error("Invalid environment: {0}")]
    InvalidEnvironment(String),
}

/// Result type alias for engine construction
pub type Result<T> = std::result::Result<T, Error>;

/// Recoverable condition observed during a tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Anomaly {
    /// A* exhausted its open set; the target is currently unreachable
    PathNotFound {
        /// Query start
        from: WorldPoint,
        /// Query goal
        to: WorldPoint,
    },

    /// A contour walk could not return to its start; an open wall was emitted
    DegenerateContour {
        /// Component label of the undiscovered region
        component: u32,
        /// Number of cells the walk visited
        cells: usize,
    },

    /// A translation along the path hit a solid wall and was cancelled
    PathBlocked {
        /// Agent position when the move was refused
        at: WorldPoint,
    },
}

impl Anomaly {
    /// Short code for logging
    pub fn code(&self) -> &'static str {
        match self {
            Anomaly::PathNotFound { .. } => "PATH_NOT_FOUND",
            Anomaly::DegenerateContour { .. } => "DEGENERATE_CONTOUR",
            Anomaly::PathBlocked { .. } => "PATH_BLOCKED",
        }
    }
}

impl std::fmt::Display for Anomaly {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Anomaly::PathNotFound { from, to } => write!(
                f,
                "no path from ({:.1},{:.1}) to ({:.1},{:.1})",
                from.x, from.y, to.x, to.y
            ),
            Anomaly::DegenerateContour { component, cells } => {
                write!(f, "open contour for component {} ({} cells)", component, cells)
            }
            Anomaly::PathBlocked { at } => write!(f, "move blocked at ({:.1},{:.1})", at.x, at.y),
        }
    }
}
