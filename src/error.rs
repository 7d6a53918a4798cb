use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Kinematics error: {0}")]
    Kinematics(#[from] KinematicsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config source error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Failures of a single inverse-kinematics query.
///
/// These never escape a planning run: the fitness evaluator turns them into
/// an infeasible (zero fitness) chromosome.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KinematicsError {
    #[error("Target ({x:.4}, {y:.4}) is outside the reachable annulus")]
    Unreachable { x: f64, y: f64 },

    #[error("No solver for an arm with {0} links")]
    UnsupportedArity(usize),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
