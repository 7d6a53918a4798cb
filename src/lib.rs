pub mod config;
pub mod engines;
pub mod error;
pub mod planner;
pub mod types;

pub use error::{PlannerError, Result};
pub use planner::{plan, plan_scenario, plan_with_progress};
pub use types::{JointAngles, PlanResult, Point2};
