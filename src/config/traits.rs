use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// Trait for configuration sections
pub trait ConfigSection: Serialize + for<'de> Deserialize<'de> + Default + Clone {
    fn section_name() -> &'static str;
    fn validate(&self) -> Result<(), PlannerError>;
}

/// Shorthand for the configuration failures every section reports
pub(crate) fn invalid(section: &str, message: impl std::fmt::Display) -> PlannerError {
    PlannerError::Configuration(format!("[{}] {}", section, message))
}
