use super::{evolution::GaParams, scenario::Scenario, traits::ConfigSection};
use crate::error::PlannerError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for overrides, e.g. `ARMTRAJ_EVOLUTION__GENERATIONS=50`
pub const ENV_PREFIX: &str = "ARMTRAJ";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: GaParams,
    pub scenario: Scenario,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), PlannerError> {
        self.evolution.validate()?;
        self.scenario.validate()?;
        if self.evolution.mu.len() != self.scenario.link_lengths.len() {
            return Err(PlannerError::Configuration(format!(
                "[{}] mu has {} weights but the arm has {} links",
                GaParams::section_name(),
                self.evolution.mu.len(),
                self.scenario.link_lengths.len()
            )));
        }
        // Paths need a sample between the endpoints or their cost is empty
        if self.evolution.epsilon >= self.scenario.x_span() {
            return Err(PlannerError::Configuration(format!(
                "[{}] epsilon {} must be shorter than the x distance {} between start and end",
                GaParams::section_name(),
                self.evolution.epsilon,
                self.scenario.x_span()
            )));
        }
        Ok(())
    }

    /// Load a TOML file, layering environment overrides on top
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, PlannerError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).format(FileFormat::Toml))
            .add_source(env_source())
            .build()?;
        Self::finish(settings)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, PlannerError> {
        let settings = Config::builder()
            .add_source(File::from_str(contents, FileFormat::Toml))
            .build()?;
        Self::finish(settings)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), PlannerError> {
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    fn finish(settings: Config) -> Result<Self, PlannerError> {
        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

fn env_source() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}
