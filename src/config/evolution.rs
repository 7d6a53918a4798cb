use super::traits::{invalid, ConfigSection};
use crate::error::PlannerError;
use serde::{Deserialize, Serialize};

/// Genetic-algorithm parameters for one planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaParams {
    pub population_size: usize,
    pub mutation_percent: f64,
    pub crossover_percent: f64,
    pub generations: usize,
    /// Per-joint cost weights, shoulder first
    pub mu: Vec<f64>,
    /// Cartesian arc length between consecutive path samples
    pub epsilon: f64,
    pub seed: Option<u64>,
    /// Bits per quantized coordinate
    pub bit_width: u32,
    /// Overrides the via-point count derived from the obstacles
    pub via_points: Option<usize>,
    /// Rejection-sampling draws allowed per initial chromosome
    pub max_init_attempts: usize,
    /// Largest forward-kinematics residual accepted from the numeric solver
    pub ik_tolerance: f64,
    /// Return the fittest chromosome of the whole run rather than the final
    /// generation's best
    pub keep_best_seen: bool,
    pub parallel: bool,
}

impl Default for GaParams {
    fn default() -> Self {
        Self {
            population_size: 120,
            mutation_percent: 0.05,
            crossover_percent: 1.0,
            generations: 500,
            mu: vec![1.0, 1.0],
            epsilon: 0.05,
            seed: None,
            bit_width: 12,
            via_points: None,
            max_init_attempts: 100_000,
            ik_tolerance: 1e-3,
            keep_best_seen: false,
            parallel: true,
        }
    }
}

impl ConfigSection for GaParams {
    fn section_name() -> &'static str {
        "evolution"
    }

    fn validate(&self) -> Result<(), PlannerError> {
        let section = Self::section_name();
        if self.population_size == 0 || self.population_size % 2 != 0 {
            return Err(invalid(
                section,
                format!(
                    "population_size must be a positive even number, got {}",
                    self.population_size
                ),
            ));
        }
        if self.generations == 0 {
            return Err(invalid(section, "generations must be positive"));
        }
        if !(0.0..=1.0).contains(&self.mutation_percent) {
            return Err(invalid(section, "mutation_percent must be between 0 and 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_percent) {
            return Err(invalid(section, "crossover_percent must be between 0 and 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(invalid(section, "epsilon must be a positive finite number"));
        }
        if self.mu.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(invalid(section, "mu weights must be finite and non-negative"));
        }
        if !self.mu.iter().any(|w| *w > 0.0) {
            return Err(invalid(section, "at least one mu weight must be positive"));
        }
        if !(1..=16).contains(&self.bit_width) {
            return Err(invalid(
                section,
                format!("bit_width must be between 1 and 16, got {}", self.bit_width),
            ));
        }
        if self.via_points == Some(0) {
            return Err(invalid(section, "via_points override must be positive"));
        }
        if self.max_init_attempts == 0 {
            return Err(invalid(section, "max_init_attempts must be positive"));
        }
        if !(self.ik_tolerance.is_finite() && self.ik_tolerance > 0.0) {
            return Err(invalid(section, "ik_tolerance must be a positive finite number"));
        }
        Ok(())
    }
}
