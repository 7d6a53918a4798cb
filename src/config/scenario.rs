use super::traits::{invalid, ConfigSection};
use crate::engines::kinematics::LinkGeometry;
use crate::error::PlannerError;
use crate::types::Point2;
use serde::{Deserialize, Serialize};

/// Problem definition: arm, endpoints and obstacles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scenario {
    pub description: String,
    pub link_lengths: Vec<f64>,
    pub start: Point2,
    pub end: Point2,
    pub obstacles: Vec<Point2>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            description: "Single obstacle".to_string(),
            link_lengths: vec![4.0, 4.0],
            start: Point2::new(-4.0, 0.0),
            end: Point2::new(4.0, 0.0),
            obstacles: vec![Point2::new(0.0, 5.0)],
        }
    }
}

impl Scenario {
    pub fn geometry(&self) -> Result<LinkGeometry, PlannerError> {
        LinkGeometry::new(self.link_lengths.clone())
    }

    /// Horizontal distance between the endpoints
    pub fn x_span(&self) -> f64 {
        (self.end.x - self.start.x).abs()
    }
}

impl ConfigSection for Scenario {
    fn section_name() -> &'static str {
        "scenario"
    }

    fn validate(&self) -> Result<(), PlannerError> {
        let section = Self::section_name();
        self.geometry()?;
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(invalid(section, "start and end must be finite"));
        }
        if self.start.x == self.end.x {
            return Err(invalid(
                section,
                "start and end must differ in x; the path is a function of x",
            ));
        }
        if let Some(obstacle) = self.obstacles.iter().find(|o| !o.is_finite()) {
            return Err(invalid(section, format!("non-finite obstacle {:?}", obstacle)));
        }
        Ok(())
    }
}
