use serde::{Deserialize, Serialize};

/// Cartesian point in the arm's plane
///
/// Serialized as a two-element array so scenario files read `start = [4.0, 4.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Distance from the arm base at the origin
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(&self, other: &Point2) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<[f64; 2]> for Point2 {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Point2> for [f64; 2] {
    fn from(p: Point2) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// One joint-angle tuple, shoulder first, in radians
pub type JointAngles = Vec<f64>;

/// Outcome of a planning run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResult {
    /// Via points of the winning chromosome, de-quantized and sorted by x
    pub via_points: Vec<Point2>,
    /// Discretized path from start to end, both included exactly
    pub path: Vec<Point2>,
    /// Fitness of the winning chromosome (0 when no feasible path was found)
    pub best_fitness: f64,
    /// Best fitness of each evolved generation
    pub fitness_history: Vec<f64>,
}

impl PlanResult {
    pub fn is_feasible(&self) -> bool {
        self.best_fitness > 0.0
    }
}
