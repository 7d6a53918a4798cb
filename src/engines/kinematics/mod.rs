//! Planar forward and inverse kinematics for 2- and 3-link revolute arms.
//!
//! Angles are relative joint angles, shoulder first; the base sits at the
//! origin and the shoulder angle is measured from the +x axis.

pub mod three_link;
pub mod two_link;

pub use three_link::ThreeLinkArm;
pub use two_link::TwoLinkArm;

use crate::error::{KinematicsError, PlannerError};
use crate::types::{JointAngles, Point2};

/// Joint-space solver for one arm
///
/// Solvers may hold warm-start state between calls, so a fresh instance is
/// created for every path that is converted.
pub trait ArmSolver: Send {
    fn link_lengths(&self) -> &[f64];

    /// End-effector position for the given joint angles
    fn forward(&self, angles: &[f64]) -> Point2 {
        planar_forward(self.link_lengths(), angles)
    }

    fn inverse(&mut self, target: Point2) -> Result<JointAngles, KinematicsError>;

    /// Solve every point in order, carrying solver state from one to the next
    fn time_series(&mut self, points: &[Point2]) -> Result<Vec<JointAngles>, KinematicsError> {
        points.iter().map(|p| self.inverse(*p)).collect()
    }
}

/// Sum of rotated link vectors
pub fn planar_forward(lengths: &[f64], angles: &[f64]) -> Point2 {
    let mut phi = 0.0;
    let mut tip = Point2::new(0.0, 0.0);
    for (length, angle) in lengths.iter().zip(angles) {
        phi += angle;
        tip.x += length * phi.cos();
        tip.y += length * phi.sin();
    }
    tip
}

/// Validated link lengths of a planar arm
#[derive(Debug, Clone, PartialEq)]
pub struct LinkGeometry {
    lengths: Vec<f64>,
}

impl LinkGeometry {
    pub fn new(lengths: Vec<f64>) -> Result<Self, PlannerError> {
        if !(2..=3).contains(&lengths.len()) {
            return Err(PlannerError::Configuration(format!(
                "arm must have 2 or 3 links, got {}",
                lengths.len()
            )));
        }
        if lengths.iter().any(|l| !(l.is_finite() && *l > 0.0)) {
            return Err(PlannerError::Configuration(format!(
                "link lengths must be positive, got {:?}",
                lengths
            )));
        }
        Ok(Self { lengths })
    }

    pub fn lengths(&self) -> &[f64] {
        &self.lengths
    }

    pub fn link_count(&self) -> usize {
        self.lengths.len()
    }

    /// Full reach, `R1`
    pub fn outer_radius(&self) -> f64 {
        self.lengths.iter().sum()
    }

    /// Radius of the first link's own sweep; via points must lie beyond it
    pub fn inner_radius(&self) -> f64 {
        self.lengths[0]
    }

    /// Smallest reachable radius, `R2`
    pub fn annulus_inner_radius(&self) -> f64 {
        let rest: f64 = self.lengths[1..].iter().sum();
        (self.lengths[0] - rest).max(0.0)
    }

    /// Whether the via-point rules require the upper half-plane
    pub fn requires_upper_half_plane(&self) -> bool {
        self.link_count() == 2
    }

    /// Fresh solver for this arm, with no warm-start history
    pub fn solver(&self) -> Result<Box<dyn ArmSolver>, KinematicsError> {
        match self.lengths.as_slice() {
            [l1, l2] => Ok(Box::new(TwoLinkArm::new(*l1, *l2))),
            [l1, l2, l3] => Ok(Box::new(ThreeLinkArm::new([*l1, *l2, *l3]))),
            other => Err(KinematicsError::UnsupportedArity(other.len())),
        }
    }
}
