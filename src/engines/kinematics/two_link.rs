use super::ArmSolver;
use crate::error::KinematicsError;
use crate::types::{JointAngles, Point2};

/// Slack allowed on |D| before a target counts as unreachable, absorbing
/// rounding for points on the annulus boundary
const BOUNDARY_SLACK: f64 = 1e-12;

/// Closed-form two-link arm; the elbow angle is kept in `[0, π]`
#[derive(Debug, Clone)]
pub struct TwoLinkArm {
    lengths: [f64; 2],
}

impl TwoLinkArm {
    pub fn new(l1: f64, l2: f64) -> Self {
        Self { lengths: [l1, l2] }
    }
}

/// Division that resolves a zero denominator to a signed infinity
fn guarded_div(numerator: f64, denominator: f64) -> f64 {
    if denominator != 0.0 {
        numerator / denominator
    } else if numerator > 0.0 {
        f64::INFINITY
    } else {
        f64::NEG_INFINITY
    }
}

impl ArmSolver for TwoLinkArm {
    fn link_lengths(&self) -> &[f64] {
        &self.lengths
    }

    fn inverse(&mut self, target: Point2) -> Result<JointAngles, KinematicsError> {
        let [l1, l2] = self.lengths;
        let Point2 { x, y } = target;

        let d = guarded_div(x * x + y * y - l1 * l1 - l2 * l2, 2.0 * l1 * l2);
        // Also catches NaN coming from non-finite targets
        if !(d.abs() <= 1.0 + BOUNDARY_SLACK) {
            return Err(KinematicsError::Unreachable { x, y });
        }
        let d = d.clamp(-1.0, 1.0);

        // Non-negative root keeps the elbow in [0, π]
        let theta2 = (1.0 - d * d).sqrt().atan2(d);
        let theta1 = y.atan2(x) - (l2 * theta2.sin()).atan2(l1 + l2 * theta2.cos());

        Ok(vec![theta1, theta2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_close(a: Point2, b: Point2, tol: f64) {
        assert!(
            a.distance(&b) < tol,
            "expected {:?} to be within {} of {:?}",
            a,
            tol,
            b
        );
    }

    #[test]
    fn test_forward_known_pose() {
        let arm = TwoLinkArm::new(4.0, 4.0);
        assert_close(arm.forward(&[0.0, 0.0]), Point2::new(8.0, 0.0), 1e-12);
        assert_close(arm.forward(&[FRAC_PI_2, -FRAC_PI_2]), Point2::new(4.0, 4.0), 1e-12);
    }

    #[test]
    fn test_round_trip_over_reachable_disc() {
        let mut arm = TwoLinkArm::new(4.0, 4.0);
        for r in [0.05, 0.5, 1.0, 2.5, 4.0, 5.5, 7.0, 7.99] {
            for step in 0..16 {
                let phi = -PI + step as f64 * PI / 8.0;
                let target = Point2::new(r * phi.cos(), r * phi.sin());
                let angles = arm.inverse(target).unwrap();
                assert_close(arm.forward(&angles), target, 1e-6);
            }
        }
    }

    #[test]
    fn test_elbow_angle_non_negative() {
        let mut arm = TwoLinkArm::new(4.0, 3.0);
        for target in [Point2::new(-5.0, 3.0), Point2::new(4.0, 4.0), Point2::new(2.0, -3.0)] {
            let angles = arm.inverse(target).unwrap();
            assert!((0.0..=PI).contains(&angles[1]));
        }
    }

    #[test]
    fn test_unreachable_target() {
        let mut arm = TwoLinkArm::new(4.0, 3.0);
        assert_eq!(
            arm.inverse(Point2::new(8.0, 0.0)),
            Err(KinematicsError::Unreachable { x: 8.0, y: 0.0 })
        );
        // Inside the inner radius L1 - L2
        assert!(arm.inverse(Point2::new(0.5, 0.0)).is_err());
        assert!(arm.inverse(Point2::new(f64::NAN, 0.0)).is_err());
    }

    #[test]
    fn test_guarded_div() {
        assert_eq!(guarded_div(1.0, 0.0), f64::INFINITY);
        assert_eq!(guarded_div(-1.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(guarded_div(0.0, 0.0), f64::NEG_INFINITY);
        assert_eq!(guarded_div(3.0, 2.0), 1.5);
    }

    #[test]
    fn test_time_series_in_order() {
        let mut arm = TwoLinkArm::new(4.0, 4.0);
        let points = [Point2::new(2.0, 2.0), Point2::new(3.0, 3.0), Point2::new(4.0, 4.0)];
        let series = arm.time_series(&points).unwrap();
        assert_eq!(series.len(), 3);
        for (angles, point) in series.iter().zip(points) {
            assert_close(arm.forward(angles), point, 1e-9);
        }
    }
}
