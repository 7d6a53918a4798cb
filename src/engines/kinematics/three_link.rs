use super::ArmSolver;
use crate::error::KinematicsError;
use crate::types::{JointAngles, Point2};
use nalgebra::{Matrix2, Matrix2x3, Matrix3, Vector2, Vector3};
use std::f64::consts::{FRAC_PI_4, PI, TAU};

const MAX_ITERATIONS: usize = 100;
const MAX_RESTORE_ITERATIONS: usize = 50;
/// Tip error at which restoration stops refining
const FEASIBILITY_TOL: f64 = 1e-12;
/// Tip error a restored pose may keep and still count as on target
const ACCEPT_TOL: f64 = 1e-9;
/// Stationarity threshold on the objective's slope along the constraint curve
const GRADIENT_TOL: f64 = 1e-9;
/// Largest joint move, in radians, per restoration or tangent step
const MAX_STEP: f64 = 0.5;
const MIN_STEP: f64 = 1e-14;
const ARMIJO: f64 = 1e-4;
const DAMPING: f64 = 1e-12;

/// Map an angle into `(-π, π]`
pub fn wrap_angle(angle: f64) -> f64 {
    let shifted = (angle + PI).rem_euclid(TAU);
    if shifted == 0.0 {
        PI
    } else {
        shifted - PI
    }
}

/// Three-link arm solved by constrained minimisation
///
/// Among all joint configurations whose tip lands on the target, `inverse`
/// picks the one closest (weighted) to a fixed reference pose. The target
/// pins two of the three joints, so the feasible poses form a curve; the
/// solver pulls the previous solution onto that curve and then descends
/// along it, which keeps successive points of a path on the same branch.
#[derive(Debug, Clone)]
pub struct ThreeLinkArm {
    lengths: [f64; 3],
    reference: Vector3<f64>,
    weights: Vector3<f64>,
    current: Vector3<f64>,
}

impl ThreeLinkArm {
    pub fn new(lengths: [f64; 3]) -> Self {
        Self {
            lengths,
            reference: Vector3::new(FRAC_PI_4, FRAC_PI_4, FRAC_PI_4),
            // Wrist moves are penalised harder than shoulder and elbow
            weights: Vector3::new(1.0, 1.0, 1.3),
            current: Vector3::new(0.3, 0.3, 0.0),
        }
    }

    /// Angles the next `inverse` call starts from
    pub fn current_pose(&self) -> JointAngles {
        self.current.iter().copied().collect()
    }

    fn objective(&self, q: &Vector3<f64>) -> f64 {
        let delta = q - self.reference;
        self.weights.component_mul(&delta).dot(&delta)
    }

    fn gradient(&self, q: &Vector3<f64>) -> Vector3<f64> {
        2.0 * self.weights.component_mul(&(q - self.reference))
    }

    /// Cumulative link orientations
    fn orientations(q: &Vector3<f64>) -> [f64; 3] {
        [q.x, q.x + q.y, q.x + q.y + q.z]
    }

    /// Tip position minus target
    fn violation(&self, q: &Vector3<f64>, target: Point2) -> Vector2<f64> {
        let phi = Self::orientations(q);
        let mut tip = Vector2::zeros();
        for (length, angle) in self.lengths.iter().zip(phi) {
            tip.x += length * angle.cos();
            tip.y += length * angle.sin();
        }
        tip - Vector2::new(target.x, target.y)
    }

    fn jacobian(&self, q: &Vector3<f64>) -> Matrix2x3<f64> {
        let phi = Self::orientations(q);
        Matrix2x3::from_fn(|row, joint| {
            (joint..3)
                .map(|i| match row {
                    0 => -self.lengths[i] * phi[i].sin(),
                    _ => self.lengths[i] * phi[i].cos(),
                })
                .sum()
        })
    }

    /// Hessian of `λ·c(q)`; entry (a, b) only involves links beyond both joints
    fn constraint_curvature(&self, q: &Vector3<f64>, lambda: &Vector2<f64>) -> Matrix3<f64> {
        let phi = Self::orientations(q);
        Matrix3::from_fn(|a, b| {
            (a.max(b)..3)
                .map(|i| {
                    -self.lengths[i] * (lambda.x * phi[i].cos() + lambda.y * phi[i].sin())
                })
                .sum()
        })
    }

    /// Minimum-norm Gauss-Newton onto the constraint curve.
    ///
    /// Returns the pose with the smallest tip error seen and that error; for an
    /// unreachable target this is the closest the arm gets.
    fn restore(&self, start: Vector3<f64>, target: Point2) -> (Vector3<f64>, f64) {
        let mut q = start;
        let mut best = (q, self.violation(&q, target).norm());

        for _ in 0..MAX_RESTORE_ITERATIONS {
            let violation = self.violation(&q, target);
            let error = violation.norm();
            if error < best.1 {
                best = (q, error);
            }
            if error <= FEASIBILITY_TOL {
                break;
            }

            let jacobian = self.jacobian(&q);
            let gram = jacobian * jacobian.transpose() + Matrix2::identity() * DAMPING;
            let Some(gram_inv) = gram.try_inverse() else {
                break;
            };
            let mut step = -(jacobian.transpose() * (gram_inv * violation));
            let largest = step.amax();
            if !largest.is_finite() || largest < MIN_STEP {
                break;
            }
            if largest > MAX_STEP {
                step *= MAX_STEP / largest;
            }
            q += step;
        }

        let error = self.violation(&q, target).norm();
        if error < best.1 {
            best = (q, error);
        }
        best
    }

    /// Local minimiser of the objective on the constraint curve, starting
    /// from the current pose. Angles come back wrapped into `(-π, π]`.
    fn solve(&self, target: Point2) -> Vector3<f64> {
        let (mut q, error) = self.restore(self.current.map(wrap_angle), target);
        if error > ACCEPT_TOL {
            log::debug!(
                "three-link target ({:.4}, {:.4}) out of reach; closest tip error {:.3e}",
                target.x,
                target.y,
                error
            );
            return q.map(wrap_angle);
        }

        let mut converged = false;
        for _ in 0..MAX_ITERATIONS {
            let jacobian = self.jacobian(&q);
            let gradient = self.gradient(&q);

            // The constraint curve's direction is orthogonal to both Jacobian rows
            let tangent = jacobian
                .row(0)
                .transpose()
                .cross(&jacobian.row(1).transpose());
            let length = tangent.norm();
            if length < 1e-12 {
                break;
            }
            let tangent = tangent / length;

            let slope = gradient.dot(&tangent);
            if slope.abs() < GRADIENT_TOL {
                converged = true;
                break;
            }

            // Least-squares multipliers give the Lagrangian curvature along the curve
            let Some(gram_inv) = (jacobian * jacobian.transpose()).try_inverse() else {
                break;
            };
            let lambda = -(gram_inv * (jacobian * gradient));
            let hessian = Matrix3::from_diagonal(&(2.0 * self.weights))
                + self.constraint_curvature(&q, &lambda);
            let curvature = tangent.dot(&(hessian * tangent));

            let mut step = if curvature > 0.0 {
                -slope / curvature
            } else {
                -MAX_STEP.copysign(slope)
            };
            step = step.clamp(-MAX_STEP, MAX_STEP);

            let current = self.objective(&q);
            let mut accepted = None;
            while step.abs() > MIN_STEP {
                let (candidate, error) = self.restore(q + tangent * step, target);
                if error <= ACCEPT_TOL
                    && self.objective(&candidate) <= current + ARMIJO * step * slope
                {
                    accepted = Some(candidate);
                    break;
                }
                step *= 0.5;
            }

            let Some(next) = accepted else {
                break;
            };
            q = next;
        }

        if !converged {
            log::debug!(
                "three-link solver stopped short of stationarity at ({:.4}, {:.4})",
                target.x,
                target.y
            );
        }
        q.map(wrap_angle)
    }
}

impl ArmSolver for ThreeLinkArm {
    fn link_lengths(&self) -> &[f64] {
        &self.lengths
    }

    fn inverse(&mut self, target: Point2) -> Result<JointAngles, KinematicsError> {
        if !target.is_finite() {
            return Err(KinematicsError::Unreachable { x: target.x, y: target.y });
        }
        self.current = self.solve(target);
        Ok(self.current_pose())
    }
}
