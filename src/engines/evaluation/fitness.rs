use crate::config::GaParams;
use crate::engines::generation::chromosome::{Chromosome, Encoding};
use crate::engines::kinematics::LinkGeometry;
use crate::engines::trajectory::{
    check_point_validity, discretize, format, generate_trajectory, MonotoneCubic,
};
use crate::types::{JointAngles, Point2};
use rayon::prelude::*;

/// Cost capability the evolution engine is driven by.
///
/// Lower is better; `f64::INFINITY` marks an infeasible chromosome.
pub trait FitnessFunction: Sync {
    fn cost(&self, chromosome: &Chromosome) -> f64;
}

impl<T> FitnessFunction for T
where
    T: Fn(&Chromosome) -> f64 + Sync,
{
    fn cost(&self, chromosome: &Chromosome) -> f64 {
        self(chromosome)
    }
}

/// `1 / cost`, floored to 0 for infeasible or degenerate costs
pub fn fitness_from_cost(cost: f64) -> f64 {
    let fitness = 1.0 / cost;
    if fitness.is_finite() && fitness > 0.0 {
        fitness
    } else {
        0.0
    }
}

/// Fitness of every chromosome, in population order
pub fn evaluate_population<F: FitnessFunction + ?Sized>(
    fitness: &F,
    population: &[Chromosome],
    parallel: bool,
) -> Vec<f64> {
    if parallel {
        population
            .par_iter()
            .map(|c| fitness_from_cost(fitness.cost(c)))
            .collect()
    } else {
        population
            .iter()
            .map(|c| fitness_from_cost(fitness.cost(c)))
            .collect()
    }
}

/// False if the path runs above any obstacle inside its x-span
pub fn clears_obstacles(interpolant: &MonotoneCubic, obstacles: &[Point2]) -> bool {
    let (low, high) = interpolant.domain();
    obstacles
        .iter()
        .filter(|o| o.x >= low && o.x <= high)
        .all(|o| interpolant.evaluate(o.x) <= o.y)
}

/// Weighted joint-angle effort over all but the last two samples
pub fn joint_cost(series: &[JointAngles], mu: &[f64]) -> f64 {
    let counted = series.len().saturating_sub(2);
    series[..counted]
        .iter()
        .map(|angles| {
            angles
                .iter()
                .zip(mu)
                .map(|(theta, weight)| weight * theta.abs())
                .sum::<f64>()
        })
        .sum()
}

/// Scores via-point chromosomes for one arm, endpoint pair and obstacle set
#[derive(Debug, Clone)]
pub struct TrajectoryFitness {
    geometry: LinkGeometry,
    start: Point2,
    end: Point2,
    obstacles: Vec<Point2>,
    mu: Vec<f64>,
    epsilon: f64,
    ik_tolerance: f64,
    encoding: Encoding,
}

impl TrajectoryFitness {
    pub fn new(
        geometry: LinkGeometry,
        start: Point2,
        end: Point2,
        obstacles: Vec<Point2>,
        params: &GaParams,
    ) -> Self {
        let encoding = Encoding::new(params.bit_width, geometry.outer_radius());
        Self {
            geometry,
            start,
            end,
            obstacles,
            mu: params.mu.clone(),
            epsilon: params.epsilon,
            ik_tolerance: params.ik_tolerance,
            encoding,
        }
    }

    pub fn encoding(&self) -> &Encoding {
        &self.encoding
    }

    /// De-quantized via points, sorted by x
    pub fn via_points(&self, chromosome: &Chromosome) -> Vec<Point2> {
        format(&self.encoding.decode_all(chromosome))
    }

    /// Discretized path through the via points, or `None` if they are not
    /// strictly increasing in x
    pub fn path(&self, via_points: &[Point2]) -> Option<Vec<Point2>> {
        let interpolant = generate_trajectory(via_points, self.start, self.end)?;
        Some(discretize(&interpolant, self.start, self.end, self.epsilon))
    }

    /// Full pipeline for already-sorted via points
    pub fn trajectory_cost(&self, via_points: &[Point2]) -> f64 {
        if !check_point_validity(via_points, &self.geometry, self.start, self.end) {
            return f64::INFINITY;
        }
        let Some(interpolant) = generate_trajectory(via_points, self.start, self.end) else {
            return f64::INFINITY;
        };
        if !clears_obstacles(&interpolant, &self.obstacles) {
            return f64::INFINITY;
        }

        let samples = discretize(&interpolant, self.start, self.end, self.epsilon);

        // Fresh solver per path: warm-start state never leaks between chromosomes
        let Ok(mut solver) = self.geometry.solver() else {
            return f64::INFINITY;
        };
        let Ok(series) = solver.time_series(&samples) else {
            return f64::INFINITY;
        };
        let off_target = series
            .iter()
            .zip(&samples)
            .any(|(angles, point)| !(solver.forward(angles).distance(point) <= self.ik_tolerance));
        if off_target {
            return f64::INFINITY;
        }

        joint_cost(&series, &self.mu)
    }

    pub fn cost(&self, chromosome: &Chromosome) -> f64 {
        self.trajectory_cost(&self.via_points(chromosome))
    }

    /// Fitness vector for a population
    pub fn evaluate(&self, population: &[Chromosome], parallel: bool) -> Vec<f64> {
        evaluate_population(&|c: &Chromosome| self.cost(c), population, parallel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_fitness(obstacles: Vec<Point2>) -> TrajectoryFitness {
        TrajectoryFitness::new(
            LinkGeometry::new(vec![4.0, 4.0]).unwrap(),
            Point2::new(-4.0, 0.0),
            Point2::new(4.0, 0.0),
            obstacles,
            &GaParams {
                mu: vec![1.0, 1.0],
                epsilon: 0.05,
                ..Default::default()
            },
        )
    }

    fn chromosome_at(fitness: &TrajectoryFitness, points: &[(f64, f64)]) -> Chromosome {
        let encoding = fitness.encoding();
        Chromosome::new(
            points
                .iter()
                .flat_map(|&(x, y)| [encoding.encode(x), encoding.encode(y)])
                .collect(),
        )
    }

    #[test]
    fn test_fitness_from_cost() {
        assert_eq!(fitness_from_cost(f64::INFINITY), 0.0);
        assert_eq!(fitness_from_cost(f64::NAN), 0.0);
        assert_eq!(fitness_from_cost(0.0), 0.0);
        assert_eq!(fitness_from_cost(4.0), 0.25);
    }

    #[test]
    fn test_valid_chromosome_scores_positive() {
        let fitness = scenario_fitness(vec![Point2::new(0.0, 5.0)]);
        let chromosome = chromosome_at(&fitness, &[(0.0, 4.5)]);
        let scores = fitness.evaluate(&[chromosome], false);
        assert!(scores[0] > 0.0);
    }

    #[test]
    fn test_invalid_chromosomes_score_zero() {
        let fitness = scenario_fitness(vec![Point2::new(0.0, 5.0)]);
        let population = vec![
            // Passes above the obstacle
            chromosome_at(&fitness, &[(0.0, 6.0)]),
            // Inside the first link's sweep
            chromosome_at(&fitness, &[(0.0, 2.0)]),
            // Outside the endpoints' x-span
            chromosome_at(&fitness, &[(6.0, 3.0)]),
            // Below the x axis
            chromosome_at(&fitness, &[(0.0, -5.0)]),
        ];
        assert_eq!(fitness.evaluate(&population, false), vec![0.0; 4]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let fitness = scenario_fitness(vec![Point2::new(0.0, 5.0)]);
        let population: Vec<Chromosome> = [(0.0, 4.5), (-1.0, 4.6), (1.5, 4.4), (0.0, 6.0)]
            .iter()
            .map(|&p| chromosome_at(&fitness, &[p]))
            .collect();
        let sequential = fitness.evaluate(&population, false);
        let parallel = fitness.evaluate(&population, true);
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_obstacles_outside_span_ignored() {
        let spline = generate_trajectory(
            &[Point2::new(0.0, 4.5)],
            Point2::new(-4.0, 0.0),
            Point2::new(4.0, 0.0),
        )
        .unwrap();
        assert!(clears_obstacles(&spline, &[Point2::new(6.0, -1.0)]));
        assert!(!clears_obstacles(&spline, &[Point2::new(0.0, 4.0)]));
    }

    #[test]
    fn test_joint_cost_skips_last_two_samples() {
        let series = vec![vec![1.0, -2.0], vec![0.5, 0.5], vec![9.0, 9.0], vec![9.0, 9.0]];
        assert_eq!(joint_cost(&series, &[1.0, 2.0]), 5.0 + 1.5);
        assert_eq!(joint_cost(&series[..2], &[1.0, 2.0]), 0.0);
    }

    #[test]
    fn test_three_link_pipeline_scores_positive() {
        let fitness = TrajectoryFitness::new(
            LinkGeometry::new(vec![2.0, 1.5, 1.0]).unwrap(),
            Point2::new(3.0, 1.0),
            Point2::new(-3.0, 1.0),
            Vec::new(),
            &GaParams {
                mu: vec![1.0, 1.0, 1.0],
                epsilon: 0.1,
                ..Default::default()
            },
        );
        let chromosome = chromosome_at(&fitness, &[(0.0, 3.0)]);
        assert!(fitness.evaluate(&[chromosome], false)[0] > 0.0);
    }
}
