//! Collision-avoiding end-effector path planning for a planar arm.
//!
//! [`plan`] searches over via points with the genetic algorithm, scoring
//! each candidate by the joint effort of the smooth path through it, and
//! returns the winning via points together with the sampled path.

use crate::config::{AppConfig, GaParams, Scenario};
use crate::engines::evaluation::TrajectoryFitness;
use crate::engines::generation::{
    Chromosome, EvolutionConfig, EvolutionEngine, LogProgressCallback, ProgressCallback,
};
use crate::engines::kinematics::LinkGeometry;
use crate::error::Result;
use crate::types::{PlanResult, Point2};

/// Best distinct chromosomes remembered across generations
const HALL_OF_FAME_SIZE: usize = 5;

/// Plan a path from `start` to `end` that stays below every obstacle.
///
/// Fails only with a configuration error; infeasible candidates and solver
/// trouble during the run surface as zero fitness instead.
pub fn plan(
    link_lengths: &[f64],
    start: Point2,
    end: Point2,
    obstacles: &[Point2],
    params: &GaParams,
) -> Result<PlanResult> {
    plan_with_progress(
        link_lengths,
        start,
        end,
        obstacles,
        params,
        LogProgressCallback::new(params.generations),
    )
}

pub fn plan_scenario(scenario: &Scenario, params: &GaParams) -> Result<PlanResult> {
    plan(
        &scenario.link_lengths,
        scenario.start,
        scenario.end,
        &scenario.obstacles,
        params,
    )
}

pub fn plan_with_progress<C: ProgressCallback>(
    link_lengths: &[f64],
    start: Point2,
    end: Point2,
    obstacles: &[Point2],
    params: &GaParams,
    callback: C,
) -> Result<PlanResult> {
    let config = AppConfig {
        evolution: params.clone(),
        scenario: Scenario {
            description: String::new(),
            link_lengths: link_lengths.to_vec(),
            start,
            end,
            obstacles: obstacles.to_vec(),
        },
    };
    config.validate()?;
    let geometry = config.scenario.geometry()?;

    let via_points = params
        .via_points
        .unwrap_or_else(|| interior_obstacle_count(&geometry, obstacles) + 1);

    log::info!(
        "Planning {}-link arm from ({:.3}, {:.3}) to ({:.3}, {:.3}): {} obstacles, {} via points, {} x {} generations",
        geometry.link_count(),
        start.x,
        start.y,
        end.x,
        end.y,
        obstacles.len(),
        via_points,
        params.population_size,
        params.generations
    );

    let fitness = TrajectoryFitness::new(geometry.clone(), start, end, obstacles.to_vec(), params);
    let config = EvolutionConfig {
        population_size: params.population_size,
        generations: params.generations,
        via_points,
        encoding: *fitness.encoding(),
        mutation_rate: params.mutation_percent,
        crossover_rate: params.crossover_percent,
        init_annulus: (geometry.annulus_inner_radius(), geometry.outer_radius()),
        max_init_attempts: params.max_init_attempts,
        hall_of_fame_size: HALL_OF_FAME_SIZE,
        keep_best_seen: params.keep_best_seen,
        parallel: params.parallel,
        seed: params.seed,
    };

    let mut engine = EvolutionEngine::new(config, |c: &Chromosome| fitness.cost(c));
    let outcome = engine.run(callback)?;

    let via = fitness.via_points(&outcome.best);
    let path = match fitness.path(&via) {
        Some(path) => path,
        // Via points that share an x column have no path; fall back to the direct one
        None => fitness.path(&[]).unwrap_or_else(|| vec![start, end]),
    };

    if outcome.best_fitness > 0.0 {
        log::info!(
            "Best fitness {:.6} with {} path samples",
            outcome.best_fitness,
            path.len()
        );
    } else {
        log::warn!("No feasible path found; returning the least-bad candidate");
    }

    Ok(PlanResult {
        via_points: via,
        path,
        best_fitness: outcome.best_fitness,
        fitness_history: outcome.fitness_history,
    })
}

/// Obstacles strictly inside the reachable annulus; each one earns a via point
pub fn interior_obstacle_count(geometry: &LinkGeometry, obstacles: &[Point2]) -> usize {
    let inner = geometry.annulus_inner_radius();
    let outer = geometry.outer_radius();
    obstacles
        .iter()
        .filter(|o| {
            let r = o.norm();
            r > inner && r < outer
        })
        .count()
}
