use crate::engines::evaluation::{evaluate_population, FitnessFunction};
use crate::engines::generation::{
    chromosome::{Chromosome, Encoding},
    hall_of_fame::HallOfFame,
    operators::*,
};
use crate::error::PlannerError;
use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;

pub struct EvolutionConfig {
    pub population_size: usize,
    pub generations: usize,
    /// Via points per chromosome, `k`
    pub via_points: usize,
    pub encoding: Encoding,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    /// Open radius interval the initial via points are drawn from
    pub init_annulus: (f64, f64),
    pub max_init_attempts: usize,
    pub hall_of_fame_size: usize,
    /// Return the fittest chromosome of the whole run instead of the final
    /// population's argmax
    pub keep_best_seen: bool,
    pub parallel: bool,
    pub seed: Option<u64>,
}

/// Result of a completed run
#[derive(Debug, Clone)]
pub struct EvolutionOutcome {
    pub best: Chromosome,
    pub best_fitness: f64,
    /// Best fitness of every evaluated population, initial and final included
    pub fitness_history: Vec<f64>,
}

pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, feasible: usize);
}

/// Roulette-wheel genetic algorithm over quantized via-point chromosomes.
///
/// The engine only knows chromosomes and a cost capability; every random draw
/// happens here on the calling thread, so a fixed seed replays the run exactly
/// even when fitness is evaluated in parallel.
pub struct EvolutionEngine<F: FitnessFunction> {
    config: EvolutionConfig,
    fitness: F,
    hall_of_fame: HallOfFame,
    rng: StdRng,
}

impl<F: FitnessFunction> EvolutionEngine<F> {
    pub fn new(config: EvolutionConfig, fitness: F) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let hall_of_fame = HallOfFame::new(config.hall_of_fame_size);

        Self {
            config,
            fitness,
            hall_of_fame,
            rng,
        }
    }

    /// Run the evolution process for the configured number of generations
    pub fn run<C: ProgressCallback>(
        &mut self,
        mut callback: C,
    ) -> Result<EvolutionOutcome, PlannerError> {
        let mut population = self.initialize_population()?;
        let mut fitness_history = Vec::with_capacity(self.config.generations + 1);

        for generation in 0..self.config.generations {
            callback.on_generation_start(generation);

            let fitness = self.evaluate(&population, generation);
            let best_fitness = fitness.iter().copied().fold(0.0, f64::max);
            let feasible = fitness.iter().filter(|f| **f > 0.0).count();
            fitness_history.push(best_fitness);

            callback.on_generation_complete(generation, best_fitness, feasible);

            population = self.create_next_generation(&population, &fitness);
        }

        // Final scoring of the last offspring
        let fitness = self.evaluate(&population, self.config.generations);
        let (index, final_best) = argmax(&fitness);
        fitness_history.push(final_best);

        let (best, best_fitness) = match self.hall_of_fame.best() {
            Some(elite) if self.config.keep_best_seen && elite.fitness > final_best => {
                (elite.chromosome.clone(), elite.fitness)
            }
            _ => (population[index].clone(), final_best),
        };

        Ok(EvolutionOutcome {
            best,
            best_fitness,
            fitness_history,
        })
    }

    pub fn get_hall_of_fame(&self) -> &HallOfFame {
        &self.hall_of_fame
    }

    fn initialize_population(&mut self) -> Result<Vec<Chromosome>, PlannerError> {
        let (inner, outer) = self.config.init_annulus;
        if !(inner < outer) {
            return Err(PlannerError::Configuration(format!(
                "degenerate workspace annulus: inner radius {} is not below outer radius {}",
                inner, outer
            )));
        }

        let mut population = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size {
            let chromosome = random_chromosome(
                self.config.via_points,
                &self.config.encoding,
                self.config.init_annulus,
                self.config.max_init_attempts,
                &mut self.rng,
            )
            .ok_or_else(|| {
                PlannerError::Configuration(format!(
                    "no chromosome with {} via points inside the annulus ({}, {}) after {} draws",
                    self.config.via_points, inner, outer, self.config.max_init_attempts
                ))
            })?;
            population.push(chromosome);
        }
        log::debug!(
            "Sampled {} initial chromosomes of {} via points inside radius ({:.3}, {:.3})",
            population.len(),
            self.config.via_points,
            inner,
            outer
        );
        Ok(population)
    }

    fn evaluate(&mut self, population: &[Chromosome], generation: usize) -> Vec<f64> {
        let fitness = evaluate_population(&self.fitness, population, self.config.parallel);
        for (chromosome, value) in population.iter().zip(&fitness) {
            self.hall_of_fame.try_add(chromosome, *value, generation);
        }
        fitness
    }

    fn create_next_generation(
        &mut self,
        population: &[Chromosome],
        fitness: &[f64],
    ) -> Vec<Chromosome> {
        if fitness.iter().all(|f| *f <= 0.0) {
            log::warn!("No feasible chromosome in this generation; selecting uniformly");
        }
        let cdf = roulette_cdf(fitness);

        // One crossover locus shared by the whole generation
        let gene_count = 2 * self.config.via_points;
        let locus = if gene_count > 1 {
            self.rng.gen_range(1..gene_count)
        } else {
            gene_count
        };

        let mut next_generation = Vec::with_capacity(self.config.population_size);
        for _ in 0..self.config.population_size / 2 {
            let parent1 = &population[select_index(&cdf, self.rng.gen::<f64>())];
            let parent2 = &population[select_index(&cdf, self.rng.gen::<f64>())];

            if self.rng.gen::<f64>() < self.config.crossover_rate {
                let (child1, child2) = crossover(parent1, parent2, locus);
                next_generation.push(child1);
                next_generation.push(child2);
            } else {
                next_generation.push(parent1.clone());
                next_generation.push(parent2.clone());
            }
        }

        let bit_width = self.config.encoding.bit_width();
        for child in next_generation.iter_mut() {
            if self.rng.gen::<f64>() < self.config.mutation_rate {
                mutate(child, bit_width, &mut self.rng);
            }
        }

        next_generation
    }
}

/// Index and value of the first maximum; fitness is never negative
fn argmax(values: &[f64]) -> (usize, f64) {
    values
        .iter()
        .enumerate()
        .fold((0, 0.0), |best, (i, &v)| if v > best.1 { (i, v) } else { best })
}
