use super::evolution_engine::ProgressCallback;

/// Reports generation summaries through the `log` facade
pub struct LogProgressCallback {
    total_generations: usize,
    report_every: usize,
}

impl LogProgressCallback {
    pub fn new(total_generations: usize) -> Self {
        Self {
            total_generations,
            report_every: (total_generations / 20).max(1),
        }
    }
}

impl ProgressCallback for LogProgressCallback {
    fn on_generation_start(&mut self, generation: usize) {
        log::trace!("Generation {} starting", generation + 1);
    }

    fn on_generation_complete(&mut self, generation: usize, best_fitness: f64, feasible: usize) {
        let done = generation + 1;
        if done % self.report_every == 0 || done >= self.total_generations {
            log::info!(
                "Generation {}/{} - best fitness {:.6}, {} feasible",
                done,
                self.total_generations,
                best_fitness,
                feasible
            );
        } else {
            log::debug!(
                "Generation {} - best fitness {:.6}, {} feasible",
                done,
                best_fitness,
                feasible
            );
        }
    }
}

/// Silent callback
pub struct NoProgress;

impl ProgressCallback for NoProgress {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best_fitness: f64, _feasible: usize) {}
}
