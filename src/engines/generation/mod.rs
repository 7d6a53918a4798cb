pub mod chromosome;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;

pub use chromosome::{Chromosome, Encoding};
pub use hall_of_fame::{EliteChromosome, HallOfFame};
pub use evolution_engine::{EvolutionConfig, EvolutionEngine, EvolutionOutcome, ProgressCallback};
pub use progress::{LogProgressCallback, NoProgress};
