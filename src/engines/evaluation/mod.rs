pub mod fitness;

pub use fitness::{
    clears_obstacles, evaluate_population, fitness_from_cost, joint_cost, FitnessFunction,
    TrajectoryFitness,
};
