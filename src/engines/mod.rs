pub mod evaluation;
pub mod generation;
pub mod kinematics;
pub mod trajectory;
