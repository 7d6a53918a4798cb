pub mod interpolation;
pub mod path_builder;

pub use interpolation::MonotoneCubic;
pub use path_builder::{check_point_validity, discretize, format, generate_trajectory, ordered_ends};
