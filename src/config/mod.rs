pub mod traits;
pub mod evolution;
pub mod scenario;
pub mod presets;
pub mod manager;

pub use manager::AppConfig;
pub use evolution::GaParams;
pub use scenario::Scenario;
pub use presets::preset_scenarios;
pub use traits::ConfigSection;
