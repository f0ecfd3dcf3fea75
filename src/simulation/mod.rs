pub mod engine;
pub mod stats;

pub use engine::{SimulationEngine, SimulationState};
pub use stats::SimulationStats;
