pub mod environment;
pub mod grid;
pub mod pheromone;

pub use environment::Environment;
pub use grid::{GridSize, Position};
pub use pheromone::{PheromoneKind, PheromoneMode};
