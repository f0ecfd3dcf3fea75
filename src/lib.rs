//! # Ant Colony
//!
//! A foraging ant colony on a toroidal grid.
//!
//! Ants search for food, lay pheromone trails, carry food home to the queen,
//! and the colony turns stored food into eggs that hatch into new ants. One
//! seeded random source drives every stochastic rule, so a seed and a config
//! fully determine a run.

pub mod ant;
pub mod cli;
pub mod colony;
pub mod config;
pub mod direction;
pub mod error;
pub mod simulation;
pub mod world;

pub use ant::{Ant, AntId, AntState, AntStatus};
pub use cli::Args;
pub use colony::{Colony, Queen};
pub use config::SimulationConfig;
pub use direction::Direction;
pub use error::{ConfigError, Result};
pub use simulation::{SimulationEngine, SimulationState, SimulationStats};
pub use world::{Environment, GridSize, PheromoneKind, PheromoneMode, Position};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        Ant, AntId, Args, Colony, ConfigError, Environment, Position, Result, SimulationConfig,
        SimulationEngine, SimulationState, SimulationStats,
    };
}
