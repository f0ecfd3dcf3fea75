use crate::ant::{Ant, AntId, AntStatus};
use crate::colony::{Colony, Queen};
use crate::config::SimulationConfig;
use crate::simulation::stats::SimulationStats;
use crate::world::{Environment, Position};
use std::collections::BTreeMap;
use tracing::{debug, info, trace};

/// Everything that changes while the simulation runs
#[derive(Clone, Debug)]
pub struct SimulationState {
    /// Simulated time elapsed so far
    pub current_time: f64,
    pub environment: Environment,
    pub colony: Colony,
    /// Positions visited by each live ant, oldest first
    pub ant_paths: BTreeMap<AntId, Vec<Position>>,
}

impl SimulationState {
    /// Read-only snapshot for reporting
    pub fn stats(&self) -> SimulationStats {
        SimulationStats {
            ant_count: self.colony.ant_count(),
            egg_count: self.colony.egg_count(),
            food_store: self.colony.food_store(),
            food_on_grid: self.environment.total_food(),
            ant_paths: self.ant_paths.clone(),
            queen_position: self.colony.queen().position,
            elapsed_time: self.current_time,
        }
    }
}

/// Drives the tick loop for one configuration
pub struct SimulationEngine {
    config: SimulationConfig,
}

impl SimulationEngine {
    /// Create an engine for an already validated config
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    /// Fresh state: empty grid, queen in the central half, ants scattered uniformly
    pub fn initialize(&self, rng: &mut fastrand::Rng) -> SimulationState {
        let grid = self.config.grid();
        let queen = Queen::new(Position::new(
            rng.usize(grid.width / 4..=3 * grid.width / 4),
            rng.usize(grid.height / 4..=3 * grid.height / 4),
        ));

        let ants: Vec<Ant> = (0..self.config.num_ants)
            .map(|i| {
                let pos = Position::new(rng.usize(..grid.width), rng.usize(..grid.height));
                Ant::new(AntId(i as u32), pos, &self.config.ant)
            })
            .collect();
        let ant_paths = ants.iter().map(|ant| (ant.id, Vec::new())).collect();

        info!(
            width = grid.width,
            height = grid.height,
            ants = ants.len(),
            queen = %queen.position,
            "simulation initialized"
        );

        SimulationState {
            current_time: 0.0,
            environment: Environment::new(&self.config),
            colony: Colony::new(queen, ants),
            ant_paths,
        }
    }

    /// Advance the state by one tick of length `dt`
    pub fn step(&self, state: &mut SimulationState, dt: f64, rng: &mut fastrand::Rng) {
        state.current_time += dt;
        state.environment.update(state.current_time, rng);

        // Ants are taken out of the roster while they act, so the list is fixed
        // up front and hatchlings wait for the next tick
        let roster = state.colony.ant_ids();
        for id in roster {
            let Some(mut ant) = state.colony.remove_ant(id) else {
                continue;
            };
            match ant.update(dt, &mut state.environment, &mut state.colony, &self.config, rng) {
                AntStatus::Alive => {
                    state.ant_paths.entry(id).or_default().push(ant.position);
                    state.colony.add_ant(ant);
                }
                AntStatus::Dead => {
                    state.ant_paths.remove(&id);
                }
            }
        }

        let hatched = state.colony.update(dt, &self.config, rng);
        for id in hatched {
            state.ant_paths.entry(id).or_default();
        }

        let colony = &state.colony;
        state.ant_paths.retain(|id, _| colony.contains(*id));

        trace!(
            time = state.current_time,
            ants = state.colony.ant_count(),
            eggs = state.colony.egg_count(),
            "tick"
        );
    }

    /// Step until the configured duration has elapsed
    pub fn run(&self, state: &mut SimulationState, rng: &mut fastrand::Rng) -> SimulationStats {
        let dt = self.config.time_step;
        let mut ticks: u64 = 0;
        while state.current_time < self.config.simulation_duration {
            self.step(state, dt, rng);
            ticks += 1;
        }
        if state.colony.ant_count() == 0 && state.colony.egg_count() == 0 {
            debug!(time = state.current_time, "colony died out");
        }

        let stats = state.stats();
        info!(
            ticks,
            ants = stats.ant_count,
            eggs = stats.egg_count,
            food_store = stats.food_store,
            "simulation finished"
        );
        stats
    }
}
