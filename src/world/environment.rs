use crate::config::{FoodConfig, SimulationConfig};
use crate::world::grid::{GridSize, Position};
use crate::world::pheromone::{PheromoneKind, PheromoneMode};
use std::collections::BTreeSet;
use tracing::trace;

/// Pheromone levels below this are snapped to zero after evaporation
pub const EVAPORATION_FLOOR: f64 = 1e-3;

/// Smallest amount of food a spawned item carries
pub const MIN_FOOD_VALUE: f64 = 1.0;

/// The grid: food per cell plus one intensity layer per active pheromone kind
#[derive(Clone, Debug)]
pub struct Environment {
    grid: GridSize,
    mode: PheromoneMode,
    food_config: FoodConfig,
    initial_intensity: f64,
    evaporation_rate: f64,
    max_opacity: f64,
    /// Row-major food amounts
    food: Vec<f64>,
    /// Row-major intensities, one `Vec` per layer of `mode`
    pheromones: Vec<Vec<f64>>,
    /// Cells with food > 0, ordered so iteration is reproducible
    food_positions: BTreeSet<Position>,
    last_update_time: f64,
}

impl Environment {
    pub fn new(config: &SimulationConfig) -> Self {
        let grid = config.grid();
        let mode = config.pheromone_mode();
        Self {
            grid,
            mode,
            food_config: config.food.clone(),
            initial_intensity: config.pheromone_initial_intensity,
            evaporation_rate: config.pheromone_evaporation_rate,
            max_opacity: config.pheromone_max_opacity,
            food: vec![0.0; grid.area()],
            pheromones: vec![vec![0.0; grid.area()]; mode.layer_count()],
            food_positions: BTreeSet::new(),
            last_update_time: 0.0,
        }
    }

    #[inline]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[inline]
    pub fn mode(&self) -> PheromoneMode {
        self.mode
    }

    /// Spawn food, then evaporate pheromones for the time since the last update
    pub fn update(&mut self, current_time: f64, rng: &mut fastrand::Rng) {
        self.spawn_food(rng);
        self.evaporate_pheromones(current_time - self.last_update_time);
        self.last_update_time = current_time;
    }

    /// With probability `spawn_chance`, scatter a batch of food items
    pub fn spawn_food(&mut self, rng: &mut fastrand::Rng) {
        if rng.f64() >= self.food_config.spawn_chance {
            return;
        }

        let count = self.food_count_to_spawn(rng);
        for _ in 0..count {
            let pos = Position::new(rng.usize(..self.grid.width), rng.usize(..self.grid.height));
            let value = self.food_value(rng);
            self.add_food(pos, value);
        }
        trace!(count, "spawned food");
    }

    fn food_count_to_spawn(&self, rng: &mut fastrand::Rng) -> usize {
        let baseline = self.food_config.spawn_baseline;
        let variance = self.food_config.spawn_variance;
        let low = baseline.saturating_sub(variance);
        let high = baseline.saturating_add(variance);
        rng.i64(low..=high).max(0) as usize
    }

    fn food_value(&self, rng: &mut fastrand::Rng) -> f64 {
        let baseline = self.food_config.value_baseline;
        let variance = self.food_config.value_variance;
        let value = baseline - variance + rng.f64() * 2.0 * variance;
        value.max(MIN_FOOD_VALUE)
    }

    /// Add food to a cell; amounts on the same cell accumulate
    pub fn add_food(&mut self, pos: Position, amount: f64) {
        if amount <= 0.0 {
            return;
        }
        let idx = self.grid.index(pos);
        self.food[idx] += amount;
        self.food_positions.insert(pos);
    }

    /// Decay every pheromone layer by `exp(-rate * elapsed)`.
    ///
    /// The food layer is untouched.
    pub fn evaporate_pheromones(&mut self, elapsed: f64) {
        let factor = (-self.evaporation_rate * elapsed).exp();
        for layer in &mut self.pheromones {
            for level in layer.iter_mut() {
                *level *= factor;
                if *level < EVAPORATION_FLOOR {
                    *level = 0.0;
                }
            }
        }
    }

    /// Mark a cell. Trail adds to the level, every other kind resets it.
    ///
    /// Kinds without a layer in the current mode are ignored.
    pub fn add_pheromone(&mut self, pos: Position, kind: PheromoneKind) {
        let Some(layer) = self.mode.layer(kind) else {
            return;
        };
        let idx = self.grid.index(pos);
        let level = &mut self.pheromones[layer][idx];
        if kind.accumulates() {
            *level += self.initial_intensity;
        } else {
            *level = self.initial_intensity;
        }
    }

    /// Stored intensity, or 0 when the mode has no layer for `kind`
    pub fn get_pheromone_level(&self, pos: Position, kind: PheromoneKind) -> f64 {
        match self.mode.layer(kind) {
            Some(layer) => self.pheromones[layer][self.grid.index(pos)],
            None => 0.0,
        }
    }

    /// Display opacity of a layer at a cell, in `[0, max_opacity]`
    pub fn pheromone_opacity(&self, pos: Position, kind: PheromoneKind) -> f64 {
        let level = self.get_pheromone_level(pos, kind);
        (level / self.initial_intensity * self.max_opacity).clamp(0.0, self.max_opacity)
    }

    #[inline]
    pub fn get_food_amount(&self, pos: Position) -> f64 {
        self.food[self.grid.index(pos)]
    }

    /// Take up to `amount` food from a cell; an emptied cell is reset to exactly 0
    pub fn remove_food(&mut self, pos: Position, amount: f64) {
        let idx = self.grid.index(pos);
        let remaining = self.food[idx] - amount;
        if remaining <= 0.0 {
            self.food[idx] = 0.0;
            self.food_positions.remove(&pos);
        } else {
            self.food[idx] = remaining;
        }
    }

    /// All cells with food, in position order
    pub fn food_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.food_positions.iter().copied()
    }

    /// Total food lying on the grid
    pub fn total_food(&self) -> f64 {
        self.food_positions
            .iter()
            .map(|&pos| self.get_food_amount(pos))
            .sum()
    }

    /// Food cells within Manhattan `radius` of `center`.
    ///
    /// Scans only the `(2r+1)^2` square around `center`, `dx` outer and `dy`
    /// inner, so the result is in scan order. A cell reachable through more
    /// than one wrapped offset is reported once.
    pub fn get_food_positions_within_radius(
        &self,
        center: Position,
        radius: usize,
    ) -> Vec<Position> {
        let r = radius as isize;
        let mut found = Vec::new();
        for dx in -r..=r {
            let rest = r - dx.abs();
            for dy in -rest..=rest {
                let pos = self.grid.offset(center, dx, dy);
                if self.food_positions.contains(&pos) && !found.contains(&pos) {
                    found.push(pos);
                }
            }
        }
        found
    }
}
