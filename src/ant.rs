use crate::colony::Colony;
use crate::config::{AntConfig, SimulationConfig};
use crate::world::{Environment, PheromoneKind, PheromoneMode, Position};
use std::fmt;
use tracing::{debug, trace};

/// Added to every move score so no candidate ever has zero weight
pub const SCORE_EPSILON: f64 = 1e-6;

/// Unique, immutable ant identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AntId(pub u32);

impl fmt::Display for AntId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ant {}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    /// Looking for food
    Foraging,
    /// Carrying a full load back to the queen
    Returning,
}

/// Outcome of one [`Ant::update`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntStatus {
    Alive,
    /// Age reached lifespan; the ant must leave the roster
    Dead,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Ant {
    pub id: AntId,
    pub position: Position,
    /// Where the ant stood before its last move
    pub previous_position: Option<Position>,
    /// Food carried, never above `carrying_capacity`
    pub food: f64,
    pub carrying_capacity: f64,
    pub state: AntState,
    pub age: f64,
    pub lifespan: f64,
    /// Whether the cell the current load came from still had food after pickup
    pub source_had_food: bool,
}

impl Ant {
    /// Create a new foraging ant of age 0
    pub fn new(id: AntId, position: Position, config: &AntConfig) -> Self {
        Self {
            id,
            position,
            previous_position: None,
            food: 0.0,
            carrying_capacity: config.carrying_capacity,
            state: AntState::Foraging,
            age: 0.0,
            lifespan: config.initial_lifespan,
            source_had_food: false,
        }
    }

    #[inline]
    pub fn is_returning(&self) -> bool {
        self.state == AntState::Returning
    }

    /// Advance the ant by `dt`.
    ///
    /// Ageing comes first: an ant that reaches its lifespan reports
    /// [`AntStatus::Dead`] and has no other effect this tick. Otherwise it
    /// moves, forages or delivers, and marks its new cell.
    pub fn update(
        &mut self,
        dt: f64,
        env: &mut Environment,
        colony: &mut Colony,
        config: &SimulationConfig,
        rng: &mut fastrand::Rng,
    ) -> AntStatus {
        self.age += dt;
        if self.age >= self.lifespan {
            debug!(ant = %self.id, age = self.age, "ant died");
            return AntStatus::Dead;
        }

        match self.state {
            AntState::Returning => {
                let queen = colony.queen().position;
                self.move_towards(queen, env);
                if self.position == queen {
                    self.deposit_food(colony, config.ant.lifespan_extension_on_contribution);
                }
            }
            AntState::Foraging => {
                self.forage_move(env, config, rng);
                self.collect_food(env);
            }
        }

        self.leave_pheromone(env);
        AntStatus::Alive
    }

    /// Head for the nearest visible food, or wander along pheromones
    fn forage_move(
        &mut self,
        env: &Environment,
        config: &SimulationConfig,
        rng: &mut fastrand::Rng,
    ) {
        let grid = env.grid();
        let radius = config.perception_radius();
        let visible = env.get_food_positions_within_radius(self.position, radius);

        // min_by_key keeps the first of equally near cells, i.e. scan order
        if let Some(target) = visible
            .into_iter()
            .min_by_key(|&pos| grid.manhattan(self.position, pos))
        {
            self.move_towards(target, env);
        } else {
            let next = self.choose_random_move(env, config.randomness_factor, rng);
            self.move_to(next);
        }
    }

    /// One greedy toroidal step towards `target`
    pub fn move_towards(&mut self, target: Position, env: &Environment) {
        let next = env.grid().step_towards(self.position, target);
        self.move_to(next);
    }

    #[inline]
    fn move_to(&mut self, next: Position) {
        self.previous_position = Some(self.position);
        self.position = next;
    }

    /// Pick a neighbour, weighted by pheromone scores blended with uniform noise.
    ///
    /// The cell the ant just left is excluded unless it is the only way out.
    pub fn choose_random_move(
        &self,
        env: &Environment,
        randomness: f64,
        rng: &mut fastrand::Rng,
    ) -> Position {
        let neighbors = env.grid().neighbors(self.position);

        let mut options = neighbors;
        let mut k = 0usize;
        for &pos in &neighbors {
            if Some(pos) != self.previous_position {
                options[k] = pos;
                k += 1;
            }
        }
        if k == 0 {
            options = neighbors;
            k = neighbors.len();
        }
        let options = &options[..k];

        let mut scores = [0.0f64; 4];
        for (score, &pos) in scores.iter_mut().zip(options) {
            *score = self.move_score(env, pos);
        }

        let choice = sample_blended(&scores[..k], randomness, rng);
        trace!(ant = %self.id, from = %self.position, to = %options[choice], "random move");
        options[choice]
    }

    /// Attractiveness of stepping onto `pos`, always positive
    fn move_score(&self, env: &Environment, pos: Position) -> f64 {
        let level = |kind| env.get_pheromone_level(pos, kind);
        let score = match env.mode() {
            PheromoneMode::Single => level(PheromoneKind::Regular),
            // Away from our own outbound trail, towards the home-bound markers
            PheromoneMode::Multiple if self.is_returning() => {
                level(PheromoneKind::Regular) / (1.0 + level(PheromoneKind::Trail))
            }
            // Towards food markers, away from ground already searched
            PheromoneMode::Multiple => {
                (level(PheromoneKind::Food) + level(PheromoneKind::Rich))
                    / (1.0 + level(PheromoneKind::Regular) + level(PheromoneKind::Trail))
            }
        };
        score + SCORE_EPSILON
    }

    /// Pick up as much food as fits from the current cell
    pub fn collect_food(&mut self, env: &mut Environment) {
        let available = env.get_food_amount(self.position);
        let room = self.carrying_capacity - self.food;
        let take = room.min(available);
        if take <= 0.0 {
            return;
        }

        env.remove_food(self.position, take);
        self.food = if take >= room {
            self.carrying_capacity
        } else {
            self.food + take
        };
        self.source_had_food = env.get_food_amount(self.position) > 0.0;

        if self.food >= self.carrying_capacity {
            self.state = AntState::Returning;
            trace!(ant = %self.id, rich = self.source_had_food, "ant heading home");
        }
    }

    /// Hand the load to the colony and go back to foraging
    pub fn deposit_food(&mut self, colony: &mut Colony, lifespan_extension: f64) {
        colony.deposit_food(self.food);
        debug!(ant = %self.id, amount = self.food, "ant delivered food");
        self.food = 0.0;
        self.source_had_food = false;
        self.lifespan += lifespan_extension;
        self.state = AntState::Foraging;
    }

    /// The state marker this ant leaves behind, before mode resolution
    pub fn marker(&self) -> PheromoneKind {
        match self.state {
            AntState::Returning if self.source_had_food => PheromoneKind::Rich,
            AntState::Returning => PheromoneKind::Regular,
            AntState::Foraging => PheromoneKind::Food,
        }
    }

    fn leave_pheromone(&self, env: &mut Environment) {
        env.add_pheromone(self.position, PheromoneKind::Trail);
        let marker = env.mode().resolve(self.marker());
        env.add_pheromone(self.position, marker);
    }
}

/// Sample an index from `(1 - r) * score / total + r / n`, renormalised.
///
/// Falls back to uniform if the blended weights sum to zero.
pub fn sample_blended(scores: &[f64], randomness: f64, rng: &mut fastrand::Rng) -> usize {
    debug_assert!(!scores.is_empty());
    let n = scores.len();
    let total: f64 = scores.iter().sum();
    let uniform = randomness / n as f64;

    let mut weights = [0.0f64; 4];
    let mut sum = 0.0;
    for (w, &s) in weights.iter_mut().zip(scores) {
        let guided = if total > 0.0 {
            (1.0 - randomness) * s / total
        } else {
            0.0
        };
        *w = guided + uniform;
        sum += *w;
    }

    if sum <= 0.0 {
        return rng.usize(..n);
    }

    let mut pick = rng.f64() * sum;
    for (i, &w) in weights[..n].iter().enumerate() {
        if pick < w {
            return i;
        }
        pick -= w;
    }
    n - 1
}
