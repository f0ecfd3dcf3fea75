use crate::ant::{Ant, AntId};
use crate::config::{AntConfig, SimulationConfig};
use crate::world::Position;
use std::collections::BTreeMap;
use tracing::debug;

/// The queen never moves
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Queen {
    pub position: Position,
}

impl Queen {
    pub const fn new(position: Position) -> Self {
        Self { position }
    }
}

/// Queen, live ants, food store and pending eggs
#[derive(Clone, Debug)]
pub struct Colony {
    queen: Queen,
    /// Keyed by id so iteration order does not depend on hashing
    ants: BTreeMap<AntId, Ant>,
    food_store: f64,
    /// Gestation time accumulated by each pending egg
    egg_timers: Vec<f64>,
}

impl Colony {
    pub fn new(queen: Queen, ants: impl IntoIterator<Item = Ant>) -> Self {
        Self {
            queen,
            ants: ants.into_iter().map(|ant| (ant.id, ant)).collect(),
            food_store: 0.0,
            egg_timers: Vec::new(),
        }
    }

    #[inline]
    pub fn queen(&self) -> &Queen {
        &self.queen
    }

    pub fn ants(&self) -> impl Iterator<Item = &Ant> {
        self.ants.values()
    }

    pub fn ant(&self, id: AntId) -> Option<&Ant> {
        self.ants.get(&id)
    }

    /// Ids of the current roster, detached from it
    pub fn ant_ids(&self) -> Vec<AntId> {
        self.ants.keys().copied().collect()
    }

    #[inline]
    pub fn ant_count(&self) -> usize {
        self.ants.len()
    }

    #[inline]
    pub fn contains(&self, id: AntId) -> bool {
        self.ants.contains_key(&id)
    }

    /// Add an ant, replacing any ant with the same id
    pub fn add_ant(&mut self, ant: Ant) {
        self.ants.insert(ant.id, ant);
    }

    /// Take an ant out of the roster
    pub fn remove_ant(&mut self, id: AntId) -> Option<Ant> {
        self.ants.remove(&id)
    }

    #[inline]
    pub fn food_store(&self) -> f64 {
        self.food_store
    }

    pub fn deposit_food(&mut self, amount: f64) {
        self.food_store += amount.max(0.0);
    }

    #[inline]
    pub fn egg_count(&self) -> usize {
        self.egg_timers.len()
    }

    pub fn egg_timers(&self) -> &[f64] {
        &self.egg_timers
    }

    /// Hatch first, then lay, so an egg laid this tick is not aged this tick.
    ///
    /// Returns the ids of the ants that hatched.
    pub fn update(
        &mut self,
        dt: f64,
        config: &SimulationConfig,
        rng: &mut fastrand::Rng,
    ) -> Vec<AntId> {
        let hatched = self.hatch_eggs(dt, config.egg_gestation_period, &config.ant, rng);
        self.lay_eggs(config.food_required_to_lay_egg);
        hatched
    }

    /// Turn whole multiples of `cost` in the store into eggs
    pub fn lay_eggs(&mut self, cost: f64) -> usize {
        let eggs = (self.food_store / cost).floor() as usize;
        self.food_store %= cost;
        self.egg_timers.extend(std::iter::repeat(0.0).take(eggs));
        if eggs > 0 {
            debug!(eggs, pending = self.egg_timers.len(), "queen laid eggs");
        }
        eggs
    }

    /// Age every egg by `dt` and hatch those that reached `gestation`.
    ///
    /// New ants appear at the queen's position.
    pub fn hatch_eggs(
        &mut self,
        dt: f64,
        gestation: f64,
        ant_config: &AntConfig,
        rng: &mut fastrand::Rng,
    ) -> Vec<AntId> {
        for timer in &mut self.egg_timers {
            *timer += dt;
        }

        let matured: Vec<usize> = self
            .egg_timers
            .iter()
            .enumerate()
            .filter_map(|(i, &timer)| (timer >= gestation).then_some(i))
            .collect();

        let mut hatched = Vec::with_capacity(matured.len());
        // Highest index first so the remaining indices stay valid
        for &index in matured.iter().rev() {
            self.egg_timers.remove(index);
            let id = self.fresh_id(rng);
            self.add_ant(Ant::new(id, self.queen.position, ant_config));
            hatched.push(id);
        }

        if !hatched.is_empty() {
            debug!(count = hatched.len(), ants = self.ants.len(), "eggs hatched");
        }
        hatched
    }

    /// Random id not used by any live ant
    fn fresh_id(&self, rng: &mut fastrand::Rng) -> AntId {
        loop {
            let id = AntId(rng.u32(..));
            if !self.contains(id) {
                return id;
            }
        }
    }
}
