//! Simulation configuration.
//!
//! A [`SimulationConfig`] is a plain value. It is assembled from defaults, an
//! optional TOML file, `ANTS_*` environment variables and CLI flags, then
//! validated once before the engine runs. The engine itself trusts it.

use crate::error::{ConfigError, Result};
use crate::world::{GridSize, PheromoneMode};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Prefix for environment overrides
pub const ENV_PREFIX: &str = "ANTS_";

/// Upper bound for the food batch baseline and variance
pub const MAX_FOOD_BATCH: i64 = 1_000_000;

/// Food spawning parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FoodConfig {
    /// Probability per tick that a batch of food spawns
    pub spawn_chance: f64,
    /// Mean number of food items in a batch
    pub spawn_baseline: i64,
    pub spawn_variance: i64,
    /// Mean amount of food in a single item
    pub value_baseline: f64,
    pub value_variance: f64,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.2,
            spawn_baseline: 3,
            spawn_variance: 2,
            value_baseline: 5.0,
            value_variance: 3.0,
        }
    }
}

/// Per-ant parameters
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AntConfig {
    pub carrying_capacity: f64,
    pub initial_lifespan: f64,
    /// Lifespan bonus granted every time an ant delivers food to the queen
    pub lifespan_extension_on_contribution: f64,
}

impl Default for AntConfig {
    fn default() -> Self {
        Self {
            carrying_capacity: 10.0,
            initial_lifespan: 100.0,
            lifespan_extension_on_contribution: 20.0,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Grid `(width, height)`
    pub grid_size: (usize, usize),
    pub num_ants: usize,
    pub simulation_duration: f64,
    /// Simulated time advanced by one tick
    pub time_step: f64,

    pub food: FoodConfig,
    pub ant: AntConfig,

    pub food_required_to_lay_egg: f64,
    pub egg_gestation_period: f64,

    pub pheromone_initial_intensity: f64,
    pub pheromone_evaporation_rate: f64,
    /// Upper bound on the display opacity of a pheromone layer
    pub pheromone_max_opacity: f64,
    /// Weight of the uniform component when sampling a random move, in `[0, 1]`
    pub randomness_factor: f64,
    pub enable_multiple_pheromones: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            grid_size: (200, 200),
            num_ants: 100,
            simulation_duration: 1000.0,
            time_step: 0.1,
            food: FoodConfig::default(),
            ant: AntConfig::default(),
            food_required_to_lay_egg: 42.0,
            egg_gestation_period: 10.0,
            pheromone_initial_intensity: 1.0,
            pheromone_evaporation_rate: 0.2,
            pheromone_max_opacity: 0.5,
            randomness_factor: 0.3,
            enable_multiple_pheromones: true,
        }
    }
}

impl SimulationConfig {
    /// Load a config from a TOML file; missing keys take their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn grid(&self) -> GridSize {
        GridSize::new(self.grid_size.0, self.grid_size.1)
    }

    pub fn pheromone_mode(&self) -> PheromoneMode {
        if self.enable_multiple_pheromones {
            PheromoneMode::Multiple
        } else {
            PheromoneMode::Single
        }
    }

    /// Manhattan radius within which an ant sees food.
    ///
    /// Derived from the current grid size on every call so it can never go
    /// stale when `grid_size` changes.
    pub fn perception_radius(&self) -> usize {
        perception_radius(self.grid_size)
    }

    /// Apply `ANTS_*` overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(std::env::vars())
    }

    /// Apply `ANTS_*` overrides from arbitrary key/value pairs.
    ///
    /// Keys without the prefix and unrecognised keys are ignored.
    pub fn apply_overrides<I, K, V>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        for (key, value) in vars {
            let key = key.as_ref();
            let value = value.as_ref();
            let Some(name) = key.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match name.to_ascii_lowercase().as_str() {
                "grid_width" => self.grid_size.0 = parse_override(key, value)?,
                "grid_height" => self.grid_size.1 = parse_override(key, value)?,
                "num_ants" => self.num_ants = parse_override(key, value)?,
                "simulation_duration" => self.simulation_duration = parse_override(key, value)?,
                "time_step" => self.time_step = parse_override(key, value)?,
                "food_required_to_lay_egg" => {
                    self.food_required_to_lay_egg = parse_override(key, value)?
                }
                "egg_gestation_period" => self.egg_gestation_period = parse_override(key, value)?,
                "pheromone_initial_intensity" => {
                    self.pheromone_initial_intensity = parse_override(key, value)?
                }
                "pheromone_evaporation_rate" => {
                    self.pheromone_evaporation_rate = parse_override(key, value)?
                }
                "pheromone_max_opacity" => {
                    self.pheromone_max_opacity = parse_override(key, value)?
                }
                "randomness_factor" => self.randomness_factor = parse_override(key, value)?,
                "enable_multiple_pheromones" => {
                    self.enable_multiple_pheromones = parse_override(key, value)?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        let (width, height) = self.grid_size;
        if width == 0 || height == 0 {
            return Err(ConfigError::invalid(
                "grid_size",
                format!("dimensions must be positive, got {}x{}", width, height),
            ));
        }
        if self.num_ants == 0 {
            return Err(ConfigError::invalid("num_ants", "must be positive"));
        }

        positive("simulation_duration", self.simulation_duration)?;
        positive("time_step", self.time_step)?;
        probability("food.spawn_chance", self.food.spawn_chance)?;
        if !(1..=MAX_FOOD_BATCH).contains(&self.food.spawn_baseline) {
            return Err(ConfigError::invalid(
                "food.spawn_baseline",
                format!("must be within [1, {}]", MAX_FOOD_BATCH),
            ));
        }
        if !(0..=MAX_FOOD_BATCH).contains(&self.food.spawn_variance) {
            return Err(ConfigError::invalid(
                "food.spawn_variance",
                format!("must be within [0, {}]", MAX_FOOD_BATCH),
            ));
        }
        positive("food.value_baseline", self.food.value_baseline)?;
        non_negative("food.value_variance", self.food.value_variance)?;

        positive("ant.carrying_capacity", self.ant.carrying_capacity)?;
        positive("ant.initial_lifespan", self.ant.initial_lifespan)?;
        non_negative(
            "ant.lifespan_extension_on_contribution",
            self.ant.lifespan_extension_on_contribution,
        )?;

        positive("food_required_to_lay_egg", self.food_required_to_lay_egg)?;
        positive("egg_gestation_period", self.egg_gestation_period)?;
        positive("pheromone_initial_intensity", self.pheromone_initial_intensity)?;
        non_negative("pheromone_evaporation_rate", self.pheromone_evaporation_rate)?;
        non_negative("pheromone_max_opacity", self.pheromone_max_opacity)?;
        probability("randomness_factor", self.randomness_factor)?;
        Ok(())
    }
}

/// `max(2, round(mean(width, height) / 5))`
pub fn perception_radius(grid_size: (usize, usize)) -> usize {
    let average = (grid_size.0 + grid_size.1) as f64 / 2.0;
    ((average / 5.0).round() as usize).max(2)
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn positive(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be positive, got {}", value)))
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must not be negative, got {}", value)))
    }
}

fn probability(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("must be within [0, 1], got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.perception_radius(), 40);
        assert_eq!(config.pheromone_mode(), PheromoneMode::Multiple);
    }

    #[test]
    fn test_perception_radius_tracks_grid_size() {
        let mut config = SimulationConfig::default();
        config.grid_size = (10, 10);
        assert_eq!(config.perception_radius(), 2);

        config.grid_size = (33, 37);
        assert_eq!(config.perception_radius(), 7);

        config.grid_size = (1, 1);
        assert_eq!(config.perception_radius(), 2);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SimulationConfig::from_toml_str(
            r#"
            grid_size = [50, 40]
            num_ants = 7
            enable_multiple_pheromones = false

            [ant]
            carrying_capacity = 5.0
            "#,
        )
        .unwrap();

        assert_eq!(config.grid_size, (50, 40));
        assert_eq!(config.num_ants, 7);
        assert_eq!(config.pheromone_mode(), PheromoneMode::Single);
        assert_eq!(config.ant.carrying_capacity, 5.0);
        assert_eq!(config.ant.initial_lifespan, 100.0);
        assert_eq!(config.food, FoodConfig::default());
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = SimulationConfig::from_toml_str("num_ants = \"many\"").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.grid_size = (0, 10);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "grid_size", .. })
        ));

        let mut config = SimulationConfig::default();
        config.pheromone_evaporation_rate = -0.1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "pheromone_evaporation_rate", .. })
        ));

        let mut config = SimulationConfig::default();
        config.randomness_factor = 1.5;
        assert!(config.validate().is_err());

        let mut config = SimulationConfig::default();
        config.time_step = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_food_batch() {
        let mut config = SimulationConfig::default();
        config.food.spawn_baseline = i64::MAX;
        config.food.spawn_variance = 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "food.spawn_baseline", .. })
        ));

        let mut config = SimulationConfig::default();
        config.food.spawn_variance = MAX_FOOD_BATCH + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field: "food.spawn_variance", .. })
        ));

        let mut config = SimulationConfig::default();
        config.food.spawn_baseline = MAX_FOOD_BATCH;
        config.food.spawn_variance = MAX_FOOD_BATCH;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let mut config = SimulationConfig::default();
        config
            .apply_overrides([
                ("ANTS_NUM_ANTS", "12"),
                ("ANTS_RANDOMNESS_FACTOR", "0.75"),
                ("ANTS_ENABLE_MULTIPLE_PHEROMONES", "false"),
                ("ANTS_GRID_WIDTH", "64"),
                ("ANTS_UNKNOWN", "whatever"),
                ("PATH", "/usr/bin"),
            ])
            .unwrap();

        assert_eq!(config.num_ants, 12);
        assert_eq!(config.randomness_factor, 0.75);
        assert!(!config.enable_multiple_pheromones);
        assert_eq!(config.grid_size, (64, 200));
    }

    #[test]
    fn test_bad_override() {
        let mut config = SimulationConfig::default();
        let err = config
            .apply_overrides([("ANTS_NUM_ANTS", "lots")])
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOverride { .. }));
    }
}
