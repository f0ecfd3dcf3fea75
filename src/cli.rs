use crate::config::SimulationConfig;
use crate::error::Result;
use clap::Parser;
use std::path::PathBuf;

/// CLI arguments for the colony simulation
#[derive(Parser, Debug)]
#[command(name = "ant_colony", about = "🐜 Foraging ant colony simulator")]
pub struct Args {
    /// TOML config file; missing keys keep their defaults
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of ants at start
    #[arg(short = 'n', long = "ants")]
    pub ants: Option<usize>,

    /// Simulated duration
    #[arg(short = 'd', long)]
    pub duration: Option<f64>,

    /// Grid width
    #[arg(long)]
    pub width: Option<usize>,

    /// Grid height
    #[arg(long)]
    pub height: Option<usize>,

    /// Use one generic pheromone instead of four kinds
    #[arg(long, default_value_t = false)]
    pub single_pheromone: bool,

    /// Suppress the summary (for benchmarks)
    #[arg(short = 'q', long, default_value_t = false)]
    pub quiet: bool,
}

impl Args {
    /// Defaults, then the config file, then `ANTS_*` variables, then flags
    pub fn load_config(&self) -> Result<SimulationConfig> {
        let mut config = match &self.config {
            Some(path) => SimulationConfig::load(path)?,
            None => SimulationConfig::default(),
        };
        config.apply_env_overrides()?;
        self.apply_to(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_to(&self, config: &mut SimulationConfig) {
        if let Some(ants) = self.ants {
            config.num_ants = ants;
        }
        if let Some(duration) = self.duration {
            config.simulation_duration = duration;
        }
        if let Some(width) = self.width {
            config.grid_size.0 = width;
        }
        if let Some(height) = self.height {
            config.grid_size.1 = height;
        }
        if self.single_pheromone {
            config.enable_multiple_pheromones = false;
        }
    }
}
