use crate::ant::AntId;
use crate::world::Position;
use colored::Colorize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Snapshot of a simulation for reporting and visualisation
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationStats {
    pub ant_count: usize,
    pub egg_count: usize,
    pub food_store: f64,
    /// Food still lying on the grid
    pub food_on_grid: f64,
    pub ant_paths: BTreeMap<AntId, Vec<Position>>,
    pub queen_position: Position,
    pub elapsed_time: f64,
}

impl SimulationStats {
    /// Print the end-of-run summary
    pub fn print_summary(&self, latency: Duration) {
        let longest_path = self.ant_paths.values().map(Vec::len).max().unwrap_or(0);
        println!(
            "\n{}\n{} {:.3} ms {} {} {} {} {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            latency.as_secs_f64() * 1000.0,
            "|".dimmed(),
            format!("time={:.1}", self.elapsed_time).cyan(),
            format!("ants={}", self.ant_count).cyan(),
            format!("eggs={}", self.egg_count).cyan(),
            format!("food_store={:.1}", self.food_store).cyan(),
            format!("food_on_grid={:.1}", self.food_on_grid).cyan(),
            format!("queen={}", self.queen_position).yellow(),
            format!("longest_path={}", longest_path).dimmed(),
        );
    }
}
