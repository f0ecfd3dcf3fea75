use ant_colony::prelude::*;
use clap::Parser;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ant_colony=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.load_config()?;
    let mut rng = if let Some(seed) = args.seed {
        fastrand::Rng::with_seed(seed)
    } else {
        fastrand::Rng::new()
    };

    // Build initial state and run
    let engine = SimulationEngine::new(config);
    let mut state = engine.initialize(&mut rng);
    let started = Instant::now();
    let stats = engine.run(&mut state, &mut rng);

    if !args.quiet {
        stats.print_summary(started.elapsed());
    }

    Ok(())
}
