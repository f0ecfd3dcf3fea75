use ant_colony::prelude::*;
use ant_colony::PheromoneKind;
use proptest::prelude::*;

const EGG_COST: f64 = 6.0;

fn check_invariants(state: &SimulationState) {
    let env = &state.environment;
    let grid = env.grid();

    for y in 0..grid.height {
        for x in 0..grid.width {
            let pos = Position::new(x, y);
            let food = env.get_food_amount(pos);
            assert!(food >= 0.0);
            assert_eq!(food > 0.0, env.food_positions().any(|p| p == pos));
            for kind in PheromoneKind::ALL {
                assert!(env.get_pheromone_level(pos, kind) >= 0.0);
            }
        }
    }

    assert!(state.colony.food_store() >= 0.0);
    assert_eq!(state.colony.egg_count(), state.colony.egg_timers().len());
    // Whatever is left after laying is less than one egg
    assert!(state.colony.food_store() < EGG_COST);

    for ant in state.colony.ants() {
        assert!(ant.food >= 0.0);
        assert!(ant.food <= ant.carrying_capacity);
        assert!(ant.age < ant.lifespan);
        assert!(grid.contains(ant.position));
        assert!(state.ant_paths.contains_key(&ant.id));
    }
    for id in state.ant_paths.keys() {
        assert!(state.colony.contains(*id));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn invariants_hold_every_tick(
        seed in any::<u64>(),
        width in 3usize..24,
        height in 3usize..24,
        num_ants in 1usize..25,
        randomness in 0.0f64..=1.0,
        multiple in any::<bool>(),
    ) {
        let mut config = SimulationConfig {
            grid_size: (width, height),
            num_ants,
            randomness_factor: randomness,
            enable_multiple_pheromones: multiple,
            food_required_to_lay_egg: EGG_COST,
            egg_gestation_period: 1.0,
            ..SimulationConfig::default()
        };
        config.food.spawn_chance = 0.9;
        config.ant.initial_lifespan = 4.0;
        config.ant.carrying_capacity = 3.0;
        prop_assert!(config.validate().is_ok());

        let engine = SimulationEngine::new(config.clone());
        let mut rng = fastrand::Rng::with_seed(seed);
        let mut state = engine.initialize(&mut rng);
        check_invariants(&state);

        for _ in 0..80 {
            engine.step(&mut state, config.time_step, &mut rng);
            check_invariants(&state);
        }
    }

    #[test]
    fn evaporation_never_increases_levels(
        seed in any::<u64>(),
        elapsed in proptest::collection::vec(0.0f64..5.0, 1..10),
    ) {
        let mut config = SimulationConfig {
            grid_size: (6, 6),
            ..SimulationConfig::default()
        };
        config.food.spawn_chance = 0.0;
        let mut env = Environment::new(&config);
        let mut rng = fastrand::Rng::with_seed(seed);
        for _ in 0..30 {
            let pos = Position::new(rng.usize(..6), rng.usize(..6));
            let kind = PheromoneKind::ALL[rng.usize(..4)];
            env.add_pheromone(pos, kind);
        }

        let snapshot = |env: &Environment| {
            let mut levels = Vec::new();
            for y in 0..6 {
                for x in 0..6 {
                    for kind in PheromoneKind::ALL {
                        levels.push(env.get_pheromone_level(Position::new(x, y), kind));
                    }
                }
            }
            levels
        };

        let before_identity = snapshot(&env);
        env.evaporate_pheromones(0.0);
        prop_assert_eq!(&before_identity, &snapshot(&env));

        let mut previous = before_identity;
        for dt in elapsed {
            env.evaporate_pheromones(dt);
            let current = snapshot(&env);
            for (now, before) in current.iter().zip(&previous) {
                prop_assert!(now <= before);
            }
            previous = current;
        }
    }
}
