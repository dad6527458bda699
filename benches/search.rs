use env_logger::Env;

use criterion::{criterion_group, criterion_main, Criterion};

use grid_astar::prelude::*;
use grid_astar::{EvaluationConfig, Experiment, ScenarioSet};
use log::warn;
use nanorand::{Rng, WyRand};

fn new_random(width: usize, height: usize, seed: u64) -> GridMap {
    let mut rng = WyRand::new_seed(seed);
    // keep the corners open so the benchmark queries always have valid endpoints
    GridMap::from_fn((width, height), |(x, y)| {
        let corner = (x == 0 || x == width - 1) && (y == 0 || y == height - 1);
        corner || rng.generate_range(0_u32..100) >= 25
    })
}

#[allow(unused)]
// Setup logging output
fn init() {
    let env = Env::default()
        .filter_or("MY_LOG_LEVEL", "debug") // Change this from debug to trace to enable search timings.
        .write_style_or("MY_LOG_STYLE", "always");

    let _ = env_logger::Builder::from_env(env).is_test(true).try_init();
}

fn bench_single_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("Single Path");

    // Log to stdout
    init();

    for map_size in [128, 512] {
        let (width, height) = (map_size, map_size);
        let goal = (width - 1, height - 1);

        let uniform = GridMap::from_fn((width, height), |_| true);
        let random = new_random(width, height, 4);

        for (name, map) in [("Uniform", &uniform), ("Random", &random)] {
            for heuristic in [Heuristic::Octile, Heuristic::Zero] {
                let mut astar = AStar::new(map, SearchConfig::with_heuristic(heuristic));
                if astar.path((0, 0), goal).is_empty() {
                    warn!(
                        "{} map of size ({}, {}) has no path from (0, 0) to {:?}, the benchmark only measures an exhausted search",
                        name, width, height, goal
                    );
                }
                let id = format!(
                    "{} Map, {:?}, Map Size: ({}, {})",
                    name, heuristic, width, height
                );
                group.bench_function(&id, |b| b.iter(|| astar.path((0, 0), goal)));
            }
        }
    }
}

fn bench_stepping(c: &mut Criterion) {
    let mut group = c.benchmark_group("Stepping");

    let (width, height) = (256, 256);
    let map = new_random(width, height, 8);
    let mut astar = AStar::new(&map, SearchConfig::default());

    // the way a visualizer would drive the search: a few expansions per frame
    for per_frame in [1, 25] {
        let id = format!(
            "Random Map, {} steps per call, Map Size: ({}, {})",
            per_frame, width, height
        );
        group.bench_function(&id, |b| {
            b.iter(|| {
                astar.prepare((0, 0), (width - 1, height - 1)).unwrap();
                while astar.advance(per_frame) == Step::Searching {}
            })
        });
    }
}

fn bench_scenario(c: &mut Criterion) {
    let mut group = c.benchmark_group("Scenario");
    group.sample_size(10);

    let (width, height) = (256, 256);
    let map = new_random(width, height, 15);
    let mut rng = WyRand::new_seed(16);

    let mut experiments = Vec::with_capacity(200);
    while experiments.len() < 200 {
        let start = (rng.generate_range(0..width), rng.generate_range(0..height));
        let goal = (rng.generate_range(0..width), rng.generate_range(0..height));
        if !map.is_walkable(start) || !map.is_walkable(goal) {
            continue;
        }
        experiments.push(Experiment {
            bucket: 0,
            map: String::from("random.map"),
            map_size: (width, height),
            start,
            goal,
            optimal_length: 0.0,
        });
    }
    let scenario = ScenarioSet::new(experiments);
    let config = EvaluationConfig::default();

    let id = format!(
        "Evaluate, Single Threaded, Map Size: ({}, {})",
        width, height
    );
    group.bench_function(&id, |b| b.iter(|| scenario.evaluate(&map, &config)));

    #[cfg(feature = "parallel")]
    {
        let id = format!("Evaluate, Parallel, Map Size: ({}, {})", width, height);
        group.bench_function(&id, |b| {
            b.iter(|| scenario.evaluate_parallel(&map, &config))
        });
    }
}

criterion_group!(benches, bench_single_path, bench_stepping, bench_scenario);
criterion_main!(benches);
