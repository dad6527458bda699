use grid_astar::prelude::*;
use grid_astar::{NodeState, DIAGONAL_COST, STRAIGHT_COST};
use nanorand::{Rng, WyRand};

use std::cmp::Reverse;
use std::collections::BinaryHeap;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn random_map(rng: &mut WyRand, (width, height): (usize, usize), obstacles: u32) -> GridMap {
    GridMap::from_fn((width, height), |_| rng.generate_range(0_u32..100) >= obstacles)
}

fn random_walkable(rng: &mut WyRand, map: &GridMap) -> Point {
    loop {
        let p = (
            rng.generate_range(0..map.width()),
            rng.generate_range(0..map.height()),
        );
        if map.is_walkable(p) {
            return p;
        }
    }
}

/// Plain Dijkstra over the whole map with the same movement rules.
fn reference_cost(map: &GridMap, start: Point, goal: Point) -> Option<usize> {
    let index = |(x, y): Point| y * map.width() + x;
    let mut dist = vec![usize::MAX; map.len()];
    let mut heap = BinaryHeap::new();
    dist[index(start)] = 0;
    heap.push(Reverse((0, start)));

    while let Some(Reverse((cost, p))) = heap.pop() {
        if p == goal {
            return Some(cost);
        }
        if cost > dist[index(p)] {
            continue;
        }
        for dy in -1..=1 {
            for dx in -1..=1 {
                if (dx, dy) == (0, 0) {
                    continue;
                }
                let Some(next) = map.offset(p, dx, dy) else {
                    continue;
                };
                if !map.is_walkable(next) {
                    continue;
                }
                let step = if dx != 0 && dy != 0 {
                    let side_a = (next.0, p.1);
                    let side_b = (p.0, next.1);
                    if !map.is_walkable(side_a) || !map.is_walkable(side_b) {
                        continue;
                    }
                    DIAGONAL_COST
                } else {
                    STRAIGHT_COST
                };
                let next_cost = cost + step;
                if next_cost < dist[index(next)] {
                    dist[index(next)] = next_cost;
                    heap.push(Reverse((next_cost, next)));
                }
            }
        }
    }
    None
}

fn step_costs(path: &Path<Point>) -> usize {
    path.as_slice()
        .windows(2)
        .map(|w| {
            if w[0].0 != w[1].0 && w[0].1 != w[1].1 {
                DIAGONAL_COST
            } else {
                STRAIGHT_COST
            }
        })
        .sum()
}

#[test]
fn optimal_on_random_maps() {
    init();
    let mut rng = WyRand::new_seed(7);

    for _ in 0..15 {
        let map = random_map(&mut rng, (32, 24), 30);
        for heuristic in [
            Heuristic::Euclidean,
            Heuristic::Octile,
            Heuristic::Diagonal,
            Heuristic::Zero,
        ] {
            let mut astar = AStar::new(&map, SearchConfig::with_heuristic(heuristic));
            for _ in 0..10 {
                let start = random_walkable(&mut rng, &map);
                let goal = random_walkable(&mut rng, &map);

                let path = astar.path(start, goal);
                match reference_cost(&map, start, goal) {
                    Some(cost) => {
                        assert_eq!(path.cost(), cost, "{:?} {:?} -> {:?}", heuristic, start, goal);
                        assert_eq!(astar.state(), SearchState::Found);
                    }
                    None => {
                        assert!(path.is_empty());
                        assert_eq!(astar.state(), SearchState::Exhausted);
                    }
                }
            }
        }
    }
}

#[test]
fn paths_are_valid() {
    init();
    let mut rng = WyRand::new_seed(1234);

    for _ in 0..10 {
        let map = random_map(&mut rng, (40, 40), 25);
        for heuristic in Heuristic::ALL {
            let mut astar = AStar::new(&map, SearchConfig::with_heuristic(heuristic));
            for _ in 0..10 {
                let start = random_walkable(&mut rng, &map);
                let goal = random_walkable(&mut rng, &map);

                let path = astar.path(start, goal);
                let reachable = reference_cost(&map, start, goal);
                assert_eq!(path.is_empty(), reachable.is_none());
                if path.is_empty() {
                    continue;
                }

                assert_eq!(path.start(), Some(&start));
                assert_eq!(path.goal(), Some(&goal));
                assert_eq!(path.cost(), step_costs(&path));
                assert!(path.cost() >= reachable.unwrap_or(0));

                let length = map.path_length(path.as_slice()).unwrap();
                assert!((length - path_metric(&path)).abs() < 1e-9);
            }
        }
    }
}

#[test]
fn reused_engine_is_deterministic() {
    let mut rng = WyRand::new_seed(99);
    let map = random_map(&mut rng, (50, 50), 20);
    let queries: Vec<(Point, Point)> = (0..20)
        .map(|_| (random_walkable(&mut rng, &map), random_walkable(&mut rng, &map)))
        .collect();

    let mut reused = AStar::new(&map, SearchConfig::default());
    for &(start, goal) in &queries {
        let mut fresh = AStar::new(&map, SearchConfig::default());
        let expected = fresh.path(start, goal);
        assert_eq!(reused.path(start, goal), expected);
        assert_eq!(reused.expansions(), fresh.expansions());
    }
}

#[test]
fn stepping_matches_run() {
    let mut rng = WyRand::new_seed(5);
    let map = random_map(&mut rng, (30, 30), 20);
    let start = random_walkable(&mut rng, &map);
    let goal = random_walkable(&mut rng, &map);

    let mut astar = AStar::new(&map, SearchConfig::default());
    let expected = astar.path(start, goal);
    let expansions = astar.expansions();

    astar.prepare(start, goal).unwrap();
    let mut steps = 0;
    let terminal = loop {
        steps += 1;
        match astar.step() {
            Step::Searching => {
                assert_eq!(astar.state(), SearchState::Stepping);
                let current = astar.current().unwrap();
                assert_eq!(astar.node_state(current), NodeState::Closed);
                assert_eq!(astar.current_branch().last(), Some(&current));
            }
            Step::Found(goal) => break Some(goal),
            Step::Exhausted => break None,
        }
    };
    assert_eq!(steps, expansions + usize::from(terminal.is_none()));

    let path = match terminal {
        Some(goal) => astar.reconstruct_path(goal),
        None => Path::empty(),
    };
    assert_eq!(path, expected);
}

#[test]
fn disconnected_regions() {
    init();
    // a full wall at x = 5
    let map = GridMap::from_fn((10, 6), |(x, _)| x != 5);
    let mut astar = AStar::new(&map, SearchConfig::default());

    let path = astar.path((0, 0), (9, 5));
    assert!(path.is_empty());
    assert_eq!(astar.state(), SearchState::Exhausted);
    // every cell left of the wall was expanded once
    assert_eq!(astar.expansions(), 5 * 6);
    assert_eq!(astar.closed_cells().count(), 5 * 6);
    assert_eq!(astar.open_cells().count(), 0);
    assert!(astar.closed_cells().all(|(x, _)| x < 5));

    // the engine stays terminated
    assert_eq!(astar.step(), Step::Exhausted);
    assert_eq!(astar.advance(10), Step::Exhausted);
}

#[test]
fn parsed_map() {
    let map: GridMap = "type octile
height 4
width 6
map
S..@..
.@@@..
.@....
...@.G
"
    .parse()
    .unwrap();

    let mut astar = AStar::new(&map, SearchConfig::default());
    let path = astar.path((0, 0), (5, 3));
    assert_eq!(path.cost(), reference_cost(&map, (0, 0), (5, 3)).unwrap());
    let length = map.path_length(path.as_slice()).unwrap();
    assert!((length - path_metric(&path)).abs() < 1e-9);
}

fn path_metric(path: &Path<Point>) -> f64 {
    path.as_slice()
        .windows(2)
        .map(|w| {
            if w[0].0 != w[1].0 && w[0].1 != w[1].1 {
                std::f64::consts::SQRT_2
            } else {
                1.0
            }
        })
        .sum()
}
