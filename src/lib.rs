#![warn(
    missing_docs,
    missing_debug_implementations,
    missing_copy_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code,
    unstable_features,
    unused_import_braces,
    unused_qualifications
)]

//! A crate for finding shortest Paths on 8-connected Grids, one step at a time.
//!
//! ## Introduction
//! This crate implements the [A* Algorithm](https://en.wikipedia.org/wiki/A*_search_algorithm)
//! on an occupancy Grid, where every cell is either walkable or an obstacle. Agents may move to
//! any of the 8 neighboring cells. Straight steps cost `10` and diagonal steps cost `14`
//! (roughly `10 * √2`), so that all costs stay integers. A diagonal step is only allowed if
//! both cells next to it are walkable, which means Paths never squeeze through the gap between
//! two obstacles that touch at a corner.
//!
//! Unlike most implementations, the search is not a single function call. An [`AStar`] engine
//! is [prepared](AStar::prepare) with a start and a goal and then [stepped](AStar::step), each
//! step expanding exactly one node. In between steps the caller can look at the frontier, the
//! expanded cells and the best known branch, which is useful for visualizing the search, or
//! spread a search over several frames without any threads. The engine keeps all of its memory
//! between queries, so repeated searches on the same map don't allocate.
//!
//! ## Examples
//! Creating the map:
//! ```
//! use grid_astar::GridMap;
//!
//! // `.` is walkable, `@` is an obstacle
//! let map = GridMap::from_rows(&[
//!     ".....",
//!     ".@@@.",
//!     ".@...",
//!     ".@.@.",
//!     "...@.",
//! ]).unwrap();
//! ```
//! Maps can also be created from a walkability function with [`GridMap::from_fn`], or parsed
//! from the MovingAI map format with [`str::parse`].
//!
//! ### Pathfinding
//! Finding a Path in one go:
//! ```
//! # use grid_astar::GridMap;
//! # let map = GridMap::from_rows(&[
//! #     ".....",
//! #     ".@@@.",
//! #     ".@...",
//! #     ".@.@.",
//! #     "...@.",
//! # ]).unwrap();
//! use grid_astar::{AStar, SearchConfig};
//!
//! let mut astar = AStar::new(&map, SearchConfig::default());
//!
//! // no diagonal steps past the corners of (1, 3) and (3, 3)
//! let path = astar.path((0, 0), (2, 3));
//! assert_eq!(
//!     path,
//!     vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4), (1, 4), (2, 4), (2, 3)]
//! );
//! assert_eq!(path.cost(), 70);
//!
//! // an empty Path means that there is no Path
//! assert!(astar.path((0, 0), (1, 1)).is_empty());
//! ```
//!
//! Stepping through the search:
//! ```
//! # use grid_astar::{AStar, GridMap, SearchConfig};
//! # let map = GridMap::from_rows(&[
//! #     ".....",
//! #     ".@@@.",
//! #     ".@...",
//! #     ".@.@.",
//! #     "...@.",
//! # ]).unwrap();
//! # let mut astar = AStar::new(&map, SearchConfig::default());
//! use grid_astar::Step;
//!
//! astar.prepare((0, 0), (4, 4)).unwrap();
//! loop {
//!     // e.g. draw one frame for every 5 expansions
//!     match astar.advance(5) {
//!         Step::Searching => {
//!             let open = astar.open_cells().count();
//!             let closed = astar.closed_cells().count();
//!             assert!(open + closed > 0);
//!         }
//!         Step::Found(goal) => {
//!             let path = astar.reconstruct_path(goal);
//!             assert_eq!(path.goal(), Some(&(4, 4)));
//!             break;
//!         }
//!         Step::Exhausted => unreachable!(),
//!     }
//! }
//! ```
//!
//! ### Configuration
//! [`SearchConfig`] selects the [`Heuristic`] once for the lifetime of an engine. The default
//! is [`Heuristic::Octile`], which is exact on an empty Grid and keeps the Paths optimal.
//! ```
//! use grid_astar::{AStar, GridMap, Heuristic, SearchConfig};
//!
//! let map = GridMap::from_fn((8, 8), |(x, y)| x != 4 || y == 7);
//! let mut dijkstra = AStar::new(&map, SearchConfig::DIJKSTRA);
//! let mut astar = AStar::new(&map, SearchConfig::with_heuristic(Heuristic::Octile));
//!
//! let slow = dijkstra.path((0, 0), (7, 0));
//! let fast = astar.path((0, 0), (7, 0));
//! assert_eq!(slow.cost(), fast.cost());
//! assert!(astar.expansions() < dijkstra.expansions());
//! ```
//!
//! ### Benchmark scenarios
//! [`ScenarioSet`] reads MovingAI `.scen` files and checks the engine against the recorded
//! optimal lengths, using [`GridMap::path_length`] to measure and validate every Path.
//!
//! ## Features
//! - `parallel` (default): [`ScenarioSet::evaluate_parallel`] using `rayon`
//! - `log`: debug and trace output of the search through the `log` crate

/// A Point on the Grid: `(x, y)`
pub type Point = (usize, usize);

/// The index of a cell: `y * width + x`
pub type NodeID = u32;

/// A cost in tenths of a cell
pub type Cost = usize;

/// The cost of a horizontal or vertical step
pub const STRAIGHT_COST: Cost = 10;

/// The cost of a diagonal step
pub const DIAGONAL_COST: Cost = 14;

#[cfg(feature = "log")]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[cfg(not(feature = "log"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(feature = "log")]
macro_rules! re_trace {
    ($msg: literal, $expr: expr) => {{
        let timer = std::time::Instant::now();
        let ret = $expr;
        log::trace!(concat!("time to ", $msg, ": {:?}"), timer.elapsed());
        ret
    }};
}

#[cfg(not(feature = "log"))]
macro_rules! re_trace {
    ($msg: literal, $expr: expr) => {
        $expr
    };
}

mod a_star;
pub use a_star::{AStar, SearchState, Step};

mod closed_set;

mod config;
pub use config::{EvaluationConfig, SearchConfig};

mod error;
pub use error::{Endpoint, MoveError, ParseError, ParseErrorKind, ScenarioError, SearchError};

mod frontier;
pub use frontier::{EmptyFrontier, Frontier, FrontierHandle};

mod grid;
pub use grid::GridMap;

mod heuristic;
pub use heuristic::Heuristic;

mod node_pool;
pub use node_pool::{NodeState, SearchNode};

mod path;
pub use path::Path;

mod scenario;
pub use scenario::{Experiment, Outcome, Report, ScenarioSet};

/// The most commonly used types of this crate
pub mod prelude {
    pub use crate::{
        AStar, GridMap, Heuristic, Path, Point, SearchConfig, SearchError, SearchState, Step,
    };
}
