use crate::Heuristic;

/// Options for an [`AStar`](crate::AStar) engine. They are fixed for the lifetime of the engine.
///
/// Default options:
/// ```
/// # use grid_astar::{Heuristic, SearchConfig};
/// assert_eq!(
///     SearchConfig {
///         heuristic: Heuristic::Octile,
///         frontier_capacity: 256,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    /// The distance estimate that guides the search (defaults to [`Heuristic::Octile`])
    pub heuristic: Heuristic,
    /// How many frontier entries to allocate up front (defaults to `256`).
    ///
    /// The frontier grows as needed, and keeps its memory between searches.
    pub frontier_capacity: usize,
}

impl SearchConfig {
    /// Uniform cost search: no Heuristic at all.
    ///
    /// Values:
    /// ```
    /// # use grid_astar::{Heuristic, SearchConfig};
    /// assert_eq!(
    ///     SearchConfig {
    ///         heuristic: Heuristic::Zero,
    ///         frontier_capacity: 256,
    ///     },
    ///     SearchConfig::DIJKSTRA
    /// );
    /// ```
    pub const DIJKSTRA: SearchConfig = SearchConfig {
        heuristic: Heuristic::Zero,
        frontier_capacity: 256,
    };

    /// Straight line distance as the Heuristic.
    pub const EUCLIDEAN: SearchConfig = SearchConfig {
        heuristic: Heuristic::Euclidean,
        frontier_capacity: 256,
    };

    /// The default options with a different [`Heuristic`]
    pub fn with_heuristic(heuristic: Heuristic) -> SearchConfig {
        SearchConfig {
            heuristic,
            ..Default::default()
        }
    }
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            heuristic: Heuristic::Octile,
            frontier_capacity: 256,
        }
    }
}

/// Options for [`ScenarioSet::evaluate`](crate::ScenarioSet::evaluate).
///
/// Default options:
/// ```
/// # use grid_astar::{EvaluationConfig, SearchConfig};
/// assert_eq!(
///     EvaluationConfig {
///         search: SearchConfig::default(),
///         tolerance: 1.0,
///     },
///     Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EvaluationConfig {
    /// The options for the engine running the experiments
    pub search: SearchConfig,
    /// How far (in metric units) a found Path may be from the recorded optimal length
    /// before the experiment counts as failed (defaults to `1.0`).
    ///
    /// Step costs are rounded to `10` and `14`, so Paths that are optimal in that unit can be
    /// slightly longer than the true optimum on long routes.
    pub tolerance: f64,
}

impl Default for EvaluationConfig {
    fn default() -> EvaluationConfig {
        EvaluationConfig {
            search: SearchConfig::default(),
            tolerance: 1.0,
        }
    }
}
