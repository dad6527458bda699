//! Benchmark scenarios in the MovingAI `.scen` format.

use crate::error::{ParseError, ParseErrorKind, ScenarioError};
use crate::{AStar, Cost, EvaluationConfig, GridMap, Point};

use std::fmt;
use std::str::FromStr;

/// A single recorded query: a start, a goal and the length of the shortest Path between them.
#[derive(Clone, Debug, PartialEq)]
pub struct Experiment {
    /// The difficulty bucket the experiment belongs to
    pub bucket: usize,
    /// The name of the map file the experiment was recorded on
    pub map: String,
    /// `(width, height)` of that map
    pub map_size: (usize, usize),
    /// The start of the query
    pub start: Point,
    /// The goal of the query
    pub goal: Point,
    /// The length of the shortest Path in metric units (`√2` per diagonal step)
    pub optimal_length: f64,
}

impl Experiment {
    fn run(&self, index: usize, astar: &mut AStar<'_>, tolerance: f64) -> Outcome {
        let path = astar.path(self.start, self.goal);
        let path_length = if path.is_empty() {
            None
        } else {
            astar.map().path_length(path.as_slice()).ok()
        };
        let passed = path_length.map_or(false, |length| {
            (length - self.optimal_length).abs() <= tolerance
        });
        Outcome {
            index,
            path_length,
            optimal_length: self.optimal_length,
            cost: path.cost(),
            expansions: astar.expansions(),
            passed,
        }
    }
}

/// The result of running a single [`Experiment`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Outcome {
    /// The index of the experiment in its [`ScenarioSet`]
    pub index: usize,
    /// The metric length of the Path that was found. `None` if no valid Path was found.
    pub path_length: Option<f64>,
    /// The recorded optimal length
    pub optimal_length: f64,
    /// The scaled cost of the Path that was found
    pub cost: Cost,
    /// How many nodes the search expanded
    pub expansions: usize,
    /// Whether the Path was within the tolerance of the optimal length
    pub passed: bool,
}

/// The outcomes of all experiments of a [`ScenarioSet`], in order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// One entry per experiment
    pub outcomes: Vec<Outcome>,
}

impl Report {
    /// The number of experiments that were run
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    /// `true` if no experiments were run
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// The number of experiments that passed
    pub fn passed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    /// The experiments that failed
    pub fn failures(&self) -> impl Iterator<Item = &Outcome> + '_ {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    /// The fraction of failed experiments, between `0` and `1`
    pub fn failure_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        (self.len() - self.passed()) as f64 / self.len() as f64
    }

    /// The total number of nodes expanded over all experiments
    pub fn expansions(&self) -> usize {
        self.outcomes.iter().map(|o| o.expansions).sum()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Failure rate: {} / {} ({:.2}%)",
            self.len() - self.passed(),
            self.len(),
            self.failure_rate() * 100.0
        )
    }
}

/// A list of [`Experiment`]s recorded on one map.
///
/// ## Examples
/// ```
/// use grid_astar::{EvaluationConfig, GridMap, ScenarioSet};
///
/// let map = GridMap::from_rows(&["....", "....", "...."]).unwrap();
/// let scenario: ScenarioSet = "version 1
/// 0\tgrid.map\t4\t3\t0\t0\t3\t0\t3
/// 0\tgrid.map\t4\t3\t0\t0\t3\t2\t3.82842712
/// ".parse().unwrap();
///
/// let report = scenario.evaluate(&map, &EvaluationConfig::default()).unwrap();
/// assert_eq!(report.len(), 2);
/// assert_eq!(report.passed(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScenarioSet {
    version: Option<String>,
    experiments: Vec<Experiment>,
}

impl ScenarioSet {
    /// Creates a ScenarioSet from a list of experiments
    pub fn new(experiments: Vec<Experiment>) -> ScenarioSet {
        ScenarioSet {
            version: None,
            experiments,
        }
    }

    /// The version from the `version` header, if there was one
    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    /// The number of experiments
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// `true` if there are no experiments
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// The `n`-th experiment
    pub fn get(&self, n: usize) -> Option<&Experiment> {
        self.experiments.get(n)
    }

    /// Iterates over all experiments
    pub fn iter(&self) -> std::slice::Iter<'_, Experiment> {
        self.experiments.iter()
    }

    /// Runs every experiment on `map` with a single reused engine.
    ///
    /// ## Errors
    /// [`ScenarioError::MapMismatch`] if an experiment was recorded on a map of another size.
    pub fn evaluate(
        &self,
        map: &GridMap,
        config: &EvaluationConfig,
    ) -> Result<Report, ScenarioError> {
        self.check_map(map)?;

        let mut astar = AStar::new(map, config.search);
        let outcomes = re_trace!(
            "evaluate scenario",
            self.experiments
                .iter()
                .enumerate()
                .map(|(index, experiment)| experiment.run(index, &mut astar, config.tolerance))
                .collect()
        );

        let report = Report { outcomes };
        log_debug!("{}", report);
        Ok(report)
    }

    /// Same as [`evaluate`](ScenarioSet::evaluate), but spreads the experiments over the
    /// `rayon` thread pool. Every worker thread uses its own engine.
    #[cfg(feature = "parallel")]
    pub fn evaluate_parallel(
        &self,
        map: &GridMap,
        config: &EvaluationConfig,
    ) -> Result<Report, ScenarioError> {
        use rayon::prelude::*;

        self.check_map(map)?;

        let outcomes = re_trace!(
            "evaluate scenario in parallel",
            self.experiments
                .par_iter()
                .enumerate()
                .map_init(
                    || AStar::new(map, config.search),
                    |astar, (index, experiment)| {
                        experiment.run(index, astar, config.tolerance)
                    },
                )
                .collect()
        );

        let report = Report { outcomes };
        log_debug!("{}", report);
        Ok(report)
    }

    fn check_map(&self, map: &GridMap) -> Result<(), ScenarioError> {
        let found = (map.width(), map.height());
        match self
            .experiments
            .iter()
            .position(|experiment| experiment.map_size != found)
        {
            Some(index) => Err(ScenarioError::MapMismatch {
                index,
                expected: self.experiments[index].map_size,
                found,
            }),
            None => Ok(()),
        }
    }
}

impl<'a> IntoIterator for &'a ScenarioSet {
    type Item = &'a Experiment;
    type IntoIter = std::slice::Iter<'a, Experiment>;
    fn into_iter(self) -> Self::IntoIter {
        self.experiments.iter()
    }
}

/// Parses the MovingAI scenario format:
///
/// ```no_code
/// version 1
/// <bucket> <map> <map width> <map height> <start x> <start y> <goal x> <goal y> <optimal length>
/// ...
/// ```
///
/// Fields are separated by tabs or spaces. The `version` line is optional.
impl FromStr for ScenarioSet {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<ScenarioSet, ParseError> {
        let mut scenario = ScenarioSet::default();

        for (i, line) in s.lines().enumerate() {
            let line_number = i + 1;
            let mut fields = line.split_whitespace();
            let Some(first) = fields.next() else {
                continue;
            };
            if first == "version" {
                if scenario.version.is_some() || !scenario.experiments.is_empty() {
                    return Err(ParseError::new(
                        line_number,
                        ParseErrorKind::UnexpectedToken(first.to_owned()),
                    ));
                }
                scenario.version = fields.next().map(str::to_owned);
                continue;
            }

            let mut fields = std::iter::once(first).chain(fields);
            let mut next = |name: &'static str| {
                fields
                    .next()
                    .ok_or(ParseError::new(line_number, ParseErrorKind::MissingField(name)))
            };

            let bucket = number(line_number, next("bucket")?)?;
            let map = next("map")?.to_owned();
            let map_size = (
                number(line_number, next("map width")?)?,
                number(line_number, next("map height")?)?,
            );
            let start = (
                number(line_number, next("start x")?)?,
                number(line_number, next("start y")?)?,
            );
            let goal = (
                number(line_number, next("goal x")?)?,
                number(line_number, next("goal y")?)?,
            );
            let optimal_length = number(line_number, next("optimal length")?)?;

            scenario.experiments.push(Experiment {
                bucket,
                map,
                map_size,
                start,
                goal,
                optimal_length,
            });
        }

        Ok(scenario)
    }
}

fn number<T: FromStr>(line: usize, token: &str) -> Result<T, ParseError> {
    token
        .parse()
        .map_err(|_| ParseError::new(line, ParseErrorKind::InvalidNumber(token.to_owned())))
}
