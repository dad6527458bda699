//! Error types returned by the search engine, the text loaders and the path validator.
//!
//! "No path" is not an error: it is reported as an empty [`Path`](crate::Path) or as
//! [`Step::Exhausted`](crate::Step::Exhausted).

use crate::Point;
use std::fmt;

/// Which end of a query an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The start of the query
    Start,
    /// The goal of the query
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Start => write!(f, "start"),
            Endpoint::Goal => write!(f, "goal"),
        }
    }
}

/// Errors returned by [`AStar::prepare`](crate::AStar::prepare).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// The start or goal is outside of the Grid or not walkable.
    #[error("invalid {role} {point:?}: cell is out of bounds or not walkable")]
    InvalidEndpoint {
        /// The offending Point
        point: Point,
        /// Whether it was the start or the goal
        role: Endpoint,
    },
}

/// What went wrong while reading a map or scenario file.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A required header line (`height`, `width`, `map`, ...) is missing
    #[error("missing `{0}` header")]
    MissingHeader(&'static str),
    /// A field that should be a number could not be parsed
    #[error("`{0}` is not a valid number")]
    InvalidNumber(String),
    /// A map row has the wrong number of cells
    #[error("expected a row of {expected} cells, found {found}")]
    RowLength {
        /// the width from the header
        expected: usize,
        /// the length of the row
        found: usize,
    },
    /// The map has the wrong number of rows
    #[error("expected {expected} rows, found {found}")]
    RowCount {
        /// the height from the header
        expected: usize,
        /// the number of rows found
        found: usize,
    },
    /// A line that does not belong in this position
    #[error("unexpected `{0}`")]
    UnexpectedToken(String),
    /// A scenario line has too few fields
    #[error("missing field `{0}`")]
    MissingField(&'static str),
}

/// An error while reading a map or scenario file, with the 1-based line it occurred on.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number. `0` if the error is not tied to a line.
    pub line: usize,
    /// What went wrong
    pub kind: ParseErrorKind,
}

impl ParseError {
    pub(crate) fn new(line: usize, kind: ParseErrorKind) -> ParseError {
        ParseError { line, kind }
    }
}

/// Reasons why [`GridMap::path_length`](crate::GridMap::path_length) rejects a Path.
///
/// `index` is the position in the sequence of the offending Point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// The sequence contains no Points
    #[error("invalid path: no moves")]
    Empty,
    /// The Point is out of bounds or not walkable
    #[error("invalid move (terrain unpassable) at index {index}")]
    Unwalkable {
        /// position in the sequence
        index: usize,
    },
    /// The step moves more than one cell along some axis
    #[error("invalid move (too long) at index {index}")]
    TooLong {
        /// position in the sequence
        index: usize,
    },
    /// The step does not move at all
    #[error("invalid move (didn't move) at index {index}")]
    NoMovement {
        /// position in the sequence
        index: usize,
    },
    /// The diagonal step squeezes past a blocked orthogonal cell
    #[error("invalid move (can't cut corners) at index {index}")]
    CornerCut {
        /// position in the sequence
        index: usize,
    },
    /// The Point was already visited earlier in the sequence
    #[error("invalid move (cell visited twice) at index {index}")]
    Revisited {
        /// position in the sequence
        index: usize,
    },
}

/// Errors returned when evaluating a [`ScenarioSet`](crate::ScenarioSet).
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScenarioError {
    /// An experiment was recorded on a map of a different size than the one supplied.
    #[error(
        "experiment {index} expects a {}x{} map, got {}x{}",
        .expected.0, .expected.1, .found.0, .found.1
    )]
    MapMismatch {
        /// index of the experiment
        index: usize,
        /// (width, height) named by the experiment
        expected: (usize, usize),
        /// (width, height) of the supplied map
        found: (usize, usize),
    },
}
