//! The distance estimates available to the search.

use crate::{Cost, Point, DIAGONAL_COST, STRAIGHT_COST};

/// An estimate of the remaining distance between two cells.
///
/// The search is only guaranteed to return the shortest Path if the Heuristic never
/// overestimates the actual distance (admissible) and never drops by more than the cost of a
/// single step between neighboring cells (consistent). On the 8-connected Grid this holds for
/// every Heuristic except [`Manhattan`](Heuristic::Manhattan).
///
/// ```no_code
///            estimate((0, 0), (3, 1))
/// Manhattan  3 + 1                 = 4
/// Euclidean  sqrt(3² + 1²)         ≈ 3.16
/// Octile     3 + (√2 - 1) * 1      ≈ 3.41
/// Diagonal   1.4 * 1 + (3 - 1)     = 3.4
/// Zero                             = 0
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Heuristic {
    /// `|dx| + |dy|`. Overestimates as soon as diagonal steps are possible, which makes the
    /// search greedier but no longer optimal.
    Manhattan,
    /// The straight line distance `sqrt(dx² + dy²)`.
    Euclidean,
    /// `max(|dx|, |dy|) + (√2 - 1) * min(|dx|, |dy|)`: the distance on an empty 8-connected Grid.
    #[default]
    Octile,
    /// Like [`Octile`](Heuristic::Octile), but with diagonal steps costing exactly `1.4`.
    Diagonal,
    /// Always `0`. Turns the search into Dijkstra's algorithm.
    Zero,
}

impl Heuristic {
    /// All available Heuristics
    pub const ALL: [Heuristic; 5] = [
        Heuristic::Manhattan,
        Heuristic::Euclidean,
        Heuristic::Octile,
        Heuristic::Diagonal,
        Heuristic::Zero,
    ];

    /// The estimated distance from `a` to `b` in cells.
    pub fn estimate(self, a: Point, b: Point) -> f64 {
        let (dx, dy) = deltas(a, b);
        let (dx, dy) = (dx as f64, dy as f64);
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Octile => dx.max(dy) + (std::f64::consts::SQRT_2 - 1.0) * dx.min(dy),
            Heuristic::Diagonal => 1.4 * dx.min(dy) + (dx.max(dy) - dx.min(dy)),
            Heuristic::Zero => 0.0,
        }
    }

    /// The estimate in the same scaled integer unit as step costs (`x10`, truncated).
    ///
    /// A diagonal step costs `14` rather than `10 * √2`, so a plain `x10` would overestimate.
    /// [`Octile`](Heuristic::Octile) and [`Diagonal`](Heuristic::Diagonal) are the exact
    /// cost of the obstacle-free step sequence. [`Euclidean`](Heuristic::Euclidean) is scaled
    /// by `14 / √2` per cell, so that a diagonal step changes it by at most `14`.
    ///
    /// ```
    /// # use grid_astar::Heuristic;
    /// assert_eq!(Heuristic::Octile.scaled((0, 0), (2, 2)), 28);
    /// assert_eq!(Heuristic::Octile.scaled((0, 0), (10, 10)), 140);
    /// assert_eq!(Heuristic::Euclidean.scaled((0, 0), (3, 1)), 31);
    /// assert_eq!(Heuristic::Manhattan.scaled((0, 0), (3, 1)), 40);
    /// ```
    pub fn scaled(self, a: Point, b: Point) -> Cost {
        let (dx, dy) = deltas(a, b);
        let (long, short) = (dx.max(dy), dx.min(dy));
        let free_cost = STRAIGHT_COST * (long - short) + DIAGONAL_COST * short;
        match self {
            Heuristic::Manhattan => STRAIGHT_COST * (dx + dy),
            Heuristic::Octile | Heuristic::Diagonal => free_cost,
            Heuristic::Zero => 0,
            Heuristic::Euclidean => {
                let scaled =
                    self.estimate(a, b) * DIAGONAL_COST as f64 / std::f64::consts::SQRT_2;
                // exact multiples of 14 must not round down
                ((scaled + 1e-9) as Cost).min(free_cost)
            }
        }
    }
}

fn deltas(a: Point, b: Point) -> (usize, usize) {
    (a.0.abs_diff(b.0), a.1.abs_diff(b.1))
}
