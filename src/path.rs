use crate::Cost;

use std::cmp::Ordering;
use std::fmt;
use std::ops::Index;

/// A Path from a start to a goal, including both.
///
/// An empty Path means that no Path exists (or that the query was invalid).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path<P> {
    steps: Vec<P>,
    cost: Cost,
}

impl<P> Path<P> {
    /// Creates a Path from its steps and total scaled cost
    pub fn new(steps: Vec<P>, cost: Cost) -> Path<P> {
        Path { steps, cost }
    }

    /// The Path that signals "no Path"
    pub fn empty() -> Path<P> {
        Path {
            steps: Vec::new(),
            cost: 0,
        }
    }

    /// The total cost of the Path, scaled x10 (`10` per straight step, `14` per diagonal)
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of Points in the Path, including start and goal
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// `true` if no Path was found
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// The Points of the Path as a slice
    pub fn as_slice(&self) -> &[P] {
        &self.steps
    }

    /// Returns an Iterator over the Path
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.steps.iter()
    }

    /// The first Point of the Path
    pub fn start(&self) -> Option<&P> {
        self.steps.first()
    }

    /// The last Point of the Path
    pub fn goal(&self) -> Option<&P> {
        self.steps.last()
    }

    /// Consumes the Path and returns its Points
    pub fn into_vec(self) -> Vec<P> {
        self.steps
    }
}

impl<P> Index<usize> for Path<P> {
    type Output = P;
    fn index(&self, index: usize) -> &P {
        &self.steps[index]
    }
}

impl<P> IntoIterator for Path<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;
    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.steps == *rhs
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.steps.as_slice() == *rhs
    }
}

impl<P: Eq> Ord for Path<P> {
    fn cmp(&self, other: &Path<P>) -> Ordering {
        self.cost.cmp(&other.cost)
    }
}

impl<P: Eq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<P: fmt::Debug> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        match self.steps.split_first() {
            None => write!(fmt, "<empty>"),
            Some((first, rest)) => {
                write!(fmt, "{:?}", first)?;
                for p in rest {
                    write!(fmt, " -> {:?}", p)?;
                }
                Ok(())
            }
        }
    }
}
