use crate::closed_set::ClosedSet;
use crate::error::{Endpoint, SearchError};
use crate::frontier::{EmptyFrontier, Frontier};
use crate::node_pool::{NodePool, NodeState, SearchNode};
use crate::{GridMap, NodeID, Path, Point, SearchConfig, DIAGONAL_COST, STRAIGHT_COST};

/// The 8 neighbors of a cell, row by row.
const NEIGHBORS: [(isize, isize); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// The lifecycle of a search session.
///
/// ```no_code
/// Idle --prepare--> Prepared --step--> Stepping --step--> Found
///                       |                  |
///                       +------step--------+--step--> Exhausted
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchState {
    /// No search was prepared yet
    Idle,
    /// Start and goal are fixed and the start is in the frontier
    Prepared,
    /// At least one node was expanded and the search is still running
    Stepping,
    /// The goal was expanded. The Path can be reconstructed.
    Found,
    /// The frontier ran empty before the goal was reached
    Exhausted,
}

impl SearchState {
    /// `true` for [`Found`](SearchState::Found) and [`Exhausted`](SearchState::Exhausted)
    pub fn is_terminated(self) -> bool {
        matches!(self, SearchState::Found | SearchState::Exhausted)
    }
}

/// The outcome of a single [`AStar::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// A node was expanded, the goal was not reached yet
    Searching,
    /// The goal was reached. Pass the node to [`AStar::reconstruct_path`].
    Found(NodeID),
    /// There is no Path to the goal
    Exhausted,
}

#[derive(Clone, Copy, Debug)]
struct Session {
    start: NodeID,
    goal: NodeID,
    goal_pos: Point,
    state: SearchState,
    current: Option<NodeID>,
    expansions: usize,
}

/// An A* search on a [`GridMap`] that can be driven one expansion at a time.
///
/// Movement is 8-connected: straight steps cost `10`, diagonal steps cost `14`, and a diagonal
/// step is only allowed if both cells it passes between are walkable.
///
/// The engine owns all per-search memory (node records, frontier and closed set) and reuses it
/// for every query, so one engine should be kept around for repeated searches on the same map.
/// Searches on other threads need their own engine; the map itself can be shared.
///
/// ## Examples
/// Searching in one go:
/// ```
/// use grid_astar::{AStar, GridMap, SearchConfig};
///
/// let map = GridMap::from_rows(&[
///     "S..",
///     "@@.",
///     "..G",
/// ]).unwrap();
/// let mut astar = AStar::new(&map, SearchConfig::default());
///
/// let path = astar.path((0, 0), (2, 2));
/// assert_eq!(path, vec![(0, 0), (1, 0), (2, 0), (2, 1), (2, 2)]);
/// assert_eq!(path.cost(), 40);
/// ```
///
/// Stepping through a search:
/// ```
/// # use grid_astar::{AStar, GridMap, SearchConfig, SearchState, Step};
/// # let map = GridMap::from_rows(&["S..", "@@.", "..G"]).unwrap();
/// # let mut astar = AStar::new(&map, SearchConfig::default());
/// astar.prepare((0, 0), (2, 2)).unwrap();
/// assert_eq!(astar.state(), SearchState::Prepared);
///
/// let goal = loop {
///     match astar.step() {
///         Step::Searching => println!("open: {}", astar.open_cells().count()),
///         Step::Found(goal) => break Some(goal),
///         Step::Exhausted => break None,
///     }
/// };
/// let path = astar.reconstruct_path(goal.unwrap());
/// assert_eq!(path.len(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct AStar<'m> {
    map: &'m GridMap,
    config: SearchConfig,
    nodes: NodePool,
    open: Frontier,
    closed: ClosedSet,
    session: Option<Session>,
}

impl<'m> AStar<'m> {
    /// Creates an idle engine for `map`
    pub fn new(map: &'m GridMap, config: SearchConfig) -> AStar<'m> {
        AStar {
            map,
            config,
            nodes: NodePool::new(map.len()),
            open: Frontier::with_capacity(config.frontier_capacity),
            closed: ClosedSet::new(map.len()),
            session: None,
        }
    }

    /// The map this engine searches on
    pub fn map(&self) -> &'m GridMap {
        self.map
    }

    /// The options this engine was created with
    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Starts a new search from `start` to `goal`, discarding any previous one.
    ///
    /// ## Errors
    /// [`SearchError::InvalidEndpoint`] if either Point is out of bounds or not walkable. The
    /// previous session, if any, is left untouched.
    pub fn prepare(&mut self, start: Point, goal: Point) -> Result<(), SearchError> {
        for (point, role) in [(start, Endpoint::Start), (goal, Endpoint::Goal)] {
            if !self.map.is_walkable(point) {
                log_debug!("cannot search: {} {:?} is not walkable", role, point);
                return Err(SearchError::InvalidEndpoint { point, role });
            }
        }

        self.session = None;
        self.nodes.reset();
        self.open.clear();
        self.closed.clear();

        let start_id = self.map.id_of(start);
        let h = self.config.heuristic.scaled(start, goal);
        let node = self.nodes.get_mut(start_id);
        node.h = h;
        node.f = h;
        node.state = NodeState::Open;
        node.handle = Some(self.open.push(start_id, h, h));

        self.session = Some(Session {
            start: start_id,
            goal: self.map.id_of(goal),
            goal_pos: goal,
            state: SearchState::Prepared,
            current: None,
            expansions: 0,
        });
        log_debug!("prepared search {:?} -> {:?} (h = {})", start, goal, h);
        Ok(())
    }

    /// Expands the most promising node of the frontier.
    ///
    /// Once the search has terminated, every further call returns the same result. Calling
    /// this on an [`Idle`](SearchState::Idle) engine returns [`Step::Exhausted`].
    pub fn step(&mut self) -> Step {
        let Some(session) = self.session.as_mut() else {
            return Step::Exhausted;
        };
        match session.state {
            SearchState::Found => return Step::Found(session.goal),
            SearchState::Exhausted | SearchState::Idle => return Step::Exhausted,
            SearchState::Prepared | SearchState::Stepping => {}
        }

        let current = match self.open.pop_min() {
            Ok(current) => current,
            Err(EmptyFrontier) => {
                session.state = SearchState::Exhausted;
                log_debug!("no path: exhausted after {} expansions", session.expansions);
                return Step::Exhausted;
            }
        };
        session.state = SearchState::Stepping;
        session.current = Some(current);
        session.expansions += 1;

        let node = self.nodes.get_mut(current);
        node.state = NodeState::Closed;
        node.handle = None;
        let current_g = node.g;
        self.closed.mark(current);
        debug_assert_eq!(self.closed.len(), session.expansions);

        if current == session.goal {
            session.state = SearchState::Found;
            log_debug!(
                "found path with cost {} after {} expansions",
                current_g,
                session.expansions
            );
            return Step::Found(current);
        }

        let map = self.map;
        let heuristic = self.config.heuristic;
        let current_pos = map.point_of(current);

        for &(dx, dy) in NEIGHBORS.iter() {
            let Some(next_pos) = map.offset(current_pos, dx, dy) else {
                continue;
            };
            let next = map.id_of(next_pos);
            if self.closed.contains(next) || !map.is_walkable(next_pos) {
                continue;
            }
            let diagonal = dx != 0 && dy != 0;
            if diagonal
                && !(walkable_offset(map, current_pos, dx, 0)
                    && walkable_offset(map, current_pos, 0, dy))
            {
                continue;
            }

            let g = current_g + if diagonal { DIAGONAL_COST } else { STRAIGHT_COST };
            let node = self.nodes.get_mut(next);
            match node.state {
                NodeState::Unseen => {
                    let h = heuristic.scaled(next_pos, session.goal_pos);
                    node.g = g;
                    node.h = h;
                    node.f = g + h;
                    node.parent = Some(current);
                    node.state = NodeState::Open;
                    node.handle = Some(self.open.push(next, node.f, h));
                }
                NodeState::Open if g < node.g => {
                    node.g = g;
                    node.f = g + node.h;
                    node.parent = Some(current);
                    if let Some(handle) = node.handle {
                        self.open.decrease_key(handle, node.f, node.h);
                    }
                }
                NodeState::Open | NodeState::Closed => {}
            }
        }

        Step::Searching
    }

    /// Calls [`step`](AStar::step) up to `max_steps` times, stopping early once the search
    /// terminates, and returns the last result.
    ///
    /// Useful for spreading a search over several frames.
    pub fn advance(&mut self, max_steps: usize) -> Step {
        let mut step = self.last_step();
        for _ in 0..max_steps {
            step = self.step();
            if step != Step::Searching {
                break;
            }
        }
        step
    }

    /// Steps until the search terminates and returns the final result.
    pub fn run(&mut self) -> Step {
        loop {
            match self.step() {
                Step::Searching => {}
                done => return done,
            }
        }
    }

    /// Finds the shortest Path from `start` to `goal`.
    ///
    /// Returns an empty Path if there is none, or if either Point is not walkable.
    pub fn path(&mut self, start: Point, goal: Point) -> Path<Point> {
        if self.prepare(start, goal).is_err() {
            return Path::empty();
        }
        match re_trace!("search", self.run()) {
            Step::Found(goal) => self.reconstruct_path(goal),
            Step::Searching | Step::Exhausted => Path::empty(),
        }
    }

    /// Follows the parents of `terminal` back to the start.
    ///
    /// Returns an empty Path unless `terminal` is the goal of a successful search.
    ///
    /// ## Panics
    /// in debug builds, if the search has not terminated yet
    #[track_caller]
    pub fn reconstruct_path(&self, terminal: NodeID) -> Path<Point> {
        debug_assert!(
            self.state().is_terminated(),
            "reconstruct_path called before the search terminated"
        );
        let Some(session) = &self.session else {
            return Path::empty();
        };
        if terminal != session.goal || session.state != SearchState::Found {
            return Path::empty();
        }

        let mut steps = vec![];
        let mut current = Some(terminal);
        while let Some(id) = current {
            steps.push(self.map.point_of(id));
            current = self.nodes.get(id).parent;
        }
        steps.reverse();
        debug_assert_eq!(steps.first(), Some(&self.map.point_of(session.start)));

        Path::new(steps, self.nodes.get(terminal).g)
    }

    /// The state of the current session
    pub fn state(&self) -> SearchState {
        self.session
            .as_ref()
            .map_or(SearchState::Idle, |session| session.state)
    }

    /// The start of the current session
    pub fn start(&self) -> Option<Point> {
        let session = self.session.as_ref()?;
        Some(self.map.point_of(session.start))
    }

    /// The goal of the current session
    pub fn goal(&self) -> Option<Point> {
        self.session.as_ref().map(|session| session.goal_pos)
    }

    /// The number of nodes expanded in the current session
    pub fn expansions(&self) -> usize {
        self.session
            .as_ref()
            .map_or(0, |session| session.expansions)
    }

    /// The number of cells the current session has touched (Open or Closed)
    pub fn touched(&self) -> usize {
        self.nodes.touched()
    }

    /// The Point of a [`NodeID`] returned by [`step`](AStar::step)
    pub fn point(&self, id: NodeID) -> Point {
        self.map.point_of(id)
    }

    /// The search record of a cell, or `None` if `point` is out of bounds
    pub fn node(&self, point: Point) -> Option<&SearchNode> {
        self.map
            .contains(point)
            .then(|| self.nodes.get(self.map.id_of(point)))
    }

    /// Whether a cell is Unseen, Open or Closed. Out of bounds cells are always Unseen.
    pub fn node_state(&self, point: Point) -> NodeState {
        self.node(point).map_or(NodeState::Unseen, SearchNode::state)
    }

    /// The cells currently in the frontier, in no particular order
    pub fn open_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.open.iter().map(|(id, _, _)| self.map.point_of(id))
    }

    /// The cells expanded so far, in expansion order
    pub fn closed_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.closed.iter().map(|id| self.map.point_of(id))
    }

    /// Read access to the frontier, including the priorities of its entries
    pub fn frontier(&self) -> &Frontier {
        &self.open
    }

    /// The cell expanded by the latest step
    pub fn current(&self) -> Option<Point> {
        let current = self.session.as_ref()?.current?;
        Some(self.map.point_of(current))
    }

    /// The best known Path from the start to the cell expanded by the latest step.
    ///
    /// Empty before the first step.
    pub fn current_branch(&self) -> Vec<Point> {
        let mut branch = vec![];
        let mut current = self.session.as_ref().and_then(|session| session.current);
        while let Some(id) = current {
            branch.push(self.map.point_of(id));
            current = self.nodes.get(id).parent;
        }
        branch.reverse();
        branch
    }

    fn last_step(&self) -> Step {
        match self.session {
            Some(Session {
                state: SearchState::Found,
                goal,
                ..
            }) => Step::Found(goal),
            Some(Session {
                state: SearchState::Prepared | SearchState::Stepping,
                ..
            }) => Step::Searching,
            _ => Step::Exhausted,
        }
    }
}

fn walkable_offset(map: &GridMap, point: Point, dx: isize, dy: isize) -> bool {
    map.offset(point, dx, dy)
        .map_or(false, |p| map.is_walkable(p))
}
