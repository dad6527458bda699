use crate::error::{MoveError, ParseError, ParseErrorKind};
use crate::{NodeID, Point};

use std::fmt;
use std::str::FromStr;

/// The walkability of a fixed `width` x `height` Grid.
///
/// A GridMap never changes after it was created, so any number of searches may share one
/// through a plain reference (including searches on different threads).
///
/// ## Examples
/// ```
/// use grid_astar::GridMap;
///
/// let map: GridMap = "type octile\nheight 2\nwidth 3\nmap\n.@.\n...\n".parse().unwrap();
///
/// assert_eq!((map.width(), map.height()), (3, 2));
/// assert!(map.is_walkable((0, 0)));
/// assert!(!map.is_walkable((1, 0)));
/// assert!(!map.is_walkable((3, 0))); // out of bounds is never walkable
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct GridMap {
    width: usize,
    height: usize,
    walkable: Vec<bool>,
}

impl GridMap {
    /// Creates a GridMap from a row-major walkability vector (`walkable[y * width + x]`).
    ///
    /// ## Panics
    /// if `walkable.len() != width * height`
    pub fn new(width: usize, height: usize, walkable: Vec<bool>) -> GridMap {
        assert_eq!(
            walkable.len(),
            width * height,
            "walkability does not match the size of the Grid"
        );
        GridMap {
            width,
            height,
            walkable,
        }
    }

    /// Creates a GridMap by asking `is_walkable` about every cell once.
    ///
    /// ```
    /// # use grid_astar::GridMap;
    /// let grid = [
    ///     [0, 1, 0],
    ///     [0, 1, 0],
    ///     [0, 0, 0],
    /// ];
    /// let map = GridMap::from_fn((3, 3), |(x, y)| grid[y][x] == 0);
    /// assert!(!map.is_walkable((1, 1)));
    /// ```
    pub fn from_fn(
        (width, height): (usize, usize),
        mut is_walkable: impl FnMut(Point) -> bool,
    ) -> GridMap {
        let mut walkable = Vec::with_capacity(width * height);
        for y in 0..height {
            for x in 0..width {
                walkable.push(is_walkable((x, y)));
            }
        }
        GridMap::new(width, height, walkable)
    }

    /// Creates a GridMap from glyph rows without a header, using the same glyphs as
    /// [`FromStr`](#impl-FromStr-for-GridMap).
    ///
    /// ```
    /// # use grid_astar::GridMap;
    /// let map = GridMap::from_rows(&["S.@", "..G"]).unwrap();
    /// assert_eq!((map.width(), map.height()), (3, 2));
    /// assert!(map.is_walkable((2, 1)));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Result<GridMap, ParseError> {
        let width = rows.first().map_or(0, |row| row.chars().count());
        let mut walkable = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::new(
                    i + 1,
                    ParseErrorKind::RowLength {
                        expected: width,
                        found,
                    },
                ));
            }
            walkable.extend(row.chars().map(GridMap::glyph_walkable));
        }
        Ok(GridMap::new(width, rows.len(), walkable))
    }

    /// Whether a map glyph denotes passable terrain: open ground (`.`) and the start/goal
    /// markers (`S`, `G`). Everything else is an obstacle.
    pub fn glyph_walkable(glyph: char) -> bool {
        matches!(glyph, '.' | 'S' | 'G')
    }

    /// The width of the Grid
    pub fn width(&self) -> usize {
        self.width
    }

    /// The height of the Grid
    pub fn height(&self) -> usize {
        self.height
    }

    /// The number of cells in the Grid
    pub fn len(&self) -> usize {
        self.walkable.len()
    }

    /// `true` if the Grid has no cells
    pub fn is_empty(&self) -> bool {
        self.walkable.is_empty()
    }

    /// `true` if `point` lies inside the Grid
    pub fn contains(&self, (x, y): Point) -> bool {
        x < self.width && y < self.height
    }

    /// Whether the cell at `point` can be walked on. Out of bounds Points are never walkable.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.contains(point) && self.walkable[point.1 * self.width + point.0]
    }

    /// Moves `point` by `(dx, dy)`, returning `None` if that leaves the Grid.
    pub fn offset(&self, point: Point, dx: isize, dy: isize) -> Option<Point> {
        let moved = (
            point.0.checked_add_signed(dx)?,
            point.1.checked_add_signed(dy)?,
        );
        self.contains(moved).then_some(moved)
    }

    /// The flat index of an in-bounds Point
    pub(crate) fn id_of(&self, (x, y): Point) -> NodeID {
        debug_assert!(self.contains((x, y)));
        (y * self.width + x) as NodeID
    }

    /// The Point of a flat index
    pub(crate) fn point_of(&self, id: NodeID) -> Point {
        let id = id as usize;
        (id % self.width, id / self.width)
    }

    /// Measures a sequence of moves in metric units: `1` per axis-aligned step and `√2` per
    /// diagonal step.
    ///
    /// The sequence is rejected if any cell is not walkable, a step skips cells or stands
    /// still, a diagonal step cuts a corner, or a cell is visited twice. A sequence of a
    /// single cell has length `0`.
    ///
    /// This is meant to check the output of a search, not to be used by one.
    ///
    /// ```
    /// # use grid_astar::{GridMap, MoveError};
    /// let map = GridMap::from_rows(&["...", "..@", "..."]).unwrap();
    ///
    /// let length = map.path_length(&[(0, 0), (1, 1), (1, 2)]).unwrap();
    /// assert!((length - (1.0 + 2f64.sqrt())).abs() < 1e-9);
    ///
    /// assert_eq!(
    ///     map.path_length(&[(1, 1), (2, 1)]),
    ///     Err(MoveError::Unwalkable { index: 1 })
    /// );
    /// assert_eq!(
    ///     map.path_length(&[(1, 1), (2, 2)]),
    ///     Err(MoveError::CornerCut { index: 1 })
    /// );
    /// ```
    pub fn path_length(&self, moves: &[Point]) -> Result<f64, MoveError> {
        let first = *moves.first().ok_or(MoveError::Empty)?;
        if !self.is_walkable(first) {
            return Err(MoveError::Unwalkable { index: 0 });
        }

        let mut visited = hashbrown::HashSet::with_capacity(moves.len());
        visited.insert(first);

        let mut length = 0.0;
        for (index, pair) in moves.windows(2).enumerate() {
            let index = index + 1;
            let (from, to) = (pair[0], pair[1]);
            if !self.is_walkable(to) {
                return Err(MoveError::Unwalkable { index });
            }

            let dx = to.0 as isize - from.0 as isize;
            let dy = to.1 as isize - from.1 as isize;
            if dx.abs() > 1 || dy.abs() > 1 {
                return Err(MoveError::TooLong { index });
            }
            if dx == 0 && dy == 0 {
                return Err(MoveError::NoMovement { index });
            }

            if dx != 0 && dy != 0 {
                let side_x = self.offset(from, dx, 0);
                let side_y = self.offset(from, 0, dy);
                let open = |side: Option<Point>| side.map_or(false, |p| self.is_walkable(p));
                if !open(side_x) || !open(side_y) {
                    return Err(MoveError::CornerCut { index });
                }
                length += std::f64::consts::SQRT_2;
            } else {
                length += 1.0;
            }

            if !visited.insert(to) {
                return Err(MoveError::Revisited { index });
            }
        }

        Ok(length)
    }
}

/// Parses the MovingAI octile map format:
///
/// ```no_code
/// type octile
/// height 2
/// width 3
/// map
/// .@.
/// ...
/// ```
///
/// `.`, `S` and `G` are walkable, every other glyph is an obstacle.
impl FromStr for GridMap {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<GridMap, ParseError> {
        let mut width = None;
        let mut height = None;
        let mut lines = s.lines().enumerate();

        let mut found_map = false;
        for (i, line) in lines.by_ref() {
            let mut tokens = line.split_whitespace();
            let Some(key) = tokens.next() else {
                continue;
            };
            match key {
                "type" => {}
                "height" => height = Some(parse_number(i + 1, tokens.next())?),
                "width" => width = Some(parse_number(i + 1, tokens.next())?),
                "map" => {
                    found_map = true;
                    break;
                }
                other => {
                    return Err(ParseError::new(
                        i + 1,
                        ParseErrorKind::UnexpectedToken(other.to_owned()),
                    ))
                }
            }
        }

        let height = height.ok_or(ParseError::new(0, ParseErrorKind::MissingHeader("height")))?;
        let width = width.ok_or(ParseError::new(0, ParseErrorKind::MissingHeader("width")))?;
        if !found_map {
            return Err(ParseError::new(0, ParseErrorKind::MissingHeader("map")));
        }

        let mut walkable = Vec::with_capacity(width * height);
        let mut rows = 0;
        let mut last_line = 0;
        for (i, line) in lines {
            let row = line.trim();
            if row.is_empty() {
                continue;
            }
            last_line = i + 1;
            let found = row.chars().count();
            if found != width {
                return Err(ParseError::new(
                    i + 1,
                    ParseErrorKind::RowLength {
                        expected: width,
                        found,
                    },
                ));
            }
            rows += 1;
            if rows > height {
                return Err(ParseError::new(
                    i + 1,
                    ParseErrorKind::RowCount {
                        expected: height,
                        found: rows,
                    },
                ));
            }
            walkable.extend(row.chars().map(GridMap::glyph_walkable));
        }

        if rows != height {
            return Err(ParseError::new(
                last_line,
                ParseErrorKind::RowCount {
                    expected: height,
                    found: rows,
                },
            ));
        }

        Ok(GridMap::new(width, height, walkable))
    }
}

fn parse_number(line: usize, token: Option<&str>) -> Result<usize, ParseError> {
    let token = token.unwrap_or_default();
    token
        .parse()
        .map_err(|_| ParseError::new(line, ParseErrorKind::InvalidNumber(token.to_owned())))
}

impl fmt::Debug for GridMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "GridMap {}x{}", self.width, self.height)?;
        for row in self.walkable.chunks(self.width.max(1)) {
            for &open in row {
                write!(f, "{}", if open { '.' } else { '@' })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
