//! The shared search contract: algorithm selector, results and errors.

use std::fmt;

use tracepath_core::{Grid, Point};

use crate::space::{SearchSpace, UNREACHABLE};
use crate::trace::{StepEvent, StepKind, StepTrace};

// ---------------------------------------------------------------------------
// Algorithm
// ---------------------------------------------------------------------------

/// The available search strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// Breadth-first search: fewest steps, weights ignored for ordering.
    Bfs,
    /// Dijkstra: cheapest weighted path, no heuristic.
    Dijkstra,
    /// A*: cheapest weighted path guided by Euclidean distance.
    #[default]
    AStar,
    /// Greedy best-first: follows Euclidean distance only, not optimal.
    Greedy,
    /// 4-directional jump point search.
    JumpPoint,
}

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bfs,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Greedy,
        Algorithm::JumpPoint,
    ];

    /// Short lowercase name, as used in logs.
    pub const fn name(self) -> &'static str {
        match self {
            Algorithm::Bfs => "bfs",
            Algorithm::Dijkstra => "dijkstra",
            Algorithm::AStar => "astar",
            Algorithm::Greedy => "greedy",
            Algorithm::JumpPoint => "jps",
        }
    }

    /// Run this algorithm with a fresh [`SearchSpace`].
    pub fn find_path(self, grid: &Grid, start: Point, end: Point) -> Result<Search, SearchError> {
        SearchSpace::for_grid(grid).find_path(self, grid, start, end)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A route from start to end, inclusive, where consecutive cells are
/// 4-neighbors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
    cost: i64,
}

impl Path {
    /// Build a path over `grid`. The cost is the sum of the weights of every
    /// cell entered, i.e. all cells but the first.
    pub fn from_points(grid: &Grid, points: Vec<Point>) -> Self {
        let cost = points
            .iter()
            .skip(1)
            .map(|&p| i64::from(grid.weight(p)))
            .fold(0i64, i64::saturating_add);
        Self { points, cost }
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    #[inline]
    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    /// Number of cells, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total weighted cost.
    #[inline]
    pub fn cost(&self) -> i64 {
        self.cost
    }

    /// Number of steps (edges).
    #[inline]
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Point> {
        self.points.last().copied()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.points.contains(&p)
    }

    /// Whether every consecutive pair of cells is 4-adjacent.
    pub fn is_contiguous(&self) -> bool {
        self.points.windows(2).all(|w| w[0].is_adjacent4(w[1]))
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// Outcome of one `find_path` call.
#[derive(Debug, Clone, PartialEq)]
pub struct Search {
    pub algorithm: Algorithm,
    /// The route, or `None` if the end was never reached.
    pub path: Option<Path>,
    /// Every decision, in order.
    pub trace: StepTrace,
    /// The search's own accumulated cost at the end cell.
    pub end_cost: Option<i64>,
}

impl Search {
    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        self.path.is_some()
    }

    /// Number of cells expanded, excluding the endpoints.
    pub fn visited(&self) -> usize {
        self.trace.count(StepKind::Visit)
    }

    /// Total weighted cost of the path, if any.
    pub fn path_cost(&self) -> Option<i64> {
        self.path.as_ref().map(Path::cost)
    }
}

// ---------------------------------------------------------------------------
// SearchError
// ---------------------------------------------------------------------------

/// Invalid search requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// An endpoint lies outside the grid.
    OutOfBounds(Point),
    /// Start and end are the same cell.
    SameEndpoints(Point),
    /// An endpoint is impassable.
    Blocked(Point),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "search: endpoint {p} is outside the grid"),
            Self::SameEndpoints(p) => write!(f, "search: start and end are both {p}"),
            Self::Blocked(p) => write!(f, "search: endpoint {p} is impassable"),
        }
    }
}

impl std::error::Error for SearchError {}

// ---------------------------------------------------------------------------
// Shared driver
// ---------------------------------------------------------------------------

impl SearchSpace {
    /// Find a path from `start` to `end` with `algorithm`.
    ///
    /// Every algorithm shares this contract: the returned [`Search`] holds
    /// the path (if the end is reachable) and the complete step trace.
    pub fn find_path(
        &mut self,
        algorithm: Algorithm,
        grid: &Grid,
        start: Point,
        end: Point,
    ) -> Result<Search, SearchError> {
        check_endpoints(grid, start, end)?;
        self.begin(grid);

        let mut trace = StepTrace::new();
        trace.push(StepEvent::MarkStart(start));
        trace.push(StepEvent::MarkEnd(end));

        let found = match algorithm {
            Algorithm::Bfs => self.bfs(grid, start, end, &mut trace),
            Algorithm::Dijkstra | Algorithm::AStar | Algorithm::Greedy => {
                self.best_first(algorithm, grid, start, end, &mut trace)
            }
            Algorithm::JumpPoint => self.jps(grid, start, end, &mut trace),
        };

        Ok(self.finish(algorithm, grid, end, found, trace))
    }

    /// Reconstruct the path, append its `MarkPath` events and log a summary.
    fn finish(
        &self,
        algorithm: Algorithm,
        grid: &Grid,
        end: Point,
        found: bool,
        mut trace: StepTrace,
    ) -> Search {
        let end_cost = self.cost_at(end);
        let path = if found { self.backtrack(grid, end) } else { None };

        if let Some(path) = &path {
            let n = path.len();
            for &p in path.points().iter().skip(1).take(n.saturating_sub(2)) {
                trace.push(StepEvent::MarkPath(p));
            }
        }

        match &path {
            Some(p) => log::debug!(
                "{algorithm}: path of {} cells, cost {}, {} visited, {} events",
                p.len(),
                p.cost(),
                trace.count(StepKind::Visit),
                trace.len()
            ),
            None => log::debug!(
                "{algorithm}: end {end} unreachable, {} visited",
                trace.count(StepKind::Visit)
            ),
        }

        Search {
            algorithm,
            path,
            trace,
            end_cost,
        }
    }

    /// Follow predecessors back from `end`, then expand straight segments
    /// between consecutive cells into single steps.
    fn backtrack(&self, grid: &Grid, end: Point) -> Option<Path> {
        let ei = self.idx(end)?;
        if self.cost(ei) == UNREACHABLE {
            return None;
        }
        let mut chain = vec![end];
        let mut ci = ei;
        while let Some(pi) = self.parent(ci) {
            chain.push(self.point(pi));
            ci = pi;
            // Predecessor links only ever point to strictly cheaper cells.
            debug_assert!(chain.len() <= grid.len());
        }
        chain.reverse();
        Some(Path::from_points(grid, interpolate(&chain)))
    }
}

/// Validate endpoints against the grid.
pub(crate) fn check_endpoints(grid: &Grid, start: Point, end: Point) -> Result<(), SearchError> {
    for p in [start, end] {
        if !grid.contains(p) {
            return Err(SearchError::OutOfBounds(p));
        }
    }
    if start == end {
        return Err(SearchError::SameEndpoints(start));
    }
    for p in [start, end] {
        if !grid.is_passable(p) {
            return Err(SearchError::Blocked(p));
        }
    }
    Ok(())
}

/// Expand a chain of waypoints into unit steps. Horizontal distance is
/// covered first when two waypoints are not aligned.
fn interpolate(chain: &[Point]) -> Vec<Point> {
    let Some(&first) = chain.first() else {
        return Vec::new();
    };
    let mut out = vec![first];
    for w in chain.windows(2) {
        let (mut c, b) = (w[0], w[1]);
        while c != b {
            c = if c.x != b.x {
                c.shift((b.x - c.x).signum(), 0)
            } else {
                c.shift(0, (b.y - c.y).signum())
            };
            out.push(c);
        }
    }
    out
}
