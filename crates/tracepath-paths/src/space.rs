use std::collections::HashMap;

use tracepath_core::{Direction, Grid, Point, Range};

/// Sentinel cost meaning "not reached" in the scratch arena.
pub const UNREACHABLE: i64 = i64::MAX;

/// Why jump point search selected a cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchTag {
    #[default]
    None,
    /// A vertical jump stopped here because a horizontal jump from this
    /// cell leads to the goal or a forced neighbor.
    NormalJump,
    /// The straight line ended at an obstacle or the grid edge.
    ForcedStop,
    /// An obstacle corner makes a side cell reachable only through here.
    ForcedNeighbor,
    /// The goal itself.
    Goal,
}

// ---------------------------------------------------------------------------
// Per-cell scratch state
// ---------------------------------------------------------------------------

#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) cost: i64,
    pub(crate) parent: usize,
    pub(crate) tag: SearchTag,
    pub(crate) generation: u32,
    /// Discovered (pushed at least once).
    pub(crate) seen: bool,
    /// Finalized (expanded).
    pub(crate) closed: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            cost: UNREACHABLE,
            parent: usize::MAX,
            tag: SearchTag::None,
            generation: 0,
            seen: false,
            closed: false,
        }
    }
}

/// A jump point result: the cell reached and why the jump stopped there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JumpPoint {
    pub(crate) pos: Point,
    pub(crate) tag: SearchTag,
}

// ---------------------------------------------------------------------------
// SearchSpace
// ---------------------------------------------------------------------------

/// Scratch storage for searches over a [`Grid`].
///
/// `SearchSpace` owns the per-cell search state (cost, predecessor, jump
/// tag, open/closed flags) plus the jump memo, so the grid itself is only
/// ever borrowed immutably. Each search bumps a generation counter instead of
/// clearing the arena: nodes from older generations read as fresh. After a
/// search, the accessors report that search's final state.
pub struct SearchSpace {
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) bounds: Range,
    pub(crate) jump_memo: HashMap<(Point, Direction), Option<JumpPoint>>,
    /// Tie-breaking counter for frontier entries.
    pub(crate) seq: u64,
}

impl Default for SearchSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSpace {
    /// Create an empty search space. Storage grows on first use.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
            bounds: Range::default(),
            jump_memo: HashMap::new(),
            seq: 0,
        }
    }

    /// Create a search space pre-sized for `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self {
            nodes: vec![Node::default(); grid.len()],
            ..Self::new()
        }
    }

    /// The grid rectangle of the most recent search.
    #[inline]
    pub fn range(&self) -> Range {
        self.bounds
    }

    /// Start a new search over `grid`: invalidate all per-cell state and
    /// clear the jump memo.
    pub(crate) fn begin(&mut self, grid: &Grid) {
        if self.nodes.len() < grid.len() {
            self.nodes.resize(grid.len(), Node::default());
        }
        self.bounds = grid.bounds();
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped: stale generations could alias, so wipe for real.
            self.nodes.fill(Node::default());
            self.generation = 1;
        }
        self.jump_memo.clear();
        self.seq = 0;
    }

    #[inline]
    pub(crate) fn next_seq(&mut self) -> u64 {
        let s = self.seq;
        self.seq += 1;
        s
    }

    // -----------------------------------------------------------------------
    // Raw node access
    // -----------------------------------------------------------------------

    #[inline]
    fn live(&self, i: usize) -> Option<&Node> {
        let n = &self.nodes[i];
        (n.generation == self.generation).then_some(n)
    }

    /// Node `i` for writing, refreshed first if it belongs to an older search.
    #[inline]
    pub(crate) fn touch(&mut self, i: usize) -> &mut Node {
        let generation = self.generation;
        let n = &mut self.nodes[i];
        if n.generation != generation {
            *n = Node {
                generation,
                ..Node::default()
            };
        }
        n
    }

    #[inline]
    pub(crate) fn cost(&self, i: usize) -> i64 {
        self.live(i).map_or(UNREACHABLE, |n| n.cost)
    }

    #[inline]
    pub(crate) fn parent(&self, i: usize) -> Option<usize> {
        self.live(i)
            .map(|n| n.parent)
            .filter(|&p| p != usize::MAX)
    }

    #[inline]
    pub(crate) fn tag(&self, i: usize) -> SearchTag {
        self.live(i).map_or(SearchTag::None, |n| n.tag)
    }

    #[inline]
    pub(crate) fn seen(&self, i: usize) -> bool {
        self.live(i).is_some_and(|n| n.seen)
    }

    #[inline]
    pub(crate) fn closed(&self, i: usize) -> bool {
        self.live(i).is_some_and(|n| n.closed)
    }

    /// Record that `i` was reached at `cost` from `parent`.
    #[inline]
    pub(crate) fn reach(&mut self, i: usize, cost: i64, parent: usize) {
        let n = self.touch(i);
        n.cost = cost;
        n.parent = parent;
        n.seen = true;
    }

    #[inline]
    pub(crate) fn close(&mut self, i: usize) {
        self.touch(i).closed = true;
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Flat index of `p` in the current range.
    #[inline]
    pub(crate) fn idx(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }

    #[inline]
    pub(crate) fn point(&self, idx: usize) -> Point {
        self.bounds.point(idx)
    }

    // -----------------------------------------------------------------------
    // Public view of the last search
    // -----------------------------------------------------------------------

    /// Accumulated cost of `p` in the last search, or `None` if it was never
    /// reached.
    pub fn cost_at(&self, p: Point) -> Option<i64> {
        let c = self.cost(self.idx(p)?);
        (c != UNREACHABLE).then_some(c)
    }

    /// Predecessor of `p` in the last search.
    pub fn predecessor_at(&self, p: Point) -> Option<Point> {
        let i = self.idx(p)?;
        self.parent(i).map(|pi| self.point(pi))
    }

    /// Jump tag of `p` in the last search ([`SearchTag::None`] for cells
    /// never selected by jump point search).
    pub fn tag_at(&self, p: Point) -> SearchTag {
        self.idx(p).map_or(SearchTag::None, |i| self.tag(i))
    }

    /// Whether `p` was expanded in the last search.
    pub fn is_closed(&self, p: Point) -> bool {
        self.idx(p).is_some_and(|i| self.closed(i))
    }
}
