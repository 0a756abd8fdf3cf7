//! Step traces: the ordered log of decisions a search made.
//!
//! Every search appends [`StepEvent`]s to a [`StepTrace`] in the exact order
//! it made them. Events are plain data and carry the values as they were at
//! capture time, so a trace can be replayed later, at any pace, without
//! touching the grid or the search state.
//!
//! [`TracePlayer`] is the reference consumer: it folds events into a
//! per-cell [`TileState`] overlay one at a time, with undo for stepping
//! backwards.

use std::fmt;

use tracepath_core::{Point, Range};

// ---------------------------------------------------------------------------
// StepEvent
// ---------------------------------------------------------------------------

/// A single visualization event.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepEvent {
    /// The search origin.
    MarkStart(Point),
    /// The search target.
    MarkEnd(Point),
    /// A cell was taken off the frontier and expanded.
    Visit(Point),
    /// A cell was put on the frontier with the given cost and, for guided
    /// searches, its heuristic estimate.
    PushFrontier {
        pos: Point,
        cost: i64,
        heuristic: Option<f64>,
    },
    /// A cell was skipped over by a jump without being selected.
    JumpOver(Point),
    /// A cell on the final path.
    MarkPath(Point),
}

/// Discriminant of a [`StepEvent`], for counting and filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StepKind {
    MarkStart,
    MarkEnd,
    Visit,
    PushFrontier,
    JumpOver,
    MarkPath,
}

impl StepEvent {
    /// The cell the event refers to.
    #[inline]
    pub fn pos(&self) -> Point {
        match *self {
            Self::MarkStart(p)
            | Self::MarkEnd(p)
            | Self::Visit(p)
            | Self::JumpOver(p)
            | Self::MarkPath(p) => p,
            Self::PushFrontier { pos, .. } => pos,
        }
    }

    #[inline]
    pub fn kind(&self) -> StepKind {
        match self {
            Self::MarkStart(_) => StepKind::MarkStart,
            Self::MarkEnd(_) => StepKind::MarkEnd,
            Self::Visit(_) => StepKind::Visit,
            Self::PushFrontier { .. } => StepKind::PushFrontier,
            Self::JumpOver(_) => StepKind::JumpOver,
            Self::MarkPath(_) => StepKind::MarkPath,
        }
    }
}

impl fmt::Display for StepEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MarkStart(p) => write!(f, "start {p}"),
            Self::MarkEnd(p) => write!(f, "end {p}"),
            Self::Visit(p) => write!(f, "visit {p}"),
            Self::PushFrontier {
                pos,
                cost,
                heuristic: Some(h),
            } => write!(f, "push {pos} g={cost} h={h:.2}"),
            Self::PushFrontier {
                pos,
                cost,
                heuristic: None,
            } => write!(f, "push {pos} g={cost}"),
            Self::JumpOver(p) => write!(f, "jump over {p}"),
            Self::MarkPath(p) => write!(f, "path {p}"),
        }
    }
}

// ---------------------------------------------------------------------------
// StepTrace
// ---------------------------------------------------------------------------

/// Ordered, append-only sequence of [`StepEvent`]s.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepTrace {
    events: Vec<StepEvent>,
}

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    #[inline]
    pub fn push(&mut self, event: StepEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&StepEvent> {
        self.events.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StepEvent> {
        self.events.iter()
    }

    pub fn as_slice(&self) -> &[StepEvent] {
        &self.events
    }

    /// Number of events of the given kind.
    pub fn count(&self, kind: StepKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    /// Positions of all `Visit` events, in order.
    pub fn visited(&self) -> impl Iterator<Item = Point> + '_ {
        self.events.iter().filter_map(|e| match e {
            StepEvent::Visit(p) => Some(*p),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a StepTrace {
    type Item = &'a StepEvent;
    type IntoIter = std::slice::Iter<'a, StepEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// TracePlayer
// ---------------------------------------------------------------------------

/// Display state of one cell while a trace is replayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileState {
    #[default]
    Empty,
    Start,
    End,
    Frontier,
    Visited,
    JumpedOver,
    Path,
}

impl TileState {
    fn after(self, event: &StepEvent) -> TileState {
        // Endpoint markers are never painted over.
        if matches!(self, TileState::Start | TileState::End) {
            return self;
        }
        match event {
            StepEvent::MarkStart(_) => TileState::Start,
            StepEvent::MarkEnd(_) => TileState::End,
            StepEvent::Visit(_) => TileState::Visited,
            StepEvent::PushFrontier { .. } => TileState::Frontier,
            StepEvent::JumpOver(_) => TileState::JumpedOver,
            StepEvent::MarkPath(_) => TileState::Path,
        }
    }
}

/// Replays a [`StepTrace`] event by event onto a tile overlay.
///
/// The player only moves when asked; pacing, pausing and drawing belong to
/// whoever drives it.
pub struct TracePlayer<'a> {
    trace: &'a StepTrace,
    bounds: Range,
    tiles: Vec<TileState>,
    /// Previous state of the tile touched by each applied event.
    undo: Vec<Option<(usize, TileState)>>,
}

impl<'a> TracePlayer<'a> {
    /// Create a player over `trace` for a grid covering `bounds`.
    pub fn new(trace: &'a StepTrace, bounds: Range) -> Self {
        Self {
            trace,
            bounds,
            tiles: vec![TileState::Empty; bounds.len()],
            undo: Vec::with_capacity(trace.len()),
        }
    }

    /// Number of events applied so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.undo.len()
    }

    /// Total number of events in the trace.
    #[inline]
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.position() >= self.trace.len()
    }

    /// Apply the next event and return it, or `None` at the end.
    pub fn step(&mut self) -> Option<&'a StepEvent> {
        let trace = self.trace;
        let event = trace.get(self.position())?;
        let entry = self.index(event.pos()).map(|i| {
            let prev = self.tiles[i];
            self.tiles[i] = prev.after(event);
            (i, prev)
        });
        self.undo.push(entry);
        Some(event)
    }

    /// Revert the last applied event. Returns `false` at the beginning.
    pub fn step_back(&mut self) -> bool {
        match self.undo.pop() {
            Some(entry) => {
                if let Some((i, prev)) = entry {
                    self.tiles[i] = prev;
                }
                true
            }
            None => false,
        }
    }

    /// Move to the state after `position` events (clamped to the trace).
    pub fn seek(&mut self, position: usize) {
        let target = position.min(self.trace.len());
        while self.position() > target {
            self.step_back();
        }
        while self.position() < target {
            self.step();
        }
    }

    /// Apply every remaining event.
    pub fn play_to_end(&mut self) {
        self.seek(self.trace.len());
    }

    /// Back to the empty overlay.
    pub fn reset(&mut self) {
        self.tiles.fill(TileState::Empty);
        self.undo.clear();
    }

    /// Current state of the tile at `p`, or `None` outside the bounds.
    pub fn tile(&self, p: Point) -> Option<TileState> {
        self.index(p).map(|i| self.tiles[i])
    }

    /// All tiles in row-major order.
    pub fn tiles(&self) -> &[TileState] {
        &self.tiles
    }

    fn index(&self, p: Point) -> Option<usize> {
        self.bounds.index(p)
    }
}
