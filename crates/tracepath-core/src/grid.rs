//! The [`Grid`] type: a rectangular grid of weighted [`Cell`]s.
//!
//! Cells are stored row-major (`row * width + col`). The shape is fixed at
//! construction; only weights can change afterwards, typically by painting
//! [`ObstacleArea`]s before a search.

use crate::cell::{Cell, IMPASSABLE, MIN_WEIGHT, is_valid_weight};
use crate::geom::{Direction, Point, Range};

// ---------------------------------------------------------------------------
// ObstacleArea
// ---------------------------------------------------------------------------

/// A rectangular weight override: `height` rows by `width` columns starting
/// at (`row`, `col`).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObstacleArea {
    pub row: i32,
    pub col: i32,
    pub width: i32,
    pub height: i32,
    pub weight: i32,
}

impl ObstacleArea {
    /// An area of impassable cells.
    pub const fn wall(row: i32, col: i32, width: i32, height: i32) -> Self {
        Self {
            row,
            col,
            width,
            height,
            weight: IMPASSABLE,
        }
    }

    /// The covered rectangle as a [`Range`].
    #[inline]
    pub fn range(&self) -> Range {
        Range::new(
            self.col,
            self.row,
            self.col + self.width.max(0),
            self.row + self.height.max(0),
        )
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A 2D grid of weighted cells.
///
/// Deserializing checks the same invariants the constructor guarantees:
/// one cell per position, stored in row-major order, with valid weights.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Grid {
    cells: Vec<Cell>,
    width: i32,
    height: i32,
}

impl Grid {
    /// Create a new grid of the given dimensions with every cell at
    /// [`MIN_WEIGHT`]. Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        let cells = Range::new(0, 0, width, height)
            .iter()
            .map(Cell::new)
            .collect();
        Self {
            cells,
            width,
            height,
        }
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells (`width * height`).
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Flat row-major index of `p`, or `None` if out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        self.bounds().index(p)
    }

    /// Position of the cell stored at flat index `idx`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        self.bounds().point(idx)
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Cell> {
        self.index(p).map(|i| &self.cells[i])
    }

    /// The cell at (`row`, `col`), or `None` if out of bounds.
    #[inline]
    pub fn cell_at(&self, row: i32, col: i32) -> Option<&Cell> {
        self.at(Point::at(row, col))
    }

    /// Weight of the cell at `p`; out-of-bounds positions read as
    /// [`IMPASSABLE`].
    #[inline]
    pub fn weight(&self, p: Point) -> i32 {
        self.at(p).map_or(IMPASSABLE, |c| c.weight)
    }

    /// Whether `p` is inside the grid and can be entered.
    #[inline]
    pub fn is_passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|c| c.is_passable())
    }

    /// Set the weight of the cell at `p`. Returns `false` (and changes
    /// nothing) if `p` is out of bounds or `weight` is below [`MIN_WEIGHT`].
    pub fn set_weight(&mut self, p: Point, weight: i32) -> bool {
        if !is_valid_weight(weight) {
            return false;
        }
        match self.index(p) {
            Some(i) => {
                self.cells[i].weight = weight;
                true
            }
            None => false,
        }
    }

    /// Paint `area` with its weight. Parts outside the grid are ignored.
    /// Returns the number of cells changed.
    pub fn apply_area(&mut self, area: &ObstacleArea) -> usize {
        let r = area.range().intersect(self.bounds());
        let mut n = 0;
        for p in r.iter() {
            if self.set_weight(p, area.weight) {
                n += 1;
            }
        }
        n
    }

    /// Reset every cell to [`MIN_WEIGHT`].
    pub fn clear_weights(&mut self) {
        for c in self.cells.iter_mut() {
            c.weight = MIN_WEIGHT;
        }
    }

    /// In-bounds 4-neighbors of `p` in the order east, north, west, south.
    ///
    /// Passability is not checked; callers filter as needed.
    pub fn neighbors4(&self, p: Point) -> impl Iterator<Item = &Cell> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |d| self.at(p.step(d)))
    }

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Grid {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        #[derive(serde::Deserialize)]
        struct Raw {
            cells: Vec<Cell>,
            width: i32,
            height: i32,
        }

        let Raw {
            cells,
            width,
            height,
        } = <Raw as serde::Deserialize>::deserialize(deserializer)?;
        if width < 0 || height < 0 {
            return Err(D::Error::custom(format!("grid: invalid size {width}x{height}")));
        }
        let bounds = Range::new(0, 0, width, height);
        if cells.len() != bounds.len() {
            return Err(D::Error::custom(format!(
                "grid: {} cells for a {width}x{height} grid",
                cells.len()
            )));
        }
        for (i, cell) in cells.iter().enumerate() {
            let expected = bounds.point(i);
            if cell.pos != expected {
                return Err(D::Error::custom(format!(
                    "grid: cell {i} is at {}, expected {expected}",
                    cell.pos
                )));
            }
            if !is_valid_weight(cell.weight) {
                return Err(D::Error::custom(format!(
                    "grid: cell {expected} has invalid weight {}",
                    cell.weight
                )));
            }
        }
        Ok(Self {
            cells,
            width,
            height,
        })
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
