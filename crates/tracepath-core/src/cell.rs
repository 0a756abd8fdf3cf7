//! The [`Cell`] type: one grid position with a traversal weight.

use crate::geom::Point;

/// Cheapest weight a passable cell can carry. Fresh grids use it everywhere.
pub const MIN_WEIGHT: i32 = 1;

/// Reserved weight marking a cell that can never be entered.
pub const IMPASSABLE: i32 = i32::MAX;

/// A grid position and the cost of stepping onto it.
///
/// Cells carry no search state: costs, predecessors and jump tags live in
/// the scratch storage of the search that produced them, so a grid can be
/// searched again without a reset pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos: Point,
    pub weight: i32,
}

impl Cell {
    /// Create a cell at `pos` with the minimum weight.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            weight: MIN_WEIGHT,
        }
    }

    /// Set the weight (builder).
    #[inline]
    pub const fn with_weight(mut self, weight: i32) -> Self {
        self.weight = weight;
        self
    }

    #[inline]
    pub const fn row(self) -> i32 {
        self.pos.y
    }

    #[inline]
    pub const fn col(self) -> i32 {
        self.pos.x
    }

    /// Whether the cell can be entered.
    #[inline]
    pub const fn is_passable(self) -> bool {
        self.weight != IMPASSABLE
    }
}

/// Whether `weight` is acceptable for a cell: at least [`MIN_WEIGHT`], with
/// [`IMPASSABLE`] itself being the upper sentinel.
#[inline]
pub const fn is_valid_weight(weight: i32) -> bool {
    weight >= MIN_WEIGHT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cell_is_cheapest_and_passable() {
        let c = Cell::new(Point::at(1, 2));
        assert_eq!(c.weight, MIN_WEIGHT);
        assert_eq!(c.row(), 1);
        assert_eq!(c.col(), 2);
        assert!(c.is_passable());
    }

    #[test]
    fn impassable_sentinel() {
        let c = Cell::new(Point::ZERO).with_weight(IMPASSABLE);
        assert!(!c.is_passable());
        assert!(is_valid_weight(IMPASSABLE));
        assert!(is_valid_weight(5));
        assert!(!is_valid_weight(0));
        assert!(!is_valid_weight(-3));
    }
}
