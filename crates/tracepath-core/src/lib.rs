//! **tracepath-core**: weighted grids for traced pathfinding.
//!
//! This crate provides the types shared by the search crate and its
//! consumers: geometry primitives, weighted cells, the row-major [`Grid`]
//! and the validating [`Scenario`] layer that builds grids from obstacle
//! areas.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod scenario;

pub use cell::{Cell, IMPASSABLE, MIN_WEIGHT};
pub use geom::{Direction, Point, Range};
pub use grid::{Grid, ObstacleArea};
pub use scenario::{ConfigError, Endpoint, Scenario};
