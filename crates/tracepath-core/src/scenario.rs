//! Scenario configuration: grid size, endpoints and obstacle areas.
//!
//! [`Scenario`] is the validating layer in front of the search code. It
//! rejects configurations the searches assume never happen (empty grids,
//! endpoints out of bounds, on walls or on top of each other) and turns the
//! rest into a ready-to-search [`Grid`].

use std::fmt;

use crate::cell::{IMPASSABLE, is_valid_weight};
use crate::geom::Point;
use crate::grid::{Grid, ObstacleArea};

/// A search setup as authored by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    pub width: i32,
    pub height: i32,
    pub start: Point,
    pub end: Point,
    #[cfg_attr(feature = "serde", serde(default))]
    pub obstacles: Vec<ObstacleArea>,
}

impl Scenario {
    /// A scenario without obstacles.
    pub fn new(width: i32, height: i32, start: Point, end: Point) -> Self {
        Self {
            width,
            height,
            start,
            end,
            obstacles: Vec::new(),
        }
    }

    /// Add an obstacle area (builder). Areas are applied in insertion order,
    /// so later areas win where they overlap.
    pub fn with_obstacle(mut self, area: ObstacleArea) -> Self {
        self.obstacles.push(area);
        self
    }

    /// Check the scenario without building anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        let inside = |p: Point| p.x >= 0 && p.y >= 0 && p.x < self.width && p.y < self.height;
        if !inside(self.start) {
            return Err(ConfigError::OutOfBounds {
                what: Endpoint::Start,
                pos: self.start,
            });
        }
        if !inside(self.end) {
            return Err(ConfigError::OutOfBounds {
                what: Endpoint::End,
                pos: self.end,
            });
        }
        if self.start == self.end {
            return Err(ConfigError::CoincidentEndpoints(self.start));
        }
        for (i, area) in self.obstacles.iter().enumerate() {
            if !is_valid_weight(area.weight) {
                return Err(ConfigError::InvalidWeight {
                    area: i,
                    weight: area.weight,
                });
            }
        }
        Ok(())
    }

    /// Validate the scenario and build its grid.
    pub fn build(&self) -> Result<Grid, ConfigError> {
        self.validate()?;
        let mut grid = Grid::new(self.width, self.height);
        for area in &self.obstacles {
            grid.apply_area(area);
        }
        if grid.weight(self.start) == IMPASSABLE {
            return Err(ConfigError::Blocked {
                what: Endpoint::Start,
                pos: self.start,
            });
        }
        if grid.weight(self.end) == IMPASSABLE {
            return Err(ConfigError::Blocked {
                what: Endpoint::End,
                pos: self.end,
            });
        }
        Ok(grid)
    }
}

/// Which endpoint a [`ConfigError`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::End => f.write_str("end"),
        }
    }
}

/// Errors that can occur when building a [`Scenario`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is not positive.
    InvalidSize { width: i32, height: i32 },
    /// An endpoint lies outside the grid.
    OutOfBounds { what: Endpoint, pos: Point },
    /// Start and end are the same cell.
    CoincidentEndpoints(Point),
    /// An obstacle area carries a weight below the minimum.
    InvalidWeight { area: usize, weight: i32 },
    /// An endpoint sits on an impassable cell.
    Blocked { what: Endpoint, pos: Point },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { width, height } => {
                write!(f, "scenario: invalid grid size {width}x{height}")
            }
            Self::OutOfBounds { what, pos } => {
                write!(f, "scenario: {what} {pos} is outside the grid")
            }
            Self::CoincidentEndpoints(pos) => {
                write!(f, "scenario: start and end are both {pos}")
            }
            Self::InvalidWeight { area, weight } => {
                write!(f, "scenario: obstacle area #{area} has invalid weight {weight}")
            }
            Self::Blocked { what, pos } => {
                write!(f, "scenario: {what} {pos} is impassable")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::MIN_WEIGHT;

    fn five_by_five() -> Scenario {
        Scenario::new(5, 5, Point::at(0, 0), Point::at(4, 4))
    }

    #[test]
    fn build_applies_obstacles_in_order() {
        let grid = five_by_five()
            .with_obstacle(ObstacleArea::wall(0, 2, 1, 4))
            .with_obstacle(ObstacleArea {
                row: 3,
                col: 2,
                width: 1,
                height: 1,
                weight: 3,
            })
            .build()
            .unwrap();
        assert!(!grid.is_passable(Point::at(0, 2)));
        assert!(!grid.is_passable(Point::at(2, 2)));
        assert_eq!(grid.weight(Point::at(3, 2)), 3);
        assert_eq!(grid.weight(Point::at(4, 2)), MIN_WEIGHT);
    }

    #[test]
    fn rejects_bad_size() {
        let s = Scenario::new(0, 5, Point::at(0, 0), Point::at(1, 1));
        assert_eq!(
            s.build(),
            Err(ConfigError::InvalidSize {
                width: 0,
                height: 5
            })
        );
    }

    #[test]
    fn rejects_out_of_bounds_endpoints() {
        let s = Scenario::new(5, 5, Point::at(0, 5), Point::at(1, 1));
        assert!(matches!(
            s.validate(),
            Err(ConfigError::OutOfBounds {
                what: Endpoint::Start,
                ..
            })
        ));
        let s = Scenario::new(5, 5, Point::at(0, 0), Point::at(-1, 1));
        assert!(matches!(
            s.validate(),
            Err(ConfigError::OutOfBounds {
                what: Endpoint::End,
                ..
            })
        ));
    }

    #[test]
    fn rejects_coincident_endpoints() {
        let s = Scenario::new(5, 5, Point::at(2, 2), Point::at(2, 2));
        assert_eq!(
            s.validate(),
            Err(ConfigError::CoincidentEndpoints(Point::at(2, 2)))
        );
    }

    #[test]
    fn rejects_zero_weight_area() {
        let s = five_by_five().with_obstacle(ObstacleArea {
            row: 1,
            col: 1,
            width: 1,
            height: 1,
            weight: 0,
        });
        assert_eq!(
            s.validate(),
            Err(ConfigError::InvalidWeight { area: 0, weight: 0 })
        );
    }

    #[test]
    fn rejects_walled_endpoint() {
        let s = five_by_five().with_obstacle(ObstacleArea::wall(4, 4, 1, 1));
        let err = s.build().unwrap_err();
        assert_eq!(
            err,
            ConfigError::Blocked {
                what: Endpoint::End,
                pos: Point::at(4, 4)
            }
        );
        assert_eq!(err.to_string(), "scenario: end (4, 4) is impassable");
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn obstacles_default_to_empty() {
        let json = r#"{"width":3,"height":2,"start":{"x":0,"y":0},"end":{"x":2,"y":1}}"#;
        let s: Scenario = serde_json::from_str(json).unwrap();
        assert!(s.obstacles.is_empty());
        assert_eq!(s.build().unwrap().len(), 6);
    }
}
