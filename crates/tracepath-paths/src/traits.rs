use tracepath_core::{Grid, Point};

use crate::search::{Algorithm, Search, SearchError};
use crate::space::SearchSpace;

/// Anything that can search a [`Grid`] for a route between two cells.
pub trait PathFinder {
    /// The strategy used by the next call to [`PathFinder::find_path`].
    fn algorithm(&self) -> Algorithm;

    /// Search from `start` to `end`, returning the path and step trace.
    fn find_path(&mut self, grid: &Grid, start: Point, end: Point) -> Result<Search, SearchError>;
}

/// A bare [`Algorithm`] searches with a throwaway [`SearchSpace`].
impl PathFinder for Algorithm {
    fn algorithm(&self) -> Algorithm {
        *self
    }

    fn find_path(&mut self, grid: &Grid, start: Point, end: Point) -> Result<Search, SearchError> {
        Algorithm::find_path(*self, grid, start, end)
    }
}

/// An algorithm bound to a reusable [`SearchSpace`], so repeated searches
/// don't reallocate per-cell state.
#[derive(Default)]
pub struct Finder {
    algorithm: Algorithm,
    space: SearchSpace,
}

impl Finder {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            space: SearchSpace::new(),
        }
    }

    /// Switch strategy. The search space is kept.
    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    /// Per-cell state of the most recent search.
    pub fn space(&self) -> &SearchSpace {
        &self.space
    }
}

impl PathFinder for Finder {
    fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    fn find_path(&mut self, grid: &Grid, start: Point, end: Point) -> Result<Search, SearchError> {
        self.space.find_path(self.algorithm, grid, start, end)
    }
}
