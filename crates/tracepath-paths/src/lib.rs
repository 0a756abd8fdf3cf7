//! Traced pathfinding over weighted 4-connected grids.
//!
//! Five strategies share one contract: given a [`Grid`](tracepath_core::Grid),
//! a start and an end, return the path (if any) together with a
//! [`StepTrace`] recording every decision the search made, in order.
//!
//! - **BFS**: fewest steps, weights ignored for ordering
//! - **Dijkstra**: cheapest weighted path
//! - **A\***: cheapest weighted path, guided by Euclidean distance
//! - **Greedy best-first**: guided by Euclidean distance only
//! - **Jump point search**: 4-directional JPS with Manhattan distance
//!
//! Searches run through [`SearchSpace`], which owns per-cell scratch state
//! (cost, predecessor, jump tag) so the grid is only ever borrowed. A trace
//! can be replayed cell by cell with [`TracePlayer`].
//!
//! # Entry points
//!
//! | Call | Search space |
//! |---|---|
//! | [`Algorithm::find_path`] | fresh, dropped afterwards |
//! | [`SearchSpace::find_path`] | caller-owned, reused |
//! | [`PathFinder::find_path`] on a [`Finder`] | owned by the finder, reused |

mod best_first;
mod bfs;
mod distance;
mod jps;
mod queue;
mod search;
mod space;
mod trace;
mod traits;

pub use distance::{euclidean, manhattan};
pub use queue::PriorityQueue;
pub use search::{Algorithm, Path, Search, SearchError};
pub use space::{SearchSpace, SearchTag, UNREACHABLE};
pub use trace::{StepEvent, StepKind, StepTrace, TileState, TracePlayer};
pub use traits::{Finder, PathFinder};

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{RngExt, SeedableRng};
    use tracepath_core::{Grid, IMPASSABLE, ObstacleArea, Point};

    use super::*;

    /// 5×5, column 2 walled off except for row 4.
    fn scenario_b() -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.apply_area(&ObstacleArea::wall(0, 2, 1, 4));
        grid
    }

    /// Random weights in 1..=4 with roughly a quarter of the cells blocked.
    /// Returns the grid and two distinct passable endpoints.
    fn random_grid(rng: &mut StdRng) -> (Grid, Point, Point) {
        let w = rng.random_range(4..12);
        let h = rng.random_range(4..12);
        let mut grid = Grid::new(w, h);
        for p in grid.bounds().iter() {
            let weight = if rng.random_range(0..4) == 0 {
                IMPASSABLE
            } else {
                rng.random_range(1..=4)
            };
            grid.set_weight(p, weight);
        }
        let start = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        let mut end = Point::new(rng.random_range(0..w), rng.random_range(0..h));
        if end == start {
            end = Point::new((start.x + 1) % w, start.y);
        }
        grid.set_weight(start, 1);
        grid.set_weight(end, 1);
        (grid, start, end)
    }

    #[test]
    fn scenario_a_uniform_open_grid() {
        let grid = Grid::new(5, 5);
        for algorithm in [Algorithm::Bfs, Algorithm::Dijkstra, Algorithm::AStar, Algorithm::JumpPoint] {
            let s = algorithm
                .find_path(&grid, Point::at(0, 0), Point::at(4, 4))
                .unwrap();
            let path = s.path.unwrap();
            assert_eq!(path.len(), 9, "{algorithm}");
            assert_eq!(path.cost(), 8, "{algorithm}");
        }
    }

    #[test]
    fn scenario_b_every_path_uses_the_gap() {
        let grid = scenario_b();
        let mut space = SearchSpace::new();
        for algorithm in Algorithm::ALL {
            let s = space
                .find_path(algorithm, &grid, Point::at(0, 0), Point::at(4, 4))
                .unwrap();
            let path = s.path.unwrap();
            assert!(path.contains(Point::at(4, 2)), "{algorithm}");
            assert!(path.is_contiguous(), "{algorithm}");
        }
    }

    #[test]
    fn jps_visits_fewer_cells_on_uniform_grids() {
        for grid in [Grid::new(5, 5), scenario_b(), Grid::new(12, 8)] {
            let end = Point::new(grid.width() - 1, grid.height() - 1);
            let j = Algorithm::JumpPoint.find_path(&grid, Point::at(0, 0), end).unwrap();
            let d = Algorithm::Dijkstra.find_path(&grid, Point::at(0, 0), end).unwrap();
            assert_eq!(j.path_cost(), d.path_cost());
            assert!(j.visited() < d.visited());
        }
    }

    #[test]
    fn traces_start_with_the_endpoints() {
        let grid = scenario_b();
        for algorithm in Algorithm::ALL {
            let s = algorithm
                .find_path(&grid, Point::at(0, 0), Point::at(4, 4))
                .unwrap();
            assert_eq!(s.trace.get(0), Some(&StepEvent::MarkStart(Point::at(0, 0))));
            assert_eq!(s.trace.get(1), Some(&StepEvent::MarkEnd(Point::at(4, 4))));
            assert_eq!(s.trace.count(StepKind::MarkStart), 1);
            let marked = s.trace.count(StepKind::MarkPath);
            assert_eq!(marked, s.path.unwrap().len() - 2, "{algorithm}");
        }
    }

    #[test]
    fn random_grids() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut space = SearchSpace::new();
        for _ in 0..200 {
            let (grid, start, end) = random_grid(&mut rng);
            let dijkstra = space.find_path(Algorithm::Dijkstra, &grid, start, end).unwrap();
            let astar = space.find_path(Algorithm::AStar, &grid, start, end).unwrap();
            assert_eq!(dijkstra.path_cost(), astar.path_cost());
            assert_eq!(dijkstra.end_cost, dijkstra.path_cost());

            let bfs = space.find_path(Algorithm::Bfs, &grid, start, end).unwrap();
            assert_eq!(bfs.found(), dijkstra.found());
            if let (Some(b), Some(d)) = (&bfs.path, &dijkstra.path) {
                assert!(b.steps() <= d.steps());
            }

            for algorithm in Algorithm::ALL {
                let s = space.find_path(algorithm, &grid, start, end).unwrap();
                for p in s.trace.visited() {
                    assert!(space.cost_at(p).is_some(), "{algorithm}: {p} has no cost");
                }
                let Some(path) = &s.path else {
                    continue;
                };
                assert_eq!(path.start(), Some(start));
                assert_eq!(path.end(), Some(end));
                assert!(path.is_contiguous(), "{algorithm}");
                assert!(path.points().iter().all(|&p| grid.is_passable(p)));
                assert!(path.cost() >= dijkstra.path_cost().unwrap_or(0), "{algorithm}");
            }
        }
    }

    #[test]
    fn jps_matches_dijkstra_on_uniform_grids() {
        let mut rng = StdRng::seed_from_u64(0x0a11);
        let mut space = SearchSpace::new();
        for _ in 0..500 {
            let w = rng.random_range(2..13);
            let h = rng.random_range(2..13);
            let density = rng.random_range(0..5);
            let mut grid = Grid::new(w, h);
            for p in grid.bounds().iter() {
                if rng.random_range(0..10) < density {
                    grid.set_weight(p, IMPASSABLE);
                }
            }
            let start = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            let end = Point::new(rng.random_range(0..w), rng.random_range(0..h));
            if start == end {
                continue;
            }
            grid.set_weight(start, 1);
            grid.set_weight(end, 1);

            let d = space.find_path(Algorithm::Dijkstra, &grid, start, end).unwrap();
            let j = space.find_path(Algorithm::JumpPoint, &grid, start, end).unwrap();
            assert_eq!(j.found(), d.found(), "{start} -> {end} on {}", grid.bounds());
            assert_eq!(j.path_cost(), d.path_cost(), "{start} -> {end} on {}", grid.bounds());
            assert_eq!(j.end_cost, j.path_cost());
            if let Some(path) = &j.path {
                assert!(path.is_contiguous());
            }
        }
    }

    #[test]
    fn huge_weights_do_not_overflow() {
        let mut grid = Grid::new(3, 1);
        grid.set_weight(Point::at(0, 1), i32::MAX - 1);
        grid.set_weight(Point::at(0, 2), i32::MAX - 1);
        let expected = 2 * i64::from(i32::MAX - 1);
        for algorithm in Algorithm::ALL {
            let s = algorithm
                .find_path(&grid, Point::at(0, 0), Point::at(0, 2))
                .unwrap();
            assert_eq!(s.path_cost(), Some(expected), "{algorithm}");
            assert_eq!(s.end_cost, Some(expected), "{algorithm}");
        }
    }

    #[test]
    fn repeated_searches_are_identical() {
        let mut rng = StdRng::seed_from_u64(7);
        let (grid, start, end) = random_grid(&mut rng);
        let mut space = SearchSpace::new();
        for algorithm in Algorithm::ALL {
            let a = space.find_path(algorithm, &grid, start, end).unwrap();
            let b = space.find_path(algorithm, &grid, start, end).unwrap();
            assert_eq!(a, b, "{algorithm}");
        }
    }
}
