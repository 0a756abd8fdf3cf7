//! Jump point search restricted to the four cardinal directions.
//!
//! Instead of expanding every neighbor, the search walks straight lines and
//! only stops at *jump points*: the goal, the last open cell before an
//! obstacle, cells with a forced neighbor, and vertical-ray cells from which
//! a horizontal ray reaches one of those. Cells crossed on the way are
//! reported as `JumpOver` events and never enter the frontier.

use tracepath_core::{Direction, Grid, Point};

use crate::best_first::{Entry, FrontierOrder};
use crate::distance;
use crate::queue::PriorityQueue;
use crate::space::{JumpPoint, SearchSpace, SearchTag};
use crate::trace::{StepEvent, StepTrace};

impl SearchSpace {
    /// Jump point search from `start` to `end`, ordered by cost plus
    /// Manhattan distance. Returns whether `end` was reached.
    pub(crate) fn jps(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        trace: &mut StepTrace,
    ) -> bool {
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return false;
        };

        let mut open = PriorityQueue::new(|a: &Entry, b: &Entry| {
            FrontierOrder::CostPlusHeuristic.compare(a, b)
        });

        self.reach(si, 0, usize::MAX);
        let seq = self.next_seq();
        open.push(Entry {
            idx: si,
            g: 0,
            h: f64::from(distance::manhattan(start, end)),
            seq,
        });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            if self.closed(ci) || current.g > self.cost(ci) {
                continue;
            }
            self.close(ci);

            let cp = self.point(ci);
            if ci != si && ci != ei {
                trace.push(StepEvent::Visit(cp));
            }
            if ci == ei {
                return true;
            }
            log::trace!("jps: expand {cp} g={} tag={:?}", current.g, self.tag(ci));

            let current_g = self.cost(ci);
            for dir in self.prune(grid, ci) {
                let Some(jp) = self.jump(grid, cp, dir, end, trace) else {
                    continue;
                };
                if jp.pos == cp {
                    continue;
                }
                let Some(ji) = self.idx(jp.pos) else {
                    continue;
                };
                if self.closed(ji) {
                    continue;
                }
                let g = current_g.saturating_add(
                    i64::from(distance::manhattan(cp, jp.pos)) * i64::from(grid.weight(jp.pos)),
                );
                if g >= self.cost(ji) {
                    continue;
                }

                self.reach(ji, g, ci);
                self.touch(ji).tag = jp.tag;
                let h = f64::from(distance::manhattan(jp.pos, end));
                let seq = self.next_seq();
                open.push(Entry { idx: ji, g, h, seq });
                trace.push(StepEvent::PushFrontier {
                    pos: jp.pos,
                    cost: g,
                    heuristic: Some(h),
                });
            }
        }
        false
    }

    /// Directions worth jumping in from the jump point `ci`, given how it was
    /// reached: every direction but the way back, or just the two turns
    /// after a forced stop. Unforced sides are kept, since vertical rays
    /// that already passed them won't come back.
    fn prune(&self, grid: &Grid, ci: usize) -> Vec<Direction> {
        let cp = self.point(ci);
        let arrival = self.parent(ci).and_then(|pi| {
            let d = (cp - self.point(pi)).signum();
            Direction::from_delta(d.x, d.y)
        });

        let mut dirs = Vec::with_capacity(4);
        match (arrival, self.tag(ci)) {
            (None, _) | (Some(_), SearchTag::None) => dirs.extend(Direction::ALL),
            (Some(dir), SearchTag::ForcedStop) => dirs.extend(dir.orthogonal()),
            (Some(dir), SearchTag::NormalJump | SearchTag::ForcedNeighbor | SearchTag::Goal) => {
                dirs.push(dir);
                dirs.extend(dir.orthogonal());
            }
        }
        dirs.retain(|&d| grid.is_passable(cp.step(d)));
        dirs
    }

    /// Walk from `from` in `dir` until a jump point is found.
    ///
    /// Results are memoized for the origin and every cell walked through,
    /// since a ray started from any of them ends at the same place.
    fn jump(
        &mut self,
        grid: &Grid,
        from: Point,
        dir: Direction,
        goal: Point,
        trace: &mut StepTrace,
    ) -> Option<JumpPoint> {
        if let Some(&hit) = self.jump_memo.get(&(from, dir)) {
            return hit;
        }

        let mut walked = Vec::new();
        let mut cur = from;
        let result = loop {
            let next = cur.step(dir);
            if !grid.is_passable(next) {
                break grid.is_passable(cur).then_some(JumpPoint {
                    pos: cur,
                    tag: SearchTag::ForcedStop,
                });
            }
            if next == goal {
                break Some(JumpPoint {
                    pos: next,
                    tag: SearchTag::Goal,
                });
            }
            if forced_sides(grid, next, dir).next().is_some() {
                break Some(JumpPoint {
                    pos: next,
                    tag: SearchTag::ForcedNeighbor,
                });
            }
            if self.idx(next).is_some_and(|i| self.closed(i)) {
                break None;
            }
            if !dir.is_horizontal() && self.probe(grid, next, goal, trace) {
                break Some(JumpPoint {
                    pos: next,
                    tag: SearchTag::NormalJump,
                });
            }
            walked.push(next);
            if let Some(&hit) = self.jump_memo.get(&(next, dir)) {
                break hit;
            }
            cur = next;
        };

        let stop = result.map(|jp| jp.pos);
        for &p in &walked {
            if Some(p) != stop {
                trace.push(StepEvent::JumpOver(p));
            }
        }
        self.jump_memo.insert((from, dir), result);
        for p in walked {
            self.jump_memo.insert((p, dir), result);
        }
        result
    }

    /// Whether a horizontal ray from `at` reaches the goal or a forced
    /// neighbor. Rays that just run into a wall don't count.
    fn probe(&mut self, grid: &Grid, at: Point, goal: Point, trace: &mut StepTrace) -> bool {
        [Direction::East, Direction::West].into_iter().any(|side| {
            matches!(
                self.jump(grid, at, side, goal, trace),
                Some(JumpPoint {
                    tag: SearchTag::Goal | SearchTag::ForcedNeighbor,
                    ..
                })
            )
        })
    }
}

/// Sides of `at` that are only reachable through it when moving in `dir`:
/// the cell beside the previous cell is blocked while the cell beside `at`
/// is open.
fn forced_sides(grid: &Grid, at: Point, dir: Direction) -> impl Iterator<Item = Direction> + '_ {
    let back = at.step(dir.reverse());
    dir.orthogonal()
        .into_iter()
        .filter(move |&side| !grid.is_passable(back.step(side)) && grid.is_passable(at.step(side)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracepath_core::ObstacleArea;

    use crate::{Algorithm, StepKind};

    /// 5×5, column 2 walled off except for row 4.
    fn scenario_b() -> Grid {
        let mut grid = Grid::new(5, 5);
        grid.apply_area(&ObstacleArea::wall(0, 2, 1, 4));
        grid
    }

    #[test]
    fn forced_side_detection() {
        let grid = scenario_b();
        // Moving east from (4,1) to (4,2): nothing forced yet.
        assert_eq!(forced_sides(&grid, Point::at(4, 2), Direction::East).count(), 0);
        // Moving east into (4,3): the wall ends above, so north is forced.
        let sides: Vec<_> = forced_sides(&grid, Point::at(4, 3), Direction::East).collect();
        assert_eq!(sides, vec![Direction::North]);
        // Moving south into (4,1): east opens up at the gap.
        let sides: Vec<_> = forced_sides(&grid, Point::at(4, 1), Direction::South).collect();
        assert_eq!(sides, vec![Direction::East]);
    }

    #[test]
    fn open_grid_corner_to_corner() {
        let grid = Grid::new(5, 5);
        let s = Algorithm::JumpPoint
            .find_path(&grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();
        let path = s.path.unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8);
        assert!(path.is_contiguous());
        assert_eq!(path.start(), Some(Point::at(0, 0)));
        assert_eq!(path.end(), Some(Point::at(4, 4)));
        assert!(s.trace.count(StepKind::JumpOver) > 0);
    }

    #[test]
    fn open_grid_interior_goal() {
        let grid = Grid::new(5, 5);
        let s = Algorithm::JumpPoint
            .find_path(&grid, Point::at(0, 0), Point::at(2, 2))
            .unwrap();
        assert_eq!(s.path_cost(), Some(4));
        assert!(s.path.unwrap().is_contiguous());
    }

    #[test]
    fn turns_off_a_forced_neighbor_toward_an_unforced_side() {
        // 6×4 with one blocked cell at (1,4). Going north from (2,3), the
        // corner forces east at (0,3) while the goal lies to the west.
        let mut grid = Grid::new(6, 4);
        grid.set_weight(Point::at(1, 4), tracepath_core::IMPASSABLE);
        let mut space = SearchSpace::for_grid(&grid);
        let s = space
            .find_path(Algorithm::JumpPoint, &grid, Point::at(3, 4), Point::at(0, 2))
            .unwrap();
        assert_eq!(space.tag_at(Point::at(0, 3)), SearchTag::ForcedNeighbor);
        assert_eq!(space.predecessor_at(Point::at(0, 2)), Some(Point::at(0, 3)));
        assert_eq!(s.path_cost(), Some(5));
        assert!(s.path.unwrap().is_contiguous());

        let d = Algorithm::Dijkstra
            .find_path(&grid, Point::at(3, 4), Point::at(0, 2))
            .unwrap();
        assert_eq!(d.path_cost(), Some(5));
    }

    #[test]
    fn gap_in_wall() {
        let grid = scenario_b();
        let mut space = SearchSpace::for_grid(&grid);
        let s = space
            .find_path(Algorithm::JumpPoint, &grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();
        let path = s.path.as_ref().unwrap();
        assert_eq!(path.len(), 9);
        assert_eq!(path.cost(), 8);
        assert!(path.contains(Point::at(4, 2)));

        assert_eq!(space.tag_at(Point::at(0, 1)), SearchTag::ForcedStop);
        assert_eq!(space.tag_at(Point::at(4, 0)), SearchTag::NormalJump);
        assert_eq!(space.tag_at(Point::at(4, 1)), SearchTag::ForcedNeighbor);
        assert_eq!(space.tag_at(Point::at(4, 3)), SearchTag::ForcedNeighbor);
        assert_eq!(space.tag_at(Point::at(4, 4)), SearchTag::Goal);
        assert_eq!(space.tag_at(Point::at(2, 0)), SearchTag::None);
        assert_eq!(space.predecessor_at(Point::at(4, 4)), Some(Point::at(4, 3)));
        assert_eq!(space.predecessor_at(Point::at(4, 3)), Some(Point::at(4, 0)));
        assert_eq!(space.cost_at(Point::at(4, 4)), Some(8));
    }

    #[test]
    fn skipped_cells_are_never_visited() {
        let grid = scenario_b();
        let s = Algorithm::JumpPoint
            .find_path(&grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();

        let visited: Vec<Point> = s.trace.visited().collect();
        assert_eq!(
            visited,
            vec![Point::at(0, 1), Point::at(4, 0), Point::at(4, 1), Point::at(4, 3)]
        );

        let jumped: Vec<Point> = s
            .trace
            .iter()
            .filter(|e| e.kind() == StepKind::JumpOver)
            .map(|e| e.pos())
            .collect();
        for p in [Point::at(1, 0), Point::at(2, 0), Point::at(3, 0), Point::at(4, 2)] {
            assert!(jumped.contains(&p), "{p} not jumped over");
            assert!(!visited.contains(&p), "{p} visited");
        }

        // Every expansion was pushed first.
        for (i, e) in s.trace.iter().enumerate() {
            if let StepEvent::Visit(p) = e {
                assert!(s.trace.as_slice()[..i].iter().any(
                    |prev| matches!(prev, StepEvent::PushFrontier { pos, .. } if pos == p)
                ));
            }
        }

        let d = Algorithm::Dijkstra
            .find_path(&grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();
        assert!(s.visited() < d.visited());
        assert_eq!(s.path_cost(), d.path_cost());
    }

    #[test]
    fn wall_blocks_everything() {
        let mut grid = Grid::new(3, 3);
        grid.apply_area(&ObstacleArea::wall(0, 1, 1, 3));
        let mut space = SearchSpace::for_grid(&grid);
        let s = space
            .find_path(Algorithm::JumpPoint, &grid, Point::at(0, 0), Point::at(0, 2))
            .unwrap();
        assert!(!s.found());
        assert_eq!(space.cost_at(Point::at(0, 2)), None);
        assert_eq!(s.trace.visited().collect::<Vec<_>>(), vec![Point::at(2, 0)]);
    }

    #[test]
    fn repeated_runs_share_nothing() {
        let grid = scenario_b();
        let mut space = SearchSpace::new();
        let a = space
            .find_path(Algorithm::JumpPoint, &grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();
        let b = space
            .find_path(Algorithm::JumpPoint, &grid, Point::at(0, 0), Point::at(4, 4))
            .unwrap();
        assert_eq!(a, b);
    }
}
