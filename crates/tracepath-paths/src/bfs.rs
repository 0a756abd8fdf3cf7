use std::collections::VecDeque;

use tracepath_core::{Grid, Point};

use crate::space::SearchSpace;
use crate::trace::{StepEvent, StepTrace};

impl SearchSpace {
    /// Breadth-first search from `start` to `end`.
    ///
    /// FIFO order guarantees the fewest-steps path; weights are only used to
    /// report the accumulated cost of each discovered cell. Returns whether
    /// `end` was reached.
    pub(crate) fn bfs(
        &mut self,
        grid: &Grid,
        start: Point,
        end: Point,
        trace: &mut StepTrace,
    ) -> bool {
        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return false;
        };

        self.reach(si, 0, usize::MAX);
        let mut queue: VecDeque<usize> = VecDeque::new();
        queue.push_back(si);

        while let Some(ci) = queue.pop_front() {
            self.close(ci);
            let cp = self.point(ci);
            if ci != si && ci != ei {
                trace.push(StepEvent::Visit(cp));
            }
            if ci == ei {
                return true;
            }
            log::trace!("bfs: expand {cp}");

            let current_cost = self.cost(ci);
            for cell in grid.neighbors4(cp) {
                if !cell.is_passable() {
                    continue;
                }
                let Some(ni) = self.idx(cell.pos) else {
                    continue;
                };
                if self.seen(ni) {
                    continue;
                }
                let cost = current_cost.saturating_add(i64::from(cell.weight));
                self.reach(ni, cost, ci);
                queue.push_back(ni);
                trace.push(StepEvent::PushFrontier {
                    pos: cell.pos,
                    cost,
                    heuristic: None,
                });
            }
        }
        false
    }
}
