//! Dijkstra, A* and greedy best-first share one engine that differs only in
//! how the frontier is ordered.

use std::cmp::Ordering;

use tracepath_core::{Grid, Point};

use crate::distance;
use crate::queue::PriorityQueue;
use crate::search::Algorithm;
use crate::space::SearchSpace;
use crate::trace::{StepEvent, StepTrace};

/// Frontier entry. `g` and `h` are snapshots taken at push time; an entry
/// whose `g` no longer matches the node's cost is stale.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Entry {
    pub(crate) idx: usize,
    pub(crate) g: i64,
    pub(crate) h: f64,
    pub(crate) seq: u64,
}

/// How frontier entries are ranked. Ties always fall back to insertion
/// order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FrontierOrder {
    /// `g` ascending (Dijkstra).
    Cost,
    /// `g + h` ascending (A*, jump point search).
    CostPlusHeuristic,
    /// `h` ascending (greedy best-first).
    Heuristic,
}

impl FrontierOrder {
    pub(crate) fn compare(self, a: &Entry, b: &Entry) -> Ordering {
        let primary = match self {
            FrontierOrder::Cost => a.g.cmp(&b.g),
            FrontierOrder::CostPlusHeuristic => {
                (a.g as f64 + a.h).total_cmp(&(b.g as f64 + b.h))
            }
            FrontierOrder::Heuristic => a.h.total_cmp(&b.h),
        };
        primary.then(a.seq.cmp(&b.seq))
    }
}

impl SearchSpace {
    /// Run the weighted best-first family. Returns whether `end` was reached.
    pub(crate) fn best_first(
        &mut self,
        algorithm: Algorithm,
        grid: &Grid,
        start: Point,
        end: Point,
        trace: &mut StepTrace,
    ) -> bool {
        let (order, guided) = match algorithm {
            Algorithm::Dijkstra => (FrontierOrder::Cost, false),
            Algorithm::AStar => (FrontierOrder::CostPlusHeuristic, true),
            _ => (FrontierOrder::Heuristic, true),
        };
        let heuristic = |p: Point| if guided { distance::euclidean(p, end) } else { 0.0 };

        let (Some(si), Some(ei)) = (self.idx(start), self.idx(end)) else {
            return false;
        };

        let mut open = PriorityQueue::new(|a: &Entry, b: &Entry| order.compare(a, b));

        self.reach(si, 0, usize::MAX);
        let seq = self.next_seq();
        open.push(Entry {
            idx: si,
            g: 0,
            h: heuristic(start),
            seq,
        });

        while let Some(current) = open.pop() {
            let ci = current.idx;
            // Superseded by a cheaper entry, or already expanded.
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
            log::trace!("{algorithm}: expand {cp} g={}", current.g);

            let current_g = self.cost(ci);
            for cell in grid.neighbors4(cp) {
                if !cell.is_passable() {
                    continue;
                }
                let Some(ni) = self.idx(cell.pos) else {
                    continue;
                };
                if self.closed(ni) {
                    continue;
                }
                let tentative = current_g.saturating_add(i64::from(cell.weight));
                let improves = if order == FrontierOrder::Heuristic {
                    // Greedy keeps the first cost it assigns.
                    !self.seen(ni)
                } else {
                    tentative < self.cost(ni)
                };
                if !improves {
                    continue;
                }

                self.reach(ni, tentative, ci);
                let h = heuristic(cell.pos);
                let seq = self.next_seq();
                open.push(Entry {
                    idx: ni,
                    g: tentative,
                    h,
                    seq,
                });
                trace.push(StepEvent::PushFrontier {
                    pos: cell.pos,
                    cost: tentative,
                    heuristic: guided.then_some(h),
                });
            }
        }
        false
    }
}
