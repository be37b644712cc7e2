use std::time::Instant;

use tracing::debug;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::node::{Arena, NodeId};
use crate::problem::Problem;

/// Default ceiling on the deepening bound. Stops the iteration loop on
/// pathological instances where the bound would otherwise grow forever.
pub const DEFAULT_MAX_BOUND: f64 = 10_000.0;

/// Iterative-deepening A*. Repeated depth-first probes under a growing
/// `f`-bound: a probe prunes any node with `f = g + h > bound` and reports
/// its `f` upward; the next bound is the minimum `f` pruned in the previous
/// iteration. There is no explored set, only bound pruning, so repeated
/// work is traded for memory. Optimal when `h` is admissible.
#[derive(Debug)]
pub struct IdaStar<H> {
    h: H,
    max_bound: f64,
    cancel: Option<CancelToken>,
}

impl<H> IdaStar<H> {
    pub fn new(h: H) -> Self {
        IdaStar {
            h,
            max_bound: DEFAULT_MAX_BOUND,
            cancel: None,
        }
    }

    pub fn with_max_bound(mut self, max_bound: f64) -> Self {
        self.max_bound = max_bound;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P, H> Search<P> for IdaStar<H>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut bound = (self.h)(&problem.initial_state());
        let mut expanded = 0;

        while bound <= self.max_bound {
            debug!("deepening iteration, bound {bound}");
            // Nodes of one probe are discarded with its arena; only the
            // bound survives between iterations.
            let mut arena = Arena::new();
            let root = arena.root(problem.initial_state());
            let (next_bound, found) = self.probe(&mut arena, problem, root, bound, &mut expanded)?;

            if let Some(goal) = found {
                return Ok(SearchResult::solved(
                    &arena,
                    goal,
                    expanded,
                    start_time.elapsed(),
                ));
            }
            if next_bound.is_infinite() {
                // Nothing was pruned: the space below the bound is the
                // whole space, and it holds no goal.
                break;
            }
            bound = next_bound;
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}

impl<H> IdaStar<H> {
    /// Depth-first probe under `bound`. Returns the minimum pruned `f` and
    /// the goal node if one was reached; a found goal propagates straight
    /// up through every caller with no further expansion.
    fn probe<P>(
        &self,
        arena: &mut Arena<P::State, P::Action>,
        problem: &P,
        id: NodeId,
        bound: f64,
        expanded: &mut usize,
    ) -> Result<(f64, Option<NodeId>), SearchError>
    where
        P: Problem,
        H: Fn(&P::State) -> f64,
    {
        if cancelled(self.cancel.as_ref()) {
            return Ok((f64::INFINITY, None));
        }
        let node = arena.get(id);
        let f = node.g + (self.h)(&node.state);
        if f > bound {
            return Ok((f, None));
        }
        if problem.is_goal(&node.state) {
            return Ok((f, Some(id)));
        }
        *expanded += 1;

        let mut min_pruned = f64::INFINITY;
        for child in arena.expand(id, problem)? {
            let (t, found) = self.probe(arena, problem, child, bound, expanded)?;
            if found.is_some() {
                return Ok((t, found));
            }
            if t < min_pruned {
                min_pruned = t;
            }
        }
        Ok((min_pruned, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::manhattan;
    use crate::puzzle::{Board, EightPuzzle};
    use crate::search::AStar;

    #[test]
    fn test_idastar_two_moves_from_goal() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let problem = EightPuzzle::new(initial);
        let result = IdaStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(result.success);
        assert_eq!(result.cost, Some(2.0));
        assert_eq!(result.depth, Some(2));
    }

    #[test]
    fn test_idastar_cost_matches_astar() {
        let initial = Board::new([1, 2, 3, 0, 4, 6, 7, 5, 8]).unwrap();
        let problem = EightPuzzle::new(initial);
        let astar = AStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();
        let idastar = IdaStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(astar.success);
        assert!(idastar.success);
        assert_eq!(idastar.cost, astar.cost);
        assert_eq!(idastar.depth, astar.depth);
    }

    #[test]
    fn test_idastar_initial_is_goal() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let problem = EightPuzzle::new(initial);
        let result = IdaStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(result.success);
        assert_eq!(result.expanded, 0);
        assert_eq!(result.depth, Some(0));
    }

    #[test]
    fn test_idastar_ceiling_below_initial_bound_fails_fast() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let problem = EightPuzzle::new(initial);
        // h(initial) = 2 already exceeds the ceiling; no probe runs.
        let result = IdaStar::new(manhattan(problem.goal()))
            .with_max_bound(1.0)
            .search(&problem)
            .unwrap();

        assert!(!result.success);
        assert_eq!(result.expanded, 0);
    }

    #[test]
    fn test_idastar_unsolvable_stops_at_ceiling() {
        let initial = Board::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let problem = EightPuzzle::new(initial);
        let result = IdaStar::new(manhattan(problem.goal()))
            .with_max_bound(10.0)
            .search(&problem)
            .unwrap();

        assert!(!result.success);
        assert!(result.expanded > 0);
    }
}
