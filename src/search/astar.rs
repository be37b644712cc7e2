use std::collections::HashMap;
use std::time::Instant;

use tracing::debug;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::frontier::MinHeap;
use crate::node::Arena;
use crate::problem::Problem;

/// A* search. Min-heap ordered by `f = g + h`, best-known-cost map with the
/// same lazy-deletion discipline as uniform-cost search. Optimal when `h`
/// is admissible; with a consistent `h` it expands no more nodes than
/// uniform-cost search does on the same instance.
#[derive(Debug)]
pub struct AStar<H> {
    h: H,
    cancel: Option<CancelToken>,
}

impl<H> AStar<H> {
    pub fn new(h: H) -> Self {
        AStar { h, cancel: None }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P, H> Search<P> for AStar<H>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut arena = Arena::new();
        let mut frontier = MinHeap::new();
        let root = arena.root(problem.initial_state());
        let root_f = (self.h)(&arena.get(root).state);
        frontier.push(root, root_f);
        let mut best_g: HashMap<P::Key, f64> = HashMap::new();
        best_g.insert(problem.key(&arena.get(root).state), 0.0);
        let mut expanded = 0;

        while !frontier.is_empty() {
            if cancelled(self.cancel.as_ref()) {
                return Ok(SearchResult::exhausted(expanded, start_time.elapsed()));
            }
            let (priority, id) = frontier.pop()?;

            if problem.is_goal(&arena.get(id).state) {
                return Ok(SearchResult::solved(
                    &arena,
                    id,
                    expanded,
                    start_time.elapsed(),
                ));
            }

            let key = problem.key(&arena.get(id).state);
            if best_g.get(&key).is_some_and(|&best| arena.get(id).g > best) {
                continue;
            }
            debug!("expand node f={priority} g={}", arena.get(id).g);
            expanded += 1;

            for child in arena.expand(id, problem)? {
                let child_g = arena.get(child).g;
                let child_key = problem.key(&arena.get(child).state);
                if best_g.get(&child_key).is_none_or(|&best| child_g < best) {
                    best_g.insert(child_key, child_g);
                    let child_f = child_g + (self.h)(&arena.get(child).state);
                    frontier.push(child, child_f);
                }
            }
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristic::manhattan;
    use crate::puzzle::{Board, EightPuzzle, Move};
    use crate::search::Ucs;

    // A board a dozen legal moves away from the goal, built by replaying
    // the moves so the instance is solvable by construction.
    fn scrambled() -> Board {
        use Move::{Down, Left, Right, Up};
        let goal = Board::new([1, 2, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let problem = EightPuzzle::new(goal);
        let moves = [
            Up, Up, Left, Down, Left, Down, Right, Right, Up, Left, Up, Left,
        ];
        let mut board = goal;
        for step in moves {
            board = problem.result(&board, &step).unwrap();
        }
        board
    }

    #[test]
    fn test_astar_two_moves_from_goal() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let problem = EightPuzzle::new(initial);
        let result = AStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(result.success);
        assert_eq!(result.cost, Some(2.0));
        assert_eq!(result.depth, Some(2));
    }

    #[test]
    fn test_astar_expands_no_more_than_ucs() {
        let problem = EightPuzzle::new(scrambled());
        let ucs = Ucs::new().search(&problem).unwrap();
        let astar = AStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(ucs.success);
        assert!(astar.success);
        assert_eq!(astar.cost, ucs.cost);
        assert!(astar.expanded <= ucs.expanded);
    }

    #[test]
    fn test_astar_path_replays_to_goal() {
        let initial = scrambled();
        let problem = EightPuzzle::new(initial);
        let result = AStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(result.success);
        let path = result.path.unwrap();
        let actions = result.actions.unwrap();
        assert_eq!(path[0], initial);
        assert!(problem.is_goal(path.last().unwrap()));
        assert_eq!(actions.len(), path.len() - 1);

        // Replaying the actions from the initial state reproduces the path.
        let mut state = path[0];
        for (action, expected) in actions.iter().zip(&path[1..]) {
            state = problem.result(&state, action).unwrap();
            assert_eq!(state, *expected);
        }
    }

    #[test]
    fn test_astar_unsolvable_terminates() {
        let initial = Board::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let problem = EightPuzzle::new(initial);
        let result = AStar::new(manhattan(problem.goal()))
            .search(&problem)
            .unwrap();

        assert!(!result.success);
        assert!(result.expanded > 0);
    }
}
