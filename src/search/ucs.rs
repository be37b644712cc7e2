use std::collections::HashMap;
use std::time::Instant;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::frontier::MinHeap;
use crate::node::Arena;
use crate::problem::Problem;

/// Uniform-cost search. Min-heap ordered by `g`, with a best-known-cost map
/// per state key. There is no decrease-key: a better route re-pushes the
/// state, and the stale heap entry is discarded when it surfaces (lazy
/// deletion). Optimal for any non-negative step cost.
#[derive(Debug, Default)]
pub struct Ucs {
    cancel: Option<CancelToken>,
}

impl Ucs {
    pub fn new() -> Self {
        Ucs { cancel: None }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P: Problem> Search<P> for Ucs {
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut arena = Arena::new();
        let mut frontier = MinHeap::new();
        let root = arena.root(problem.initial_state());
        frontier.push(root, 0.0);
        let mut best_g: HashMap<P::Key, f64> = HashMap::new();
        best_g.insert(problem.key(&arena.get(root).state), 0.0);
        let mut expanded = 0;

        while !frontier.is_empty() {
            if cancelled(self.cancel.as_ref()) {
                return Ok(SearchResult::exhausted(expanded, start_time.elapsed()));
            }
            let (_, id) = frontier.pop()?;

            if problem.is_goal(&arena.get(id).state) {
                return Ok(SearchResult::solved(
                    &arena,
                    id,
                    expanded,
                    start_time.elapsed(),
                ));
            }

            let key = problem.key(&arena.get(id).state);
            // Stale entry: a cheaper route to this state was already
            // processed.
            if best_g.get(&key).is_some_and(|&best| arena.get(id).g > best) {
                continue;
            }
            expanded += 1;

            for child in arena.expand(id, problem)? {
                let child_g = arena.get(child).g;
                let child_key = problem.key(&arena.get(child).state);
                if best_g.get(&child_key).is_none_or(|&best| child_g < best) {
                    best_g.insert(child_key, child_g);
                    frontier.push(child, child_g);
                }
            }
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{Board, EightPuzzle};

    // Three towns where the direct road is a toll road: a -> d costs 10,
    // while a -> b -> d costs 2 + 3.
    struct TollRoads;

    impl TollRoads {
        fn edges(state: char) -> Vec<(char, f64)> {
            match state {
                'a' => vec![('d', 10.0), ('b', 2.0)],
                'b' => vec![('d', 3.0)],
                _ => Vec::new(),
            }
        }
    }

    impl Problem for TollRoads {
        type State = char;
        type Action = char;
        type Key = char;

        fn initial_state(&self) -> char {
            'a'
        }

        fn is_goal(&self, state: &char) -> bool {
            *state == 'd'
        }

        fn actions(&self, state: &char) -> Vec<char> {
            Self::edges(*state).into_iter().map(|(to, _)| to).collect()
        }

        fn result(&self, state: &char, action: &char) -> Result<char, SearchError> {
            Self::edges(*state)
                .into_iter()
                .find(|(to, _)| to == action)
                .map(|(to, _)| to)
                .ok_or_else(|| SearchError::InvalidAction {
                    state: state.to_string(),
                    action: action.to_string(),
                })
        }

        fn step_cost(&self, state: &char, action: &char, _next: &char) -> f64 {
            Self::edges(*state)
                .into_iter()
                .find(|(to, _)| to == action)
                .map_or(f64::INFINITY, |(_, cost)| cost)
        }

        fn key(&self, state: &char) -> char {
            *state
        }
    }

    #[test]
    fn test_ucs_prefers_cheap_long_route() {
        let result = Ucs::new().search(&TollRoads).unwrap();

        assert!(result.success);
        assert_eq!(result.cost, Some(5.0));
        assert_eq!(result.path.unwrap(), vec!['a', 'b', 'd']);
        assert_eq!(result.depth, Some(2));
    }

    #[test]
    fn test_ucs_two_moves_from_goal() {
        let initial = Board::new([1, 2, 3, 4, 5, 6, 0, 7, 8]).unwrap();
        let result = Ucs::new().search(&EightPuzzle::new(initial)).unwrap();

        assert!(result.success);
        assert_eq!(result.cost, Some(2.0));
        assert_eq!(result.depth, Some(2));
    }

    #[test]
    fn test_ucs_unsolvable_terminates() {
        let initial = Board::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
        let result = Ucs::new().search(&EightPuzzle::new(initial)).unwrap();

        assert!(!result.success);
        assert!(result.expanded > 0);
    }
}
