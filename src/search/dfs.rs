use std::collections::HashSet;
use std::time::Instant;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::frontier::Stack;
use crate::node::Arena;
use crate::problem::Problem;

/// Depth-first search. LIFO frontier, explored set, optional depth limit.
/// Incomplete and suboptimal by design; the limit bounds memory and stops
/// infinite descent, since nodes at or beyond it are never expanded.
#[derive(Debug, Default)]
pub struct Dfs {
    depth_limit: Option<usize>,
    cancel: Option<CancelToken>,
}

impl Dfs {
    pub fn new() -> Self {
        Dfs {
            depth_limit: None,
            cancel: None,
        }
    }

    pub fn bounded(depth_limit: usize) -> Self {
        Dfs {
            depth_limit: Some(depth_limit),
            cancel: None,
        }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P: Problem> Search<P> for Dfs {
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut arena = Arena::new();
        let mut frontier = Stack::new();
        frontier.push(arena.root(problem.initial_state()));
        let mut explored: HashSet<P::Key> = HashSet::new();
        let mut expanded = 0;

        while !frontier.is_empty() {
            if cancelled(self.cancel.as_ref()) {
                return Ok(SearchResult::exhausted(expanded, start_time.elapsed()));
            }
            let id = frontier.pop()?;

            if problem.is_goal(&arena.get(id).state) {
                return Ok(SearchResult::solved(
                    &arena,
                    id,
                    expanded,
                    start_time.elapsed(),
                ));
            }

            let key = problem.key(&arena.get(id).state);
            if explored.contains(&key) {
                continue;
            }
            // A node at the limit may still be goal-checked above; it is
            // just never expanded.
            if self
                .depth_limit
                .is_some_and(|limit| arena.get(id).depth >= limit)
            {
                continue;
            }
            explored.insert(key);
            expanded += 1;

            for child in arena.expand(id, problem)? {
                if !explored.contains(&problem.key(&arena.get(child).state)) {
                    frontier.push(child);
                }
            }
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}
