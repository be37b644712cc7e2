use std::collections::HashSet;
use std::time::Instant;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::frontier::Queue;
use crate::node::Arena;
use crate::problem::Problem;

/// Breadth-first search. FIFO frontier, explored set keyed by state key.
/// Optimal for uniform step costs, complete for finite branching.
#[derive(Debug, Default)]
pub struct Bfs {
    cancel: Option<CancelToken>,
}

impl Bfs {
    pub fn new() -> Self {
        Bfs { cancel: None }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P: Problem> Search<P> for Bfs {
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut arena = Arena::new();
        let mut frontier = Queue::new();
        frontier.enqueue(arena.root(problem.initial_state()));
        let mut explored: HashSet<P::Key> = HashSet::new();
        let mut expanded = 0;

        while !frontier.is_empty() {
            if cancelled(self.cancel.as_ref()) {
                return Ok(SearchResult::exhausted(expanded, start_time.elapsed()));
            }
            let id = frontier.dequeue()?;

            // Goal test at removal time, never at generation time.
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
            explored.insert(key);
            expanded += 1;

            for child in arena.expand(id, problem)? {
                if !explored.contains(&problem.key(&arena.get(child).state)) {
                    frontier.enqueue(child);
                }
            }
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}
