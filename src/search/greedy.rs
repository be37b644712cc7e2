use std::collections::HashSet;
use std::time::Instant;

use super::{cancelled, CancelToken, Search, SearchResult};
use crate::error::SearchError;
use crate::frontier::MinHeap;
use crate::node::Arena;
use crate::problem::Problem;

/// Greedy best-first search. Min-heap ordered by `h` alone, explored set.
/// Neither completeness nor optimality is guaranteed; solution quality is
/// whatever the heuristic makes of it.
#[derive(Debug)]
pub struct Greedy<H> {
    h: H,
    cancel: Option<CancelToken>,
}

impl<H> Greedy<H> {
    pub fn new(h: H) -> Self {
        Greedy { h, cancel: None }
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = Some(cancel);
        self
    }
}

impl<P, H> Search<P> for Greedy<H>
where
    P: Problem,
    H: Fn(&P::State) -> f64,
{
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError> {
        let start_time = Instant::now();
        let mut arena = Arena::new();
        let mut frontier = MinHeap::new();
        let root = arena.root(problem.initial_state());
        let root_h = (self.h)(&arena.get(root).state);
        frontier.push(root, root_h);
        let mut explored: HashSet<P::Key> = HashSet::new();
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
            if explored.contains(&key) {
                continue;
            }
            explored.insert(key);
            expanded += 1;

            for child in arena.expand(id, problem)? {
                if !explored.contains(&problem.key(&arena.get(child).state)) {
                    let child_h = (self.h)(&arena.get(child).state);
                    frontier.push(child, child_h);
                }
            }
        }

        Ok(SearchResult::exhausted(expanded, start_time.elapsed()))
    }
}
