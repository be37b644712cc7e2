mod astar;
mod bfs;
mod dfs;
mod greedy;
mod idastar;
mod ucs;

pub use astar::AStar;
pub use bfs::Bfs;
pub use dfs::Dfs;
pub use greedy::Greedy;
pub use idastar::IdaStar;
pub use ucs::Ucs;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::SearchError;
use crate::node::{Arena, NodeId};
use crate::problem::Problem;

/// Shared flag polled once per node removal. Cancelling aborts the run and
/// yields the negative outcome; per-run state is discarded with the
/// invocation, so nothing is left corrupted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

fn cancelled(cancel: Option<&CancelToken>) -> bool {
    cancel.is_some_and(CancelToken::is_cancelled)
}

/// Uniform outcome of one search invocation. `path`, `actions`, `cost` and
/// `depth` are all present on success and all absent on the negative
/// outcome; `expanded` counts nodes removed from the frontier and processed.
#[derive(Debug, Clone)]
pub struct SearchResult<S, A> {
    pub success: bool,
    pub path: Option<Vec<S>>,
    pub actions: Option<Vec<A>>,
    pub cost: Option<f64>,
    pub depth: Option<usize>,
    pub expanded: usize,
    pub time: Duration,
}

impl<S: Clone, A: Clone> SearchResult<S, A> {
    pub(crate) fn solved(arena: &Arena<S, A>, goal: NodeId, expanded: usize, time: Duration) -> Self {
        let node = arena.get(goal);
        SearchResult {
            success: true,
            path: Some(arena.reconstruct_path(goal)),
            actions: Some(arena.reconstruct_actions(goal)),
            cost: Some(node.g),
            depth: Some(node.depth),
            expanded,
            time,
        }
    }

    /// The defined negative outcome: the frontier (or, for the deepening
    /// strategy, the bound space) ran dry without removing a goal node.
    pub(crate) fn exhausted(expanded: usize, time: Duration) -> Self {
        SearchResult {
            success: false,
            path: None,
            actions: None,
            cost: None,
            depth: None,
            expanded,
            time,
        }
    }
}

pub trait Search<P: Problem> {
    fn search(&mut self, problem: &P) -> Result<SearchResult<P::State, P::Action>, SearchError>;
}
