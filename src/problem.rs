use std::fmt::Debug;
use std::hash::Hash;

use crate::error::SearchError;

/// Capability contract the engine consumes. Implementations describe a
/// search space and must be pure: `result` always returns the same state for
/// the same inputs and has no observable side effects, because states are
/// cached by key in explored sets and best-cost maps across a run.
pub trait Problem {
    type State: Clone + Debug;
    type Action: Clone + Debug;
    /// Hashable, equality-comparable projection of a state. Two states are
    /// the same search-graph vertex iff their keys are equal.
    type Key: Clone + Eq + Hash;

    fn initial_state(&self) -> Self::State;

    fn is_goal(&self, state: &Self::State) -> bool;

    /// Legal transitions out of `state`, in a stable order.
    fn actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Apply `action` to `state`. Fails with `InvalidAction` if the action
    /// is not among `actions(state)`.
    fn result(&self, state: &Self::State, action: &Self::Action)
        -> Result<Self::State, SearchError>;

    fn step_cost(&self, _state: &Self::State, _action: &Self::Action, _next: &Self::State) -> f64 {
        1.0
    }

    fn key(&self, state: &Self::State) -> Self::Key;

    /// `(action, next_state, step_cost)` for every legal action of `state`.
    fn successors(
        &self,
        state: &Self::State,
    ) -> Result<Vec<(Self::Action, Self::State, f64)>, SearchError> {
        let mut successors = Vec::new();
        for action in self.actions(state) {
            let next = self.result(state, &action)?;
            let cost = self.step_cost(state, &action, &next);
            successors.push((action, next, cost));
        }
        Ok(successors)
    }
}
