use crate::error::SearchError;
use crate::problem::Problem;

/// Index of a node in its arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One vertex of the search tree. Created once at expansion time, never
/// mutated afterward; the parent link is an arena index, so reconstruction
/// is a plain index walk.
#[derive(Debug)]
pub struct Node<S, A> {
    pub state: S,
    pub parent: Option<NodeId>,
    pub action: Option<A>,
    pub g: f64,
    pub depth: usize,
    pub f: f64,
}

/// Append-only store for search nodes. Nodes are addressed by `NodeId` and
/// live until the arena is dropped at the end of the run, which keeps every
/// ancestor alive for path reconstruction.
#[derive(Debug)]
pub struct Arena<S, A> {
    nodes: Vec<Node<S, A>>,
}

impl<S: Clone, A: Clone> Arena<S, A> {
    pub fn new() -> Self {
        Arena { nodes: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> &Node<S, A> {
        &self.nodes[id.0]
    }

    /// Insert the root node: no parent, no action, `g = 0`, `depth = 0`.
    pub fn root(&mut self, state: S) -> NodeId {
        self.insert(Node {
            state,
            parent: None,
            action: None,
            g: 0.0,
            depth: 0,
            f: 0.0,
        })
    }

    /// Insert a child of `parent`: `g = parent.g + step_cost`,
    /// `depth = parent.depth + 1`, `f` stamped with the child's `g`.
    pub fn child(&mut self, parent: NodeId, action: A, state: S, step_cost: f64) -> NodeId {
        let g = self.get(parent).g + step_cost;
        let depth = self.get(parent).depth + 1;
        self.insert(Node {
            state,
            parent: Some(parent),
            action: Some(action),
            g,
            depth,
            f: g,
        })
    }

    fn insert(&mut self, node: Node<S, A>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// One child per `(action, next_state, step_cost)` successor of the
    /// node's state.
    pub fn expand<P>(&mut self, id: NodeId, problem: &P) -> Result<Vec<NodeId>, SearchError>
    where
        P: Problem<State = S, Action = A>,
    {
        let state = self.get(id).state.clone();
        let mut children = Vec::new();
        for (action, next, cost) in problem.successors(&state)? {
            children.push(self.child(id, action, next, cost));
        }
        Ok(children)
    }

    /// States from the initial state to `id` inclusive. O(depth).
    pub fn reconstruct_path(&self, id: NodeId) -> Vec<S> {
        let mut path = Vec::with_capacity(self.get(id).depth + 1);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            path.push(node.state.clone());
            current = node.parent;
        }
        path.reverse();
        path
    }

    /// Actions from the initial state to `id`; the root contributes none,
    /// so this is one element shorter than the path. O(depth).
    pub fn reconstruct_actions(&self, id: NodeId) -> Vec<A> {
        let mut actions = Vec::with_capacity(self.get(id).depth);
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.get(node_id);
            if let Some(action) = &node.action {
                actions.push(action.clone());
            }
            current = node.parent;
        }
        actions.reverse();
        actions
    }
}

impl<S: Clone, A: Clone> Default for Arena<S, A> {
    fn default() -> Self {
        Self::new()
    }
}
