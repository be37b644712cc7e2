mod heap;
mod queue;
mod stack;

pub use heap::{MinHeap, PriorityQueue};
pub use queue::Queue;
pub use stack::Stack;
