//! Graph engine: the directed graph, its helper containers, and the
//! cycle-breaking topological ordering.

pub mod digraph;
pub mod order;
pub mod queue;
pub mod set;
pub mod stack;

pub use digraph::{Graph, Successors};
pub use order::{
    Cycle, Step, TopologicalOrdering, TopologicalSort, cycle_starting_at, find_cycle,
    topological_ordering, topological_sort,
};
pub use queue::{Multiset, Queue};
pub use set::Set;
pub use stack::Stack;
