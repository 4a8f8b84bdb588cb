//! Topological ordering using Kahn's algorithm, breaking cycles as it goes.
//!
//! Every call to [`TopologicalOrdering::next`] runs one fresh Kahn pass over
//! the graph. A pass that places every node ends the sequence with a single
//! [`Step::Batch`]. A pass that stalls throws its partial batch away, finds
//! one cycle among the unresolved nodes, deletes the cycle's closing edge
//! and yields [`Step::Cycle`]. Each stall removes one edge, so a graph with
//! `E` edges needs at most `E + 1` passes.

use crate::error::{Error, Result};
use crate::graph::digraph::{Graph, Successors};
use crate::graph::queue::{Multiset, Queue};
use crate::graph::set::Set;
use crate::graph::stack::Stack;
use std::fmt;
use tracing::{debug, trace};

/// A simple cycle in edge order: each node has an edge to the next one and
/// the last node has an edge back to the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    nodes: Vec<String>,
}

impl Cycle {
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// The edge from the last node back to the first.
    pub fn closing_edge(&self) -> Option<(&str, &str)> {
        match (self.nodes.last(), self.nodes.first()) {
            (Some(last), Some(first)) => Some((last.as_str(), first.as_str())),
            _ => None,
        }
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            write!(f, "{node} -> ")?;
        }
        match self.nodes.first() {
            Some(first) => write!(f, "{first}"),
            None => Ok(()),
        }
    }
}

/// One item of the ordering sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Nodes in the order Kahn's algorithm placed them. Never empty.
    Batch(Vec<String>),
    /// A cycle whose closing edge has already been removed from the graph.
    Cycle(Cycle),
}

/// Lazy sequence of ordering steps over a borrowed graph.
///
/// Nothing happens between calls to `next`, so a consumer that stops
/// iterating (or drops the iterator) leaves the graph exactly as it was
/// after the last yielded step. The sequence is fused: once it has yielded
/// its final batch or an error, it only yields `None`.
#[derive(Debug)]
pub struct TopologicalOrdering<'g> {
    graph: &'g mut Graph,
    passes: usize,
    finished: bool,
}

/// Start ordering `graph`. The graph loses one edge per yielded cycle.
pub fn topological_ordering(graph: &mut Graph) -> TopologicalOrdering<'_> {
    TopologicalOrdering {
        graph,
        passes: 0,
        finished: false,
    }
}

impl TopologicalOrdering<'_> {
    fn advance(&mut self) -> Result<Option<Step>> {
        self.passes += 1;
        let pass = kahn_pass(self.graph)?;

        if pass.unresolved.is_empty() {
            self.finished = true;
            debug!(
                pass = self.passes,
                nodes = pass.batch.len(),
                "ordering complete"
            );
            if pass.batch.is_empty() {
                return Ok(None);
            }
            return Ok(Some(Step::Batch(pass.batch)));
        }

        debug!(
            pass = self.passes,
            placed = pass.batch.len(),
            unresolved = pass.unresolved.len(),
            "kahn pass stalled"
        );

        let cycle = find_cycle(self.graph, pass.unresolved.all_unique())?.ok_or(
            Error::NoCycleFound {
                remaining: pass.unresolved.len(),
            },
        )?;
        if let Some((source, target)) = cycle.closing_edge() {
            self.graph.remove_edge(source, target)?;
            debug!(%cycle, source, target, "broke cycle");
        }
        Ok(Some(Step::Cycle(cycle)))
    }
}

impl Iterator for TopologicalOrdering<'_> {
    type Item = Result<Step>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.advance() {
            Ok(step) => step.map(Ok),
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl std::iter::FusedIterator for TopologicalOrdering<'_> {}

/// Result of running an ordering to completion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopologicalSort {
    pub ordered: Vec<String>,
    pub cycles: Vec<Cycle>,
}

/// Drain [`topological_ordering`] into the final order plus every cycle
/// that had to be broken.
pub fn topological_sort(graph: &mut Graph) -> Result<TopologicalSort> {
    let mut sort = TopologicalSort::default();
    for step in topological_ordering(graph) {
        match step? {
            Step::Batch(nodes) => sort.ordered.extend(nodes),
            Step::Cycle(cycle) => sort.cycles.push(cycle),
        }
    }
    Ok(sort)
}

struct KahnPass {
    batch: Vec<String>,
    unresolved: Multiset,
}

fn kahn_pass(graph: &Graph) -> Result<KahnPass> {
    let mut roots = roots_of(graph);
    let mut unresolved = non_roots_of(graph);
    let mut batch = Vec::with_capacity(graph.node_count());

    while let Some(next) = roots.dequeue() {
        for successor in graph.successors(&next)? {
            if unresolved.remove_one(successor)? {
                roots.enqueue(successor);
            }
        }
        batch.push(next);
    }

    Ok(KahnPass { batch, unresolved })
}

fn roots_of(graph: &Graph) -> Queue {
    let mut roots = Queue::new();
    for node in graph.nodes() {
        if graph.in_degree(node) == 0 {
            roots.enqueue(node);
        }
    }
    roots
}

fn non_roots_of(graph: &Graph) -> Multiset {
    let mut non_roots = Multiset::new();
    for node in graph.nodes() {
        non_roots.add(node, graph.in_degree(node));
    }
    non_roots
}

/// Search each candidate in turn for a cycle through the live graph.
///
/// Nodes fully explored without closing a cycle are remembered across
/// candidates and never entered again, which keeps one search linear in the
/// size of the graph.
pub fn find_cycle<'a, I>(graph: &Graph, candidates: I) -> Result<Option<Cycle>>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut exhausted = Set::new();
    for start in candidates {
        if exhausted.has(start) {
            continue;
        }
        if let Some(cycle) = search_from(graph, start, &mut exhausted)? {
            return Ok(Some(cycle));
        }
        trace!(start, "no cycle reachable");
    }
    Ok(None)
}

/// Depth-first search for a cycle reachable from `start`.
pub fn cycle_starting_at(graph: &Graph, start: &str) -> Result<Option<Cycle>> {
    search_from(graph, start, &mut Set::new())
}

// `path` and `on_path` only ever hold the current DFS path, so an edge into
// a node explored on an earlier branch is not mistaken for a back edge.
fn search_from(graph: &Graph, start: &str, exhausted: &mut Set) -> Result<Option<Cycle>> {
    let mut path = Stack::new();
    let mut on_path = Set::new();
    let mut frames: Vec<Successors<'_>> = Vec::new();

    path.push(start);
    on_path.add(start);
    frames.push(graph.successors(start)?);

    loop {
        let next = match frames.last_mut() {
            Some(frame) => frame.next(),
            None => return Ok(None),
        };

        match next {
            Some(successor) if on_path.has(successor) => {
                return close_cycle(&mut path, successor).map(Some);
            }
            Some(successor) if exhausted.has(successor) => {}
            Some(successor) => {
                path.push(successor);
                on_path.add(successor);
                frames.push(graph.successors(successor)?);
            }
            None => {
                frames.pop();
                let done = path.pop()?;
                on_path.remove(&done)?;
                exhausted.add(&done);
            }
        }
    }
}

fn close_cycle(path: &mut Stack, first: &str) -> Result<Cycle> {
    let mut nodes = vec![path.pop()?];
    while nodes.last().map(String::as_str) != Some(first) {
        nodes.push(path.pop()?);
    }
    nodes.reverse();
    Ok(Cycle { nodes })
}
