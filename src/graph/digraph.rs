//! Mutable directed graph keyed by opaque string identifiers.

use crate::error::{Error, Result};
use crate::graph::set::{self, Set};
use std::collections::BTreeMap;

/// Lazy, restartable view of a node's direct successors. Clone it to walk
/// the successors again from the start.
pub type Successors<'a> = set::Iter<'a>;

#[derive(Debug, Clone, Default)]
struct NodeData {
    in_degree: usize,
    successors: Set,
}

/// Directed graph with set semantics for edges: inserting the same
/// `(source, target)` pair twice records a single edge.
///
/// Nodes are created by any operation that mentions them and are never
/// deleted.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: BTreeMap<String, NodeData>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensure `node` exists. No-op when it already does.
    pub fn add_node(&mut self, node: &str) {
        self.nodes.entry(node.to_owned()).or_default();
    }

    /// Record the edge `source -> target`, creating either node as needed.
    ///
    /// Returns `false` when the edge was already present, in which case the
    /// in-degree of `target` is left untouched.
    pub fn put_edge(&mut self, source: &str, target: &str) -> bool {
        let successors = &mut self.nodes.entry(source.to_owned()).or_default().successors;
        let is_new = !successors.has(target);
        if is_new {
            successors.add(target);
        }

        let target_data = self.nodes.entry(target.to_owned()).or_default();
        if is_new {
            target_data.in_degree += 1;
        }
        is_new
    }

    pub fn successors(&self, node: &str) -> Result<Successors<'_>> {
        self.nodes
            .get(node)
            .map(|data| data.successors.iter())
            .ok_or_else(|| Error::NodeNotInGraph(node.to_owned()))
    }

    /// Remove the edge `source -> target`.
    ///
    /// Both endpoints must be known. Removing an edge that does not exist
    /// between two known nodes changes nothing and returns `false`.
    pub fn remove_edge(&mut self, source: &str, target: &str) -> Result<bool> {
        let successors = &mut self
            .nodes
            .get_mut(source)
            .ok_or_else(|| Error::SourceNotInGraph(source.to_owned()))?
            .successors;
        let removed = successors.remove(target).is_ok();

        // an edge's target always exists, so a missing target removed nothing
        let target_data = self
            .nodes
            .get_mut(target)
            .ok_or_else(|| Error::TargetNotInGraph(target.to_owned()))?;
        if removed {
            target_data.in_degree -= 1;
        }
        Ok(removed)
    }

    /// Every known node, in no promised order.
    pub fn nodes(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.keys().map(String::as_str)
    }

    /// Number of distinct predecessors of `node`; 0 for unknown nodes.
    pub fn in_degree(&self, node: &str) -> usize {
        self.nodes.get(node).map_or(0, |data| data.in_degree)
    }

    pub fn has_node(&self, node: &str) -> bool {
        self.nodes.contains_key(node)
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.nodes
            .get(source)
            .is_some_and(|data| data.successors.has(target))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|data| data.successors.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Overwrite the stored in-degree of `node`, breaking the graph's
    /// bookkeeping on purpose.
    #[cfg(test)]
    pub(crate) fn force_in_degree(&mut self, node: &str, in_degree: usize) {
        self.nodes.entry(node.to_owned()).or_default().in_degree = in_degree;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    //    a     b      c   j
    //   / \   /|\     |
    //  /   \ / | \    |
    // d     e  |  f   g
    //       |\ | /
    //       | \|/
    //       h  i
    fn fixture_graph() -> Graph {
        let mut graph = Graph::new();
        graph.put_edge("a", "d");
        graph.put_edge("a", "e");
        graph.put_edge("b", "e");
        graph.put_edge("b", "f");
        graph.put_edge("b", "i");
        graph.put_edge("b", "i");
        graph.put_edge("e", "h");
        graph.put_edge("e", "i");
        graph.put_edge("f", "i");
        graph.put_edge("c", "g");
        graph.add_node("j");
        graph
    }

    fn successors_of<'a>(graph: &'a Graph, node: &str) -> Vec<&'a str> {
        let mut successors: Vec<&str> = graph.successors(node).unwrap().collect();
        successors.sort_unstable();
        successors
    }

    fn assert_fixture_successors(graph: &Graph) {
        assert_eq!(successors_of(graph, "a"), vec!["d", "e"]);
        assert_eq!(successors_of(graph, "b"), vec!["e", "f", "i"]);
        assert_eq!(successors_of(graph, "e"), vec!["h", "i"]);
        assert_eq!(successors_of(graph, "f"), vec!["i"]);
        assert_eq!(successors_of(graph, "c"), vec!["g"]);
        assert!(successors_of(graph, "j").is_empty());
    }

    #[test]
    fn test_nodes() {
        let graph = fixture_graph();
        let mut nodes: Vec<&str> = graph.nodes().collect();
        nodes.sort_unstable();
        assert_eq!(
            nodes,
            vec!["a", "b", "c", "d", "e", "f", "g", "h", "i", "j"]
        );
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 9);
    }

    #[test]
    fn test_successors() {
        let graph = fixture_graph();
        assert_fixture_successors(&graph);
    }

    #[test]
    fn test_successors_restartable() {
        let graph = fixture_graph();
        let successors = graph.successors("b").unwrap();
        let first: Vec<&str> = successors.clone().collect();
        let second: Vec<&str> = successors.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_successors_absent_node() {
        let graph = fixture_graph();
        assert_eq!(
            graph.successors("absent").err(),
            Some(Error::NodeNotInGraph("absent".into()))
        );
    }

    #[test]
    fn test_in_degree() {
        let graph = fixture_graph();
        assert_eq!(graph.in_degree("a"), 0);
        assert_eq!(graph.in_degree("d"), 1);
        assert_eq!(graph.in_degree("e"), 2);
        assert_eq!(graph.in_degree("i"), 3);
        assert_eq!(graph.in_degree("absent-node"), 0);
    }

    #[test]
    fn test_duplicate_edge_is_idempotent() {
        let mut graph = Graph::new();
        assert!(graph.put_edge("x", "y"));
        assert!(!graph.put_edge("x", "y"));

        assert_eq!(graph.in_degree("y"), 1);
        assert_eq!(successors_of(&graph, "x"), vec!["y"]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_add_node_keeps_existing_edges() {
        let mut graph = Graph::new();
        graph.put_edge("x", "y");
        graph.add_node("x");
        graph.add_node("y");

        assert_eq!(graph.in_degree("y"), 1);
        assert!(graph.has_edge("x", "y"));
    }

    #[test]
    fn test_remove_edge_absent_source() {
        let mut graph = fixture_graph();
        assert_eq!(
            graph.remove_edge("absent-source-node", "a"),
            Err(Error::SourceNotInGraph("absent-source-node".into()))
        );
        assert_fixture_successors(&graph);
        assert!(!graph.has_node("absent-source-node"));
    }

    #[test]
    fn test_remove_edge_absent_target() {
        let mut graph = fixture_graph();
        assert_eq!(
            graph.remove_edge("a", "absent-target-node"),
            Err(Error::TargetNotInGraph("absent-target-node".into()))
        );
        assert_fixture_successors(&graph);
        assert!(!graph.has_node("absent-target-node"));
    }

    #[test]
    fn test_remove_edge() {
        let mut graph = fixture_graph();
        assert!(graph.remove_edge("b", "e").unwrap());

        assert_eq!(successors_of(&graph, "b"), vec!["f", "i"]);
        assert_eq!(successors_of(&graph, "e"), vec!["h", "i"]);
        assert_eq!(graph.in_degree("e"), 1);
        assert!(!graph.has_edge("b", "e"));
    }

    #[test]
    fn test_put_edge_creates_both_nodes() {
        let mut graph = Graph::new();
        assert!(graph.put_edge("x", "y"));

        assert!(graph.has_node("x"));
        assert!(graph.has_node("y"));
        assert_eq!(graph.in_degree("x"), 0);
        assert_eq!(graph.in_degree("y"), 1);
    }

    #[test]
    fn test_self_loop_put_and_remove() {
        let mut graph = Graph::new();
        assert!(graph.put_edge("a", "a"));
        assert!(!graph.put_edge("a", "a"));
        assert_eq!(graph.in_degree("a"), 1);

        assert!(graph.remove_edge("a", "a").unwrap());
        assert_eq!(graph.in_degree("a"), 0);
        assert!(!graph.has_edge("a", "a"));
        assert!(!graph.remove_edge("a", "a").unwrap());
        assert_eq!(graph.in_degree("a"), 0);
    }

    #[test]
    fn test_remove_missing_edge_is_noop() {
        let mut graph = fixture_graph();
        assert!(!graph.remove_edge("d", "a").unwrap());

        assert_eq!(graph.in_degree("a"), 0);
        assert_fixture_successors(&graph);
    }
}
