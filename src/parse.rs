//! Turning the whitespace-separated token stream into a graph.

use crate::error::{Error, Result};
use crate::graph::Graph;
use tracing::debug;

/// Read `input` as pairs of tokens and add them to `graph`.
///
/// `a b` records the edge `a -> b`; `c c` only registers `c`. With an odd
/// number of tokens every complete pair is still added before
/// `Error::OddTokenCount` is returned.
pub fn parse_into(input: &str, graph: &mut Graph) -> Result<()> {
    let mut tokens = input.split_whitespace();
    let mut pairs = 0usize;

    while let Some(first) = tokens.next() {
        let Some(second) = tokens.next() else {
            debug!(pairs, dangling = first, "odd token count");
            return Err(Error::OddTokenCount);
        };

        if first == second {
            graph.add_node(first);
        } else {
            graph.put_edge(first, second);
        }
        pairs += 1;
    }

    debug!(
        pairs,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "parsed input"
    );
    Ok(())
}
