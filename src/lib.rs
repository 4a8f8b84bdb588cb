//! # tsort
//!
//! Reads pairs of items describing a partial order and writes one total
//! order consistent with it. Cycles in the input are reported and broken
//! one edge at a time so that an order can always be produced.

pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod graph;
pub mod parse;

pub use error::{Error, Result};
pub use graph::{Cycle, Graph, Step, topological_ordering, topological_sort};
pub use parse::parse_into;
