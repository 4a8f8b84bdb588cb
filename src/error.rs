use thiserror::Error;

/// All possible errors raised by the graph engine and its parser.
///
/// Everything except `OddTokenCount` and `InvalidUtf8` is a broken precondition:
/// the caller asked for something the data structure cannot honour.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("node is not in graph: {0}")]
    NodeNotInGraph(String),

    #[error("source node is not in graph: {0}")]
    SourceNotInGraph(String),

    #[error("target node is not in graph: {0}")]
    TargetNotInGraph(String),

    #[error("stack is empty")]
    StackEmpty,

    #[error("value is not in set: {0}")]
    NotInSet(String),

    #[error("item has no remaining count: {0}")]
    NotInMultiset(String),

    #[error("ordering stalled on {remaining} node(s) but no cycle could be found")]
    NoCycleFound { remaining: usize },

    #[error("odd data count")]
    OddTokenCount,

    #[error("input is not valid UTF-8 (byte {offset})")]
    InvalidUtf8 { offset: usize },
}

impl Error {
    /// Whether this error is a broken precondition inside the engine rather
    /// than a problem with the input.
    pub fn is_fault(&self) -> bool {
        !matches!(self, Self::OddTokenCount | Self::InvalidUtf8 { .. })
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
