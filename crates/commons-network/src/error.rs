//! Error types for network operations

use crate::graph::{EdgeKind, NodeId};
use thiserror::Error;

/// Errors that can occur while building or querying the network
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Aggregate requested over an empty selection
    #[error("Empty network: no {0} to aggregate")]
    EmptyNetwork(String),

    /// An edge of this kind already joins the two nodes
    ///
    /// Only the store raises this. Edge builders skip existing edges, so it
    /// never surfaces from them.
    #[error("Duplicate {kind} edge: {from_node} -> {to_node}")]
    DuplicateEdge {
        /// Source node
        from_node: NodeId,
        /// Target node
        to_node: NodeId,
        /// Kind of the existing edge
        kind: EdgeKind,
    },

    /// Node is absent from the graph or plays the wrong role
    #[error("Invalid node reference: {node} (expected {expected})")]
    InvalidNodeReference {
        /// The offending node id
        node: NodeId,
        /// What the caller needed the node to be
        expected: &'static str,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;
