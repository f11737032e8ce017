/*!
# Errors

Every fallible operation of this crate reports one of two error types:
- [`GraphError`] for vertex/edge management and graph algorithms,
- [`MatrixError`] for the [`TripletMatrix`](crate::matrix::TripletMatrix).

A call that returns an error leaves the structure unchanged.
Algorithmic incompleteness (e.g. unreachable vertices during Dijkstra or a spanning forest
instead of a tree) is **not** an error.
*/

use thiserror::Error;

use crate::node::*;

/// Errors raised by graph representations and algorithms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A vertex index was outside of `0..len`
    #[error("vertex index {index} is out of range for a graph with {len} vertices")]
    InvalidIndex { index: Node, len: NumNodes },

    /// A vertex with an equal value is already present
    #[error("vertex already exists at index {index}")]
    DuplicateVertex { index: Node },

    /// No vertex with an equal value is present
    #[error("vertex not found")]
    VertexNotFound,

    /// The edge is already present
    #[error("edge ({src},{dest}) already exists")]
    EdgeExists { src: Node, dest: Node },

    /// The edge is not present
    #[error("edge ({src},{dest}) does not exist")]
    MissingEdge { src: Node, dest: Node },

    /// A fixed-capacity representation is full
    #[error("vertex capacity of {capacity} exhausted")]
    CapacityExhausted { capacity: NumNodes },

    /// The operation is only defined for directed graphs
    #[error("operation is not supported for undirected graphs")]
    UnsupportedForUndirected,

    /// Topological sorting stopped early because the graph contains a cycle
    #[error("graph contains a cycle: only {emitted} of {total} vertices could be ordered")]
    CycleDetected { emitted: NumNodes, total: NumNodes },

    /// The backing sparse matrix rejected an access
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// Errors raised by the sparse triplet matrix
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatrixError {
    #[error("entry ({row},{col}) is out of bounds for a {rows}x{cols} matrix")]
    OutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("dimension mismatch: {lhs:?} vs {rhs:?}")]
    DimensionMismatch {
        lhs: (usize, usize),
        rhs: (usize, usize),
    },
}

/// Result type defaulting to [`GraphError`]
pub type Result<T, E = GraphError> = std::result::Result<T, E>;
