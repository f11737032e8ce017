/*!
# Sparse Matrices

A coordinate-list ("triplet") matrix storing only its non-zero entries, sorted by `(row, col)`.
It backs the [`AdjMatrixGraph`](crate::repr::AdjMatrixGraph) and serves as the output sink of the
minimum-spanning-tree algorithms.
*/

mod triplet;

pub use triplet::*;
