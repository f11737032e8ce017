/*!
# Utilities

Support structures used by the algorithms of this crate:
- [`DisjointSetForest`]: union-find with path compression and union by rank (Kruskal),
- [`SeqBinaryTree`]: a level-order array-backed binary tree,
- [`PriorityQueue`]: a min- or max-heap on top of a [`SeqBinaryTree`] (Kruskal's edge order).
*/

pub mod priority_queue;
pub mod seq_tree;
pub mod union_find;

pub use priority_queue::{HeapOrder, PriorityQueue};
pub use seq_tree::SeqBinaryTree;
pub use union_find::DisjointSetForest;
