/*!
# Node Representation

Vertices are addressed by a dense index `Node = u32` in the range `0..n`.
The user-supplied vertex value (its *label*) lives next to the index in the graph representation;
algorithms only ever see indices and map back to labels at the API boundary.

Indices are stable until a vertex is removed: removing vertex `k` shifts every index above `k` down by one.
*/

use std::num::NonZero;
use stream_bitset::bitset::BitSetImpl;

/// Nodes can be any unsigned integer from `0` to `Node::MAX - 1`
pub type Node = u32;

/// Node-Value that is considered invalid
pub const INVALID_NODE: Node = Node::MAX;

/// There can be at most `2^32 - 1` nodes in a graph!
pub type NumNodes = Node;

/// BitSet for Nodes
pub type NodeBitSet = BitSetImpl<Node>;

/// As `Option<Node>` uses additional bytes for padding, it can be inefficient
/// in the dense `n x n` predecessor tables of all-pairs shortest paths.
/// This instead uses the `NonZero`-Wrapper so that `Option<OptionalNode>` stays 4 bytes wide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct OptionalNodeImpl<const N: Node>(NonZero<Node>);

/// Often, `INVALID_NODE` is safe to pick as the `None`-Value
pub type OptionalNode = OptionalNodeImpl<INVALID_NODE>;

impl<const N: Node> OptionalNodeImpl<N> {
    /// Returns `Some(OptionalNodeImpl)` if `n != N` and `None` otherwise
    pub const fn new(n: Node) -> Option<Self> {
        match NonZero::new(n ^ N) {
            Some(inner) => Some(OptionalNodeImpl(inner)),
            None => None,
        }
    }

    /// Gets the underlying Node-Value
    pub const fn get(&self) -> Node {
        self.0.get() ^ N
    }
}

/// Converts a `usize` position into a `Node`.
/// ** Panics in debug builds if the position does not fit **
#[inline]
pub(crate) fn node_from_usize(u: usize) -> Node {
    debug_assert!(u < INVALID_NODE as usize);
    u as Node
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_node_roundtrip() {
        for u in [0 as Node, 1, 17, INVALID_NODE - 1] {
            assert_eq!(OptionalNode::new(u).map(|x| x.get()), Some(u));
        }
        assert!(OptionalNode::new(INVALID_NODE).is_none());
        assert_eq!(size_of::<Option<OptionalNode>>(), size_of::<Node>());
    }
}
