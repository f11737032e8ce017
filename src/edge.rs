use std::fmt::{Debug, Display};

use crate::node::*;

/// Number of stored (directed) edge entries.
/// An undirected edge `{u, v}` with `u != v` accounts for two entries.
pub type NumEdges = u32;

/// An edge together with its weight, as stored by a graph or emitted by an MST algorithm.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct WeightedEdge<W> {
    pub src: Node,
    pub dest: Node,
    pub weight: W,
}

impl<W> WeightedEdge<W> {
    pub fn new(src: Node, dest: Node, weight: W) -> Self {
        Self { src, dest, weight }
    }

    /// Returns *true* if both endpoints are equal
    pub fn is_loop(&self) -> bool {
        self.src == self.dest
    }

    /// Returns *true* if the endpoint with smaller index comes first
    pub fn is_normalized(&self) -> bool {
        self.src <= self.dest
    }
}

impl<W: Display> Display for WeightedEdge<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}:{})", self.src, self.dest, self.weight)
    }
}

impl<W: Debug> Debug for WeightedEdge<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{}:{:?})", self.src, self.dest, self.weight)
    }
}

impl<W> From<(Node, Node, W)> for WeightedEdge<W> {
    fn from(value: (Node, Node, W)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

impl<W: Copy> From<&(Node, Node, W)> for WeightedEdge<W> {
    fn from(value: &(Node, Node, W)) -> Self {
        WeightedEdge::new(value.0, value.1, value.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_edge_display() {
        let e = WeightedEdge::from((3, 1, 10));
        assert_eq!(format!("{e}"), "(3,1:10)");
        assert_eq!(format!("{:?}", WeightedEdge::new(1, 3, 10)), "(1,3:10)");
        assert!(!e.is_normalized());
        assert!(!e.is_loop());
        assert!(WeightedEdge::new(2, 2, 0).is_loop());
    }
}
