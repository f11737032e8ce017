/*!
Minimum spanning trees.

Both algorithms write the accepted edges into an `n x n` [`TripletMatrix`] where entry `(u, v)`
holds the weight of tree edge `(u, v)`. On a disconnected graph the result is silently a
spanning forest (Kruskal) or the tree of the start component (Prim).
*/

use std::cmp::Ordering;

use tracing::debug;

use super::{shortest_path::settle_from, *};
use crate::{
    matrix::TripletMatrix,
    utils::{DisjointSetForest, PriorityQueue},
};

/// Edge ordered by weight only
struct Candidate<W>(WeightedEdge<W>);

impl<W: PartialOrd> PartialEq for Candidate<W> {
    fn eq(&self, other: &Self) -> bool {
        self.0.weight == other.0.weight
    }
}

impl<W: PartialOrd> PartialOrd for Candidate<W> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.0.weight.partial_cmp(&other.0.weight)
    }
}

/// Provides minimum spanning tree algorithms directly on graphs
pub trait MinimumSpanningTree: WeightedAdjacencyList {
    /// Grows a spanning tree from `start` in `O(n^2 + m)`, always attaching the cheapest edge
    /// leaving the tree. For every vertex `v != start` reached, the edge `(parent, v)` is emitted.
    /// On directed graphs only out-edges are followed.
    /// Fails if `start` is not a vertex.
    fn prim(&self, start: Node) -> Result<TripletMatrix<Self::Weight>> {
        self.check_node(start)?;

        let (keys, predecessors) = settle_from(self, start, |_, w| w);

        let n = self.len();
        let mut tree = TripletMatrix::new(n, n);
        for v in self.vertices().filter(|&v| v != start) {
            if let (Some(p), Some(w)) = (predecessors[v as usize], keys[v as usize]) {
                tree.insert(p as usize, v as usize, w)?;
            }
        }

        if tree.len() + 1 < n {
            debug!(start, reached = tree.len() + 1, nodes = n, "prim: graph not connected from start");
        }
        Ok(tree)
    }

    /// Computes a minimum spanning forest by scanning all stored edges in ascending weight order
    /// and accepting those that join two different components.
    /// Stops once `n - 1` edges were accepted.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: AdjListGraph<char, u32> = AdjListGraph::from_vertices_and_edges(
    ///     GraphConfig::new().undirected(),
    ///     ['a', 'b', 'c'],
    ///     [(0, 1, 3), (1, 2, 1), (0, 2, 2)],
    /// ).unwrap();
    ///
    /// let tree = g.kruskal().unwrap();
    /// assert_eq!(tree.len(), 2);
    /// assert_eq!(tree.sum_of_values(), 3);
    /// ```
    fn kruskal(&self) -> Result<TripletMatrix<Self::Weight>> {
        let n = self.number_of_nodes();
        let target = n.saturating_sub(1) as usize;

        let mut queue: PriorityQueue<_> = self.edges().map(Candidate).collect();
        let mut forest = DisjointSetForest::new(n);
        let mut tree = TripletMatrix::new(n as usize, n as usize);

        while tree.len() < target {
            let Some(Candidate(e)) = queue.pop() else {
                break;
            };
            if forest.unite(e.src, e.dest) {
                tree.insert(e.src as usize, e.dest as usize, e.weight)?;
            }
        }

        if tree.len() < target {
            debug!(
                accepted = tree.len(),
                components = forest.number_of_sets(),
                "kruskal: spanning forest"
            );
        }
        Ok(tree)
    }
}

impl<G> MinimumSpanningTree for G where G: WeightedAdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::*, repr::*};
    use itertools::Itertools;

    fn triples(tree: &TripletMatrix<u32>) -> Vec<(usize, usize, u32)> {
        tree.iter().map(|t| (t.row, t.col, t.value)).collect_vec()
    }

    #[test]
    fn prim_emits_parent_edges() {
        // path 0 - 1 - 2 with a heavy chord and an isolated vertex 3
        let graph: AdjListGraph<u8, u32> = AdjListGraph::from_vertices_and_edges(
            GraphConfig::new().undirected(),
            0..4,
            [(0, 1, 2), (1, 2, 3), (0, 2, 9)],
        )
        .unwrap();

        assert_eq!(triples(&graph.prim(2).unwrap()), vec![(1, 0, 2), (2, 1, 3)]);
        assert_eq!(graph.prim(3).unwrap().len(), 0);
        assert!(graph.prim(4).is_err());
    }

    #[test]
    fn kruskal_builds_forest() {
        let graph: AdjMatrixGraph<u8, u32> = AdjMatrixGraph::from_vertices_and_edges(
            GraphConfig::new().undirected(),
            0..5,
            [(0, 1, 4), (1, 2, 1), (0, 2, 2), (3, 4, 7), (2, 2, 0)],
        )
        .unwrap();

        let tree = graph.kruskal().unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.sum_of_values(), 10);
        assert!(tree.iter().all(|t| t.row != t.col));
    }

    #[test]
    fn empty_and_single_vertex() {
        let mut graph: AdjListGraph<u8, u32> = GraphFromConfig::new_directed();
        assert!(graph.kruskal().unwrap().is_empty());

        graph.insert_vertex(1).unwrap();
        graph.insert_edge(0, 0, 1).unwrap();
        assert!(graph.kruskal().unwrap().is_empty());
        assert!(graph.prim(0).unwrap().is_empty());
    }
}
