/*!
Graph traversal iterators covering **all** vertices of a graph.

A traversal starts at a given vertex. Once its component is exhausted, it continues with the
next unvisited vertex in the wrap-around order `start + 1, ..., n - 1, 0, ..., start - 1`,
so every vertex is yielded exactly once.

The frontier is abstracted by [`NodeSequencer`]:
- [`VecDeque`] -> queue semantics -> **BFS** (level order, vertices marked when discovered),
- [`Vec`] -> stack semantics -> **DFS** (pre-order, vertices marked when taken from the stack).

Neighbors are explored in ascending index order in both cases, so the DFS order matches the
one of a recursive implementation without its depth-proportional stack usage.
*/

use std::{collections::VecDeque, iter::Chain, ops::Range};

use smallvec::SmallVec;
use stream_bitset::prelude::*;

use super::*;

/// Abstraction for the traversal frontier data structure
pub trait NodeSequencer: Default {
    /// Puts a new root into the frontier
    fn seed(&mut self, u: Node, visited: &mut NodeBitSet);

    /// Returns the next vertex to emit, skipping vertices that were already emitted
    fn next_node(&mut self, visited: &mut NodeBitSet) -> Option<Node>;

    /// Puts the unvisited `neighbors` of the vertex just emitted into the frontier
    fn expand<I>(&mut self, neighbors: I, visited: &mut NodeBitSet)
    where
        I: Iterator<Item = Node>;
}

impl NodeSequencer for VecDeque<Node> {
    fn seed(&mut self, u: Node, visited: &mut NodeBitSet) {
        visited.set_bit(u);
        self.push_back(u);
    }

    fn next_node(&mut self, _: &mut NodeBitSet) -> Option<Node> {
        self.pop_front()
    }

    fn expand<I>(&mut self, neighbors: I, visited: &mut NodeBitSet)
    where
        I: Iterator<Item = Node>,
    {
        for v in neighbors {
            if !visited.set_bit(v) {
                self.push_back(v);
            }
        }
    }
}

impl NodeSequencer for Vec<Node> {
    fn seed(&mut self, u: Node, _: &mut NodeBitSet) {
        self.push(u);
    }

    fn next_node(&mut self, visited: &mut NodeBitSet) -> Option<Node> {
        while let Some(u) = self.pop() {
            if !visited.set_bit(u) {
                return Some(u);
            }
        }
        None
    }

    fn expand<I>(&mut self, neighbors: I, visited: &mut NodeBitSet)
    where
        I: Iterator<Item = Node>,
    {
        // pushed in reverse so that the smallest neighbor is explored first
        let unvisited: SmallVec<[Node; 16]> = neighbors.filter(|&v| !visited.get_bit(v)).collect();
        self.extend(unvisited.into_iter().rev());
    }
}

/// Generic traversal iterator supporting BFS and DFS variants
pub struct TraversalSearch<'a, G, S>
where
    G: WeightedAdjacencyList,
    S: NodeSequencer,
{
    graph: &'a G,
    visited: NodeBitSet,
    sequencer: S,
    roots: Chain<Range<Node>, Range<Node>>,
    emitted: NumNodes,
}

/// A BFS traversal iterator over the whole graph
pub type BFS<'a, G> = TraversalSearch<'a, G, VecDeque<Node>>;

/// A DFS traversal iterator over the whole graph
pub type DFS<'a, G> = TraversalSearch<'a, G, Vec<Node>>;

impl<'a, G, S> TraversalSearch<'a, G, S>
where
    G: WeightedAdjacencyList,
    S: NodeSequencer,
{
    /// Creates a new traversal starting at `start`.
    /// Fails if `start` is not a vertex of `graph`.
    pub fn new(graph: &'a G, start: Node) -> Result<Self> {
        graph.check_node(start)?;

        let mut visited = graph.vertex_bitset_unset();
        let mut sequencer = S::default();
        sequencer.seed(start, &mut visited);

        Ok(Self {
            graph,
            visited,
            sequencer,
            roots: (start + 1..graph.number_of_nodes()).chain(0..start),
            emitted: 0,
        })
    }
}

impl<G, S> Iterator for TraversalSearch<'_, G, S>
where
    G: WeightedAdjacencyList,
    S: NodeSequencer,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(u) = self.sequencer.next_node(&mut self.visited) {
                self.sequencer
                    .expand(self.graph.neighbors_of(u).map(|(v, _)| v), &mut self.visited);
                self.emitted += 1;
                return Some(u);
            }

            // current component is exhausted
            let visited = &self.visited;
            let root = self.roots.find(|&r| !visited.get_bit(r))?;
            self.sequencer.seed(root, &mut self.visited);
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.graph.number_of_nodes() - self.emitted) as usize;
        (remaining, Some(remaining))
    }
}

impl<G, S> ExactSizeIterator for TraversalSearch<'_, G, S>
where
    G: WeightedAdjacencyList,
    S: NodeSequencer,
{
}

/// Provides traversal methods directly on graphs
pub trait Traversal: WeightedAdjacencyList {
    /// Returns an iterator over all vertices in **breadth-first** order, starting at `start`.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: AdjListGraph<char, u32> = AdjListGraph::from_vertices_and_edges(
    ///     GraphConfig::new().undirected(),
    ///     ['a', 'b', 'c', 'd'],
    ///     [(0, 2, 1), (2, 1, 1)],
    /// ).unwrap();
    ///
    /// let order: Vec<_> = g.bfs(0).unwrap().collect();
    /// assert_eq!(order, vec![0, 2, 1, 3]);
    /// ```
    fn bfs(&self, start: Node) -> Result<BFS<'_, Self>> {
        BFS::new(self, start)
    }

    /// Returns an iterator over all vertices in **depth-first** pre-order, starting at `start`.
    fn dfs(&self, start: Node) -> Result<DFS<'_, Self>> {
        DFS::new(self, start)
    }

    /// Calls `visit` on the value of every vertex in breadth-first order
    fn bfs_visit<F>(&self, start: Node, mut visit: F) -> Result<()>
    where
        Self: VertexLookup,
        F: FnMut(&Self::Vertex),
    {
        self.bfs(start)?
            .filter_map(|u| self.vertex(u))
            .for_each(|v| visit(v));
        Ok(())
    }

    /// Calls `visit` on the value of every vertex in depth-first pre-order
    fn dfs_visit<F>(&self, start: Node, mut visit: F) -> Result<()>
    where
        Self: VertexLookup,
        F: FnMut(&Self::Vertex),
    {
        self.dfs(start)?
            .filter_map(|u| self.vertex(u))
            .for_each(|v| visit(v));
        Ok(())
    }
}

impl<G> Traversal for G where G: WeightedAdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::*, repr::*};
    use itertools::Itertools;

    fn two_components<G>() -> G
    where
        G: GraphFromConfig + GraphVertexEditing<Vertex = u8, Weight = u32> + GraphEdgeEditing,
    {
        // 0 - 1 - 3, 1 - 4, 0 - 2    and    5 - 6
        G::from_vertices_and_edges(
            GraphConfig::new().undirected(),
            0..7,
            [(0, 1, 1), (1, 3, 1), (1, 4, 1), (0, 2, 1), (5, 6, 1)],
        )
        .unwrap()
    }

    #[test]
    fn orders_on_both_representations() {
        let list: AdjListGraph<u8, u32> = two_components();
        let matrix: AdjMatrixGraph<u8, u32> = two_components();

        for (bfs, dfs) in [
            (list.bfs(0).unwrap().collect_vec(), list.dfs(0).unwrap().collect_vec()),
            (matrix.bfs(0).unwrap().collect_vec(), matrix.dfs(0).unwrap().collect_vec()),
        ] {
            assert_eq!(bfs, vec![0, 1, 2, 3, 4, 5, 6]);
            assert_eq!(dfs, vec![0, 1, 3, 4, 2, 5, 6]);
        }
    }

    #[test]
    fn wrap_around_scan() {
        let graph: AdjListGraph<u8, u32> = two_components();

        assert_eq!(graph.bfs(6).unwrap().collect_vec(), vec![6, 5, 0, 1, 2, 3, 4]);
        assert_eq!(graph.dfs(3).unwrap().collect_vec(), vec![3, 1, 0, 2, 4, 5, 6]);
        assert_eq!(graph.dfs(3).unwrap().len(), 7);
    }

    #[test]
    fn directed_dfs_matches_recursive_preorder() {
        // 0 -> {2, 1}, 2 -> 1, 1 -> 3, 3 -> 0
        let graph: AdjListGraph<u8, u32> = AdjListGraph::from_vertices_and_edges(
            GraphConfig::new(),
            0..4,
            [(0, 2, 1), (0, 1, 1), (2, 1, 1), (1, 3, 1), (3, 0, 1)],
        )
        .unwrap();

        assert_eq!(graph.dfs(0).unwrap().collect_vec(), vec![0, 1, 3, 2]);
        assert_eq!(graph.dfs(2).unwrap().collect_vec(), vec![2, 1, 3, 0]);
    }

    #[test]
    fn visit_callbacks_and_invalid_start() {
        let graph: AdjMatrixGraph<u8, u32> = two_components();

        let mut values = Vec::new();
        graph.dfs_visit(5, |&v| values.push(v)).unwrap();
        assert_eq!(values, vec![5, 6, 0, 1, 3, 4, 2]);

        assert_eq!(
            graph.bfs_visit(7, |_| {}),
            Err(GraphError::InvalidIndex { index: 7, len: 7 })
        );
    }
}
