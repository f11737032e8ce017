/*!
Topological ordering of directed graphs via Kahn's algorithm.

Vertices of in-degree zero are kept in a FIFO queue, so among the currently available
vertices the one that became available first is emitted first.
*/

use std::collections::VecDeque;

use tracing::debug;

use super::*;

/// Iterator yielding the vertices of a directed graph in topological order.
///
/// On a graph containing a cycle, iteration stops early: vertices on or behind a cycle are never emitted.
pub struct TopoSearch<'a, G> {
    graph: &'a G,
    in_degs: Vec<NumNodes>,
    queue: VecDeque<Node>,
}

impl<'a, G> TopoSearch<'a, G>
where
    G: WeightedAdjacencyList,
{
    /// Computes all in-degrees and seeds the queue with the vertices of in-degree zero.
    /// Fails for undirected graphs.
    pub fn new(graph: &'a G) -> Result<Self> {
        let in_degs = graph.in_degrees()?;
        let queue = in_degs
            .iter()
            .enumerate()
            .filter_map(|(i, &d)| (d == 0).then_some(node_from_usize(i)))
            .collect();

        Ok(Self {
            graph,
            in_degs,
            queue,
        })
    }
}

impl<G> Iterator for TopoSearch<'_, G>
where
    G: WeightedAdjacencyList,
{
    type Item = Node;

    fn next(&mut self) -> Option<Self::Item> {
        let u = self.queue.pop_front()?;

        for (v, _) in self.graph.neighbors_of(u) {
            let d = &mut self.in_degs[v as usize];
            *d -= 1;
            if *d == 0 {
                self.queue.push_back(v);
            }
        }

        Some(u)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.queue.len(), Some(self.graph.len()))
    }
}

/// Provides topological sorting directly on directed graphs
pub trait TopologicalSort: WeightedAdjacencyList {
    /// Returns a lazy topological search. Fails for undirected graphs.
    fn topo_search(&self) -> Result<TopoSearch<'_, Self>> {
        TopoSearch::new(self)
    }

    /// Returns all vertices such that for every edge `(u, v)`, `u` comes before `v`.
    ///
    /// Fails for undirected graphs and with [`GraphError::CycleDetected`] if the graph has a cycle;
    /// the partial order computed until then is discarded.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: AdjMatrixGraph<&str, u8> = AdjMatrixGraph::from_vertices_and_edges(
    ///     GraphConfig::new(),
    ///     ["shirt", "tie", "jacket"],
    ///     [(1, 2, 1), (0, 1, 1)],
    /// ).unwrap();
    ///
    /// assert_eq!(g.topological_sort().unwrap(), vec![0, 1, 2]);
    /// ```
    fn topological_sort(&self) -> Result<Vec<Node>> {
        let order: Vec<Node> = self.topo_search()?.collect();
        if order.len() < self.len() {
            debug!(
                emitted = order.len(),
                total = self.len(),
                "topological sort stopped at a cycle"
            );
            return Err(GraphError::CycleDetected {
                emitted: node_from_usize(order.len()),
                total: self.number_of_nodes(),
            });
        }
        Ok(order)
    }

    /// Same as [`TopologicalSort::topological_sort`] but returns the vertex values
    fn topological_values(&self) -> Result<Vec<&Self::Vertex>>
    where
        Self: VertexLookup,
    {
        Ok(self.values_of(self.topological_sort()?))
    }

    /// Returns *true* if the directed graph has no cycle. Fails for undirected graphs.
    fn is_acyclic(&self) -> Result<bool> {
        Ok(self.topo_search()?.count() == self.len())
    }
}

impl<G> TopologicalSort for G where G: WeightedAdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::*, repr::*};

    #[test]
    fn kahn_uses_fifo_order() {
        // 0 -> 2, 1 -> 2, 2 -> 3, 0 -> 4
        let graph: AdjListGraph<u8, u32> = AdjListGraph::from_vertices_and_edges(
            GraphConfig::new(),
            0..5,
            [(0, 2, 1), (1, 2, 1), (2, 3, 1), (0, 4, 1)],
        )
        .unwrap();

        assert_eq!(graph.topological_sort().unwrap(), vec![0, 1, 4, 2, 3]);
        assert!(graph.is_acyclic().unwrap());
    }

    #[test]
    fn cycle_and_undirected_fail() {
        let mut graph: AdjMatrixGraph<char, u32> = AdjMatrixGraph::from_vertices_and_edges(
            GraphConfig::new(),
            ['a', 'b', 'c', 'd'],
            [(0, 1, 1), (1, 2, 1), (2, 1, 1), (2, 3, 1)],
        )
        .unwrap();

        assert_eq!(
            graph.topological_sort(),
            Err(GraphError::CycleDetected {
                emitted: 1,
                total: 4
            })
        );
        assert!(!graph.is_acyclic().unwrap());

        graph.remove_edge(2, 1).unwrap();
        assert_eq!(
            graph.topological_values().unwrap(),
            vec![&'a', &'b', &'c', &'d']
        );

        let undirected: AdjListGraph<char, u32> = GraphFromConfig::new_undirected();
        assert_eq!(
            undirected.topological_sort(),
            Err(GraphError::UnsupportedForUndirected)
        );
    }
}
