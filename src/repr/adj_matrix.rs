use tracing::debug;

use super::*;
use crate::testing::test_weighted_graph;

/// A graph storing its edges as the non-zero entries of a `capacity x capacity` [`TripletMatrix`].
///
/// The capacity is fixed at construction; inserting more vertices fails with
/// [`GraphError::CapacityExhausted`]. Entries are kept sorted by `(src, dest)`,
/// so edge lookups are binary searches and neighborhoods are contiguous row slices.
#[derive(Debug, Clone)]
pub struct AdjMatrixGraph<V, W> {
    vertices: VertexValues<V>,
    matrix: TripletMatrix<W>,
    capacity: NumNodes,
    direction: Direction,
}

impl<V: PartialEq, W: Weight> Default for AdjMatrixGraph<V, W> {
    fn default() -> Self {
        Self::from_config(GraphConfig::default())
    }
}

impl<V: PartialEq, W: Weight> GraphFromConfig for AdjMatrixGraph<V, W> {
    fn from_config(config: GraphConfig) -> Self {
        let capacity = config.get_capacity();
        Self {
            vertices: VertexValues::with_capacity(config.preallocation()),
            matrix: TripletMatrix::new(capacity as usize, capacity as usize),
            capacity,
            direction: config.get_direction(),
        }
    }
}

impl<V, W> AdjMatrixGraph<V, W> {
    /// Maximum number of vertices
    pub fn capacity(&self) -> NumNodes {
        self.capacity
    }

    /// The backing sparse matrix; entry `(u, v)` holds the weight of edge `(u, v)`
    pub fn matrix(&self) -> &TripletMatrix<W> {
        &self.matrix
    }
}

impl<V, W> GraphNodeOrder for AdjMatrixGraph<V, W> {
    fn number_of_nodes(&self) -> NumNodes {
        self.vertices.len()
    }
}

impl<V, W> GraphEdgeOrder for AdjMatrixGraph<V, W> {
    fn number_of_edges(&self) -> NumEdges {
        self.matrix.len() as NumEdges
    }
}

impl<V: PartialEq, W: Weight> WeightedGraph for AdjMatrixGraph<V, W> {
    type Vertex = V;
    type Weight = W;

    fn direction(&self) -> Direction {
        self.direction
    }
}

impl<V: PartialEq, W: Weight> VertexLookup for AdjMatrixGraph<V, W> {
    fn vertex(&self, u: Node) -> Option<&V> {
        self.vertices.get(u)
    }

    fn vertex_index(&self, value: &V) -> Option<Node> {
        self.vertices.position(value)
    }
}

impl<V: PartialEq, W: Weight> WeightedAdjacencyList for AdjMatrixGraph<V, W> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, W)> + '_ {
        assert!(u < self.number_of_nodes());
        self.matrix
            .row(u as usize)
            .iter()
            .map(|t| (node_from_usize(t.col), t.value))
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        assert!(u < self.number_of_nodes());
        self.matrix.row(u as usize).len() as NumNodes
    }

    fn edges(&self) -> impl Iterator<Item = WeightedEdge<W>> + '_ {
        self.matrix
            .iter()
            .map(|t| WeightedEdge::new(node_from_usize(t.row), node_from_usize(t.col), t.value))
    }
}

impl<V: PartialEq, W: Weight> WeightedAdjacencyTest for AdjMatrixGraph<V, W> {
    fn edge_weight(&self, u: Node, v: Node) -> Option<W> {
        self.matrix.get(u as usize, v as usize).copied()
    }
}

impl<V: PartialEq, W: Weight> GraphVertexEditing for AdjMatrixGraph<V, W> {
    fn insert_vertex(&mut self, value: V) -> Result<Node> {
        if self.vertices.len() >= self.capacity {
            if let Some(index) = self.vertices.position(&value) {
                return Err(GraphError::DuplicateVertex { index });
            }
            debug!(capacity = self.capacity, "vertex capacity exhausted");
            return Err(GraphError::CapacityExhausted {
                capacity: self.capacity,
            });
        }
        self.vertices.push(value)
    }

    fn remove_vertex(&mut self, value: &V) -> Result<Node> {
        let k = self.vertices.remove(value)?;
        self.matrix.remove_row_and_col(k as usize);
        Ok(k)
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.matrix.clear();
    }
}

impl<V: PartialEq, W: Weight> AdjMatrixGraph<V, W> {
    /// Checks both indices and whether `(u, v)` (and its mirror if undirected) is stored.
    /// Returns whether a mirrored entry has to be maintained as well.
    fn locate_edge(&self, u: Node, v: Node, must_exist: bool) -> Result<bool> {
        check_edge(self, u, v)?;
        let mirrored = self.is_undirected() && u != v;
        let exists = self.matrix.contains(u as usize, v as usize)
            || (mirrored && self.matrix.contains(v as usize, u as usize));

        match (exists, must_exist) {
            (true, false) => Err(GraphError::EdgeExists { src: u, dest: v }),
            (false, true) => Err(GraphError::MissingEdge { src: u, dest: v }),
            _ => Ok(mirrored),
        }
    }
}

impl<V: PartialEq, W: Weight> GraphEdgeEditing for AdjMatrixGraph<V, W> {
    fn insert_edge(&mut self, u: Node, v: Node, weight: W) -> Result<()> {
        let mirrored = self.locate_edge(u, v, false)?;
        self.matrix.insert(u as usize, v as usize, weight)?;
        if mirrored {
            self.matrix.insert(v as usize, u as usize, weight)?;
        }
        Ok(())
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<W> {
        let mirrored = self.locate_edge(u, v, true)?;
        if mirrored {
            self.matrix.remove(v as usize, u as usize);
        }
        self.matrix
            .remove(u as usize, v as usize)
            .ok_or(GraphError::MissingEdge { src: u, dest: v })
    }

    fn set_edge_weight(&mut self, u: Node, v: Node, weight: W) -> Result<W> {
        let mirrored = self.locate_edge(u, v, true)?;
        if mirrored {
            if let Some(w) = self.matrix.get_mut(v as usize, u as usize) {
                *w = weight;
            }
        }
        self.matrix
            .get_mut(u as usize, v as usize)
            .map(|w| std::mem::replace(w, weight))
            .ok_or(GraphError::MissingEdge { src: u, dest: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn huge_capacity_is_not_reserved() {
        let mut graph: AdjMatrixGraph<u32, u32> = GraphConfig::new().capacity(NumNodes::MAX).build();
        assert_eq!(graph.capacity(), NumNodes::MAX);
        graph.insert_vertices(0..3).unwrap();
        graph.insert_edge(2, 1, 4).unwrap();
        assert_eq!(graph.matrix().shape(), (NumNodes::MAX as usize, NumNodes::MAX as usize));
        assert_eq!(graph.edge_weight(2, 1), Some(4));
    }

    #[test]
    fn capacity_is_enforced() {
        let mut graph: AdjMatrixGraph<u32, u32> = GraphConfig::new().capacity(3).build();
        graph.insert_vertices([10, 20, 30]).unwrap();

        assert_eq!(
            graph.insert_vertex(40),
            Err(GraphError::CapacityExhausted { capacity: 3 })
        );
        assert_eq!(
            graph.insert_vertex(20),
            Err(GraphError::DuplicateVertex { index: 1 })
        );

        graph.remove_vertex(&10).unwrap();
        assert_eq!(graph.insert_vertex(40), Ok(2));
    }

    #[test]
    fn matrix_mirrors_undirected_edges() {
        let mut graph: AdjMatrixGraph<char, i64> = GraphConfig::new().undirected().capacity(4).build();
        graph.insert_vertices(['a', 'b', 'c']).unwrap();
        graph.insert_edges([(0, 2, 5), (1, 1, 4)]).unwrap();

        assert_eq!(
            graph.matrix().iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
            vec![(0, 2, 5), (1, 1, 4), (2, 0, 5)]
        );
        assert_eq!(graph.number_of_edges(), 3);

        assert_eq!(graph.set_edge_weight(2, 0, 9), Ok(5));
        assert_eq!(graph.edge_weight(0, 2), Some(9));
        assert_eq!(graph.remove_edge(0, 2), Ok(9));
        assert_eq!(graph.number_of_edges(), 1);
    }

    #[test]
    fn out_of_range_edges_are_rejected() {
        let mut graph: AdjMatrixGraph<char, i64> = GraphConfig::new().capacity(4).build();
        graph.insert_vertices(['a', 'b']).unwrap();

        // within capacity but not an existing vertex
        assert_eq!(
            graph.insert_edge(0, 3, 1),
            Err(GraphError::InvalidIndex { index: 3, len: 2 })
        );
        assert_eq!(graph.edge_weight(0, 3), None);
        assert!(graph.is_singleton());
    }
}

// ---------- Testing ----------

test_weighted_graph!(
    test_adj_matrix_directed,
    AdjMatrixGraph<u32, u64>,
    false,
    (
        VertexEditing,
        EdgeEditing,
        Scenario,
        Traversal,
        ShortestPaths,
        Topological,
        Mst
    )
);

test_weighted_graph!(
    test_adj_matrix_undirected,
    AdjMatrixGraph<u32, u64>,
    true,
    (
        VertexEditing,
        EdgeEditing,
        Scenario,
        Traversal,
        ShortestPaths,
        Mst
    )
);
