use smallvec::SmallVec;
use tracing::trace;

use super::*;
use crate::testing::test_weighted_graph;

/// Out-neighborhood of a single vertex: `(neighbor, weight)` sorted by neighbor
type Neighborhood<W> = SmallVec<[(Node, W); 8]>;

#[inline]
fn search<W>(neighborhood: &Neighborhood<W>, v: Node) -> std::result::Result<usize, usize> {
    neighborhood.binary_search_by_key(&v, |&(x, _)| x)
}

/// A graph storing an explicit neighbor list per vertex.
///
/// The vertex storage grows on demand, so insertions of vertices never fail for capacity reasons.
/// Edge lookups take `O(log deg)`, removing a vertex takes `O(n + m)`.
#[derive(Debug, Clone)]
pub struct AdjListGraph<V, W> {
    vertices: VertexValues<V>,
    adjacency: Vec<Neighborhood<W>>,
    number_of_edges: NumEdges,
    direction: Direction,
}

impl<V: PartialEq, W: Weight> Default for AdjListGraph<V, W> {
    fn default() -> Self {
        Self::from_config(GraphConfig::default())
    }
}

impl<V: PartialEq, W: Weight> GraphFromConfig for AdjListGraph<V, W> {
    fn from_config(config: GraphConfig) -> Self {
        let reserved = config.preallocation();
        Self {
            vertices: VertexValues::with_capacity(reserved),
            adjacency: Vec::with_capacity(reserved),
            number_of_edges: 0,
            direction: config.get_direction(),
        }
    }
}

impl<V, W> GraphNodeOrder for AdjListGraph<V, W> {
    fn number_of_nodes(&self) -> NumNodes {
        node_from_usize(self.adjacency.len())
    }
}

impl<V, W> GraphEdgeOrder for AdjListGraph<V, W> {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl<V: PartialEq, W: Weight> WeightedGraph for AdjListGraph<V, W> {
    type Vertex = V;
    type Weight = W;

    fn direction(&self) -> Direction {
        self.direction
    }
}

impl<V: PartialEq, W: Weight> VertexLookup for AdjListGraph<V, W> {
    fn vertex(&self, u: Node) -> Option<&V> {
        self.vertices.get(u)
    }

    fn vertex_index(&self, value: &V) -> Option<Node> {
        self.vertices.position(value)
    }
}

impl<V: PartialEq, W: Weight> WeightedAdjacencyList for AdjListGraph<V, W> {
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, W)> + '_ {
        self.adjacency[u as usize].iter().copied()
    }

    fn degree_of(&self, u: Node) -> NumNodes {
        self.adjacency[u as usize].len() as NumNodes
    }
}

impl<V: PartialEq, W: Weight> WeightedAdjacencyTest for AdjListGraph<V, W> {
    fn edge_weight(&self, u: Node, v: Node) -> Option<W> {
        let neighborhood = self.adjacency.get(u as usize)?;
        let pos = search(neighborhood, v).ok()?;
        Some(neighborhood[pos].1)
    }
}

impl<V: PartialEq, W: Weight> GraphVertexEditing for AdjListGraph<V, W> {
    fn insert_vertex(&mut self, value: V) -> Result<Node> {
        let u = self.vertices.push(value)?;
        self.adjacency.push(Neighborhood::new());
        debug_assert_eq!(self.vertices.len(), self.number_of_nodes());
        Ok(u)
    }

    fn remove_vertex(&mut self, value: &V) -> Result<Node> {
        let k = self.vertices.remove(value)?;

        // own list holds all entries (k, *), including a self-loop
        let mut removed = self.adjacency.remove(k as usize).len() as NumEdges;
        for neighborhood in &mut self.adjacency {
            let before = neighborhood.len();
            neighborhood.retain(|(v, _)| *v != k);
            removed += (before - neighborhood.len()) as NumEdges;

            for (v, _) in neighborhood.iter_mut() {
                if *v > k {
                    *v -= 1;
                }
            }
        }
        self.number_of_edges -= removed;

        trace!(index = k, removed_edges = removed, "removed vertex");
        Ok(k)
    }

    fn clear(&mut self) {
        self.vertices.clear();
        self.adjacency.clear();
        self.number_of_edges = 0;
    }
}

impl<V, W: Copy> AdjListGraph<V, W> {
    /// Stores the entry `(u, v)` or overwrites its weight; returns the previous weight
    fn put_entry(&mut self, u: Node, v: Node, weight: W) -> Option<W> {
        let neighborhood = &mut self.adjacency[u as usize];
        match search(neighborhood, v) {
            Ok(pos) => Some(std::mem::replace(&mut neighborhood[pos].1, weight)),
            Err(pos) => {
                neighborhood.insert(pos, (v, weight));
                self.number_of_edges += 1;
                None
            }
        }
    }

    /// Removes the entry `(u, v)` and returns its weight
    fn take_entry(&mut self, u: Node, v: Node) -> Option<W> {
        let neighborhood = &mut self.adjacency[u as usize];
        let pos = search(neighborhood, v).ok()?;
        self.number_of_edges -= 1;
        Some(neighborhood.remove(pos).1)
    }
}

impl<V: PartialEq, W: Weight> AdjListGraph<V, W> {
    /// Checks both indices and whether `(u, v)` (and its mirror if undirected) is stored.
    /// Returns whether a mirrored entry has to be maintained as well.
    fn locate_edge(&self, u: Node, v: Node, must_exist: bool) -> Result<bool> {
        check_edge(self, u, v)?;
        let mirrored = self.is_undirected() && u != v;
        let exists = self.has_edge(u, v) || (mirrored && self.has_edge(v, u));

        match (exists, must_exist) {
            (true, false) => Err(GraphError::EdgeExists { src: u, dest: v }),
            (false, true) => Err(GraphError::MissingEdge { src: u, dest: v }),
            _ => Ok(mirrored),
        }
    }
}

impl<V: PartialEq, W: Weight> GraphEdgeEditing for AdjListGraph<V, W> {
    fn insert_edge(&mut self, u: Node, v: Node, weight: W) -> Result<()> {
        let mirrored = self.locate_edge(u, v, false)?;
        self.put_entry(u, v, weight);
        if mirrored {
            self.put_entry(v, u, weight);
        }
        Ok(())
    }

    fn remove_edge(&mut self, u: Node, v: Node) -> Result<W> {
        let mirrored = self.locate_edge(u, v, true)?;
        if mirrored {
            self.take_entry(v, u);
        }
        self.take_entry(u, v)
            .ok_or(GraphError::MissingEdge { src: u, dest: v })
    }

    fn set_edge_weight(&mut self, u: Node, v: Node, weight: W) -> Result<W> {
        let mirrored = self.locate_edge(u, v, true)?;
        if mirrored {
            self.put_entry(v, u, weight);
        }
        self.put_entry(u, v, weight)
            .ok_or(GraphError::MissingEdge { src: u, dest: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn neighborhoods_stay_sorted() {
        let mut graph: AdjListGraph<u8, u32> = GraphFromConfig::new_directed();
        graph.insert_vertices(0..5).unwrap();
        graph
            .insert_edges([(0, 4, 1), (0, 1, 2), (0, 3, 3), (0, 2, 4)])
            .unwrap();

        assert_eq!(
            graph.neighbors_of(0).collect_vec(),
            vec![(1, 2), (2, 4), (3, 3), (4, 1)]
        );
        assert_eq!(graph.degree_of(0), 4);
        assert_eq!(graph.number_of_edges(), 4);
    }

    #[test]
    fn capacity_is_only_a_hint() {
        let mut graph: AdjListGraph<u32, u32> = GraphConfig::new().capacity(NumNodes::MAX).build();
        graph.insert_vertices(0..3).unwrap();
        graph.insert_edge(0, 2, 5).unwrap();
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.edge_weight(0, 2), Some(5));

        let mut graph: AdjListGraph<u32, u32> = GraphConfig::new().capacity(1).build();
        graph.insert_vertices(0..20).unwrap();
        assert_eq!(graph.number_of_nodes(), 20);
    }

    #[test]
    fn undirected_self_loop_is_stored_once() {
        let mut graph: AdjListGraph<char, i32> = GraphFromConfig::new_undirected();
        graph.insert_vertices(['a', 'b']).unwrap();

        graph.insert_edge(1, 1, 7).unwrap();
        assert_eq!(graph.number_of_edges(), 1);
        assert_eq!(graph.set_edge_weight(1, 1, 3), Ok(7));
        assert_eq!(graph.neighbors_of(1).collect_vec(), vec![(1, 3)]);

        assert_eq!(graph.remove_edge(1, 1), Ok(3));
        assert!(graph.is_singleton());
    }

    #[test]
    fn remove_vertex_rewrites_endpoints() {
        let mut graph: AdjListGraph<&str, u32> = GraphFromConfig::new_directed();
        graph.insert_vertices(["a", "b", "c", "d"]).unwrap();
        graph
            .insert_edges([(0, 1, 1), (1, 2, 2), (2, 3, 3), (3, 1, 4), (3, 0, 5), (1, 1, 6)])
            .unwrap();

        assert_eq!(graph.remove_vertex(&"b"), Ok(1));
        assert_eq!(graph.number_of_nodes(), 3);
        assert_eq!(graph.number_of_edges(), 2);
        assert_eq!(graph.vertex_index(&"d"), Some(2));
        assert_eq!(
            graph.edges().map(|e| (e.src, e.dest, e.weight)).collect_vec(),
            vec![(1, 2, 3), (2, 0, 5)]
        );
    }
}

// ---------- Testing ----------

test_weighted_graph!(
    test_adj_list_directed,
    AdjListGraph<u32, u64>,
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
    test_adj_list_undirected,
    AdjListGraph<u32, u64>,
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
