use std::ops::Range;

use itertools::Itertools;
use stream_bitset::prelude::*;

use crate::{edge::*, error::*, node::*, weight::Weight};

/// Whether edges have an orientation
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// `(u, v)` and `(v, u)` are distinct edges
    #[default]
    Directed,
    /// `(u, v)` is stored as two entries `(u, v)` and `(v, u)`
    Undirected,
}

/// Provides getters pertaining to the node-size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns the range of all vertex indices.
    /// The range does not borrow `self` and can be used while mutating the graph.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns *true* if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns empty bitset with one entry per node
    fn vertex_bitset_unset(&self) -> NodeBitSet {
        NodeBitSet::new(self.number_of_nodes())
    }

    /// Returns `Ok(())` if `u` is a valid vertex index
    fn check_node(&self, u: Node) -> Result<()> {
        if u < self.number_of_nodes() {
            Ok(())
        } else {
            Err(GraphError::InvalidIndex {
                index: u,
                len: self.number_of_nodes(),
            })
        }
    }
}

/// Provides getters pertaining to the edge-size of a graph
pub trait GraphEdgeOrder {
    /// Returns the number of stored edge entries.
    /// An undirected edge between distinct endpoints counts twice.
    fn number_of_edges(&self) -> NumEdges;

    /// Returns *true* if the graph has no edges
    fn is_singleton(&self) -> bool {
        self.number_of_edges() == 0
    }
}

/// A graph with labelled vertices and weighted edges
pub trait WeightedGraph: GraphNodeOrder + GraphEdgeOrder {
    /// User-supplied vertex value
    type Vertex: PartialEq;

    /// Edge weight
    type Weight: Weight;

    fn direction(&self) -> Direction;

    fn is_directed(&self) -> bool {
        self.direction() == Direction::Directed
    }

    fn is_undirected(&self) -> bool {
        self.direction() == Direction::Undirected
    }
}

/// Mapping between vertex indices and vertex values
pub trait VertexLookup: WeightedGraph {
    /// Returns the value of vertex `u` or `None` if `u >= n`
    fn vertex(&self, u: Node) -> Option<&Self::Vertex>;

    /// Returns the index of the vertex equal to `value`
    fn vertex_index(&self, value: &Self::Vertex) -> Option<Node>;

    /// Returns *true* if a vertex equal to `value` exists
    fn contains_vertex(&self, value: &Self::Vertex) -> bool {
        self.vertex_index(value).is_some()
    }

    /// Iterates over all vertex values in index order
    fn vertex_values(&self) -> impl Iterator<Item = &Self::Vertex> + '_ {
        self.vertices().filter_map(|u| self.vertex(u))
    }

    /// Maps a sequence of indices to their vertex values, skipping invalid indices
    fn values_of<I>(&self, nodes: I) -> Vec<&Self::Vertex>
    where
        I: IntoIterator<Item = Node>,
    {
        nodes.into_iter().filter_map(|u| self.vertex(u)).collect()
    }
}

/// Traits pertaining getters for weighted neighborhoods & edges
pub trait WeightedAdjacencyList: WeightedGraph + Sized {
    /// Returns an iterator over `(neighbor, weight)` of the out-neighborhood of `u`
    /// in ascending order of neighbors.
    /// ** Panics if `u >= n` **
    fn neighbors_of(&self, u: Node) -> impl Iterator<Item = (Node, Self::Weight)> + '_;

    /// Returns the number of (outgoing) entries of `u`
    /// ** Panics if `u >= n` **
    fn degree_of(&self, u: Node) -> NumNodes {
        self.neighbors_of(u).count() as NumNodes
    }

    /// Returns an iterator over all stored edge entries of `u`
    /// ** Panics if `u >= n` **
    fn edges_of(&self, u: Node) -> impl Iterator<Item = WeightedEdge<Self::Weight>> + '_ {
        self.neighbors_of(u)
            .map(move |(v, w)| WeightedEdge::new(u, v, w))
    }

    /// Returns an iterator over all stored edge entries ordered by `(src, dest)`.
    /// Undirected edges appear in both directions (self-loops once).
    fn edges(&self) -> impl Iterator<Item = WeightedEdge<Self::Weight>> + '_ {
        self.vertices().flat_map(|u| self.edges_of(u))
    }

    /// Returns every undirected edge once as `src <= dest`; for directed graphs equivalent to `edges`
    fn normalized_edges(&self) -> impl Iterator<Item = WeightedEdge<Self::Weight>> + '_ {
        let undirected = self.is_undirected();
        self.edges().filter(move |e| !undirected || e.is_normalized())
    }

    /// Returns a vector of all out-degrees
    fn degrees(&self) -> Vec<NumNodes> {
        self.vertices().map(|u| self.degree_of(u)).collect_vec()
    }
}

/// Point queries on edges
pub trait WeightedAdjacencyTest: WeightedGraph {
    /// Returns the weight of edge `(u, v)` or `None` if it does not exist or an index is invalid
    fn edge_weight(&self, u: Node, v: Node) -> Option<Self::Weight>;

    /// Returns *true* if the edge `(u, v)` exists
    fn has_edge(&self, u: Node, v: Node) -> bool {
        self.edge_weight(u, v).is_some()
    }

    /// Returns *true* if the self-loop `(u, u)` exists
    fn has_self_loop(&self, u: Node) -> bool {
        self.has_edge(u, u)
    }
}

/// Degree queries for directed graphs
pub trait Degrees: WeightedAdjacencyList {
    /// Returns the number of edges leaving `u`.
    /// Fails for undirected graphs and invalid indices.
    fn out_degree(&self, u: Node) -> Result<NumNodes> {
        if self.is_undirected() {
            return Err(GraphError::UnsupportedForUndirected);
        }
        self.check_node(u)?;
        Ok(self.degree_of(u))
    }

    /// Returns the number of edges entering `u`.
    /// Fails for undirected graphs and invalid indices.
    fn in_degree(&self, u: Node) -> Result<NumNodes> {
        if self.is_undirected() {
            return Err(GraphError::UnsupportedForUndirected);
        }
        self.check_node(u)?;
        Ok(self.edges().filter(|e| e.dest == u).count() as NumNodes)
    }

    /// Returns the in-degrees of all vertices (directed graphs only)
    fn in_degrees(&self) -> Result<Vec<NumNodes>> {
        if self.is_undirected() {
            return Err(GraphError::UnsupportedForUndirected);
        }
        let mut in_degs = vec![0; self.len()];
        for e in self.edges() {
            in_degs[e.dest as usize] += 1;
        }
        Ok(in_degs)
    }
}

impl<G> Degrees for G where G: WeightedAdjacencyList {}

/// Adding and removing labelled vertices
pub trait GraphVertexEditing: WeightedGraph {
    /// Appends a vertex with value `value` at index `n` and returns the index.
    /// Fails if an equal vertex exists or the representation is full.
    fn insert_vertex(&mut self, value: Self::Vertex) -> Result<Node>;

    /// Removes the vertex equal to `value` together with all incident edges and returns its former index.
    /// All indices above the removed one shift down by one.
    fn remove_vertex(&mut self, value: &Self::Vertex) -> Result<Node>;

    /// Removes all vertices and edges
    fn clear(&mut self);

    /// Inserts all vertices of `values` in order, stopping at the first failure
    fn insert_vertices<I>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = Self::Vertex>,
    {
        for value in values {
            self.insert_vertex(value)?;
        }
        Ok(())
    }
}

/// Adding, removing and reweighting edges.
/// For undirected graphs every operation acts on both directions or on none.
pub trait GraphEdgeEditing: WeightedGraph {
    /// Inserts the edge `(u, v)` with weight `weight`.
    /// Fails on invalid indices and if the edge already exists.
    fn insert_edge(&mut self, u: Node, v: Node, weight: Self::Weight) -> Result<()>;

    /// Removes the edge `(u, v)` and returns its weight.
    /// Fails on invalid indices and if the edge does not exist.
    fn remove_edge(&mut self, u: Node, v: Node) -> Result<Self::Weight>;

    /// Replaces the weight of the existing edge `(u, v)` and returns the previous weight.
    /// Fails on invalid indices and if the edge does not exist.
    fn set_edge_weight(&mut self, u: Node, v: Node, weight: Self::Weight) -> Result<Self::Weight>;

    /// Inserts all edges, stopping at the first failure
    fn insert_edges<I, E>(&mut self, edges: I) -> Result<()>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge<Self::Weight>>,
    {
        for e in edges {
            let e = e.into();
            self.insert_edge(e.src, e.dest, e.weight)?;
        }
        Ok(())
    }

    /// Inserts the edge `(u, v)` unless it exists. Returns *true* if it was inserted.
    fn try_insert_edge(&mut self, u: Node, v: Node, weight: Self::Weight) -> Result<bool> {
        match self.insert_edge(u, v, weight) {
            Ok(()) => Ok(true),
            Err(GraphError::EdgeExists { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Returns `Ok(())` if both endpoints are valid vertex indices
pub(crate) fn check_edge<G: GraphNodeOrder + ?Sized>(graph: &G, u: Node, v: Node) -> Result<()> {
    graph.check_node(u)?;
    graph.check_node(v)
}

