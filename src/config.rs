/*!
# Graph Configuration

Both representations are constructed from a [`GraphConfig`], configured with the usual
*Builder* / *Setter* pattern:

```
use wgraphs::prelude::*;

let graph: AdjMatrixGraph<char, u32> = GraphConfig::new().undirected().capacity(16).build();

assert!(graph.is_undirected());
assert_eq!(graph.capacity(), 16);
```
*/

use crate::{edge::WeightedEdge, error::Result, node::NumNodes, ops::*};

/// Number of vertices a graph is prepared for if nothing else is configured
pub const DEFAULT_CAPACITY: NumNodes = 10;

/// Upper bound on the number of vertex slots reserved up front; larger graphs grow on demand
pub const MAX_PREALLOCATION: NumNodes = 1 << 16;

/// Construction parameters shared by all graph representations.
///
/// By default a graph is directed with a capacity of [`DEFAULT_CAPACITY`] vertices.
/// The capacity is a hard limit for the [`AdjMatrixGraph`](crate::repr::AdjMatrixGraph)
/// and only a preallocation hint for the [`AdjListGraph`](crate::repr::AdjListGraph).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GraphConfig {
    direction: Direction,
    capacity: NumNodes,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            direction: Direction::Directed,
            capacity: DEFAULT_CAPACITY,
        }
    }
}

impl GraphConfig {
    /// Creates a new configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.set_direction(direction);
        self
    }

    /// Shorthand for `direction(Direction::Directed)`
    pub fn directed(self) -> Self {
        self.direction(Direction::Directed)
    }

    /// Shorthand for `direction(Direction::Undirected)`
    pub fn undirected(self) -> Self {
        self.direction(Direction::Undirected)
    }

    /// Sets the number of vertices the graph is prepared for
    pub fn set_capacity(&mut self, capacity: NumNodes) {
        self.capacity = capacity;
    }

    /// Sets the number of vertices the graph is prepared for
    pub fn capacity(mut self, capacity: NumNodes) -> Self {
        self.set_capacity(capacity);
        self
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_capacity(&self) -> NumNodes {
        self.capacity
    }

    /// Number of vertex slots to reserve when a graph is built
    pub fn preallocation(&self) -> usize {
        self.capacity.min(MAX_PREALLOCATION) as usize
    }

    /// Creates an empty graph of the requested representation
    pub fn build<G: GraphFromConfig>(self) -> G {
        G::from_config(self)
    }
}

/// Creates empty graphs from a [`GraphConfig`]
pub trait GraphFromConfig: Sized {
    fn from_config(config: GraphConfig) -> Self;

    /// Creates an empty directed graph with default capacity
    fn new_directed() -> Self {
        Self::from_config(GraphConfig::new().directed())
    }

    /// Creates an empty undirected graph with default capacity
    fn new_undirected() -> Self {
        Self::from_config(GraphConfig::new().undirected())
    }

    /// Creates a graph with the given vertices (indexed in order) and edges.
    /// Fails on the first vertex or edge that cannot be inserted.
    fn from_vertices_and_edges<VI, EI, E>(config: GraphConfig, vertices: VI, edges: EI) -> Result<Self>
    where
        Self: GraphVertexEditing + GraphEdgeEditing,
        VI: IntoIterator<Item = <Self as WeightedGraph>::Vertex>,
        EI: IntoIterator<Item = E>,
        E: Into<WeightedEdge<<Self as WeightedGraph>::Weight>>,
    {
        let mut graph = Self::from_config(config);
        graph.insert_vertices(vertices)?;
        graph.insert_edges(edges)?;
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_and_setters() {
        let config = GraphConfig::new();
        assert_eq!(config.get_direction(), Direction::Directed);
        assert_eq!(config.get_capacity(), DEFAULT_CAPACITY);

        let config = config.undirected().capacity(3);
        assert_eq!(config.get_direction(), Direction::Undirected);
        assert_eq!(config.get_capacity(), 3);

        let mut config = config;
        config.set_direction(Direction::Directed);
        config.set_capacity(7);
        assert_eq!(config, GraphConfig::new().directed().capacity(7));
        assert_eq!(config.preallocation(), 7);
    }

    #[test]
    fn huge_capacity_is_not_reserved() {
        let config = GraphConfig::new().capacity(NumNodes::MAX);
        assert_eq!(config.get_capacity(), NumNodes::MAX);
        assert_eq!(config.preallocation(), MAX_PREALLOCATION as usize);
    }
}
