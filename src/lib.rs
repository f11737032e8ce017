/*!
`wgraphs` is a graph data structure & algorithms library for graphs that are
- **labelled** : every vertex carries a user-supplied value `V`, found by equality,
- **weighted** : every edge carries a weight `W` (any [`Weight`](crate::weight::Weight): integers, floats, ...),
- **directed or undirected** : chosen at runtime via [`GraphConfig`](crate::config::GraphConfig).

# Representation

Vertices are addressed by a dense index `Node = u32` in the range `0..n`; removing a vertex shifts all
higher indices down by one. For **edges**, we use [`WeightedEdge`](crate::edge::WeightedEdge).

An undirected edge `{u, v}` is stored as the two directed entries `(u, v)` and `(v, u)`, both of which
count towards `number_of_edges`. Undirected self-loops are stored once.

### Available Representations

See the [`repr`] module:

- [`AdjListGraph`](crate::repr::AdjListGraph): a sorted neighbor list per vertex, growing on demand,
- [`AdjMatrixGraph`](crate::repr::AdjMatrixGraph): a fixed-capacity graph on top of the sparse
  [`TripletMatrix`](crate::matrix::TripletMatrix).

# Usage

There are *4* core submodules you probably want to interact with:
- [`prelude`] includes definitions for nodes, edges, errors, configuration, basic graph operations and both representations,
- [`algo`] includes algorithm traits implemented on the graphs itself: BFS/DFS (`graph.bfs(start)`), topological sorting,
  Dijkstra, Floyd, Prim and Kruskal,
- [`matrix`] includes the sparse [`TripletMatrix`](crate::matrix::TripletMatrix) with transposition, addition and multiplication,
- [`utils`] includes the union-find forest and the binary-heap priority queue used by the algorithms.

In most use-cases, `use wgraphs::{prelude::*, algo::*};` suffices for your needs.

```
use wgraphs::{prelude::*, algo::*};

let mut graph: AdjListGraph<&str, u32> = GraphConfig::new().undirected().build();
graph.insert_vertices(["A", "B", "C"]).unwrap();
graph.insert_edge(0, 1, 4).unwrap();
graph.insert_edge(1, 2, 1).unwrap();

assert_eq!(graph.number_of_edges(), 4);
assert_eq!(graph.dijkstra(0).unwrap(), vec![Some(0), Some(4), Some(5)]);
assert_eq!(graph.kruskal().unwrap().sum_of_values(), 5);
```

# Errors and Logging

Every fallible operation returns a [`Result`](crate::error::Result) with a [`GraphError`](crate::error::GraphError);
a failed call leaves the graph unchanged. Algorithms emit `tracing` events on `debug`/`trace` level;
no subscriber is installed by the library.
*/

pub mod algo;
pub mod config;
pub mod edge;
pub mod error;
pub mod matrix;
pub mod node;
pub mod ops;
pub mod repr;
pub(crate) mod testing;
pub mod utils;
pub mod weight;

/// `wgraphs::prelude` includes definitions for nodes, edges and errors, the configuration, all basic graph operation traits as well as both representations.
pub mod prelude {
    pub use super::{
        config::*,
        edge::*,
        error::{GraphError, MatrixError, Result},
        matrix::*,
        node::*,
        ops::*,
        repr::*,
        weight::Weight,
    };
}
