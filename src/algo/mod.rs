/*!
# Graph Algorithms

Classical algorithms implemented as traits on every graph of this crate.
All of them are re-exported at the top level of this module, so you can simply do:
```rust
use wgraphs::algo::*;
```
and call e.g. `graph.bfs(start)`, `graph.dijkstra(start)` or `graph.kruskal()`.

Algorithms are single-shot computations over the current state of the graph.
Traversals and topological search are provided as **iterators**.
*/

mod mst;
mod shortest_path;
mod topo;
mod traversal;

use crate::{edge::*, error::*, node::*, ops::*, weight::*};

pub use mst::*;
pub use shortest_path::*;
pub use topo::*;
pub use traversal::*;
