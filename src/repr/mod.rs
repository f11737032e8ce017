/*!
# Graph Representations

Two interchangeable storage backends for labelled, weighted graphs:

- [`AdjListGraph`] keeps a sorted `(neighbor, weight)` list per vertex and grows on demand,
- [`AdjMatrixGraph`] keeps all edges in a fixed-capacity sparse [`TripletMatrix`].

Both implement the same set of traits from [`ops`](crate::ops), so every algorithm of
[`algo`](crate::algo) runs on either of them. Vertex values are stored next to the dense
indices in a [`VertexValues`] store.
*/

mod adj_list;
mod adj_matrix;
mod vertices;

use crate::{config::*, edge::*, error::*, matrix::*, node::*, ops::*, weight::Weight};

pub use adj_list::AdjListGraph;
pub use adj_matrix::AdjMatrixGraph;
pub use vertices::VertexValues;
