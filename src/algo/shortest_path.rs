/*!
Shortest paths on graphs with non-negative edge weights.

- [`ShortestPaths::dijkstra`] computes single-source distances with the dense `O(n^2)` selection
  (no heap), which is optimal for the dense graphs the matrix representation targets.
- [`ShortestPaths::floyd`] computes all-pairs distances together with a predecessor table in `O(n^3)`.

Unreachable vertices have distance `None`. Negative weights are accepted but the results are
unspecified; negative cycles are not detected.
*/

use num::Zero;
use stream_bitset::prelude::*;
use tracing::{debug, trace};

use super::*;
use crate::weight::improves;

/// Dense label-setting search shared by Dijkstra and Prim.
///
/// Starting from `start`, repeatedly settles the unsettled vertex of smallest key and offers
/// `relax(key_u, weight)` to each unsettled neighbor. Returns keys and predecessors.
/// Stops as soon as no reachable unsettled vertex remains.
pub(crate) fn settle_from<G, F>(
    graph: &G,
    start: Node,
    relax: F,
) -> (Vec<Option<G::Weight>>, Vec<Option<Node>>)
where
    G: WeightedAdjacencyList,
    F: Fn(G::Weight, G::Weight) -> G::Weight,
{
    let n = graph.len();
    let mut keys: Vec<Option<G::Weight>> = vec![None; n];
    let mut predecessors: Vec<Option<Node>> = vec![None; n];
    let mut settled = graph.vertex_bitset_unset();
    keys[start as usize] = Some(G::Weight::zero());

    loop {
        let best = graph
            .vertices()
            .filter(|&u| !settled.get_bit(u))
            .filter_map(|u| keys[u as usize].map(|k| (u, k)))
            .reduce(|best, next| if next.1.is_less(&best.1) { next } else { best });

        let Some((u, key_u)) = best else {
            break;
        };
        settled.set_bit(u);

        for (v, w) in graph.neighbors_of(u) {
            if settled.get_bit(v) {
                continue;
            }
            let candidate = relax(key_u, w);
            if improves(candidate, keys[v as usize]) {
                keys[v as usize] = Some(candidate);
                predecessors[v as usize] = Some(u);
            }
        }
    }

    trace!(start, settled = settled.cardinality(), "label-setting search done");
    (keys, predecessors)
}

/// Result of a single-source shortest path computation
#[derive(Debug, Clone, PartialEq)]
pub struct ShortestPathTree<W> {
    source: Node,
    distances: Vec<Option<W>>,
    predecessors: Vec<Option<Node>>,
}

impl<W: Weight> ShortestPathTree<W> {
    pub fn source(&self) -> Node {
        self.source
    }

    /// Distance from the source to `v`; `None` if unreachable or out of range
    pub fn distance(&self, v: Node) -> Option<W> {
        self.distances.get(v as usize).copied().flatten()
    }

    /// All distances indexed by vertex
    pub fn distances(&self) -> &[Option<W>] {
        &self.distances
    }

    /// Vertex preceding `v` on a shortest path from the source
    pub fn predecessor(&self, v: Node) -> Option<Node> {
        self.predecessors.get(v as usize).copied().flatten()
    }

    /// Vertices of a shortest path from the source to `v` (both included)
    pub fn path_to(&self, v: Node) -> Option<Vec<Node>> {
        self.distance(v)?;
        let mut path = vec![v];
        let mut u = v;
        while u != self.source {
            u = self.predecessor(u)?;
            path.push(u);
        }
        path.reverse();
        Some(path)
    }

    pub fn into_distances(self) -> Vec<Option<W>> {
        self.distances
    }
}

/// Result of [`ShortestPaths::floyd`]: an `n x n` distance table and predecessor table
#[derive(Debug, Clone, PartialEq)]
pub struct AllPairsShortestPaths<W> {
    n: NumNodes,
    distances: Vec<Option<W>>,
    predecessors: Vec<Option<OptionalNode>>,
}

impl<W: Weight> AllPairsShortestPaths<W> {
    #[inline]
    fn index(&self, u: Node, v: Node) -> Option<usize> {
        (u < self.n && v < self.n).then(|| u as usize * self.n as usize + v as usize)
    }

    /// Number of vertices of the underlying graph
    pub fn number_of_nodes(&self) -> NumNodes {
        self.n
    }

    /// Length of a shortest `u`-`v`-path; `None` if there is none or an index is invalid
    pub fn distance(&self, u: Node, v: Node) -> Option<W> {
        self.distances[self.index(u, v)?]
    }

    /// Vertex preceding `v` on a shortest path from `u`
    pub fn predecessor(&self, u: Node, v: Node) -> Option<Node> {
        self.predecessors[self.index(u, v)?].map(|p| p.get())
    }

    /// Distances from `u` to all vertices; empty if `u` is invalid
    pub fn distances_from(&self, u: Node) -> &[Option<W>] {
        match self.index(u, 0) {
            Some(begin) => &self.distances[begin..begin + self.n as usize],
            None => &[],
        }
    }

    /// Vertices of a shortest `u`-`v`-path (both included), reconstructed from the predecessor table.
    /// Returns `None` if `v` is unreachable from `u`.
    pub fn path(&self, u: Node, v: Node) -> Option<Vec<Node>> {
        self.distance(u, v)?;

        let mut path = vec![v];
        let mut current = v;
        while current != u {
            current = self.predecessor(u, current)?;
            path.push(current);
            // only possible with negative cycles
            if path.len() > self.n as usize {
                return None;
            }
        }
        path.reverse();
        Some(path)
    }
}

/// Provides shortest path algorithms directly on graphs
pub trait ShortestPaths: WeightedAdjacencyList {
    /// Computes the shortest path tree from `start` in `O(n^2 + m)`.
    /// Fails if `start` is not a vertex.
    fn dijkstra_tree(&self, start: Node) -> Result<ShortestPathTree<Self::Weight>> {
        self.check_node(start)?;
        debug!(start, nodes = self.number_of_nodes(), "dijkstra");

        let (distances, predecessors) = settle_from(self, start, |d, w| d + w);
        Ok(ShortestPathTree {
            source: start,
            distances,
            predecessors,
        })
    }

    /// Returns the distance from `start` to every vertex (`None` if unreachable).
    /// Fails if `start` is not a vertex.
    ///
    /// # Examples
    /// ```
    /// use wgraphs::{prelude::*, algo::*};
    ///
    /// let g: AdjListGraph<u8, u32> = AdjListGraph::from_vertices_and_edges(
    ///     GraphConfig::new(),
    ///     0..4,
    ///     [(0, 1, 4), (0, 2, 1), (2, 1, 2)],
    /// ).unwrap();
    ///
    /// assert_eq!(g.dijkstra(0).unwrap(), vec![Some(0), Some(3), Some(1), None]);
    /// ```
    fn dijkstra(&self, start: Node) -> Result<Vec<Option<Self::Weight>>> {
        Ok(self.dijkstra_tree(start)?.into_distances())
    }

    /// Computes all-pairs shortest paths in `O(n^3)`
    fn floyd(&self) -> AllPairsShortestPaths<Self::Weight> {
        let n = self.number_of_nodes();
        let nu = n as usize;
        debug!(nodes = n, "floyd");

        let mut distances: Vec<Option<Self::Weight>> = vec![None; nu * nu];
        let mut predecessors: Vec<Option<OptionalNode>> = vec![None; nu * nu];
        for e in self.edges() {
            let idx = e.src as usize * nu + e.dest as usize;
            distances[idx] = Some(e.weight);
            predecessors[idx] = OptionalNode::new(e.src);
        }
        // self-loops never shorten the empty path
        for i in 0..nu {
            distances[i * nu + i] = Some(Self::Weight::zero());
            predecessors[i * nu + i] = None;
        }

        for k in 0..nu {
            for i in 0..nu {
                let Some(d_ik) = distances[i * nu + k] else {
                    continue;
                };
                for j in 0..nu {
                    let Some(d_kj) = distances[k * nu + j] else {
                        continue;
                    };
                    let candidate = d_ik + d_kj;
                    if improves(candidate, distances[i * nu + j]) {
                        distances[i * nu + j] = Some(candidate);
                        predecessors[i * nu + j] = predecessors[k * nu + j];
                    }
                }
            }
        }

        AllPairsShortestPaths {
            n,
            distances,
            predecessors,
        }
    }
}

impl<G> ShortestPaths for G where G: WeightedAdjacencyList {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::*, repr::*};

    fn sample() -> AdjMatrixGraph<char, u32> {
        //      1       1
        //   a ---> b ---> c
        //   |             ^
        //   +------5------+      d isolated
        AdjMatrixGraph::from_vertices_and_edges(
            GraphConfig::new(),
            ['a', 'b', 'c', 'd'],
            [(0, 1, 1), (1, 2, 1), (0, 2, 5)],
        )
        .unwrap()
    }

    #[test]
    fn dijkstra_tree_paths() {
        let graph = sample();
        let tree = graph.dijkstra_tree(0).unwrap();

        assert_eq!(tree.distances(), &[Some(0), Some(1), Some(2), None]);
        assert_eq!(tree.path_to(2), Some(vec![0, 1, 2]));
        assert_eq!(tree.path_to(0), Some(vec![0]));
        assert_eq!(tree.path_to(3), None);

        assert_eq!(
            graph.dijkstra(4),
            Err(GraphError::InvalidIndex { index: 4, len: 4 })
        );
    }

    #[test]
    fn floyd_paths() {
        let graph = sample();
        let apsp = graph.floyd();

        assert_eq!(apsp.distance(0, 2), Some(2));
        assert_eq!(apsp.distance(2, 0), None);
        assert_eq!(apsp.distance(3, 3), Some(0));
        assert_eq!(apsp.predecessor(0, 2), Some(1));
        assert_eq!(apsp.predecessor(1, 1), None);
        assert_eq!(apsp.path(0, 2), Some(vec![0, 1, 2]));
        assert_eq!(apsp.path(1, 1), Some(vec![1]));
        assert_eq!(apsp.path(2, 1), None);
        assert_eq!(apsp.distances_from(1), &[None, Some(0), Some(1), None]);
        assert!(apsp.distances_from(9).is_empty());
    }

    #[test]
    fn float_weights() {
        let graph: AdjListGraph<u8, f64> = AdjListGraph::from_vertices_and_edges(
            GraphConfig::new().undirected(),
            0..3,
            [(0, 1, 0.5), (1, 2, 0.25), (0, 2, 1.0)],
        )
        .unwrap();

        assert_eq!(graph.dijkstra(2).unwrap(), vec![Some(0.75), Some(0.25), Some(0.0)]);
        assert_eq!(graph.floyd().distance(0, 2), Some(0.75));
    }
}
