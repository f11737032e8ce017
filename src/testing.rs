/// Every graph representation should pass the same suite of tests, instantiated once
/// per representation and direction. Vertex values are `u32`, weights are `u64`.
macro_rules! test_weighted_graph {
    ($env:ident, $graph:ty, $undirected:literal, ($($section:ident),*)) => {
        #[cfg(test)]
        mod $env {
            use crate::{algo::*, config::*, edge::*, error::*, node::*, ops::*, repr::*, utils::*};
            use rand::{Rng, SeedableRng};
            use rand_pcg::Pcg64Mcg;
            use itertools::Itertools;
            use stream_bitset::prelude::*;

            use crate::testing::test_weighted_graph;

            type Graph = $graph;

            const DIRECTION: Direction = if $undirected {
                Direction::Undirected
            } else {
                Direction::Directed
            };

            fn empty_graph(capacity: NumNodes) -> Graph {
                GraphConfig::new().direction(DIRECTION).capacity(capacity).build()
            }

            /// Creates a graph with vertices `0..n` (values equal to indices) and up to `m` random edges
            fn random_graph<R: Rng>(rng: &mut R, n: NumNodes, m: usize, max_weight: u64) -> Graph {
                let mut graph = empty_graph(n);
                graph.insert_vertices(0..n).unwrap();
                for _ in 0..m {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    graph.try_insert_edge(u, v, rng.random_range(1..=max_weight)).unwrap();
                }
                graph
            }

            /// Vertices `A..E` with edges `(0,1,10),(0,2,5),(3,4,2),(2,4,3),(1,3,1),(3,2,2)`
            fn scenario() -> Graph {
                Graph::from_vertices_and_edges(
                    GraphConfig::new().direction(DIRECTION),
                    "ABCDE".chars().map(|c| c as u32),
                    [(0, 1, 10), (0, 2, 5), (3, 4, 2), (2, 4, 3), (1, 3, 1), (3, 2, 2)],
                )
                .unwrap()
            }

            /// Shortest path lengths via repeated relaxation of all edges
            fn brute_force_distances(graph: &Graph, start: Node) -> Vec<Option<u64>> {
                let mut dist = vec![None; graph.len()];
                dist[start as usize] = Some(0u64);
                for _ in graph.vertices() {
                    for e in graph.edges() {
                        if let Some(d) = dist[e.src as usize] {
                            let candidate = d + e.weight;
                            if dist[e.dest as usize].is_none_or(|x| candidate < x) {
                                dist[e.dest as usize] = Some(candidate);
                            }
                        }
                    }
                }
                dist
            }

            $(
                test_weighted_graph!($undirected: $section);
            )*
        }
    };
    ($undirected:literal: VertexEditing) => {
        #[test]
        fn vertex_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(3);

            for n in [5 as NumNodes, 10, 30] {
                for _ in 0..5 {
                    let mut graph = random_graph(rng, n, 3 * n as usize, 10);
                    assert_eq!(graph.insert_vertex(0), Err(GraphError::DuplicateVertex { index: 0 }));

                    // reference edge set on vertex values
                    let mut edges = graph
                        .edges()
                        .map(|e| (e.src, e.dest, e.weight))
                        .collect_vec();
                    let mut values = (0..n).collect_vec();

                    while !values.is_empty() {
                        let value = values[rng.random_range(0..values.len())];
                        let index = graph.vertex_index(&value).unwrap();
                        let above = values.iter().filter(|&&x| x > value).map(|x| graph.vertex_index(x).unwrap()).collect_vec();

                        assert_eq!(graph.remove_vertex(&value), Ok(index));
                        assert_eq!(graph.vertex_index(&value), None);
                        assert_eq!(graph.remove_vertex(&value), Err(GraphError::VertexNotFound));

                        for (x, before) in values.iter().filter(|&&x| x > value).zip(above) {
                            assert_eq!(graph.vertex_index(x), Some(before - 1));
                        }

                        values.retain(|&x| x != value);
                        edges.retain(|&(u, v, _)| u != value && v != value);
                        assert_eq!(graph.number_of_nodes() as usize, values.len());
                        assert_eq!(graph.number_of_edges() as usize, edges.len());

                        let mut actual = graph
                            .edges()
                            .map(|e| (*graph.vertex(e.src).unwrap(), *graph.vertex(e.dest).unwrap(), e.weight))
                            .collect_vec();
                        actual.sort_unstable();
                        let mut expected = edges.clone();
                        expected.sort_unstable();
                        assert_eq!(actual, expected);
                    }

                    assert!(graph.is_empty());
                    assert!(graph.is_singleton());
                }
            }
        }

        #[test]
        fn clear_and_clone() {
            let rng = &mut Pcg64Mcg::seed_from_u64(4);
            let mut graph = random_graph(rng, 10, 30, 10);
            let copy = graph.clone();

            graph.clear();
            assert!(graph.is_empty());
            assert_eq!(graph.number_of_edges(), 0);
            assert_eq!(copy.number_of_nodes(), 10);
            assert!(copy.number_of_edges() > 0);

            assert_eq!(graph.insert_vertex(42), Ok(0));
            assert_eq!(graph.vertex(0), Some(&42));
            assert_eq!(graph.vertex(1), None);
        }
    };
    ($undirected:literal: EdgeEditing) => {
        #[test]
        fn edge_editing() {
            let rng = &mut Pcg64Mcg::seed_from_u64(5);

            for n in [5 as NumNodes, 20, 40] {
                let mut graph = empty_graph(n);
                graph.insert_vertices(0..n).unwrap();
                let mut adj_matrix: Vec<NodeBitSet> = vec![NodeBitSet::new(n); n as usize];
                let mut weights = vec![0u64; (n * n) as usize];
                let mut m = 0;

                for _ in 0..(n * n * 2) {
                    let u = rng.random_range(0..n);
                    let v = rng.random_range(0..n);
                    let w = rng.random_range(1..100);
                    let mirrored = $undirected && u != v;

                    match rng.random_range(0..3) {
                        0 => {
                            if adj_matrix[u as usize].get_bit(v) {
                                assert_eq!(graph.insert_edge(u, v, w), Err(GraphError::EdgeExists { src: u, dest: v }));
                            } else {
                                assert_eq!(graph.insert_edge(u, v, w), Ok(()));
                                adj_matrix[u as usize].set_bit(v);
                                weights[(u * n + v) as usize] = w;
                                m += 1;
                                if mirrored {
                                    adj_matrix[v as usize].set_bit(u);
                                    weights[(v * n + u) as usize] = w;
                                    m += 1;
                                }
                            }
                        }
                        1 => {
                            if adj_matrix[u as usize].clear_bit(v) {
                                assert_eq!(graph.remove_edge(u, v), Ok(weights[(u * n + v) as usize]));
                                m -= 1;
                                if mirrored {
                                    assert!(adj_matrix[v as usize].clear_bit(u));
                                    m -= 1;
                                }
                            } else {
                                assert_eq!(graph.remove_edge(u, v), Err(GraphError::MissingEdge { src: u, dest: v }));
                            }
                        }
                        _ => {
                            if adj_matrix[u as usize].get_bit(v) {
                                let old = weights[(u * n + v) as usize];
                                assert_eq!(graph.set_edge_weight(u, v, w), Ok(old));
                                weights[(u * n + v) as usize] = w;
                                if mirrored {
                                    weights[(v * n + u) as usize] = w;
                                }
                            } else {
                                assert!(graph.set_edge_weight(u, v, w).is_err());
                            }
                        }
                    }

                    assert_eq!(graph.number_of_edges(), m);
                }

                for u in 0..n {
                    for v in 0..n {
                        let expected = adj_matrix[u as usize].get_bit(v);
                        assert_eq!(graph.has_edge(u, v), expected);
                        if $undirected {
                            assert_eq!(graph.has_edge(u, v), graph.has_edge(v, u));
                        }
                        if expected {
                            assert_eq!(graph.edge_weight(u, v), Some(weights[(u * n + v) as usize]));
                        }
                    }
                    assert_eq!(graph.degree_of(u), adj_matrix[u as usize].cardinality());
                    assert!(graph.neighbors_of(u).map(|(v, _)| v).tuple_windows().all(|(a, b)| a < b));
                }
            }
        }

        #[test]
        fn invalid_indices() {
            let mut graph = empty_graph(4);
            graph.insert_vertices([7, 8]).unwrap();

            let invalid = GraphError::InvalidIndex { index: 2, len: 2 };
            assert_eq!(graph.insert_edge(0, 2, 1), Err(invalid.clone()));
            assert_eq!(graph.remove_edge(2, 0), Err(invalid.clone()));
            assert_eq!(graph.set_edge_weight(2, 2, 1), Err(invalid));
            assert!(!graph.has_edge(0, 2));
            assert_eq!(graph.edge_weight(5, 0), None);
            assert_eq!(graph.vertex(2), None);
            assert!(graph.is_singleton());
        }

        #[test]
        fn degrees() {
            let graph = scenario();
            if $undirected {
                assert_eq!(graph.in_degree(2), Err(GraphError::UnsupportedForUndirected));
                assert_eq!(graph.out_degree(2), Err(GraphError::UnsupportedForUndirected));
            } else {
                assert_eq!(graph.in_degree(2), Ok(2));
                assert_eq!(graph.out_degree(3), Ok(2));
                assert_eq!(graph.in_degree(0), Ok(0));
                assert_eq!(graph.out_degree(5), Err(GraphError::InvalidIndex { index: 5, len: 5 }));
            }

            let expected = if $undirected { vec![2, 2, 3, 3, 2] } else { vec![2, 1, 1, 2, 0] };
            assert_eq!(graph.degrees(), expected);
        }

        #[test]
        fn vertex_values_and_self_loops() {
            let mut graph = scenario();
            assert!(graph.contains_vertex(&('E' as u32)));
            assert!(!graph.contains_vertex(&('F' as u32)));
            assert_eq!(
                graph.vertex_values().map(|&c| char::from_u32(c).unwrap()).collect::<String>(),
                "ABCDE"
            );

            assert!(graph.vertices().all(|u| !graph.has_self_loop(u)));
            graph.insert_edge(4, 4, 7).unwrap();
            assert!(graph.has_self_loop(4));
            assert!(!graph.has_self_loop(3));
            assert_eq!(graph.number_of_edges(), if $undirected { 13 } else { 7 });
            assert_eq!(graph.degrees()[4], if $undirected { 3 } else { 1 });

            graph.remove_vertex(&('A' as u32)).unwrap();
            assert!(!graph.contains_vertex(&('A' as u32)));
            assert!(graph.has_self_loop(3));
            assert_eq!(
                graph.vertex_values().map(|&c| char::from_u32(c).unwrap()).collect::<String>(),
                "BCDE"
            );
        }
    };
    ($undirected:literal: Scenario) => {
        #[test]
        fn scenario_algorithms() {
            let graph = scenario();
            assert_eq!(graph.number_of_edges(), if $undirected { 12 } else { 6 });
            assert_eq!(graph.vertex_index(&('D' as u32)), Some(3));

            let expected = if $undirected { [0, 8, 5, 7, 8] } else { [0, 10, 5, 11, 8] };
            assert_eq!(graph.dijkstra(0).unwrap(), expected.map(Some).to_vec());

            let apsp = graph.floyd();
            for u in graph.vertices() {
                assert_eq!(apsp.distances_from(u), graph.dijkstra(u).unwrap().as_slice());
            }
            if !$undirected {
                assert_eq!(apsp.path(0, 3), Some(vec![0, 1, 3]));
            }

            let kruskal = graph.kruskal().unwrap();
            assert_eq!(kruskal.len(), 4);
            assert_eq!(kruskal.sum_of_values(), 10);

            let prim = graph.prim(0).unwrap();
            assert_eq!(prim.len(), 4);
            if $undirected {
                assert_eq!(prim.sum_of_values(), 10);
            } else {
                assert_eq!(
                    prim.iter().map(|t| (t.row, t.col, t.value)).collect_vec(),
                    vec![(0, 1, 10), (0, 2, 5), (1, 3, 1), (2, 4, 3)]
                );
            }

            assert_eq!(graph.dfs(0).unwrap().collect_vec(), vec![0, 1, 3, 2, 4]);
            assert_eq!(graph.bfs(0).unwrap().collect_vec(), vec![0, 1, 2, 3, 4]);

            if $undirected {
                assert_eq!(graph.topological_sort(), Err(GraphError::UnsupportedForUndirected));
            } else {
                let order = graph.topological_values().unwrap();
                assert_eq!(order.into_iter().map(|&c| char::from_u32(c).unwrap()).collect::<String>(), "ABDCE");
            }
        }

        #[test]
        fn scenario_vertex_removal() {
            let mut graph = scenario();
            assert_eq!(graph.remove_vertex(&('C' as u32)), Ok(2));
            assert_eq!(graph.vertex_index(&('D' as u32)), Some(2));
            assert_eq!(graph.number_of_edges(), if $undirected { 6 } else { 3 });

            assert_eq!(graph.edge_weight(1, 2), Some(1));
            assert_eq!(graph.edge_weight(2, 3), Some(2));
            assert_eq!(graph.edge_weight(0, 1), Some(10));
            assert_eq!(graph.dijkstra(0).unwrap(), vec![Some(0), Some(10), Some(11), Some(13)]);
        }
    };
    ($undirected:literal: Traversal) => {
        /// Recursive reference implementation including the wrap-around scan
        fn recursive_dfs(graph: &Graph, start: Node) -> Vec<Node> {
            fn visit(graph: &Graph, u: Node, visited: &mut NodeBitSet, order: &mut Vec<Node>) {
                visited.set_bit(u);
                order.push(u);
                for (v, _) in graph.neighbors_of(u) {
                    if !visited.get_bit(v) {
                        visit(graph, v, visited, order);
                    }
                }
            }

            let mut visited = graph.vertex_bitset_unset();
            let mut order = Vec::new();
            for u in (start..graph.number_of_nodes()).chain(0..start) {
                if !visited.get_bit(u) {
                    visit(graph, u, &mut visited, &mut order);
                }
            }
            order
        }

        #[test]
        fn traversals_cover_all_vertices() {
            let rng = &mut Pcg64Mcg::seed_from_u64(6);

            for n in [1 as NumNodes, 5, 20, 50] {
                for m in [0, n as usize, 2 * n as usize] {
                    let graph = random_graph(rng, n, m, 5);
                    let start = rng.random_range(0..n);

                    let dfs = graph.dfs(start).unwrap().collect_vec();
                    let bfs = graph.bfs(start).unwrap().collect_vec();

                    assert_eq!(dfs, recursive_dfs(&graph, start));
                    assert_eq!(bfs[0], start);
                    assert_eq!(bfs.iter().copied().sorted().collect_vec(), (0..n).collect_vec());

                    // BFS emits the start component in non-decreasing hop distance
                    let mut hops = vec![None; n as usize];
                    hops[start as usize] = Some(0);
                    for &u in &bfs {
                        let Some(h) = hops[u as usize] else { break };
                        for (v, _) in graph.neighbors_of(u) {
                            if hops[v as usize].is_none() {
                                hops[v as usize] = Some(h + 1);
                            }
                        }
                    }
                    assert!(bfs.iter().map_while(|&u| hops[u as usize]).tuple_windows().all(|(a, b)| a <= b));
                }
            }
        }
    };
    ($undirected:literal: ShortestPaths) => {
        #[test]
        fn dijkstra_matches_brute_force() {
            let rng = &mut Pcg64Mcg::seed_from_u64(7);

            for n in [1 as NumNodes, 6, 15, 30] {
                for m in [n as usize, 3 * n as usize] {
                    let graph = random_graph(rng, n, m, 20);
                    let apsp = graph.floyd();

                    for start in graph.vertices() {
                        let tree = graph.dijkstra_tree(start).unwrap();
                        let expected = brute_force_distances(&graph, start);
                        assert_eq!(tree.distances(), expected.as_slice());
                        assert_eq!(apsp.distances_from(start), expected.as_slice());

                        for v in graph.vertices() {
                            let Some(path) = apsp.path(start, v) else {
                                assert!(expected[v as usize].is_none());
                                continue;
                            };
                            assert_eq!(path.first(), Some(&start));
                            assert_eq!(path.last(), Some(&v));

                            let length: u64 = path
                                .iter()
                                .tuple_windows()
                                .map(|(&a, &b)| graph.edge_weight(a, b).unwrap())
                                .sum();
                            assert_eq!(Some(length), expected[v as usize]);
                            assert_eq!(tree.path_to(v).and_then(|p| p.last().copied()), Some(v));
                        }
                    }
                }
            }
        }
    };
    ($undirected:literal: Topological) => {
        #[test]
        fn topological_sort_on_random_dags() {
            let rng = &mut Pcg64Mcg::seed_from_u64(8);

            for n in [2 as NumNodes, 10, 40] {
                for _ in 0..5 {
                    // orient all edges along a random permutation
                    let mut rank = (0..n).collect_vec();
                    for i in (1..n as usize).rev() {
                        rank.swap(i, rng.random_range(0..=i));
                    }

                    let mut graph = empty_graph(n);
                    graph.insert_vertices(0..n).unwrap();
                    for _ in 0..(2 * n) {
                        let u = rng.random_range(0..n);
                        let v = rng.random_range(0..n);
                        if rank[u as usize] < rank[v as usize] {
                            graph.try_insert_edge(u, v, 1).unwrap();
                        }
                    }

                    let order = graph.topological_sort().unwrap();
                    let mut position = vec![0; n as usize];
                    for (i, &u) in order.iter().enumerate() {
                        position[u as usize] = i;
                    }
                    assert_eq!(order.iter().copied().sorted().collect_vec(), (0..n).collect_vec());
                    assert!(graph.edges().all(|e| position[e.src as usize] < position[e.dest as usize]));

                    // closing a cycle through the first and last vertex of the order
                    let (first, last) = (order[0], order[order.len() - 1]);
                    graph.try_insert_edge(first, last, 1).unwrap();
                    graph.try_insert_edge(last, first, 1).unwrap();
                    assert!(matches!(graph.topological_sort(), Err(GraphError::CycleDetected { .. })));
                }
            }
        }
    };
    ($undirected:literal: Mst) => {
        /// Weight of a minimum spanning forest over all subsets of the (normalized) edges
        fn brute_force_forest_weight(graph: &Graph) -> u64 {
            let edges = graph.normalized_edges().filter(|e| !e.is_loop()).collect_vec();
            let mut components = DisjointSetForest::new(graph.number_of_nodes());
            for e in &edges {
                components.unite(e.src, e.dest);
            }
            let k = (graph.number_of_nodes() - components.number_of_sets()) as usize;

            edges
                .iter()
                .combinations(k)
                .filter(|subset| {
                    let mut forest = DisjointSetForest::new(graph.number_of_nodes());
                    subset.iter().all(|e| forest.unite(e.src, e.dest))
                })
                .map(|subset| subset.iter().map(|e| e.weight).sum::<u64>())
                .min()
                .unwrap_or(0)
        }

        #[test]
        fn kruskal_is_minimal_forest() {
            let rng = &mut Pcg64Mcg::seed_from_u64(9);

            for n in [1 as NumNodes, 3, 5, 7] {
                for m in [n as usize, 2 * n as usize] {
                    for _ in 0..5 {
                        let graph = random_graph(rng, n, m, 9);
                        let tree = graph.kruskal().unwrap();

                        // replaying the accepted edges never closes a cycle
                        let mut forest = DisjointSetForest::new(n);
                        assert!(tree.iter().all(|t| forest.unite(t.row as Node, t.col as Node)));
                        assert!(tree.iter().all(|t| graph.edge_weight(t.row as Node, t.col as Node) == Some(t.value)));

                        let mut components = DisjointSetForest::new(n);
                        graph.edges().for_each(|e| { components.unite(e.src, e.dest); });
                        assert_eq!(tree.len(), (n - components.number_of_sets()) as usize);
                        assert!(tree.len() <= n.saturating_sub(1) as usize);

                        assert_eq!(tree.sum_of_values(), brute_force_forest_weight(&graph));

                        if $undirected {
                            // prim spans the component of its start with the same weight as kruskal's restriction
                            let prim = graph.prim(0).unwrap();
                            let reached = graph.dijkstra(0).unwrap().iter().filter(|d| d.is_some()).count();
                            assert_eq!(prim.len() + 1, reached);
                            if reached == n as usize {
                                assert_eq!(prim.sum_of_values(), tree.sum_of_values());
                            }
                        }
                    }
                }
            }
        }
    };
}

pub(crate) use test_weighted_graph;
