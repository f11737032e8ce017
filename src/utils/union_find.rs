/*!
# Disjoint-Set Forest

Union-find over the nodes `0..n` with full path compression and union by rank.
Used by Kruskal's algorithm to reject edges closing a cycle.

Node indices are **not** bounds-checked beyond the usual slice indexing:
passing a node `>= n` panics.
*/

use crate::node::*;

/// Union-find forest over the nodes `0..n`
#[derive(Debug, Clone)]
pub struct DisjointSetForest {
    parent: Vec<Node>,
    rank: Vec<u8>,
}

impl DisjointSetForest {
    /// Creates `n` singleton sets
    pub fn new(n: NumNodes) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n as usize],
        }
    }

    /// Number of elements
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `u`.
    /// Afterwards every node on the path from `u` points directly to the root.
    /// ** Panics if `u >= n` **
    pub fn find(&mut self, mut u: Node) -> Node {
        let mut root = u;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        while self.parent[u as usize] != root {
            let next = self.parent[u as usize];
            self.parent[u as usize] = root;
            u = next;
        }

        root
    }

    /// Returns the representative of `u` without compressing the path
    /// ** Panics if `u >= n` **
    pub fn root_of(&self, mut u: Node) -> Node {
        while self.parent[u as usize] != u {
            u = self.parent[u as usize];
        }
        u
    }

    /// Merges the sets of `u` and `v`. The root of lower rank is attached below the other;
    /// on a tie `v`'s root goes below `u`'s root, whose rank then grows by one.
    /// Returns *true* if two distinct sets were merged.
    /// ** Panics if `u >= n || v >= n` **
    pub fn unite(&mut self, u: Node, v: Node) -> bool {
        let ru = self.find(u);
        let rv = self.find(v);
        if ru == rv {
            return false;
        }

        let (rank_u, rank_v) = (self.rank[ru as usize], self.rank[rv as usize]);
        if rank_u < rank_v {
            self.parent[ru as usize] = rv;
        } else {
            self.parent[rv as usize] = ru;
            if rank_u == rank_v {
                self.rank[ru as usize] = rank_u.saturating_add(1);
            }
        }

        true
    }

    /// Returns *true* if `u` and `v` belong to the same set
    /// ** Panics if `u >= n || v >= n` **
    pub fn is_connected(&mut self, u: Node, v: Node) -> bool {
        self.find(u) == self.find(v)
    }

    /// Number of disjoint sets
    pub fn number_of_sets(&self) -> NumNodes {
        self.parent
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i as Node == p)
            .count() as NumNodes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    #[test]
    fn unite_and_query() {
        let mut uf = DisjointSetForest::new(6);
        assert_eq!(uf.number_of_sets(), 6);

        assert!(uf.unite(0, 1));
        assert!(uf.unite(2, 3));
        assert!(!uf.unite(1, 0));
        assert!(uf.unite(1, 3));

        assert!(uf.is_connected(0, 2));
        assert!(!uf.is_connected(0, 4));
        assert_eq!(uf.number_of_sets(), 3);
    }

    #[test]
    fn equal_rank_attaches_second_root() {
        let mut uf = DisjointSetForest::new(2);
        uf.unite(0, 1);
        assert_eq!(uf.find(1), 0);
    }

    #[test]
    fn compression_keeps_roots() {
        let rng = &mut Pcg64Mcg::seed_from_u64(5);
        let n = 200;
        let mut uf = DisjointSetForest::new(n);
        // naive labelling as oracle
        let mut label: Vec<Node> = (0..n).collect();

        for _ in 0..150 {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            uf.unite(u, v);

            let (lu, lv) = (label[u as usize], label[v as usize]);
            label.iter_mut().filter(|l| **l == lv).for_each(|l| *l = lu);

            let w = rng.random_range(0..n);
            let before = uf.root_of(w);
            assert_eq!(uf.find(w), before);
            assert_eq!(uf.parent[w as usize], before);
        }

        for u in 0..n {
            for v in 0..n {
                assert_eq!(
                    uf.is_connected(u, v),
                    label[u as usize] == label[v as usize]
                );
            }
        }
    }
}
