//! Union-find over a fixed number of indexed elements.

/// Disjoint-set forest with path compression and union-by-rank.
#[derive(Debug, Clone)]
pub struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
    sets: usize,
}

impl DisjointSet {
    /// Create `size` singleton sets indexed `0..size`.
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size).collect(),
            rank: vec![0; size],
            sets: size,
        }
    }

    /// Number of elements tracked.
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Number of disjoint sets remaining.
    pub fn set_count(&self) -> usize {
        self.sets
    }

    /// Representative of the set containing `element`.
    ///
    /// Every node visited on the way up is re-pointed directly at the root.
    /// The walk is iterative so deep chains cannot exhaust the stack.
    ///
    /// # Panics
    ///
    /// Panics if `element >= self.len()`.
    pub fn find(&mut self, element: usize) -> usize {
        let mut root = element;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        let mut current = element;
        while self.parent[current] != root {
            let next = self.parent[current];
            self.parent[current] = root;
            current = next;
        }

        root
    }

    /// Merge the sets containing `a` and `b`.
    ///
    /// The lower-rank root is attached under the higher-rank root; on equal
    /// rank `a`'s root absorbs `b`'s and gains one rank. Returns `false` when
    /// both elements already share a set.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let root_a = self.find(a);
        let root_b = self.find(b);
        if root_a == root_b {
            return false;
        }

        match self.rank[root_a].cmp(&self.rank[root_b]) {
            std::cmp::Ordering::Less => self.parent[root_a] = root_b,
            std::cmp::Ordering::Greater => self.parent[root_b] = root_a,
            std::cmp::Ordering::Equal => {
                self.parent[root_b] = root_a;
                self.rank[root_a] += 1;
            }
        }
        self.sets -= 1;
        true
    }

    /// Whether `a` and `b` are in the same set.
    pub fn same_set(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_as_singletons() {
        let mut sets = DisjointSet::new(4);
        assert_eq!(sets.set_count(), 4);
        for i in 0..4 {
            assert_eq!(sets.find(i), i);
        }
    }

    #[test]
    fn union_joins_and_is_idempotent() {
        let mut sets = DisjointSet::new(5);
        assert!(sets.union(0, 1));
        assert!(sets.union(3, 4));
        assert!(!sets.union(1, 0));
        assert_eq!(sets.set_count(), 3);

        assert!(sets.same_set(0, 1));
        assert!(sets.same_set(3, 4));
        assert!(!sets.same_set(1, 3));
        assert_eq!(sets.find(2), 2);
    }

    #[test]
    fn equal_rank_union_keeps_first_root() {
        let mut sets = DisjointSet::new(2);
        sets.union(0, 1);
        assert_eq!(sets.find(1), 0);
        assert_eq!(sets.rank[0], 1);
    }

    #[test]
    fn compression_flattens_long_chains() {
        let mut sets = DisjointSet::new(6);
        // Build a chain by always attaching a fresh singleton under the tree.
        for i in 1..6 {
            sets.union(0, i);
        }
        let root = sets.find(5);
        for i in 0..6 {
            assert_eq!(sets.find(i), root);
            assert_eq!(sets.parent[i], root);
        }
        assert_eq!(sets.set_count(), 1);
    }

    #[test]
    fn find_is_idempotent_and_preserves_partition() {
        let mut sets = DisjointSet::new(8);
        sets.union(0, 1);
        sets.union(2, 3);
        sets.union(1, 3);
        sets.union(5, 6);

        let before: Vec<_> = (0..8).map(|i| sets.find(i)).collect();
        let again: Vec<_> = (0..8).map(|i| sets.find(i)).collect();
        assert_eq!(before, again);

        for a in 0..8 {
            for b in 0..8 {
                assert_eq!(before[a] == before[b], sets.same_set(a, b));
            }
        }
    }
}
