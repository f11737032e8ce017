/*!
# Binary-Heap Priority Queue

A binary heap laid out in a [`SeqBinaryTree`]. Every occupied slot dominates its children with
respect to the configured [`HeapOrder`], so the dominating element is always found at the root.

Only [`PartialOrd`] is required: elements that compare as unordered (e.g. `NaN`) never trigger a swap.
*/

use super::seq_tree::*;

/// Which element a [`PriorityQueue`] yields first
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum HeapOrder {
    /// Smallest element first
    #[default]
    Min,
    /// Largest element first
    Max,
}

#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    tree: SeqBinaryTree<T>,
    order: HeapOrder,
}

impl<T: PartialOrd> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new(HeapOrder::Min)
    }
}

impl<T: PartialOrd> PriorityQueue<T> {
    pub fn new(order: HeapOrder) -> Self {
        Self {
            tree: SeqBinaryTree::new(),
            order,
        }
    }

    /// Shorthand for `PriorityQueue::new(HeapOrder::Min)`
    pub fn min() -> Self {
        Self::new(HeapOrder::Min)
    }

    /// Shorthand for `PriorityQueue::new(HeapOrder::Max)`
    pub fn max() -> Self {
        Self::new(HeapOrder::Max)
    }

    pub fn order(&self) -> HeapOrder {
        self.order
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns *true* if the element in slot `child` dominates the one in slot `upper`,
    /// i.e. they are in the wrong order when `upper` is above `child`
    fn out_of_order(&self, upper: usize, child: usize) -> bool {
        match (self.tree.get_node(upper), self.tree.get_node(child)) {
            (Some(u), Some(c)) => match self.order {
                HeapOrder::Min => u > c,
                HeapOrder::Max => u < c,
            },
            _ => false,
        }
    }

    fn sift_up(&mut self, mut index: usize) {
        while let Some(parent) = parent_of(index) {
            if !self.out_of_order(parent, index) {
                break;
            }
            self.tree.swap_nodes(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let n = self.tree.len();
        loop {
            let left = left_child_of(index);
            if left >= n {
                break;
            }

            let right = right_child_of(index);
            let target = if right < n && self.out_of_order(left, right) {
                right
            } else {
                left
            };

            if !self.out_of_order(index, target) {
                break;
            }
            self.tree.swap_nodes(index, target);
            index = target;
        }
    }

    /// Inserts `value` at the end and restores the heap property
    pub fn push(&mut self, value: T) {
        let index = self.tree.len();
        self.tree.set_node(index, value);
        self.sift_up(index);
    }

    /// Removes and returns the dominating element
    pub fn pop(&mut self) -> Option<T> {
        let last = self.tree.len().checked_sub(1)?;
        self.tree.swap_nodes(0, last);
        let value = self.tree.take_node(last);
        if !self.is_empty() {
            self.sift_down(0);
        }
        value
    }

    /// Returns the dominating element without removing it
    pub fn top(&self) -> Option<&T> {
        self.tree.get_node(0)
    }

    pub fn clear(&mut self) {
        self.tree.clear();
    }
}

impl<T: PartialOrd> Extend<T> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push(value);
        }
    }
}

impl<T: PartialOrd> FromIterator<T> for PriorityQueue<T> {
    /// Collects into a min-queue
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut queue = Self::min();
        queue.extend(iter);
        queue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    fn assert_heap<T: PartialOrd>(queue: &PriorityQueue<T>) {
        for i in 1..queue.len() {
            assert!(queue.tree.is_valid(i));
            assert!(!queue.out_of_order((i - 1) / 2, i));
        }
    }

    #[test]
    fn empty_queue() {
        let mut queue = PriorityQueue::<u32>::min();
        assert!(queue.top().is_none());
        assert!(queue.pop().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn min_and_max_order() {
        let values = [5, 1, 9, 3, 3, 7, 0, 12, 4];

        let mut min: PriorityQueue<_> = values.into_iter().collect();
        assert_eq!(min.top(), Some(&0));
        let mut popped = Vec::new();
        while let Some(x) = min.pop() {
            popped.push(x);
        }
        assert_eq!(popped, values.into_iter().sorted().collect_vec());

        let mut max = PriorityQueue::max();
        max.extend(values);
        assert_eq!(max.top(), Some(&12));
        assert_eq!(max.pop(), Some(12));
        assert_eq!(max.pop(), Some(9));
        assert_eq!(max.len(), values.len() - 2);
    }

    #[test]
    fn random_operations_keep_heap_property() {
        let rng = &mut Pcg64Mcg::seed_from_u64(13);

        for order in [HeapOrder::Min, HeapOrder::Max] {
            let mut queue = PriorityQueue::new(order);
            let mut reference: Vec<i32> = Vec::new();

            for _ in 0..2000 {
                if rng.random_bool(0.6) {
                    let x = rng.random_range(-100..100);
                    queue.push(x);
                    reference.push(x);
                } else {
                    reference.sort_unstable();
                    let expected = match order {
                        HeapOrder::Min => (!reference.is_empty()).then(|| reference.remove(0)),
                        HeapOrder::Max => reference.pop(),
                    };
                    assert_eq!(queue.pop(), expected);
                }
                assert_heap(&queue);
                assert_eq!(queue.len(), reference.len());
            }
        }
    }
}
