/*!
# Sequential Binary Tree

A binary tree stored level by level in an array: the children of slot `i` are `2i + 1` and `2i + 2`.
The storage grows to the next capacity of the form `2^k - 1` (i.e. one more full level) whenever a
slot beyond the current capacity is written.
*/

const DEFAULT_CAPACITY: usize = 15;

/// Parent slot of `index`; `None` for the root
#[inline]
pub fn parent_of(index: usize) -> Option<usize> {
    (index > 0).then(|| (index - 1) / 2)
}

#[inline]
pub fn left_child_of(index: usize) -> usize {
    2 * index + 1
}

#[inline]
pub fn right_child_of(index: usize) -> usize {
    2 * index + 2
}

/// Array-backed binary tree with optional slots
#[derive(Debug, Clone)]
pub struct SeqBinaryTree<T> {
    slots: Vec<Option<T>>,
    count: usize,
    last_index: Option<usize>,
}

impl<T> Default for SeqBinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> SeqBinaryTree<T> {
    /// Creates an empty tree with room for four levels
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty tree with room for at least `capacity` slots,
    /// rounded up to the next `2^k - 1`
    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::new();
        slots.resize_with(Self::full_capacity(capacity), || None);
        Self {
            slots,
            count: 0,
            last_index: None,
        }
    }

    /// Smallest `2^k - 1 >= capacity`
    fn full_capacity(capacity: usize) -> usize {
        (capacity + 1).next_power_of_two() - 1
    }

    /// Number of slots currently allocated
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Highest occupied slot
    pub fn last_index(&self) -> Option<usize> {
        self.last_index
    }

    /// Writes `value` into slot `index`, growing the storage level by level if needed.
    /// Returns the value previously stored in the slot.
    pub fn set_node(&mut self, index: usize, value: T) -> Option<T> {
        if index >= self.slots.len() {
            let capacity = Self::full_capacity(index + 1);
            self.slots.resize_with(capacity, || None);
        }

        let previous = self.slots[index].replace(value);
        if previous.is_none() {
            self.count += 1;
        }
        self.last_index = Some(self.last_index.map_or(index, |last| last.max(index)));
        previous
    }

    /// Returns the value stored in slot `index`, if any
    pub fn get_node(&self, index: usize) -> Option<&T> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Returns *true* if slot `index` holds a value
    pub fn is_valid(&self, index: usize) -> bool {
        self.get_node(index).is_some()
    }

    /// Empties slot `index` and returns its value
    pub fn take_node(&mut self, index: usize) -> Option<T> {
        let value = self.slots.get_mut(index)?.take()?;
        self.count -= 1;
        if self.last_index == Some(index) {
            self.last_index = self.slots[..index].iter().rposition(Option::is_some);
        }
        Some(value)
    }

    /// Exchanges the contents of two slots. Both need to be within capacity.
    /// ** Panics if `a` or `b` is out of capacity **
    pub fn swap_nodes(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.slots.swap(a, b);
        if self.slots[a].is_some() != self.slots[b].is_some() {
            self.last_index = self.slots.iter().rposition(Option::is_some);
        }
    }

    /// Removes all values but keeps the capacity
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|s| *s = None);
        self.count = 0;
        self.last_index = None;
    }

    /// Iterates over `(slot, value)` of all occupied slots in level order
    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|v| (i, v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    #[test]
    fn grows_by_full_levels() {
        let mut tree = SeqBinaryTree::new();
        assert_eq!(tree.capacity(), 15);

        assert!(tree.set_node(15, 'a').is_none());
        assert_eq!(tree.capacity(), 31);
        assert!(tree.set_node(100, 'b').is_none());
        assert_eq!(tree.capacity(), 127);

        assert_eq!(SeqBinaryTree::<u8>::with_capacity(8).capacity(), 15);
        assert_eq!(SeqBinaryTree::<u8>::with_capacity(7).capacity(), 7);
    }

    #[test]
    fn set_get_take() {
        let mut tree = SeqBinaryTree::new();
        tree.set_node(0, 1);
        tree.set_node(left_child_of(0), 2);
        tree.set_node(right_child_of(0), 3);
        assert_eq!(tree.set_node(2, 4), Some(3));

        assert_eq!(tree.len(), 3);
        assert_eq!(tree.last_index(), Some(2));
        assert!(tree.is_valid(1));
        assert!(!tree.is_valid(3));
        assert!(!tree.is_valid(1000));
        assert_eq!(parent_of(2), Some(0));
        assert_eq!(parent_of(0), None);

        assert_eq!(tree.take_node(2), Some(4));
        assert_eq!(tree.last_index(), Some(1));
        assert_eq!(tree.take_node(2), None);

        tree.swap_nodes(0, 1);
        assert_eq!(tree.iter().collect_vec(), vec![(0, &2), (1, &1)]);

        tree.clear();
        assert!(tree.is_empty());
        assert_eq!(tree.last_index(), None);
    }
}
