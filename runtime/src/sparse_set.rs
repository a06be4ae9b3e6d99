//! Provides an implementation of a SparseSet as an alternative to HashSets
//! for the simulator's active states.

/// A set of small integers supporting constant time insertion, membership
/// and clearing. Iteration yields members in insertion order.
pub struct SparseSet {
    dense: Vec<usize>,
    sparse: Vec<usize>,
}

impl SparseSet {
    /// Initializes a new set able to hold values below `max_len` without
    /// reallocating.
    #[must_use]
    pub fn new(max_len: usize) -> Self {
        Self {
            dense: Vec::with_capacity(max_len),
            sparse: vec![0; max_len],
        }
    }

    /// Returns `true` if the set contains no elements.
    pub fn is_empty(&self) -> bool {
        self.dense.is_empty()
    }

    /// Returns the number of values the set can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.sparse.len()
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.dense.len()
    }

    /// Inserts a value into the set, returning `false` if it was present.
    pub fn insert(&mut self, val: usize) -> bool {
        if self.contains(&val) {
            return false;
        }

        if self.sparse.len() <= val {
            // double the size.
            self.sparse.resize((val + 1) * 2, 0);
        }

        self.sparse[val] = self.dense.len();
        self.dense.push(val);
        true
    }

    /// Returns `true` if the set contains a value.
    pub fn contains(&self, val: &usize) -> bool {
        self.sparse
            .get(*val)
            .map(|&dense_idx| self.dense.get(dense_idx) == Some(val))
            // out of bounds values were never inserted.
            .unwrap_or(false)
    }

    /// Clears the set, removing all values while keeping its capacity.
    pub fn clear(&mut self) {
        self.dense.clear();
    }

    /// Iterates over the members in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.dense.iter().copied()
    }
}

impl core::fmt::Debug for SparseSet {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.dense.iter()).finish()
    }
}
