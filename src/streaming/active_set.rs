//! Retiring buffer for streaming scans.
//!
//! An [`ActiveSet`] holds elements in scan order and lets the front be
//! retired once the scan has moved past it, with periodic compaction to
//! bound memory.

/// Compaction threshold - trigger when head_idx exceeds this value.
const COMPACTION_THRESHOLD: usize = 4096;

/// Ordered buffer with a retiring head.
///
/// Uses Vec + head_idx rather than VecDeque so the live elements are always
/// one contiguous slice, which keeps binary searches over them trivial.
/// Elements before head_idx are logically removed but not deallocated
/// until compaction is triggered.
#[derive(Debug, Clone)]
pub struct ActiveSet<T> {
    data: Vec<T>,
    head_idx: usize,
    retired: usize,
}

impl<T> Default for ActiveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ActiveSet<T> {
    /// Create a new empty active set.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Create a new active set with specified initial capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
            head_idx: 0,
            retired: 0,
        }
    }

    /// Add an element at the back.
    #[inline]
    pub fn push(&mut self, value: T) {
        self.data.push(value);
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - self.head_idx
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head_idx >= self.data.len()
    }

    /// Live elements as a contiguous slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data[self.head_idx..]
    }

    /// Retire elements from the front while `condition` holds.
    ///
    /// Returns the number of elements retired.
    #[inline]
    pub fn advance_while<F>(&mut self, mut condition: F) -> usize
    where
        F: FnMut(&T) -> bool,
    {
        let start_idx = self.head_idx;
        while self.head_idx < self.data.len() && condition(&self.data[self.head_idx]) {
            self.head_idx += 1;
        }
        let count = self.head_idx - start_idx;
        self.retired += count;
        self.compact_if_needed();
        count
    }

    /// Drop retired storage once it dominates the buffer.
    pub fn compact_if_needed(&mut self) {
        if self.head_idx > COMPACTION_THRESHOLD && self.head_idx * 2 > self.data.len() {
            self.data.drain(0..self.head_idx);
            self.head_idx = 0;
        }
    }

    /// Remove and return all live elements, leaving the set empty.
    ///
    /// The retired count is kept.
    pub fn take_live(&mut self) -> Vec<T> {
        let mut data = std::mem::take(&mut self.data);
        data.drain(0..self.head_idx);
        self.head_idx = 0;
        data
    }

    /// Total number of elements retired over the lifetime of the set.
    pub fn retired(&self) -> usize {
        self.retired
    }

    /// First live element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.data.get(self.head_idx)
    }
}

impl<T> Extend<T> for ActiveSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.data.extend(iter);
    }
}
