use super::AvlSet;
use crate::raw::RawAvlTree;

impl<T> AvlSet<T> {
    /// Creates an empty set with room for at least `capacity` elements
    /// before the node arena reallocates.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set: AvlSet<i32> = AvlSet::with_capacity(16);
    /// assert!(set.is_empty());
    /// assert!(set.capacity() >= 16);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        AvlSet {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns the number of elements the set can hold without reallocating.
    ///
    /// Slots freed by removal are reused, so this never shrinks except through
    /// [`clear`](AvlSet::clear), which also keeps the allocation.
    ///
    /// This is an extension and is not part of the standard `BTreeSet` API.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::with_capacity(4);
    /// let capacity = set.capacity();
    /// set.insert(1);
    /// set.remove(&1);
    /// set.insert(2);
    /// assert_eq!(set.capacity(), capacity);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
