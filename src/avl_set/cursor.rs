use core::borrow::Borrow;
use core::fmt;

use super::AvlSet;
use crate::raw::{Handle, RawAvlTree};
use crate::{Error, Result};

/// A position in the sorted sequence of an [`AvlSet`].
///
/// A cursor over a set of `n` elements is either at one of the elements or
/// one past the last element (the *end* position). Stepping forward from the
/// end, or backward from the first element, leaves the cursor where it is.
///
/// Stepping follows the tree's parent links, so a single step is O(log n) in
/// the worst case and a full traversal is O(n). The cursor borrows the set:
/// it cannot outlive it and the set cannot change while it exists.
///
/// Two cursors are equal when they walk the same set and sit at the same
/// position.
///
/// # Examples
///
/// ```
/// use avl_ost::AvlSet;
///
/// let set = AvlSet::from([10, 20, 30]);
///
/// let mut cursor = set.begin();
/// let mut seen = Vec::new();
/// while cursor != set.end() {
///     seen.push(*cursor.key().unwrap());
///     cursor.move_next();
/// }
/// assert_eq!(seen, [10, 20, 30]);
///
/// // From the end, one step back reaches the maximum.
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&30));
/// ```
pub struct Cursor<'a, T> {
    tree: &'a RawAvlTree<T>,
    // Absent only when the set is empty. At the end position this is the
    // maximum node, which is never dereferenced.
    node: Option<Handle>,
    // 1-based; `len + 1` is the end position.
    position: usize,
}

impl<'a, T> Cursor<'a, T> {
    fn new(tree: &'a RawAvlTree<T>, node: Option<Handle>, position: usize) -> Self {
        debug_assert!((1..=tree.len() + 1).contains(&position), "cursor position {position} out of range");
        Cursor {
            tree,
            node,
            position,
        }
    }

    /// Returns the element under the cursor, or `None` at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2]);
    /// assert_eq!(set.begin().key(), Some(&1));
    /// assert_eq!(set.end().key(), None);
    /// ```
    #[must_use]
    pub fn key(&self) -> Option<&'a T> {
        if self.is_end() {
            return None;
        }
        let tree = self.tree;
        self.node.map(|handle| tree.node(handle).key())
    }

    /// Returns the element under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PastTheEnd`] if the cursor is at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlSet, Error};
    ///
    /// let set = AvlSet::from([1]);
    /// assert_eq!(set.begin().try_key(), Ok(&1));
    /// assert_eq!(set.end().try_key(), Err(Error::PastTheEnd { len: 1 }));
    /// ```
    pub fn try_key(&self) -> Result<&'a T> {
        self.key().ok_or(Error::PastTheEnd {
            len: self.tree.len(),
        })
    }

    /// Zero-based rank of the cursor: the number of elements before it.
    /// Equals the set's length at the end position.
    #[must_use]
    pub fn rank(&self) -> usize {
        self.position - 1
    }

    /// Returns `true` if the cursor is one past the last element.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position > self.tree.len()
    }

    /// Advances to the next element, or to the end position after the last
    /// element. Does nothing at the end position.
    pub fn move_next(&mut self) {
        if self.is_end() {
            return;
        }
        self.position += 1;
        if self.is_end() {
            // Keep the maximum node so that `move_prev` can come back.
            return;
        }
        if let Some(handle) = self.node {
            self.node = self.tree.successor(handle);
        }
    }

    /// Moves back to the previous element. From the end position this reaches
    /// the last element; at the first element it does nothing.
    pub fn move_prev(&mut self) {
        if self.position == 1 {
            return;
        }
        self.position -= 1;
        if self.position == self.tree.len() {
            self.node = self.tree.last();
            return;
        }
        if let Some(handle) = self.node {
            self.node = self.tree.predecessor(handle);
        }
    }

    /// Advances the cursor and returns a copy of it from before the move.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2]);
    /// let mut cursor = set.begin();
    /// assert_eq!(cursor.fetch_next().key(), Some(&1));
    /// assert_eq!(cursor.key(), Some(&2));
    /// ```
    pub fn fetch_next(&mut self) -> Self {
        let before = *self;
        self.move_next();
        before
    }

    /// Moves the cursor back and returns a copy of it from before the move.
    pub fn fetch_prev(&mut self) -> Self {
        let before = *self;
        self.move_prev();
        before
    }
}

impl<T> Clone for Cursor<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Cursor<'_, T> {}

impl<T> PartialEq for Cursor<'_, T> {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self.tree, other.tree) && self.position == other.position
    }
}

impl<T> Eq for Cursor<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for Cursor<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("rank", &self.rank()).field("key", &self.key()).finish()
    }
}

impl<T> AvlSet<T> {
    /// Returns a cursor at the first element, or at the end position if the
    /// set is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let empty: AvlSet<i32> = AvlSet::new();
    /// assert_eq!(empty.begin(), empty.end());
    ///
    /// let set = AvlSet::from([2, 1]);
    /// assert_eq!(set.begin().key(), Some(&1));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn begin(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.first(), 1)
    }

    /// Returns a cursor at the end position, one past the last element.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn end(&self) -> Cursor<'_, T> {
        Cursor::new(&self.raw, self.raw.last(), self.len() + 1)
    }

    /// Returns a cursor at zero-based `rank`; `rank == len()` gives the end
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RankOutOfBounds`] if `rank > len()`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlSet, Error};
    ///
    /// let set = AvlSet::from([5, 6, 7]);
    /// assert_eq!(set.cursor_at(1).unwrap().key(), Some(&6));
    /// assert_eq!(set.cursor_at(3), Ok(set.end()));
    /// assert_eq!(set.cursor_at(4), Err(Error::RankOutOfBounds { rank: 4, len: 3 }));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn cursor_at(&self, rank: usize) -> Result<Cursor<'_, T>> {
        let len = self.len();
        if rank > len {
            return Err(Error::RankOutOfBounds {
                rank,
                len,
            });
        }
        if rank == len {
            return Ok(self.end());
        }
        Ok(Cursor::new(&self.raw, self.raw.get_by_rank(rank), rank + 1))
    }
}

impl<T: Ord> AvlSet<T> {
    /// Returns a cursor at the first element that is not less than `value`,
    /// or at the end position if every element is less.
    ///
    /// The cursor's [`rank`](Cursor::rank) is the number of elements strictly
    /// less than `value`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    ///
    /// let cursor = set.lower_bound(&15);
    /// assert_eq!(cursor.key(), Some(&20));
    /// assert_eq!(cursor.rank(), 1);
    ///
    /// assert_eq!(set.lower_bound(&20).key(), Some(&20));
    /// assert_eq!(set.lower_bound(&31), set.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn lower_bound<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.raw.lower_bound(value) {
            Some((handle, rank)) => Cursor::new(&self.raw, Some(handle), rank + 1),
            None => self.end(),
        }
    }

    /// Returns a cursor at the element equal to `value`, or at the end
    /// position if there is none.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 3]);
    /// assert_eq!(set.find(&3).key(), Some(&3));
    /// assert_eq!(set.find(&2), set.end());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn find<Q>(&self, value: &Q) -> Cursor<'_, T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        match self.raw.search(value) {
            Some((handle, rank)) => Cursor::new(&self.raw, Some(handle), rank + 1),
            None => self.end(),
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn scenario() -> AvlSet<i32> {
        let mut set = AvlSet::new();
        for value in [4, 2, 6, 1, 3, 5, 7] {
            set.insert(value);
        }
        set
    }

    #[test]
    fn stepping_past_either_end_is_clamped() {
        let set = scenario();

        let mut cursor = set.end();
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor, set.end());
        assert_eq!(cursor.rank(), 7);

        let mut cursor = set.begin();
        cursor.move_prev();
        assert_eq!(cursor, set.begin());
        assert_eq!(cursor.key(), Some(&1));
    }

    #[test]
    fn end_steps_back_to_maximum_then_walks_down() {
        let set = scenario();
        let mut cursor = set.end();
        let mut seen = Vec::new();
        while cursor != set.begin() {
            cursor.move_prev();
            seen.push(*cursor.key().unwrap());
        }
        assert_eq!(seen, [7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn round_trip_from_middle() {
        let set = scenario();
        let mut cursor = set.find(&4);
        for _ in 0..10 {
            cursor.move_next();
        }
        assert!(cursor.is_end());
        for _ in 0..3 {
            cursor.move_prev();
        }
        assert_eq!(cursor.key(), Some(&5));
        assert_eq!(cursor.rank(), 4);
    }

    #[test]
    fn post_forms_return_previous_position() {
        let set = scenario();
        let mut cursor = set.find(&7);
        let before = cursor.fetch_next();
        assert_eq!(before.key(), Some(&7));
        assert!(cursor.is_end());

        let before = cursor.fetch_prev();
        assert!(before.is_end());
        assert_eq!(cursor.key(), Some(&7));
    }

    #[test]
    fn empty_set_cursor() {
        let set: AvlSet<i32> = AvlSet::new();
        let mut cursor = set.begin();
        assert_eq!(cursor, set.end());
        assert!(cursor.is_end());
        assert_eq!(cursor.try_key(), Err(Error::PastTheEnd { len: 0 }));
        cursor.move_next();
        cursor.move_prev();
        assert_eq!(cursor, set.end());
        assert_eq!(set.find(&3), set.end());
        assert_eq!(set.lower_bound(&3), set.end());
    }

    #[test]
    fn cursors_of_different_sets_differ() {
        let a = scenario();
        let b = scenario();
        assert_ne!(a.begin(), b.begin());
        assert_eq!(a.begin().key(), b.begin().key());
    }
}
