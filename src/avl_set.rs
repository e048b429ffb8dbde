use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::FusedIterator;

use crate::raw::{Handle, RawAvlTree};

mod capacity;
mod cursor;
mod order_statistic;

pub use cursor::Cursor;

/// An ordered set based on an AVL tree augmented with subtree sizes.
///
/// Lookups, insertion and removal take O(log n). Because every node also
/// records how many keys its subtree holds, the position of a value
/// ([`rank_of`]) and the value at a position ([`get_by_rank`]) are O(log n)
/// as well.
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set. This is
/// normally only possible through [`Cell`], [`RefCell`], global state, I/O, or unsafe code.
/// The behavior resulting from such a logic error is not specified, but will be encapsulated to the
/// `AvlSet` that observed the logic error and not result in undefined behavior.
///
/// Iterators returned by [`AvlSet::iter`] and [`AvlSet::into_iter`] produce their items in
/// order. Positional access is also available through [`Cursor`]s returned by
/// [`begin`], [`end`], [`find`] and [`lower_bound`].
///
/// [`Cell`]: core::cell::Cell
/// [`RefCell`]: core::cell::RefCell
/// [`rank_of`]: AvlSet::rank_of
/// [`get_by_rank`]: AvlSet::get_by_rank
/// [`begin`]: AvlSet::begin
/// [`end`]: AvlSet::end
/// [`find`]: AvlSet::find
/// [`lower_bound`]: AvlSet::lower_bound
///
/// # Examples
///
/// ```
/// use avl_ost::AvlSet;
///
/// let mut books = AvlSet::new();
///
/// books.insert("A Dance With Dragons");
/// books.insert("To Kill a Mockingbird");
/// books.insert("The Odyssey");
/// books.insert("The Great Gatsby");
///
/// if !books.contains("The Winds of Winter") {
///     println!("We have {} books, but The Winds of Winter ain't one.",
///              books.len());
/// }
///
/// books.remove("The Odyssey");
///
/// for book in &books {
///     println!("{book}");
/// }
/// ```
///
/// A `AvlSet` with a known list of items can be initialized from an array:
///
/// ```
/// use avl_ost::AvlSet;
///
/// let set = AvlSet::from([1, 2, 3]);
/// ```
pub struct AvlSet<T> {
    raw: RawAvlTree<T>,
}

/// An iterator over the items of a `AvlSet`.
///
/// This `struct` is created by the [`iter`] method on [`AvlSet`].
///
/// # Examples
///
/// ```
/// use avl_ost::AvlSet;
///
/// let set = AvlSet::from([3, 1, 2]);
/// let mut iter = set.iter();
/// assert_eq!(iter.next(), Some(&1));
/// assert_eq!(iter.next_back(), Some(&3));
/// assert_eq!(iter.next(), Some(&2));
/// assert_eq!(iter.next(), None);
/// ```
///
/// [`iter`]: AvlSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    tree: &'a RawAvlTree<T>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the items of a `AvlSet` in ascending order.
///
/// This `struct` is created by the [`into_iter`] method on [`AvlSet`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: AvlSet#method.into_iter
pub struct IntoIter<T> {
    inner: alloc::vec::IntoIter<T>,
}

impl<T> AvlSet<T> {
    /// Makes a new, empty `AvlSet`. Does not allocate.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// set.insert(1);
    /// ```
    #[must_use]
    pub const fn new() -> AvlSet<T> {
        AvlSet {
            raw: RawAvlTree::new(),
        }
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut v = AvlSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the set contains no elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut v = AvlSet::new();
    /// assert!(v.is_empty());
    /// v.insert(1);
    /// assert!(!v.is_empty());
    /// ```
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut v = AvlSet::from([1, 2]);
    /// v.clear();
    /// assert!(v.is_empty());
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n)
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator that visits the elements in the `AvlSet` in ascending
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([3, 1, 2]);
    /// let mut set_iter = set.iter();
    /// assert_eq!(set_iter.next(), Some(&1));
    /// assert_eq!(set_iter.next(), Some(&2));
    /// assert_eq!(set_iter.next(), Some(&3));
    /// assert_eq!(set_iter.next(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n) to create; a full traversal is O(n).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            tree: &self.raw,
            front: self.raw.first(),
            back: self.raw.last(),
            remaining: self.raw.len(),
        }
    }

    /// Returns the first element in the set, if any. This is the minimum.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    /// assert_eq!(set.first(), None);
    /// set.insert(2);
    /// set.insert(1);
    /// assert_eq!(set.first(), Some(&1));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.raw.first().map(|handle| self.raw.node(handle).key())
    }

    /// Returns the last element in the set, if any. This is the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 3, 2]);
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.raw.last().map(|handle| self.raw.node(handle).key())
    }

    /// Removes the first element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2]);
    /// assert_eq!(set.pop_first(), Some(1));
    /// assert_eq!(set.pop_first(), Some(2));
    /// assert_eq!(set.pop_first(), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_first(&mut self) -> Option<T> {
        self.raw.pop_first()
    }

    /// Removes the last element from the set and returns it, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2]);
    /// assert_eq!(set.pop_last(), Some(2));
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn pop_last(&mut self) -> Option<T> {
        self.raw.pop_last()
    }

    /// Retains only the elements specified by the predicate.
    ///
    /// The elements are visited in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2, 3, 4, 5, 6]);
    /// set.retain(|&k| k % 2 == 0);
    /// assert!(set.iter().eq([2, 4, 6].iter()));
    /// ```
    ///
    /// # Complexity
    ///
    /// O(n). The survivors are rebuilt into a balanced tree in one pass.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> bool,
    {
        let kept: Vec<T> = self.raw.drain_to_vec().into_iter().filter(|value| f(value)).collect();
        self.raw.rebuild_from_sorted(kept);
    }
}

impl<T: Ord> AvlSet<T> {
    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If the set already held an
    /// equal value, the set is left untouched and the argument is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, value: T) -> bool {
        self.raw.insert(value)
    }

    /// If the set contains an element equal to the value, removes it from the
    /// set and drops it. Returns whether such an element was present.
    ///
    /// Removing an absent value is a no-op.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::new();
    ///
    /// set.insert(2);
    /// assert_eq!(set.remove(&2), true);
    /// assert_eq!(set.remove(&2), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value).is_some()
    }

    /// Removes and returns the element in the set, if any, that is equal to
    /// the value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let mut set = AvlSet::from([1, 2, 3]);
    /// assert_eq!(set.take(&2), Some(2));
    /// assert_eq!(set.take(&2), None);
    /// ```
    pub fn take<Q>(&mut self, value: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.remove(value)
    }

    /// Returns `true` if the set contains a value.
    ///
    /// The value may be any borrowed form of the set's element type, but the
    /// ordering on the borrowed form *must* match the ordering on the
    /// element type.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3]);
    /// assert_eq!(set.contains(&1), true);
    /// assert_eq!(set.contains(&4), false);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).is_some()
    }

    /// Returns a reference to the value in the set, if any, that is equal to the given value.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3]);
    /// assert_eq!(set.get(&2), Some(&2));
    /// assert_eq!(set.get(&4), None);
    /// ```
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).map(|(handle, _)| self.raw.node(handle).key())
    }
}

impl<T: Clone> Clone for AvlSet<T> {
    /// Deep-copies the tree; the copy shares no nodes with `self`.
    fn clone(&self) -> Self {
        AvlSet {
            raw: self.raw.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<T: Hash> Hash for AvlSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_usize(self.len());
        for elt in self {
            elt.hash(state);
        }
    }
}

impl<T: PartialEq> PartialEq for AvlSet<T> {
    fn eq(&self, other: &AvlSet<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for AvlSet<T> {}

impl<T: PartialOrd> PartialOrd for AvlSet<T> {
    fn partial_cmp(&self, other: &AvlSet<T>) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for AvlSet<T> {
    fn cmp(&self, other: &AvlSet<T>) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: fmt::Debug> fmt::Debug for AvlSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for AvlSet<T> {
    fn default() -> Self {
        AvlSet::new()
    }
}

impl<T: Ord> FromIterator<T> for AvlSet<T> {
    /// Collects into a sorted, deduplicated buffer and builds the tree from it
    /// in one pass. Of several equal items the first one is kept, as repeated
    /// [`insert`](AvlSet::insert) would.
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut values: Vec<T> = iter.into_iter().collect();
        values.sort();
        values.dedup();

        let mut set = AvlSet::new();
        set.raw.rebuild_from_sorted(values);
        set
    }
}

impl<T: Ord> Extend<T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for AvlSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for &value in iter {
            self.insert(value);
        }
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for AvlSet<T> {
    /// Converts a `[T; N]` into a `AvlSet<T>`.
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set1 = AvlSet::from([1, 2, 3, 4]);
    /// let set2: AvlSet<_> = [1, 2, 3, 4].into();
    /// assert_eq!(set1, set2);
    /// ```
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<T> IntoIterator for AvlSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    /// Gets an iterator for moving out the `AvlSet`'s contents in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([1, 2, 3, 4]);
    ///
    /// let v: Vec<_> = set.into_iter().collect();
    /// assert_eq!(v, [1, 2, 3, 4]);
    /// ```
    fn into_iter(mut self) -> IntoIter<T> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<'a, T> IntoIterator for &'a AvlSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.front?;
        self.remaining -= 1;
        self.front = self.tree.successor(handle);
        Some(self.tree.node(handle).key())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }

    fn last(mut self) -> Option<&'a T> {
        self.next_back()
    }
}

impl<'a, T> DoubleEndedIterator for Iter<'a, T> {
    fn next_back(&mut self) -> Option<&'a T> {
        if self.remaining == 0 {
            return None;
        }
        let handle = self.back?;
        self.remaining -= 1;
        self.back = self.tree.predecessor(handle);
        Some(self.tree.node(handle).key())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("IntoIter").field(&self.inner.as_slice()).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    fn next_back(&mut self) -> Option<T> {
        self.inner.next_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> Default for IntoIter<T> {
    fn default() -> Self {
        IntoIter {
            inner: Vec::new().into_iter(),
        }
    }
}
