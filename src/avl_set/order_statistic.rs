use core::borrow::Borrow;
use core::ops::Index;

use super::AvlSet;
use crate::Rank;

impl<T> AvlSet<T> {
    /// Returns the value at position `rank` in sorted order.
    ///
    /// This is an order-statistic extension and is not part of the standard
    /// `BTreeSet` API.
    ///
    /// The rank is zero-based. Returns `None` if `rank` is out of bounds.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20, 30]);
    /// assert_eq!(set.get_by_rank(1), Some(&20));
    /// assert!(set.get_by_rank(3).is_none());
    /// ```
    #[must_use]
    pub fn get_by_rank(&self, rank: usize) -> Option<&T> {
        self.raw.get_by_rank(rank).map(|handle| self.raw.node(handle).key())
    }
}

impl<T: Ord> AvlSet<T> {
    /// Returns the zero-based rank of `value` in sorted order, or `None` if
    /// the value is not present.
    ///
    /// For a value that is absent, [`lower_bound`](AvlSet::lower_bound)
    /// reports the rank it would have.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlSet;
    ///
    /// let set = AvlSet::from([10, 20]);
    ///
    /// assert_eq!(set.rank_of(&20), Some(1));
    /// assert_eq!(set.rank_of(&15), None);
    /// assert_eq!(set.lower_bound(&15).rank(), 1);
    /// ```
    #[must_use]
    pub fn rank_of<Q>(&self, value: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.search(value).map(|(_, rank)| rank)
    }
}

/// Indexes into the set by rank.
///
/// # Panics
///
/// Panics if `rank` is out of bounds.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlSet, Rank};
///
/// let set = AvlSet::from([10, 20, 30]);
/// assert_eq!(set[Rank(1)], 20);
/// ```
impl<T> Index<Rank> for AvlSet<T> {
    type Output = T;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.get_by_rank(rank.0).expect("index out of bounds")
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn rank_and_select_agree() {
        let set: AvlSet<u32> = (0..100).map(|i| i * 3).collect();
        for rank in 0..set.len() {
            let value = set.get_by_rank(rank).unwrap();
            assert_eq!(set.rank_of(value), Some(rank));
        }
        assert_eq!(set.rank_of(&1), None);
        assert_eq!(set.get_by_rank(100), None);
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn index_past_the_end_panics() {
        let set = AvlSet::from([1, 2, 3]);
        let _ = set[Rank(3)];
    }
}
