use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::{debug, trace};
use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{Node, Side};

/// The core AVL tree backing `AvlSet`.
///
/// Every node lives in one arena; child and parent links are handles into it.
/// Each node carries the height and size of its subtree, which keeps the
/// balance checks local and makes rank queries O(log n).
pub(crate) struct RawAvlTree<T> {
    /// Arena storing all tree nodes.
    nodes: Arena<Node<T>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// One step of a root-to-leaf descent.
struct PathElement {
    /// Node we passed through.
    node: Handle,
    /// Child link we followed out of it.
    side: Side,
}

/// Descent stack. The inline capacity covers the tallest AVL tree a `u32`
/// handle space can hold, so it never spills.
type Path = SmallVec<[PathElement; 48]>;

impl<T> RawAvlTree<T> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of keys, read from the root's subtree size.
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Releases every node.
    pub(crate) fn clear(&mut self) {
        debug!("clearing tree of {} keys", self.len());
        self.nodes.clear();
        self.root = None;
    }

    /// Returns a reference to a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &Node<T> {
        self.nodes.get(handle)
    }

    #[inline]
    fn height_of(&self, link: Option<Handle>) -> u8 {
        link.map_or(0, |handle| self.nodes.get(handle).height())
    }

    #[inline]
    fn size_of(&self, link: Option<Handle>) -> usize {
        link.map_or(0, |handle| self.nodes.get(handle).size())
    }

    /// `height(right) - height(left)`.
    fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        i16::from(self.height_of(node.right())) - i16::from(self.height_of(node.left()))
    }

    /// Points both children back at `handle`, then re-derives its height and size.
    fn fix(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let size = 1 + self.size_of(left) + self.size_of(right);

        for child in [left, right].into_iter().flatten() {
            self.nodes.get_mut(child).set_parent(Some(handle));
        }
        self.nodes.get_mut(handle).set_metrics(height, size);
    }

    fn set_root(&mut self, root: Option<Handle>) {
        self.root = root;
        if let Some(root) = root {
            self.nodes.get_mut(root).set_parent(None);
        }
    }

    /// Lifts the child on `rising` above `handle` and returns it.
    fn rotate(&mut self, handle: Handle, rising: Side) -> Handle {
        let node = self.nodes.get(handle);
        let parent = node.parent();
        let pivot = node.child(rising).expect("`RawAvlTree::rotate()` - no child to rotate up!");

        let inner = self.nodes.get_mut(pivot).take_child(rising.opposite());
        self.nodes.get_mut(handle).set_child(rising, inner);
        let pivot_node = self.nodes.get_mut(pivot);
        pivot_node.set_child(rising.opposite(), Some(handle));
        pivot_node.set_parent(parent);

        // Child links first, then metrics bottom-up.
        self.fix(handle);
        self.fix(pivot);
        trace!("rotated {handle:?} {:?}, {pivot:?} now roots {} keys", rising.opposite(), self.nodes.get(pivot).size());
        pivot
    }

    /// Restores the AVL condition at `handle`, whose children are already
    /// balanced, and returns the root of the resulting subtree.
    fn balance(&mut self, handle: Handle) -> Handle {
        let heavy = match self.balance_factor(handle) {
            2 => Side::Right,
            -2 => Side::Left,
            _ => return handle,
        };

        let child = self.nodes.get(handle).child(heavy).expect("`RawAvlTree::balance()` - heavy side is empty!");
        let child_factor = self.balance_factor(child);
        let leans_inward = match heavy {
            Side::Right => child_factor < 0,
            Side::Left => child_factor > 0,
        };
        if leans_inward {
            let lifted = self.rotate(child, heavy.opposite());
            self.nodes.get_mut(handle).set_child(heavy, Some(lifted));
            self.fix(handle);
        }
        self.rotate(handle, heavy)
    }

    /// Re-links `subtree` under the last path element and rebalances every
    /// node on the way back up. Returns the new root of the path's top node.
    fn rebalance_path(&mut self, mut path: Path, mut subtree: Option<Handle>) -> Option<Handle> {
        while let Some(PathElement {
            node,
            side,
        }) = path.pop()
        {
            self.nodes.get_mut(node).set_child(side, subtree);
            self.fix(node);
            subtree = Some(self.balance(node));
        }
        subtree
    }

    /// Follows `side` links from `handle` as far as they go.
    fn extreme(&self, mut handle: Handle, side: Side) -> Handle {
        while let Some(child) = self.nodes.get(handle).child(side) {
            handle = child;
        }
        handle
    }

    /// Minimum node.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Left))
    }

    /// Maximum node.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.extreme(root, Side::Right))
    }

    /// Moves one step in key order: `Side::Right` for the successor,
    /// `Side::Left` for the predecessor. Uses parent links, no stack.
    fn step(&self, handle: Handle, side: Side) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(child) = node.child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        let mut from = handle;
        let mut parent = node.parent();
        while let Some(current) = parent {
            let current_node = self.nodes.get(current);
            if current_node.child(side.opposite()) == Some(from) {
                return Some(current);
            }
            from = current;
            parent = current_node.parent();
        }
        None
    }

    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Right)
    }

    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        self.step(handle, Side::Left)
    }

    /// Unlinks the extreme node on `side` of `subtree`, rebalancing the
    /// remainder. Returns the detached node and the remainder's root.
    fn detach_extreme(&mut self, subtree: Handle, side: Side) -> (Handle, Option<Handle>) {
        let mut path = Path::new();
        let mut current = subtree;
        while let Some(child) = self.nodes.get(current).child(side) {
            path.push(PathElement {
                node: current,
                side,
            });
            current = child;
        }

        let rest = self.nodes.get_mut(current).take_child(side.opposite());
        self.nodes.get_mut(current).set_parent(None);
        self.fix(current);
        (current, self.rebalance_path(path, rest))
    }

    /// Joins the orphaned children of a removed node, using the minimum of
    /// `right` as the new subtree root.
    fn splice(&mut self, left: Option<Handle>, right: Option<Handle>) -> Option<Handle> {
        let Some(right) = right else {
            return left;
        };

        let (min, rest) = self.detach_extreme(right, Side::Left);
        let node = self.nodes.get_mut(min);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, rest);
        self.fix(min);
        Some(self.balance(min))
    }

    fn pop_extreme(&mut self, side: Side) -> Option<T> {
        let (handle, rest) = self.detach_extreme(self.root?, side);
        self.set_root(rest);
        Some(self.nodes.take(handle).into_key())
    }

    /// Removes and returns the minimum key.
    pub(crate) fn pop_first(&mut self) -> Option<T> {
        self.pop_extreme(Side::Left)
    }

    /// Removes and returns the maximum key.
    pub(crate) fn pop_last(&mut self) -> Option<T> {
        self.pop_extreme(Side::Right)
    }

    /// Returns the node holding the key of zero-based `rank`.
    pub(crate) fn get_by_rank(&self, rank: usize) -> Option<Handle> {
        if rank >= self.len() {
            return None;
        }

        let mut current = self.root?;
        let mut remaining = rank;
        loop {
            let node = self.nodes.get(current);
            let left_size = self.size_of(node.left());
            match remaining.cmp(&left_size) {
                Less => current = node.left()?,
                Equal => return Some(current),
                Greater => {
                    remaining -= left_size + 1;
                    current = node.right()?;
                }
            }
        }
    }

    /// Moves every key out in ascending order, leaving the tree empty.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<T> {
        let len = self.nodes.len();
        debug!("draining {len} keys");

        let mut order = Vec::with_capacity(len);
        let mut current = self.first();
        while let Some(handle) = current {
            order.push(handle);
            current = self.successor(handle);
        }

        let keys = order.into_iter().map(|handle| self.nodes.take(handle).into_key()).collect();
        self.nodes.clear();
        self.root = None;
        keys
    }

    /// Replaces the contents with `keys`, which must be strictly ascending.
    /// Builds a size-balanced tree in O(n) without any rotation.
    pub(crate) fn rebuild_from_sorted(&mut self, keys: Vec<T>) {
        self.nodes.clear();
        let count = keys.len();
        let mut keys = keys.into_iter();
        let root = self.build_balanced(&mut keys, count);
        self.set_root(root);
    }

    fn build_balanced(&mut self, keys: &mut impl Iterator<Item = T>, count: usize) -> Option<Handle> {
        if count == 0 {
            return None;
        }

        let left_count = (count - 1) / 2;
        let left = self.build_balanced(keys, left_count);
        let key = keys.next().expect("`RawAvlTree::build_balanced()` - ran out of keys!");
        let handle = self.nodes.alloc(Node::leaf(key));
        let right = self.build_balanced(keys, count - 1 - left_count);

        let node = self.nodes.get_mut(handle);
        node.set_child(Side::Left, left);
        node.set_child(Side::Right, right);
        self.fix(handle);
        Some(handle)
    }
}

impl<T: Ord> RawAvlTree<T> {
    /// Inserts `key`. Returns `false`, leaving the tree untouched, if an equal
    /// key is already present.
    pub(crate) fn insert(&mut self, key: T) -> bool {
        let mut path = Path::new();
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match node.key().cmp(&key) {
                Less => Side::Right,
                Greater => Side::Left,
                Equal => return false,
            };
            path.push(PathElement {
                node: handle,
                side,
            });
            current = node.child(side);
        }

        let leaf = self.nodes.alloc(Node::leaf(key));
        let root = self.rebalance_path(path, Some(leaf));
        self.set_root(root);
        true
    }

    /// Removes the key equal to `key` and returns it.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> Option<T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut path = Path::new();
        let mut current = self.root;
        let target = loop {
            let handle = current?;
            let node = self.nodes.get(handle);
            let side = match node.key().borrow().cmp(key) {
                Less => Side::Right,
                Greater => Side::Left,
                Equal => break handle,
            };
            path.push(PathElement {
                node: handle,
                side,
            });
            current = node.child(side);
        };

        let removed = self.nodes.take(target);
        let replacement = self.splice(removed.left(), removed.right());
        let root = self.rebalance_path(path, replacement);
        self.set_root(root);
        Some(removed.into_key())
    }

    /// Finds the first key not less than `key`.
    ///
    /// Returns its node together with its zero-based rank, i.e. the number of
    /// keys strictly less than `key`. Moving right past a node accounts for the
    /// node and its whole left subtree.
    pub(crate) fn lower_bound<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut preceding = 0;
        let mut best = None;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let left_size = self.size_of(node.left());
            match node.key().borrow().cmp(key) {
                Less => {
                    preceding += left_size + 1;
                    current = node.right();
                }
                Greater => {
                    best = Some((handle, preceding + left_size));
                    current = node.left();
                }
                Equal => return Some((handle, preceding + left_size)),
            }
        }
        best
    }

    /// Finds the node holding a key equal to `key`, with its rank.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<(Handle, usize)>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.lower_bound(key).filter(|&(handle, _)| self.nodes.get(handle).key().borrow().cmp(key) == Equal)
    }
}

impl<T: Clone> RawAvlTree<T> {
    /// Preorder copy of the subtree at `handle` in `source` into `self`.
    fn clone_subtree(&mut self, source: &Self, handle: Handle) -> Handle {
        let node = source.nodes.get(handle);
        let copy = self.nodes.alloc(Node::leaf(node.key().clone()));
        let left = node.left().map(|left| self.clone_subtree(source, left));
        let right = node.right().map(|right| self.clone_subtree(source, right));

        let copy_node = self.nodes.get_mut(copy);
        copy_node.set_child(Side::Left, left);
        copy_node.set_child(Side::Right, right);
        self.fix(copy);
        copy
    }
}

impl<T: Clone> Clone for RawAvlTree<T> {
    fn clone(&self) -> Self {
        let mut tree = Self::with_capacity(self.len());
        tree.clone_from(self);
        tree
    }

    fn clone_from(&mut self, source: &Self) {
        debug!("deep-copying tree of {} keys", source.len());
        self.nodes.clear();
        let root = source.root.map(|root| self.clone_subtree(source, root));
        self.set_root(root);
    }
}
