use super::handle::Handle;

/// Which child link of a node a descent took.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single key of the tree together with its augmentation.
///
/// `height` and `size` describe the subtree rooted here and are only correct
/// after [`RawAvlTree`](super::RawAvlTree) re-derives them from the children.
pub(crate) struct Node<T> {
    key: T,
    // AVL height is below 1.45 * log2(n + 2), far inside u8 for any handle width.
    height: u8,
    size: usize,
    parent: Option<Handle>,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl<T> Node<T> {
    /// Creates a detached leaf.
    pub(crate) const fn leaf(key: T) -> Self {
        Self {
            key,
            height: 1,
            size: 1,
            parent: None,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &T {
        &self.key
    }

    pub(crate) fn into_key(self) -> T {
        self.key
    }

    #[inline]
    pub(crate) const fn height(&self) -> u8 {
        self.height
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    pub(crate) fn set_metrics(&mut self, height: u8, size: usize) {
        self.height = height;
        self.size = size;
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    pub(crate) fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Unlinks and returns the child on `side`.
    pub(crate) fn take_child(&mut self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left.take(),
            Side::Right => self.right.take(),
        }
    }
}
