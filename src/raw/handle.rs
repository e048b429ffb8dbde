use core::fmt;
use core::num::NonZero;

// Narrow handles under test so arena exhaustion is cheap to reach.
#[cfg(test)]
type RawHandle = u16;
#[cfg(not(test))]
type RawHandle = u32;

/// Index of a node slot in an [`Arena`](super::arena::Arena).
///
/// Stored off by one in a `NonZero` so that `Option<Handle>`, the type of every
/// child and parent link, costs nothing extra.
#[derive(Clone, Copy, Eq, PartialEq)]
#[repr(transparent)]
pub(crate) struct Handle(NonZero<RawHandle>);

impl Handle {
    /// Largest slot index a handle can address.
    pub(crate) const MAX_INDEX: usize = (RawHandle::MAX - 1) as usize;

    #[inline]
    pub(crate) const fn from_index(index: usize) -> Self {
        assert!(index <= Self::MAX_INDEX, "`Handle::from_index()` - `index` > `Handle::MAX_INDEX`!");
        #[allow(clippy::cast_possible_truncation)]
        let raw = (index + 1) as RawHandle;
        match NonZero::new(raw) {
            Some(raw) => Self(raw),
            None => unreachable!(),
        }
    }

    #[inline]
    pub(crate) const fn index(self) -> usize {
        (self.0.get() - 1) as usize
    }
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.index())
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;
    use static_assertions::assert_eq_size;

    // Links between nodes rely on the niche.
    assert_eq_size!(Handle, Option<Handle>);
    assert_eq_size!(Handle, RawHandle);

    #[test]
    #[should_panic(expected = "`Handle::from_index()` - `index` > `Handle::MAX_INDEX`!")]
    fn index_past_max_panics() {
        let _ = Handle::from_index(Handle::MAX_INDEX + 1);
    }

    #[test]
    fn debug_shows_slot_index() {
        assert_eq!(format!("{:?}", Handle::from_index(7)), "#7");
    }

    proptest! {
        #[test]
        fn index_survives_encoding(index in 0..=Handle::MAX_INDEX) {
            prop_assert_eq!(Handle::from_index(index).index(), index);
        }
    }
}
