use alloc::vec::Vec;

use super::handle::Handle;

enum Slot<T> {
    Occupied(T),
    // Vacant slots form a singly linked free list threaded through the vector.
    Vacant { next_free: Option<Handle> },
}

/// Handle-addressed storage for tree nodes.
///
/// Freed slots are recycled (most recently freed first) before the backing
/// vector grows, so a set that churns at a steady size does not reallocate.
pub(crate) struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<Handle>,
    len: usize,
}

impl<T> Arena<T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            len: 0,
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of occupied slots.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn alloc(&mut self, element: T) -> Handle {
        self.len += 1;
        if let Some(handle) = self.free_head {
            let slot = &mut self.slots[handle.index()];
            let Slot::Vacant { next_free } = *slot else {
                panic!("`Arena::alloc()` - free list points at an occupied slot!");
            };
            self.free_head = next_free;
            *slot = Slot::Occupied(element);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX_INDEX,
            "`Arena::alloc()` - arena is full ({} slots)",
            Handle::MAX_INDEX + 1
        );
        self.slots.push(Slot::Occupied(element));
        Handle::from_index(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &T {
        match &self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get()` - {handle:?} is vacant!"),
        }
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut T {
        match &mut self.slots[handle.index()] {
            Slot::Occupied(element) => element,
            Slot::Vacant { .. } => panic!("`Arena::get_mut()` - {handle:?} is vacant!"),
        }
    }

    /// Moves the element out and pushes its slot onto the free list.
    pub(crate) fn take(&mut self, handle: Handle) -> T {
        let slot = &mut self.slots[handle.index()];
        assert!(matches!(slot, Slot::Occupied(_)), "`Arena::take()` - {handle:?} is already vacant!");
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };
        let Slot::Occupied(element) = core::mem::replace(slot, vacant) else {
            unreachable!()
        };
        self.free_head = Some(handle);
        self.len -= 1;
        element
    }

    /// Drops every element. Keeps the allocation.
    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.len = 0;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn with_capacity_preallocates() {
        let arena: Arena<u32> = Arena::with_capacity(10);
        assert!(arena.capacity() >= 10);
        assert_eq!(arena.len(), 0);
    }

    #[test]
    fn freed_slots_are_reused_last_in_first_out() {
        let mut arena = Arena::new();
        let a = arena.alloc('a');
        let b = arena.alloc('b');
        let _c = arena.alloc('c');

        assert_eq!(arena.take(a), 'a');
        assert_eq!(arena.take(b), 'b');
        assert_eq!(arena.alloc('d'), b);
        assert_eq!(arena.alloc('e'), a);
        assert_eq!(arena.len(), 3);
        assert_eq!(*arena.get(a), 'e');
    }

    #[test]
    #[should_panic(expected = "is vacant!")]
    fn get_after_take_panics() {
        let mut arena = Arena::new();
        let h = arena.alloc(1u8);
        arena.take(h);
        let _ = arena.get(h);
    }

    #[test]
    #[should_panic(expected = "arena is full")]
    fn alloc_past_handle_range_panics() {
        let mut arena = Arena::new();
        for _ in 0..=Handle::MAX_INDEX + 1 {
            arena.alloc(());
        }
    }

    proptest! {
        #[test]
        fn arena_tracks_model(operations in prop::collection::vec(strategy(), 0..256)) {
            let mut model: Vec<(Handle, u32)> = Vec::new();
            let mut arena: Arena<u32> = Arena::new();

            for operation in operations {
                match operation {
                    Operation::Alloc(value) => {
                        let handle = arena.alloc(value);
                        prop_assert!(model.iter().all(|&(h, _)| h != handle), "handle {:?} handed out twice", handle);
                        model.push((handle, value));
                    }
                    Operation::Overwrite(which, value) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        *arena.get_mut(model[index].0) = value;
                        model[index].1 = value;
                    }
                    Operation::Take(which) => {
                        if model.is_empty() {
                            continue;
                        }
                        let index = which % model.len();
                        let (handle, expected) = model.swap_remove(index);
                        prop_assert_eq!(arena.take(handle), expected);
                    }
                    Operation::Clear => {
                        arena.clear();
                        model.clear();
                    }
                }

                prop_assert_eq!(arena.len(), model.len());
                for &(handle, value) in &model {
                    prop_assert_eq!(*arena.get(handle), value);
                }
            }
        }
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Alloc(u32),
        Overwrite(usize, u32),
        Take(usize),
        Clear,
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            20 => any::<u32>().prop_map(Operation::Alloc),
            5 => (any::<usize>(), any::<u32>()).prop_map(|(which, value)| Operation::Overwrite(which, value)),
            10 => any::<usize>().prop_map(Operation::Take),
            1 => Just(Operation::Clear),
        ]
    }
}
