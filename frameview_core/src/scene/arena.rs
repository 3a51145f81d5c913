// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational slot storage for frames and objects.

use alloc::vec::Vec;
use core::marker::PhantomData;

use super::id::ArenaId;

/// Slot storage addressed by generational handles.
///
/// Removed slots go on a free list and are reused with a bumped generation,
/// so stale handles resolve to `None` instead of a newer value.
#[derive(Debug)]
pub(crate) struct Arena<I, T> {
    slots: Vec<Option<T>>,
    generation: Vec<u32>,
    free_list: Vec<u32>,
    live: usize,
    _id: PhantomData<I>,
}

impl<I: ArenaId, T> Default for Arena<I, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: ArenaId, T> Arena<I, T> {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            live: 0,
            _id: PhantomData,
        }
    }

    pub(crate) fn insert(&mut self, value: T) -> I {
        self.live += 1;
        if let Some(idx) = self.free_list.pop() {
            let i = idx as usize;
            self.generation[i] = self.generation[i].wrapping_add(1);
            self.slots[i] = Some(value);
            return I::from_raw(idx, self.generation[i]);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or(u32::MAX);
        self.slots.push(Some(value));
        self.generation.push(0);
        I::from_raw(idx, 0)
    }

    #[inline]
    pub(crate) fn contains(&self, id: I) -> bool {
        self.get(id).is_some()
    }

    pub(crate) fn get(&self, id: I) -> Option<&T> {
        let i = id.idx() as usize;
        if self.generation.get(i).copied() != Some(id.generation()) {
            return None;
        }
        self.slots[i].as_ref()
    }

    pub(crate) fn get_mut(&mut self, id: I) -> Option<&mut T> {
        let i = id.idx() as usize;
        if self.generation.get(i).copied() != Some(id.generation()) {
            return None;
        }
        self.slots[i].as_mut()
    }

    pub(crate) fn remove(&mut self, id: I) -> Option<T> {
        let i = id.idx() as usize;
        if self.generation.get(i).copied() != Some(id.generation()) {
            return None;
        }
        let value = self.slots[i].take()?;
        self.free_list.push(id.idx());
        self.live -= 1;
        Some(value)
    }

    /// Number of live values.
    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.live
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (I, &T)> {
        self.slots
            .iter()
            .zip(&self.generation)
            .enumerate()
            .filter_map(|(i, (slot, generation))| {
                let value = slot.as_ref()?;
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "arena slot count never exceeds u32::MAX"
                )]
                let idx = i as u32;
                Some((I::from_raw(idx, *generation), value))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::id::FrameId;

    #[test]
    fn insert_get_remove() {
        let mut arena: Arena<FrameId, &str> = Arena::new();
        let a = arena.insert("a");
        let b = arena.insert("b");
        assert_eq!(arena.len(), 2);
        assert_eq!(arena.get(a), Some(&"a"));
        assert_eq!(arena.remove(a), Some("a"));
        assert_eq!(arena.remove(a), None);
        assert!(!arena.contains(a));
        assert!(arena.contains(b));
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn reused_slot_rejects_stale_handle() {
        let mut arena: Arena<FrameId, u32> = Arena::new();
        let a = arena.insert(1);
        arena.remove(a);
        let b = arena.insert(2);
        assert_eq!(a.index(), b.index(), "slot should be recycled");
        assert_ne!(a.generation(), b.generation());
        assert_eq!(arena.get(a), None);
        assert_eq!(arena.get(b), Some(&2));
    }

    #[test]
    fn iter_skips_free_slots() {
        let mut arena: Arena<FrameId, u32> = Arena::new();
        let a = arena.insert(1);
        let _b = arena.insert(2);
        arena.remove(a);
        let values: alloc::vec::Vec<u32> = arena.iter().map(|(_, v)| *v).collect();
        assert_eq!(values, [2]);
    }
}
