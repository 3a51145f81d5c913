// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Key-to-frame registry.

use alloc::vec;
use alloc::vec::Vec;

use hashbrown::HashMap;

use super::id::{FrameId, Key};

/// Maps frame keys to frame handles.
///
/// Keys in `0..direct_keys` resolve through a flat slot array; every other
/// key lives in a hash map. Protocol keys are usually small and sequential,
/// so most lookups never hash.
#[derive(Debug)]
pub struct FrameMap {
    direct: Vec<Option<FrameId>>,
    spill: HashMap<Key, FrameId>,
    len: usize,
}

impl FrameMap {
    /// Default size of the direct tier.
    pub const DEFAULT_DIRECT_KEYS: u32 = 100;

    /// Creates an empty registry with `direct_keys` direct slots.
    #[must_use]
    pub fn new(direct_keys: u32) -> Self {
        Self {
            direct: vec![None; direct_keys as usize],
            spill: HashMap::new(),
            len: 0,
        }
    }

    fn slot(&self, key: Key) -> Option<usize> {
        let i = usize::try_from(key).ok()?;
        (i < self.direct.len()).then_some(i)
    }

    /// Registers `id` under `key`.
    ///
    /// Returns `false`, leaving the registry unchanged, if the key is taken.
    pub fn insert(&mut self, key: Key, id: FrameId) -> bool {
        let inserted = match self.slot(key) {
            Some(i) if self.direct[i].is_none() => {
                self.direct[i] = Some(id);
                true
            }
            Some(_) => false,
            None => match self.spill.entry(key) {
                hashbrown::hash_map::Entry::Occupied(_) => false,
                hashbrown::hash_map::Entry::Vacant(v) => {
                    v.insert(id);
                    true
                }
            },
        };
        if inserted {
            self.len += 1;
        } else {
            log::warn!("frame {key} already registered");
        }
        inserted
    }

    /// Unregisters `key`, returning the handle it mapped to.
    pub fn remove(&mut self, key: Key) -> Option<FrameId> {
        let removed = match self.slot(key) {
            Some(i) => self.direct[i].take(),
            None => self.spill.remove(&key),
        };
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Looks up `key`.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<FrameId> {
        match self.slot(key) {
            Some(i) => self.direct[i],
            None => self.spill.get(&key).copied(),
        }
    }

    /// Returns `true` if `key` is registered.
    #[inline]
    #[must_use]
    pub fn contains(&self, key: Key) -> bool {
        self.get(key).is_some()
    }

    /// Number of registered keys.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if nothing is registered.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns all registered keys in ascending order.
    #[must_use]
    pub fn keys(&self) -> Vec<Key> {
        let mut keys: Vec<Key> = self
            .direct
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .filter_map(|(i, _)| Key::try_from(i).ok())
            .chain(self.spill.keys().copied())
            .collect();
        keys.sort_unstable();
        keys
    }
}

impl Default for FrameMap {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIRECT_KEYS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::id::ArenaId;

    fn id(i: u32) -> FrameId {
        FrameId::from_raw(i, 0)
    }

    #[test]
    fn direct_and_spill_keys() {
        let mut map = FrameMap::new(10);
        assert!(map.insert(3, id(1)));
        assert!(map.insert(1000, id(2)));
        assert!(map.insert(-5, id(3)));
        assert_eq!(map.get(3), Some(id(1)));
        assert_eq!(map.get(1000), Some(id(2)));
        assert_eq!(map.get(-5), Some(id(3)));
        assert_eq!(map.get(4), None);
        assert_eq!(map.len(), 3);
        assert_eq!(map.keys(), [-5, 3, 1000]);
    }

    #[test]
    fn duplicates_are_rejected_in_both_tiers() {
        let mut map = FrameMap::new(10);
        assert!(map.insert(3, id(1)));
        assert!(!map.insert(3, id(2)));
        assert!(map.insert(50, id(3)));
        assert!(!map.insert(50, id(4)));
        assert_eq!(map.get(3), Some(id(1)));
        assert_eq!(map.get(50), Some(id(3)));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut map = FrameMap::default();
        map.insert(7, id(1));
        map.insert(7000, id(2));
        assert_eq!(map.remove(7), Some(id(1)));
        assert_eq!(map.remove(7), None);
        assert_eq!(map.remove(7000), Some(id(2)));
        assert_eq!(map.remove(7000), None);
        assert!(map.is_empty());
    }

    #[test]
    fn zero_direct_slots_uses_map_only() {
        let mut map = FrameMap::new(0);
        assert!(map.insert(0, id(1)));
        assert_eq!(map.get(0), Some(id(1)));
    }
}
