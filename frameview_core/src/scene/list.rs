// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyed, layer-ordered child lists.

use alloc::vec::Vec;
use core::mem;

use super::id::{ANONYMOUS, Key};

/// One element of a [`LayerList`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Entry<T> {
    /// Caller-assigned key; [`ANONYMOUS`] may repeat.
    pub key: Key,
    /// Draw-order layer; lower layers come first.
    pub layer: i32,
    /// The stored handle.
    pub item: T,
}

/// A list kept in ascending layer order, with stable ties.
///
/// A new entry goes after every existing entry whose layer is less than or
/// equal to its own, so entries on the same layer keep insertion order.
/// Non-zero keys are unique; anonymous entries are not.
///
/// Frames use one list for sub-frames and another for objects.
#[derive(Clone, Debug)]
pub struct LayerList<T> {
    entries: Vec<Entry<T>>,
}

impl<T: Copy + PartialEq> Default for LayerList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Copy + PartialEq> LayerList<T> {
    /// Creates an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts `item` in layer order.
    ///
    /// Returns `false`, leaving the list unchanged, if `key` is non-zero and
    /// already present.
    pub fn insert(&mut self, key: Key, layer: i32, item: T) -> bool {
        if key != ANONYMOUS && self.contains_key(key) {
            return false;
        }
        let at = self.entries.partition_point(|e| e.layer <= layer);
        self.entries.insert(at, Entry { key, layer, item });
        true
    }

    /// Removes the entry holding `item`. Returns `false` if absent.
    pub fn remove_item(&mut self, item: T) -> bool {
        match self.entries.iter().position(|e| e.item == item) {
            Some(at) => {
                self.entries.remove(at);
                true
            }
            None => false,
        }
    }

    /// Removes the first entry with `key` and returns its item.
    ///
    /// Only meaningful for non-zero keys.
    pub fn remove_key(&mut self, key: Key) -> Option<T> {
        let at = self.entries.iter().position(|e| e.key == key)?;
        Some(self.entries.remove(at).item)
    }

    /// Empties the list, handing back every entry so the owner can destroy
    /// the items.
    #[must_use = "the removed items still need to be destroyed"]
    pub fn remove_all(&mut self) -> Vec<Entry<T>> {
        mem::take(&mut self.entries)
    }

    /// Returns the item of the first entry with `key`.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<T> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.item)
    }

    /// Returns `true` if some entry has `key`.
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }

    /// Returns the entry at position `i` in draw order.
    #[inline]
    #[must_use]
    pub fn entry(&self, i: usize) -> Option<&Entry<T>> {
        self.entries.get(i)
    }

    /// Iterates entries in draw order.
    pub fn iter(&self) -> core::slice::Iter<'_, Entry<T>> {
        self.entries.iter()
    }

    /// Number of entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a, T: Copy + PartialEq> IntoIterator for &'a LayerList<T> {
    type Item = &'a Entry<T>;
    type IntoIter = core::slice::Iter<'a, Entry<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
