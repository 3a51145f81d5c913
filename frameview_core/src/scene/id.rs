// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame, object and key identity types.

use core::fmt;

/// A caller-assigned identifier for a frame or an object.
///
/// Non-zero keys are unique within their registry (frames) or their owning
/// frame (objects). Zero marks anonymous objects, which may repeat.
pub type Key = i32;

/// The key of the implicit root frame.
pub const ROOT_KEY: Key = 0;

/// The key shared by all anonymous objects.
pub const ANONYMOUS: Key = 0;

/// Handle types stored in an [`Arena`](super::arena::Arena).
pub(crate) trait ArenaId: Copy {
    fn from_raw(idx: u32, generation: u32) -> Self;
    fn idx(self) -> u32;
    fn generation(self) -> u32;
}

macro_rules! arena_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name {
            /// Slot index into the arena.
            pub(crate) idx: u32,
            /// Generation counter; must match the arena's for this slot.
            pub(crate) generation: u32,
        }

        impl $name {
            /// Returns the raw slot index (for diagnostics only).
            #[inline]
            #[must_use]
            pub const fn index(self) -> u32 {
                self.idx
            }

            /// Returns the generation counter.
            #[inline]
            #[must_use]
            pub const fn generation(self) -> u32 {
                self.generation
            }
        }

        impl ArenaId for $name {
            #[inline]
            fn from_raw(idx: u32, generation: u32) -> Self {
                Self { idx, generation }
            }

            #[inline]
            fn idx(self) -> u32 {
                self.idx
            }

            #[inline]
            fn generation(self) -> u32 {
                self.generation
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!(stringify!($name), "({}@gen{})"), self.idx, self.generation)
            }
        }
    };
}

arena_id! {
    /// A handle to a frame inside a [`DrawTree`](super::DrawTree).
    ///
    /// Handles carry a generation so a handle kept past the frame's removal
    /// never resolves to a later frame that reused the slot.
    FrameId
}

arena_id! {
    /// A handle to a visual object inside a [`DrawTree`](super::DrawTree).
    ObjectId
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn debug_shows_slot_and_generation() {
        let id = FrameId::from_raw(3, 7);
        assert_eq!(format!("{id:?}"), "FrameId(3@gen7)");
        assert_eq!(id.index(), 3);
        assert_eq!(id.generation(), 7);
    }
}
