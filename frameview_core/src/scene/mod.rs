// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph data model.
//!
//! A *frame* is a node of the scene graph. Each frame has:
//!
//! - A caller-chosen [`Key`], unique across the whole tree, and an arena
//!   handle ([`FrameId`]) that becomes stale when the frame is removed.
//! - Topology: a parent, plus sub-frames and visual objects kept in two
//!   [`LayerList`]s ordered by layer.
//! - A **relative** transform set by the caller (position, angle, scale) and
//!   an **absolute** transform computed by the traversal as the product of
//!   all ancestor transforms.
//!
//! A [`VisualObject`] is a leaf carrying a [`Shape`]. Its key is unique
//! within its frame only; key `0` is anonymous and may repeat.
//!
//! # Change tracking
//!
//! Transform mutations set the frame's `changed` flag. The next traversal
//! recomputes that frame and its whole subtree exactly once, then clears the
//! flags. Unchanged subtrees keep their cached world geometry.

mod arena;
mod draw;
mod id;
mod list;
mod object;
mod registry;
mod tree;

pub use draw::DrawStats;
pub use id::{ANONYMOUS, FrameId, Key, ObjectId, ROOT_KEY};
pub use list::{Entry, LayerList};
pub use object::{Shape, ShapeKind, VisualObject};
pub use registry::FrameMap;
pub use tree::{DrawFrame, DrawTree, TreeConfig};
