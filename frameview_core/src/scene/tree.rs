// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The frame tree and its key-addressed mutation surface.

use alloc::vec::Vec;

use kurbo::{Point, Vec2};

use crate::color::Rgb;
use crate::display::DisplayHandle;
use crate::geometry::{Angle, Frame2d};

use super::arena::Arena;
use super::id::{FrameId, Key, ObjectId, ROOT_KEY};
use super::list::LayerList;
use super::object::VisualObject;
use super::registry::FrameMap;

/// Tuning knobs for a [`DrawTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TreeConfig {
    /// Frame keys in `0..direct_keys` resolve through a flat array.
    pub direct_keys: u32,
    /// Whether inserted objects are culled against the viewport.
    pub cull: bool,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            direct_keys: FrameMap::DEFAULT_DIRECT_KEYS,
            cull: true,
        }
    }
}

impl TreeConfig {
    /// A configuration that never culls, for backends that clip themselves.
    #[must_use]
    pub fn without_culling() -> Self {
        Self {
            cull: false,
            ..Self::default()
        }
    }
}

/// A node of the scene graph: a coordinate frame with children.
///
/// Sub-frames and objects live in two separate layer-ordered lists; the draw
/// traversal merges them by layer.
#[derive(Clone, Debug)]
pub struct DrawFrame {
    // -- Identity --
    pub(crate) key: Key,
    pub(crate) layer: i32,
    pub(crate) parent: Option<FrameId>,

    // -- Topology --
    pub(crate) frames: LayerList<FrameId>,
    pub(crate) objects: LayerList<ObjectId>,

    // -- Transforms --
    pub(crate) rel: Frame2d,
    pub(crate) abs: Frame2d,

    // -- State --
    pub(crate) visible: bool,
    pub(crate) changed: bool,
}

impl DrawFrame {
    fn new(key: Key, layer: i32, parent: Option<FrameId>, rel: Frame2d) -> Self {
        Self {
            key,
            layer,
            parent,
            frames: LayerList::new(),
            objects: LayerList::new(),
            rel,
            abs: rel,
            visible: true,
            changed: true,
        }
    }

    /// Returns the frame's key.
    #[inline]
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }

    /// Returns the draw-order layer among its siblings.
    #[inline]
    #[must_use]
    pub const fn layer(&self) -> i32 {
        self.layer
    }

    /// Returns the parent frame, or `None` for the root.
    #[inline]
    #[must_use]
    pub const fn parent(&self) -> Option<FrameId> {
        self.parent
    }

    /// Returns the transform relative to the parent.
    #[inline]
    #[must_use]
    pub const fn relative(&self) -> &Frame2d {
        &self.rel
    }

    /// Returns the world transform as of the last traversal.
    #[inline]
    #[must_use]
    pub const fn absolute(&self) -> &Frame2d {
        &self.abs
    }

    /// Returns `true` unless the frame (and so its subtree) is hidden.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` if the world transform is stale.
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the sub-frames in layer order.
    #[inline]
    #[must_use]
    pub const fn frames(&self) -> &LayerList<FrameId> {
        &self.frames
    }

    /// Returns the objects in layer order.
    #[inline]
    #[must_use]
    pub const fn objects(&self) -> &LayerList<ObjectId> {
        &self.objects
    }
}

/// A tree of frames and visual objects, addressed by key.
///
/// The tree owns every frame and object. Callers address frames by [`Key`]
/// and objects by `(frame key, object key)`; every mutation reports success
/// as a `bool` and leaves the tree untouched on failure.
#[derive(Debug)]
pub struct DrawTree {
    pub(crate) frames: Arena<FrameId, DrawFrame>,
    pub(crate) objects: Arena<ObjectId, VisualObject>,
    pub(crate) registry: FrameMap,
    pub(crate) root: FrameId,
    pub(crate) config: TreeConfig,
    pub(crate) released: Vec<DisplayHandle>,
    pub(crate) cycle: u64,
}

impl Default for DrawTree {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawTree {
    /// Creates a tree holding only the root frame.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Creates a tree holding only the root frame, with explicit tuning.
    #[must_use]
    pub fn with_config(config: TreeConfig) -> Self {
        let mut frames = Arena::new();
        let root = frames.insert(DrawFrame::new(ROOT_KEY, 0, None, Frame2d::IDENTITY));
        let mut registry = FrameMap::new(config.direct_keys);
        registry.insert(ROOT_KEY, root);
        Self {
            frames,
            objects: Arena::new(),
            registry,
            root,
            config,
            released: Vec::new(),
            cycle: 0,
        }
    }

    // -- Queries --

    /// Returns the active configuration.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Returns the root frame's handle.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> FrameId {
        self.root
    }

    /// Number of completed traversals.
    #[inline]
    #[must_use]
    pub const fn cycle(&self) -> u64 {
        self.cycle
    }

    /// Resolves a frame key to its handle.
    #[must_use]
    pub fn frame_id(&self, key: Key) -> Option<FrameId> {
        self.registry.get(key)
    }

    /// Returns the frame with `key`.
    #[must_use]
    pub fn frame(&self, key: Key) -> Option<&DrawFrame> {
        self.frames.get(self.registry.get(key)?)
    }

    /// Returns the frame behind a handle, if it is still alive.
    #[must_use]
    pub fn frame_by_id(&self, id: FrameId) -> Option<&DrawFrame> {
        self.frames.get(id)
    }

    /// Returns `true` if a frame with `key` exists.
    #[must_use]
    pub fn contains_frame(&self, key: Key) -> bool {
        self.registry.contains(key)
    }

    /// Number of frames, including the root.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Number of objects across all frames.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Returns every frame key in ascending order.
    #[must_use]
    pub fn frame_keys(&self) -> Vec<Key> {
        self.registry.keys()
    }

    /// Returns the object with key `obj` in frame `frame`.
    #[must_use]
    pub fn object(&self, frame: Key, obj: Key) -> Option<&VisualObject> {
        self.objects.get(self.object_id(frame, obj)?)
    }

    /// Returns the object behind a handle, if it is still alive.
    #[must_use]
    pub fn object_by_id(&self, id: ObjectId) -> Option<&VisualObject> {
        self.objects.get(id)
    }

    /// Mutable access to an object, for resize and culling changes.
    pub fn object_mut(&mut self, frame: Key, obj: Key) -> Option<&mut VisualObject> {
        let id = self.object_id(frame, obj)?;
        self.objects.get_mut(id)
    }

    fn object_id(&self, frame: Key, obj: Key) -> Option<ObjectId> {
        self.frame(frame)?.objects.get(obj)
    }

    /// Display handles waiting to be released on the next draw.
    #[must_use]
    pub fn pending_releases(&self) -> &[DisplayHandle] {
        &self.released
    }

    // -- Insertion --

    /// Inserts a frame placed at `pos` and turned by `angle` inside `parent`.
    ///
    /// Fails if `parent` does not exist or `key` is already registered
    /// (the root's key included).
    pub fn insert_frame(&mut self, parent: Key, key: Key, pos: Point, angle: Angle, layer: i32) -> bool {
        let Some(parent_id) = self.registry.get(parent) else {
            return false;
        };
        if self.registry.contains(key) {
            log::warn!("frame {key} already registered");
            return false;
        }
        let rel = Frame2d::from_pos_angle(pos, angle);
        let id = self.frames.insert(DrawFrame::new(key, layer, Some(parent_id), rel));
        let linked = self
            .frames
            .get_mut(parent_id)
            .is_some_and(|p| p.frames.insert(key, layer, id));
        if !linked {
            self.frames.remove(id);
            return false;
        }
        self.registry.insert(key, id)
    }

    /// Inserts an object into `parent`.
    ///
    /// Fails if `parent` does not exist or already holds an object with the
    /// same non-zero key.
    pub fn insert_object(&mut self, parent: Key, mut object: VisualObject) -> bool {
        let Some(parent_id) = self.registry.get(parent) else {
            return false;
        };
        let (key, layer) = (object.key(), object.layer());
        match self.frames.get(parent_id) {
            Some(p) if key == 0 || !p.objects.contains_key(key) => {}
            _ => return false,
        }
        if !self.config.cull {
            object.set_culling(false);
        }
        let id = self.objects.insert(object);
        match self.frames.get_mut(parent_id) {
            Some(p) => p.objects.insert(key, layer, id),
            None => false,
        }
    }

    // -- Removal --

    /// Removes a frame with all of its descendants and objects.
    ///
    /// Fails for the root and for unknown keys, so removing twice is a
    /// harmless no-op.
    pub fn remove_frame(&mut self, key: Key) -> bool {
        if key == ROOT_KEY {
            log::debug!("the root frame cannot be removed");
            return false;
        }
        let Some(id) = self.registry.get(key) else {
            return false;
        };
        self.detach(id);
        self.destroy_frame(id);
        true
    }

    /// Removes the object `obj` from `frame`; if there is none, removes the
    /// direct sub-frame `obj` instead.
    pub fn remove_object(&mut self, frame: Key, obj: Key) -> bool {
        let Some(frame_id) = self.registry.get(frame) else {
            return false;
        };
        let Some(f) = self.frames.get_mut(frame_id) else {
            return false;
        };
        if let Some(oid) = f.objects.remove_key(obj) {
            self.destroy_object(oid);
            return true;
        }
        if obj == ROOT_KEY {
            return false;
        }
        match f.frames.remove_key(obj) {
            Some(child) => {
                self.destroy_frame(child);
                true
            }
            None => false,
        }
    }

    /// Removes every sub-frame and object of `key`, keeping the frame.
    pub fn empty_frame(&mut self, key: Key) -> bool {
        let Some(id) = self.registry.get(key) else {
            return false;
        };
        let Some(f) = self.frames.get_mut(id) else {
            return false;
        };
        let objects = f.objects.remove_all();
        let frames = f.frames.remove_all();
        for e in objects {
            self.destroy_object(e.item);
        }
        for e in frames {
            self.destroy_frame(e.item);
        }
        true
    }

    fn detach(&mut self, id: FrameId) {
        let parent = self.frames.get(id).and_then(|f| f.parent);
        if let Some(p) = parent.and_then(|p| self.frames.get_mut(p)) {
            p.frames.remove_item(id);
        }
    }

    fn destroy_frame(&mut self, id: FrameId) {
        let Some(mut frame) = self.frames.remove(id) else {
            return;
        };
        self.registry.remove(frame.key);
        for e in frame.objects.remove_all() {
            self.destroy_object(e.item);
        }
        for e in frame.frames.remove_all() {
            self.destroy_frame(e.item);
        }
    }

    fn destroy_object(&mut self, id: ObjectId) {
        if let Some(handle) = self.objects.remove(id).and_then(|mut o| o.take_handle()) {
            self.released.push(handle);
        }
    }

    // -- Frame properties --

    fn update_frame(&mut self, key: Key, f: impl FnOnce(&mut DrawFrame)) -> bool {
        let Some(id) = self.registry.get(key) else {
            return false;
        };
        match self.frames.get_mut(id) {
            Some(frame) => {
                f(frame);
                true
            }
            None => false,
        }
    }

    /// Moves a frame within its parent.
    pub fn set_position(&mut self, key: Key, pos: Point) -> bool {
        self.update_frame(key, |f| {
            f.rel.set_position(pos);
            f.changed = true;
        })
    }

    /// Turns a frame to an absolute angle within its parent.
    pub fn set_angle(&mut self, key: Key, angle: Angle) -> bool {
        self.update_frame(key, |f| {
            f.rel.set_angle(angle);
            f.changed = true;
        })
    }

    /// Moves and turns a frame in one step.
    pub fn set_pos_angle(&mut self, key: Key, pos: Point, angle: Angle) -> bool {
        self.update_frame(key, |f| {
            f.rel.set_position(pos);
            f.rel.set_angle(angle);
            f.changed = true;
        })
    }

    /// Rescales a frame, keeping its rotation.
    pub fn set_scale(&mut self, key: Key, scale: f64) -> bool {
        self.update_frame(key, |f| {
            f.rel.set_scale(scale);
            f.changed = true;
        })
    }

    /// Turns a frame by `angle` about its own origin.
    pub fn rotate_frame(&mut self, key: Key, angle: Angle) -> bool {
        self.update_frame(key, |f| {
            f.rel = f.rel * Frame2d::rotation(angle);
            f.changed = true;
        })
    }

    /// Shifts a frame by `delta` in its parent's coordinates.
    pub fn translate_frame(&mut self, key: Key, delta: Vec2) -> bool {
        self.update_frame(key, |f| {
            f.rel = Frame2d::translation(delta.x, delta.y) * f.rel;
            f.changed = true;
        })
    }

    /// Shows or hides a frame and its subtree.
    pub fn set_visible(&mut self, key: Key, visible: bool) -> bool {
        self.update_frame(key, |f| {
            if visible && !f.visible {
                f.changed = true;
            }
            f.visible = visible;
        })
    }

    /// Re-layering an existing frame is not supported.
    ///
    /// Always returns `false`; the frame keeps its place among its siblings.
    pub fn set_layer(&mut self, key: Key, layer: i32) -> bool {
        if self.registry.contains(key) {
            log::debug!("cannot move frame {key} to layer {layer}: re-layering is not supported");
        }
        false
    }

    // -- Object properties --

    /// Recolors an object.
    pub fn set_object_color(&mut self, frame: Key, obj: Key, color: Rgb) -> bool {
        let Some(o) = self.object_mut(frame, obj) else {
            return false;
        };
        o.set_color(color);
        true
    }

    /// Shows or hides an object.
    pub fn set_object_visible(&mut self, frame: Key, obj: Key, visible: bool) -> bool {
        let Some(o) = self.object_mut(frame, obj) else {
            return false;
        };
        o.set_visible(visible);
        true
    }

    /// Re-layering an existing object is not supported.
    ///
    /// Always returns `false`, like [`set_layer`](Self::set_layer).
    pub fn set_object_layer(&mut self, frame: Key, obj: Key, layer: i32) -> bool {
        if self.object(frame, obj).is_some() {
            log::debug!("cannot move object {frame}/{obj} to layer {layer}: re-layering is not supported");
        }
        false
    }
}
