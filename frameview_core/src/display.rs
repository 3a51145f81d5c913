// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for drawing visual objects.
//!
//! The scene graph never touches pixels. Each draw traversal hands every
//! visible, unculled object to a [`Display`] in world coordinates; the
//! backend owns the world-to-pixel mapping and whatever native resources it
//! keeps per object.
//!
//! # Handle lifecycle
//!
//! - An object asks for a [`DisplayHandle`] the first time it is drawn, via
//!   the `create_*` method for its kind, and reuses it on every later draw.
//! - When an object is destroyed, its handle is queued on the tree and passed
//!   to [`Display::release`] at the start of the next draw.
//! - [`DrawHints`] tell the backend what changed since the handle was last
//!   drawn, so unchanged geometry or colors need not be re-uploaded.

use core::fmt;

use kurbo::{Circle, Line, Point};

use crate::color::Rgb;
use crate::geometry::CircleArc;
use crate::scene::ShapeKind;

/// An opaque reference to backend-owned per-object state.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DisplayHandle(pub u32);

impl fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DisplayHandle({})", self.0)
    }
}

/// What changed on an object since its handle was last drawn.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct DrawHints {
    /// World geometry was recomputed.
    pub moved: bool,
    /// The color changed.
    pub recolored: bool,
    /// The number of elements changed.
    pub resized: bool,
}

impl DrawHints {
    /// Hints for a freshly created handle: everything is new.
    pub const FRESH: Self = Self {
        moved: true,
        recolored: true,
        resized: true,
    };
}

/// Per-call context shared by every draw and fill method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DrawContext {
    /// The handle created for this object.
    pub handle: DisplayHandle,
    /// Stroke or fill color.
    pub color: Rgb,
    /// Change hints since the previous draw of this handle.
    pub hints: DrawHints,
}

/// Turns world-space geometry into pixels.
///
/// Only [`create`](Self::create) is required. The `create_*` methods route
/// there by default, and every draw, fill and background method defaults to
/// a no-op, so a backend overrides just the primitives it can render.
///
/// # Draw cycle pseudocode
///
/// ```rust,ignore
/// fn on_stream(bytes: &[u8]) {
///     // Apply every pending command to the tree.
///     let report = protocol::decode_stream(bytes, &mut builder)?;
///
///     // One traversal: recompute dirty frames, cull, emit draw calls.
///     let stats = builder.draw(&mut display);
/// }
/// ```
pub trait Display {
    /// Allocates backend state for an object of `kind` with `len` elements.
    fn create(&mut self, kind: ShapeKind, len: usize) -> DisplayHandle;

    /// Frees the state behind a handle whose object was destroyed.
    fn release(&mut self, handle: DisplayHandle) {
        _ = handle;
    }

    /// Sets the color the whole view is cleared to.
    fn set_background_color(&mut self, color: Rgb) {
        _ = color;
    }

    // -- Creation --

    /// Allocates state for a single point.
    fn create_point(&mut self) -> DisplayHandle {
        self.create(ShapeKind::Point, 1)
    }

    /// Allocates state for `len` points.
    fn create_points(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Points, len)
    }

    /// Allocates state for a single segment.
    fn create_line(&mut self) -> DisplayHandle {
        self.create(ShapeKind::Line, 1)
    }

    /// Allocates state for `len` segments.
    fn create_lines(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Lines, len)
    }

    /// Allocates state for a single circle.
    fn create_circle(&mut self) -> DisplayHandle {
        self.create(ShapeKind::Circle, 1)
    }

    /// Allocates state for `len` circles.
    fn create_circles(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Circles, len)
    }

    /// Allocates state for a single arc.
    fn create_circlearc(&mut self) -> DisplayHandle {
        self.create(ShapeKind::Arc, 1)
    }

    /// Allocates state for `len` arcs.
    fn create_circlearcs(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Arcs, len)
    }

    /// Allocates state for a polyline with `len` vertices.
    fn create_polyline(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Polyline, len)
    }

    /// Allocates state for a polygon with `len` vertices.
    fn create_polygon(&mut self, len: usize) -> DisplayHandle {
        self.create(ShapeKind::Polygon, len)
    }

    /// Allocates state for a text label.
    fn create_string(&mut self) -> DisplayHandle {
        self.create(ShapeKind::Text, 1)
    }

    // -- Outlines --

    /// Draws a point.
    fn draw_point(&mut self, cx: &DrawContext, point: Point) {
        _ = (cx, point);
    }

    /// Draws a set of points.
    fn draw_points(&mut self, cx: &DrawContext, points: &[Point]) {
        _ = (cx, points);
    }

    /// Draws a segment.
    fn draw_line(&mut self, cx: &DrawContext, line: &Line) {
        _ = (cx, line);
    }

    /// Draws a set of segments.
    fn draw_lines(&mut self, cx: &DrawContext, lines: &[Line]) {
        _ = (cx, lines);
    }

    /// Draws a circle outline.
    fn draw_circle(&mut self, cx: &DrawContext, circle: &Circle) {
        _ = (cx, circle);
    }

    /// Draws a set of circle outlines.
    fn draw_circles(&mut self, cx: &DrawContext, circles: &[Circle]) {
        _ = (cx, circles);
    }

    /// Draws an arc outline; see [`CircleArc::span`] for the swept range.
    fn draw_circlearc(&mut self, cx: &DrawContext, arc: &CircleArc) {
        _ = (cx, arc);
    }

    /// Draws a set of arc outlines.
    fn draw_circlearcs(&mut self, cx: &DrawContext, arcs: &[CircleArc]) {
        _ = (cx, arcs);
    }

    /// Draws an open polyline.
    fn draw_polyline(&mut self, cx: &DrawContext, vertices: &[Point]) {
        _ = (cx, vertices);
    }

    /// Draws a closed polygon outline.
    fn draw_polygon(&mut self, cx: &DrawContext, vertices: &[Point]) {
        _ = (cx, vertices);
    }

    /// Draws a text label anchored at `pos`.
    fn draw_string(&mut self, cx: &DrawContext, pos: Point, text: &str) {
        _ = (cx, pos, text);
    }

    // -- Fills --

    /// Fills a disk.
    fn fill_circle(&mut self, cx: &DrawContext, circle: &Circle) {
        _ = (cx, circle);
    }

    /// Fills a set of disks.
    fn fill_circles(&mut self, cx: &DrawContext, circles: &[Circle]) {
        _ = (cx, circles);
    }

    /// Fills a pie slice.
    fn fill_circlearc(&mut self, cx: &DrawContext, arc: &CircleArc) {
        _ = (cx, arc);
    }

    /// Fills a set of pie slices.
    fn fill_circlearcs(&mut self, cx: &DrawContext, arcs: &[CircleArc]) {
        _ = (cx, arcs);
    }

    /// Fills a polygon.
    fn fill_polygon(&mut self, cx: &DrawContext, vertices: &[Point]) {
        _ = (cx, vertices);
    }
}
