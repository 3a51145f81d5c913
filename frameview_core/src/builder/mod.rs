// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The mutation surface driven by command streams.
//!
//! [`Builder`] has one method per command. Decoders (binary and text) call
//! it; implementations either apply the command to a scene graph
//! ([`BuilderDirect`]) or re-encode it ([`Encoder`](crate::protocol::Encoder)).
//!
//! Every method reports success as a `bool`. A `false` means this one
//! command was ignored; callers keep going with the next one.

mod direct;

pub use direct::BuilderDirect;

use kurbo::{Circle, Line, Point};

use crate::color::Rgb;
use crate::geometry::{Angle, Area2d, CircleArc};
use crate::scene::Key;

/// Where a new object goes and how it looks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Key of the frame receiving the object.
    pub parent: Key,
    /// Object key, unique within `parent` unless `0`.
    pub key: Key,
    /// Draw-order layer among the parent's children.
    pub layer: i32,
    /// Drawing color.
    pub color: Rgb,
}

impl Placement {
    /// Creates a placement.
    #[must_use]
    pub const fn new(parent: Key, key: Key, layer: i32, color: Rgb) -> Self {
        Self {
            parent,
            key,
            layer,
            color,
        }
    }
}

/// Receives decoded commands.
///
/// The three viewer-level operations at the end have no wire opcode and
/// default to `false`.
pub trait Builder {
    // -- Frames --

    /// Inserts frame `key` into `parent`, placed at `pos` and turned by `angle`.
    fn insert_frame(&mut self, parent: Key, key: Key, pos: Point, angle: Angle, layer: i32) -> bool;

    // -- Objects --

    /// Inserts a point.
    fn insert_point(&mut self, at: Placement, point: Point) -> bool;
    /// Inserts a point set.
    fn insert_points(&mut self, at: Placement, points: &[Point]) -> bool;
    /// Inserts a segment.
    fn insert_line(&mut self, at: Placement, line: Line) -> bool;
    /// Inserts a segment set.
    fn insert_lines(&mut self, at: Placement, lines: &[Line]) -> bool;
    /// Inserts a circle outline.
    fn insert_circle(&mut self, at: Placement, circle: Circle) -> bool;
    /// Inserts a set of circle outlines.
    fn insert_circles(&mut self, at: Placement, circles: &[Circle]) -> bool;
    /// Inserts a filled circle.
    fn insert_f_circle(&mut self, at: Placement, circle: Circle) -> bool;
    /// Inserts a set of filled circles.
    fn insert_f_circles(&mut self, at: Placement, circles: &[Circle]) -> bool;
    /// Inserts an arc outline.
    fn insert_arc(&mut self, at: Placement, arc: CircleArc) -> bool;
    /// Inserts a set of arc outlines.
    fn insert_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool;
    /// Inserts a filled arc.
    fn insert_f_arc(&mut self, at: Placement, arc: CircleArc) -> bool;
    /// Inserts a set of filled arcs.
    fn insert_f_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool;
    /// Inserts an open polyline.
    fn insert_polyline(&mut self, at: Placement, vertices: &[Point]) -> bool;
    /// Inserts a polygon outline.
    fn insert_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool;
    /// Inserts a filled polygon.
    fn insert_f_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool;
    /// Inserts a text label anchored at `pos`.
    fn insert_string(&mut self, at: Placement, pos: Point, text: &str) -> bool;

    // -- Object properties --

    /// Shows or hides object `obj` of `frame`.
    fn set_object_visible(&mut self, frame: Key, obj: Key, visible: bool) -> bool;
    /// Re-layers object `obj` of `frame`.
    fn set_object_layer(&mut self, frame: Key, obj: Key, layer: i32) -> bool;
    /// Recolors object `obj` of `frame`.
    fn set_object_color(&mut self, frame: Key, obj: Key, color: Rgb) -> bool;

    // -- Frame properties --

    /// Shows or hides a frame with its subtree.
    fn set_frame_visible(&mut self, key: Key, visible: bool) -> bool;
    /// Re-layers a frame.
    fn set_frame_layer(&mut self, key: Key, layer: i32) -> bool;
    /// Moves a frame within its parent.
    fn set_frame_pos(&mut self, key: Key, pos: Point) -> bool;
    /// Turns a frame within its parent.
    fn set_frame_angle(&mut self, key: Key, angle: Angle) -> bool;
    /// Moves and turns a frame.
    fn set_frame_pos_angle(&mut self, key: Key, pos: Point, angle: Angle) -> bool;
    /// Rescales a frame.
    fn set_frame_scale(&mut self, key: Key, scale: f64) -> bool {
        _ = (key, scale);
        false
    }

    // -- Removal --

    /// Removes a frame with its subtree.
    fn remove_frame(&mut self, key: Key) -> bool;
    /// Removes object `obj` of `frame`, or its direct sub-frame `obj`.
    fn remove_object(&mut self, frame: Key, obj: Key) -> bool;
    /// Removes every child of a frame.
    fn empty_frame(&mut self, key: Key) -> bool;

    // -- Viewer --

    /// Changes the visible area.
    fn set_view_area(&mut self, area: &Area2d) -> bool {
        _ = area;
        false
    }

    /// Replaces the status line text.
    fn set_status_line(&mut self, text: &str) -> bool {
        _ = text;
        false
    }

    /// Changes the background color.
    fn set_background_color(&mut self, color: Rgb) -> bool {
        _ = color;
        false
    }
}
