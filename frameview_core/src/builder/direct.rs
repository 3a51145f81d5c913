// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Builder`] that applies commands to a [`DrawTree`].

use alloc::borrow::ToOwned;
use alloc::string::String;

use kurbo::{Circle, Line, Point};

use crate::color::Rgb;
use crate::display::Display;
use crate::geometry::{Angle, Area2d, CircleArc};
use crate::scene::{DrawStats, DrawTree, Key, Shape, VisualObject};
use crate::trace::Tracer;
use crate::viewport::{Viewport, ViewportHolder};

use super::{Builder, Placement};

/// Owns a scene graph and the viewer state that commands can change.
///
/// One decoding pass feeds commands in; one [`draw`](Self::draw) call
/// renders the result. A background color set between draws is handed to
/// the display at the start of the next draw.
#[derive(Debug, Default)]
pub struct BuilderDirect {
    tree: DrawTree,
    viewport: Viewport,
    status_line: String,
    background: Option<Rgb>,
}

impl BuilderDirect {
    /// Creates a builder over an empty tree and an empty viewport.
    ///
    /// The view area has zero size until a view-area command or
    /// [`Builder::set_view_area`] sets one, so culled objects
    /// are not drawn before then. Use [`with_tree`](Self::with_tree) to start
    /// with a visible area.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder over an existing tree, showing `area`.
    #[must_use]
    pub fn with_tree(tree: DrawTree, area: Area2d) -> Self {
        Self {
            tree,
            viewport: Viewport::new(area),
            ..Self::default()
        }
    }

    /// Returns the scene graph.
    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &DrawTree {
        &self.tree
    }

    /// Mutable access to the scene graph.
    #[inline]
    pub const fn tree_mut(&mut self) -> &mut DrawTree {
        &mut self.tree
    }

    /// Returns the viewport.
    #[inline]
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Mutable access to the viewport, e.g. to report a window resize.
    #[inline]
    pub const fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    /// Returns the current status line.
    #[must_use]
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    /// Returns a background color not yet handed to a display.
    #[must_use]
    pub const fn pending_background(&self) -> Option<Rgb> {
        self.background
    }

    /// Renders the tree through the viewport.
    pub fn draw(&mut self, display: &mut dyn Display) -> DrawStats {
        self.draw_traced(display, &mut Tracer::none())
    }

    /// Like [`draw`](Self::draw), reporting to `tracer`.
    pub fn draw_traced(&mut self, display: &mut dyn Display, tracer: &mut Tracer<'_>) -> DrawStats {
        if let Some(color) = self.background.take() {
            display.set_background_color(color);
        }
        let area = *self.viewport.area();
        self.tree.draw_traced(display, &area, tracer)
    }

    /// Consumes the builder, returning the tree.
    #[must_use]
    pub fn into_tree(self) -> DrawTree {
        self.tree
    }

    fn insert(&mut self, at: Placement, shape: Shape, filled: bool) -> bool {
        let kind = shape.kind();
        let obj = VisualObject::new(at.key, at.layer, at.color, shape).with_fill(filled);
        let ok = self.tree.insert_object(at.parent, obj);
        if !ok {
            log::debug!(
                "cannot insert {} {} into frame {}",
                kind.name(),
                at.key,
                at.parent
            );
        }
        ok
    }
}

fn checked(ok: bool, what: &str, key: Key) -> bool {
    if !ok {
        log::debug!("{what} {key} failed");
    }
    ok
}

impl Builder for BuilderDirect {
    fn insert_frame(&mut self, parent: Key, key: Key, pos: Point, angle: Angle, layer: i32) -> bool {
        let ok = self.tree.insert_frame(parent, key, pos, angle, layer);
        if !ok {
            log::debug!("cannot insert frame {key} into frame {parent}");
        }
        ok
    }

    fn insert_point(&mut self, at: Placement, point: Point) -> bool {
        self.insert(at, Shape::Point(point), false)
    }

    fn insert_points(&mut self, at: Placement, points: &[Point]) -> bool {
        self.insert(at, Shape::Points(points.to_vec()), false)
    }

    fn insert_line(&mut self, at: Placement, line: Line) -> bool {
        self.insert(at, Shape::Line(line), false)
    }

    fn insert_lines(&mut self, at: Placement, lines: &[Line]) -> bool {
        self.insert(at, Shape::Lines(lines.to_vec()), false)
    }

    fn insert_circle(&mut self, at: Placement, circle: Circle) -> bool {
        self.insert(at, Shape::Circle(circle), false)
    }

    fn insert_circles(&mut self, at: Placement, circles: &[Circle]) -> bool {
        self.insert(at, Shape::Circles(circles.to_vec()), false)
    }

    fn insert_f_circle(&mut self, at: Placement, circle: Circle) -> bool {
        self.insert(at, Shape::Circle(circle), true)
    }

    fn insert_f_circles(&mut self, at: Placement, circles: &[Circle]) -> bool {
        self.insert(at, Shape::Circles(circles.to_vec()), true)
    }

    fn insert_arc(&mut self, at: Placement, arc: CircleArc) -> bool {
        self.insert(at, Shape::Arc(arc), false)
    }

    fn insert_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool {
        self.insert(at, Shape::Arcs(arcs.to_vec()), false)
    }

    fn insert_f_arc(&mut self, at: Placement, arc: CircleArc) -> bool {
        self.insert(at, Shape::Arc(arc), true)
    }

    fn insert_f_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool {
        self.insert(at, Shape::Arcs(arcs.to_vec()), true)
    }

    fn insert_polyline(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.insert(at, Shape::Polyline(vertices.to_vec()), false)
    }

    fn insert_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.insert(at, Shape::Polygon(vertices.to_vec()), false)
    }

    fn insert_f_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.insert(at, Shape::Polygon(vertices.to_vec()), true)
    }

    fn insert_string(&mut self, at: Placement, pos: Point, text: &str) -> bool {
        self.insert(
            at,
            Shape::Text {
                pos,
                text: text.into(),
            },
            false,
        )
    }

    fn set_object_visible(&mut self, frame: Key, obj: Key, visible: bool) -> bool {
        checked(self.tree.set_object_visible(frame, obj, visible), "set_object_visible", obj)
    }

    fn set_object_layer(&mut self, frame: Key, obj: Key, layer: i32) -> bool {
        self.tree.set_object_layer(frame, obj, layer)
    }

    fn set_object_color(&mut self, frame: Key, obj: Key, color: Rgb) -> bool {
        checked(self.tree.set_object_color(frame, obj, color), "set_object_color", obj)
    }

    fn set_frame_visible(&mut self, key: Key, visible: bool) -> bool {
        checked(self.tree.set_visible(key, visible), "set_frame_visible", key)
    }

    fn set_frame_layer(&mut self, key: Key, layer: i32) -> bool {
        self.tree.set_layer(key, layer)
    }

    fn set_frame_pos(&mut self, key: Key, pos: Point) -> bool {
        checked(self.tree.set_position(key, pos), "set_frame_pos", key)
    }

    fn set_frame_angle(&mut self, key: Key, angle: Angle) -> bool {
        checked(self.tree.set_angle(key, angle), "set_frame_angle", key)
    }

    fn set_frame_pos_angle(&mut self, key: Key, pos: Point, angle: Angle) -> bool {
        checked(self.tree.set_pos_angle(key, pos, angle), "set_frame_pos_angle", key)
    }

    fn set_frame_scale(&mut self, key: Key, scale: f64) -> bool {
        checked(self.tree.set_scale(key, scale), "set_frame_scale", key)
    }

    fn remove_frame(&mut self, key: Key) -> bool {
        checked(self.tree.remove_frame(key), "remove_frame", key)
    }

    fn remove_object(&mut self, frame: Key, obj: Key) -> bool {
        checked(self.tree.remove_object(frame, obj), "remove_object", obj)
    }

    fn empty_frame(&mut self, key: Key) -> bool {
        checked(self.tree.empty_frame(key), "empty_frame", key)
    }

    fn set_view_area(&mut self, area: &Area2d) -> bool {
        self.viewport.set_area(area);
        true
    }

    fn set_status_line(&mut self, text: &str) -> bool {
        text.clone_into(&mut self.status_line);
        true
    }

    fn set_background_color(&mut self, color: Rgb) -> bool {
        self.background = Some(color);
        true
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;
    use crate::display::{DisplayHandle, DrawContext};
    use crate::scene::{ROOT_KEY, ShapeKind};

    #[derive(Default)]
    struct Canvas {
        next: u32,
        background: Vec<Rgb>,
        fills: Vec<ShapeKind>,
        outlines: Vec<ShapeKind>,
    }

    impl Display for Canvas {
        fn create(&mut self, _kind: ShapeKind, _len: usize) -> DisplayHandle {
            self.next += 1;
            DisplayHandle(self.next)
        }

        fn set_background_color(&mut self, color: Rgb) {
            self.background.push(color);
        }

        fn draw_circle(&mut self, _cx: &DrawContext, _circle: &Circle) {
            self.outlines.push(ShapeKind::Circle);
        }

        fn fill_circle(&mut self, _cx: &DrawContext, _circle: &Circle) {
            self.fills.push(ShapeKind::Circle);
        }

        fn fill_polygon(&mut self, _cx: &DrawContext, _vertices: &[Point]) {
            self.fills.push(ShapeKind::Polygon);
        }
    }

    fn builder() -> BuilderDirect {
        BuilderDirect::with_tree(DrawTree::new(), Area2d::new(Point::ZERO, 100.0, 100.0))
    }

    fn at(parent: Key, key: Key) -> Placement {
        Placement::new(parent, key, 0, Rgb::WHITE)
    }

    #[test]
    fn inserts_land_in_the_tree() {
        let mut b = builder();
        assert!(b.insert_frame(ROOT_KEY, 1, Point::new(1.0, 1.0), Angle::ZERO, 0));
        assert!(b.insert_circle(at(1, 1), Circle::new((0.0, 0.0), 1.0)));
        assert!(b.insert_string(at(1, 2), Point::ZERO, "ball"));
        assert!(!b.insert_point(at(9, 1), Point::ZERO), "missing frame");
        assert!(!b.insert_line(at(1, 1), Line::new((0.0, 0.0), (1.0, 1.0))), "duplicate key");
        assert_eq!(b.tree().object_count(), 2);
        assert_eq!(b.tree().object(1, 2).map(VisualObject::kind), Some(ShapeKind::Text));
    }

    #[test]
    fn filled_variants_fill() {
        let mut b = builder();
        b.insert_f_circle(at(ROOT_KEY, 1), Circle::new((0.0, 0.0), 1.0));
        b.insert_circle(at(ROOT_KEY, 2), Circle::new((0.0, 0.0), 1.0));
        let square = [
            Point::ZERO,
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ];
        b.insert_f_polygon(at(ROOT_KEY, 3), &square);
        let mut canvas = Canvas::default();
        b.draw(&mut canvas);
        assert_eq!(canvas.fills, [ShapeKind::Circle, ShapeKind::Polygon]);
        assert_eq!(canvas.outlines, [ShapeKind::Circle]);
    }

    #[test]
    fn background_is_applied_once() {
        let mut b = builder();
        assert!(b.set_background_color(Rgb::new(0, 128, 0)));
        assert_eq!(b.pending_background(), Some(Rgb::new(0, 128, 0)));
        let mut canvas = Canvas::default();
        b.draw(&mut canvas);
        b.draw(&mut canvas);
        assert_eq!(canvas.background, [Rgb::new(0, 128, 0)]);
        assert_eq!(b.pending_background(), None);
    }

    #[test]
    fn viewer_state() {
        let mut b = builder();
        assert!(b.set_status_line("half time"));
        assert_eq!(b.status_line(), "half time");
        let area = Area2d::new(Point::new(5.0, 5.0), 10.0, 10.0);
        assert!(b.set_view_area(&area));
        assert_eq!(b.viewport().area(), &area);
    }

    #[test]
    fn culled_until_a_view_area_is_set() {
        let mut b = BuilderDirect::new();
        assert!(b.viewport().area().is_empty());
        b.insert_point(at(ROOT_KEY, 1), Point::new(1.0, 1.0));
        let mut canvas = Canvas::default();
        let stats = b.draw(&mut canvas);
        assert_eq!(stats.objects_drawn, 0);
        assert_eq!(stats.objects_culled, 1);
        b.set_view_area(&Area2d::new(Point::ZERO, 10.0, 10.0));
        assert_eq!(b.draw(&mut canvas).objects_drawn, 1);
    }

    #[test]
    fn view_area_drives_culling() {
        let mut b = builder();
        b.insert_circle(at(ROOT_KEY, 1), Circle::new((40.0, 0.0), 1.0));
        let mut canvas = Canvas::default();
        assert_eq!(b.draw(&mut canvas).objects_drawn, 1);
        b.set_view_area(&Area2d::new(Point::ZERO, 10.0, 10.0));
        let stats = b.draw(&mut canvas);
        assert_eq!(stats.objects_drawn, 0);
        assert_eq!(stats.objects_culled, 1);
    }

    #[test]
    fn frame_commands_report_missing_keys() {
        let mut b = builder();
        assert!(!b.set_frame_pos(4, Point::ZERO));
        assert!(!b.set_frame_angle(4, Angle::ZERO));
        assert!(!b.set_frame_pos_angle(4, Point::ZERO, Angle::ZERO));
        assert!(!b.set_frame_visible(4, true));
        assert!(!b.set_frame_scale(4, 1.0));
        assert!(!b.remove_frame(4));
        assert!(!b.empty_frame(4));
        assert!(!b.remove_object(4, 1));
        assert!(!b.set_frame_layer(ROOT_KEY, 3));
    }
}
