// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Visual objects: the drawable leaves of the scene graph.
//!
//! Every object kind shares one implementation. An object keeps its
//! *relative* geometry (in its frame's coordinates, set by the caller) and
//! its *absolute* geometry (world coordinates, derived). The absolute copy is
//! recomputed only when the object or an ancestor frame changed, in place,
//! without reallocating.

use alloc::string::String;
use alloc::vec::Vec;
use core::mem;

use kurbo::{Circle, Line, Point};

use crate::color::Rgb;
use crate::display::{Display, DisplayHandle, DrawContext, DrawHints};
use crate::geometry::{Area2d, CircleArc, Frame2d, clamp_radius};

use super::id::Key;

/// The geometry kinds an object can carry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A single point.
    Point,
    /// A point set.
    Points,
    /// A single segment.
    Line,
    /// A segment set.
    Lines,
    /// A single circle.
    Circle,
    /// A circle set.
    Circles,
    /// A single arc.
    Arc,
    /// An arc set.
    Arcs,
    /// An open polyline.
    Polyline,
    /// A closed polygon.
    Polygon,
    /// A text label.
    Text,
}

impl ShapeKind {
    /// Every kind, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Point,
        Self::Points,
        Self::Line,
        Self::Lines,
        Self::Circle,
        Self::Circles,
        Self::Arc,
        Self::Arcs,
        Self::Polyline,
        Self::Polygon,
        Self::Text,
    ];

    /// Returns `true` for kinds that can be drawn filled.
    #[must_use]
    pub const fn is_fillable(self) -> bool {
        matches!(
            self,
            Self::Circle | Self::Circles | Self::Arc | Self::Arcs | Self::Polygon
        )
    }

    /// Returns a short lowercase name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Points => "points",
            Self::Line => "line",
            Self::Lines => "lines",
            Self::Circle => "circle",
            Self::Circles => "circles",
            Self::Arc => "arc",
            Self::Arcs => "arcs",
            Self::Polyline => "polyline",
            Self::Polygon => "polygon",
            Self::Text => "text",
        }
    }
}

/// Geometry of a visual object.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// A single point.
    Point(Point),
    /// A point set.
    Points(Vec<Point>),
    /// A single segment.
    Line(Line),
    /// A segment set.
    Lines(Vec<Line>),
    /// A single circle.
    Circle(Circle),
    /// A circle set.
    Circles(Vec<Circle>),
    /// A single arc.
    Arc(CircleArc),
    /// An arc set.
    Arcs(Vec<CircleArc>),
    /// An open polyline through the vertices.
    Polyline(Vec<Point>),
    /// A closed polygon through the vertices.
    Polygon(Vec<Point>),
    /// A text label anchored at `pos`.
    Text {
        /// Anchor point.
        pos: Point,
        /// Label contents.
        text: String,
    },
}

impl Shape {
    /// Returns the kind of this geometry.
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        match self {
            Self::Point(_) => ShapeKind::Point,
            Self::Points(_) => ShapeKind::Points,
            Self::Line(_) => ShapeKind::Line,
            Self::Lines(_) => ShapeKind::Lines,
            Self::Circle(_) => ShapeKind::Circle,
            Self::Circles(_) => ShapeKind::Circles,
            Self::Arc(_) => ShapeKind::Arc,
            Self::Arcs(_) => ShapeKind::Arcs,
            Self::Polyline(_) => ShapeKind::Polyline,
            Self::Polygon(_) => ShapeKind::Polygon,
            Self::Text { .. } => ShapeKind::Text,
        }
    }

    /// Number of elements (vertices, segments, circles or arcs).
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Point(_) | Self::Line(_) | Self::Circle(_) | Self::Arc(_) | Self::Text { .. } => 1,
            Self::Points(v) | Self::Polyline(v) | Self::Polygon(v) => v.len(),
            Self::Lines(v) => v.len(),
            Self::Circles(v) => v.len(),
            Self::Arcs(v) => v.len(),
        }
    }

    /// Returns `true` for a multi-element shape with no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clamps invalid radii to zero.
    fn sanitize(&mut self) {
        match self {
            Self::Circle(c) => c.radius = clamp_radius(c.radius),
            Self::Circles(cs) => cs.iter_mut().for_each(|c| c.radius = clamp_radius(c.radius)),
            Self::Arc(a) => a.radius = clamp_radius(a.radius),
            Self::Arcs(arcs) => arcs.iter_mut().for_each(|a| a.radius = clamp_radius(a.radius)),
            _ => {}
        }
    }

    /// Writes `frame` applied to `self` into `out`.
    ///
    /// `out` is only reallocated when its kind or length differs.
    fn transform_into(&self, frame: &Frame2d, out: &mut Self) {
        if mem::discriminant(self) != mem::discriminant(out) || self.len() != out.len() {
            *out = self.clone();
        }
        let f = *frame;
        match (self, out) {
            (Self::Point(p), Self::Point(o)) => *o = f * *p,
            (Self::Points(src), Self::Points(dst))
            | (Self::Polyline(src), Self::Polyline(dst))
            | (Self::Polygon(src), Self::Polygon(dst)) => {
                for (o, p) in dst.iter_mut().zip(src) {
                    *o = f * *p;
                }
            }
            (Self::Line(l), Self::Line(o)) => *o = transform_line(&f, l),
            (Self::Lines(src), Self::Lines(dst)) => {
                for (o, l) in dst.iter_mut().zip(src) {
                    *o = transform_line(&f, l);
                }
            }
            (Self::Circle(c), Self::Circle(o)) => *o = transform_circle(&f, c),
            (Self::Circles(src), Self::Circles(dst)) => {
                for (o, c) in dst.iter_mut().zip(src) {
                    *o = transform_circle(&f, c);
                }
            }
            (Self::Arc(a), Self::Arc(o)) => *o = transform_arc(&f, a),
            (Self::Arcs(src), Self::Arcs(dst)) => {
                for (o, a) in dst.iter_mut().zip(src) {
                    *o = transform_arc(&f, a);
                }
            }
            (Self::Text { pos, text }, Self::Text { pos: o, text: t }) => {
                *o = f * *pos;
                if *t != *text {
                    t.clone_from(text);
                }
            }
            // Kinds and lengths were aligned above.
            _ => {}
        }
    }

    /// Conservative viewport test.
    fn intersects(&self, area: &Area2d, filled: bool) -> bool {
        let circle = |c: &Circle| {
            if filled {
                area.intersects_area_of_circle(c)
            } else {
                area.intersects_circle(c)
            }
        };
        let arc = |a: &CircleArc| {
            if filled {
                area.intersects_area_of_arc(a)
            } else {
                area.intersects_arc(a)
            }
        };
        match self {
            Self::Point(p) | Self::Text { pos: p, .. } => area.intersects_point(*p),
            Self::Points(ps) => ps.iter().any(|p| area.intersects_point(*p)),
            Self::Polyline(ps) => edges_intersect(area, ps, false),
            // A filled polygon may cover the whole view with no vertex inside.
            Self::Polygon(_) if filled => true,
            Self::Polygon(ps) => edges_intersect(area, ps, true),
            Self::Line(l) => area.intersects_line(l),
            Self::Lines(ls) => ls.iter().any(|l| area.intersects_line(l)),
            Self::Circle(c) => circle(c),
            Self::Circles(cs) => cs.iter().any(circle),
            Self::Arc(a) => arc(a),
            Self::Arcs(arcs) => arcs.iter().any(arc),
        }
    }
}

/// Tests every edge of a vertex chain, plus the closing edge if `closed`.
fn edges_intersect(area: &Area2d, ps: &[Point], closed: bool) -> bool {
    match ps {
        [] => false,
        [p] => area.intersects_point(*p),
        [.., last] => {
            ps.windows(2)
                .any(|w| area.intersects_line(&Line::new(w[0], w[1])))
                || (closed && area.intersects_line(&Line::new(*last, ps[0])))
        }
    }
}

fn transform_line(f: &Frame2d, l: &Line) -> Line {
    Line::new(*f * l.p0, *f * l.p1)
}

fn transform_circle(f: &Frame2d, c: &Circle) -> Circle {
    Circle::new(*f * c.center, (f.scale() * c.radius).abs())
}

/// World arcs start at the frame's rotation plus their own start angle.
/// A full circle stays full: both ends get the same absolute angle.
fn transform_arc(f: &Frame2d, a: &CircleArc) -> CircleArc {
    let rot = f.angle();
    let start = rot + a.start;
    let end = if a.is_full_circle() { start } else { rot + a.end };
    CircleArc::new(*f * a.center, (f.scale() * a.radius).abs(), start, end)
}

/// What happened to an object during a draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    Hidden,
    Culled,
    Drawn,
}

/// A drawable leaf owned by exactly one frame.
#[derive(Clone, Debug)]
pub struct VisualObject {
    key: Key,
    layer: i32,
    color: Rgb,
    visible: bool,
    filled: bool,
    use_intersects_area: bool,
    changed: bool,
    rel: Shape,
    abs: Shape,
    handle: Option<DisplayHandle>,
    hints: DrawHints,
}

impl VisualObject {
    /// Creates a visible, unfilled, culled object.
    ///
    /// Negative radii are clamped to zero.
    #[must_use]
    pub fn new(key: Key, layer: i32, color: Rgb, mut shape: Shape) -> Self {
        shape.sanitize();
        Self {
            key,
            layer,
            color,
            visible: true,
            filled: false,
            use_intersects_area: true,
            changed: true,
            abs: shape.clone(),
            rel: shape,
            handle: None,
            hints: DrawHints::FRESH,
        }
    }

    /// Sets the fill mode. Ignored for kinds that cannot be filled.
    #[must_use]
    pub fn with_fill(mut self, filled: bool) -> Self {
        if self.rel.kind().is_fillable() {
            self.filled = filled;
        } else if filled {
            log::debug!("{} objects cannot be filled", self.rel.kind().name());
        }
        self
    }

    /// Enables or disables viewport culling.
    #[must_use]
    pub fn with_culling(mut self, cull: bool) -> Self {
        self.use_intersects_area = cull;
        self
    }

    // -- Accessors --

    /// Returns the key (zero for anonymous objects).
    #[inline]
    #[must_use]
    pub const fn key(&self) -> Key {
        self.key
    }

    /// Returns the draw-order layer.
    #[inline]
    #[must_use]
    pub const fn layer(&self) -> i32 {
        self.layer
    }

    /// Returns the color.
    #[inline]
    #[must_use]
    pub const fn color(&self) -> Rgb {
        self.color
    }

    /// Returns the geometry kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ShapeKind {
        self.rel.kind()
    }

    /// Returns `true` if the object is drawn at all.
    #[inline]
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Returns `true` if the object is drawn filled.
    #[inline]
    #[must_use]
    pub const fn is_filled(&self) -> bool {
        self.filled
    }

    /// Returns `true` if viewport culling is enabled.
    #[inline]
    #[must_use]
    pub const fn uses_culling(&self) -> bool {
        self.use_intersects_area
    }

    /// Returns `true` if the world geometry is stale.
    #[inline]
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Returns the geometry in frame coordinates.
    #[inline]
    #[must_use]
    pub const fn relative(&self) -> &Shape {
        &self.rel
    }

    /// Returns the world geometry as of the last traversal.
    ///
    /// Only meaningful while [`is_changed`](Self::is_changed) is `false`.
    #[inline]
    #[must_use]
    pub const fn absolute(&self) -> &Shape {
        &self.abs
    }

    /// Returns the display handle, if the object has been drawn.
    #[inline]
    #[must_use]
    pub const fn handle(&self) -> Option<DisplayHandle> {
        self.handle
    }

    // -- Mutation --

    /// Sets the color. Only an actual change is reported to the backend.
    pub fn set_color(&mut self, color: Rgb) {
        if color != self.color {
            self.color = color;
            self.hints.recolored = true;
        }
    }

    /// Shows or hides the object.
    ///
    /// A hidden object skips recomputation, so showing it again marks it
    /// changed.
    pub fn set_visible(&mut self, visible: bool) {
        if visible && !self.visible {
            self.changed = true;
        }
        self.visible = visible;
    }

    /// Enables or disables viewport culling.
    pub fn set_culling(&mut self, cull: bool) {
        self.use_intersects_area = cull;
    }

    /// Replaces the geometry with another of the same kind.
    ///
    /// Returns `false`, leaving the object unchanged, if the kind differs.
    /// When the element count changes, the display handle is released and a
    /// new one is created on the next draw.
    pub fn set_shape(&mut self, mut shape: Shape) -> bool {
        if shape.kind() != self.rel.kind() {
            return false;
        }
        shape.sanitize();
        if shape.len() != self.rel.len() {
            self.hints.resized = true;
        }
        self.rel = shape;
        self.changed = true;
        true
    }

    /// Replaces the vertices of a point set, polyline or polygon.
    pub fn set_points(&mut self, points: &[Point]) -> bool {
        let shape = match self.rel.kind() {
            ShapeKind::Points => Shape::Points(points.to_vec()),
            ShapeKind::Polyline => Shape::Polyline(points.to_vec()),
            ShapeKind::Polygon => Shape::Polygon(points.to_vec()),
            _ => return false,
        };
        self.set_shape(shape)
    }

    /// Replaces the segments of a segment set.
    pub fn set_lines(&mut self, lines: &[Line]) -> bool {
        self.set_shape(Shape::Lines(lines.to_vec()))
    }

    /// Replaces the circles of a circle set.
    pub fn set_circles(&mut self, circles: &[Circle]) -> bool {
        self.set_shape(Shape::Circles(circles.to_vec()))
    }

    /// Replaces the arcs of an arc set.
    pub fn set_arcs(&mut self, arcs: &[CircleArc]) -> bool {
        self.set_shape(Shape::Arcs(arcs.to_vec()))
    }

    // -- Traversal --

    /// Recomputes world geometry if the object or its frame changed.
    ///
    /// Returns `true` if recomputation happened.
    pub(crate) fn actualize(&mut self, frame: &Frame2d, parent_changed: bool) -> bool {
        if !self.changed && !parent_changed {
            return false;
        }
        self.rel.transform_into(frame, &mut self.abs);
        self.hints.moved = true;
        self.changed = false;
        true
    }

    /// Actualizes, culls, and emits one draw or fill call.
    ///
    /// The second value reports whether world geometry was recomputed.
    pub(crate) fn draw(
        &mut self,
        display: &mut dyn Display,
        area: &Area2d,
        frame: &Frame2d,
        parent_changed: bool,
    ) -> (Outcome, bool) {
        if !self.visible {
            return (Outcome::Hidden, false);
        }
        let recomputed = self.actualize(frame, parent_changed);
        if self.hints.resized
            && let Some(old) = self.handle.take()
        {
            display.release(old);
        }
        if self.use_intersects_area && !self.abs.intersects(area, self.filled) {
            return (Outcome::Culled, recomputed);
        }
        let handle = match self.handle {
            Some(h) => h,
            None => {
                let h = self.create_handle(display);
                self.handle = Some(h);
                h
            }
        };
        let cx = DrawContext {
            handle,
            color: self.color,
            hints: self.hints,
        };
        self.emit(display, &cx);
        self.hints = DrawHints::default();
        (Outcome::Drawn, recomputed)
    }

    /// Takes the display handle out, for release when the object dies.
    pub(crate) fn take_handle(&mut self) -> Option<DisplayHandle> {
        self.handle.take()
    }

    fn create_handle(&self, display: &mut dyn Display) -> DisplayHandle {
        let len = self.abs.len();
        match self.abs.kind() {
            ShapeKind::Point => display.create_point(),
            ShapeKind::Points => display.create_points(len),
            ShapeKind::Line => display.create_line(),
            ShapeKind::Lines => display.create_lines(len),
            ShapeKind::Circle => display.create_circle(),
            ShapeKind::Circles => display.create_circles(len),
            ShapeKind::Arc => display.create_circlearc(),
            ShapeKind::Arcs => display.create_circlearcs(len),
            ShapeKind::Polyline => display.create_polyline(len),
            ShapeKind::Polygon => display.create_polygon(len),
            ShapeKind::Text => display.create_string(),
        }
    }

    fn emit(&self, display: &mut dyn Display, cx: &DrawContext) {
        let filled = self.filled;
        match &self.abs {
            Shape::Point(p) => display.draw_point(cx, *p),
            Shape::Points(ps) => display.draw_points(cx, ps),
            Shape::Line(l) => display.draw_line(cx, l),
            Shape::Lines(ls) => display.draw_lines(cx, ls),
            Shape::Circle(c) if filled => display.fill_circle(cx, c),
            Shape::Circle(c) => display.draw_circle(cx, c),
            Shape::Circles(cs) if filled => display.fill_circles(cx, cs),
            Shape::Circles(cs) => display.draw_circles(cx, cs),
            Shape::Arc(a) if filled => display.fill_circlearc(cx, a),
            Shape::Arc(a) => display.draw_circlearc(cx, a),
            Shape::Arcs(arcs) if filled => display.fill_circlearcs(cx, arcs),
            Shape::Arcs(arcs) => display.draw_circlearcs(cx, arcs),
            Shape::Polyline(ps) => display.draw_polyline(cx, ps),
            Shape::Polygon(ps) if filled => display.fill_polygon(cx, ps),
            Shape::Polygon(ps) => display.draw_polygon(cx, ps),
            Shape::Text { pos, text } => display.draw_string(cx, *pos, text),
        }
    }
}
