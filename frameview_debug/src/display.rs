// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Display`] that records every call instead of rendering.
//!
//! [`RecordingDisplay`] hands out sequential handles, logs creation, release
//! and draw calls in order, and can dump them as JSON. It is meant for tests,
//! golden files and headless replays.

use frameview_core::color::Rgb;
use frameview_core::display::{Display, DisplayHandle, DrawContext};
use frameview_core::geometry::{Circle, CircleArc, Line, Point};
use frameview_core::scene::{Shape, ShapeKind};
use serde_json::{Value, json};

/// One recorded backend call.
#[derive(Clone, Debug, PartialEq)]
pub enum DisplayCall {
    /// A handle was allocated.
    Create {
        /// The new handle.
        handle: DisplayHandle,
        /// Kind it was allocated for.
        kind: ShapeKind,
        /// Element count at creation.
        len: usize,
    },
    /// A handle was freed.
    Release(DisplayHandle),
    /// The background color was set.
    Background(Rgb),
    /// An object was drawn or filled.
    Draw {
        /// Handle, color and change hints.
        cx: DrawContext,
        /// World-space geometry.
        shape: Shape,
        /// Whether a fill method was called.
        filled: bool,
    },
}

/// Records backend calls in the order the traversal makes them.
#[derive(Debug, Default)]
pub struct RecordingDisplay {
    calls: Vec<DisplayCall>,
    next_handle: u32,
    live: usize,
}

impl RecordingDisplay {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every call recorded so far.
    #[must_use]
    pub fn calls(&self) -> &[DisplayCall] {
        &self.calls
    }

    /// Number of handles created and not yet released.
    #[must_use]
    pub fn live_handles(&self) -> usize {
        self.live
    }

    /// Returns the draw calls only.
    pub fn draws(&self) -> impl Iterator<Item = (&DrawContext, &Shape, bool)> {
        self.calls.iter().filter_map(|c| match c {
            DisplayCall::Draw { cx, shape, filled } => Some((cx, shape, *filled)),
            _ => None,
        })
    }

    /// Forgets recorded calls, keeping handle bookkeeping.
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// Returns the recorded calls as a JSON array.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.calls.iter().map(call_json).collect())
    }

    fn record(&mut self, cx: &DrawContext, shape: Shape, filled: bool) {
        self.calls.push(DisplayCall::Draw {
            cx: *cx,
            shape,
            filled,
        });
    }
}

fn color_json(c: Rgb) -> Value {
    json!(format!("{c}"))
}

fn point_json(p: Point) -> Value {
    json!([p.x, p.y])
}

fn line_json(l: &Line) -> Value {
    json!([[l.p0.x, l.p0.y], [l.p1.x, l.p1.y]])
}

fn circle_json(c: &Circle) -> Value {
    json!({ "center": point_json(c.center), "radius": c.radius })
}

fn arc_json(a: &CircleArc) -> Value {
    let (start, end) = a.span();
    json!({
        "center": point_json(a.center),
        "radius": a.radius,
        "start": start,
        "end": end,
    })
}

fn shape_json(shape: &Shape) -> Value {
    match shape {
        Shape::Point(p) => point_json(*p),
        Shape::Points(ps) | Shape::Polyline(ps) | Shape::Polygon(ps) => {
            Value::Array(ps.iter().copied().map(point_json).collect())
        }
        Shape::Line(l) => line_json(l),
        Shape::Lines(ls) => Value::Array(ls.iter().map(line_json).collect()),
        Shape::Circle(c) => circle_json(c),
        Shape::Circles(cs) => Value::Array(cs.iter().map(circle_json).collect()),
        Shape::Arc(a) => arc_json(a),
        Shape::Arcs(arcs) => Value::Array(arcs.iter().map(arc_json).collect()),
        Shape::Text { pos, text } => json!({ "pos": point_json(*pos), "text": text }),
    }
}

fn call_json(call: &DisplayCall) -> Value {
    match call {
        DisplayCall::Create { handle, kind, len } => json!({
            "call": "create",
            "handle": handle.0,
            "kind": kind.name(),
            "len": len,
        }),
        DisplayCall::Release(handle) => json!({ "call": "release", "handle": handle.0 }),
        DisplayCall::Background(c) => json!({ "call": "background", "color": color_json(*c) }),
        DisplayCall::Draw { cx, shape, filled } => json!({
            "call": if *filled { "fill" } else { "draw" },
            "handle": cx.handle.0,
            "kind": shape.kind().name(),
            "color": color_json(cx.color),
            "moved": cx.hints.moved,
            "recolored": cx.hints.recolored,
            "resized": cx.hints.resized,
            "geometry": shape_json(shape),
        }),
    }
}

impl Display for RecordingDisplay {
    fn create(&mut self, kind: ShapeKind, len: usize) -> DisplayHandle {
        self.next_handle += 1;
        self.live += 1;
        let handle = DisplayHandle(self.next_handle);
        self.calls.push(DisplayCall::Create { handle, kind, len });
        handle
    }

    fn release(&mut self, handle: DisplayHandle) {
        self.live = self.live.saturating_sub(1);
        self.calls.push(DisplayCall::Release(handle));
    }

    fn set_background_color(&mut self, color: Rgb) {
        self.calls.push(DisplayCall::Background(color));
    }

    fn draw_point(&mut self, cx: &DrawContext, point: Point) {
        self.record(cx, Shape::Point(point), false);
    }

    fn draw_points(&mut self, cx: &DrawContext, points: &[Point]) {
        self.record(cx, Shape::Points(points.to_vec()), false);
    }

    fn draw_line(&mut self, cx: &DrawContext, line: &Line) {
        self.record(cx, Shape::Line(*line), false);
    }

    fn draw_lines(&mut self, cx: &DrawContext, lines: &[Line]) {
        self.record(cx, Shape::Lines(lines.to_vec()), false);
    }

    fn draw_circle(&mut self, cx: &DrawContext, circle: &Circle) {
        self.record(cx, Shape::Circle(*circle), false);
    }

    fn draw_circles(&mut self, cx: &DrawContext, circles: &[Circle]) {
        self.record(cx, Shape::Circles(circles.to_vec()), false);
    }

    fn draw_circlearc(&mut self, cx: &DrawContext, arc: &CircleArc) {
        self.record(cx, Shape::Arc(*arc), false);
    }

    fn draw_circlearcs(&mut self, cx: &DrawContext, arcs: &[CircleArc]) {
        self.record(cx, Shape::Arcs(arcs.to_vec()), false);
    }

    fn draw_polyline(&mut self, cx: &DrawContext, vertices: &[Point]) {
        self.record(cx, Shape::Polyline(vertices.to_vec()), false);
    }

    fn draw_polygon(&mut self, cx: &DrawContext, vertices: &[Point]) {
        self.record(cx, Shape::Polygon(vertices.to_vec()), false);
    }

    fn draw_string(&mut self, cx: &DrawContext, pos: Point, text: &str) {
        let text = text.to_owned();
        self.record(cx, Shape::Text { pos, text }, false);
    }

    fn fill_circle(&mut self, cx: &DrawContext, circle: &Circle) {
        self.record(cx, Shape::Circle(*circle), true);
    }

    fn fill_circles(&mut self, cx: &DrawContext, circles: &[Circle]) {
        self.record(cx, Shape::Circles(circles.to_vec()), true);
    }

    fn fill_circlearc(&mut self, cx: &DrawContext, arc: &CircleArc) {
        self.record(cx, Shape::Arc(*arc), true);
    }

    fn fill_circlearcs(&mut self, cx: &DrawContext, arcs: &[CircleArc]) {
        self.record(cx, Shape::Arcs(arcs.to_vec()), true);
    }

    fn fill_polygon(&mut self, cx: &DrawContext, vertices: &[Point]) {
        self.record(cx, Shape::Polygon(vertices.to_vec()), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frameview_core::builder::BuilderDirect;
    use frameview_core::geometry::Area2d;
    use frameview_core::viewport::ViewportHolder;

    fn scene() -> BuilderDirect {
        let mut b = BuilderDirect::new();
        frameview_core::ascii::process(
            "VA (0,0,20,20);\
             BG 102030;\
             INS FRAME id=1 (2,0);\
             INS 1 CIRCLE id=1 col=ff0000 fil=1 (0,0,1);\
             INS 1 LINE id=2 lay=1 (0,0,1,0);\
             INS STRING id=3 (50,50,\"far\");",
            &mut b,
        )
        .unwrap();
        b
    }

    #[test]
    fn records_creation_and_draws() {
        let mut b = scene();
        let mut d = RecordingDisplay::new();
        b.draw(&mut d);

        assert_eq!(d.calls()[0], DisplayCall::Background(Rgb::new(0x10, 0x20, 0x30)));
        let draws: Vec<_> = d.draws().collect();
        assert_eq!(draws.len(), 2, "the string is outside the view");
        let (cx, shape, filled) = draws[0];
        assert!(filled);
        assert_eq!(cx.color, Rgb::new(255, 0, 0));
        assert_eq!(*shape, Shape::Circle(Circle::new((2.0, 0.0), 1.0)));
        assert_eq!(d.live_handles(), 2);
    }

    #[test]
    fn released_handles_are_recorded() {
        let mut b = scene();
        let mut d = RecordingDisplay::new();
        b.draw(&mut d);
        d.clear();

        assert!(b.tree_mut().remove_frame(1));
        b.draw(&mut d);
        assert_eq!(
            d.calls(),
            &[
                DisplayCall::Release(DisplayHandle(1)),
                DisplayCall::Release(DisplayHandle(2)),
            ]
        );
        assert_eq!(d.live_handles(), 0);
    }

    #[test]
    fn json_dump() {
        let mut b = scene();
        b.viewport_mut().set_area(&Area2d::new(Point::new(0.0, 0.0), 200.0, 200.0));
        let mut d = RecordingDisplay::new();
        b.draw(&mut d);

        let json = d.to_json();
        let calls = json.as_array().unwrap();
        let fill = calls.iter().find(|c| c["call"] == "fill").unwrap();
        assert_eq!(fill["kind"], "circle");
        assert_eq!(fill["geometry"]["radius"], 1.0);
        let text = calls.iter().find(|c| c["kind"] == "text" && c["call"] == "draw");
        assert_eq!(text.map(|t| t["geometry"]["text"].clone()), Some(json!("far")));
    }
}
