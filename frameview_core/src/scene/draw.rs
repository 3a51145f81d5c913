// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Depth-first traversal: world transform refresh, culling and draw calls.
//!
//! A frame's sub-frames and objects sit in two lists, each sorted by layer.
//! The traversal merges them: at each step the candidate with the lower
//! layer goes first, and on a tie the object is drawn before the frame.
//! A hidden frame skips its whole subtree and keeps its `changed` flag, so
//! its geometry is refreshed as soon as it is shown again.

use crate::display::Display;
use crate::geometry::{Area2d, Frame2d};
use crate::trace::{FrameEvent, PassBeginEvent, PassKind, PassSummary, Tracer};
#[cfg(feature = "trace-rich")]
use crate::trace::{ObjectAction, ObjectEvent};

use super::id::{FrameId, Key, ObjectId};
use super::object::Outcome;
use super::tree::DrawTree;

/// Counters collected over one traversal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Frames whose world transform was recomputed.
    pub frames_recomputed: u32,
    /// Objects whose world geometry was recomputed.
    pub objects_recomputed: u32,
    /// Objects that produced a draw call.
    pub objects_drawn: u32,
    /// Objects rejected by the viewport test.
    pub objects_culled: u32,
    /// Display handles returned to the backend.
    pub handles_released: u32,
}

impl DrawStats {
    /// Resets every counter to zero.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

struct Pass<'a, 't> {
    display: Option<&'a mut dyn Display>,
    area: Area2d,
    cycle: u64,
    stats: DrawStats,
    tracer: &'a mut Tracer<'t>,
}

enum Child {
    Frame(FrameId),
    Object(ObjectId),
}

impl DrawTree {
    /// Draws every visible object that intersects `area` onto `display`.
    ///
    /// Handles of objects removed since the last draw are released first.
    pub fn draw(&mut self, display: &mut dyn Display, area: &Area2d) -> DrawStats {
        self.draw_traced(display, area, &mut Tracer::none())
    }

    /// Like [`draw`](Self::draw), reporting to `tracer`.
    pub fn draw_traced(
        &mut self,
        display: &mut dyn Display,
        area: &Area2d,
        tracer: &mut Tracer<'_>,
    ) -> DrawStats {
        self.cycle += 1;
        let cycle = self.cycle;
        tracer.pass_begin(&PassBeginEvent {
            cycle,
            kind: PassKind::Draw,
            viewport: Some(*area),
        });

        let mut stats = DrawStats::default();
        for handle in self.released.drain(..) {
            display.release(handle);
            stats.handles_released += 1;
        }

        let mut pass = Pass {
            display: Some(display),
            area: *area,
            cycle,
            stats,
            tracer: &mut *tracer,
        };
        self.visit(self.root, None, false, 0, &mut pass);
        let stats = pass.stats;

        tracer.pass_end(&PassSummary::new(cycle, &stats));
        stats
    }

    /// Refreshes world geometry without drawing or culling.
    pub fn actualize(&mut self) -> DrawStats {
        self.actualize_traced(&mut Tracer::none())
    }

    /// Like [`actualize`](Self::actualize), reporting to `tracer`.
    pub fn actualize_traced(&mut self, tracer: &mut Tracer<'_>) -> DrawStats {
        self.cycle += 1;
        let cycle = self.cycle;
        tracer.pass_begin(&PassBeginEvent {
            cycle,
            kind: PassKind::Actualize,
            viewport: None,
        });

        let mut pass = Pass {
            display: None,
            area: Area2d::default(),
            cycle,
            stats: DrawStats::default(),
            tracer: &mut *tracer,
        };
        self.visit(self.root, None, false, 0, &mut pass);
        let stats = pass.stats;

        tracer.pass_end(&PassSummary::new(cycle, &stats));
        stats
    }

    fn visit(
        &mut self,
        id: FrameId,
        parent: Option<&Frame2d>,
        parent_changed: bool,
        depth: u32,
        pass: &mut Pass<'_, '_>,
    ) {
        let Some(frame) = self.frames.get_mut(id) else {
            return;
        };
        if !frame.visible {
            return;
        }
        let changed = frame.changed || parent_changed;
        if changed {
            frame.abs = match parent {
                Some(p) => *p * frame.rel,
                None => frame.rel,
            };
            pass.stats.frames_recomputed += 1;
            pass.tracer.frame_actualized(&FrameEvent {
                cycle: pass.cycle,
                key: frame.key,
                depth,
            });
        }
        let abs = frame.abs;
        let key = frame.key;

        let (mut fi, mut oi) = (0, 0);
        loop {
            // Children can only change through `&mut self`, which the
            // recursion holds, so the indices stay valid between steps.
            let Some(frame) = self.frames.get(id) else {
                return;
            };
            let next_frame = frame.frames.entry(fi).map(|e| (e.layer, e.item));
            let next_object = frame.objects.entry(oi).map(|e| (e.layer, e.item));
            let child = match (next_frame, next_object) {
                (None, None) => break,
                (Some((_, f)), None) => Child::Frame(f),
                (None, Some((_, o))) => Child::Object(o),
                (Some((fl, f)), Some((ol, o))) => {
                    if ol <= fl {
                        Child::Object(o)
                    } else {
                        Child::Frame(f)
                    }
                }
            };
            match child {
                Child::Object(o) => {
                    self.visit_object(o, key, &abs, changed, pass);
                    oi += 1;
                }
                Child::Frame(f) => {
                    self.visit(f, Some(&abs), changed, depth + 1, pass);
                    fi += 1;
                }
            }
        }

        if let Some(frame) = self.frames.get_mut(id) {
            frame.changed = false;
        }
    }

    fn visit_object(
        &mut self,
        id: ObjectId,
        frame_key: Key,
        abs: &Frame2d,
        parent_changed: bool,
        pass: &mut Pass<'_, '_>,
    ) {
        let Some(obj) = self.objects.get_mut(id) else {
            return;
        };
        let Some(display) = pass.display.as_deref_mut() else {
            if obj.is_visible() && obj.actualize(abs, parent_changed) {
                pass.stats.objects_recomputed += 1;
            }
            return;
        };

        let (outcome, recomputed) = obj.draw(display, &pass.area, abs, parent_changed);
        if recomputed {
            pass.stats.objects_recomputed += 1;
        }
        match outcome {
            Outcome::Hidden => return,
            Outcome::Drawn => pass.stats.objects_drawn += 1,
            Outcome::Culled => pass.stats.objects_culled += 1,
        }

        #[cfg(feature = "trace-rich")]
        pass.tracer.object(&ObjectEvent {
            cycle: pass.cycle,
            frame: frame_key,
            key: obj.key(),
            kind: obj.kind(),
            layer: obj.layer(),
            action: if outcome == Outcome::Drawn {
                ObjectAction::Drawn
            } else {
                ObjectAction::Culled
            },
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = frame_key;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::f64::consts::FRAC_PI_2;

    use kurbo::{Circle, Point, Vec2};

    use super::*;
    use crate::color::Rgb;
    use crate::display::{DisplayHandle, DrawContext};
    use crate::geometry::Angle;
    use crate::scene::id::ROOT_KEY;
    use crate::scene::object::{Shape, ShapeKind, VisualObject};

    #[derive(Default)]
    struct Canvas {
        next: u32,
        circles: Vec<(Rgb, Circle)>,
        released: Vec<DisplayHandle>,
    }

    impl Display for Canvas {
        fn create(&mut self, _kind: ShapeKind, _len: usize) -> DisplayHandle {
            self.next += 1;
            DisplayHandle(self.next)
        }

        fn release(&mut self, handle: DisplayHandle) {
            self.released.push(handle);
        }

        fn draw_circle(&mut self, cx: &DrawContext, circle: &Circle) {
            self.circles.push((cx.color, *circle));
        }
    }

    fn view() -> Area2d {
        Area2d::new(Point::ZERO, 100.0, 100.0)
    }

    fn tagged(key: Key, layer: i32, center: Point) -> VisualObject {
        let tag = u8::try_from(layer).unwrap_or(u8::MAX);
        VisualObject::new(key, layer, Rgb::new(tag, 0, 0), Shape::Circle(Circle::new(center, 1.0)))
    }

    fn chain(depth: i32) -> DrawTree {
        let mut t = DrawTree::new();
        let mut parent = ROOT_KEY;
        for key in 1..depth {
            assert!(t.insert_frame(parent, key, Point::new(1.0, 0.0), Angle::ZERO, 0));
            parent = key;
        }
        t
    }

    #[test]
    fn quarter_turn_moves_circle() {
        let eps = 1e-9;
        let mut t = DrawTree::new();
        t.insert_frame(ROOT_KEY, 1, Point::ZERO, Angle::ZERO, 0);
        let circle = Shape::Circle(Circle::new((5.0, 5.0), 2.0));
        t.insert_object(1, VisualObject::new(1, 0, Rgb::BLACK, circle));
        assert!(t.set_angle(1, Angle::new(FRAC_PI_2)));

        let mut canvas = Canvas::default();
        let stats = t.draw(&mut canvas, &view());
        assert_eq!(stats.objects_drawn, 1);
        let (_, c) = canvas.circles[0];
        assert!((c.center.x + 5.0).abs() < eps);
        assert!((c.center.y - 5.0).abs() < eps);
        assert!((c.radius - 2.0).abs() < eps);
    }

    #[test]
    fn nested_frames_compose() {
        let eps = 1e-9;
        let mut t = DrawTree::new();
        t.insert_frame(ROOT_KEY, 1, Point::new(10.0, 0.0), Angle::new(FRAC_PI_2), 0);
        t.insert_frame(1, 2, Point::new(1.0, 0.0), Angle::ZERO, 0);
        t.insert_object(2, tagged(1, 0, Point::new(1.0, 0.0)));
        let mut canvas = Canvas::default();
        t.draw(&mut canvas, &view());
        let (_, c) = canvas.circles[0];
        assert!((c.center.x - 10.0).abs() < eps);
        assert!((c.center.y - 2.0).abs() < eps);
    }

    #[test]
    fn root_change_recomputes_every_level_once() {
        let mut t = chain(6);
        assert_eq!(t.actualize().frames_recomputed, 6);
        assert_eq!(t.actualize().frames_recomputed, 0);

        assert!(t.set_position(ROOT_KEY, Point::new(0.0, 1.0)));
        assert_eq!(t.actualize().frames_recomputed, 6);

        assert!(t.translate_frame(3, Vec2::new(1.0, 0.0)));
        assert_eq!(t.actualize().frames_recomputed, 3, "frames 3, 4 and 5");
    }

    #[test]
    fn unchanged_objects_are_not_recomputed() {
        let mut t = chain(3);
        t.insert_object(2, tagged(1, 0, Point::ZERO));
        let mut canvas = Canvas::default();
        let first = t.draw(&mut canvas, &view());
        assert_eq!(first.objects_recomputed, 1);
        let second = t.draw(&mut canvas, &view());
        assert_eq!(second.objects_recomputed, 0);
        assert_eq!(second.objects_drawn, 1);
        t.set_angle(1, Angle::new(0.1));
        assert_eq!(t.draw(&mut canvas, &view()).objects_recomputed, 1);
    }

    #[test]
    fn layers_merge_with_objects_first_on_ties() {
        let mut t = DrawTree::new();
        for (key, layer) in [(10, 5), (11, 1), (12, 3)] {
            t.insert_frame(ROOT_KEY, key, Point::ZERO, Angle::ZERO, layer);
            t.insert_object(key, tagged(1, layer, Point::ZERO));
        }
        for layer in [6, 0, 4, 2] {
            t.insert_object(ROOT_KEY, tagged(layer, layer, Point::ZERO));
        }
        t.insert_object(ROOT_KEY, tagged(99, 3, Point::ZERO));

        let mut canvas = Canvas::default();
        t.draw(&mut canvas, &view());
        let order: Vec<u8> = canvas.circles.iter().map(|(c, _)| c.red).collect();
        assert_eq!(order, [0, 1, 2, 3, 3, 4, 5, 6]);
    }

    #[test]
    fn hidden_frame_skips_subtree_and_stays_dirty() {
        let mut t = chain(3);
        t.insert_object(2, tagged(1, 0, Point::ZERO));
        let mut canvas = Canvas::default();
        t.draw(&mut canvas, &view());

        t.set_visible(1, false);
        t.set_position(2, Point::new(2.0, 0.0));
        let hidden = t.draw(&mut canvas, &view());
        assert_eq!(hidden.objects_drawn, 0);
        assert_eq!(hidden.frames_recomputed, 0);
        assert!(t.frame(2).is_some_and(|f| f.is_changed()));

        t.set_visible(1, true);
        let shown = t.draw(&mut canvas, &view());
        assert_eq!(shown.objects_drawn, 1);
        assert_eq!(shown.frames_recomputed, 2);
    }

    #[test]
    fn culled_objects_are_counted() {
        let mut t = DrawTree::new();
        t.insert_object(ROOT_KEY, tagged(1, 0, Point::ZERO));
        t.insert_object(ROOT_KEY, tagged(2, 0, Point::new(500.0, 0.0)));
        let mut canvas = Canvas::default();
        let stats = t.draw(&mut canvas, &view());
        assert_eq!(stats.objects_drawn, 1);
        assert_eq!(stats.objects_culled, 1);
        assert_eq!(canvas.circles.len(), 1);
    }

    #[test]
    fn removed_objects_release_handles_on_next_draw() {
        let mut t = chain(2);
        t.insert_object(1, tagged(1, 0, Point::ZERO));
        t.insert_object(1, tagged(2, 0, Point::ZERO));
        let mut canvas = Canvas::default();
        t.draw(&mut canvas, &view());

        assert!(t.remove_frame(1));
        assert_eq!(t.pending_releases().len(), 2);
        let stats = t.draw(&mut canvas, &view());
        assert_eq!(stats.handles_released, 2);
        assert_eq!(canvas.released, [DisplayHandle(1), DisplayHandle(2)]);
        assert!(t.pending_releases().is_empty());
    }

    #[test]
    fn never_drawn_objects_release_nothing() {
        let mut t = chain(2);
        t.insert_object(1, tagged(1, 0, Point::ZERO));
        assert!(t.remove_object(1, 1));
        assert!(t.pending_releases().is_empty());
    }

    #[test]
    fn cycle_counts_passes() {
        let mut t = DrawTree::new();
        let mut canvas = Canvas::default();
        t.actualize();
        t.draw(&mut canvas, &view());
        assert_eq!(t.cycle(), 2);
    }

    #[test]
    fn stats_clear() {
        let mut s = DrawStats {
            objects_drawn: 3,
            ..DrawStats::default()
        };
        s.clear();
        assert_eq!(s, DrawStats::default());
    }
}
