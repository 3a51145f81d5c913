// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A [`Builder`] that writes the binary stream instead of applying it.

use alloc::vec::Vec;

use kurbo::{Circle, Line, Point};

use crate::builder::{Builder, Placement};
use crate::color::Rgb;
use crate::geometry::{Angle, CircleArc};
use crate::scene::Key;

use super::command::Command;
use super::wire::Writer;

/// Serializes builder calls to the binary wire format.
///
/// Pair it with the ASCII processor to convert text scripts into binary
/// streams. Calls without an opcode (view area, status line, background,
/// frame scale) are refused.
#[derive(Clone, Debug, Default)]
pub struct Encoder {
    writer: Writer,
    commands: u64,
}

impl Encoder {
    /// Creates an encoder with an empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            writer: Writer::new(),
            commands: 0,
        }
    }

    /// Returns the stream written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.writer.as_bytes()
    }

    /// Consumes the encoder, returning the stream.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.writer.into_bytes()
    }

    /// Number of commands written.
    #[must_use]
    pub const fn command_count(&self) -> u64 {
        self.commands
    }

    /// Discards the buffer, e.g. after it was sent.
    pub fn clear(&mut self) {
        self.writer.clear();
        self.commands = 0;
    }

    /// Writes one command.
    pub fn push(&mut self, cmd: &Command) -> bool {
        let ok = cmd.encode(&mut self.writer);
        if ok {
            self.commands += 1;
        }
        ok
    }
}

impl Builder for Encoder {
    fn insert_frame(&mut self, parent: Key, key: Key, pos: Point, angle: Angle, layer: i32) -> bool {
        self.push(&Command::InsertFrame {
            parent,
            key,
            pos,
            angle,
            layer,
        })
    }

    fn insert_point(&mut self, at: Placement, point: Point) -> bool {
        self.push(&Command::InsertPoint { at, point })
    }

    fn insert_points(&mut self, at: Placement, points: &[Point]) -> bool {
        self.push(&Command::InsertPoints {
            at,
            points: points.to_vec(),
        })
    }

    fn insert_line(&mut self, at: Placement, line: Line) -> bool {
        self.push(&Command::InsertLine { at, line })
    }

    fn insert_lines(&mut self, at: Placement, lines: &[Line]) -> bool {
        self.push(&Command::InsertLines {
            at,
            lines: lines.to_vec(),
        })
    }

    fn insert_circle(&mut self, at: Placement, circle: Circle) -> bool {
        self.push(&Command::InsertCircle {
            at,
            circle,
            filled: false,
        })
    }

    fn insert_circles(&mut self, at: Placement, circles: &[Circle]) -> bool {
        self.push(&Command::InsertCircles {
            at,
            circles: circles.to_vec(),
            filled: false,
        })
    }

    fn insert_f_circle(&mut self, at: Placement, circle: Circle) -> bool {
        self.push(&Command::InsertCircle {
            at,
            circle,
            filled: true,
        })
    }

    fn insert_f_circles(&mut self, at: Placement, circles: &[Circle]) -> bool {
        self.push(&Command::InsertCircles {
            at,
            circles: circles.to_vec(),
            filled: true,
        })
    }

    fn insert_arc(&mut self, at: Placement, arc: CircleArc) -> bool {
        self.push(&Command::InsertArc {
            at,
            arc,
            filled: false,
        })
    }

    fn insert_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool {
        self.push(&Command::InsertArcs {
            at,
            arcs: arcs.to_vec(),
            filled: false,
        })
    }

    fn insert_f_arc(&mut self, at: Placement, arc: CircleArc) -> bool {
        self.push(&Command::InsertArc {
            at,
            arc,
            filled: true,
        })
    }

    fn insert_f_arcs(&mut self, at: Placement, arcs: &[CircleArc]) -> bool {
        self.push(&Command::InsertArcs {
            at,
            arcs: arcs.to_vec(),
            filled: true,
        })
    }

    fn insert_polyline(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.push(&Command::InsertPolyline {
            at,
            vertices: vertices.to_vec(),
        })
    }

    fn insert_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.push(&Command::InsertPolygon {
            at,
            vertices: vertices.to_vec(),
            filled: false,
        })
    }

    fn insert_f_polygon(&mut self, at: Placement, vertices: &[Point]) -> bool {
        self.push(&Command::InsertPolygon {
            at,
            vertices: vertices.to_vec(),
            filled: true,
        })
    }

    fn insert_string(&mut self, at: Placement, pos: Point, text: &str) -> bool {
        self.push(&Command::InsertString {
            at,
            pos,
            text: text.into(),
        })
    }

    fn set_object_visible(&mut self, frame: Key, obj: Key, visible: bool) -> bool {
        self.push(&Command::SetObjectVisible {
            frame,
            obj,
            visible,
        })
    }

    fn set_object_layer(&mut self, frame: Key, obj: Key, layer: i32) -> bool {
        self.push(&Command::SetObjectLayer { frame, obj, layer })
    }

    fn set_object_color(&mut self, frame: Key, obj: Key, color: Rgb) -> bool {
        self.push(&Command::SetObjectColor { frame, obj, color })
    }

    fn set_frame_visible(&mut self, key: Key, visible: bool) -> bool {
        self.push(&Command::SetFrameVisible { key, visible })
    }

    fn set_frame_layer(&mut self, key: Key, layer: i32) -> bool {
        self.push(&Command::SetFrameLayer { key, layer })
    }

    fn set_frame_pos(&mut self, key: Key, pos: Point) -> bool {
        self.push(&Command::SetFramePos { key, pos })
    }

    fn set_frame_angle(&mut self, key: Key, angle: Angle) -> bool {
        self.push(&Command::SetFrameAngle { key, angle })
    }

    fn set_frame_pos_angle(&mut self, key: Key, pos: Point, angle: Angle) -> bool {
        self.push(&Command::SetFramePosAngle { key, pos, angle })
    }

    fn remove_frame(&mut self, key: Key) -> bool {
        self.push(&Command::RemoveFrame { key })
    }

    fn remove_object(&mut self, frame: Key, obj: Key) -> bool {
        self.push(&Command::RemoveObject { frame, obj })
    }

    fn empty_frame(&mut self, key: Key) -> bool {
        self.push(&Command::EmptyFrame { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Area2d;
    use crate::protocol::{Opcode, commands};

    #[test]
    fn calls_become_commands_in_order() {
        let mut enc = Encoder::new();
        let at = Placement::new(0, 1, 0, Rgb::WHITE);
        assert!(enc.insert_frame(0, 1, Point::new(1.0, 1.0), Angle::ZERO, 0));
        assert!(enc.insert_f_circle(at, Circle::new((0.0, 0.0), 0.5)));
        assert!(enc.set_frame_pos(1, Point::new(2.0, 2.0)));
        assert!(enc.remove_frame(1));
        assert_eq!(enc.command_count(), 4);

        let ops: Result<alloc::vec::Vec<Opcode>, _> = commands(enc.as_bytes())
            .map(|c| c.map(|c| c.opcode()))
            .collect();
        assert_eq!(
            ops,
            Ok(alloc::vec![
                Opcode::InsertFrame,
                Opcode::InsertFilledCircle,
                Opcode::SetFramePos,
                Opcode::RemoveFrame
            ])
        );
    }

    #[test]
    fn viewer_calls_have_no_opcode() {
        let mut enc = Encoder::new();
        assert!(!enc.set_view_area(&Area2d::new(Point::ZERO, 10.0, 10.0)));
        assert!(!enc.set_status_line("hello"));
        assert!(!enc.set_background_color(Rgb::WHITE));
        assert!(!enc.set_frame_scale(1, 2.0));
        assert!(enc.as_bytes().is_empty());
    }

    #[test]
    fn clear_resets() {
        let mut enc = Encoder::new();
        enc.empty_frame(0);
        enc.clear();
        assert_eq!(enc.command_count(), 0);
        assert!(enc.into_bytes().is_empty());
    }
}
