// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The command type and its per-variant field layouts.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Circle, Line, Point};

use crate::builder::{Builder, Placement};
use crate::color::Rgb;
use crate::geometry::{Angle, CircleArc};
use crate::scene::Key;

use super::error::DecodeError;
use super::opcode::Opcode;
use super::wire::{Reader, Writer, size};

/// One decoded protocol command.
///
/// Filled and outlined variants of the same shape share a variant with a
/// `filled` flag; [`opcode`](Self::opcode) picks the wire tag.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// See [`Builder::insert_frame`].
    InsertFrame {
        /// Parent frame.
        parent: Key,
        /// New frame key.
        key: Key,
        /// Position in the parent.
        pos: Point,
        /// Angle in the parent.
        angle: Angle,
        /// Sibling layer.
        layer: i32,
    },
    /// A point.
    InsertPoint {
        /// Target and style.
        at: Placement,
        /// Geometry.
        point: Point,
    },
    /// A point set.
    InsertPoints {
        /// Target and style.
        at: Placement,
        /// Geometry.
        points: Vec<Point>,
    },
    /// A segment.
    InsertLine {
        /// Target and style.
        at: Placement,
        /// Geometry.
        line: Line,
    },
    /// A segment set.
    InsertLines {
        /// Target and style.
        at: Placement,
        /// Geometry.
        lines: Vec<Line>,
    },
    /// A circle.
    InsertCircle {
        /// Target and style.
        at: Placement,
        /// Geometry.
        circle: Circle,
        /// Filled rather than outlined.
        filled: bool,
    },
    /// A circle set.
    InsertCircles {
        /// Target and style.
        at: Placement,
        /// Geometry.
        circles: Vec<Circle>,
        /// Filled rather than outlined.
        filled: bool,
    },
    /// An arc.
    InsertArc {
        /// Target and style.
        at: Placement,
        /// Geometry.
        arc: CircleArc,
        /// Filled rather than outlined.
        filled: bool,
    },
    /// An arc set.
    InsertArcs {
        /// Target and style.
        at: Placement,
        /// Geometry.
        arcs: Vec<CircleArc>,
        /// Filled rather than outlined.
        filled: bool,
    },
    /// An open polyline.
    InsertPolyline {
        /// Target and style.
        at: Placement,
        /// Vertices.
        vertices: Vec<Point>,
    },
    /// A closed polygon.
    InsertPolygon {
        /// Target and style.
        at: Placement,
        /// Vertices.
        vertices: Vec<Point>,
        /// Filled rather than outlined.
        filled: bool,
    },
    /// A text label.
    InsertString {
        /// Target and style.
        at: Placement,
        /// Anchor.
        pos: Point,
        /// Label text.
        text: String,
    },
    /// See [`Builder::set_object_visible`].
    SetObjectVisible {
        /// Owning frame.
        frame: Key,
        /// Object key.
        obj: Key,
        /// New visibility.
        visible: bool,
    },
    /// See [`Builder::set_object_layer`].
    SetObjectLayer {
        /// Owning frame.
        frame: Key,
        /// Object key.
        obj: Key,
        /// New layer.
        layer: i32,
    },
    /// See [`Builder::set_object_color`].
    SetObjectColor {
        /// Owning frame.
        frame: Key,
        /// Object key.
        obj: Key,
        /// New color.
        color: Rgb,
    },
    /// See [`Builder::set_frame_visible`].
    SetFrameVisible {
        /// Frame key.
        key: Key,
        /// New visibility.
        visible: bool,
    },
    /// See [`Builder::set_frame_layer`].
    SetFrameLayer {
        /// Frame key.
        key: Key,
        /// New layer.
        layer: i32,
    },
    /// See [`Builder::set_frame_pos`].
    SetFramePos {
        /// Frame key.
        key: Key,
        /// New position.
        pos: Point,
    },
    /// See [`Builder::set_frame_angle`].
    SetFrameAngle {
        /// Frame key.
        key: Key,
        /// New angle.
        angle: Angle,
    },
    /// See [`Builder::set_frame_pos_angle`].
    SetFramePosAngle {
        /// Frame key.
        key: Key,
        /// New position.
        pos: Point,
        /// New angle.
        angle: Angle,
    },
    /// See [`Builder::remove_frame`].
    RemoveFrame {
        /// Frame key.
        key: Key,
    },
    /// See [`Builder::remove_object`].
    RemoveObject {
        /// Owning frame.
        frame: Key,
        /// Object (or sub-frame) key.
        obj: Key,
    },
    /// See [`Builder::empty_frame`].
    EmptyFrame {
        /// Frame key.
        key: Key,
    },
}

impl Command {
    /// Returns the wire tag of this command.
    #[must_use]
    pub const fn opcode(&self) -> Opcode {
        match self {
            Self::InsertFrame { .. } => Opcode::InsertFrame,
            Self::InsertPoint { .. } => Opcode::InsertPoint,
            Self::InsertPoints { .. } => Opcode::InsertPoints,
            Self::InsertLine { .. } => Opcode::InsertLine,
            Self::InsertLines { .. } => Opcode::InsertLines,
            Self::InsertCircle { filled: false, .. } => Opcode::InsertCircle,
            Self::InsertCircle { filled: true, .. } => Opcode::InsertFilledCircle,
            Self::InsertCircles { filled: false, .. } => Opcode::InsertCircles,
            Self::InsertCircles { filled: true, .. } => Opcode::InsertFilledCircles,
            Self::InsertArc { filled: false, .. } => Opcode::InsertArc,
            Self::InsertArc { filled: true, .. } => Opcode::InsertFilledArc,
            Self::InsertArcs { filled: false, .. } => Opcode::InsertArcs,
            Self::InsertArcs { filled: true, .. } => Opcode::InsertFilledArcs,
            Self::InsertPolyline { .. } => Opcode::InsertPolyline,
            Self::InsertPolygon { filled: false, .. } => Opcode::InsertPolygon,
            Self::InsertPolygon { filled: true, .. } => Opcode::InsertFilledPolygon,
            Self::InsertString { .. } => Opcode::InsertString,
            Self::SetObjectVisible { .. } => Opcode::SetObjectVisible,
            Self::SetObjectLayer { .. } => Opcode::SetObjectLayer,
            Self::SetObjectColor { .. } => Opcode::SetObjectColor,
            Self::SetFrameVisible { .. } => Opcode::SetFrameVisible,
            Self::SetFrameLayer { .. } => Opcode::SetFrameLayer,
            Self::SetFramePos { .. } => Opcode::SetFramePos,
            Self::SetFrameAngle { .. } => Opcode::SetFrameAngle,
            Self::SetFramePosAngle { .. } => Opcode::SetFramePosAngle,
            Self::RemoveFrame { .. } => Opcode::RemoveFrame,
            Self::RemoveObject { .. } => Opcode::RemoveObject,
            Self::EmptyFrame { .. } => Opcode::EmptyFrame,
        }
    }

    /// Hands the command to `builder`, returning its verdict.
    pub fn apply<B: Builder + ?Sized>(&self, builder: &mut B) -> bool {
        match self {
            Self::InsertFrame {
                parent,
                key,
                pos,
                angle,
                layer,
            } => builder.insert_frame(*parent, *key, *pos, *angle, *layer),
            Self::InsertPoint { at, point } => builder.insert_point(*at, *point),
            Self::InsertPoints { at, points } => builder.insert_points(*at, points),
            Self::InsertLine { at, line } => builder.insert_line(*at, *line),
            Self::InsertLines { at, lines } => builder.insert_lines(*at, lines),
            Self::InsertCircle { at, circle, filled } => {
                if *filled {
                    builder.insert_f_circle(*at, *circle)
                } else {
                    builder.insert_circle(*at, *circle)
                }
            }
            Self::InsertCircles { at, circles, filled } => {
                if *filled {
                    builder.insert_f_circles(*at, circles)
                } else {
                    builder.insert_circles(*at, circles)
                }
            }
            Self::InsertArc { at, arc, filled } => {
                if *filled {
                    builder.insert_f_arc(*at, *arc)
                } else {
                    builder.insert_arc(*at, *arc)
                }
            }
            Self::InsertArcs { at, arcs, filled } => {
                if *filled {
                    builder.insert_f_arcs(*at, arcs)
                } else {
                    builder.insert_arcs(*at, arcs)
                }
            }
            Self::InsertPolyline { at, vertices } => builder.insert_polyline(*at, vertices),
            Self::InsertPolygon {
                at,
                vertices,
                filled,
            } => {
                if *filled {
                    builder.insert_f_polygon(*at, vertices)
                } else {
                    builder.insert_polygon(*at, vertices)
                }
            }
            Self::InsertString { at, pos, text } => builder.insert_string(*at, *pos, text),
            Self::SetObjectVisible {
                frame,
                obj,
                visible,
            } => builder.set_object_visible(*frame, *obj, *visible),
            Self::SetObjectLayer { frame, obj, layer } => {
                builder.set_object_layer(*frame, *obj, *layer)
            }
            Self::SetObjectColor { frame, obj, color } => {
                builder.set_object_color(*frame, *obj, *color)
            }
            Self::SetFrameVisible { key, visible } => builder.set_frame_visible(*key, *visible),
            Self::SetFrameLayer { key, layer } => builder.set_frame_layer(*key, *layer),
            Self::SetFramePos { key, pos } => builder.set_frame_pos(*key, *pos),
            Self::SetFrameAngle { key, angle } => builder.set_frame_angle(*key, *angle),
            Self::SetFramePosAngle { key, pos, angle } => {
                builder.set_frame_pos_angle(*key, *pos, *angle)
            }
            Self::RemoveFrame { key } => builder.remove_frame(*key),
            Self::RemoveObject { frame, obj } => builder.remove_object(*frame, *obj),
            Self::EmptyFrame { key } => builder.empty_frame(*key),
        }
    }

    // -- Encoding --

    /// Appends the opcode and fields to `w`.
    ///
    /// Returns `false`, leaving `w` unchanged, if an array or the text is too
    /// long for an `i32` length prefix.
    pub fn encode(&self, w: &mut Writer) -> bool {
        let start = w.len();
        if self.encode_fields(w).is_none() {
            w.truncate(start);
            return false;
        }
        true
    }

    fn encode_fields(&self, w: &mut Writer) -> Option<()> {
        w.write_i32(self.opcode().to_i32());
        match self {
            Self::InsertFrame {
                parent,
                key,
                pos,
                angle,
                layer,
            } => {
                w.write_i32(*parent);
                w.write_i32(*key);
                w.write_point(*pos);
                w.write_angle(*angle);
                w.write_i32(*layer);
            }
            Self::InsertPoint { at, point } => {
                write_head(w, at);
                w.write_point(*point);
                write_tail(w, at);
            }
            Self::InsertPoints { at, points: ps }
            | Self::InsertPolyline { at, vertices: ps }
            | Self::InsertPolygon { at, vertices: ps, .. } => {
                write_head(w, at);
                write_count(w, ps.len())?;
                for p in ps {
                    w.write_point(*p);
                }
                write_tail(w, at);
            }
            Self::InsertLine { at, line } => {
                write_head(w, at);
                w.write_line(line);
                write_tail(w, at);
            }
            Self::InsertLines { at, lines } => {
                write_head(w, at);
                write_count(w, lines.len())?;
                for l in lines {
                    w.write_line(l);
                }
                write_tail(w, at);
            }
            Self::InsertCircle { at, circle, .. } => {
                write_head(w, at);
                w.write_circle(circle);
                write_tail(w, at);
            }
            Self::InsertCircles { at, circles, .. } => {
                write_head(w, at);
                write_count(w, circles.len())?;
                for c in circles {
                    w.write_circle(c);
                }
                write_tail(w, at);
            }
            Self::InsertArc { at, arc, .. } => {
                write_head(w, at);
                w.write_arc(arc);
                write_tail(w, at);
            }
            Self::InsertArcs { at, arcs, .. } => {
                write_head(w, at);
                write_count(w, arcs.len())?;
                for a in arcs {
                    w.write_arc(a);
                }
                write_tail(w, at);
            }
            Self::InsertString { at, pos, text } => {
                write_head(w, at);
                w.write_point(*pos);
                write_count(w, text.len())?;
                w.write_bytes(text.as_bytes());
                write_tail(w, at);
            }
            Self::SetObjectVisible {
                frame,
                obj,
                visible,
            } => {
                w.write_i32(*frame);
                w.write_i32(*obj);
                w.write_i32(i32::from(*visible));
            }
            Self::SetObjectLayer { frame, obj, layer } => {
                w.write_i32(*frame);
                w.write_i32(*obj);
                w.write_i32(*layer);
            }
            Self::SetObjectColor { frame, obj, color } => {
                w.write_i32(*frame);
                w.write_i32(*obj);
                w.write_color(*color);
            }
            Self::SetFrameVisible { key, visible } => {
                w.write_i32(*key);
                w.write_i32(i32::from(*visible));
            }
            Self::SetFrameLayer { key, layer } => {
                w.write_i32(*key);
                w.write_i32(*layer);
            }
            Self::SetFramePos { key, pos } => {
                w.write_i32(*key);
                w.write_point(*pos);
            }
            Self::SetFrameAngle { key, angle } => {
                w.write_i32(*key);
                w.write_angle(*angle);
            }
            Self::SetFramePosAngle { key, pos, angle } => {
                w.write_i32(*key);
                w.write_point(*pos);
                w.write_angle(*angle);
            }
            Self::RemoveObject { frame, obj } => {
                w.write_i32(*frame);
                w.write_i32(*obj);
            }
            Self::RemoveFrame { key } | Self::EmptyFrame { key } => w.write_i32(*key),
        }
        Some(())
    }

    // -- Decoding --

    /// Reads the next command from `r`.
    ///
    /// Returns `Ok(None)` when the stream is exhausted. On error the reader
    /// is left somewhere inside the failing command.
    pub fn decode(r: &mut Reader<'_>) -> Result<Option<Self>, DecodeError> {
        if r.is_empty() {
            return Ok(None);
        }
        let offset = r.position();
        let value = r.read_i32().ok_or(DecodeError::Truncated {
            offset,
            opcode: None,
        })?;
        let opcode = Opcode::from_i32(value).ok_or(DecodeError::UnknownOpcode { offset, value })?;
        let mut body = Body { r, opcode, offset };
        body.command().map(Some)
    }
}

fn write_head(w: &mut Writer, at: &Placement) {
    w.write_i32(at.parent);
    w.write_i32(at.key);
}

fn write_tail(w: &mut Writer, at: &Placement) {
    w.write_i32(at.layer);
    w.write_color(at.color);
}

fn write_count(w: &mut Writer, len: usize) -> Option<()> {
    w.write_i32(i32::try_from(len).ok()?);
    Some(())
}

/// Field reader for one command body, mapping short reads to errors.
struct Body<'r, 'a> {
    r: &'r mut Reader<'a>,
    opcode: Opcode,
    offset: usize,
}

impl<'a> Body<'_, 'a> {
    fn truncated(&self) -> DecodeError {
        DecodeError::Truncated {
            offset: self.offset,
            opcode: Some(self.opcode),
        }
    }

    fn get<T>(&mut self, read: impl FnOnce(&mut Reader<'a>) -> Option<T>) -> Result<T, DecodeError> {
        read(&mut *self.r).ok_or_else(|| self.truncated())
    }

    fn int(&mut self) -> Result<i32, DecodeError> {
        self.get(Reader::read_i32)
    }

    fn flag(&mut self) -> Result<bool, DecodeError> {
        self.int().map(|v| v != 0)
    }

    fn point(&mut self) -> Result<Point, DecodeError> {
        self.get(Reader::read_point)
    }

    fn angle(&mut self) -> Result<Angle, DecodeError> {
        self.get(Reader::read_angle)
    }

    fn color(&mut self) -> Result<Rgb, DecodeError> {
        self.get(Reader::read_color)
    }

    /// Reads an element count and checks that the elements can fit.
    fn count(&mut self, elem_size: usize) -> Result<usize, DecodeError> {
        let len = self.int()?;
        let n = usize::try_from(len).map_err(|_| DecodeError::InvalidLength {
            offset: self.offset,
            opcode: self.opcode,
            len,
        })?;
        if n.saturating_mul(elem_size) > self.r.remaining() {
            return Err(self.truncated());
        }
        Ok(n)
    }

    fn array<T>(
        &mut self,
        elem_size: usize,
        mut read: impl FnMut(&mut Reader<'a>) -> Option<T>,
    ) -> Result<Vec<T>, DecodeError> {
        let n = self.count(elem_size)?;
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            out.push(self.get(&mut read)?);
        }
        Ok(out)
    }

    fn text(&mut self) -> Result<String, DecodeError> {
        let n = self.count(1)?;
        let bytes = self.get(|r| r.read_bytes(n))?;
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn head(&mut self) -> Result<(Key, Key), DecodeError> {
        Ok((self.int()?, self.int()?))
    }

    fn tail(&mut self, (parent, key): (Key, Key)) -> Result<Placement, DecodeError> {
        let layer = self.int()?;
        let color = self.color()?;
        Ok(Placement::new(parent, key, layer, color))
    }

    fn command(&mut self) -> Result<Command, DecodeError> {
        let filled = matches!(
            self.opcode,
            Opcode::InsertFilledCircle
                | Opcode::InsertFilledCircles
                | Opcode::InsertFilledArc
                | Opcode::InsertFilledArcs
                | Opcode::InsertFilledPolygon
        );
        let cmd = match self.opcode {
            Opcode::InsertFrame => Command::InsertFrame {
                parent: self.int()?,
                key: self.int()?,
                pos: self.point()?,
                angle: self.angle()?,
                layer: self.int()?,
            },
            Opcode::InsertPoint => {
                let head = self.head()?;
                let point = self.point()?;
                Command::InsertPoint {
                    at: self.tail(head)?,
                    point,
                }
            }
            Opcode::InsertPoints => {
                let head = self.head()?;
                let points = self.array(size::POINT, Reader::read_point)?;
                Command::InsertPoints {
                    at: self.tail(head)?,
                    points,
                }
            }
            Opcode::InsertLine => {
                let head = self.head()?;
                let line = self.get(Reader::read_line)?;
                Command::InsertLine {
                    at: self.tail(head)?,
                    line,
                }
            }
            Opcode::InsertLines => {
                let head = self.head()?;
                let lines = self.array(size::LINE, Reader::read_line)?;
                Command::InsertLines {
                    at: self.tail(head)?,
                    lines,
                }
            }
            Opcode::InsertCircle | Opcode::InsertFilledCircle => {
                let head = self.head()?;
                let circle = self.get(Reader::read_circle)?;
                Command::InsertCircle {
                    at: self.tail(head)?,
                    circle,
                    filled,
                }
            }
            Opcode::InsertCircles | Opcode::InsertFilledCircles => {
                let head = self.head()?;
                let circles = self.array(size::CIRCLE, Reader::read_circle)?;
                Command::InsertCircles {
                    at: self.tail(head)?,
                    circles,
                    filled,
                }
            }
            Opcode::InsertArc | Opcode::InsertFilledArc => {
                let head = self.head()?;
                let arc = self.get(Reader::read_arc)?;
                Command::InsertArc {
                    at: self.tail(head)?,
                    arc,
                    filled,
                }
            }
            Opcode::InsertArcs | Opcode::InsertFilledArcs => {
                let head = self.head()?;
                let arcs = self.array(size::ARC, Reader::read_arc)?;
                Command::InsertArcs {
                    at: self.tail(head)?,
                    arcs,
                    filled,
                }
            }
            Opcode::InsertPolyline => {
                let head = self.head()?;
                let vertices = self.array(size::POINT, Reader::read_point)?;
                Command::InsertPolyline {
                    at: self.tail(head)?,
                    vertices,
                }
            }
            Opcode::InsertPolygon | Opcode::InsertFilledPolygon => {
                let head = self.head()?;
                let vertices = self.array(size::POINT, Reader::read_point)?;
                Command::InsertPolygon {
                    at: self.tail(head)?,
                    vertices,
                    filled,
                }
            }
            Opcode::InsertString => {
                let head = self.head()?;
                let pos = self.point()?;
                let text = self.text()?;
                Command::InsertString {
                    at: self.tail(head)?,
                    pos,
                    text,
                }
            }
            Opcode::SetObjectVisible => Command::SetObjectVisible {
                frame: self.int()?,
                obj: self.int()?,
                visible: self.flag()?,
            },
            Opcode::SetObjectLayer => Command::SetObjectLayer {
                frame: self.int()?,
                obj: self.int()?,
                layer: self.int()?,
            },
            Opcode::SetObjectColor => Command::SetObjectColor {
                frame: self.int()?,
                obj: self.int()?,
                color: self.color()?,
            },
            Opcode::SetFrameVisible => Command::SetFrameVisible {
                key: self.int()?,
                visible: self.flag()?,
            },
            Opcode::SetFrameLayer => Command::SetFrameLayer {
                key: self.int()?,
                layer: self.int()?,
            },
            Opcode::SetFramePos => Command::SetFramePos {
                key: self.int()?,
                pos: self.point()?,
            },
            Opcode::SetFrameAngle => Command::SetFrameAngle {
                key: self.int()?,
                angle: self.angle()?,
            },
            Opcode::SetFramePosAngle => Command::SetFramePosAngle {
                key: self.int()?,
                pos: self.point()?,
                angle: self.angle()?,
            },
            Opcode::RemoveFrame => Command::RemoveFrame { key: self.int()? },
            Opcode::RemoveObject => Command::RemoveObject {
                frame: self.int()?,
                obj: self.int()?,
            },
            Opcode::EmptyFrame => Command::EmptyFrame { key: self.int()? },
        };
        Ok(cmd)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    fn at() -> Placement {
        Placement::new(3, 7, -2, Rgb::new(10, 20, 30))
    }

    fn encoded(cmd: &Command) -> Vec<u8> {
        let mut w = Writer::new();
        assert!(cmd.encode(&mut w));
        w.into_bytes()
    }

    fn decoded(bytes: &[u8]) -> Result<Option<Command>, DecodeError> {
        Command::decode(&mut Reader::new(bytes))
    }

    #[test]
    fn frame_layout() {
        let cmd = Command::InsertFrame {
            parent: 0,
            key: 5,
            pos: Point::new(1.0, 2.0),
            angle: Angle::new(0.5),
            layer: 4,
        };
        let bytes = encoded(&cmd);
        assert_eq!(bytes.len(), 4 + 4 + 4 + size::POINT + size::REAL + 4);
        assert_eq!(&bytes[..4], &1_i32.to_be_bytes());
        assert_eq!(&bytes[4..8], &0_i32.to_be_bytes());
        assert_eq!(&bytes[8..12], &5_i32.to_be_bytes());
        assert_eq!(&bytes[bytes.len() - 4..], &4_i32.to_be_bytes());
        assert_eq!(decoded(&bytes), Ok(Some(cmd)));
    }

    #[test]
    fn insert_layout_puts_geometry_between_keys_and_style() {
        let cmd = Command::InsertPoint {
            at: at(),
            point: Point::new(1.5, -1.5),
        };
        let bytes = encoded(&cmd);
        assert_eq!(bytes.len(), 4 + 8 + size::POINT + 4 + 3);
        assert_eq!(&bytes[12..20], &1.5_f64.to_be_bytes());
        assert_eq!(&bytes[28..32], &(-2_i32).to_be_bytes());
        assert_eq!(&bytes[32..], &[10, 20, 30]);
        assert_eq!(decoded(&bytes), Ok(Some(cmd)));
    }

    #[test]
    fn filled_variants_pick_their_own_opcodes() {
        let circle = Circle::new((0.0, 0.0), 1.0);
        let outline = Command::InsertCircle {
            at: at(),
            circle,
            filled: false,
        };
        let filled = Command::InsertCircle {
            at: at(),
            circle,
            filled: true,
        };
        assert_eq!(outline.opcode(), Opcode::InsertCircle);
        assert_eq!(filled.opcode(), Opcode::InsertFilledCircle);
        assert_eq!(decoded(&encoded(&filled)), Ok(Some(filled)));

        let poly = Command::InsertPolygon {
            at: at(),
            vertices: vec![Point::ZERO, Point::new(1.0, 0.0), Point::new(0.0, 1.0)],
            filled: true,
        };
        assert_eq!(poly.opcode(), Opcode::InsertFilledPolygon);
        assert_eq!(decoded(&encoded(&poly)), Ok(Some(poly)));
    }

    #[test]
    fn counted_arrays_and_text() {
        let arcs = Command::InsertArcs {
            at: at(),
            arcs: vec![
                CircleArc::new(Point::ZERO, 1.0, Angle::ZERO, Angle::new(1.0)),
                CircleArc::new(Point::new(2.0, 2.0), 0.5, Angle::new(3.0), Angle::new(3.0)),
            ],
            filled: false,
        };
        let bytes = encoded(&arcs);
        assert_eq!(&bytes[12..16], &2_i32.to_be_bytes());
        assert_eq!(decoded(&bytes), Ok(Some(arcs)));

        let text = Command::InsertString {
            at: at(),
            pos: Point::new(4.0, 5.0),
            text: "goal!".into(),
        };
        assert_eq!(decoded(&encoded(&text)), Ok(Some(text)));
    }

    fn one_of_each() -> Vec<Command> {
        let circle = Circle::new((1.0, -1.0), 2.0);
        let arc = CircleArc::new(Point::new(0.5, 0.5), 1.5, Angle::new(0.25), Angle::new(1.0));
        let line = Line::new((0.0, 0.0), (3.0, 4.0));
        let tri = vec![Point::ZERO, Point::new(2.0, 0.0), Point::new(0.0, 2.0)];
        vec![
            Command::InsertFrame {
                parent: 0,
                key: 2,
                pos: Point::new(-1.0, 8.0),
                angle: Angle::new(0.75),
                layer: 1,
            },
            Command::InsertPoint {
                at: at(),
                point: Point::new(1.0, 2.0),
            },
            Command::InsertPoints {
                at: at(),
                points: tri.clone(),
            },
            Command::InsertLine {
                at: at(),
                line,
            },
            Command::InsertLines {
                at: at(),
                lines: vec![line, Line::new((1.0, 1.0), (-1.0, 0.0))],
            },
            Command::InsertCircle {
                at: at(),
                circle,
                filled: false,
            },
            Command::InsertCircles {
                at: at(),
                circles: vec![circle, circle],
                filled: false,
            },
            Command::InsertCircle {
                at: at(),
                circle,
                filled: true,
            },
            Command::InsertCircles {
                at: at(),
                circles: vec![circle],
                filled: true,
            },
            Command::InsertArc {
                at: at(),
                arc,
                filled: false,
            },
            Command::InsertArcs {
                at: at(),
                arcs: vec![arc, arc],
                filled: false,
            },
            Command::InsertArc {
                at: at(),
                arc,
                filled: true,
            },
            Command::InsertArcs {
                at: at(),
                arcs: vec![arc],
                filled: true,
            },
            Command::InsertPolyline {
                at: at(),
                vertices: tri.clone(),
            },
            Command::InsertPolygon {
                at: at(),
                vertices: tri.clone(),
                filled: false,
            },
            Command::InsertPolygon {
                at: at(),
                vertices: tri,
                filled: true,
            },
            Command::InsertString {
                at: at(),
                pos: Point::new(3.0, 3.0),
                text: "kick off".into(),
            },
            Command::SetObjectVisible {
                frame: 2,
                obj: 7,
                visible: false,
            },
            Command::SetObjectLayer {
                frame: 2,
                obj: 7,
                layer: -4,
            },
            Command::SetObjectColor {
                frame: 2,
                obj: 7,
                color: Rgb::new(255, 0, 9),
            },
            Command::SetFrameVisible {
                key: 2,
                visible: true,
            },
            Command::SetFrameLayer {
                key: 2,
                layer: 6,
            },
            Command::SetFramePos {
                key: 2,
                pos: Point::new(0.5, -0.5),
            },
            Command::SetFrameAngle {
                key: 2,
                angle: Angle::new(1.25),
            },
            Command::SetFramePosAngle {
                key: 2,
                pos: Point::new(9.0, 1.0),
                angle: Angle::new(2.0),
            },
            Command::RemoveFrame {
                key: 2,
            },
            Command::RemoveObject {
                frame: 2,
                obj: 7,
            },
            Command::EmptyFrame {
                key: 2,
            },
        ]
    }

    #[test]
    fn every_opcode_decodes_back() {
        let cmds = one_of_each();
        let opcodes: Vec<Opcode> = cmds.iter().map(Command::opcode).collect();
        assert_eq!(opcodes, Opcode::ALL);
        for cmd in cmds {
            let bytes = encoded(&cmd);
            assert_eq!(&bytes[..4], &cmd.opcode().to_i32().to_be_bytes());
            let mut r = Reader::new(&bytes);
            assert_eq!(Command::decode(&mut r), Ok(Some(cmd.clone())), "{cmd:?}");
            assert_eq!(r.position(), bytes.len(), "{cmd:?} left bytes unread");
        }
    }

    #[test]
    fn back_to_back_commands_share_a_stream() {
        let cmds = one_of_each();
        let mut w = Writer::new();
        for cmd in &cmds {
            assert!(cmd.encode(&mut w));
        }
        let mut r = Reader::new(w.as_bytes());
        for cmd in &cmds {
            assert_eq!(Command::decode(&mut r), Ok(Some(cmd.clone())));
        }
        assert_eq!(Command::decode(&mut r), Ok(None));
    }

    #[test]
    fn visibility_flag_is_any_nonzero_int() {
        let mut w = Writer::new();
        w.write_i32(Opcode::SetFrameVisible.to_i32());
        w.write_i32(4);
        w.write_i32(-9);
        assert_eq!(
            decoded(w.as_bytes()),
            Ok(Some(Command::SetFrameVisible {
                key: 4,
                visible: true
            }))
        );
    }

    #[test]
    fn empty_input_is_end_of_stream() {
        assert_eq!(decoded(&[]), Ok(None));
    }

    #[test]
    fn partial_opcode_is_truncated() {
        assert_eq!(
            decoded(&[0, 0]),
            Err(DecodeError::Truncated {
                offset: 0,
                opcode: None
            })
        );
    }

    #[test]
    fn unknown_opcode() {
        assert_eq!(
            decoded(&42_i32.to_be_bytes()),
            Err(DecodeError::UnknownOpcode { offset: 0, value: 42 })
        );
    }

    #[test]
    fn negative_count_is_invalid() {
        let mut w = Writer::new();
        w.write_i32(Opcode::InsertLines.to_i32());
        w.write_i32(0);
        w.write_i32(1);
        w.write_i32(-3);
        assert_eq!(
            decoded(w.as_bytes()),
            Err(DecodeError::InvalidLength {
                offset: 0,
                opcode: Opcode::InsertLines,
                len: -3
            })
        );
    }

    #[test]
    fn oversized_count_fails_before_allocating() {
        let mut w = Writer::new();
        w.write_i32(Opcode::InsertPoints.to_i32());
        w.write_i32(0);
        w.write_i32(1);
        w.write_i32(i32::MAX);
        assert_eq!(
            decoded(w.as_bytes()),
            Err(DecodeError::Truncated {
                offset: 0,
                opcode: Some(Opcode::InsertPoints)
            })
        );
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let mut w = Writer::new();
        w.write_i32(Opcode::InsertString.to_i32());
        w.write_i32(0);
        w.write_i32(1);
        w.write_point(Point::ZERO);
        w.write_i32(2);
        w.write_bytes(&[b'a', 0xff]);
        w.write_i32(0);
        w.write_color(Rgb::BLACK);
        let Ok(Some(Command::InsertString { text, .. })) = decoded(w.as_bytes()) else {
            panic!("string did not decode");
        };
        assert_eq!(text, "a\u{fffd}");
    }
}
