// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Every record starts with a one-byte tag. Optional values take a presence
//! byte followed by a zeroed payload when absent, so a record's size depends
//! on its tag only.

use frameview_core::geometry::{Area2d, Point};
use frameview_core::protocol::Opcode;
use frameview_core::scene::ShapeKind;
use frameview_core::trace::{
    CommandEvent, DecodeSummary, FrameEvent, ObjectAction, ObjectEvent, PassBeginEvent, PassKind,
    PassSummary, TraceSink,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_PASS_BEGIN: u8 = 1;
const TAG_FRAME: u8 = 2;
const TAG_PASS_END: u8 = 3;
const TAG_COMMAND: u8 = 4;
const TAG_DECODE_END: u8 = 5;
const TAG_OBJECT: u8 = 6;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_option_u64(&mut self, v: Option<u64>) {
        match v {
            Some(val) => {
                self.write_u8(1);
                self.write_u64(val);
            }
            None => {
                self.write_u8(0);
                self.write_u64(0);
            }
        }
    }

    fn write_option_area(&mut self, v: Option<&Area2d>) {
        self.write_u8(u8::from(v.is_some()));
        let a = v.copied().unwrap_or_default();
        self.write_f64(a.center.x);
        self.write_f64(a.center.y);
        self.write_f64(a.size_x);
        self.write_f64(a.size_y);
    }

    fn write_pass(&mut self, k: PassKind) {
        self.write_u8(match k {
            PassKind::Actualize => 0,
            PassKind::Draw => 1,
        });
    }

    fn write_kind(&mut self, k: ShapeKind) {
        let i = ShapeKind::ALL.iter().position(|x| *x == k).unwrap_or(0);
        self.write_u8(u8::try_from(i).unwrap_or(u8::MAX));
    }
}

impl TraceSink for RecorderSink {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.write_u8(TAG_PASS_BEGIN);
        self.write_u64(e.cycle);
        self.write_pass(e.kind);
        self.write_option_area(e.viewport.as_ref());
    }

    fn on_frame_actualized(&mut self, e: &FrameEvent) {
        self.write_u8(TAG_FRAME);
        self.write_u64(e.cycle);
        self.write_i32(e.key);
        self.write_u32(e.depth);
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        self.write_u8(TAG_PASS_END);
        self.write_u64(s.cycle);
        self.write_u32(s.frames_recomputed);
        self.write_u32(s.objects_recomputed);
        self.write_u32(s.objects_drawn);
        self.write_u32(s.objects_culled);
        self.write_u32(s.handles_released);
    }

    fn on_command(&mut self, e: &CommandEvent) {
        self.write_u8(TAG_COMMAND);
        self.write_u64(e.index);
        self.write_i32(e.opcode.to_i32());
        self.write_u8(u8::from(e.applied));
    }

    fn on_decode_end(&mut self, s: &DecodeSummary) {
        self.write_u8(TAG_DECODE_END);
        self.write_u64(s.commands);
        self.write_u64(s.rejected);
        self.write_option_u64(s.error_offset.and_then(|o| u64::try_from(o).ok()));
    }

    fn on_object(&mut self, e: &ObjectEvent) {
        self.write_u8(TAG_OBJECT);
        self.write_u64(e.cycle);
        self.write_i32(e.frame);
        self.write_i32(e.key);
        self.write_kind(e.kind);
        self.write_i32(e.layer);
        self.write_u8(match e.action {
            ObjectAction::Drawn => 0,
            ObjectAction::Culled => 1,
        });
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A decoded event from a binary recording.
#[derive(Clone, Debug)]
pub enum RecordedEvent {
    /// A [`PassBeginEvent`].
    PassBegin(PassBeginEvent),
    /// A [`FrameEvent`].
    Frame(FrameEvent),
    /// A [`PassSummary`].
    PassEnd(PassSummary),
    /// A [`CommandEvent`].
    Command(CommandEvent),
    /// A [`DecodeSummary`].
    DecodeEnd(DecodeSummary),
    /// An [`ObjectEvent`].
    Object(ObjectEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn take<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.data.get(self.pos..self.pos + N)?.try_into().ok()?;
        self.pos += N;
        Some(bytes)
    }

    fn read_u8(&mut self) -> Option<u8> {
        self.take::<1>().map(|[b]| b)
    }

    fn read_i32(&mut self) -> Option<i32> {
        self.take().map(i32::from_le_bytes)
    }

    fn read_u32(&mut self) -> Option<u32> {
        self.take().map(u32::from_le_bytes)
    }

    fn read_u64(&mut self) -> Option<u64> {
        self.take().map(u64::from_le_bytes)
    }

    fn read_f64(&mut self) -> Option<f64> {
        self.take().map(f64::from_le_bytes)
    }

    fn read_option_u64(&mut self) -> Option<Option<u64>> {
        let present = self.read_u8()?;
        let val = self.read_u64()?;
        Some(if present != 0 { Some(val) } else { None })
    }

    fn read_option_area(&mut self) -> Option<Option<Area2d>> {
        let present = self.read_u8()?;
        let x = self.read_f64()?;
        let y = self.read_f64()?;
        let size_x = self.read_f64()?;
        let size_y = self.read_f64()?;
        Some((present != 0).then(|| Area2d::new(Point::new(x, y), size_x, size_y)))
    }

    fn read_pass(&mut self) -> Option<PassKind> {
        Some(match self.read_u8()? {
            0 => PassKind::Actualize,
            _ => PassKind::Draw,
        })
    }

    fn decode_pass_begin(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassBegin(PassBeginEvent {
            cycle: self.read_u64()?,
            kind: self.read_pass()?,
            viewport: self.read_option_area()?,
        }))
    }

    fn decode_frame(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Frame(FrameEvent {
            cycle: self.read_u64()?,
            key: self.read_i32()?,
            depth: self.read_u32()?,
        }))
    }

    fn decode_pass_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::PassEnd(PassSummary {
            cycle: self.read_u64()?,
            frames_recomputed: self.read_u32()?,
            objects_recomputed: self.read_u32()?,
            objects_drawn: self.read_u32()?,
            objects_culled: self.read_u32()?,
            handles_released: self.read_u32()?,
        }))
    }

    fn decode_command(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Command(CommandEvent {
            index: self.read_u64()?,
            opcode: Opcode::from_i32(self.read_i32()?)?,
            applied: self.read_u8()? != 0,
        }))
    }

    fn decode_decode_end(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::DecodeEnd(DecodeSummary {
            commands: self.read_u64()?,
            rejected: self.read_u64()?,
            error_offset: self
                .read_option_u64()?
                .and_then(|o| usize::try_from(o).ok()),
        }))
    }

    fn decode_object(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::Object(ObjectEvent {
            cycle: self.read_u64()?,
            frame: self.read_i32()?,
            key: self.read_i32()?,
            kind: ShapeKind::ALL
                .get(usize::from(self.read_u8()?))
                .copied()?,
            layer: self.read_i32()?,
            action: match self.read_u8()? {
                0 => ObjectAction::Drawn,
                _ => ObjectAction::Culled,
            },
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.read_u8()?;
        match tag {
            TAG_PASS_BEGIN => self.decode_pass_begin(),
            TAG_FRAME => self.decode_frame(),
            TAG_PASS_END => self.decode_pass_end(),
            TAG_COMMAND => self.decode_command(),
            TAG_DECODE_END => self.decode_decode_end(),
            TAG_OBJECT => self.decode_object(),
            _ => None, // unknown tag → stop iteration
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_summary() -> PassSummary {
        PassSummary {
            cycle: 7,
            frames_recomputed: 3,
            objects_recomputed: 12,
            objects_drawn: 10,
            objects_culled: 2,
            handles_released: 1,
        }
    }

    #[test]
    fn pass_with_viewport() {
        let mut rec = RecorderSink::new();
        let area = Area2d::new(Point::new(52.5, 34.0), 105.0, 68.0);
        rec.on_pass_begin(&PassBeginEvent {
            cycle: 7,
            kind: PassKind::Draw,
            viewport: Some(area),
        });
        rec.on_pass_end(&sample_summary());

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 2);
        match &events[0] {
            RecordedEvent::PassBegin(e) => {
                assert_eq!(e.cycle, 7);
                assert_eq!(e.kind, PassKind::Draw);
                assert_eq!(e.viewport, Some(area));
            }
            other => panic!("expected PassBegin, got {other:?}"),
        }
        match &events[1] {
            RecordedEvent::PassEnd(s) => assert_eq!(*s, sample_summary()),
            other => panic!("expected PassEnd, got {other:?}"),
        }
    }

    #[test]
    fn actualize_pass_has_no_viewport() {
        let mut rec = RecorderSink::new();
        rec.on_pass_begin(&PassBeginEvent {
            cycle: 1,
            kind: PassKind::Actualize,
            viewport: None,
        });
        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(matches!(
            events[..],
            [RecordedEvent::PassBegin(PassBeginEvent { viewport: None, .. })]
        ));
    }

    #[test]
    fn decode_stream_events() {
        let mut rec = RecorderSink::new();
        rec.on_command(&CommandEvent {
            index: 0,
            opcode: Opcode::InsertFrame,
            applied: true,
        });
        rec.on_command(&CommandEvent {
            index: 1,
            opcode: Opcode::SetFramePos,
            applied: false,
        });
        rec.on_decode_end(&DecodeSummary {
            commands: 2,
            rejected: 1,
            error_offset: Some(61),
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 3);
        match &events[1] {
            RecordedEvent::Command(e) => {
                assert_eq!(e.opcode, Opcode::SetFramePos);
                assert!(!e.applied);
            }
            other => panic!("expected Command, got {other:?}"),
        }
        match &events[2] {
            RecordedEvent::DecodeEnd(s) => assert_eq!(s.error_offset, Some(61)),
            other => panic!("expected DecodeEnd, got {other:?}"),
        }
    }

    #[test]
    fn frames_and_objects() {
        let mut rec = RecorderSink::new();
        rec.on_frame_actualized(&FrameEvent {
            cycle: 2,
            key: -4,
            depth: 3,
        });
        rec.on_object(&ObjectEvent {
            cycle: 2,
            frame: -4,
            key: 9,
            kind: ShapeKind::Polygon,
            layer: -1,
            action: ObjectAction::Culled,
        });

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert!(matches!(
            events[0],
            RecordedEvent::Frame(FrameEvent {
                key: -4,
                depth: 3,
                ..
            })
        ));
        match &events[1] {
            RecordedEvent::Object(e) => {
                assert_eq!(e.kind, ShapeKind::Polygon);
                assert_eq!(e.layer, -1);
                assert_eq!(e.action, ObjectAction::Culled);
            }
            other => panic!("expected Object, got {other:?}"),
        }
    }

    #[test]
    fn truncated_record_stops_iteration() {
        let mut rec = RecorderSink::new();
        rec.on_pass_end(&sample_summary());
        rec.on_pass_end(&sample_summary());
        let bytes = rec.into_bytes();
        let cut = &bytes[..bytes.len() - 3];
        assert_eq!(decode(cut).count(), 1);
    }

    #[test]
    fn empty_buffer_decodes_to_nothing() {
        let events: Vec<_> = decode(&[]).collect();
        assert!(events.is_empty());
    }
}
