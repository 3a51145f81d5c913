// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for decoding and drawing.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! decoder and the draw traversal call at each stage. All method bodies
//! default to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing (zero overhead). When
//! **on**, each method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`) adds per-object [`ObjectEvent`]s and the
//!   corresponding `TraceSink` method.

use crate::geometry::Area2d;
use crate::protocol::Opcode;
use crate::scene::{DrawStats, Key};
#[cfg(feature = "trace-rich")]
use crate::scene::ShapeKind;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Which kind of tree traversal is being traced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PassKind {
    /// Recompute world geometry only.
    Actualize,
    /// Recompute, cull and emit draw calls.
    Draw,
}

/// What happened to an object during a draw pass.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectAction {
    /// A draw or fill call was emitted.
    Drawn,
    /// The viewport test rejected the object.
    Culled,
}

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a traversal starts.
#[derive(Clone, Copy, Debug)]
pub struct PassBeginEvent {
    /// Monotonic traversal counter.
    pub cycle: u64,
    /// Traversal kind.
    pub kind: PassKind,
    /// Viewport used for culling, for draw passes.
    pub viewport: Option<Area2d>,
}

/// Emitted when a frame's world transform is recomputed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameEvent {
    /// Traversal counter.
    pub cycle: u64,
    /// Key of the recomputed frame.
    pub key: Key,
    /// Depth below the root (the root is 0).
    pub depth: u32,
}

/// Emitted when a traversal finishes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassSummary {
    /// Traversal counter.
    pub cycle: u64,
    /// Frames whose world transform was recomputed.
    pub frames_recomputed: u32,
    /// Objects whose world geometry was recomputed.
    pub objects_recomputed: u32,
    /// Objects handed to the display.
    pub objects_drawn: u32,
    /// Objects rejected by the viewport test.
    pub objects_culled: u32,
    /// Display handles released before the pass.
    pub handles_released: u32,
}

impl PassSummary {
    /// Creates a summary from the counts of one traversal.
    #[must_use]
    pub const fn new(cycle: u64, stats: &DrawStats) -> Self {
        Self {
            cycle,
            frames_recomputed: stats.frames_recomputed,
            objects_recomputed: stats.objects_recomputed,
            objects_drawn: stats.objects_drawn,
            objects_culled: stats.objects_culled,
            handles_released: stats.handles_released,
        }
    }
}

/// Emitted for every command the binary decoder hands to a builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandEvent {
    /// Position of the command in its stream, from 0.
    pub index: u64,
    /// Decoded opcode.
    pub opcode: Opcode,
    /// Whether the builder accepted the command.
    pub applied: bool,
}

/// Emitted when a decode loop stops.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeSummary {
    /// Commands decoded.
    pub commands: u64,
    /// Commands the builder rejected.
    pub rejected: u64,
    /// Byte offset of a framing error, if the stream was malformed.
    pub error_offset: Option<usize>,
}

/// Emitted per object during a draw pass (requires `trace-rich`).
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObjectEvent {
    /// Traversal counter.
    pub cycle: u64,
    /// Key of the owning frame.
    pub frame: Key,
    /// Key of the object (zero if anonymous).
    pub key: Key,
    /// Geometry kind.
    pub kind: ShapeKind,
    /// Draw-order layer.
    pub layer: i32,
    /// Whether it was drawn or culled.
    pub action: ObjectAction,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from decoding and drawing.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a traversal starts.
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        _ = e;
    }

    /// Called when a frame's world transform is recomputed.
    fn on_frame_actualized(&mut self, e: &FrameEvent) {
        _ = e;
    }

    /// Called when a traversal finishes.
    fn on_pass_end(&mut self, s: &PassSummary) {
        _ = s;
    }

    /// Called for every decoded command.
    fn on_command(&mut self, e: &CommandEvent) {
        _ = e;
    }

    /// Called when a decode loop stops.
    fn on_decode_end(&mut self, s: &DecodeSummary) {
        _ = s;
    }

    /// Called per drawn or culled object (requires `trace-rich` feature).
    #[cfg(feature = "trace-rich")]
    fn on_object(&mut self, e: &ObjectEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`PassBeginEvent`].
    #[inline]
    pub fn pass_begin(&mut self, e: &PassBeginEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_pass_begin(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`FrameEvent`].
    #[inline]
    pub fn frame_actualized(&mut self, e: &FrameEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_frame_actualized(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`PassSummary`].
    #[inline]
    pub fn pass_end(&mut self, s: &PassSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_pass_end(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits a [`CommandEvent`].
    #[inline]
    pub fn command(&mut self, e: &CommandEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_command(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`DecodeSummary`].
    #[inline]
    pub fn decode_end(&mut self, s: &DecodeSummary) {
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut self.sink {
            sink.on_decode_end(s);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = s;
        }
    }

    /// Emits an [`ObjectEvent`].
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn object(&mut self, e: &ObjectEvent) {
        if let Some(s) = &mut self.sink {
            s.on_object(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_stats() -> DrawStats {
        DrawStats {
            frames_recomputed: 3,
            objects_recomputed: 5,
            objects_drawn: 4,
            objects_culled: 1,
            handles_released: 2,
        }
    }

    #[test]
    fn pass_summary_copies_stats() {
        let s = PassSummary::new(9, &sample_stats());
        assert_eq!(s.cycle, 9);
        assert_eq!(s.frames_recomputed, 3);
        assert_eq!(s.objects_recomputed, 5);
        assert_eq!(s.objects_drawn, 4);
        assert_eq!(s.objects_culled, 1);
        assert_eq!(s.handles_released, 2);
    }

    #[test]
    fn noop_sink_compiles() {
        let mut sink = NoopSink;
        sink.on_pass_begin(&PassBeginEvent {
            cycle: 0,
            kind: PassKind::Draw,
            viewport: None,
        });
        sink.on_pass_end(&PassSummary::default());
        sink.on_command(&CommandEvent {
            index: 0,
            opcode: Opcode::InsertFrame,
            applied: true,
        });
        sink.on_decode_end(&DecodeSummary::default());
    }

    #[test]
    fn tracer_none_does_nothing() {
        let mut tracer = Tracer::none();
        tracer.frame_actualized(&FrameEvent {
            cycle: 1,
            key: 4,
            depth: 1,
        });
        tracer.decode_end(&DecodeSummary::default());
    }

    #[cfg(feature = "trace")]
    #[test]
    fn tracer_dispatches_to_sink() {
        use alloc::vec::Vec;

        struct RecordingSink {
            frames: Vec<Key>,
            commands: Vec<(Opcode, bool)>,
        }
        impl TraceSink for RecordingSink {
            fn on_frame_actualized(&mut self, e: &FrameEvent) {
                self.frames.push(e.key);
            }

            fn on_command(&mut self, e: &CommandEvent) {
                self.commands.push((e.opcode, e.applied));
            }
        }

        let mut sink = RecordingSink {
            frames: Vec::new(),
            commands: Vec::new(),
        };
        let mut tracer = Tracer::new(&mut sink);
        tracer.frame_actualized(&FrameEvent {
            cycle: 1,
            key: 42,
            depth: 2,
        });
        tracer.command(&CommandEvent {
            index: 0,
            opcode: Opcode::RemoveFrame,
            applied: false,
        });
        // Access sink after tracer is dropped.
        drop(tracer);
        assert_eq!(sink.frames, &[42]);
        assert_eq!(sink.commands, &[(Opcode::RemoveFrame, false)]);
    }
}
