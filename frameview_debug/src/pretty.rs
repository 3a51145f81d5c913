// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use frameview_core::trace::{
    CommandEvent, DecodeSummary, FrameEvent, ObjectAction, ObjectEvent, PassBeginEvent, PassKind,
    PassSummary, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
    objects: bool,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink")
            .field("objects", &self.objects)
            .finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(Box::new(std::io::stderr()))
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            objects: false,
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self {
            writer,
            objects: false,
        }
    }

    /// Also prints one line per drawn or culled object.
    #[must_use]
    pub fn with_objects(mut self, objects: bool) -> Self {
        self.objects = objects;
        self
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn pass_name(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Actualize => "actualize",
        PassKind::Draw => "draw",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        let _ = match &e.viewport {
            Some(a) => writeln!(
                self.writer,
                "[pass:begin] cycle={} {} view=({:.2},{:.2}) {:.2}x{:.2}",
                e.cycle,
                pass_name(e.kind),
                a.center.x,
                a.center.y,
                a.size_x,
                a.size_y,
            ),
            None => writeln!(
                self.writer,
                "[pass:begin] cycle={} {}",
                e.cycle,
                pass_name(e.kind),
            ),
        };
    }

    fn on_frame_actualized(&mut self, e: &FrameEvent) {
        let _ = writeln!(
            self.writer,
            "[frame] cycle={} key={} depth={}",
            e.cycle, e.key, e.depth,
        );
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        let _ = writeln!(
            self.writer,
            "[pass:end] cycle={} frames={} objects={} drawn={} culled={} released={}",
            s.cycle,
            s.frames_recomputed,
            s.objects_recomputed,
            s.objects_drawn,
            s.objects_culled,
            s.handles_released,
        );
    }

    fn on_command(&mut self, e: &CommandEvent) {
        let status = if e.applied { "ok" } else { "REJECTED" };
        let _ = writeln!(
            self.writer,
            "[cmd] #{} {} {status}",
            e.index, e.opcode,
        );
    }

    fn on_decode_end(&mut self, s: &DecodeSummary) {
        let _ = match s.error_offset {
            Some(offset) => writeln!(
                self.writer,
                "[decode:end] commands={} rejected={} ERROR at byte {offset}",
                s.commands, s.rejected,
            ),
            None => writeln!(
                self.writer,
                "[decode:end] commands={} rejected={}",
                s.commands, s.rejected,
            ),
        };
    }

    fn on_object(&mut self, e: &ObjectEvent) {
        if !self.objects {
            return;
        }
        let action = match e.action {
            ObjectAction::Drawn => "drawn",
            ObjectAction::Culled => "culled",
        };
        let _ = writeln!(
            self.writer,
            "[object] cycle={} frame={} key={} {} layer={} {action}",
            e.cycle,
            e.frame,
            e.key,
            e.kind.name(),
            e.layer,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frameview_core::protocol::Opcode;
    use frameview_core::scene::ShapeKind;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_inner()).unwrap()
    }

    #[test]
    fn pretty_print_pass() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_pass_begin(&PassBeginEvent {
            cycle: 3,
            kind: PassKind::Actualize,
            viewport: None,
        });
        sink.on_pass_end(&PassSummary {
            cycle: 3,
            frames_recomputed: 2,
            ..PassSummary::default()
        });
        let out = output(sink);
        assert!(out.contains("[pass:begin] cycle=3 actualize"), "got: {out}");
        assert!(out.contains("frames=2"), "got: {out}");
    }

    #[test]
    fn rejected_commands_stand_out() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_command(&CommandEvent {
            index: 4,
            opcode: Opcode::RemoveFrame,
            applied: false,
        });
        sink.on_decode_end(&DecodeSummary {
            commands: 5,
            rejected: 1,
            error_offset: Some(40),
        });
        let out = output(sink);
        assert!(out.contains("#4 remove_frame REJECTED"), "got: {out}");
        assert!(out.contains("ERROR at byte 40"), "got: {out}");
    }

    #[test]
    fn objects_are_opt_in() {
        let e = ObjectEvent {
            cycle: 1,
            frame: 2,
            key: 3,
            kind: ShapeKind::Circle,
            layer: 0,
            action: ObjectAction::Culled,
        };
        let mut quiet = PrettyPrintSink::with_writer(Vec::<u8>::new());
        quiet.on_object(&e);
        assert!(output(quiet).is_empty());

        let mut loud = PrettyPrintSink::with_writer(Vec::<u8>::new()).with_objects(true);
        loud.on_object(&e);
        assert!(output(loud).contains("culled"));
    }
}
