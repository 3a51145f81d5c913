// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][spec] JSON to the given writer.
//!
//! Recordings carry no wall-clock time. Each event's position in the
//! recording is used as its timestamp in microseconds, so the viewer shows
//! ordering and nesting rather than durations.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use frameview_core::trace::{ObjectAction, PassKind};

use crate::recorder::{RecordedEvent, decode};

const TID_DRAW: u32 = 0;
const TID_DECODE: u32 = 1;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
/// Draw passes become duration spans; everything else is an instant event.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();
    let mut open: Option<PassKind> = None;

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::PassBegin(e) => {
                let viewport = e.viewport.map(|a| {
                    json!({
                        "x": a.center.x,
                        "y": a.center.y,
                        "width": a.size_x,
                        "height": a.size_y,
                    })
                });
                open = Some(e.kind);
                events.push(json!({
                    "ph": "B",
                    "name": pass_name(e.kind),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DRAW,
                    "args": {
                        "cycle": e.cycle,
                        "viewport": viewport,
                    }
                }));
            }
            RecordedEvent::Frame(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "Actualize",
                    "cat": "Frame",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DRAW,
                    "s": "t",
                    "args": {
                        "cycle": e.cycle,
                        "key": e.key,
                        "depth": e.depth,
                    }
                }));
            }
            RecordedEvent::PassEnd(s) => {
                let kind = open.take().unwrap_or(PassKind::Draw);
                events.push(json!({
                    "ph": "E",
                    "name": pass_name(kind),
                    "cat": "Pass",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DRAW,
                    "args": {
                        "cycle": s.cycle,
                        "frames_recomputed": s.frames_recomputed,
                        "objects_recomputed": s.objects_recomputed,
                        "objects_drawn": s.objects_drawn,
                        "objects_culled": s.objects_culled,
                        "handles_released": s.handles_released,
                    }
                }));
            }
            RecordedEvent::Command(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": e.opcode.name(),
                    "cat": "Decode",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DECODE,
                    "s": "t",
                    "args": {
                        "index": e.index,
                        "applied": e.applied,
                    }
                }));
            }
            RecordedEvent::DecodeEnd(s) => {
                events.push(json!({
                    "ph": "i",
                    "name": "DecodeEnd",
                    "cat": "Decode",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DECODE,
                    "s": "p",
                    "args": {
                        "commands": s.commands,
                        "rejected": s.rejected,
                        "error_offset": s.error_offset,
                    }
                }));
            }
            RecordedEvent::Object(e) => {
                let action = match e.action {
                    ObjectAction::Drawn => "drawn",
                    ObjectAction::Culled => "culled",
                };
                events.push(json!({
                    "ph": "i",
                    "name": e.kind.name(),
                    "cat": "Rich",
                    "ts": ts,
                    "pid": 0,
                    "tid": TID_DRAW,
                    "s": "t",
                    "args": {
                        "cycle": e.cycle,
                        "frame": e.frame,
                        "key": e.key,
                        "layer": e.layer,
                        "action": action,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn pass_name(kind: PassKind) -> &'static str {
    match kind {
        PassKind::Actualize => "Actualize",
        PassKind::Draw => "Draw",
    }
}
