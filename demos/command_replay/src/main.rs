// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replays a small match through the whole pipeline.
//!
//! The pitch is written as a text script and converted to the binary wire
//! format with an [`Encoder`]. Every cycle then encodes a few movement
//! commands, decodes them into a [`BuilderDirect`] and draws into a
//! [`RecordingDisplay`]. Events go to both a
//! [`PrettyPrintSink`](frameview_debug::pretty::PrettyPrintSink) and a
//! [`RecorderSink`](frameview_debug::recorder::RecorderSink); the recording
//! is exported as Chrome trace JSON and the last draw list as plain JSON.
//!
//! Set `RUST_LOG=debug` to see rejected commands.

use std::error::Error;
use std::fs::File;
use std::io::BufWriter;

use frameview_core::ascii;
use frameview_core::builder::{Builder, BuilderDirect};
use frameview_core::geometry::{Angle, Point};
use frameview_core::protocol::{Encoder, decode_stream_traced};
use frameview_core::trace::{
    CommandEvent, DecodeSummary, FrameEvent, ObjectEvent, PassBeginEvent, PassSummary, TraceSink,
    Tracer,
};

use frameview_debug::display::RecordingDisplay;
use frameview_debug::pretty::PrettyPrintSink;
use frameview_debug::recorder::RecorderSink;

const CYCLES: u32 = 40;
const BALL: i32 = 100;
const PLAYERS: i32 = 4;

/// Window settings and status text. The wire format has no opcodes for
/// these, so they go straight to the builder.
const HEADER: &str = r#"
    VA (52.5,34,115,78);
    BG 1e6b1e;
    SL "replay";
"#;

const PITCH: &str = r#"
    INS FRAME id=1 lay=-1;
    INS 1 POLYGON id=1 col=ffffff (0,0)(105,0)(105,68)(0,68);
    INS 1 LINE id=2 col=ffffff (52.5,0,52.5,68);
    INS 1 CIRCLE id=3 col=ffffff (52.5,34,9.15);
    INS 1 GRID id=4 col=2a7f2a ((0,0)(105,0):1(0,68):4);
    INS 1 STR_GRID id=0 col=c0c0c0 ((5,-3)(95,0):2(0,0):1 "home" "away");
    INS FRAME id=100 lay=5 (52.5,34);
    INS 100 CIRCLE id=1 col=ffffff fil=1 (0,0,0.4);
"#;

/// Forwards every event to two sinks.
struct Tee<'a> {
    a: &'a mut dyn TraceSink,
    b: &'a mut dyn TraceSink,
}

impl TraceSink for Tee<'_> {
    fn on_pass_begin(&mut self, e: &PassBeginEvent) {
        self.a.on_pass_begin(e);
        self.b.on_pass_begin(e);
    }

    fn on_frame_actualized(&mut self, e: &FrameEvent) {
        self.a.on_frame_actualized(e);
        self.b.on_frame_actualized(e);
    }

    fn on_pass_end(&mut self, s: &PassSummary) {
        self.a.on_pass_end(s);
        self.b.on_pass_end(s);
    }

    fn on_command(&mut self, e: &CommandEvent) {
        self.a.on_command(e);
        self.b.on_command(e);
    }

    fn on_decode_end(&mut self, s: &DecodeSummary) {
        self.a.on_decode_end(s);
        self.b.on_decode_end(s);
    }

    fn on_object(&mut self, e: &ObjectEvent) {
        self.a.on_object(e);
        self.b.on_object(e);
    }
}

fn player_script(key: i32) -> String {
    let x = 10.0 + 18.0 * f64::from(key);
    let color = if key % 2 == 0 { "d02020" } else { "2020d0" };
    format!(
        "INS FRAME id={key} lay=2 ({x},34);\
         INS {key} CIRCLE id=1 col={color} fil=1 (0,0,1);\
         INS {key} LINE id=2 col={color} (0,0,1.5,0);"
    )
}

/// Movement for one cycle: the ball orbits the center spot, players turn.
fn encode_cycle(enc: &mut Encoder, cycle: u32) {
    let t = f64::from(cycle) * 0.15;
    enc.set_frame_pos(BALL, Point::new(52.5 + 20.0 * t.cos(), 34.0 + 12.0 * t.sin()));
    for key in 2..2 + PLAYERS {
        enc.set_frame_angle(key, Angle::new(t * f64::from(key)));
    }
    if cycle == 10 {
        enc.set_frame_visible(3, false);
    }
    if cycle == 20 {
        enc.set_frame_visible(3, true);
        enc.remove_frame(4);
    }
    if cycle == 30 {
        // Already gone; counted as rejected.
        enc.remove_frame(4);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    // -- sinks -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();

    // -- scene -------------------------------------------------------------
    let mut direct = BuilderDirect::new();
    direct.viewport_mut().set_window_size(1050, 680);
    ascii::process(HEADER, &mut direct)?;

    let mut enc = Encoder::new();
    let mut script = String::from(PITCH);
    for key in 2..2 + PLAYERS {
        script.push_str(&player_script(key));
    }
    let report = ascii::process(&script, &mut enc)?;
    log::info!(
        "pitch script: {} commands, {} bytes",
        report.commands,
        enc.as_bytes().len()
    );

    let mut display = RecordingDisplay::new();
    {
        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        decode_stream_traced(enc.as_bytes(), &mut direct, &mut tracer)?;
    }

    // -- replay ------------------------------------------------------------
    for cycle in 0..CYCLES {
        enc.clear();
        encode_cycle(&mut enc, cycle);
        display.clear();

        let mut tee = Tee {
            a: &mut pretty,
            b: &mut recorder,
        };
        let mut tracer = Tracer::new(&mut tee);
        let report = decode_stream_traced(enc.as_bytes(), &mut direct, &mut tracer)?;
        if report.rejected > 0 {
            log::warn!("cycle {cycle}: {} commands rejected", report.rejected);
        }
        let stats = direct.draw_traced(&mut display, &mut tracer);
        log::debug!("cycle {cycle}: {stats:?}");
    }

    // -- export ------------------------------------------------------------
    let path = "trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    frameview_debug::chrome::export(recorder.as_bytes(), &mut writer)?;

    let draw_path = "draw_list.json";
    let writer = BufWriter::new(File::create(draw_path)?);
    serde_json::to_writer_pretty(writer, &display.to_json())?;

    log::info!(
        "wrote {path} and {draw_path} ({CYCLES} cycles, {} live handles, status {:?})",
        display.live_handles(),
        direct.status_line(),
    );
    Ok(())
}
