// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Recording, pretty-printing and export helpers for frameview diagnostics.
//!
//! This crate provides [`TraceSink`](frameview_core::trace::TraceSink)
//! implementations and a headless [`Display`](frameview_core::display::Display)
//! for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: compact binary recording with
//!   [`recorder::decode`] for playback.
//! - [`chrome::export`]: writes Chrome Trace Event Format JSON from recorded
//!   bytes.
//! - [`display::RecordingDisplay`]: logs every backend call and dumps the
//!   draw list as JSON.

pub mod chrome;
pub mod display;
pub mod pretty;
pub mod recorder;
