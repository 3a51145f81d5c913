// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene graph and command protocol for 2D simulation viewers.
//!
//! `frameview_core` holds a tree of coordinate frames carrying visual objects,
//! recomputes world geometry incrementally when frames move, and hands the
//! visible objects to a pluggable [`Display`](display::Display) in layer
//! order. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! A producer (typically a simulation) describes the scene through the
//! [`Builder`](builder::Builder) vocabulary. The same vocabulary is spoken by
//! the binary wire protocol and by text scripts:
//!
//! ```text
//!   byte stream ──► protocol::decode_stream ──┐
//!                                             ▼
//!   text script ──► ascii::process ─────► Builder ──► BuilderDirect
//!                                             │             │
//!   Encoder ◄─────────────────────────────────┘             ▼
//!   (re-serializes)                                      DrawTree
//!                                                           │
//!                         Viewport area ──► draw() ─────────┤
//!                                                           ▼
//!                                             Display (create / draw / release)
//! ```
//!
//! **[`scene`]**: Arena-backed frame tree with caller-chosen keys, per-frame
//! change flags and layer-ordered children. The draw traversal recomputes
//! only changed subtrees and culls objects outside the view area.
//!
//! **[`geometry`]**: Angles, similarity transforms ([`Frame2d`](geometry::Frame2d)),
//! circle arcs and the axis-aligned view area with its intersection tests.
//!
//! **[`protocol`]**: The binary command format: opcodes, a big-endian
//! [`Reader`](protocol::wire::Reader)/[`Writer`](protocol::wire::Writer)
//! pair, a [`Command`](protocol::Command) enum, a stream decoder and an
//! [`Encoder`](protocol::Encoder) that is itself a builder.
//!
//! **[`ascii`]**: A line-oriented text syntax for the same commands.
//!
//! **[`builder`]**: The [`Builder`](builder::Builder) trait and
//! [`BuilderDirect`](builder::BuilderDirect), which applies commands to a
//! [`DrawTree`](scene::DrawTree).
//!
//! **[`viewport`]**: Fits a requested area to the window's proportions and
//! optional size limits.
//!
//! **[`display`]**: The backend contract and per-object handles.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! pass and decode instrumentation, with zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-object
//!   draw and cull events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod ascii;
pub mod builder;
pub mod color;
pub mod display;
pub mod geometry;
pub mod protocol;
pub mod scene;
pub mod trace;
pub mod viewport;
