// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry kernel: angles, similarity transforms, arcs and viewport tests.
//!
//! Points, vectors, segments and circles are the [`kurbo`] types; this module
//! adds what kurbo does not model the way the wire format does.

mod angle;
mod arc;
mod area;
mod frame;

pub use angle::Angle;
pub use arc::CircleArc;
pub use area::{Area2d, clamp_radius};
pub use frame::Frame2d;

pub use kurbo::{Circle, Line, Point, Vec2};
