// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular arcs.

use core::f64::consts::TAU;

use kurbo::{Circle, Point};

use super::Angle;

/// A circular arc running counter-clockwise from `start` to `end`.
///
/// Equal start and end angles denote a full circle, not an empty arc.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CircleArc {
    /// Center of the supporting circle.
    pub center: Point,
    /// Radius of the supporting circle.
    pub radius: f64,
    /// Angle where the arc begins.
    pub start: Angle,
    /// Angle where the arc ends.
    pub end: Angle,
}

impl CircleArc {
    /// Creates an arc.
    #[inline]
    #[must_use]
    pub const fn new(center: Point, radius: f64, start: Angle, end: Angle) -> Self {
        Self {
            center,
            radius,
            start,
            end,
        }
    }

    /// Returns `true` when the arc sweeps the whole circle.
    #[inline]
    #[must_use]
    pub fn is_full_circle(&self) -> bool {
        self.start == self.end
    }

    /// Returns the swept angle in radians, in `(0, 2π]`.
    #[must_use]
    pub fn sweep(&self) -> f64 {
        if self.is_full_circle() {
            TAU
        } else {
            (self.end - self.start).radians()
        }
    }

    /// Returns `(from, to)` in radians for rendering, with `to > from`.
    ///
    /// A full circle renders as `(0, 2π)` regardless of where it starts.
    #[must_use]
    pub fn span(&self) -> (f64, f64) {
        if self.is_full_circle() {
            (0.0, TAU)
        } else {
            let from = self.start.radians();
            (from, from + self.sweep())
        }
    }

    /// Returns the supporting circle.
    #[inline]
    #[must_use]
    pub const fn circle(&self) -> Circle {
        Circle {
            center: self.center,
            radius: self.radius,
        }
    }
}
