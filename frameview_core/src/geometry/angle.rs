// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Normalized radian angles.

use core::f64::consts::TAU;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// An angle in radians, always normalized into `[0, 2π)`.
///
/// Every constructor and every arithmetic operator re-normalizes, so the
/// stored value never leaves the half-open range. Non-finite input maps to
/// zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Angle(f64);

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self(0.0);

    /// Creates an angle from a raw radian value, normalizing it.
    #[inline]
    #[must_use]
    pub fn new(radians: f64) -> Self {
        Self(normalize(radians))
    }

    /// Creates an angle from degrees.
    #[inline]
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(degrees.to_radians())
    }

    /// Returns the normalized radian value in `[0, 2π)`.
    #[inline]
    #[must_use]
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// Returns the angle in degrees, in `[0, 360)`.
    #[inline]
    #[must_use]
    pub fn to_degrees(self) -> f64 {
        self.0.to_degrees()
    }
}

impl From<f64> for Angle {
    #[inline]
    fn from(radians: f64) -> Self {
        Self::new(radians)
    }
}

fn normalize(radians: f64) -> f64 {
    if !radians.is_finite() {
        return 0.0;
    }
    let mut r = radians % TAU;
    if r < 0.0 {
        r += TAU;
    }
    // `-ε + 2π` can round up to exactly 2π; also folds `-0.0` into `0.0`.
    if r >= TAU || r == 0.0 {
        return 0.0;
    }
    r
}

impl Add for Angle {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl AddAssign for Angle {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Angle {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.0 - rhs.0)
    }
}

impl SubAssign for Angle {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Angle {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI, TAU};

    use super::*;

    const SAMPLES: [f64; 12] = [
        0.0,
        -0.0,
        1.0,
        -1.0,
        PI,
        TAU,
        -TAU,
        7.5 * TAU + 0.25,
        -1.0e-18,
        1.0e12,
        -1.0e12,
        f64::MIN_POSITIVE,
    ];

    #[test]
    fn normalizes_into_half_open_range() {
        for d in SAMPLES {
            let a = Angle::new(d).radians();
            assert!((0.0..TAU).contains(&a), "{d} normalized to {a}");
        }
    }

    #[test]
    fn normalization_is_idempotent() {
        for d in SAMPLES {
            let once = Angle::new(d);
            let twice = Angle::new(once.radians());
            assert_eq!(once, twice, "re-normalizing {d} changed the value");
        }
    }

    #[test]
    fn non_finite_maps_to_zero() {
        assert_eq!(Angle::new(f64::NAN), Angle::ZERO);
        assert_eq!(Angle::new(f64::INFINITY), Angle::ZERO);
        assert_eq!(Angle::new(f64::NEG_INFINITY), Angle::ZERO);
    }

    #[test]
    fn full_turn_is_zero() {
        assert_eq!(Angle::new(TAU), Angle::ZERO);
        assert_eq!(Angle::new(-TAU), Angle::ZERO);
    }

    #[test]
    fn arithmetic_wraps() {
        let eps = 1e-9;
        let a = Angle::new(3.0 * FRAC_PI_2) + Angle::new(PI);
        assert!((a.radians() - FRAC_PI_2).abs() < eps);

        let b = Angle::new(FRAC_PI_2) - Angle::new(PI);
        assert!((b.radians() - 3.0 * FRAC_PI_2).abs() < eps);

        let mut c = Angle::new(PI);
        c += Angle::new(PI);
        assert_eq!(c, Angle::ZERO);
        c -= Angle::new(FRAC_PI_2);
        assert!((c.radians() - 3.0 * FRAC_PI_2).abs() < eps);
    }

    #[test]
    fn negation_stays_in_range() {
        assert_eq!(-Angle::ZERO, Angle::ZERO);
        let eps = 1e-9;
        let n = -Angle::new(FRAC_PI_2);
        assert!((n.radians() - 3.0 * FRAC_PI_2).abs() < eps);
    }

    #[test]
    fn degrees_round_trip() {
        let eps = 1e-9;
        let a = Angle::from_degrees(-90.0);
        assert!((a.to_degrees() - 270.0).abs() < eps);
    }
}
