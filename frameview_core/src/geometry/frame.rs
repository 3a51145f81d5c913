// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! 2D similarity transforms.
//!
//! [`Frame2d`] covers exactly what the scene graph needs: rotation, uniform
//! scale and translation, with composition via `*`. Applying a frame to a
//! [`Point`] includes the translation; applying it to a [`Vec2`] does not.

use core::ops::Mul;

use kurbo::{Point, Vec2};

use super::Angle;

/// A 2D similarity transform stored as `(scale, n_x, n_y, p_x, p_y)`.
///
/// `(n_x, n_y)` is the image of the unit x axis, so `n_x = scale·cos θ` and
/// `n_y = scale·sin θ`; `(p_x, p_y)` is the translation. The fields are kept
/// private so that `n_x² + n_y² = scale²` always holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame2d {
    scale: f64,
    n_x: f64,
    n_y: f64,
    p_x: f64,
    p_y: f64,
}

impl Default for Frame2d {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Frame2d {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale: 1.0,
        n_x: 1.0,
        n_y: 0.0,
        p_x: 0.0,
        p_y: 0.0,
    };

    /// Creates a pure translation.
    #[inline]
    #[must_use]
    pub const fn translation(x: f64, y: f64) -> Self {
        Self {
            p_x: x,
            p_y: y,
            ..Self::IDENTITY
        }
    }

    /// Creates a pure rotation about the origin.
    #[inline]
    #[must_use]
    pub fn rotation(angle: Angle) -> Self {
        let n = Vec2::from_angle(angle.radians());
        Self {
            n_x: n.x,
            n_y: n.y,
            ..Self::IDENTITY
        }
    }

    /// Creates a uniform scale about the origin.
    #[inline]
    #[must_use]
    pub const fn scaling(scale: f64) -> Self {
        Self {
            scale,
            n_x: scale,
            ..Self::IDENTITY
        }
    }

    /// Creates `Translation(pos) * Rotation(angle)`: a frame placed at `pos`
    /// and turned by `angle`.
    #[inline]
    #[must_use]
    pub fn from_pos_angle(pos: Point, angle: Angle) -> Self {
        Self::translation(pos.x, pos.y) * Self::rotation(angle)
    }

    /// Returns the uniform scale factor.
    #[inline]
    #[must_use]
    pub const fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the rotation angle.
    ///
    /// A frame with zero scale has no defined rotation and reports zero.
    #[inline]
    #[must_use]
    pub fn angle(&self) -> Angle {
        Angle::new(Vec2::new(self.n_x, self.n_y).atan2())
    }

    /// Returns the translation part.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> Point {
        Point::new(self.p_x, self.p_y)
    }

    /// Returns the image of the unit x axis (length `scale`).
    #[inline]
    #[must_use]
    pub const fn x_axis(&self) -> Vec2 {
        Vec2::new(self.n_x, self.n_y)
    }

    /// Returns the image of the unit y axis (length `scale`).
    #[inline]
    #[must_use]
    pub const fn y_axis(&self) -> Vec2 {
        Vec2::new(-self.n_y, self.n_x)
    }

    /// Replaces the translation part.
    #[inline]
    pub const fn set_position(&mut self, pos: Point) {
        self.p_x = pos.x;
        self.p_y = pos.y;
    }

    /// Replaces the rotation, keeping scale and translation.
    pub fn set_angle(&mut self, angle: Angle) {
        let n = Vec2::from_angle(angle.radians()) * self.scale;
        self.n_x = n.x;
        self.n_y = n.y;
    }

    /// Points the x axis along `dir`, keeping scale and translation.
    ///
    /// A zero vector means angle zero.
    pub fn set_angle_from_vec(&mut self, dir: Vec2) {
        let len = dir.hypot();
        if len == 0.0 {
            self.n_x = self.scale;
            self.n_y = 0.0;
            return;
        }
        self.n_x = dir.x / len * self.scale;
        self.n_y = dir.y / len * self.scale;
    }

    /// Replaces the scale, rescaling the rotation components proportionally.
    ///
    /// A frame whose scale was zero has lost its rotation; it comes back
    /// unrotated.
    pub fn set_scale(&mut self, scale: f64) {
        if self.scale == 0.0 {
            self.n_x = scale;
            self.n_y = 0.0;
        } else {
            let k = scale / self.scale;
            self.n_x *= k;
            self.n_y *= k;
        }
        self.scale = scale;
    }

    /// Is every component [finite]?
    ///
    /// [finite]: f64::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.scale.is_finite()
            && self.n_x.is_finite()
            && self.n_y.is_finite()
            && self.p_x.is_finite()
            && self.p_y.is_finite()
    }
}

impl Mul for Frame2d {
    type Output = Self;

    /// Composes two frames: `(a * b) * p == a * (b * p)`.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            scale: self.scale * rhs.scale,
            n_x: self.n_x * rhs.n_x - self.n_y * rhs.n_y,
            n_y: self.n_y * rhs.n_x + self.n_x * rhs.n_y,
            p_x: self.n_x * rhs.p_x - self.n_y * rhs.p_y + self.p_x,
            p_y: self.n_y * rhs.p_x + self.n_x * rhs.p_y + self.p_y,
        }
    }
}

impl Mul<Point> for Frame2d {
    type Output = Point;

    #[inline]
    fn mul(self, p: Point) -> Point {
        Point::new(
            self.n_x * p.x - self.n_y * p.y + self.p_x,
            self.n_y * p.x + self.n_x * p.y + self.p_y,
        )
    }
}

impl Mul<Vec2> for Frame2d {
    type Output = Vec2;

    #[inline]
    fn mul(self, v: Vec2) -> Vec2 {
        Vec2::new(
            self.n_x * v.x - self.n_y * v.y,
            self.n_y * v.x + self.n_x * v.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use core::f64::consts::{FRAC_PI_2, PI};

    use super::*;

    fn sample_frames() -> [Frame2d; 3] {
        let mut a = Frame2d::from_pos_angle(Point::new(1.0, -2.0), Angle::new(0.3));
        a.set_scale(2.0);
        let b = Frame2d::from_pos_angle(Point::new(-4.5, 0.25), Angle::new(5.1));
        let mut c = Frame2d::from_pos_angle(Point::new(10.0, 3.0), Angle::new(FRAC_PI_2));
        c.set_scale(0.5);
        [a, b, c]
    }

    fn assert_point_eq(a: Point, b: Point) {
        let eps = 1e-9;
        assert!((a.x - b.x).abs() < eps, "x: {a:?} vs {b:?}");
        assert!((a.y - b.y).abs() < eps, "y: {a:?} vs {b:?}");
    }

    #[test]
    fn composition_is_associative() {
        let [f1, f2, f3] = sample_frames();
        let p = Point::new(0.7, -1.3);
        assert_point_eq(((f1 * f2) * f3) * p, (f1 * (f2 * f3)) * p);
    }

    #[test]
    fn composition_matches_sequential_application() {
        let [f1, f2, _] = sample_frames();
        let p = Point::new(3.0, 4.0);
        assert_point_eq((f1 * f2) * p, f1 * (f2 * p));
    }

    #[test]
    fn identity_is_neutral() {
        for f in sample_frames() {
            assert_eq!(Frame2d::IDENTITY * f, f);
            assert_eq!(f * Frame2d::IDENTITY, f);
        }
    }

    #[test]
    fn vectors_ignore_translation() {
        let f = Frame2d::translation(5.0, 6.0);
        let v = f * Vec2::new(1.0, 2.0);
        assert_eq!(v, Vec2::new(1.0, 2.0));
        let p = f * Point::new(1.0, 2.0);
        assert_eq!(p, Point::new(6.0, 8.0));
    }

    #[test]
    fn quarter_turn_rotates_point() {
        let f = Frame2d::rotation(Angle::new(FRAC_PI_2));
        assert_point_eq(f * Point::new(5.0, 5.0), Point::new(-5.0, 5.0));
    }

    #[test]
    fn angle_and_scale_are_independent() {
        let eps = 1e-9;
        let mut f = Frame2d::rotation(Angle::new(1.0));
        f.set_scale(3.0);
        assert!((f.angle().radians() - 1.0).abs() < eps);
        assert!((f.x_axis().hypot() - 3.0).abs() < eps);

        f.set_angle(Angle::new(PI));
        assert!((f.scale() - 3.0).abs() < eps);
        assert!((f.x_axis().hypot() - 3.0).abs() < eps);
        assert!((f.angle().radians() - PI).abs() < eps);
    }

    #[test]
    fn zero_scale_recovers_on_rescale() {
        let mut f = Frame2d::rotation(Angle::new(1.0));
        f.set_scale(0.0);
        assert_eq!(f.angle(), Angle::ZERO);
        f.set_scale(2.0);
        assert_eq!(f.x_axis(), Vec2::new(2.0, 0.0));
    }

    #[test]
    fn angle_from_vector() {
        let eps = 1e-9;
        let mut f = Frame2d::IDENTITY;
        f.set_angle_from_vec(Vec2::new(0.0, 4.0));
        assert!((f.angle().radians() - FRAC_PI_2).abs() < eps);
        f.set_angle_from_vec(Vec2::ZERO);
        assert_eq!(f.angle(), Angle::ZERO);
    }

    #[test]
    fn axes_are_perpendicular() {
        let f = sample_frames()[0];
        assert!(f.x_axis().dot(f.y_axis()).abs() < 1e-9);
    }

    #[test]
    fn composed_scale_multiplies() {
        let a = Frame2d::scaling(2.0);
        let b = Frame2d::scaling(3.0);
        assert_eq!((a * b).scale(), 6.0);
        assert!(!Frame2d::translation(f64::NAN, 0.0).is_finite());
    }
}
