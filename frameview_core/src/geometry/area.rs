// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned viewport regions with conservative intersection tests.

use kurbo::{Circle, Line, Point};

use super::CircleArc;

/// An axis-aligned rectangle given by its center and full extents.
///
/// The intersection predicates are conservative: `false` always means the
/// shape is outside, `true` may be a false positive for non-rectangular
/// shapes. Drawing code uses them only to skip work.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Area2d {
    /// Center of the region.
    pub center: Point,
    /// Full width.
    pub size_x: f64,
    /// Full height.
    pub size_y: f64,
}

impl Area2d {
    /// Creates a region, clamping negative or non-finite extents to zero.
    #[must_use]
    pub fn new(center: Point, size_x: f64, size_y: f64) -> Self {
        Self {
            center,
            size_x: clamp_extent("width", size_x),
            size_y: clamp_extent("height", size_y),
        }
    }

    /// Returns `true` if the region has no area.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.size_x > 0.0 && self.size_y > 0.0)
    }

    /// Tests a point. Points on the border count as outside.
    #[must_use]
    pub fn intersects_point(&self, p: Point) -> bool {
        (self.center.x - p.x).abs() < 0.5 * self.size_x
            && (self.center.y - p.y).abs() < 0.5 * self.size_y
    }

    /// Tests a line segment.
    ///
    /// Rejects only segments with both endpoints beyond the same edge, which
    /// is exact for axis-parallel segments.
    #[must_use]
    pub fn intersects_line(&self, l: &Line) -> bool {
        let (hx, hy) = (0.5 * self.size_x, 0.5 * self.size_y);
        let c = self.center;
        let outside_x = (c.x - l.p0.x).abs() > hx
            && (c.x - l.p1.x).abs() > hx
            && ((c.x > l.p0.x && c.x > l.p1.x) || (c.x < l.p0.x && c.x < l.p1.x));
        if outside_x {
            return false;
        }
        let outside_y = (c.y - l.p0.y).abs() > hy
            && (c.y - l.p1.y).abs() > hy
            && ((c.y > l.p0.y && c.y > l.p1.y) || (c.y < l.p0.y && c.y < l.p1.y));
        !outside_y
    }

    /// Tests the outline of a circle against the region's bounding box.
    #[must_use]
    pub fn intersects_circle(&self, c: &Circle) -> bool {
        self.bounding_box_test(c.center, c.radius)
    }

    /// Tests an arc outline using its supporting circle.
    #[must_use]
    pub fn intersects_arc(&self, a: &CircleArc) -> bool {
        self.bounding_box_test(a.center, a.radius)
    }

    /// Tests the interior of a filled circle.
    ///
    /// A filled circle covering the whole region must still count, so this
    /// never rejects a circle whose disk overlaps the region.
    #[must_use]
    pub fn intersects_area_of_circle(&self, c: &Circle) -> bool {
        self.bounding_box_test(c.center, c.radius)
    }

    /// Tests the interior of a filled arc (pie slice).
    #[must_use]
    pub fn intersects_area_of_arc(&self, a: &CircleArc) -> bool {
        self.bounding_box_test(a.center, a.radius)
    }

    fn bounding_box_test(&self, center: Point, radius: f64) -> bool {
        (self.center.x - center.x).abs() <= 0.5 * self.size_x + radius
            && (self.center.y - center.y).abs() <= 0.5 * self.size_y + radius
    }
}

fn clamp_extent(what: &str, v: f64) -> f64 {
    if v >= 0.0 && v.is_finite() {
        v
    } else {
        log::warn!("area {what} {v} is invalid, clamped to 0");
        0.0
    }
}

/// Clamps a negative or non-finite radius to zero, with a diagnostic.
#[must_use]
pub fn clamp_radius(radius: f64) -> f64 {
    if radius >= 0.0 && radius.is_finite() {
        radius
    } else {
        log::warn!("radius {radius} is invalid, clamped to 0");
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Angle;

    fn view() -> Area2d {
        Area2d::new(Point::new(0.0, 0.0), 10.0, 4.0)
    }

    #[test]
    fn point_border_is_outside() {
        let a = view();
        assert!(a.intersects_point(Point::new(4.9, 1.9)));
        assert!(!a.intersects_point(Point::new(5.0, 0.0)));
        assert!(!a.intersects_point(Point::new(0.0, -2.0)));
    }

    #[test]
    fn line_rejected_only_when_both_ends_beyond_same_edge() {
        let a = view();
        // Both endpoints right of the box.
        assert!(!a.intersects_line(&Line::new((6.0, 0.0), (9.0, 1.0))));
        // Straddles the box horizontally.
        assert!(a.intersects_line(&Line::new((-9.0, 0.0), (9.0, 0.0))));
        // Both above.
        assert!(!a.intersects_line(&Line::new((0.0, 3.0), (1.0, 8.0))));
        // Diagonal passing by the corner: conservative accept.
        assert!(a.intersects_line(&Line::new((4.0, 3.0), (6.0, 1.0))));
    }

    #[test]
    fn circle_uses_radius_margin() {
        let a = view();
        assert!(a.intersects_circle(&Circle::new((6.5, 0.0), 2.0)));
        assert!(!a.intersects_circle(&Circle::new((7.5, 0.0), 2.0)));
        assert!(a.intersects_area_of_circle(&Circle::new((0.0, 0.0), 100.0)));
    }

    #[test]
    fn arc_reuses_circle_test() {
        let a = view();
        let arc = CircleArc::new(Point::new(0.0, 2.5), 1.0, Angle::ZERO, Angle::new(1.0));
        assert!(a.intersects_arc(&arc));
        assert!(a.intersects_area_of_arc(&arc));
        let far = CircleArc::new(Point::new(0.0, 9.0), 1.0, Angle::ZERO, Angle::new(1.0));
        assert!(!a.intersects_arc(&far));
    }

    #[test]
    fn invalid_extents_clamp_to_zero() {
        let a = Area2d::new(Point::ZERO, -3.0, f64::NAN);
        assert_eq!(a.size_x, 0.0);
        assert_eq!(a.size_y, 0.0);
        assert!(a.is_empty());
        assert!(!a.intersects_point(Point::ZERO));
        assert_eq!(clamp_radius(-1.0), 0.0);
        assert_eq!(clamp_radius(2.5), 2.5);
    }
}
