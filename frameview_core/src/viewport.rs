// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visible region of the plane.
//!
//! A [`Viewport`] turns a requested [`Area2d`] into the area actually shown:
//! it widens one extent so the area has the window's proportions, then
//! applies optional minimum and maximum extents, keeping the center fixed.

use crate::geometry::Area2d;

/// Something that can be told which region of the plane to show.
pub trait ViewportHolder {
    /// Requests a new visible region.
    fn set_area(&mut self, area: &Area2d);

    /// Returns the region currently shown.
    fn area(&self) -> &Area2d;
}

/// Optional bounds on the visible extents.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SizeLimits {
    /// Smallest allowed width.
    pub min_x: Option<f64>,
    /// Smallest allowed height.
    pub min_y: Option<f64>,
    /// Largest allowed width.
    pub max_x: Option<f64>,
    /// Largest allowed height.
    pub max_y: Option<f64>,
}

/// A viewport that keeps the window's aspect ratio.
#[derive(Clone, Debug, Default)]
pub struct Viewport {
    requested: Area2d,
    area: Area2d,
    window: Option<(u32, u32)>,
    limits: SizeLimits,
    changed: bool,
}

impl Viewport {
    /// Creates a viewport showing `area` with no window constraint.
    #[must_use]
    pub fn new(area: Area2d) -> Self {
        let mut v = Self::default();
        v.set_area(&area);
        v
    }

    /// Sets the window size in pixels; a zero extent removes the constraint.
    pub fn set_window_size(&mut self, width: u32, height: u32) {
        self.window = (width > 0 && height > 0).then_some((width, height));
        if width == 0 || height == 0 {
            log::warn!("ignoring degenerate window size {width}x{height}");
        }
        self.refit();
    }

    /// Returns the window size, if one was set.
    #[must_use]
    pub const fn window_size(&self) -> Option<(u32, u32)> {
        self.window
    }

    /// Replaces the extent bounds.
    pub fn set_limits(&mut self, limits: SizeLimits) {
        self.limits = limits;
        self.refit();
    }

    /// Returns the extent bounds.
    #[must_use]
    pub const fn limits(&self) -> &SizeLimits {
        &self.limits
    }

    /// Returns the area as last requested, before fitting.
    #[must_use]
    pub const fn requested(&self) -> &Area2d {
        &self.requested
    }

    /// Returns `true` if the shown area changed since the last
    /// [`take_changed`](Self::take_changed).
    #[must_use]
    pub const fn is_changed(&self) -> bool {
        self.changed
    }

    /// Reads and clears the change flag.
    pub fn take_changed(&mut self) -> bool {
        core::mem::take(&mut self.changed)
    }

    /// World units per pixel along x, once a window size is known.
    #[must_use]
    pub fn units_per_pixel(&self) -> Option<f64> {
        let (w, _) = self.window?;
        Some(self.area.size_x / f64::from(w))
    }

    fn refit(&mut self) {
        let mut a = self.requested;
        if let Some((w, h)) = self.window {
            let ratio_x = a.size_x / f64::from(w);
            let ratio_y = a.size_y / f64::from(h);
            if ratio_x > ratio_y {
                a.size_y = f64::from(h) * ratio_x;
            } else {
                a.size_x = f64::from(w) * ratio_y;
            }
        }
        let l = self.limits;
        if let Some(min) = l.min_x
            && a.size_x < min
            && a.size_x > 0.0
        {
            a.size_y *= min / a.size_x;
            a.size_x = min;
        }
        if let Some(min) = l.min_y
            && a.size_y < min
            && a.size_y > 0.0
        {
            a.size_x *= min / a.size_y;
            a.size_y = min;
        }
        if let Some(max) = l.max_x
            && a.size_x > max
        {
            a.size_y *= max / a.size_x;
            a.size_x = max;
        }
        if let Some(max) = l.max_y
            && a.size_y > max
        {
            a.size_x *= max / a.size_y;
            a.size_y = max;
        }
        if a != self.area {
            self.area = a;
            self.changed = true;
        }
    }
}

impl ViewportHolder for Viewport {
    fn set_area(&mut self, area: &Area2d) {
        self.requested = Area2d::new(area.center, area.size_x, area.size_y);
        if self.requested.is_empty() {
            log::warn!("viewport area has no extent: {:?}", self.requested);
        }
        self.refit();
    }

    fn area(&self) -> &Area2d {
        &self.area
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    #[test]
    fn plain_area_is_shown_as_is() {
        let a = Area2d::new(Point::new(1.0, 2.0), 20.0, 5.0);
        let mut v = Viewport::new(a);
        assert_eq!(v.area(), &a);
        assert!(v.take_changed());
        assert!(!v.is_changed());
        v.set_area(&a);
        assert!(!v.is_changed(), "same area is not a change");
    }

    #[test]
    fn window_aspect_widens_one_extent() {
        let eps = 1e-9;
        let mut v = Viewport::new(Area2d::new(Point::ZERO, 20.0, 5.0));
        v.set_window_size(400, 200);
        assert!((v.area().size_x - 20.0).abs() < eps);
        assert!((v.area().size_y - 10.0).abs() < eps);
        assert_eq!(v.area().center, Point::ZERO);

        v.set_window_size(100, 100);
        assert!((v.area().size_y - 20.0).abs() < eps);
        assert_eq!(v.units_per_pixel(), Some(0.2));
    }

    #[test]
    fn limits_keep_proportions() {
        let eps = 1e-9;
        let mut v = Viewport::new(Area2d::new(Point::ZERO, 20.0, 5.0));
        v.set_limits(SizeLimits {
            max_x: Some(10.0),
            ..SizeLimits::default()
        });
        assert!((v.area().size_x - 10.0).abs() < eps);
        assert!((v.area().size_y - 2.5).abs() < eps);

        v.set_limits(SizeLimits {
            min_y: Some(10.0),
            ..SizeLimits::default()
        });
        assert!((v.area().size_x - 40.0).abs() < eps);
        assert_eq!(v.requested().size_x, 20.0);
    }

    #[test]
    fn negative_extents_are_clamped() {
        let mut v = Viewport::default();
        v.set_area(&Area2d {
            center: Point::ZERO,
            size_x: -4.0,
            size_y: 3.0,
        });
        assert_eq!(v.area().size_x, 0.0);
        assert_eq!(v.area().size_y, 3.0);
    }

    #[test]
    fn degenerate_window_is_ignored() {
        let mut v = Viewport::new(Area2d::new(Point::ZERO, 20.0, 5.0));
        v.set_window_size(0, 300);
        assert_eq!(v.window_size(), None);
        assert_eq!(v.area().size_y, 5.0);
    }
}
