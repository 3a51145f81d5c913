// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive field codec.
//!
//! Integers are `i32` and reals are `f64`, both big-endian. A color is three
//! bytes (red, green, blue). Compound fields are written field by field:
//! a point is `x y`, a line `p1 p2`, a circle `center radius` and an arc
//! `center radius start end`.

use alloc::vec::Vec;

use kurbo::{Circle, Line, Point};

use crate::color::Rgb;
use crate::geometry::{Angle, CircleArc};

/// Encoded size of one element of a counted array.
pub(crate) mod size {
    pub(crate) const INT: usize = 4;
    pub(crate) const REAL: usize = 8;
    pub(crate) const POINT: usize = 2 * REAL;
    pub(crate) const LINE: usize = 2 * POINT;
    pub(crate) const CIRCLE: usize = POINT + REAL;
    pub(crate) const ARC: usize = POINT + 3 * REAL;
}

/// A cursor over an encoded byte stream.
///
/// Every read returns `None`, without advancing, when too few bytes remain.
#[derive(Clone, Debug)]
pub struct Reader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Starts reading at the beginning of `data`.
    #[must_use]
    pub const fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Byte offset of the next read.
    #[inline]
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Number of unread bytes.
    #[inline]
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Returns `true` once every byte has been consumed.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Reads `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let bytes = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(bytes)
    }

    fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        self.read_bytes(N)?.try_into().ok()
    }

    /// Reads one byte.
    pub fn read_u8(&mut self) -> Option<u8> {
        self.read_array::<1>().map(|[b]| b)
    }

    /// Reads a big-endian `i32`.
    pub fn read_i32(&mut self) -> Option<i32> {
        self.read_array().map(i32::from_be_bytes)
    }

    /// Reads a big-endian `f64`.
    pub fn read_f64(&mut self) -> Option<f64> {
        self.read_array().map(f64::from_be_bytes)
    }

    /// Reads an angle in radians, normalized.
    pub fn read_angle(&mut self) -> Option<Angle> {
        self.read_f64().map(Angle::new)
    }

    /// Reads an `x y` pair.
    pub fn read_point(&mut self) -> Option<Point> {
        let start = self.pos;
        let p = (|| Some(Point::new(self.read_f64()?, self.read_f64()?)))();
        self.rewind_unless(start, p)
    }

    /// Reads a segment.
    pub fn read_line(&mut self) -> Option<Line> {
        let start = self.pos;
        let l = (|| Some(Line::new(self.read_point()?, self.read_point()?)))();
        self.rewind_unless(start, l)
    }

    /// Reads a circle.
    pub fn read_circle(&mut self) -> Option<Circle> {
        let start = self.pos;
        let c = (|| Some(Circle::new(self.read_point()?, self.read_f64()?)))();
        self.rewind_unless(start, c)
    }

    /// Reads an arc.
    pub fn read_arc(&mut self) -> Option<CircleArc> {
        let start = self.pos;
        let a = (|| {
            let center = self.read_point()?;
            let radius = self.read_f64()?;
            Some(CircleArc::new(center, radius, self.read_angle()?, self.read_angle()?))
        })();
        self.rewind_unless(start, a)
    }

    /// Reads a color.
    pub fn read_color(&mut self) -> Option<Rgb> {
        let [red, green, blue] = self.read_array()?;
        Some(Rgb::new(red, green, blue))
    }

    fn rewind_unless<T>(&mut self, start: usize, value: Option<T>) -> Option<T> {
        if value.is_none() {
            self.pos = start;
        }
        value
    }
}

/// An append-only encoder for the same field formats as [`Reader`].
#[derive(Clone, Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Creates an empty writer.
    #[must_use]
    pub const fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Returns the bytes written so far.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the writer, returning the encoded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    /// Number of bytes written.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns `true` if nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops everything written after byte `len`.
    pub fn truncate(&mut self, len: usize) {
        self.buf.truncate(len);
    }

    /// Discards all written bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Writes raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// Writes a big-endian `i32`.
    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Writes a big-endian `f64`.
    pub fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    /// Writes an angle in radians.
    pub fn write_angle(&mut self, a: Angle) {
        self.write_f64(a.radians());
    }

    /// Writes an `x y` pair.
    pub fn write_point(&mut self, p: Point) {
        self.write_f64(p.x);
        self.write_f64(p.y);
    }

    /// Writes a segment.
    pub fn write_line(&mut self, l: &Line) {
        self.write_point(l.p0);
        self.write_point(l.p1);
    }

    /// Writes a circle.
    pub fn write_circle(&mut self, c: &Circle) {
        self.write_point(c.center);
        self.write_f64(c.radius);
    }

    /// Writes an arc.
    pub fn write_arc(&mut self, a: &CircleArc) {
        self.write_point(a.center);
        self.write_f64(a.radius);
        self.write_angle(a.start);
        self.write_angle(a.end);
    }

    /// Writes a color.
    pub fn write_color(&mut self, c: Rgb) {
        self.buf.extend_from_slice(&[c.red, c.green, c.blue]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_are_big_endian() {
        let mut w = Writer::new();
        w.write_i32(0x0102_0304);
        w.write_f64(1.0);
        assert_eq!(&w.as_bytes()[..4], &[1, 2, 3, 4]);
        assert_eq!(&w.as_bytes()[4..], &[0x3f, 0xf0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn compound_fields_have_fixed_sizes() {
        let mut w = Writer::new();
        w.write_line(&Line::new((1.0, 2.0), (3.0, 4.0)));
        assert_eq!(w.len(), size::LINE);
        w.clear();
        w.write_arc(&CircleArc::new(Point::ZERO, 1.0, Angle::ZERO, Angle::new(1.0)));
        assert_eq!(w.len(), size::ARC);
        w.clear();
        w.write_circle(&Circle::new((0.0, 0.0), 1.0));
        assert_eq!(w.len(), size::CIRCLE);
    }

    #[test]
    fn short_reads_do_not_advance() {
        let mut w = Writer::new();
        w.write_f64(1.5);
        w.write_bytes(&[0, 0, 0]);
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_point(), None);
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_f64(), Some(1.5));
        assert_eq!(r.read_i32(), None);
        assert_eq!(r.remaining(), 3);
        assert!(r.read_color().is_some());
        assert!(r.is_empty());
    }

    #[test]
    fn angles_are_normalized_on_read() {
        let eps = 1e-9;
        let mut w = Writer::new();
        w.write_f64(-core::f64::consts::FRAC_PI_2);
        let bytes = w.into_bytes();
        let a = Reader::new(&bytes).read_angle().unwrap_or_default();
        assert!((a.radians() - 3.0 * core::f64::consts::FRAC_PI_2).abs() < eps);
    }
}
