// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Token-level scanning over command text.

use crate::color::Rgb;

use super::error::ErrorKind;

/// Up to five numbers between parentheses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct Tuple {
    values: [f64; Tuple::MAX],
    len: usize,
}

impl Tuple {
    pub(crate) const MAX: usize = 5;

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn get(&self, i: usize) -> f64 {
        self.values[i]
    }
}

/// A position in the input with whitespace-skipping readers.
///
/// Readers that return `Option` leave the position unchanged on `None`.
#[derive(Clone, Debug)]
pub(crate) struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub(crate) const fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    pub(crate) const fn position(&self) -> usize {
        self.pos
    }

    fn rest(&self) -> &'a str {
        self.src.get(self.pos..).unwrap_or_default()
    }

    pub(crate) fn skip_ws(&mut self) {
        let rest = self.rest();
        self.pos += rest.len() - rest.trim_start().len();
    }

    pub(crate) fn at_end(&mut self) -> bool {
        self.skip_ws();
        self.rest().is_empty()
    }

    /// Consumes `c` if it is the next non-blank character.
    pub(crate) fn eat(&mut self, c: char) -> bool {
        self.skip_ws();
        if self.rest().starts_with(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect(&mut self, c: char) -> Result<(), ErrorKind> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(ErrorKind::Expected(c))
        }
    }

    fn take_while(&mut self, f: impl Fn(char) -> bool) -> &'a str {
        let rest = self.rest();
        let end = rest.find(|c: char| !f(c)).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }

    /// Reads an upper-case keyword such as `INS` or `STR_GRID`.
    pub(crate) fn keyword(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let w = self.take_while(|c| c.is_ascii_uppercase() || c == '_');
        (!w.is_empty()).then_some(w)
    }

    /// Reads a lower-case attribute name such as `lay`.
    pub(crate) fn attribute(&mut self) -> Option<&'a str> {
        self.skip_ws();
        let start = self.pos;
        let w = self.take_while(|c| c.is_ascii_lowercase());
        if w.is_empty() {
            self.pos = start;
            return None;
        }
        Some(w)
    }

    fn number_text(&mut self) -> &'a str {
        self.skip_ws();
        let rest = self.rest();
        let bytes = rest.as_bytes();
        let mut end = 0;
        if matches!(bytes.first(), Some(b'+' | b'-')) {
            end += 1;
        }
        while end < bytes.len() && (bytes[end].is_ascii_digit() || bytes[end] == b'.') {
            end += 1;
        }
        if matches!(bytes.get(end), Some(b'e' | b'E')) {
            let mut exp = end + 1;
            if matches!(bytes.get(exp), Some(b'+' | b'-')) {
                exp += 1;
            }
            if bytes.get(exp).is_some_and(u8::is_ascii_digit) {
                while exp < bytes.len() && bytes[exp].is_ascii_digit() {
                    exp += 1;
                }
                end = exp;
            }
        }
        &rest[..end]
    }

    pub(crate) fn int(&mut self) -> Option<i32> {
        let start = self.pos;
        let text = self.number_text();
        match text.parse() {
            Ok(v) => {
                self.pos += text.len();
                Some(v)
            }
            Err(_) => {
                self.pos = start;
                None
            }
        }
    }

    pub(crate) fn real(&mut self) -> Option<f64> {
        let start = self.pos;
        let text = self.number_text();
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                self.pos += text.len();
                Some(v)
            }
            _ => {
                self.pos = start;
                None
            }
        }
    }

    /// Reads `0`/`1` (or any integer, non-zero meaning `true`).
    pub(crate) fn flag(&mut self) -> Option<bool> {
        self.int().map(|v| v != 0)
    }

    /// Reads `rrggbb`, optionally prefixed with `#`.
    pub(crate) fn color(&mut self) -> Option<Rgb> {
        let start = self.pos;
        self.eat('#');
        self.skip_ws();
        let color = self.rest().get(..6).and_then(Rgb::from_hex);
        match color {
            Some(c) => {
                self.pos += 6;
                Some(c)
            }
            None => {
                self.pos = start;
                None
            }
        }
    }

    /// Reads a double-quoted string. The text cannot contain `"`.
    pub(crate) fn quoted(&mut self) -> Result<&'a str, ErrorKind> {
        self.expect('"')?;
        let rest = self.rest();
        let end = rest.find('"').ok_or(ErrorKind::UnterminatedString)?;
        self.pos += end + 1;
        Ok(&rest[..end])
    }

    /// Reads `(a, b, ...)` with at most `max` numbers.
    ///
    /// Returns `Ok(None)` if the next token is not `(`; `()` is a tuple of
    /// length zero.
    pub(crate) fn tuple(&mut self, max: usize) -> Result<Option<Tuple>, ErrorKind> {
        if !self.eat('(') {
            return Ok(None);
        }
        let mut t = Tuple::default();
        if self.eat(')') {
            return Ok(Some(t));
        }
        loop {
            let v = self.real().ok_or(ErrorKind::Number)?;
            if t.len == max.min(Tuple::MAX) {
                return Err(ErrorKind::TupleLength);
            }
            t.values[t.len] = v;
            t.len += 1;
            if self.eat(')') {
                return Ok(Some(t));
            }
            self.expect(',')?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_stop_at_non_letters() {
        let mut c = Cursor::new("  STR_GRID(");
        assert_eq!(c.keyword(), Some("STR_GRID"));
        assert!(c.eat('('));
        assert!(c.at_end());
    }

    #[test]
    fn numbers() {
        let mut c = Cursor::new(" -12 3.5e2 .25 x");
        assert_eq!(c.int(), Some(-12));
        assert_eq!(c.real(), Some(350.0));
        assert_eq!(c.real(), Some(0.25));
        assert_eq!(c.real(), None);
        assert_eq!(c.attribute(), Some("x"));
    }

    #[test]
    fn int_rejects_fractions_without_moving() {
        let mut c = Cursor::new("1.5");
        assert_eq!(c.int(), None);
        assert_eq!(c.position(), 0);
    }

    #[test]
    fn tuples() {
        let mut c = Cursor::new("( 1 , 2 ,3)()(4)");
        let t = c.tuple(3).ok().flatten().unwrap_or_default();
        assert_eq!((t.len(), t.get(0), t.get(2)), (3, 1.0, 3.0));
        assert_eq!(c.tuple(3).ok().flatten().map(|t| t.len()), Some(0));
        assert_eq!(c.tuple(0), Err(ErrorKind::TupleLength));
        assert_eq!(Cursor::new(";").tuple(2), Ok(None));
        assert_eq!(Cursor::new("(1,)").tuple(2), Err(ErrorKind::Number));
        assert_eq!(Cursor::new("(1 2)").tuple(2), Err(ErrorKind::Expected(',')));
    }

    #[test]
    fn colors_and_strings() {
        let mut c = Cursor::new("#ff8000 00ff0 \"half time\" \"open");
        assert_eq!(c.color(), Some(Rgb::new(255, 128, 0)));
        assert_eq!(c.color(), None);
        assert_eq!(c.int(), Some(0));
        c.attribute();
        assert_eq!(c.int(), Some(0));
        assert_eq!(c.quoted(), Ok("half time"));
        assert_eq!(c.quoted(), Err(ErrorKind::UnterminatedString));
    }
}
