// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Text command scripts.
//!
//! The ASCII protocol drives any [`Builder`] from human-writable text. Every
//! command ends with `;` and blanks between tokens are ignored:
//!
//! ```text
//! BG 003000;                          background color
//! SL "kick off";                      status line
//! VA (0,0,105,68);                    view area: center, width, height
//! INS FRAME id=1 lay=2 (10,5,1.57);   frame in the root, placed and turned
//! INS 1 CIRCLE id=3 col=ff0000 fil=1 (0,0,0.3);
//! INS 1 LINE (0,0,1,0)(0,0,0,1);      two tuples give a segment set
//! INS GRID col=808080 ((0,0)(10,0):5(0,10):5);
//! INS STRING (0,0,"A")(5,0,"B");
//! MOV 1 (12,5);                       also (x,y,a) and (a)
//! HIDE 1;   SHOW 1;   EMP 1;   DEL 1 3;   DEL 1;
//! ```
//!
//! Object attributes are `id=`, `lay=`, `col=rrggbb` and `fil=0|1`; frames
//! take `id=`, `lay=` and `vis=0|1`. Shapes accept one or more tuples: point
//! `(x,y)`, line `(x1,y1,x2,y2)`, circle `(x,y,r)` and arc `(x,y,r[,a1,a2])`.
//! Polylines and polygons need at least two points.
//!
//! Processing stops at the first malformed command; everything before it
//! stays applied. Commands the builder refuses are counted, not fatal.

mod cursor;
mod error;

use alloc::vec::Vec;

use kurbo::{Circle, Line, Point, Vec2};

use crate::builder::{Builder, Placement};
use crate::color::Rgb;
use crate::geometry::{Angle, Area2d, CircleArc};
use crate::scene::{Key, ROOT_KEY};

use cursor::{Cursor, Tuple};
pub use error::{ErrorKind, ParseError};

/// Largest subdivision count accepted by `GRID` and `STR_GRID`.
pub const MAX_GRID_COUNT: u32 = 10_000;

/// Counts from a fully processed script.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ParseReport {
    /// Builder calls made.
    pub commands: u32,
    /// Builder calls that were refused.
    pub rejected: u32,
}

/// Runs every command of `input` against `builder`.
pub fn process<B: Builder + ?Sized>(input: &str, builder: &mut B) -> Result<ParseReport, ParseError> {
    let mut p = Parser {
        cur: Cursor::new(input),
        builder,
        report: ParseReport::default(),
    };
    while !p.cur.at_end() {
        let start = p.cur.position();
        if let Err(kind) = p.command() {
            let e = ParseError {
                command: start,
                offset: p.cur.position(),
                kind,
            };
            log::debug!("script stopped: {e}");
            return Err(e);
        }
    }
    Ok(p.report)
}

const OBJECT_ATTRS: &[&str] = &["id", "lay", "col", "fil"];
const FRAME_ATTRS: &[&str] = &["id", "lay", "vis"];

struct Attrs {
    id: Key,
    layer: i32,
    color: Rgb,
    filled: bool,
    visible: bool,
}

struct Lattice {
    origin: Point,
    v1: Vec2,
    n1: u32,
    v2: Vec2,
    n2: u32,
}

impl Lattice {
    /// `n2 + 1` lines along `v1`, then `n1 + 1` lines along `v2`.
    fn push_lines(&self, out: &mut Vec<Line>) {
        for i in 0..=self.n2 {
            let p = self.origin + self.v2 * (f64::from(i) / f64::from(self.n2));
            out.push(Line::new(p, p + self.v1));
        }
        for i in 0..=self.n1 {
            let p = self.origin + self.v1 * (f64::from(i) / f64::from(self.n1));
            out.push(Line::new(p, p + self.v2));
        }
    }
}

struct Parser<'a, 'b, B: ?Sized> {
    cur: Cursor<'a>,
    builder: &'b mut B,
    report: ParseReport,
}

impl<B: Builder + ?Sized> Parser<'_, '_, B> {
    fn tally(&mut self, ok: bool) {
        self.report.commands += 1;
        if !ok {
            self.report.rejected += 1;
        }
    }

    fn reference(&mut self) -> Result<Key, ErrorKind> {
        self.cur.int().ok_or(ErrorKind::Reference)
    }

    fn end(&mut self) -> Result<(), ErrorKind> {
        self.cur.expect(';')
    }

    fn command(&mut self) -> Result<(), ErrorKind> {
        let word = self.cur.keyword().ok_or(ErrorKind::UnknownCommand)?;
        match word {
            "BG" => {
                let color = self.cur.color().ok_or(ErrorKind::Color)?;
                self.end()?;
                let ok = self.builder.set_background_color(color);
                self.tally(ok);
            }
            "SL" => {
                let text = self.cur.quoted()?;
                self.end()?;
                let ok = self.builder.set_status_line(text);
                self.tally(ok);
            }
            "VA" => {
                let t = self.exact_tuple(4)?;
                self.end()?;
                let area = Area2d::new(Point::new(t.get(0), t.get(1)), t.get(2), t.get(3));
                let ok = self.builder.set_view_area(&area);
                self.tally(ok);
            }
            "MOV" => {
                let key = self.reference()?;
                let t = self.cur.tuple(3)?.ok_or(ErrorKind::Expected('('))?;
                self.end()?;
                let ok = match t.len() {
                    3 => self.builder.set_frame_pos_angle(
                        key,
                        Point::new(t.get(0), t.get(1)),
                        Angle::new(t.get(2)),
                    ),
                    2 => self.builder.set_frame_pos(key, Point::new(t.get(0), t.get(1))),
                    1 => self.builder.set_frame_angle(key, Angle::new(t.get(0))),
                    _ => return Err(ErrorKind::TupleLength),
                };
                self.tally(ok);
            }
            "SHOW" | "HIDE" => {
                let key = self.reference()?;
                self.end()?;
                let ok = self.builder.set_frame_visible(key, word == "SHOW");
                self.tally(ok);
            }
            "DEL" => {
                let key = self.reference()?;
                let obj = self.cur.int();
                self.end()?;
                let ok = match obj {
                    Some(obj) => self.builder.remove_object(key, obj),
                    None => self.builder.remove_frame(key),
                };
                self.tally(ok);
            }
            "EMP" => {
                let key = self.reference()?;
                self.end()?;
                let ok = self.builder.empty_frame(key);
                self.tally(ok);
            }
            "INS" => {
                let parent = self.cur.int().unwrap_or(ROOT_KEY);
                self.insert(parent)?;
            }
            _ => return Err(ErrorKind::UnknownCommand),
        }
        Ok(())
    }

    fn attrs(&mut self, allowed: &[&str]) -> Result<Attrs, ErrorKind> {
        let mut a = Attrs {
            id: 0,
            layer: 0,
            color: Rgb::BLACK,
            filled: false,
            visible: true,
        };
        let mut seen = [false; 5];
        while let Some(name) = self.cur.attribute() {
            let i = allowed
                .iter()
                .position(|n| *n == name)
                .ok_or(ErrorKind::Attribute)?;
            if core::mem::replace(&mut seen[i], true) {
                return Err(ErrorKind::Attribute);
            }
            self.cur.expect('=')?;
            match name {
                "id" => a.id = self.reference()?,
                "lay" => a.layer = self.cur.int().ok_or(ErrorKind::Number)?,
                "col" => a.color = self.cur.color().ok_or(ErrorKind::Color)?,
                "fil" => a.filled = self.cur.flag().ok_or(ErrorKind::Number)?,
                _ => a.visible = self.cur.flag().ok_or(ErrorKind::Number)?,
            }
        }
        Ok(a)
    }

    fn exact_tuple(&mut self, len: usize) -> Result<Tuple, ErrorKind> {
        let t = self.cur.tuple(len)?.ok_or(ErrorKind::Expected('('))?;
        if t.len() != len {
            return Err(ErrorKind::TupleLength);
        }
        Ok(t)
    }

    /// Reads tuples until `;`, each with one of the allowed lengths.
    fn tuples(&mut self, lens: &[usize], min: usize) -> Result<Vec<Tuple>, ErrorKind> {
        let max = lens.iter().copied().max().unwrap_or(0);
        let mut out = Vec::new();
        while let Some(t) = self.cur.tuple(max)? {
            if !lens.contains(&t.len()) {
                return Err(ErrorKind::TupleLength);
            }
            out.push(t);
        }
        self.end()?;
        if out.len() < min {
            return Err(ErrorKind::TooFewElements);
        }
        Ok(out)
    }

    fn points(&mut self, min: usize) -> Result<Vec<Point>, ErrorKind> {
        let ts = self.tuples(&[2], min)?;
        Ok(ts.iter().map(|t| Point::new(t.get(0), t.get(1))).collect())
    }

    fn insert(&mut self, parent: Key) -> Result<(), ErrorKind> {
        let word = self.cur.keyword().ok_or(ErrorKind::UnknownCommand)?;
        if word == "FRAME" {
            return self.insert_frame(parent);
        }
        let a = self.attrs(OBJECT_ATTRS)?;
        let at = Placement::new(parent, a.id, a.layer, a.color);
        let ok = match word {
            "POINT" => {
                let ps = self.points(1)?;
                match ps.as_slice() {
                    [p] => self.builder.insert_point(at, *p),
                    _ => self.builder.insert_points(at, &ps),
                }
            }
            "LINE" => {
                let ls: Vec<Line> = self
                    .tuples(&[4], 1)?
                    .iter()
                    .map(|t| Line::new((t.get(0), t.get(1)), (t.get(2), t.get(3))))
                    .collect();
                match ls.as_slice() {
                    [l] => self.builder.insert_line(at, *l),
                    _ => self.builder.insert_lines(at, &ls),
                }
            }
            "CIRCLE" => {
                let cs: Vec<Circle> = self
                    .tuples(&[3], 1)?
                    .iter()
                    .map(|t| Circle::new((t.get(0), t.get(1)), t.get(2)))
                    .collect();
                match (cs.as_slice(), a.filled) {
                    ([c], false) => self.builder.insert_circle(at, *c),
                    ([c], true) => self.builder.insert_f_circle(at, *c),
                    (_, false) => self.builder.insert_circles(at, &cs),
                    (_, true) => self.builder.insert_f_circles(at, &cs),
                }
            }
            "CIRCLEARC" => {
                let arcs: Vec<CircleArc> = self
                    .tuples(&[3, 5], 1)?
                    .iter()
                    .map(|t| {
                        let (start, end) = if t.len() == 5 {
                            (Angle::new(t.get(3)), Angle::new(t.get(4)))
                        } else {
                            (Angle::ZERO, Angle::ZERO)
                        };
                        CircleArc::new(Point::new(t.get(0), t.get(1)), t.get(2), start, end)
                    })
                    .collect();
                match (arcs.as_slice(), a.filled) {
                    ([c], false) => self.builder.insert_arc(at, *c),
                    ([c], true) => self.builder.insert_f_arc(at, *c),
                    (_, false) => self.builder.insert_arcs(at, &arcs),
                    (_, true) => self.builder.insert_f_arcs(at, &arcs),
                }
            }
            "POLYLINE" => {
                let ps = self.points(2)?;
                self.builder.insert_polyline(at, &ps)
            }
            "POLYGON" => {
                let ps = self.points(2)?;
                if a.filled {
                    self.builder.insert_f_polygon(at, &ps)
                } else {
                    self.builder.insert_polygon(at, &ps)
                }
            }
            "STRING" => return self.insert_strings(at),
            "GRID" => {
                let mut lines = Vec::new();
                loop {
                    self.cur.expect('(')?;
                    let g = self.lattice()?;
                    self.cur.expect(')')?;
                    g.push_lines(&mut lines);
                    if self.cur.eat(';') {
                        break;
                    }
                }
                self.builder.insert_lines(at, &lines)
            }
            "STR_GRID" => return self.insert_string_grid(at),
            _ => return Err(ErrorKind::UnknownCommand),
        };
        self.tally(ok);
        Ok(())
    }

    fn insert_frame(&mut self, parent: Key) -> Result<(), ErrorKind> {
        let a = self.attrs(FRAME_ATTRS)?;
        let (pos, angle) = match self.cur.tuple(3)? {
            None => (Point::ZERO, Angle::ZERO),
            Some(t) => match t.len() {
                0 => (Point::ZERO, Angle::ZERO),
                1 => (Point::ZERO, Angle::new(t.get(0))),
                2 => (Point::new(t.get(0), t.get(1)), Angle::ZERO),
                _ => (Point::new(t.get(0), t.get(1)), Angle::new(t.get(2))),
            },
        };
        self.end()?;
        let ok = self.builder.insert_frame(parent, a.id, pos, angle, a.layer);
        self.tally(ok);
        if ok && !a.visible {
            let ok = self.builder.set_frame_visible(a.id, false);
            self.tally(ok);
        }
        Ok(())
    }

    fn insert_strings(&mut self, at: Placement) -> Result<(), ErrorKind> {
        loop {
            self.cur.expect('(')?;
            let x = self.cur.real().ok_or(ErrorKind::Number)?;
            self.cur.expect(',')?;
            let y = self.cur.real().ok_or(ErrorKind::Number)?;
            self.cur.expect(',')?;
            let text = self.cur.quoted()?;
            self.cur.expect(')')?;
            let ok = self.builder.insert_string(at, Point::new(x, y), text);
            self.tally(ok);
            if self.cur.eat(';') {
                return Ok(());
            }
        }
    }

    /// Fills a grid row by row with the quoted strings that follow, stopping
    /// early at `)`.
    fn insert_string_grid(&mut self, at: Placement) -> Result<(), ErrorKind> {
        loop {
            self.cur.expect('(')?;
            let g = self.lattice()?;
            let step = g.v1 / f64::from(g.n1);
            let mut closed = false;
            'rows: for i in 0..g.n2 {
                let mut p = g.origin + g.v2 * (f64::from(i) / f64::from(g.n2));
                for _ in 0..g.n1 {
                    if self.cur.eat(')') {
                        closed = true;
                        break 'rows;
                    }
                    let text = self.cur.quoted()?;
                    let ok = self.builder.insert_string(at, p, text);
                    self.tally(ok);
                    p += step;
                }
            }
            if !closed {
                self.cur.expect(')')?;
            }
            if self.cur.eat(';') {
                return Ok(());
            }
        }
    }

    fn vector(&mut self) -> Result<Vec2, ErrorKind> {
        let t = self.exact_tuple(2)?;
        Ok(Vec2::new(t.get(0), t.get(1)))
    }

    fn grid_count(&mut self) -> Result<u32, ErrorKind> {
        if !self.cur.eat(':') {
            return Ok(1);
        }
        let n = self.cur.int().ok_or(ErrorKind::Number)?;
        u32::try_from(n)
            .ok()
            .filter(|n| (1..=MAX_GRID_COUNT).contains(n))
            .ok_or(ErrorKind::GridCount)
    }

    fn lattice(&mut self) -> Result<Lattice, ErrorKind> {
        let origin = self.vector()?.to_point();
        let v1 = self.vector()?;
        let n1 = self.grid_count()?;
        let v2 = self.vector()?;
        let n2 = self.grid_count()?;
        Ok(Lattice {
            origin,
            v1,
            n1,
            v2,
            n2,
        })
    }
}
