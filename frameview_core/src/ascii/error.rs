// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported by the text command processor.

use core::fmt;

/// What was wrong with a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The command or object keyword is not known.
    UnknownCommand,
    /// A specific character was required here.
    Expected(char),
    /// A number was required here.
    Number,
    /// A frame or object reference was required here.
    Reference,
    /// A `rrggbb` color was required here.
    Color,
    /// A quoted string is missing its closing quote.
    UnterminatedString,
    /// A tuple has the wrong number of values.
    TupleLength,
    /// An attribute is repeated or not valid for this object.
    Attribute,
    /// The shape needs more elements than were given.
    TooFewElements,
    /// A grid subdivision count is below one.
    GridCount,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => f.write_str("unknown command"),
            Self::Expected(c) => write!(f, "expected '{c}'"),
            Self::Number => f.write_str("expected a number"),
            Self::Reference => f.write_str("expected a frame or object reference"),
            Self::Color => f.write_str("expected a color as rrggbb"),
            Self::UnterminatedString => f.write_str("unterminated string"),
            Self::TupleLength => f.write_str("wrong number of values in tuple"),
            Self::Attribute => f.write_str("invalid or repeated attribute"),
            Self::TooFewElements => f.write_str("too few elements"),
            Self::GridCount => f.write_str("grid count must be at least 1"),
        }
    }
}

/// A malformed command in an ASCII script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseError {
    /// Byte offset of the start of the failing command.
    pub command: usize,
    /// Byte offset where the problem was detected.
    pub offset: usize,
    /// What went wrong.
    pub kind: ErrorKind,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at byte {} (command starting at byte {})",
            self.kind, self.offset, self.command
        )
    }
}

impl core::error::Error for ParseError {}
