// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stream decoding errors.

use core::fmt;

use super::opcode::Opcode;

/// Why a binary stream stopped decoding.
///
/// Every variant carries the byte offset at which the failing command
/// started. Commands before that offset were already applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The stream ended in the middle of a command.
    Truncated {
        /// Start of the incomplete command.
        offset: usize,
        /// The command's opcode, if it was read completely.
        opcode: Option<Opcode>,
    },
    /// The opcode is not part of the protocol.
    UnknownOpcode {
        /// Start of the command.
        offset: usize,
        /// The value found on the wire.
        value: i32,
    },
    /// An element count is negative.
    InvalidLength {
        /// Start of the command.
        offset: usize,
        /// The command being decoded.
        opcode: Opcode,
        /// The count found on the wire.
        len: i32,
    },
}

impl DecodeError {
    /// Byte offset of the command that failed.
    #[must_use]
    pub const fn offset(&self) -> usize {
        match *self {
            Self::Truncated { offset, .. }
            | Self::UnknownOpcode { offset, .. }
            | Self::InvalidLength { offset, .. } => offset,
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Truncated {
                offset,
                opcode: Some(op),
            } => write!(f, "stream ends inside {op} command at byte {offset}"),
            Self::Truncated { offset, opcode: None } => {
                write!(f, "stream ends inside an opcode at byte {offset}")
            }
            Self::UnknownOpcode { offset, value } => {
                write!(f, "unknown opcode {value} at byte {offset}")
            }
            Self::InvalidLength { offset, opcode, len } => {
                write!(f, "negative element count {len} in {opcode} command at byte {offset}")
            }
        }
    }
}

impl core::error::Error for DecodeError {}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_name_the_command() {
        let e = DecodeError::Truncated {
            offset: 12,
            opcode: Some(Opcode::InsertLines),
        };
        assert_eq!(e.to_string(), "stream ends inside insert_lines command at byte 12");
        let e = DecodeError::UnknownOpcode { offset: 0, value: 99 };
        assert_eq!(e.to_string(), "unknown opcode 99 at byte 0");
        assert_eq!(e.offset(), 0);
    }
}
