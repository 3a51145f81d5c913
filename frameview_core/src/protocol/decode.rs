// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stream decoding loop.

use crate::builder::Builder;
use crate::trace::{CommandEvent, DecodeSummary, Tracer};

use super::command::Command;
use super::error::DecodeError;
use super::wire::Reader;

/// Counts from a fully decoded stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeReport {
    /// Commands decoded and handed to the builder.
    pub commands: u64,
    /// Commands the builder refused.
    pub rejected: u64,
}

impl DecodeReport {
    /// Commands the builder accepted.
    #[must_use]
    pub const fn applied(&self) -> u64 {
        self.commands - self.rejected
    }
}

/// Decodes every command in `bytes` and applies it to `builder`, in order.
///
/// A command the builder refuses is counted and skipped. A framing error
/// stops the loop; the commands before it stay applied.
pub fn decode_stream<B: Builder + ?Sized>(
    bytes: &[u8],
    builder: &mut B,
) -> Result<DecodeReport, DecodeError> {
    decode_stream_traced(bytes, builder, &mut Tracer::none())
}

/// Like [`decode_stream`], reporting each command to `tracer`.
pub fn decode_stream_traced<B: Builder + ?Sized>(
    bytes: &[u8],
    builder: &mut B,
    tracer: &mut Tracer<'_>,
) -> Result<DecodeReport, DecodeError> {
    let mut report = DecodeReport::default();
    let mut r = Reader::new(bytes);
    let result = loop {
        let cmd = match Command::decode(&mut r) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => break Ok(report),
            Err(e) => break Err(e),
        };
        let opcode = cmd.opcode();
        let applied = cmd.apply(builder);
        log::trace!("{opcode} applied={applied}");
        if !applied {
            log::debug!("builder rejected {cmd:?}");
            report.rejected += 1;
        }
        tracer.command(&CommandEvent {
            index: report.commands,
            opcode,
            applied,
        });
        report.commands += 1;
    };
    if let Err(e) = &result {
        log::debug!("decoding stopped after {} commands: {e}", report.commands);
    }
    tracer.decode_end(&DecodeSummary {
        commands: report.commands,
        rejected: report.rejected,
        error_offset: result.as_ref().err().map(DecodeError::offset),
    });
    result
}

/// Iterates over the commands of a stream without applying them.
///
/// Yields one `Err` at the first framing error, then stops.
pub fn commands(bytes: &[u8]) -> Commands<'_> {
    Commands {
        reader: Reader::new(bytes),
        done: false,
    }
}

/// Iterator returned by [`commands`].
#[derive(Clone, Debug)]
pub struct Commands<'a> {
    reader: Reader<'a>,
    done: bool,
}

impl Iterator for Commands<'_> {
    type Item = Result<Command, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match Command::decode(&mut self.reader) {
            Ok(Some(cmd)) => Some(Ok(cmd)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

impl core::iter::FusedIterator for Commands<'_> {}
