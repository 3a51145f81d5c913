// Copyright 2026 the FrameView Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Binary command protocol.
//!
//! A stream is a sequence of records, each an `i32` [`Opcode`] followed by
//! that command's fields (see [`wire`] for the field encodings):
//!
//! | Command | Fields |
//! |---|---|
//! | insert frame | parent, key, pos, angle, layer |
//! | insert shape | parent, key, geometry, layer, color |
//! | insert string | parent, key, pos, length, bytes, layer, color |
//! | object visible / layer | frame, obj, int |
//! | object color | frame, obj, color |
//! | frame visible / layer | key, int |
//! | frame pos / angle / pos+angle | key, pos and/or angle |
//! | remove frame, empty frame | key |
//! | remove object | frame, obj |
//!
//! Multi-element shapes prefix their elements with an `i32` count.
//!
//! [`decode_stream`] applies a stream to any [`Builder`](crate::builder::Builder);
//! [`Encoder`] is a builder that produces one.

mod command;
mod decode;
mod encode;
mod error;
mod opcode;
pub mod wire;

pub use command::Command;
pub use decode::{Commands, DecodeReport, commands, decode_stream, decode_stream_traced};
pub use encode::Encoder;
pub use error::DecodeError;
pub use opcode::Opcode;
