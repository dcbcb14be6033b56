//! Hex frame file source.
//!
//! This module provides a `FrameSource` over line-oriented text: one
//! hex-encoded frame per line, as exported from network server consoles.
//! Blank lines and `#` comments are skipped; whitespace inside a frame and a
//! leading `0x` are tolerated.

pub mod error;
pub mod parser;
pub mod reader;

pub use parser::{HexFileSource, HexLineSource};
pub use reader::parse_hex_frame;
