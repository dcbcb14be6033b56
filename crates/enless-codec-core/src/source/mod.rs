mod hex_lines;

pub use hex_lines::{HexFileSource, HexLineSource, parse_hex_frame};

use thiserror::Error;

/// Raw frame read from a source, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameEvent {
    /// 1-based line number in the source.
    pub line: usize,
    pub bytes: Vec<u8>,
}

pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError>;
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex frame on line {line}: {message}")]
    Hex { line: usize, message: String },
}

impl From<hex_lines::error::HexSourceError> for SourceError {
    fn from(value: hex_lines::error::HexSourceError) -> Self {
        match value {
            hex_lines::error::HexSourceError::Io(err) => SourceError::Io(err),
            hex_lines::error::HexSourceError::Hex { line, source } => SourceError::Hex {
                line,
                message: source.to_string(),
            },
        }
    }
}
