use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::path::Path;

use crate::source::{FrameEvent, FrameSource, SourceError};

use super::error::HexSourceError;
use super::reader::{frame_text, parse_hex_frame};

/// Frame source over any buffered reader of hex lines.
pub struct HexLineSource<R> {
    lines: Lines<R>,
    line: usize,
}

/// Frame source backed by a file on disk.
pub type HexFileSource = HexLineSource<BufReader<File>>;

impl<R: BufRead> HexLineSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line: 0,
        }
    }
}

impl HexLineSource<BufReader<File>> {
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(SourceError::from)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FrameSource for HexLineSource<R> {
    fn next_frame(&mut self) -> Result<Option<FrameEvent>, SourceError> {
        next_frame(self).map_err(SourceError::from)
    }
}

fn next_frame<R: BufRead>(
    source: &mut HexLineSource<R>,
) -> Result<Option<FrameEvent>, HexSourceError> {
    for line in source.lines.by_ref() {
        let line = line?;
        source.line += 1;
        let Some(text) = frame_text(&line) else {
            continue;
        };
        let bytes = parse_hex_frame(text).map_err(|source_err| HexSourceError::Hex {
            line: source.line,
            source: source_err,
        })?;
        return Ok(Some(FrameEvent {
            line: source.line,
            bytes,
        }));
    }
    Ok(None)
}
