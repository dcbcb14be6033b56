use super::error::FrameError;
use super::layout;
use crate::protocols::common::reader::be_uint;

pub struct FrameReader<'a> {
    payload: &'a [u8],
}

impl<'a> FrameReader<'a> {
    pub fn new(payload: &'a [u8]) -> Self {
        Self { payload }
    }

    pub fn len(&self) -> usize {
        self.payload.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }

    pub fn require_len(&self, needed: usize) -> Result<(), FrameError> {
        if self.payload.len() < needed {
            return Err(FrameError::TooShort {
                needed,
                actual: self.payload.len(),
            });
        }
        Ok(())
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, FrameError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(FrameError::TooShort {
                needed: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_slice(&self, range: std::ops::Range<usize>) -> Result<&'a [u8], FrameError> {
        self.payload.get(range.clone()).ok_or(FrameError::TooShort {
            needed: range.end,
            actual: self.payload.len(),
        })
    }

    /// Read `width` bytes at `offset` as an unsigned big-endian integer.
    ///
    /// # Errors
    /// `UnsupportedWidth` when `width` is zero or wider than a `u64`;
    /// `TooShort` when `offset + width` runs past the payload.
    pub fn read_uint_be(&self, offset: usize, width: usize) -> Result<u64, FrameError> {
        if width == 0 || width > layout::MAX_FIELD_WIDTH {
            return Err(FrameError::UnsupportedWidth { width });
        }
        let end = offset.checked_add(width).ok_or(FrameError::TooShort {
            needed: usize::MAX,
            actual: self.payload.len(),
        })?;
        let bytes = self.read_slice(offset..end)?;
        Ok(be_uint(bytes))
    }

    pub fn read_transmitter_id(&self) -> Result<u32, FrameError> {
        let bytes = self.read_slice(layout::TRANSMITTER_ID_RANGE.clone())?;
        Ok(be_uint(bytes) as u32)
    }

    pub fn read_reserved(&self) -> Result<u16, FrameError> {
        let bytes = self.read_slice(layout::RESERVED_RANGE.clone())?;
        Ok(be_uint(bytes) as u16)
    }
}
