use thiserror::Error;

/// Structural errors returned by uplink frame reading and parsing.
///
/// # Examples
/// ```
/// use enless_codec_core::protocols::uplink::FrameError;
///
/// let err = FrameError::TooShort { needed: 8, actual: 6 };
/// assert!(err.to_string().contains("payload too short"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    #[error("payload too short: need {needed} bytes, got {actual}")]
    TooShort { needed: usize, actual: usize },
    #[error("unsupported field width: {width} bytes")]
    UnsupportedWidth { width: usize },
}
