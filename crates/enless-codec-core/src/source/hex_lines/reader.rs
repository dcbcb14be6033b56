/// Strip a trailing `#` comment and surrounding whitespace.
///
/// Returns `None` when nothing but a comment or whitespace is left.
pub fn frame_text(line: &str) -> Option<&str> {
    let text = match line.split_once('#') {
        Some((before, _)) => before,
        None => line,
    };
    let text = text.trim();
    if text.is_empty() { None } else { Some(text) }
}

/// Decode one hex-encoded frame.
///
/// Inner whitespace and a leading `0x` are ignored; case does not matter.
///
/// # Examples
/// ```
/// use enless_codec_core::parse_hex_frame;
///
/// assert_eq!(parse_hex_frame("0x0012 3407").unwrap(), vec![0x00, 0x12, 0x34, 0x07]);
/// assert!(parse_hex_frame("abc").is_err());
/// ```
///
/// # Errors
/// Returns `hex::FromHexError` on odd length or non-hex characters.
pub fn parse_hex_frame(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let text = text.trim();
    let text = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
        .unwrap_or(text);
    let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    hex::decode(compact)
}

#[cfg(test)]
mod tests {
    use super::{frame_text, parse_hex_frame};

    #[test]
    fn frame_text_skips_blank_and_comment_lines() {
        assert_eq!(frame_text(""), None);
        assert_eq!(frame_text("   "), None);
        assert_eq!(frame_text("# sensor type 4"), None);
    }

    #[test]
    fn frame_text_strips_trailing_comment() {
        assert_eq!(frame_text(" 001234 # kit A"), Some("001234"));
    }

    #[test]
    fn parse_hex_frame_mixed_case_and_spaces() {
        assert_eq!(
            parse_hex_frame("00 12 34 0C 00 00 13 88 00 dc").unwrap(),
            vec![0x00, 0x12, 0x34, 0x0c, 0x00, 0x00, 0x13, 0x88, 0x00, 0xdc]
        );
    }

    #[test]
    fn parse_hex_frame_rejects_odd_length() {
        assert_eq!(
            parse_hex_frame("123").unwrap_err(),
            hex::FromHexError::OddLength
        );
    }

    #[test]
    fn parse_hex_frame_rejects_non_hex() {
        assert!(matches!(
            parse_hex_frame("zz").unwrap_err(),
            hex::FromHexError::InvalidHexCharacter { .. }
        ));
    }

    #[test]
    fn parse_hex_frame_empty() {
        assert_eq!(parse_hex_frame("").unwrap(), Vec::<u8>::new());
    }
}
