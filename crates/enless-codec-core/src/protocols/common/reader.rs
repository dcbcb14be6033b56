/// Fold bytes into an unsigned integer, most-significant byte first.
///
/// Callers bound the slice to at most eight bytes.
pub(crate) fn be_uint(bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(0u64, |acc, &byte| (acc << 8) | u64::from(byte))
}

#[cfg(test)]
mod tests {
    use super::be_uint;

    #[test]
    fn be_uint_empty() {
        assert_eq!(be_uint(&[]), 0);
    }

    #[test]
    fn be_uint_most_significant_first() {
        assert_eq!(be_uint(&[0x12, 0x34]), 0x1234);
        assert_eq!(be_uint(&[0x00, 0x01, 0x00, 0x00]), 0x0001_0000);
    }

    #[test]
    fn be_uint_full_width() {
        assert_eq!(be_uint(&[0xff; 8]), u64::MAX);
    }
}
