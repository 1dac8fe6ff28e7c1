//! # Byte-Level Codec
//!
//! The byte-level scheme represents every byte sequence, including invalid
//! UTF-8, as a string of printable symbols:
//! * [`ByteUnicodeTable`] - the byte/symbol bijection.
//! * [`string_from_utf8_lossy`] - the final, whole-buffer UTF-8 decode.

pub mod byte_unicode;

#[doc(inline)]
pub use byte_unicode::{ByteUnicodeTable, is_printable_byte};

/// Decode a byte buffer as UTF-8, substituting U+FFFD for invalid sequences.
///
/// Valid buffers are moved into the result without copying.
pub fn string_from_utf8_lossy(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(string) => string,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_from_utf8_lossy() {
        let v = vec![0x61, 0x62, 0xff, 0x28];
        assert_eq!(string_from_utf8_lossy(v), "ab\u{fffd}(");

        let v = vec![0x61, 0x62];
        assert_eq!(string_from_utf8_lossy(v), "ab");

        // A truncated 3-byte sequence.
        let v = vec![0xE4, 0xBD];
        assert_eq!(string_from_utf8_lossy(v), "\u{fffd}");
    }
}
