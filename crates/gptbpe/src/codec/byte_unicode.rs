//! # Byte/Unicode Table
//!
//! GPT-2 vocabularies are written in terms of "symbols": one printable unicode
//! scalar per byte value. Printable latin-1 bytes stand for themselves; the
//! 68 remaining bytes (controls, space, `0x7F..=0xA0`, soft hyphen) are moved
//! to `U+0100..=U+0143`, in increasing byte order.
//!
//! The same table defines the ids of the single-byte tokens: printable bytes
//! first, then the remapped ones; see [`ByteUnicodeTable::rank_order`].

use core::fmt::Debug;
use std::sync::LazyLock;

use crate::errors::{BpeError, BpeResult};

/// The number of byte values which do not map to themselves.
pub const REMAPPED_BYTE_COUNT: usize = 68;

/// The first scalar used for remapped bytes.
pub const REMAP_BASE: u32 = 0x100;

/// Every table symbol is below this scalar value.
const SYMBOL_SPACE: usize = REMAP_BASE as usize + REMAPPED_BYTE_COUNT;

/// Is this byte printable as its own latin-1 scalar?
///
/// Ranges: `[0x21-0x7E]`, `[0xA1-0xAC]`, `[0xAE-0xFF]`.
pub const fn is_printable_byte(byte: u8) -> bool {
    matches!(byte, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF)
}

static SHARED_TABLE: LazyLock<ByteUnicodeTable> = LazyLock::new(ByteUnicodeTable::build);

/// ``0..=255`` Byte/Symbol Bijection Table.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteUnicodeTable {
    /// Symbol for each byte ordinal.
    byte_symbols: [char; 256],

    /// Byte for each scalar value below [`SYMBOL_SPACE`].
    symbol_bytes: [Option<u8>; SYMBOL_SPACE],

    /// Bytes in single-byte token order.
    rank_order: [u8; 256],
}

impl Debug for ByteUnicodeTable {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ByteUnicodeTable")
            .field("remapped", &REMAPPED_BYTE_COUNT)
            .finish()
    }
}

impl Default for ByteUnicodeTable {
    fn default() -> Self {
        Self::shared().clone()
    }
}

impl ByteUnicodeTable {
    /// The process-wide table.
    pub fn shared() -> &'static ByteUnicodeTable {
        &SHARED_TABLE
    }

    fn build() -> Self {
        let mut byte_symbols = ['\0'; 256];
        let mut symbol_bytes = [None; SYMBOL_SPACE];
        let mut rank_order = [0_u8; 256];

        let mut rank = 0;
        for byte in (0..=255_u8).filter(|&b| is_printable_byte(b)) {
            byte_symbols[byte as usize] = char::from(byte);
            symbol_bytes[byte as usize] = Some(byte);
            rank_order[rank] = byte;
            rank += 1;
        }

        let mut n = 0_u32;
        for byte in (0..=255_u8).filter(|&b| !is_printable_byte(b)) {
            let scalar = REMAP_BASE + n;
            // The remap range is far below the surrogate block.
            let symbol = char::from_u32(scalar).unwrap();
            byte_symbols[byte as usize] = symbol;
            symbol_bytes[scalar as usize] = Some(byte);
            rank_order[rank] = byte;
            rank += 1;
            n += 1;
        }
        assert_eq!(n as usize, REMAPPED_BYTE_COUNT);
        assert_eq!(rank, 256);

        Self {
            byte_symbols,
            symbol_bytes,
            rank_order,
        }
    }

    /// Get the symbol for a byte.
    #[inline(always)]
    pub fn byte_to_symbol(
        &self,
        byte: u8,
    ) -> char {
        self.byte_symbols[byte as usize]
    }

    /// Get the byte for a symbol.
    ///
    /// ## Returns
    /// The byte; or [`BpeError::InvalidSymbol`] if `symbol` is not in the table.
    #[inline(always)]
    pub fn symbol_to_byte(
        &self,
        symbol: char,
    ) -> BpeResult<u8> {
        self.symbol_bytes
            .get(symbol as usize)
            .copied()
            .flatten()
            .ok_or(BpeError::InvalidSymbol(symbol))
    }

    /// Bytes, in the order of their single-byte token ranks.
    pub fn rank_order(&self) -> &[u8; 256] {
        &self.rank_order
    }

    /// Append the symbols for `bytes` to a target string.
    pub fn append_symbols(
        &self,
        bytes: &[u8],
        target: &mut String,
    ) {
        target.extend(bytes.iter().map(|&b| self.byte_to_symbol(b)));
    }

    /// Map bytes to their symbol string.
    pub fn encode_bytes(
        &self,
        bytes: &[u8],
    ) -> String {
        let mut symbols = String::with_capacity(bytes.len() * 2);
        self.append_symbols(bytes, &mut symbols);
        symbols
    }

    /// Append the bytes for a symbol string to a target buffer.
    ///
    /// On error, `target` holds the bytes of the symbols before the bad one.
    pub fn append_bytes(
        &self,
        symbols: &str,
        target: &mut Vec<u8>,
    ) -> BpeResult<()> {
        for symbol in symbols.chars() {
            target.push(self.symbol_to_byte(symbol)?);
        }
        Ok(())
    }

    /// Map a symbol string back to bytes.
    pub fn decode_symbols(
        &self,
        symbols: &str,
    ) -> BpeResult<Vec<u8>> {
        let mut bytes = Vec::with_capacity(symbols.len());
        self.append_bytes(symbols, &mut bytes)?;
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bijection() {
        let table = ByteUnicodeTable::shared();

        let mut seen = std::collections::HashSet::new();
        for byte in 0..=255_u8 {
            let symbol = table.byte_to_symbol(byte);
            assert!(seen.insert(symbol), "duplicate symbol {symbol:?}");
            assert_eq!(table.symbol_to_byte(symbol), Ok(byte));
        }
        assert_eq!(seen.len(), 256);
    }

    #[test]
    fn test_known_symbols() {
        let table = ByteUnicodeTable::shared();

        assert_eq!(table.byte_to_symbol(b'A'), 'A');
        assert_eq!(table.byte_to_symbol(b'!'), '!');
        assert_eq!(table.byte_to_symbol(0xE4), '\u{e4}');

        assert_eq!(table.byte_to_symbol(0x00), '\u{100}');
        assert_eq!(table.byte_to_symbol(b' '), '\u{120}');
        assert_eq!(table.byte_to_symbol(b'\n'), '\u{10a}');
        assert_eq!(table.byte_to_symbol(0x7F), '\u{121}');
        assert_eq!(table.byte_to_symbol(0xA0), '\u{142}');
        assert_eq!(table.byte_to_symbol(0xAD), '\u{143}');
    }

    #[test]
    fn test_invalid_symbol() {
        let table = ByteUnicodeTable::shared();

        assert_eq!(table.symbol_to_byte(' '), Err(BpeError::InvalidSymbol(' ')));
        assert_eq!(
            table.symbol_to_byte('\u{144}'),
            Err(BpeError::InvalidSymbol('\u{144}'))
        );
        assert_eq!(
            table.symbol_to_byte('\u{4f60}'),
            Err(BpeError::InvalidSymbol('\u{4f60}'))
        );
        assert!(table.decode_symbols("ab c").is_err());
    }

    #[test]
    fn test_rank_order() {
        let table = ByteUnicodeTable::shared();
        let order = table.rank_order();

        let rank_of = |byte: u8| order.iter().position(|&b| b == byte).unwrap();

        assert_eq!(rank_of(b'!'), 0);
        assert_eq!(rank_of(b'~'), 93);
        assert_eq!(rank_of(0xBD), 121);
        assert_eq!(rank_of(0xBC), 120);
        assert_eq!(rank_of(0xEF), 171);
        assert_eq!(rank_of(0x00), 188);
        assert_eq!(rank_of(b' '), 220);
        assert_eq!(rank_of(0x8C), 234);
        assert_eq!(rank_of(0x96), 244);
        assert_eq!(rank_of(0xA0), 254);
        assert_eq!(rank_of(0xAD), 255);
    }

    #[test]
    fn test_encode_decode_bytes() {
        let table = ByteUnicodeTable::default();

        let text = "\u{4f60}\u{597d} world\n";
        let symbols = table.encode_bytes(text.as_bytes());
        assert_eq!(
            symbols,
            "\u{e4}\u{bd}\u{142}\u{e5}\u{a5}\u{bd}\u{120}world\u{10a}"
        );
        assert_eq!(table.decode_symbols(&symbols).unwrap(), text.as_bytes());

        let raw = [0xFF_u8, 0x00, 0x80];
        let symbols = table.encode_bytes(&raw);
        assert_eq!(table.decode_symbols(&symbols).unwrap(), raw);
    }
}
