//! # Test Fixtures
//!
//! A small vocabulary in the GPT-2 `DataGym` format: the 256 byte tokens at
//! their GPT-2 ids, and just enough merges to reproduce the GPT-2 ids of
//! "Hello World" and "你好，世界".

use std::io::Cursor;

use serde_json::{Map, Value};

use crate::{
    codec::ByteUnicodeTable,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::Gpt3Assets,
};

/// Fixture merges, in rank order, with the id of each merge result.
pub const FIXTURE_MERGES: &[(&str, &str, u64)] = &[
    ("H", "e", 50000),
    ("l", "l", 50001),
    ("He", "ll", 50002),
    ("Hell", "o", 15496),
    ("o", "r", 50003),
    ("l", "d", 50004),
    ("\u{120}", "W", 50005),
    ("or", "ld", 50006),
    ("\u{120}W", "orld", 2159),
    // 0xE4 0xBD
    ("\u{e4}", "\u{bd}", 19526),
    // 0xE5 0xA5
    ("\u{e5}", "\u{a5}", 25001),
    // 0xE4 0xB8
    ("\u{e4}", "\u{b8}", 10310),
    // 0xE7 0x95
    ("\u{e7}", "\u{137}", 45911),
];

/// The GPT-2 end-of-text marker, kept as a plain vocabulary entry.
pub const END_OF_TEXT: (&str, u64) = ("<|endoftext|>", 50256);

/// The fixture "encoder.json" contents.
pub fn fixture_encoder_json() -> String {
    let table = ByteUnicodeTable::shared();

    let mut map = Map::new();
    for (id, &byte) in table.rank_order().iter().enumerate() {
        map.insert(table.byte_to_symbol(byte).to_string(), Value::from(id));
    }
    for &(left, right, id) in FIXTURE_MERGES {
        map.insert(format!("{left}{right}"), Value::from(id));
    }
    map.insert(END_OF_TEXT.0.to_string(), Value::from(END_OF_TEXT.1));

    Value::Object(map).to_string()
}

/// The fixture "vocab.bpe" contents.
pub fn fixture_vocab_bpe() -> String {
    let mut text = "#version: 0.2\n".to_string();
    for &(left, right, _) in FIXTURE_MERGES {
        text.push_str(left);
        text.push(' ');
        text.push_str(right);
        text.push('\n');
    }
    text
}

/// Load the fixture assets.
pub fn fixture_assets<T: TokenType>() -> Gpt3Assets<T> {
    Gpt3Assets::from_readers(
        Cursor::new(fixture_encoder_json()),
        Cursor::new(fixture_vocab_bpe()),
    )
    .unwrap()
}

/// Build a fresh tokenizer over the fixture assets.
pub fn fixture_tokenizer() -> Tokenizer<u32> {
    Tokenizer::from_assets(fixture_assets()).unwrap()
}
