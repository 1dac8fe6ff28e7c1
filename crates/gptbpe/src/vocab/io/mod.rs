//! # Vocabulary IO

pub mod datagym;

#[doc(inline)]
pub use datagym::{read_datagym_encoder_json, read_datagym_vocab_bpe};
