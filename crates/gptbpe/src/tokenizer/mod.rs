//! # Combined Tokenizer

mod bpe_tokenizer;
mod encode_result;
mod tokenizer_options;

#[doc(inline)]
pub use bpe_tokenizer::*;
#[doc(inline)]
pub use encode_result::*;
#[doc(inline)]
pub use tokenizer_options::*;
