//! # Vocabulary
//!
//! * [`VocabTable`] - subword/id bijection.
//! * [`MergeRanks`] - ranked merge pairs.
//! * [`Gpt3Assets`] - the two, loaded from the GPT-2 `DataGym` files.

pub mod gpt3_assets;
pub mod io;
pub mod merge_ranks;
pub mod resources;
pub mod vocab_table;

#[doc(inline)]
pub use gpt3_assets::Gpt3Assets;
#[doc(inline)]
pub use merge_ranks::MergeRanks;
#[doc(inline)]
pub use resources::{
    ConstKeyedResource,
    ConstUrlResource,
    GPT2_ENCODER_JSON_RESOURCE,
    GPT2_VOCAB_BPE_RESOURCE,
    ResourceLoader,
};
#[doc(inline)]
pub use vocab_table::VocabTable;
