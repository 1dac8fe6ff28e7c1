#![allow(missing_docs)]

use std::sync::{Arc, LazyLock};

use divan::{Bencher, black_box, counter::BytesCount};
use gptbpe::{Tokenizer, TokenizerOptions, disk_cache::GptbpeDiskCache, vocab::Gpt3Assets};

#[global_allocator]
static ALLOC: divan::AllocProfiler = divan::AllocProfiler::system();

fn main() {
    divan::main();
}

const ENGLISH_SAMPLE: &str = "The quick brown fox jumps over the lazy dog. \
It's a beautiful day, and I'll be taking my 3 dogs for a walk. \
Don't forget: the temperature is 72 degrees!\n";

const DIVERSE_SAMPLE: &str = "caf\u{e9} na\u{ef}ve \u{4f60}\u{597d}\u{ff0c}\u{4e16}\u{754c} \
Geburtstag 2024: Alles Gute! emoji: \u{1f600}\u{1f680}\u{1f4a1} \
\u{41f}\u{440}\u{438}\u{432}\u{435}\u{442} \u{43c}\u{438}\u{440}\n";

fn english_text() -> String {
    ENGLISH_SAMPLE.repeat(200)
}

fn diverse_text() -> String {
    DIVERSE_SAMPLE.repeat(200)
}

static GPT3: LazyLock<Arc<Tokenizer<u32>>> = LazyLock::new(|| {
    let mut disk_cache = GptbpeDiskCache::default();
    let assets: Gpt3Assets<u32> = Gpt3Assets::load(&mut disk_cache).unwrap();
    Arc::new(TokenizerOptions::default().build(assets).unwrap())
});

mod encode {
    use super::*;

    #[divan::bench]
    fn english_warm(bencher: Bencher) {
        let text = english_text();
        GPT3.encode(&text);
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| GPT3.try_encode_ids(black_box(&text)).unwrap());
    }

    #[divan::bench]
    fn diverse_warm(bencher: Bencher) {
        let text = diverse_text();
        GPT3.encode(&text);
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| GPT3.try_encode_ids(black_box(&text)).unwrap());
    }

    #[divan::bench]
    fn english_cold(bencher: Bencher) {
        let text = english_text();
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| {
                GPT3.cache().clear();
                GPT3.try_encode_ids(black_box(&text)).unwrap()
            });
    }

    #[divan::bench]
    fn count_english(bencher: Bencher) {
        let text = english_text();
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| GPT3.try_count(black_box(&text)).unwrap());
    }
}

mod decode {
    use super::*;

    #[divan::bench]
    fn english(bencher: Bencher) {
        let text = english_text();
        let tokens = GPT3.try_encode_ids(&text).unwrap();
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| GPT3.try_decode(black_box(&tokens)).unwrap());
    }

    #[divan::bench]
    fn diverse(bencher: Bencher) {
        let text = diverse_text();
        let tokens = GPT3.try_encode_ids(&text).unwrap();
        bencher
            .counter(BytesCount::new(text.len()))
            .bench(|| GPT3.try_decode(black_box(&tokens)).unwrap());
    }
}
