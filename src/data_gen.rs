// src/data_gen.rs
//
// Copyright, 2025.  Signal65 / Futurum Group.
//
//! Readable pseudo-random text payloads.
//!
//! A payload of `size_kb` KiB is built by drawing `size_kb * WORDS_PER_KB`
//! words (uniformly, with replacement) from [`WORDS`], joining them with single
//! spaces and truncating to `size_kb * 1024` bytes.
//!
//! The word count assumes ~5 characters per word. Truncation is the only hard
//! size guarantee: if the joined text comes out shorter than the target, the
//! payload is shorter than requested and is returned as-is.

use bytes::Bytes;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::constants::{MAX_OBJECT_SIZE_KB, MIN_OBJECT_SIZE_KB, WORDS, WORDS_PER_KB};

/// Pick an object size uniformly in `[MIN_OBJECT_SIZE_KB, MAX_OBJECT_SIZE_KB]`.
pub fn random_size_kb<R: Rng + ?Sized>(rng: &mut R) -> usize {
    rng.random_range(MIN_OBJECT_SIZE_KB..=MAX_OBJECT_SIZE_KB)
}

/// Generate readable text for a `size_kb` KiB object.
pub fn generate_readable_text<R: Rng + ?Sized>(size_kb: usize, rng: &mut R) -> String {
    let target = size_kb * 1024;
    let word_count = size_kb * WORDS_PER_KB;

    let mut text = String::with_capacity(target + 16);
    for i in 0..word_count {
        if i > 0 {
            text.push(' ');
        }
        // WORDS is a non-empty const array
        if let Some(word) = WORDS.choose(rng) {
            text.push_str(word);
        }
        // anything past the target is truncated below
        if text.len() > target {
            break;
        }
    }

    // every word is ASCII, so any byte offset is a char boundary
    text.truncate(target);
    text
}

/// Draw a random size and generate a payload for it, ready for a PUT body.
pub fn generate_object<R: Rng + ?Sized>(rng: &mut R) -> Bytes {
    let size_kb = random_size_kb(rng);
    Bytes::from(generate_readable_text(size_kb, rng))
}
