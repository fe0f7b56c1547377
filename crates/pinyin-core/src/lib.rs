//! Shared leaf types for building per-word and per-character pinyin tables.
//!
//! - [`character`] -- Classification of the tone-marked phonetic alphabet
//! - [`token`] -- PinyinToken grammar and word/transcription alignment
//! - [`entry`] -- The output record (`word|pinyin|frequency|pinyinFrequency`)

pub mod character;
pub mod entry;
pub mod token;

pub use entry::{Entry, RecordError};
pub use token::TokenError;
