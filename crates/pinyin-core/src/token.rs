// PinyinToken grammar and word/transcription alignment

use crate::character::{BOUNDARY, is_transcription_char};

/// Why a (word, transcription) pair cannot become an entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    /// The transcription is empty.
    #[error("empty transcription")]
    Empty,

    /// The transcription contains a character outside the token grammar.
    #[error("character {ch:?} at position {pos} is not a pinyin letter")]
    InvalidCharacter { ch: char, pos: usize },

    /// The word has a different number of characters than the transcription
    /// has tokens.
    #[error("word has {chars} characters but transcription has {tokens} tokens")]
    LengthMismatch { chars: usize, tokens: usize },
}

/// Check a transcription against the token grammar: one or more characters,
/// each a lowercase letter, a tone-marked letter, or a space.
pub fn validate_transcription(transcription: &str) -> Result<(), TokenError> {
    if transcription.is_empty() {
        return Err(TokenError::Empty);
    }
    match transcription
        .chars()
        .enumerate()
        .find(|&(_, c)| !is_transcription_char(c))
    {
        Some((pos, ch)) => Err(TokenError::InvalidCharacter { ch, pos }),
        None => Ok(()),
    }
}

/// Iterate over the tokens of a transcription.
///
/// Runs of boundaries never produce empty tokens.
pub fn tokens(transcription: &str) -> impl Iterator<Item = &str> {
    transcription.split(BOUNDARY).filter(|t| !t.is_empty())
}

/// Number of tokens in a transcription.
pub fn token_count(transcription: &str) -> usize {
    tokens(transcription).count()
}

/// Number of characters (code points) in a word.
pub fn char_count(word: &str) -> usize {
    word.chars().count()
}

/// Validate the transcription and check that it has exactly one token per
/// character of `word`.
pub fn check_alignment(word: &str, transcription: &str) -> Result<(), TokenError> {
    validate_transcription(transcription)?;
    let chars = char_count(word);
    let tokens = token_count(transcription);
    if chars != tokens {
        return Err(TokenError::LengthMismatch { chars, tokens });
    }
    Ok(())
}

/// Walk a word's characters and a transcription's tokens in lock-step.
///
/// Stops at the shorter of the two; callers that need a full pairing check
/// [`check_alignment`] first.
pub fn aligned<'a>(word: &'a str, transcription: &'a str) -> impl Iterator<Item = (char, &'a str)> {
    word.chars().zip(tokens(transcription))
}
