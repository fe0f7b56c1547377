// Character classification for the tone-marked pinyin alphabet
//
// The segmentation rules and the token grammar are both expressed in terms of
// these classes. Every set here is closed: a letter outside of it (digits,
// punctuation, spaces, CJK) is simply "not a vowel", which is what the
// negated classes of the segmentation rules rely on.

// ---------------------------------------------------------------------------
// Alphabet tables
// ---------------------------------------------------------------------------

/// Vowel letters: the five plain vowels, each with its four tone marks, the
/// toned forms of the front-rounded vowel, and the plain front-rounded vowel.
pub const VOWELS: &[char] = &[
    'a', 'ā', 'á', 'ǎ', 'à', //
    'e', 'ē', 'é', 'ě', 'è', //
    'i', 'ī', 'í', 'ǐ', 'ì', //
    'o', 'ō', 'ó', 'ǒ', 'ò', //
    'u', 'ū', 'ú', 'ǔ', 'ù', //
    'ǖ', 'ǘ', 'ǚ', 'ǜ', 'ü',
];

/// Front vowel letters that absorb a following `r` into the nucleus.
pub const FRONT_VOWELS: &[char] = &['e', 'ē', 'é', 'ě', 'è'];

/// ASCII stand-in for the front-rounded vowel used by keyboard notations.
pub const FRONT_ROUNDED_ASCII: char = 'v';

/// Tone-marked letters accepted by the token grammar in addition to `a-z`.
const TONED_LETTERS: &[char] = &[
    'ā', 'ē', 'ī', 'ō', 'ū', 'ǖ', //
    'á', 'é', 'í', 'ó', 'ú', 'ǘ', //
    'ǎ', 'ě', 'ǐ', 'ǒ', 'ǔ', 'ǚ', //
    'à', 'è', 'ì', 'ò', 'ù', 'ǜ', //
    'ü',
];

/// Separator between syllables (and thus between tokens).
pub const BOUNDARY: char = ' ';

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Check whether a character is a vowel letter, toned or not.
pub fn is_vowel(c: char) -> bool {
    VOWELS.contains(&c)
}

/// Check whether a character can carry a syllable nucleus: any vowel, plus the
/// ASCII `v` stand-in for the front-rounded vowel.
pub fn is_nucleus(c: char) -> bool {
    is_vowel(c) || c == FRONT_ROUNDED_ASCII
}

/// Check whether a character is `e` or one of its toned forms.
pub fn is_front_vowel(c: char) -> bool {
    FRONT_VOWELS.contains(&c)
}

/// Check whether a character is allowed inside a transcription token.
pub fn is_token_letter(c: char) -> bool {
    c.is_ascii_lowercase() || TONED_LETTERS.contains(&c)
}

/// Check whether a character is allowed anywhere in a transcription: a token
/// letter or the syllable boundary.
pub fn is_transcription_char(c: char) -> bool {
    c == BOUNDARY || is_token_letter(c)
}

/// Convert a character to its simple lowercase equivalent, taking only the
/// first character of multi-character expansions.
pub fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_vowels() {
        for c in ['a', 'e', 'i', 'o', 'u'] {
            assert!(is_vowel(c), "{c} should be a vowel");
        }
    }

    #[test]
    fn toned_vowels() {
        for c in "āáǎàēéěèīíǐìōóǒòūúǔùǖǘǚǜü".chars() {
            assert!(is_vowel(c), "{c} should be a vowel");
        }
    }

    #[test]
    fn consonants_are_not_vowels() {
        for c in "bcdfghjklmnpqrstvwxyz".chars() {
            assert!(!is_vowel(c));
            assert!(is_token_letter(c));
        }
    }

    #[test]
    fn v_is_nucleus_but_not_vowel() {
        assert!(!is_vowel('v'));
        assert!(is_nucleus('v'));
        assert!(is_nucleus('ü'));
        assert!(!is_nucleus('n'));
    }

    #[test]
    fn front_vowels_are_the_e_family() {
        for c in "eēéěè".chars() {
            assert!(is_front_vowel(c));
        }
        assert!(!is_front_vowel('a'));
        assert!(!is_front_vowel('i'));
    }

    #[test]
    fn space_and_symbols_are_unclassified() {
        for c in [' ', '1', '-', '报'] {
            assert!(!is_vowel(c));
            assert!(!is_token_letter(c));
        }
    }

    #[test]
    fn token_letters_exclude_uppercase() {
        assert!(is_token_letter('z'));
        assert!(is_token_letter('ǜ'));
        assert!(!is_token_letter('A'));
        assert!(!is_token_letter('Ā'));
    }

    #[test]
    fn transcription_chars_include_boundary() {
        assert!(is_transcription_char(' '));
        assert!(!is_transcription_char('\t'));
    }

    #[test]
    fn lower_toned_uppercase() {
        assert_eq!(simple_lower('Ā'), 'ā');
        assert_eq!(simple_lower('B'), 'b');
        assert_eq!(simple_lower('报'), '报');
    }
}
