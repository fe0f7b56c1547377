// Syllable segmentation -- boundary insertion into unspaced transcriptions
//
// The segmenter runs seven local rewrite rules over the transcription, in a
// fixed order. Each rule scans its input left to right, and every match
// consumes the whole window it looked at, so a match can never overlap the
// previous one. Rule N always sees the output of rule N-1.
//
// The cascade is a heuristic. It produces doubled boundaries in places
// (collapsed by `segment`) and mis-splits some sequences, e.g. "tiānānmén"
// becomes "tiā nān mén". Downstream tables are compared byte for byte between
// runs, so the rules must not be "improved" individually.

use pinyin_core::character::{BOUNDARY, is_front_vowel, is_nucleus, is_vowel};

use crate::normalizer::collapse_whitespace;

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// One boundary-insertion rule over a fixed-width character window.
#[derive(Clone, Copy)]
pub struct SyllableRule {
    /// Short identifier, used in logs and tests.
    pub name: &'static str,
    /// Number of characters the rule inspects (and consumes on a match).
    pub width: usize,
    /// Offset within the window before which the boundary is inserted.
    pub boundary_at: usize,
    matches: fn(&[char]) -> bool,
}

impl SyllableRule {
    /// Whether the window (exactly `width` characters) matches this rule.
    pub fn matches(&self, window: &[char]) -> bool {
        window.len() == self.width && (self.matches)(window)
    }
}

impl std::fmt::Debug for SyllableRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyllableRule")
            .field("name", &self.name)
            .field("width", &self.width)
            .field("boundary_at", &self.boundary_at)
            .finish()
    }
}

/// Vowel followed by anything that is neither a vowel nor `n`/`r`.
/// `n` and `r` are left for the nasal and retroflex rules.
fn vowel_then_consonant(w: &[char]) -> bool {
    is_vowel(w[0]) && !is_vowel(w[1]) && w[1] != 'n' && w[1] != 'r'
}

/// `w` followed by `ch`, `sh` or `zh`.
fn w_then_retroflex(w: &[char]) -> bool {
    w[0] == 'w' && matches!(w[1], 'c' | 's' | 'z') && w[2] == 'h'
}

/// `n` followed by anything that cannot start a nucleus and is not `g`.
fn n_then_consonant(w: &[char]) -> bool {
    w[0] == 'n' && !is_nucleus(w[1]) && w[1] != 'g'
}

/// Nucleus, one non-vowel, nucleus. The middle letter opens the next syllable.
fn intervocalic(w: &[char]) -> bool {
    is_nucleus(w[0]) && !is_vowel(w[1]) && is_nucleus(w[2])
}

/// Nucleus, `n`, `g`, nucleus. Split as `Vn|gV`.
fn nasal_coda(w: &[char]) -> bool {
    is_nucleus(w[0]) && w[1] == 'n' && w[2] == 'g' && is_nucleus(w[3])
}

/// `g` or `r` followed by anything that is not a vowel.
fn residual_coda(w: &[char]) -> bool {
    matches!(w[0], 'g' | 'r') && !is_vowel(w[1])
}

/// `r` after anything but the `e` family.
fn retroflex_suffix(w: &[char]) -> bool {
    !is_front_vowel(w[0]) && w[1] == 'r'
}

/// The cascade, in application order.
pub const RULES: [SyllableRule; 7] = [
    SyllableRule {
        name: "vowel-consonant",
        width: 2,
        boundary_at: 1,
        matches: vowel_then_consonant,
    },
    SyllableRule {
        name: "w-retroflex",
        width: 3,
        boundary_at: 1,
        matches: w_then_retroflex,
    },
    SyllableRule {
        name: "n-consonant",
        width: 2,
        boundary_at: 1,
        matches: n_then_consonant,
    },
    SyllableRule {
        name: "intervocalic",
        width: 3,
        boundary_at: 1,
        matches: intervocalic,
    },
    SyllableRule {
        name: "nasal-coda",
        width: 4,
        boundary_at: 2,
        matches: nasal_coda,
    },
    SyllableRule {
        name: "residual-coda",
        width: 2,
        boundary_at: 1,
        matches: residual_coda,
    },
    SyllableRule {
        name: "retroflex-suffix",
        width: 2,
        boundary_at: 1,
        matches: retroflex_suffix,
    },
];

// ---------------------------------------------------------------------------
// Application
// ---------------------------------------------------------------------------

/// Apply one rule to the whole input.
///
/// Windows are tested at every position from left to right. A matching window
/// is copied with a boundary inserted and the scan resumes right after it.
pub fn apply_rule(rule: &SyllableRule, input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);
    let mut i = 0;

    while i < chars.len() {
        if i + rule.width <= chars.len() && rule.matches(&chars[i..i + rule.width]) {
            for (k, &c) in chars[i..i + rule.width].iter().enumerate() {
                if k == rule.boundary_at {
                    out.push(BOUNDARY);
                }
                out.push(c);
            }
            i += rule.width;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }

    out
}

/// Run the full cascade and trim the result.
///
/// The output can contain runs of boundaries; see [`segment`].
pub fn separate(transcription: &str) -> String {
    let separated = RULES
        .iter()
        .fold(transcription.to_string(), |acc, rule| apply_rule(rule, &acc));
    separated.trim_matches(|c: char| c <= ' ').to_string()
}

/// Run the full cascade and collapse boundary runs to single spaces.
///
/// This is the form the table pipeline stores. Segmenting an already
/// segmented transcription returns it unchanged.
pub fn segment(transcription: &str) -> String {
    collapse_whitespace(&separate(transcription))
}
