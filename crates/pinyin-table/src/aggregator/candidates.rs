// Per-character reading candidates and dominant-reading resolution

use hashbrown::HashMap;
use serde::Deserialize;

/// One observed reading of a character.
///
/// `occurrences` is zero-based: the first sighting stores 0 and every repeat
/// adds 1. Output records carry this value as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub token: String,
    pub occurrences: u32,
}

impl Candidate {
    fn first_sighting(token: &str) -> Self {
        Self {
            token: token.to_string(),
            occurrences: 0,
        }
    }
}

/// How to choose between candidates with the same occurrence count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// The smallest token in code point order wins.
    #[default]
    Lexicographic,
    /// The candidate recorded first wins.
    FirstSeen,
}

impl std::str::FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lexicographic" => Ok(Self::Lexicographic),
            "first-seen" => Ok(Self::FirstSeen),
            other => Err(format!(
                "unknown tie-break {other:?} (expected lexicographic or first-seen)"
            )),
        }
    }
}

/// Character to the readings observed for it, unique by token, in the order
/// they were first recorded.
#[derive(Debug, Clone, Default)]
pub struct CandidateTable {
    by_char: HashMap<char, Vec<Candidate>>,
}

impl CandidateTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one (character, token) sighting.
    pub fn record(&mut self, ch: char, token: &str) {
        let candidates = self.by_char.entry(ch).or_default();
        match candidates.iter_mut().find(|c| c.token == token) {
            Some(existing) => existing.occurrences += 1,
            None => candidates.push(Candidate::first_sighting(token)),
        }
    }

    /// All readings recorded for `ch`.
    pub fn candidates(&self, ch: char) -> &[Candidate] {
        self.by_char.get(&ch).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of characters with at least one reading.
    pub fn len(&self) -> usize {
        self.by_char.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_char.is_empty()
    }

    /// The reading with the highest occurrence count for `ch`.
    pub fn dominant(&self, ch: char, tie_break: TieBreak) -> Option<&Candidate> {
        dominant(self.candidates(ch), tie_break)
    }

    /// The dominant reading of every character, ordered by character.
    pub fn resolve(&self, tie_break: TieBreak) -> Vec<(char, &Candidate)> {
        let mut resolved: Vec<(char, &Candidate)> = self
            .by_char
            .iter()
            .filter_map(|(&ch, candidates)| dominant(candidates, tie_break).map(|c| (ch, c)))
            .collect();
        resolved.sort_unstable_by_key(|&(ch, _)| ch);
        resolved
    }
}

fn dominant(candidates: &[Candidate], tie_break: TieBreak) -> Option<&Candidate> {
    let (first, rest) = candidates.split_first()?;
    let mut best = first;
    for candidate in rest {
        let better = match candidate.occurrences.cmp(&best.occurrences) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => match tie_break {
                TieBreak::Lexicographic => candidate.token < best.token,
                TieBreak::FirstSeen => false,
            },
        };
        if better {
            best = candidate;
        }
    }
    Some(best)
}
