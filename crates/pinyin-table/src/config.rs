// Pipeline options

use std::path::Path;

use serde::Deserialize;

use crate::TableError;
use crate::aggregator::TieBreak;

/// Options for one table build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct TableOptions {
    /// How to choose between equally frequent readings of a character.
    pub tie_break: TieBreak,

    /// When true, every character with a dominant reading gets its own entry,
    /// replacing any ingested entry for it. Turning this off only makes sense
    /// for inspecting the ingested table.
    pub single_char_override: bool,

    /// When true, headwords and transcriptions go through the dictionary
    /// noise rules. When false, they are used as read.
    pub normalize: bool,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::Lexicographic,
            single_char_override: true,
            normalize: true,
        }
    }
}

impl TableOptions {
    /// Read options from a JSON file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, TableError> {
        let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| TableError::Config {
            path: path.to_path_buf(),
            source,
        })
    }
}
