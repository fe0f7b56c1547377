// pinyin-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use tracing_subscriber::EnvFilter;

/// Environment variable naming a directory searched for relative
/// dictionary paths.
pub const DATA_DIR_ENV: &str = "PINYIN_TABLE_DATA";

/// Log level used when `RUST_LOG` is not set.
pub fn default_level(verbose: bool, quiet: bool) -> &'static str {
    match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "warn",
        (false, false) => "info",
    }
}

/// Send `tracing` events to stderr. `RUST_LOG` wins over the flags.
pub fn init_tracing(verbose: bool, quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(verbose, quiet)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Candidate locations for a dictionary path, in search order:
/// the path as given, then `data_dir/path` when the path is relative.
pub fn search_paths(path: &Path, data_dir: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = vec![path.to_path_buf()];
    if let Some(dir) = data_dir.filter(|_| path.is_relative()) {
        paths.push(dir.join(path));
    }
    paths
}

/// Find a dictionary, looking in [`DATA_DIR_ENV`] for relative paths.
///
/// A StarDict base path counts as found when its `.ifo` file exists.
pub fn locate_dictionary(path: &Path) -> Result<PathBuf> {
    let data_dir = std::env::var_os(DATA_DIR_ENV).map(PathBuf::from);
    let candidates = search_paths(path, data_dir.as_deref());

    for candidate in &candidates {
        if candidate.is_file() || ifo_path(candidate).is_file() {
            return Ok(candidate.clone());
        }
    }

    bail!(
        "could not find dictionary {} in any of the search paths:\n{}",
        path.display(),
        candidates
            .iter()
            .map(|p| format!("  - {}", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    )
}

fn ifo_path(base: &Path) -> PathBuf {
    let mut name = base.as_os_str().to_os_string();
    name.push(".ifo");
    PathBuf::from(name)
}
