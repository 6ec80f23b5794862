//! Command index: `language → platform → command names` for one cache generation.
//!
//! The index is always replaced wholesale: it is built by scanning a pages tree or loaded
//! from the generation's `commands.json`, and never patched in place.

use std::collections::BTreeMap;
use std::fmt;

/// Human-friendly language and platform names.
mod names;
/// Index persistence (`commands.json`).
mod persist;
/// Read-side queries used by the presentation layer.
mod query;
/// Building an index from a pages tree.
mod scan;

pub use names::{language_display_name, platform_display_name, title_case};
pub use persist::{INDEX_FILE_NAME, load_index_file, save_index_file};
pub use query::{LanguageEntry, PlatformEntry};
pub use scan::{PAGE_EXT, PAGES_DIR_PREFIX, language_of_pages_dir, scan_pages_root};

/// Language whose platform list defines the set of known platforms.
pub const DEFAULT_LANGUAGE: &str = "en";

/// What: Three-level mapping of available pages.
///
/// Details:
/// - `BTreeMap` keys plus sorted, deduplicated command lists make serialization
///   deterministic: the same tree always yields the same `commands.json` bytes.
/// - Serialized transparently as `{ "en": { "linux": ["ls", ...] } }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CommandIndex {
    /// language code → platform code → command names.
    pub map: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl CommandIndex {
    /// Whether no command is indexed at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map
            .values()
            .all(|plats| plats.values().all(Vec::is_empty))
    }

    /// Total number of (language, platform, command) entries.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.map
            .values()
            .flat_map(BTreeMap::values)
            .map(Vec::len)
            .sum()
    }

    /// Commands listed for `(language, platform)`, if that pair exists.
    #[must_use]
    pub fn commands(&self, language: &str, platform: &str) -> Option<&[String]> {
        self.map
            .get(language)
            .and_then(|plats| plats.get(platform))
            .map(Vec::as_slice)
    }

    /// What: Record a command for `(language, platform)`.
    ///
    /// Details:
    /// - Used while building a fresh index; callers must call `finalize` before publishing.
    pub(crate) fn insert(&mut self, language: &str, platform: &str, command: String) {
        self.map
            .entry(language.to_string())
            .or_default()
            .entry(platform.to_string())
            .or_default()
            .push(command);
    }

    /// Sort and deduplicate every command list so names are unique per pair.
    pub(crate) fn finalize(&mut self) {
        for plats in self.map.values_mut() {
            for cmds in plats.values_mut() {
                cmds.sort();
                cmds.dedup();
            }
        }
    }
}

/// What: Failure while reading or writing an index document.
#[derive(Debug)]
pub enum IndexError {
    /// Filesystem access failed.
    Io(std::io::Error),
    /// The document is not the expected JSON mapping.
    Json(serde_json::Error),
}

impl fmt::Display for IndexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "index I/O error: {err}"),
            Self::Json(err) => write!(f, "index document is invalid: {err}"),
        }
    }
}

impl std::error::Error for IndexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for IndexError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for IndexError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}
