//! Page resolver: picks the authoritative cache generation and reads page files from it.

use std::fs;
use std::path::{Path, PathBuf};

use crate::index::{
    CommandIndex, INDEX_FILE_NAME, PAGE_EXT, PAGES_DIR_PREFIX, load_index_file, scan_pages_root,
};

mod format;

pub use format::{apply_arg_style, format_example};

/// Which generation a read was served from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Generation {
    /// Writable tree populated by a refresh.
    User,
    /// Read-only tree bundled with the application.
    System,
}

/// What: Read-only access to the two cache generations.
///
/// Details:
/// - The user generation is authoritative only when its `commands.json` parses; a
///   half-written or foreign directory therefore never shadows the system data.
/// - Every call consults the filesystem, so a generation swap performed by the installer
///   is picked up without coordination.
#[derive(Clone, Debug)]
pub struct PageStore {
    /// Root of the bundled generation.
    system_root: PathBuf,
    /// Root of the refreshed generation.
    user_root: PathBuf,
}

impl PageStore {
    /// Create a store over the given generation roots.
    #[must_use]
    pub const fn new(system_root: PathBuf, user_root: PathBuf) -> Self {
        Self {
            system_root,
            user_root,
        }
    }

    /// Root of the refreshed generation (may not exist yet).
    #[must_use]
    pub fn user_root(&self) -> &Path {
        &self.user_root
    }

    /// Root of the bundled generation.
    #[must_use]
    pub fn system_root(&self) -> &Path {
        &self.system_root
    }

    /// What: Decide which generation is authoritative right now.
    ///
    /// Output:
    /// - `Generation::User` when the user tree holds a valid index document, otherwise
    ///   `Generation::System`.
    #[must_use]
    pub fn active_generation(&self) -> Generation {
        let index_path = self.user_root.join(INDEX_FILE_NAME);
        if index_path.is_file() && load_index_file(&index_path).is_ok() {
            Generation::User
        } else {
            Generation::System
        }
    }

    /// Root directory of the authoritative generation.
    #[must_use]
    pub fn active_root(&self) -> &Path {
        match self.active_generation() {
            Generation::User => &self.user_root,
            Generation::System => &self.system_root,
        }
    }

    /// What: Load the command index of the authoritative generation.
    ///
    /// Output:
    /// - The parsed `commands.json`; when it is missing or invalid the active tree is
    ///   scanned instead; an empty index when neither works.
    ///
    /// Details:
    /// - Never fails: an unreadable cache is an empty browser, not a crash.
    #[must_use]
    pub fn load_index(&self) -> CommandIndex {
        let root = self.active_root();
        let index_path = root.join(INDEX_FILE_NAME);
        match load_index_file(&index_path) {
            Ok(index) => {
                tracing::info!(
                    root = %root.display(),
                    commands = index.command_count(),
                    "loaded command index"
                );
                return index;
            }
            Err(e) => {
                tracing::warn!(
                    path = %index_path.display(),
                    error = %e,
                    "index document unavailable; scanning pages tree"
                );
            }
        }
        scan_pages_root(root).unwrap_or_else(|e| {
            tracing::warn!(root = %root.display(), error = %e, "failed to scan pages tree");
            CommandIndex::default()
        })
    }

    /// Conventional location of a page inside the authoritative generation.
    #[must_use]
    pub fn page_path(&self, language: &str, platform: &str, command: &str) -> PathBuf {
        self.active_root()
            .join(format!("{PAGES_DIR_PREFIX}{language}"))
            .join(platform)
            .join(format!("{command}.{PAGE_EXT}"))
    }

    /// What: Read a page as raw text.
    ///
    /// Inputs:
    /// - `language`, `platform`, `command`: Page coordinates.
    ///
    /// Output:
    /// - File contents, or the literal
    ///   `Command '<command>' not found in path '<path>'.` when it cannot be read.
    ///
    /// Details:
    /// - A missing page is an expected outcome (stale index) and is returned as data.
    #[must_use]
    pub fn resolve_page(&self, language: &str, platform: &str, command: &str) -> String {
        let path = self.page_path(language, platform, command);
        match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "page not found");
                not_found_message(command, &path)
            }
        }
    }
}

/// Text shown in place of a page that does not exist.
#[must_use]
pub fn not_found_message(command: &str, path: &Path) -> String {
    format!("Command '{command}' not found in path '{}'.", path.display())
}
