//! Archive installer: build a new generation next to the live one, then swap it in.

use std::fs;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use zip::ZipArchive;

use super::{Phase, RefreshError};
use crate::index::{
    CommandIndex, INDEX_FILE_NAME, PAGES_DIR_PREFIX, language_of_pages_dir, save_index_file,
    scan_pages_root,
};

/// Bare directory name the archive uses for English pages.
const BARE_PAGES_DIR: &str = "pages";
/// Language the bare `pages` directory stands for.
const BARE_PAGES_LANGUAGE: &str = "en";

/// What: Installs downloaded archives as the user cache generation.
///
/// Details:
/// - All staging happens inside `cache_dir` so the final move is a same-filesystem rename.
/// - Exclusive writer of `user_root`.
#[derive(Clone, Debug)]
pub struct Installer {
    /// Directory for staging trees and downloads.
    cache_dir: PathBuf,
    /// Live user generation root.
    user_root: PathBuf,
}

/// What: A fully built generation that is not yet visible.
///
/// Details:
/// - Dropping it without `commit` deletes the staging tree and leaves the live
///   generation untouched.
#[derive(Debug)]
pub struct StagedGeneration {
    /// Owns the staging directory; removed on drop.
    staging: TempDir,
    /// Normalised tree inside `staging` that becomes the new generation.
    content_root: PathBuf,
    /// Index built from `content_root`.
    index: CommandIndex,
}

impl StagedGeneration {
    /// Index that will become current on commit.
    #[must_use]
    pub const fn index(&self) -> &CommandIndex {
        &self.index
    }

    /// Root of the staged tree.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.content_root
    }

    /// What: Make the staged tree the live user generation.
    ///
    /// Inputs:
    /// - `user_root`: Live generation path.
    ///
    /// Output:
    /// - The new generation's index.
    ///
    /// # Errors
    /// - `RefreshError::Io` if a rename fails; the previous generation is restored when
    ///   it had already been moved aside.
    ///
    /// Details:
    /// - The old tree is renamed aside, the staged tree renamed into place, and only then
    ///   is the old tree deleted. Readers see either the old or the new generation.
    pub fn commit(self, user_root: &Path) -> Result<CommandIndex, RefreshError> {
        let previous = sibling_with_suffix(user_root, "previous");
        if previous.exists() {
            fs::remove_dir_all(&previous)?;
        }
        let had_previous = user_root.exists();
        if had_previous {
            fs::rename(user_root, &previous)?;
        }
        if let Err(e) = fs::rename(&self.content_root, user_root) {
            if had_previous && let Err(restore) = fs::rename(&previous, user_root) {
                tracing::error!(
                    path = %user_root.display(),
                    error = %restore,
                    "failed to restore previous generation"
                );
            }
            return Err(e.into());
        }
        if had_previous && let Err(e) = fs::remove_dir_all(&previous) {
            tracing::warn!(path = %previous.display(), error = %e, "failed to delete previous generation");
        }
        tracing::info!(
            path = %user_root.display(),
            staging = %self.staging.path().display(),
            commands = self.index.command_count(),
            "installed new page generation"
        );
        Ok(self.index)
    }
}

/// `<path>.<suffix>` next to `path`.
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(std::ffi::OsStr::to_os_string)
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}

impl Installer {
    /// Create an installer staging under `cache_dir` and publishing to `user_root`.
    #[must_use]
    pub const fn new(cache_dir: PathBuf, user_root: PathBuf) -> Self {
        Self {
            cache_dir,
            user_root,
        }
    }

    /// Live generation this installer publishes to.
    #[must_use]
    pub fn user_root(&self) -> &Path {
        &self.user_root
    }

    /// What: Extract, normalise and index `archive` in a fresh staging directory.
    ///
    /// Inputs:
    /// - `archive`: Downloaded zip file.
    /// - `on_phase`: Notified when extraction and indexing start.
    ///
    /// # Errors
    /// - `Archive` for corrupt zips, `NoPages` when nothing usable was found, `Io`/`Index`
    ///   for filesystem failures. The live generation is never touched.
    pub fn stage(
        &self,
        archive: &Path,
        on_phase: &mut dyn FnMut(Phase),
    ) -> Result<StagedGeneration, RefreshError> {
        on_phase(Phase::Extracting);
        fs::create_dir_all(&self.cache_dir)?;
        let staging = tempfile::Builder::new()
            .prefix("staging-")
            .tempdir_in(&self.cache_dir)?;
        let extract_dir = staging.path().join("archive");
        fs::create_dir_all(&extract_dir)?;
        let entries = extract_zip(archive, &extract_dir)?;
        tracing::debug!(entries, archive = %archive.display(), "archive extracted");

        let content_root = locate_content_root(&extract_dir)?;
        normalize_layout(&content_root)?;
        let languages = prune_non_pages(&content_root)?;
        if languages == 0 {
            return Err(RefreshError::NoPages);
        }

        on_phase(Phase::Indexing);
        let index = scan_pages_root(&content_root)?;
        save_index_file(&index, &content_root.join(INDEX_FILE_NAME))?;
        Ok(StagedGeneration {
            staging,
            content_root,
            index,
        })
    }

    /// What: Stage and commit `archive`, then delete it.
    ///
    /// Output:
    /// - Index of the new live generation.
    ///
    /// # Errors
    /// - Any staging or commit failure; the previous generation stays authoritative.
    pub fn install(
        &self,
        archive: &Path,
        mut on_phase: impl FnMut(Phase),
    ) -> Result<CommandIndex, RefreshError> {
        let staged = self.stage(archive, &mut on_phase)?;
        let index = staged.commit(&self.user_root)?;
        if let Err(e) = fs::remove_file(archive) {
            tracing::warn!(path = %archive.display(), error = %e, "failed to delete downloaded archive");
        }
        Ok(index)
    }
}

/// What: Unpack every entry of `archive` below `dest`.
///
/// Output:
/// - Number of entries written.
///
/// Details:
/// - Entries whose names escape `dest` (absolute paths, `..`) are skipped.
fn extract_zip(archive: &Path, dest: &Path) -> Result<usize, RefreshError> {
    let file = fs::File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    let mut written = 0;
    for i in 0..zip.len() {
        let mut entry = zip.by_index(i)?;
        let Some(rel) = entry.enclosed_name() else {
            tracing::warn!(name = entry.name(), "skipping unsafe archive entry");
            continue;
        };
        let out_path = dest.join(rel);
        if entry.is_dir() {
            fs::create_dir_all(&out_path)?;
            continue;
        }
        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = fs::File::create(&out_path)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }
    Ok(written)
}

/// Whether `name` is a pages directory name, bare or qualified.
fn is_pages_name(name: &str) -> bool {
    name == BARE_PAGES_DIR || language_of_pages_dir(name).is_some()
}

/// What: Find the directory holding the `pages*` directories.
///
/// Details:
/// - GitHub archives wrap everything in one top-level folder (`tldr-main/`); archives
///   with `pages*` at the top level are used as-is.
fn locate_content_root(extract_dir: &Path) -> Result<PathBuf, RefreshError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(extract_dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        if entry.file_name().to_str().is_some_and(is_pages_name) {
            return Ok(extract_dir.to_path_buf());
        }
        dirs.push(entry.path());
    }
    match dirs.as_slice() {
        [single] => Ok(single.clone()),
        _ => Ok(extract_dir.to_path_buf()),
    }
}

/// What: Rename the bare `pages` directory to `pages.en`.
///
/// Details:
/// - Any pre-existing `pages.en` entry is removed first so the rename cannot collide.
fn normalize_layout(content_root: &Path) -> Result<(), RefreshError> {
    let bare = content_root.join(BARE_PAGES_DIR);
    if !bare.is_dir() {
        return Ok(());
    }
    let qualified = content_root.join(format!("{PAGES_DIR_PREFIX}{BARE_PAGES_LANGUAGE}"));
    if qualified.is_dir() {
        fs::remove_dir_all(&qualified)?;
    } else if qualified.exists() {
        fs::remove_file(&qualified)?;
    }
    fs::rename(&bare, &qualified)?;
    Ok(())
}

/// What: Delete everything that is not a `pages.<lang>` directory.
///
/// Output:
/// - Number of language directories kept.
fn prune_non_pages(content_root: &Path) -> Result<usize, RefreshError> {
    let mut kept = 0;
    for entry in fs::read_dir(content_root)? {
        let entry = entry?;
        let is_dir = entry.file_type()?.is_dir();
        let keep = is_dir
            && entry
                .file_name()
                .to_str()
                .and_then(language_of_pages_dir)
                .is_some();
        if keep {
            kept += 1;
        } else if is_dir {
            fs::remove_dir_all(entry.path())?;
        } else {
            fs::remove_file(entry.path())?;
        }
    }
    Ok(kept)
}
