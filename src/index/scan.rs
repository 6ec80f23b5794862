use std::fs;
use std::path::Path;

use super::CommandIndex;

/// Prefix of per-language page directories (`pages.en`, `pages.de`, ...).
pub const PAGES_DIR_PREFIX: &str = "pages.";
/// Extension of page files.
pub const PAGE_EXT: &str = "md";

/// What: Extract the language code from a `pages.<code>` directory name.
///
/// Output:
/// - `Some(code)` for a non-empty code, `None` for any other name (including bare `pages`).
#[must_use]
pub fn language_of_pages_dir(name: &str) -> Option<&str> {
    name.strip_prefix(PAGES_DIR_PREFIX)
        .filter(|code| !code.is_empty())
}

/// What: Build a command index by walking a generation root.
///
/// Inputs:
/// - `root`: Directory containing `pages.<lang>/<platform>/<command>.md`.
///
/// Output:
/// - `Ok(CommandIndex)` with sorted, unique names; `Err` if `root` or a language
///   directory cannot be listed.
///
/// Details:
/// - Non-directory entries, unrecognised directories and files with other extensions
///   are skipped.
/// - Command names are file stems with the extension stripped.
pub fn scan_pages_root(root: &Path) -> std::io::Result<CommandIndex> {
    let mut index = CommandIndex::default();
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let dir_name = entry.file_name();
        let Some(lang) = dir_name.to_str().and_then(language_of_pages_dir) else {
            continue;
        };
        for platform_entry in fs::read_dir(entry.path())? {
            let platform_entry = platform_entry?;
            if !platform_entry.file_type()?.is_dir() {
                continue;
            }
            let platform_name = platform_entry.file_name();
            let Some(platform) = platform_name.to_str() else {
                continue;
            };
            for page in fs::read_dir(platform_entry.path())? {
                let path = page?.path();
                if path.extension().and_then(|e| e.to_str()) != Some(PAGE_EXT) || !path.is_file()
                {
                    continue;
                }
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    index.insert(lang, platform, stem.to_string());
                }
            }
        }
    }
    index.finalize();
    tracing::debug!(
        root = %root.display(),
        languages = index.map.len(),
        commands = index.command_count(),
        "scanned pages tree"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str) {
        let p = root.join(rel);
        fs::create_dir_all(p.parent().expect("parent")).expect("mkdir");
        fs::write(p, "# page\n").expect("write");
    }

    #[test]
    /// What: Scan collects stems per language/platform and ignores noise.
    ///
    /// Inputs:
    /// - Two languages, a stray file, a non-pages dir and a non-markdown file.
    ///
    /// Output:
    /// - Only `.md` stems under `pages.*` directories are indexed.
    fn scan_collects_markdown_stems() {
        let dir = tempfile::tempdir().expect("tempdir");
        let root = dir.path();
        write(root, "pages.en/linux/ls.md");
        write(root, "pages.en/common/git.md");
        write(root, "pages.en/common/git-lfs.md");
        write(root, "pages.en/common/notes.txt");
        write(root, "pages.de/common/git.md");
        write(root, "scripts/build.md");
        write(root, "README.md");

        let idx = scan_pages_root(root).expect("scan");
        assert_eq!(idx.map.len(), 2);
        assert_eq!(
            idx.commands("en", "common"),
            Some(&["git".to_string(), "git-lfs".to_string()][..])
        );
        assert_eq!(idx.commands("en", "linux"), Some(&["ls".to_string()][..]));
        assert_eq!(idx.commands("de", "common"), Some(&["git".to_string()][..]));
    }

    #[test]
    /// What: Directory name parsing accepts only qualified page dirs.
    fn pages_dir_names() {
        assert_eq!(language_of_pages_dir("pages.pt_BR"), Some("pt_BR"));
        assert_eq!(language_of_pages_dir("pages."), None);
        assert_eq!(language_of_pages_dir("pages"), None);
        assert_eq!(language_of_pages_dir("scripts"), None);
    }
}
