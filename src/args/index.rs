//! Command-line index generation for a pages tree.

use std::path::Path;

use brief::index::{INDEX_FILE_NAME, save_index_file, scan_pages_root};

/// What: Scan `dir` and write `commands.json` next to its `pages.*` directories.
///
/// Output:
/// - `true` when the index file was written.
///
/// Details:
/// - Used to prepare the bundled system tree.
#[must_use]
pub fn handle_index(dir: &Path) -> bool {
    let index = match scan_pages_root(dir) {
        Ok(index) => index,
        Err(e) => {
            tracing::error!(path = %dir.display(), error = %e, "failed to scan pages tree");
            eprintln!("Failed to scan {}: {e}", dir.display());
            return false;
        }
    };
    let target = dir.join(INDEX_FILE_NAME);
    match save_index_file(&index, &target) {
        Ok(()) => {
            println!(
                "Indexed {} commands in {} languages into {}",
                index.command_count(),
                index.map.len(),
                target.display()
            );
            true
        }
        Err(e) => {
            tracing::error!(path = %target.display(), error = %e, "failed to write index");
            eprintln!("Failed to write {}: {e}", target.display());
            false
        }
    }
}
