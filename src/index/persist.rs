use std::fs;
use std::path::Path;

use super::{CommandIndex, IndexError};

/// File name of the index document at the root of every generation.
pub const INDEX_FILE_NAME: &str = "commands.json";

/// What: Load an index document.
///
/// Inputs:
/// - `path`: Location of a `commands.json` file.
///
/// Output:
/// - `Ok(CommandIndex)` when the file parses as the three-level mapping.
///
/// # Errors
/// - `IndexError::Io` when the file cannot be read.
/// - `IndexError::Json` when it is not a valid mapping.
pub fn load_index_file(path: &Path) -> Result<CommandIndex, IndexError> {
    let raw = fs::read_to_string(path)?;
    let mut index: CommandIndex = serde_json::from_str(&raw)?;
    index.finalize();
    Ok(index)
}

/// What: Persist `index` as pretty-printed JSON.
///
/// Inputs:
/// - `index`: Index to write.
/// - `path`: Destination file; its parent must exist.
///
/// # Errors
/// - `IndexError::Json` if serialization fails, `IndexError::Io` if the write fails.
///
/// Details:
/// - Output ends with a newline and is byte-stable for equal indexes.
pub fn save_index_file(index: &CommandIndex, path: &Path) -> Result<(), IndexError> {
    if index.is_empty() {
        tracing::warn!(path = %path.display(), "writing an empty command index");
    }
    let mut body = serde_json::to_string_pretty(index)?;
    body.push('\n');
    fs::write(path, body)?;
    tracing::debug!(
        path = %path.display(),
        commands = index.command_count(),
        "saved command index"
    );
    Ok(())
}
