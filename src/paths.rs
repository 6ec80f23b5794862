//! Filesystem locations for configuration, logs and the page cache.

use std::env;
use std::path::{Path, PathBuf};

/// Application directory name used under the XDG bases.
const APP_DIR: &str = "brief";
/// Environment override for the bundled, read-only page generation.
pub const SYSTEM_DATA_ENV: &str = "BRIEF_SYSTEM_DATA_DIR";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Return `$HOME/.config/brief`, ensuring it exists.
///
/// Output: `Some(PathBuf)` when HOME is set and directory can be created; `None` otherwise.
fn home_config_dir() -> Option<PathBuf> {
    if let Ok(home) = env::var("HOME") {
        let dir = Path::new(&home).join(".config").join(APP_DIR);
        if std::fs::create_dir_all(&dir).is_ok() {
            return Some(dir);
        }
    }
    None
}

/// XDG config directory for brief (ensured to exist)
pub fn config_dir() -> PathBuf {
    if let Some(dir) = home_config_dir() {
        return dir;
    }
    let base = xdg_base_dir("XDG_CONFIG_HOME", &[".config"]);
    let dir = base.join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Logs directory under config: "$HOME/.config/brief/logs" (ensured to exist)
pub fn logs_dir() -> PathBuf {
    let dir = config_dir().join("logs");
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// What: Resolve the writable cache directory holding downloads and the user generation.
///
/// Output:
/// - `$XDG_CACHE_HOME/brief`, or `$HOME/.cache/brief` when the variable is unset.
///
/// Details:
/// - The directory is created on demand; creation failures surface later as I/O errors
///   from the refresh pipeline rather than here.
pub fn cache_dir() -> PathBuf {
    let dir = xdg_base_dir("XDG_CACHE_HOME", &[".cache"]).join(APP_DIR);
    let _ = std::fs::create_dir_all(&dir);
    dir
}

/// Root of the user (refreshed) page generation inside `cache_dir`.
#[must_use]
pub fn user_generation_dir(cache_dir: &Path) -> PathBuf {
    cache_dir.join("tldr")
}

/// What: Location of the bundled page generation shipped with the application.
///
/// Output:
/// - Value of `BRIEF_SYSTEM_DATA_DIR` when set and non-empty, `/usr/share/brief/tldr` otherwise.
pub fn default_system_data_dir() -> PathBuf {
    if let Ok(p) = env::var(SYSTEM_DATA_ENV)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    PathBuf::from("/usr/share").join(APP_DIR).join("tldr")
}
