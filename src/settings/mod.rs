//! User settings: enabled languages/platforms, argument style and refresh source.
//!
//! Settings are read once from `brief.conf`; live preference changes flow through
//! [`PreferenceStore`] so interested components can subscribe instead of polling.

use std::fs;
use std::path::{Path, PathBuf};

use tokio::sync::watch;

mod parse;

pub use parse::{SKELETON_CONFIG_CONTENT, parse_settings};

/// Upstream archive containing every tldr page.
pub const DEFAULT_ARCHIVE_URL: &str = "https://github.com/tldr-pages/tldr/archive/refs/heads/main.zip";

/// What: How option placeholders like `{{[-a|--all]}}` are shown in examples.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArgStyle {
    /// Long form, e.g. `--all`.
    #[default]
    Long,
    /// Short form, e.g. `-a`.
    Short,
}

impl ArgStyle {
    /// Parse the `format` settings value (`long` or `short`, case-insensitive).
    #[must_use]
    pub fn from_config_key(val: &str) -> Option<Self> {
        match val.trim().to_ascii_lowercase().as_str() {
            "long" => Some(Self::Long),
            "short" => Some(Self::Short),
            _ => None,
        }
    }

    /// Settings key for this style.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Long => "long",
            Self::Short => "short",
        }
    }
}

/// What: Read-only snapshot of the preferences the core filters with.
///
/// Details:
/// - Order of `languages`/`platforms` is irrelevant; they are treated as sets.
/// - Passed explicitly to index queries; never read from global state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preferences {
    /// Enabled language codes (`en`, `de`, `pt_BR`, ...).
    pub languages: Vec<String>,
    /// Enabled platform codes (`common`, `linux`, ...).
    pub platforms: Vec<String>,
    /// Argument style applied to page examples.
    pub format: ArgStyle,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            languages: vec!["en".to_string()],
            platforms: vec!["common".to_string(), host_platform().to_string()],
            format: ArgStyle::Long,
        }
    }
}

impl Preferences {
    /// Whether `code` is among the enabled languages.
    #[must_use]
    pub fn language_enabled(&self, code: &str) -> bool {
        self.languages.iter().any(|l| l == code)
    }

    /// Whether `code` is among the enabled platforms.
    #[must_use]
    pub fn platform_enabled(&self, code: &str) -> bool {
        self.platforms.iter().any(|p| p == code)
    }
}

/// tldr platform directory matching the running OS.
#[must_use]
pub const fn host_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "osx"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "android") {
        "android"
    } else if cfg!(target_os = "freebsd") {
        "freebsd"
    } else if cfg!(target_os = "openbsd") {
        "openbsd"
    } else if cfg!(target_os = "netbsd") {
        "netbsd"
    } else {
        "linux"
    }
}

/// Full settings loaded from `brief.conf`.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Filtering and formatting preferences.
    pub preferences: Preferences,
    /// URL of the zip archive fetched by a refresh.
    pub archive_url: String,
    /// Root of the bundled, read-only page generation.
    pub system_data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            system_data_dir: crate::paths::default_system_data_dir(),
        }
    }
}

/// Path of the settings file inside the config directory.
#[must_use]
pub fn settings_path() -> PathBuf {
    crate::paths::config_dir().join("brief.conf")
}

/// What: Load settings from `path`, writing the skeleton first when the file is missing.
///
/// Inputs:
/// - `path`: Location of `brief.conf`.
///
/// Output:
/// - Parsed `Settings`; `Settings::default()` when the file cannot be read.
///
/// Details:
/// - Never fails: a broken settings file must not stop the browser from starting.
pub fn load_settings_from(path: &Path) -> Settings {
    if !path.is_file() {
        if let Some(dir) = path.parent() {
            let _ = fs::create_dir_all(dir);
        }
        match fs::write(path, SKELETON_CONFIG_CONTENT) {
            Ok(()) => tracing::info!(path = %path.display(), "wrote settings skeleton"),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to write settings skeleton");
            }
        }
    }
    match fs::read_to_string(path) {
        Ok(content) => parse_settings(&content),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read settings; using defaults");
            Settings::default()
        }
    }
}

/// Load settings from the default location.
pub fn load_settings() -> Settings {
    load_settings_from(&settings_path())
}

/// What: Owner of the live preference state with change notification.
///
/// Details:
/// - Backed by a `tokio::sync::watch` channel; receivers see only the latest snapshot.
/// - Mutators notify subscribers only when the value really changed.
#[derive(Debug)]
pub struct PreferenceStore {
    /// Sending half; holds the current value.
    tx: watch::Sender<Preferences>,
}

impl PreferenceStore {
    /// Create a store seeded with `initial`.
    #[must_use]
    pub fn new(initial: Preferences) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    /// Current snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Preferences {
        self.tx.borrow().clone()
    }

    /// Subscribe to future changes; the returned receiver starts "seen" at the current value.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    /// Replace the whole snapshot. Returns whether anything changed.
    pub fn replace(&self, prefs: Preferences) -> bool {
        self.tx.send_if_modified(|cur| {
            if *cur == prefs {
                false
            } else {
                *cur = prefs;
                true
            }
        })
    }

    /// Enable or disable a language code. Returns whether anything changed.
    pub fn toggle_language(&self, code: &str, enabled: bool) -> bool {
        self.tx
            .send_if_modified(|cur| toggle_code(&mut cur.languages, code, enabled))
    }

    /// Enable or disable a platform code. Returns whether anything changed.
    pub fn toggle_platform(&self, code: &str, enabled: bool) -> bool {
        self.tx
            .send_if_modified(|cur| toggle_code(&mut cur.platforms, code, enabled))
    }

    /// Switch the argument style. Returns whether anything changed.
    pub fn set_format(&self, format: ArgStyle) -> bool {
        self.tx.send_if_modified(|cur| {
            if cur.format == format {
                false
            } else {
                cur.format = format;
                true
            }
        })
    }
}

/// Insert or remove `code` in `list`, reporting whether the list changed.
fn toggle_code(list: &mut Vec<String>, code: &str, enabled: bool) -> bool {
    let present = list.iter().any(|c| c == code);
    match (present, enabled) {
        (false, true) => {
            list.push(code.to_string());
            true
        }
        (true, false) => {
            list.retain(|c| c != code);
            true
        }
        _ => false,
    }
}
