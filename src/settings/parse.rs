//! Line-oriented parsing of `brief.conf`.

use std::path::PathBuf;

use super::{ArgStyle, Settings};

/// Skeleton written on first start so users have something to edit.
pub const SKELETON_CONFIG_CONTENT: &str = "\
# brief settings
#
# Languages shown in search results (comma or space separated codes, e.g. en, de, pt_BR)
languages = en
# Platforms shown in search results (common, linux, osx, windows, android, ...)
platforms = common, linux
# Argument style used in examples: long (--all) or short (-a)
format = long
# Remote archive used by `brief refresh`
# archive_url = https://github.com/tldr-pages/tldr/archive/refs/heads/main.zip
# Bundled read-only page tree
# system_data_dir = /usr/share/brief/tldr
";

/// What: Drop a trailing `#` or `//` comment from a value.
///
/// Inputs:
/// - `s`: Raw value text after the `=`.
///
/// Output:
/// - Trimmed value without the comment part.
///
/// Details:
/// - A marker only starts a comment after whitespace, so `https://...`, URL fragments
///   and leading `#` values survive.
pub(super) fn strip_inline_comment(s: &str) -> &str {
    let mut prev_ws = false;
    for (i, c) in s.char_indices() {
        if prev_ws && (c == '#' || s[i..].starts_with("//")) {
            return s[..i].trim();
        }
        prev_ws = c.is_whitespace();
    }
    s.trim()
}

/// Split a list value on commas and whitespace, dropping empties and duplicates.
fn parse_code_list(val: &str) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for code in val
        .split(|c: char| c == ',' || c.is_whitespace())
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        if !out.iter().any(|c| c == code) {
            out.push(code.to_string());
        }
    }
    out
}

/// What: Parse settings file content on top of the defaults.
///
/// Inputs:
/// - `content`: Full text of `brief.conf`.
///
/// Output:
/// - `Settings` with every recognised key applied.
///
/// Details:
/// - Keys are normalised (lowercase, `.`/`-`/space become `_`).
/// - Unknown keys, malformed lines and empty lists are ignored so defaults survive.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut out = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, val_raw)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(val_raw.trim());
        match key.as_str() {
            "languages" | "language" | "langs" => {
                let codes = parse_code_list(val);
                if !codes.is_empty() {
                    out.preferences.languages = codes;
                }
            }
            "platforms" | "platform" => {
                let codes = parse_code_list(val);
                if !codes.is_empty() {
                    out.preferences.platforms = codes;
                }
            }
            "format" | "argument_style" | "arg_style" => {
                if let Some(style) = ArgStyle::from_config_key(val) {
                    out.preferences.format = style;
                } else {
                    tracing::warn!(value = val, "ignoring unknown argument style");
                }
            }
            "archive_url" | "pages_url" => {
                if !val.is_empty() {
                    out.archive_url = val.to_string();
                }
            }
            "system_data_dir" | "system_pages_dir" => {
                if !val.is_empty() {
                    out.system_data_dir = PathBuf::from(val);
                }
            }
            _ => {
                tracing::debug!(key = %key, "ignoring unknown settings key");
            }
        }
    }
    out
}
