//! Resolution of `{{ }}` placeholders in page examples.

use crate::settings::ArgStyle;

/// What: Resolve one placeholder body (text between `{{` and `}}`).
///
/// Details:
/// - `[-a|--all]` picks the short or long alternative.
/// - Anything else is kept with `[`/`]` removed.
fn resolve_placeholder(body: &str, style: ArgStyle) -> String {
    if let Some(inner) = body.strip_prefix('[').and_then(|b| b.strip_suffix(']'))
        && let Some((short, long)) = inner.split_once('|')
    {
        return match style {
            ArgStyle::Short => short.to_string(),
            ArgStyle::Long => long.to_string(),
        };
    }
    body.replace(['[', ']'], "")
}

/// What: Apply the argument style to a single example line.
///
/// Output:
/// - The line with every `{{...}}` placeholder resolved; an unterminated `{{` is kept
///   verbatim.
#[must_use]
pub fn format_example(line: &str, style: ArgStyle) -> String {
    let mut out = String::with_capacity(line.len());
    let mut rest = line;
    while let Some(start) = rest.find("{{") {
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            break;
        };
        out.push_str(&rest[..start]);
        out.push_str(&resolve_placeholder(&after[..end], style));
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// What: Apply the argument style to a whole page.
///
/// Inputs:
/// - `page`: Raw page text.
/// - `style`: Preferred argument style.
///
/// Output:
/// - Page text where example lines (wrapped in backticks) have their placeholders
///   resolved; descriptions and headings are untouched.
#[must_use]
pub fn apply_arg_style(page: &str, style: ArgStyle) -> String {
    let mut out = String::with_capacity(page.len());
    for line in page.split_inclusive('\n') {
        let body = line.trim_end_matches(['\n', '\r']);
        let trimmed = body.trim();
        if trimmed.len() >= 2 && trimmed.starts_with('`') && trimmed.ends_with('`') {
            out.push_str(&format_example(body, style));
            out.push_str(&line[body.len()..]);
        } else {
            out.push_str(line);
        }
    }
    out
}
