//! Human-friendly names for language and platform codes.

/// Native names for the languages tldr-pages is translated into.
const AUTONYMS: &[(&str, &str)] = &[
    ("ar", "العربية"),
    ("bn", "বাংলা"),
    ("bs", "bosanski"),
    ("ca", "català"),
    ("cs", "čeština"),
    ("da", "dansk"),
    ("de", "Deutsch"),
    ("el", "Ελληνικά"),
    ("en", "English"),
    ("es", "español"),
    ("fa", "فارسی"),
    ("fi", "suomi"),
    ("fr", "français"),
    ("hi", "हिन्दी"),
    ("hu", "magyar"),
    ("id", "Indonesia"),
    ("it", "italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("lo", "ລາວ"),
    ("ml", "മലയാളം"),
    ("ne", "नेपाली"),
    ("nl", "Nederlands"),
    ("no", "norsk"),
    ("pl", "polski"),
    ("pt_BR", "português (Brasil)"),
    ("pt_PT", "português (Portugal)"),
    ("ro", "română"),
    ("ru", "русский"),
    ("sh", "srpskohrvatski"),
    ("sr", "српски"),
    ("sv", "svenska"),
    ("ta", "தமிழ்"),
    ("th", "ไทย"),
    ("tr", "Türkçe"),
    ("uk", "українська"),
    ("uz", "o‘zbek"),
    ("zh", "中文"),
    ("zh_TW", "中文 (台灣)"),
];

/// Display names for platform directories that do not title-case well.
const PLATFORM_NAMES: &[(&str, &str)] = &[
    ("osx", "macOS"),
    ("sunos", "SunOS"),
    ("cisco-ios", "Cisco iOS"),
    ("dos", "DOS"),
    ("freebsd", "FreeBSD"),
    ("netbsd", "NetBSD"),
    ("openbsd", "OpenBSD"),
    ("android", "Android"),
    ("windows", "Windows"),
    ("linux", "Linux"),
    ("common", "Common"),
];

/// What: Upper-case the first letter of every word.
///
/// Details:
/// - A word starts after whitespace, `(`, `-` or at the beginning of the string.
/// - Letters without case (CJK, Devanagari, ...) pass through unchanged.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for ch in s.chars() {
        if at_word_start && ch.is_alphabetic() {
            out.extend(ch.to_uppercase());
            at_word_start = false;
        } else {
            out.push(ch);
            at_word_start = ch.is_whitespace() || ch == '(' || ch == '-';
        }
    }
    out
}

/// What: Localized, title-cased name of a language code.
///
/// Output:
/// - The autonym (e.g. `de` → `Deutsch`, `es` → `Español`); unknown codes fall back to the
///   code itself.
#[must_use]
pub fn language_display_name(code: &str) -> String {
    AUTONYMS
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| code.to_string(), |(_, name)| title_case(name))
}

/// What: Display name for a platform directory.
///
/// Output:
/// - Fixed name for known platforms; otherwise hyphens become spaces and each word is
///   title-cased (`some-os` → `Some Os`).
#[must_use]
pub fn platform_display_name(code: &str) -> String {
    PLATFORM_NAMES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or_else(|| title_case(&code.replace('-', " ")), |(_, name)| (*name).to_string())
}
