//! Command-line page display.

use brief::search::{CommandItem, SearchEngine};
use brief::settings::Settings;

/// What: Pick the item to show for `command`.
///
/// Inputs:
/// - `items`: Enabled items in display order.
/// - `command`: Exact command name.
/// - `language`/`platform`: Optional restrictions.
///
/// Output:
/// - The first matching item, preferring the order of enabled languages and platforms.
fn pick<'a>(
    items: &'a [CommandItem],
    command: &str,
    language: Option<&str>,
    platform: Option<&str>,
    prefs: &brief::settings::Preferences,
) -> Option<&'a CommandItem> {
    let rank = |list: &[String], code: &str| {
        list.iter().position(|c| c == code).unwrap_or(usize::MAX)
    };
    items
        .iter()
        .filter(|i| i.name == command)
        .filter(|i| language.is_none_or(|l| i.language == l))
        .filter(|i| platform.is_none_or(|p| i.platform == p))
        .min_by_key(|i| {
            (
                rank(&prefs.languages, &i.language),
                rank(&prefs.platforms, &i.platform),
            )
        })
}

/// What: Print the page for `command`.
///
/// Output:
/// - `true` when a page was printed; `false` with a not-found message otherwise.
///
/// Details:
/// - Explicit `--language`/`--platform` bypass the preference filter and read the page
///   directly from the active generation.
#[must_use]
pub fn handle_show(
    settings: &Settings,
    command: &str,
    language: Option<&str>,
    platform: Option<&str>,
) -> bool {
    let catalog = super::utils::open_catalog(settings, SearchEngine::default());
    if let Some(item) = pick(
        catalog.items(),
        command,
        language,
        platform,
        catalog.preferences(),
    ) {
        tracing::info!(
            command,
            language = %item.language,
            platform = %item.platform,
            "showing page"
        );
        print!("{}", catalog.page(item));
        return true;
    }
    if let (Some(language), Some(platform)) = (language, platform) {
        let item = CommandItem {
            name: command.to_string(),
            platform: platform.to_string(),
            language: language.to_string(),
        };
        let found = catalog.store().page_path(language, platform, command).is_file();
        let text = catalog.page(&item);
        if found {
            print!("{text}");
        } else {
            eprintln!("{text}");
        }
        return found;
    }
    tracing::warn!(command, "no enabled page found");
    eprintln!("Command '{command}' not found for the enabled languages and platforms.");
    false
}
