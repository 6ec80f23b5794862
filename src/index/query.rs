use std::collections::BTreeMap;

use super::{CommandIndex, DEFAULT_LANGUAGE, language_display_name, platform_display_name};
use crate::search::CommandItem;
use crate::settings::Preferences;

/// A language available in the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LanguageEntry {
    /// Title-cased autonym, e.g. `Deutsch`.
    pub display_name: String,
    /// Directory code, e.g. `de`.
    pub code: String,
}

/// A platform available in the index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlatformEntry {
    /// Friendly name, e.g. `macOS`.
    pub display_name: String,
    /// Directory code, e.g. `osx`.
    pub code: String,
}

impl CommandIndex {
    /// What: List indexed languages for the preferences dialog.
    ///
    /// Output:
    /// - One entry per language key, sorted by display name (then code).
    #[must_use]
    pub fn languages(&self) -> Vec<LanguageEntry> {
        let mut out: Vec<LanguageEntry> = self
            .map
            .keys()
            .map(|code| LanguageEntry {
                display_name: language_display_name(code),
                code: code.clone(),
            })
            .collect();
        out.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.code.cmp(&b.code))
        });
        out
    }

    /// What: List platforms known to the default language.
    ///
    /// Output:
    /// - Platforms present under `en`, sorted by display name; empty when `en` is absent.
    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformEntry> {
        let mut out: Vec<PlatformEntry> = self
            .map
            .get(DEFAULT_LANGUAGE)
            .into_iter()
            .flat_map(BTreeMap::keys)
            .map(|code| PlatformEntry {
                display_name: platform_display_name(code),
                code: code.clone(),
            })
            .collect();
        out.sort_by(|a, b| {
            a.display_name
                .cmp(&b.display_name)
                .then_with(|| a.code.cmp(&b.code))
        });
        out
    }

    /// What: Restrict the index to enabled languages and platforms.
    ///
    /// Inputs:
    /// - `prefs`: Snapshot of the enabled sets.
    ///
    /// Output:
    /// - New index holding only pairs present both in the index and in the cross product
    ///   of the enabled sets. Missing combinations are silently omitted.
    #[must_use]
    pub fn enabled_commands(&self, prefs: &Preferences) -> Self {
        let mut out = Self::default();
        for lang in &prefs.languages {
            let Some(plats) = self.map.get(lang) else {
                continue;
            };
            for plat in &prefs.platforms {
                if let Some(cmds) = plats.get(plat) {
                    out.map
                        .entry(lang.clone())
                        .or_default()
                        .insert(plat.clone(), cmds.clone());
                }
            }
        }
        out
    }

    /// What: Flatten the index into searchable items.
    ///
    /// Output:
    /// - One `CommandItem` per entry, ordered by name, then platform, then language.
    #[must_use]
    pub fn command_items(&self) -> Vec<CommandItem> {
        let mut items: Vec<CommandItem> = self
            .map
            .iter()
            .flat_map(|(lang, plats)| {
                plats.iter().flat_map(move |(plat, cmds)| {
                    cmds.iter().map(move |cmd| CommandItem {
                        name: cmd.clone(),
                        platform: plat.clone(),
                        language: lang.clone(),
                    })
                })
            })
            .collect();
        items.sort_by(CommandItem::display_order);
        items
    }
}
