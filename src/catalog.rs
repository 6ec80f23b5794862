//! Core facade the presentation layer talks to.
//!
//! Ties the page store, the current command index, the preference snapshot and the
//! search view together, and rebuilds derived state wholesale whenever an input changes.

use tokio::sync::watch;

use crate::index::{CommandIndex, LanguageEntry, PlatformEntry};
use crate::pages::{PageStore, apply_arg_style};
use crate::search::{CommandItem, ScoredItem, SearchEngine, SearchView};
use crate::settings::Preferences;

/// What: Interactive-thread state of the browser core.
#[derive(Debug)]
pub struct Catalog {
    /// Generation-aware page reader.
    store: PageStore,
    /// Full index of the active generation.
    index: CommandIndex,
    /// Preferences the current item set was built from.
    prefs: Preferences,
    /// Ranked view over the enabled items.
    view: SearchView,
}

impl Catalog {
    /// What: Open the catalog over `store` with an initial preference snapshot.
    ///
    /// Details:
    /// - Loads the active generation's index and builds the enabled item set.
    #[must_use]
    pub fn open(store: PageStore, prefs: Preferences, engine: SearchEngine) -> Self {
        let index = store.load_index();
        let mut catalog = Self {
            store,
            index,
            prefs,
            view: SearchView::new(engine),
        };
        catalog.rebuild_items();
        catalog
    }

    /// Recreate the flat item list from the index and preferences.
    fn rebuild_items(&mut self) {
        let items = self.index.enabled_commands(&self.prefs).command_items();
        tracing::debug!(items = items.len(), "rebuilt command items");
        self.view.set_items(items);
    }

    /// Reload the index from disk, e.g. after a successful refresh.
    pub fn reload(&mut self) {
        self.index = self.store.load_index();
        self.rebuild_items();
    }

    /// Apply a new preference snapshot; returns whether anything changed.
    pub fn apply_preferences(&mut self, prefs: Preferences) -> bool {
        if prefs == self.prefs {
            return false;
        }
        let filter_changed =
            prefs.languages != self.prefs.languages || prefs.platforms != self.prefs.platforms;
        self.prefs = prefs;
        if filter_changed {
            self.rebuild_items();
        }
        true
    }

    /// What: Pick up a pending preference change from a subscription.
    ///
    /// Output:
    /// - `true` when a new snapshot was applied; `false` if nothing changed or the store
    ///   is gone.
    pub fn sync_preferences(&mut self, rx: &mut watch::Receiver<Preferences>) -> bool {
        match rx.has_changed() {
            Ok(true) => {
                let prefs = rx.borrow_and_update().clone();
                self.apply_preferences(prefs)
            }
            _ => false,
        }
    }

    /// Full index of the active generation.
    #[must_use]
    pub const fn index(&self) -> &CommandIndex {
        &self.index
    }

    /// Current preference snapshot.
    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// Page store backing this catalog.
    #[must_use]
    pub const fn store(&self) -> &PageStore {
        &self.store
    }

    /// Languages available in the index.
    #[must_use]
    pub fn languages(&self) -> Vec<LanguageEntry> {
        self.index.languages()
    }

    /// Platforms available in the index.
    #[must_use]
    pub fn platforms(&self) -> Vec<PlatformEntry> {
        self.index.platforms()
    }

    /// Items currently enabled by the preferences.
    #[must_use]
    pub fn items(&self) -> &[CommandItem] {
        self.view.items()
    }

    /// Ranked results for `query`.
    pub fn search(&mut self, query: &str) -> &[ScoredItem] {
        self.view.set_query(query);
        self.view.results()
    }

    /// Page text for `item`, formatted with the preferred argument style.
    #[must_use]
    pub fn page(&self, item: &CommandItem) -> String {
        let raw = self
            .store
            .resolve_page(&item.language, &item.platform, &item.name);
        apply_arg_style(&raw, self.prefs.format)
    }
}
