//! Library entry for brief: page cache, command index and search for tldr-pages.
//!
//! The presentation layer (window, page rendering, dialogs) lives outside this crate and
//! drives it through [`catalog::Catalog`] and [`refresh::Refresher`].

pub mod catalog;
pub mod index;
pub mod pages;
pub mod paths;
pub mod refresh;
pub mod search;
pub mod settings;

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

/// Serialise tests that mutate process-wide environment variables.
#[cfg(test)]
pub(crate) fn global_test_mutex_lock() -> std::sync::MutexGuard<'static, ()> {
    TEST_MUTEX
        .get_or_init(|| std::sync::Mutex::new(()))
        .lock()
        .unwrap_or_else(std::sync::PoisonError::into_inner)
}
