//! Favorite symbols, persisted under the `favorites` preferences key.

use super::preferences::Preferences;
use super::StoreError;
use crate::domain::{normalize_symbol, Symbol};
use std::collections::BTreeSet;
use tracing::info;

pub const FAVORITES_KEY: &str = "favorites";

/// Favorites backed by a [`Preferences`] file.
///
/// Every mutation reads the set, changes it and writes it back. Intended for
/// a single writer; concurrent processes overwrite each other.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    prefs: Preferences,
}

impl FavoritesStore {
    pub fn new(prefs: Preferences) -> Self {
        Self { prefs }
    }

    pub fn preferences(&self) -> &Preferences {
        &self.prefs
    }

    /// All favorites in sorted order. Empty if nothing was stored yet.
    pub fn list(&self) -> BTreeSet<Symbol> {
        self.prefs.get_string_set(FAVORITES_KEY).unwrap_or_default()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        normalize_symbol(symbol).is_some_and(|s| self.list().contains(&s))
    }

    /// Add a symbol. Returns `false` if it was already a favorite.
    pub fn add(&self, symbol: &str) -> Result<bool, StoreError> {
        let symbol = normalize_symbol(symbol).ok_or(StoreError::EmptySymbol)?;
        let mut favorites = self.list();
        let inserted = favorites.insert(symbol.clone());
        self.prefs.put_string_set(FAVORITES_KEY, favorites)?;
        if inserted {
            info!(symbol = %symbol, "added favorite");
        }
        Ok(inserted)
    }

    /// Remove a symbol. Returns `false` if it was not a favorite.
    pub fn remove(&self, symbol: &str) -> Result<bool, StoreError> {
        let symbol = normalize_symbol(symbol).ok_or(StoreError::EmptySymbol)?;
        let mut favorites = self.list();
        if !favorites.remove(&symbol) {
            return Ok(false);
        }
        self.prefs.put_string_set(FAVORITES_KEY, favorites)?;
        info!(symbol = %symbol, "removed favorite");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir) -> FavoritesStore {
        FavoritesStore::new(Preferences::new(dir.path().join("prefs.json")))
    }

    #[test]
    fn add_then_remove() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = store(&dir);

        assert!(favorites.add("AMZN").unwrap());
        assert!(favorites.list().contains("AMZN"));

        assert!(favorites.remove("AMZN").unwrap());
        assert!(!favorites.list().contains("AMZN"));
    }

    #[test]
    fn add_is_idempotent_and_normalized() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = store(&dir);

        assert!(favorites.add(" msft").unwrap());
        assert!(!favorites.add("MSFT").unwrap());
        assert_eq!(favorites.list().len(), 1);
        assert!(favorites.contains("msft"));
    }

    #[test]
    fn remove_missing_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = store(&dir);
        favorites.add("SPY").unwrap();

        assert!(!favorites.remove("QQQ").unwrap());
        assert_eq!(favorites.list().into_iter().collect::<Vec<_>>(), vec!["SPY"]);
    }

    #[test]
    fn remove_on_fresh_install_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = store(&dir);

        assert!(!favorites.remove("AMZN").unwrap());
        assert!(!favorites.preferences().path().exists());
    }

    #[test]
    fn blank_symbol_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let favorites = store(&dir);
        assert!(matches!(favorites.add("  "), Err(StoreError::EmptySymbol)));
        assert!(matches!(favorites.remove(""), Err(StoreError::EmptySymbol)));
        assert!(!favorites.contains(""));
    }

    #[test]
    fn persists_across_handles() {
        let dir = tempfile::tempdir().unwrap();
        store(&dir).add("GOOG").unwrap();
        assert!(store(&dir).contains("GOOG"));
    }
}
