//! Favorites ledger with JSON persistence.
//!
//! The in-memory record list is authoritative for the session; the file on
//! disk is best-effort. A failed read leaves the ledger empty, a failed
//! write is logged and ignored, and every mutation rewrites the whole file.

use std::fs;
use std::path::PathBuf;

use crate::models::{Entry, EntryId, FavoriteRecord};

fn default_store_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("smdb_browser");
    fs::create_dir_all(&path).ok();
    path.push("favorites.json");
    path
}

pub struct FavoritesLedger {
    records: Vec<FavoriteRecord>,
    store_path: PathBuf,
}

impl FavoritesLedger {
    /// Open the ledger at its default location under the user config dir
    pub fn open() -> Self {
        Self::open_at(default_store_path())
    }

    /// Open the ledger backed by the given file. Missing or corrupt data
    /// leaves the ledger empty rather than failing.
    pub fn open_at(store_path: PathBuf) -> Self {
        let mut records = Vec::new();
        if store_path.exists() {
            if let Ok(content) = fs::read_to_string(&store_path) {
                if let Ok(saved) = serde_json::from_str(&content) {
                    records = saved;
                }
            }
        }
        Self { records, store_path }
    }

    /// Add the entry if absent, remove it if present; persists after every
    /// change. Returns true if the entry is a favorite afterwards.
    pub fn toggle(&mut self, entry: &Entry) -> bool {
        let id = entry.id();
        let added = match self.records.iter().position(|r| r.id() == id) {
            Some(pos) => {
                self.records.remove(pos);
                false
            }
            None => {
                self.records.push(FavoriteRecord::from_entry(entry));
                true
            }
        };
        self.save();
        added
    }

    /// Membership check by derived identity; same derivation as `toggle`
    pub fn is_favorite(&self, entry: &Entry) -> bool {
        let id = entry.id();
        self.records.iter().any(|r| r.id() == id)
    }

    /// Remove by identity, e.g. from the favorites tab where only the
    /// stored record is at hand. Returns true if a record was removed.
    pub fn remove(&mut self, id: &EntryId) -> bool {
        let before = self.records.len();
        self.records.retain(|r| r.id() != *id);
        let removed = self.records.len() != before;
        if removed {
            self.save();
        }
        removed
    }

    pub fn count(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[FavoriteRecord] {
        &self.records
    }

    fn save(&self) {
        match serde_json::to_string_pretty(&self.records) {
            Ok(content) => {
                if let Err(e) = fs::write(&self.store_path, content) {
                    eprintln!(
                        "favorites: could not write {}: {}",
                        self.store_path.display(),
                        e
                    );
                }
            }
            Err(e) => eprintln!("favorites: could not serialize: {}", e),
        }
    }
}
