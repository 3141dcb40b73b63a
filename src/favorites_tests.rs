//! Tests for the favorites ledger and its JSON persistence

#[cfg(test)]
mod tests {
    use crate::favorites::FavoritesLedger;
    use crate::models::{Entry, Medium};
    use std::fs;
    use std::path::PathBuf;

    fn scratch_path(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "smdb_favorites_tests_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = fs::remove_file(&path);
        path
    }

    fn entry(title: &str, release_date: &str) -> Entry {
        Entry {
            title: title.to_string(),
            medium: Medium::Movie,
            director: Some("Some Director".to_string()),
            release_date: release_date.to_string(),
            genre: Some("Drama".to_string()),
            imdb_rating: Some("7.0".to_string()),
            img: None,
            category: None,
            descr: None,
            actor: None,
            stream_link: None,
            trailer_link: None,
        }
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let path = scratch_path("toggle");
        let mut ledger = FavoritesLedger::open_at(path.clone());
        let e = entry("X", "2020");

        assert!(!ledger.is_favorite(&e));
        assert_eq!(ledger.count(), 0);

        assert!(ledger.toggle(&e));
        assert!(ledger.is_favorite(&e));
        assert_eq!(ledger.count(), 1);

        assert!(!ledger.toggle(&e));
        assert!(!ledger.is_favorite(&e));
        assert_eq!(ledger.count(), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_double_toggle_restores_persisted_payload() {
        let path = scratch_path("double_toggle");
        let mut ledger = FavoritesLedger::open_at(path.clone());
        ledger.toggle(&entry("Kept", "1999-10-15"));
        let baseline = fs::read_to_string(&path).unwrap();

        let other = entry("Transient", "2011-07-22");
        ledger.toggle(&other);
        assert_ne!(fs::read_to_string(&path).unwrap(), baseline);
        ledger.toggle(&other);
        assert_eq!(fs::read_to_string(&path).unwrap(), baseline);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_ledger_persists_across_reopen() {
        let path = scratch_path("reopen");
        {
            let mut ledger = FavoritesLedger::open_at(path.clone());
            ledger.toggle(&entry("Persisted", "2003-05-15"));
        }

        let ledger = FavoritesLedger::open_at(path.clone());
        assert_eq!(ledger.count(), 1);
        assert!(ledger.is_favorite(&entry("Persisted", "2003-05-15")));
        assert_eq!(ledger.records()[0].title, "Persisted");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_missing_file_gives_empty_ledger() {
        let path = scratch_path("missing");
        let ledger = FavoritesLedger::open_at(path);
        assert_eq!(ledger.count(), 0);
    }

    #[test]
    fn test_corrupt_file_resets_to_empty() {
        let path = scratch_path("corrupt");
        fs::write(&path, "{ this is not json").unwrap();

        let ledger = FavoritesLedger::open_at(path.clone());
        assert_eq!(ledger.count(), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_identity_ignores_display_fields() {
        let path = scratch_path("identity");
        let mut ledger = FavoritesLedger::open_at(path.clone());

        let original = entry("Rerated", "2015-01-01");
        ledger.toggle(&original);

        // Same title and release date with different display fields is the
        // same entry; toggling removes instead of duplicating
        let mut rerated = entry("Rerated", "2015-01-01");
        rerated.imdb_rating = Some("9.9".to_string());
        rerated.descr = Some("New description".to_string());
        assert!(ledger.is_favorite(&rerated));
        assert!(!ledger.toggle(&rerated));
        assert_eq!(ledger.count(), 0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_snapshot_does_not_refresh() {
        let path = scratch_path("snapshot");
        let mut ledger = FavoritesLedger::open_at(path.clone());
        ledger.toggle(&entry("Frozen", "2018-03-03"));

        // The stored record keeps the fields captured at toggle time even
        // though later catalog loads may carry different values
        assert_eq!(ledger.records()[0].imdb_rating.as_deref(), Some("7.0"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_same_title_different_dates_are_distinct() {
        let path = scratch_path("distinct_dates");
        let mut ledger = FavoritesLedger::open_at(path.clone());

        ledger.toggle(&entry("Remake", "1954-04-26"));
        ledger.toggle(&entry("Remake", "2014-05-16"));
        assert_eq!(ledger.count(), 2);
        assert!(ledger.is_favorite(&entry("Remake", "1954-04-26")));
        assert!(ledger.is_favorite(&entry("Remake", "2014-05-16")));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_remove_by_id() {
        let path = scratch_path("remove");
        let mut ledger = FavoritesLedger::open_at(path.clone());
        let e = entry("Removable", "2001-01-01");
        ledger.toggle(&e);

        assert!(ledger.remove(&e.id()));
        assert_eq!(ledger.count(), 0);
        assert!(!ledger.remove(&e.id()));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_write_failure_keeps_in_memory_ledger() {
        // A directory path cannot be written as a file; toggling must still
        // update the in-memory ledger without panicking
        let mut ledger = FavoritesLedger::open_at(std::env::temp_dir());
        let e = entry("Unsaved", "2022-02-02");

        assert!(ledger.toggle(&e));
        assert!(ledger.is_favorite(&e));
        assert_eq!(ledger.count(), 1);
    }
}
