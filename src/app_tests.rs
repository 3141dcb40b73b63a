//! Tests for app-level state handling

#[cfg(test)]
mod tests {
    use crate::catalog::{FilterState, SortOption, SortState};
    use crate::config::AppConfig;
    use crate::favorites::FavoritesLedger;
    use crate::models::{Medium, Tab};
    use crate::{SmdbApp, TaskResult};
    use std::sync::mpsc::channel;

    fn scratch_app(name: &str) -> SmdbApp {
        let path = std::env::temp_dir().join(format!(
            "smdb_app_tests_{}_{}.json",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);
        let (task_sender, task_receiver) = channel();

        SmdbApp {
            config: AppConfig::default(),
            current_tab: Tab::Browse,
            entries: Vec::new(),
            top_actors: Vec::new(),
            genre_stats: Vec::new(),
            movie_count: 0,
            series_count: 0,
            filters: FilterState::default(),
            sort: SortState::default(),
            favorites: FavoritesLedger::open_at(path),
            selected_entry: None,
            backend_url_input: String::new(),
            status_message: String::new(),
            loading: false,
            console_log: Vec::new(),
            task_receiver,
            task_sender,
        }
    }

    #[test]
    fn test_reset_filters_keeps_favorites_toggle() {
        let mut app = scratch_app("reset_filters");
        app.filters.medium = Medium::Series;
        app.filters.search_title = "god".to_string();
        app.filters.search_director = "copp".to_string();
        app.filters.show_only_favorites = true;
        app.sort.select(SortOption::Rating);
        app.sort.toggle_order();

        app.reset_filters();

        assert_eq!(app.filters.medium, Medium::Movie);
        assert!(app.filters.search_title.is_empty());
        assert!(app.filters.search_director.is_empty());
        assert!(app.filters.show_only_favorites);
        assert_eq!(app.sort, SortState::default());
    }

    #[test]
    fn test_top_actors_error_keeps_catalog_loading() {
        let mut app = scratch_app("actors_error");
        app.loading = true;

        // A fast top-actors failure must not re-enable reloads while the
        // catalog fetch is still in flight
        app.task_sender
            .send(TaskResult::TopActorsError("HTTP error: 500".to_string()))
            .unwrap();
        app.process_tasks();
        assert!(app.loading);
        assert!(app.status_message.contains("Top actors"));

        // A catalog failure ends the load cycle
        app.task_sender
            .send(TaskResult::Error("Catalog: Request failed".to_string()))
            .unwrap();
        app.process_tasks();
        assert!(!app.loading);
    }

    #[test]
    fn test_catalog_error_leaves_store_unchanged() {
        let mut app = scratch_app("store_unchanged");
        let entries = vec![crate::models::Entry {
            title: "Kept".to_string(),
            medium: Medium::Movie,
            director: None,
            release_date: "2020-01-01".to_string(),
            genre: Some("Drama".to_string()),
            imdb_rating: None,
            img: None,
            category: None,
            descr: None,
            actor: None,
            stream_link: None,
            trailer_link: None,
        }];

        app.task_sender
            .send(TaskResult::EntriesLoaded(entries))
            .unwrap();
        app.process_tasks();
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.movie_count, 1);

        app.loading = true;
        app.task_sender
            .send(TaskResult::Error("Catalog: Request failed".to_string()))
            .unwrap();
        app.process_tasks();
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.genre_stats.len(), 1);
        assert!(!app.loading);
    }
}
