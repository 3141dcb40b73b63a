//! Derived views over the loaded catalog: filtering, sorting and genre
//! statistics. Everything here is a pure function of its inputs and is
//! recomputed on every input change; the catalog is small enough that no
//! indexing or caching is needed.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::favorites::FavoritesLedger;
use crate::models::{Entry, GenreStat, Medium};

/// Bucket name for entries with no genre
pub const UNKNOWN_GENRE: &str = "Unknown";

/// User-controlled filter parameters
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub medium: Medium,
    pub search_director: String,
    pub search_title: String,
    pub show_only_favorites: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            medium: Medium::Movie,
            search_director: String::new(),
            search_title: String::new(),
            show_only_favorites: false,
        }
    }
}

impl FilterState {
    /// Reset the medium and search strings to defaults. The favorites-only
    /// toggle is a view mode rather than a search filter and survives a
    /// reset.
    pub fn reset(&mut self) {
        *self = Self {
            show_only_favorites: self.show_only_favorites,
            ..Self::default()
        };
    }
}

/// Sortable entry fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    Title,
    Director,
    ReleaseDate,
    Rating,
}

impl SortOption {
    pub const ALL: &'static [SortOption] = &[
        SortOption::Title,
        SortOption::Director,
        SortOption::ReleaseDate,
        SortOption::Rating,
    ];

    /// Field key, used to build the derived sort-key string
    pub fn key(&self) -> &'static str {
        match self {
            SortOption::Title => "title",
            SortOption::Director => "director",
            SortOption::ReleaseDate => "release_date",
            SortOption::Rating => "imdb_rating",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOption::Title => "Title",
            SortOption::Director => "Director",
            SortOption::ReleaseDate => "Release date",
            SortOption::Rating => "IMDb rating",
        }
    }
}

/// User-controlled sort parameters. No selection means the original
/// catalog order is kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SortState {
    pub selected: Option<SortOption>,
    pub ascending: bool,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            selected: None,
            ascending: true,
        }
    }
}

impl SortState {
    /// Sort-key string derived from the current selection: empty when
    /// unsorted, `-`-prefixed when descending. Recomputed on every call,
    /// never cached.
    pub fn sort_key(&self) -> String {
        match self.selected {
            None => String::new(),
            Some(option) if self.ascending => option.key().to_string(),
            Some(option) => format!("-{}", option.key()),
        }
    }

    pub fn select(&mut self, option: SortOption) {
        self.selected = Some(option);
    }

    pub fn toggle_order(&mut self) {
        self.ascending = !self.ascending;
    }

    pub fn order_icon(&self) -> &'static str {
        if self.ascending {
            "⬆"
        } else {
            "⬇"
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Case-insensitive prefix check; same Unicode lowercasing as the sort
/// comparator. A whitespace-only needle matches everything.
fn starts_with_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.trim().is_empty() {
        return true;
    }
    haystack.to_lowercase().starts_with(&needle.to_lowercase())
}

/// Medium predicate: exact match against the selected medium
pub fn medium_matches(entry: &Entry, filters: &FilterState) -> bool {
    entry.medium == filters.medium
}

/// Director predicate: prefix match, missing director treated as empty
pub fn director_matches(entry: &Entry, filters: &FilterState) -> bool {
    starts_with_ignore_case(entry.director.as_deref().unwrap_or(""), &filters.search_director)
}

/// Title predicate: prefix match
pub fn title_matches(entry: &Entry, filters: &FilterState) -> bool {
    starts_with_ignore_case(&entry.title, &filters.search_title)
}

/// Favorites predicate: passes everything unless the favorites-only
/// toggle is set, in which case membership is delegated to the ledger
pub fn favorites_match(entry: &Entry, filters: &FilterState, favorites: &FavoritesLedger) -> bool {
    if !filters.show_only_favorites {
        return true;
    }
    favorites.is_favorite(entry)
}

/// Conjunction of the four filter predicates
pub fn matches_filters(entry: &Entry, filters: &FilterState, favorites: &FavoritesLedger) -> bool {
    medium_matches(entry, filters)
        && director_matches(entry, filters)
        && title_matches(entry, filters)
        && favorites_match(entry, filters, favorites)
}

fn cmp_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Dates come from the backend as "YYYY-MM-DD"; anything that does not
/// parse falls back to a plain string compare.
fn cmp_release_dates(a: &str, b: &str) -> Ordering {
    let fmt = "%Y-%m-%d";
    match (
        NaiveDate::parse_from_str(a, fmt),
        NaiveDate::parse_from_str(b, fmt),
    ) {
        (Ok(da), Ok(db)) => da.cmp(&db),
        _ => a.cmp(b),
    }
}

/// Ratings are strings on the wire; compare numerically so "10.0" orders
/// above "9.2". Missing or unparseable ratings sort as 0.
fn cmp_ratings(a: Option<&str>, b: Option<&str>) -> Ordering {
    let value = |r: Option<&str>| {
        r.and_then(|v| v.trim().parse::<f64>().ok())
            .unwrap_or(0.0)
    };
    value(a).total_cmp(&value(b))
}

/// Ascending comparator for the given sort option
fn compare_by(option: SortOption, a: &Entry, b: &Entry) -> Ordering {
    match option {
        SortOption::Title => cmp_text(&a.title, &b.title),
        SortOption::Director => cmp_text(
            a.director.as_deref().unwrap_or(""),
            b.director.as_deref().unwrap_or(""),
        ),
        SortOption::ReleaseDate => cmp_release_dates(&a.release_date, &b.release_date),
        SortOption::Rating => cmp_ratings(a.imdb_rating.as_deref(), b.imdb_rating.as_deref()),
    }
}

/// Filter then sort the catalog into the sequence the UI renders.
///
/// Pure function of its four inputs. The sort is stable and descending
/// order inverts the comparator rather than reversing the result, so
/// entries with equal keys keep their original relative order either way.
pub fn compose_view(
    entries: &[Entry],
    filters: &FilterState,
    sort: &SortState,
    favorites: &FavoritesLedger,
) -> Vec<Entry> {
    let mut view: Vec<Entry> = entries
        .iter()
        .filter(|entry| matches_filters(entry, filters, favorites))
        .cloned()
        .collect();

    if let Some(option) = sort.selected {
        if sort.ascending {
            view.sort_by(|a, b| compare_by(option, a, b));
        } else {
            view.sort_by(|a, b| compare_by(option, a, b).reverse());
        }
    }

    view
}

/// Count/percentage breakdown by genre over the loaded catalog, descending
/// by count. Counts accumulate in first-appearance order and the sort is
/// stable, so ties keep that order. Empty input yields an empty list.
pub fn genre_stats(entries: &[Entry]) -> Vec<GenreStat> {
    if entries.is_empty() {
        return Vec::new();
    }

    let mut counts: Vec<(String, usize)> = Vec::new();
    for entry in entries {
        // Empty string counts as missing, same as the backend convention
        let genre = entry
            .genre
            .as_deref()
            .filter(|g| !g.is_empty())
            .unwrap_or(UNKNOWN_GENRE);
        match counts.iter_mut().find(|(name, _)| name == genre) {
            Some((_, count)) => *count += 1,
            None => counts.push((genre.to_string(), 1)),
        }
    }

    let total = entries.len();
    let mut stats: Vec<GenreStat> = counts
        .into_iter()
        .map(|(name, count)| GenreStat {
            name,
            count,
            percent: ((count as f64 / total as f64) * 100.0).round() as u32,
        })
        .collect();

    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Number of entries with the given medium
pub fn count_by_medium(entries: &[Entry], medium: Medium) -> usize {
    entries.iter().filter(|e| e.medium == medium).count()
}
