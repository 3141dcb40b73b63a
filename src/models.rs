//! Data models for the SMDB catalog browser

use serde::{Deserialize, Serialize};

/// UI Tab selection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tab {
    Browse,
    Favorites,
    Stats,
    Console,
}

/// Catalog medium as served by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medium {
    Movie,
    Series,
}

impl Medium {
    pub fn label(&self) -> &'static str {
        match self {
            Medium::Movie => "Movie",
            Medium::Series => "Series",
        }
    }
}

/// One catalog item. The backend serves a flat list of these; the list is
/// replaced wholesale on every reload and entries are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub medium: Medium,
    #[serde(default)]
    pub director: Option<String>,
    pub release_date: String,
    #[serde(default)]
    pub genre: Option<String>,
    #[serde(default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub stream_link: Option<String>,
    #[serde(default)]
    pub trailer_link: Option<String>,
}

impl Entry {
    pub fn id(&self) -> EntryId {
        EntryId {
            title: self.title.clone(),
            release_date: self.release_date.clone(),
        }
    }
}

/// Identity of an entry. The backend has no id column; title plus release
/// date is the closest thing to a natural key. Kept as a value type rather
/// than a concatenated string so titles containing a delimiter cannot
/// collide across distinct entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId {
    pub title: String,
    pub release_date: String,
}

/// Favorite entry snapshot (persisted to JSON). Fields are captured at
/// toggle time and do not refresh if the catalog entry changes later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub title: String,
    pub medium: Medium,
    #[serde(default)]
    pub director: Option<String>,
    pub release_date: String,
    #[serde(default)]
    pub imdb_rating: Option<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub descr: Option<String>,
    #[serde(default)]
    pub actor: Option<String>,
    #[serde(default)]
    pub stream_link: Option<String>,
    #[serde(default)]
    pub trailer_link: Option<String>,
}

impl FavoriteRecord {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            title: entry.title.clone(),
            medium: entry.medium,
            director: entry.director.clone(),
            release_date: entry.release_date.clone(),
            imdb_rating: entry.imdb_rating.clone(),
            img: entry.img.clone(),
            category: entry.category.clone(),
            descr: entry.descr.clone(),
            actor: entry.actor.clone(),
            stream_link: entry.stream_link.clone(),
            trailer_link: entry.trailer_link.clone(),
        }
    }

    pub fn id(&self) -> EntryId {
        EntryId {
            title: self.title.clone(),
            release_date: self.release_date.clone(),
        }
    }
}

/// Genre share over the currently loaded catalog
#[derive(Debug, Clone, PartialEq)]
pub struct GenreStat {
    pub name: String,
    pub count: usize,
    pub percent: u32,
}

/// Top-actor row from the backend, display data passed through unmodified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopActor {
    #[serde(alias = "actor")]
    pub name: String,
    #[serde(default)]
    pub appearances: i64,
}
