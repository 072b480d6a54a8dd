//! Add/edit form buffers
//!
//! A draft is the mutable, unsaved copy of an entity bound to the add/edit
//! form. Every numeric field is held as text while editing and parsed only
//! at submit time; foreign keys are edited as plain id text (a single id
//! for a song's or album's artist, one comma-delimited string for an
//! album's tracklist) and converted to reference objects when the draft is
//! turned into an entity. A parse failure is reported as an error, never a
//! panic, and nothing reaches the store.

use tune_common::model::{
    Album, Artist, ArtistRef, CatalogEntity, Song, SongRef,
};
use tune_common::{Error, Result};

/// Form buffer for one entity kind
pub trait EntityDraft: Default + Clone + Send + Sync + 'static {
    type Entity: CatalogEntity;

    /// `None` until the draft was populated from a persisted entity
    fn id(&self) -> Option<i64>;

    /// Copy an in-memory entity into the form for editing
    fn populate(&mut self, entity: &Self::Entity);

    /// Reset to the empty, unsaved state (cancel edit / after save)
    fn clear(&mut self) {
        *self = Self::default();
    }

    /// Labels of required fields that are still empty
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Parse the edited text into a typed entity ready for submission
    fn to_entity(&self) -> Result<Self::Entity>;
}

/// A catalog entity that has an add/edit form
pub trait Editable: CatalogEntity {
    type Draft: EntityDraft<Entity = Self>;
}

impl Editable for Artist {
    type Draft = ArtistDraft;
}

impl Editable for Song {
    type Draft = SongDraft;
}

impl Editable for Album {
    type Draft = AlbumDraft;
}

fn parse_int(label: &str, text: &str) -> Result<i64> {
    let text = text.trim();
    text.parse()
        .map_err(|_| Error::Parse(format!("{label} '{text}' is not a number")))
}

/// Split a comma-delimited id list into song references.
///
/// Segments are trimmed and empty segments skipped, so "1, 2," never
/// yields a bogus zero-id reference. A non-numeric segment is an error.
pub fn parse_song_ids(text: &str) -> Result<Vec<SongRef>> {
    let mut refs = Vec::new();
    for segment in text.split(',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        let id = segment
            .parse()
            .map_err(|_| Error::Parse(format!("song id '{segment}' is not a number")))?;
        refs.push(SongRef::new(id));
    }
    Ok(refs)
}

// ========================================
// Artist
// ========================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArtistDraft {
    pub id: Option<i64>,
    pub name: String,
    pub debut_year: String,
    pub genre: String,
    pub country: String,
}

impl EntityDraft for ArtistDraft {
    type Entity = Artist;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn populate(&mut self, entity: &Artist) {
        *self = ArtistDraft {
            id: entity.id,
            name: entity.name.clone(),
            debut_year: entity.debut_year.to_string(),
            genre: entity.genre.clone(),
            country: entity.country.clone(),
        };
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.debut_year.trim().is_empty() {
            missing.push("debut year");
        }
        if self.genre.trim().is_empty() {
            missing.push("genre");
        }
        if self.country.trim().is_empty() {
            missing.push("country");
        }
        missing
    }

    fn to_entity(&self) -> Result<Artist> {
        Ok(Artist {
            id: self.id,
            name: self.name.clone(),
            debut_year: parse_int("debut year", &self.debut_year)?,
            genre: self.genre.clone(),
            country: self.country.clone(),
        })
    }
}

// ========================================
// Song
// ========================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongDraft {
    pub id: Option<i64>,
    pub title: String,
    pub genre: String,
    pub duration: String,
    pub release_year: String,
    pub artist_id: String,
}

impl EntityDraft for SongDraft {
    type Entity = Song;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn populate(&mut self, entity: &Song) {
        *self = SongDraft {
            id: entity.id,
            title: entity.title.clone(),
            genre: entity.genre.clone(),
            duration: entity.duration.to_string(),
            release_year: entity.release_year.to_string(),
            artist_id: entity
                .artist
                .as_ref()
                .map(|a| a.id.to_string())
                .unwrap_or_default(),
        };
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.genre.trim().is_empty() {
            missing.push("genre");
        }
        if self.duration.trim().is_empty() {
            missing.push("duration");
        }
        if self.release_year.trim().is_empty() {
            missing.push("release year");
        }
        if self.artist_id.trim().is_empty() {
            missing.push("artist id");
        }
        missing
    }

    fn to_entity(&self) -> Result<Song> {
        Ok(Song {
            id: self.id,
            title: self.title.clone(),
            genre: self.genre.clone(),
            duration: parse_int("duration", &self.duration)?,
            release_year: parse_int("release year", &self.release_year)?,
            artist: Some(ArtistRef::new(parse_int("artist id", &self.artist_id)?)),
        })
    }
}

// ========================================
// Album
// ========================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlbumDraft {
    pub id: Option<i64>,
    pub title: String,
    pub genre: String,
    pub release_year: String,
    pub artist_id: String,
    /// Comma-delimited song ids, e.g. "4, 8, 15"
    pub song_ids: String,
}

impl EntityDraft for AlbumDraft {
    type Entity = Album;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn populate(&mut self, entity: &Album) {
        *self = AlbumDraft {
            id: entity.id,
            title: entity.title.clone(),
            genre: entity.genre.clone(),
            release_year: entity.release_year.to_string(),
            artist_id: entity
                .artist
                .as_ref()
                .map(|a| a.id.to_string())
                .unwrap_or_default(),
            song_ids: entity
                .list_of_songs
                .iter()
                .map(|s| s.id.to_string())
                .collect::<Vec<_>>()
                .join(","),
        };
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.genre.trim().is_empty() {
            missing.push("genre");
        }
        if self.song_ids.trim().is_empty() {
            missing.push("song ids");
        }
        if self.release_year.trim().is_empty() {
            missing.push("release year");
        }
        if self.artist_id.trim().is_empty() {
            missing.push("artist id");
        }
        missing
    }

    fn to_entity(&self) -> Result<Album> {
        Ok(Album {
            id: self.id,
            title: self.title.clone(),
            genre: self.genre.clone(),
            release_year: parse_int("release year", &self.release_year)?,
            artist: Some(ArtistRef::new(parse_int("artist id", &self.artist_id)?)),
            list_of_songs: parse_song_ids(&self.song_ids)?,
        })
    }
}
