//! Catalog entity types and their wire shapes
//!
//! All three entity kinds are transmitted as JSON with camelCase field
//! names. Server-assigned ids are `None` exactly while an entity is an
//! unsaved draft; reference fields (`artist`, `listOfSongs`) may arrive
//! unhydrated (id only) or missing entirely, and every consumer must
//! degrade rather than panic when they do.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// One of the three catalog entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Artist,
    Album,
    Song,
}

impl EntityKind {
    /// Path of the full-list endpoint, e.g. `GET /artists`
    pub fn collection_path(&self) -> &'static str {
        match self {
            EntityKind::Artist => "/artists",
            EntityKind::Album => "/albums",
            EntityKind::Song => "/songs",
        }
    }

    /// Path prefix of the single-item endpoints, e.g. `POST /artist`,
    /// `PUT /artist/{id}`, `DELETE /artist/{id}`
    pub fn item_path(&self) -> &'static str {
        match self {
            EntityKind::Artist => "/artist",
            EntityKind::Album => "/album",
            EntityKind::Song => "/song",
        }
    }

    /// Lowercase noun for user-facing messages
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::Artist => "artist",
            EntityKind::Album => "album",
            EntityKind::Song => "song",
        }
    }
}

/// A selectable filter field for one entity kind
pub trait FieldSelector: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every selectable field, in display order
    fn all() -> &'static [Self];

    /// Display label, matching the filter dropdown of the original UI
    fn label(&self) -> &'static str;

    /// Forgiving parse of a user-typed field name ("Debut Year",
    /// "debut-year" and "debutyear" all select the same field)
    fn parse(input: &str) -> Option<Self> {
        let wanted = fold_field_name(input);
        Self::all()
            .iter()
            .copied()
            .find(|f| fold_field_name(f.label()) == wanted)
    }
}

/// Lowercase and drop separators so field names compare loosely
fn fold_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Common surface of Artist, Album, and Song
///
/// The generic list controller and filter predicate are written against
/// this trait rather than against the three concrete types.
pub trait CatalogEntity:
    Clone + fmt::Display + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Which REST endpoints serve this entity
    const KIND: EntityKind;

    /// The filterable fields of this entity kind
    type Field: FieldSelector;

    /// Server-assigned id; `None` only for unsaved drafts
    fn id(&self) -> Option<i64>;

    /// Stringified value of one filterable field, for substring matching.
    ///
    /// Reference fields yield the hydrated display name when present, the
    /// raw id otherwise, and `None` when the reference itself is absent.
    fn field_text(&self, field: Self::Field) -> Option<String>;
}

// ========================================
// References
// ========================================

/// Foreign-key reference to an artist, optionally hydrated with the name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistRef {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl ArtistRef {
    pub fn new(id: i64) -> Self {
        ArtistRef { id, name: None }
    }

    /// Hydrated name when present, otherwise the id
    pub fn display(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.id.to_string(),
        }
    }
}

/// Foreign-key reference to a song, optionally hydrated with the title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongRef {
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SongRef {
    pub fn new(id: i64) -> Self {
        SongRef { id, title: None }
    }
}

// ========================================
// Artist
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub debut_year: i64,
    pub genre: String,
    pub country: String,
}

/// Filterable artist fields; labels match the original filter dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtistField {
    Name,
    DebutYear,
    Genre,
    Country,
}

impl FieldSelector for ArtistField {
    fn all() -> &'static [Self] {
        &[
            ArtistField::Name,
            ArtistField::DebutYear,
            ArtistField::Genre,
            ArtistField::Country,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            ArtistField::Name => "Artist",
            ArtistField::DebutYear => "Debut Year",
            ArtistField::Genre => "Genre",
            ArtistField::Country => "Country",
        }
    }
}

impl CatalogEntity for Artist {
    const KIND: EntityKind = EntityKind::Artist;
    type Field = ArtistField;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn field_text(&self, field: ArtistField) -> Option<String> {
        match field {
            ArtistField::Name => Some(self.name.clone()),
            ArtistField::DebutYear => Some(self.debut_year.to_string()),
            ArtistField::Genre => Some(self.genre.clone()),
            ArtistField::Country => Some(self.country.clone()),
        }
    }
}

impl fmt::Display for Artist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} #{}", self.name, fmt_id(self.id))?;
        writeln!(f, "  Debut Year: {}", self.debut_year)?;
        writeln!(f, "  Genre: {}", self.genre)?;
        write!(f, "  Country: {}", self.country)
    }
}

// ========================================
// Song
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub genre: String,
    /// Duration in seconds
    pub duration: i64,
    pub release_year: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SongField {
    Title,
    ReleaseYear,
    Genre,
    Artist,
}

impl FieldSelector for SongField {
    fn all() -> &'static [Self] {
        &[
            SongField::Title,
            SongField::ReleaseYear,
            SongField::Genre,
            SongField::Artist,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            SongField::Title => "Title",
            SongField::ReleaseYear => "Release Year",
            SongField::Genre => "Genre",
            SongField::Artist => "Artist",
        }
    }
}

impl CatalogEntity for Song {
    const KIND: EntityKind = EntityKind::Song;
    type Field = SongField;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn field_text(&self, field: SongField) -> Option<String> {
        match field {
            SongField::Title => Some(self.title.clone()),
            SongField::ReleaseYear => Some(self.release_year.to_string()),
            SongField::Genre => Some(self.genre.clone()),
            SongField::Artist => self.artist.as_ref().map(ArtistRef::display),
        }
    }
}

impl fmt::Display for Song {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} #{}", self.title, fmt_id(self.id))?;
        writeln!(f, "  Release Year: {}", self.release_year)?;
        writeln!(f, "  Genre: {}", self.genre)?;
        writeln!(f, "  Duration: {} seconds", self.duration)?;
        match &self.artist {
            Some(a) => write!(f, "  Artist: {} #{}", a.display(), a.id),
            None => write!(f, "  Artist: Unknown"),
        }
    }
}

// ========================================
// Album
// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Album {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub title: String,
    pub genre: String,
    pub release_year: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artist: Option<ArtistRef>,
    #[serde(default)]
    pub list_of_songs: Vec<SongRef>,
}

impl Album {
    /// Song count is derived from the tracklist, never stored separately
    pub fn song_count(&self) -> usize {
        self.list_of_songs.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlbumField {
    Title,
    Artist,
    ReleaseYear,
    Genre,
}

impl FieldSelector for AlbumField {
    fn all() -> &'static [Self] {
        &[
            AlbumField::Title,
            AlbumField::Artist,
            AlbumField::ReleaseYear,
            AlbumField::Genre,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            AlbumField::Title => "Title",
            AlbumField::Artist => "Artist",
            AlbumField::ReleaseYear => "Release Year",
            AlbumField::Genre => "Genre",
        }
    }
}

impl CatalogEntity for Album {
    const KIND: EntityKind = EntityKind::Album;
    type Field = AlbumField;

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn field_text(&self, field: AlbumField) -> Option<String> {
        match field {
            AlbumField::Title => Some(self.title.clone()),
            AlbumField::Artist => self.artist.as_ref().map(ArtistRef::display),
            AlbumField::ReleaseYear => Some(self.release_year.to_string()),
            AlbumField::Genre => Some(self.genre.clone()),
        }
    }
}

impl fmt::Display for Album {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} #{}", self.title, fmt_id(self.id))?;
        match &self.artist {
            Some(a) => writeln!(f, "  Artist: {} #{}", a.display(), a.id)?,
            None => writeln!(f, "  Artist: Unknown")?,
        }
        writeln!(f, "  Release Year: {}", self.release_year)?;
        writeln!(f, "  Genre: {}", self.genre)?;
        write!(f, "  Tracklist ({} songs):", self.song_count())?;
        if self.list_of_songs.is_empty() {
            write!(f, "\n    No songs available")?;
        }
        for song in &self.list_of_songs {
            match &song.title {
                Some(title) => write!(f, "\n    {} #{}", title, song.id)?,
                None => write!(f, "\n    #{}", song.id)?,
            }
        }
        Ok(())
    }
}

fn fmt_id(id: Option<i64>) -> String {
    match id {
        Some(id) => id.to_string(),
        None => "?".to_string(),
    }
}
