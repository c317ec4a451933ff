//! Book records as stored in the `books` collection.
//!
//! The document body keeps the field names and enum labels the collection
//! already uses (`uid`, `coverImage`, `"sudah"`/`"belum"`, Indonesian genre
//! labels). English spellings are accepted as aliases when reading.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Lowest rating a finished book can carry.
pub const MIN_RATING: u8 = 1;

/// Highest rating a finished book can carry.
pub const MAX_RATING: u8 = 5;

/// Closed set of genres a book can belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    #[serde(rename = "Novel")]
    Novel,
    #[serde(rename = "Komik", alias = "Comic")]
    Comic,
    #[serde(rename = "Biografi", alias = "Biography")]
    Biography,
    #[serde(rename = "Edukasi", alias = "Education")]
    Education,
    #[serde(rename = "Romantis", alias = "Romance")]
    Romance,
}

impl Genre {
    /// All genres in picker order.
    pub const ALL: [Genre; 5] = [
        Genre::Novel,
        Genre::Comic,
        Genre::Biography,
        Genre::Education,
        Genre::Romance,
    ];

    /// Label stored in the document.
    pub fn stored_label(&self) -> &'static str {
        match self {
            Genre::Novel => "Novel",
            Genre::Comic => "Komik",
            Genre::Biography => "Biografi",
            Genre::Education => "Edukasi",
            Genre::Romance => "Romantis",
        }
    }

    /// Label shown to the user.
    pub fn display_name(&self) -> &'static str {
        match self {
            Genre::Novel => "Novel",
            Genre::Comic => "Comic",
            Genre::Biography => "Biography",
            Genre::Education => "Education",
            Genre::Romance => "Romance",
        }
    }

    /// Parse a picker value. An empty (or blank) value means "no genre".
    pub fn parse_optional(value: &str) -> Result<Option<Genre>, UnknownGenre> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(None);
        }
        value.parse().map(Some)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// A genre label that is not part of the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown genre '{0}'")]
pub struct UnknownGenre(pub String);

impl FromStr for Genre {
    type Err = UnknownGenre;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Genre::ALL
            .into_iter()
            .find(|g| {
                g.stored_label().eq_ignore_ascii_case(needle)
                    || g.display_name().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| UnknownGenre(needle.to_string()))
    }
}

/// Whether the owner has finished reading the book.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReadingStatus {
    #[default]
    #[serde(rename = "belum", alias = "not_done")]
    NotDone,
    #[serde(rename = "sudah", alias = "done")]
    Done,
}

impl ReadingStatus {
    pub fn is_done(&self) -> bool {
        matches!(self, ReadingStatus::Done)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ReadingStatus::NotDone => "Not finished",
            ReadingStatus::Done => "Finished",
        }
    }
}

/// Parse a rating typed by the user. Only whole numbers in 1..=5 pass.
pub fn parse_rating(input: &str) -> Result<u8, ValidationError> {
    input
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
        .ok_or(ValidationError::InvalidRating)
}

/// Rating to persist for a status: NotDone always stores 0.
pub fn rating_for_status(status: ReadingStatus, rating: u8) -> u8 {
    match status {
        ReadingStatus::NotDone => 0,
        ReadingStatus::Done => rating,
    }
}

/// A persisted book together with its document id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    /// Document id; assigned by the store and never part of the body.
    #[serde(skip)]
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Genre,
    #[serde(default)]
    pub status: ReadingStatus,
    #[serde(default)]
    pub rating: u8,
    #[serde(rename = "uid")]
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl BookRecord {
    /// Build a record from a stored document body and its id.
    pub fn from_document(id: impl Into<String>, body: serde_json::Value) -> serde_json::Result<Self> {
        let mut record: BookRecord = serde_json::from_value(body)?;
        record.id = id.into();
        Ok(record)
    }

    /// Document body without the id.
    pub fn to_document(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }

    /// Whether the status/rating pair satisfies the stored invariant.
    pub fn rating_is_consistent(&self) -> bool {
        match self.status {
            ReadingStatus::NotDone => self.rating == 0,
            ReadingStatus::Done => (MIN_RATING..=MAX_RATING).contains(&self.rating),
        }
    }

    /// Apply an update in place. Id and owner are untouched.
    pub fn apply(&mut self, update: &BookUpdate) {
        self.title = update.title.clone();
        self.author = update.author.clone();
        self.genre = update.genre;
        self.status = update.status;
        self.rating = update.rating;
    }
}

/// Body of a book about to be created; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub status: ReadingStatus,
    pub rating: u8,
    #[serde(rename = "uid")]
    pub owner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl NewBook {
    /// A freshly added book: unread, unrated, owned by `owner_id`.
    pub fn unread(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        owner_id: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre,
            status: ReadingStatus::NotDone,
            rating: 0,
            owner_id: owner_id.into(),
            cover_image: None,
        }
    }

    pub fn into_record(self, id: impl Into<String>) -> BookRecord {
        BookRecord {
            id: id.into(),
            title: self.title,
            author: self.author,
            genre: self.genre,
            status: self.status,
            rating: self.rating,
            owner_id: self.owner_id,
            cover_image: self.cover_image,
        }
    }
}

/// Fields replaced by an update. Id and owner are not updatable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub genre: Genre,
    pub status: ReadingStatus,
    pub rating: u8,
}

impl BookUpdate {
    /// Build an update, forcing rating 0 when the book is not finished.
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: Genre,
        status: ReadingStatus,
        rating: u8,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre,
            status,
            rating: rating_for_status(status, rating),
        }
    }

    /// A finished book needs a rating in 1..=5 before it can be written.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.status {
            ReadingStatus::Done if !(MIN_RATING..=MAX_RATING).contains(&self.rating) => {
                Err(ValidationError::InvalidRating)
            }
            _ => Ok(()),
        }
    }
}
