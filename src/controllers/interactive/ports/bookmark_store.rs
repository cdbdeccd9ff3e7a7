use std::error::Error;
use std::fmt;
use std::io;

use crate::core::data::bookmark::{Bookmark, BookmarkKey};

#[derive(Debug)]
pub enum BookmarkError {
    Io(io::Error),
    Parse(serde_json::Error),
    NotFound(BookmarkKey),
}

impl fmt::Display for BookmarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "bookmark storage error: {}", err),
            Self::Parse(err) => write!(f, "bookmark file is malformed: {}", err),
            Self::NotFound(key) => write!(f, "no bookmark {}", key),
        }
    }
}

impl Error for BookmarkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<io::Error> for BookmarkError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for BookmarkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

/// Persistence for named views. Names are unique: saving an existing name
/// replaces that entry in place.
pub trait BookmarkStore {
    fn save(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError>;

    fn load(&self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError>;

    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError>;

    /// Removes and returns the selected bookmark.
    fn delete(&mut self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError>;
}

/// Position of `key` in `bookmarks`, shared by store implementations.
pub(crate) fn find_bookmark(bookmarks: &[Bookmark], key: &BookmarkKey) -> Option<usize> {
    match key {
        BookmarkKey::Name(name) => bookmarks.iter().position(|b| &b.name == name),
        BookmarkKey::Index(index) => (*index < bookmarks.len()).then_some(*index),
    }
}

/// Inserts or replaces by name, shared by store implementations.
pub(crate) fn upsert_bookmark(bookmarks: &mut Vec<Bookmark>, bookmark: Bookmark) {
    match bookmarks.iter_mut().find(|b| b.name == bookmark.name) {
        Some(existing) => *existing = bookmark,
        None => bookmarks.push(bookmark),
    }
}
