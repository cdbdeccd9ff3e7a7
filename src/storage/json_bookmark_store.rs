use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, info};

use crate::controllers::interactive::ports::bookmark_store::{
    BookmarkError, BookmarkStore, find_bookmark, upsert_bookmark,
};
use crate::core::data::bookmark::{Bookmark, BookmarkKey};

/// Bookmarks persisted as a pretty-printed JSON array.
///
/// The file is read on every access and rewritten on every change, so
/// edits made by other processes between calls are picked up. A missing
/// file is an empty list.
#[derive(Debug, Clone)]
pub struct JsonBookmarkStore {
    path: PathBuf,
}

impl JsonBookmarkStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(Vec::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("no bookmark file at {}", self.path.display());
                Ok(Vec::new())
            }
            Err(err) => Err(err.into()),
        }
    }

    fn write_all(&self, bookmarks: &[Bookmark]) -> Result<(), BookmarkError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let json = serde_json::to_string_pretty(bookmarks)?;
        fs::write(&self.path, json)?;

        Ok(())
    }
}

impl BookmarkStore for JsonBookmarkStore {
    fn save(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError> {
        let mut bookmarks = self.read_all()?;
        let name = bookmark.name.clone();
        upsert_bookmark(&mut bookmarks, bookmark);
        self.write_all(&bookmarks)?;

        info!("saved bookmark \"{}\" to {}", name, self.path.display());
        Ok(())
    }

    fn load(&self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError> {
        let mut bookmarks = self.read_all()?;
        let index = find_bookmark(&bookmarks, key).ok_or_else(|| BookmarkError::NotFound(key.clone()))?;
        Ok(bookmarks.swap_remove(index))
    }

    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        self.read_all()
    }

    fn delete(&mut self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError> {
        let mut bookmarks = self.read_all()?;
        let index = find_bookmark(&bookmarks, key).ok_or_else(|| BookmarkError::NotFound(key.clone()))?;
        let removed = bookmarks.remove(index);
        self.write_all(&bookmarks)?;

        info!("deleted bookmark \"{}\"", removed.name);
        Ok(removed)
    }
}
