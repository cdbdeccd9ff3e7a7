use crate::controllers::interactive::ports::bookmark_store::{
    BookmarkError, BookmarkStore, find_bookmark, upsert_bookmark,
};
use crate::core::data::bookmark::{Bookmark, BookmarkKey};

/// Keeps bookmarks for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryBookmarkStore {
    bookmarks: Vec<Bookmark>,
}

impl MemoryBookmarkStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl BookmarkStore for MemoryBookmarkStore {
    fn save(&mut self, bookmark: Bookmark) -> Result<(), BookmarkError> {
        upsert_bookmark(&mut self.bookmarks, bookmark);
        Ok(())
    }

    fn load(&self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError> {
        find_bookmark(&self.bookmarks, key)
            .map(|index| self.bookmarks[index].clone())
            .ok_or_else(|| BookmarkError::NotFound(key.clone()))
    }

    fn list(&self) -> Result<Vec<Bookmark>, BookmarkError> {
        Ok(self.bookmarks.clone())
    }

    fn delete(&mut self, key: &BookmarkKey) -> Result<Bookmark, BookmarkError> {
        let index =
            find_bookmark(&self.bookmarks, key).ok_or_else(|| BookmarkError::NotFound(key.clone()))?;
        Ok(self.bookmarks.remove(index))
    }
}
