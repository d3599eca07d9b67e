//! The note store: the authoritative in-memory note collection and its
//! persisted mirror.
//!
//! Every successful mutation ends with an explicit [`NoteStore::persist`],
//! which rewrites the whole collection under [`NOTES_KEY`]. Storage failures
//! are logged and never undo the in-memory change: for the running process
//! the in-memory collection is the source of truth.

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::db::KeyValueStore;
use crate::models::*;

/// Storage key holding the serialized note collection.
pub const NOTES_KEY: &str = "notes";

/// Errors returned to callers of store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Both title and content were blank when saving.
    #[error("Please add a title or content")]
    Validation,

    #[error("Note not found: {0}")]
    NotFound(String),

    #[error("Note id '{0}' matches more than one note")]
    AmbiguousId(String),
}

/// Storage failures. These are logged, never returned from mutations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read notes from storage: {0}")]
    Read(anyhow::Error),

    #[error("Failed to parse stored notes: {0}")]
    Parse(serde_json::Error),

    #[error("Failed to serialize notes: {0}")]
    Serialize(serde_json::Error),

    #[error("Failed to write notes to storage: {0}")]
    Write(anyhow::Error),
}

/// Returns the notes selected by `filter`, preserving their order.
pub fn filter_notes(notes: &[Note], filter: NoteFilter) -> Vec<&Note> {
    notes.iter().filter(|n| filter.matches(n.category)).collect()
}

/// Owns the note collection, newest first by insertion.
pub struct NoteStore<S> {
    storage: S,
    notes: Vec<Note>,
    loaded: bool,
}

impl<S: KeyValueStore> NoteStore<S> {
    /// An empty, not yet loaded store.
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            notes: Vec::new(),
            loaded: false,
        }
    }

    /// Create a store and load the persisted collection.
    pub fn open(storage: S) -> Self {
        let mut store = Self::new(storage);
        store.load();
        store
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Replace the in-memory collection with the persisted one.
    ///
    /// Missing or unreadable data yields an empty collection.
    pub fn load(&mut self) {
        self.notes = match self.try_load() {
            Ok(notes) => {
                tracing::debug!("Loaded {} notes", notes.len());
                notes
            }
            Err(e) => {
                tracing::warn!("{}; starting with no notes", e);
                Vec::new()
            }
        };
        self.loaded = true;
    }

    /// Read and decode the persisted collection without touching the store.
    pub fn try_load(&self) -> Result<Vec<Note>, StorageError> {
        let Some(blob) = self
            .storage
            .get_item(NOTES_KEY)
            .map_err(StorageError::Read)?
        else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&blob).map_err(StorageError::Parse)
    }

    /// Write the full collection to storage, logging any failure.
    pub fn persist(&self) {
        match self.try_persist() {
            Ok(()) => tracing::debug!("Persisted {} notes", self.notes.len()),
            Err(e) => tracing::error!("{}", e),
        }
    }

    pub fn try_persist(&self) -> Result<(), StorageError> {
        let blob = serde_json::to_string(&self.notes).map_err(StorageError::Serialize)?;
        self.storage
            .set_item(NOTES_KEY, &blob)
            .map_err(StorageError::Write)
    }

    /// Every note, newest first.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// The notes visible under `filter`.
    pub fn snapshot(&self, filter: NoteFilter) -> Vec<&Note> {
        filter_notes(&self.notes, filter)
    }

    pub fn get(&self, id: Uuid) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Find a note by full id or by a unique prefix of its id.
    pub fn resolve(&self, id: &str) -> Result<&Note, StoreError> {
        let needle = id.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(StoreError::NotFound(id.to_string()));
        }
        if let Ok(uuid) = Uuid::parse_str(&needle) {
            return self
                .get(uuid)
                .ok_or_else(|| StoreError::NotFound(id.to_string()));
        }

        let mut matches = self
            .notes
            .iter()
            .filter(|n| n.id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Ok(note),
            (Some(_), Some(_)) => Err(StoreError::AmbiguousId(id.to_string())),
            (None, _) => Err(StoreError::NotFound(id.to_string())),
        }
    }

    /// Save a draft: update the note it was opened from, or create a new one.
    pub fn save(&mut self, draft: NoteDraft) -> Result<Note, StoreError> {
        match draft.id {
            Some(id) => self.update(id, draft),
            None => self.create(draft),
        }
    }

    /// Add a new note at the head of the collection.
    pub fn create(&mut self, draft: NoteDraft) -> Result<Note, StoreError> {
        if draft.is_blank() {
            return Err(StoreError::Validation);
        }

        let note = Note {
            id: Uuid::new_v4(),
            title: draft.title,
            content: draft.content,
            category: draft.category,
            created_at: Utc::now(),
            updated_at: None,
        };
        self.notes.insert(0, note.clone());
        tracing::info!("Created note {}", note.id);

        self.persist();
        Ok(note)
    }

    /// Replace a note's title, content and category in place.
    pub fn update(&mut self, id: Uuid, draft: NoteDraft) -> Result<Note, StoreError> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if draft.is_blank() {
            return Err(StoreError::Validation);
        }

        note.title = draft.title;
        note.content = draft.content;
        note.category = draft.category;
        note.updated_at = Some(Utc::now());
        let updated = note.clone();
        tracing::info!("Updated note {}", id);

        self.persist();
        Ok(updated)
    }

    /// Remove a note. Returns false, without persisting, if no note has `id`.
    pub fn delete(&mut self, id: Uuid) -> bool {
        let Some(index) = self.notes.iter().position(|n| n.id == id) else {
            return false;
        };
        self.notes.remove(index);
        tracing::info!("Deleted note {}", id);

        self.persist();
        true
    }

    /// Reassign a note's category. Not a content edit: `updated_at` is kept.
    pub fn set_category(&mut self, id: Uuid, category: Category) -> Result<Note, StoreError> {
        let note = self
            .notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        note.category = category;
        let updated = note.clone();
        tracing::info!("Moved note {} to {}", id, category);

        self.persist();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(title: &str, category: Category) -> Note {
        Note {
            id: Uuid::new_v4(),
            title: title.to_string(),
            content: String::new(),
            category,
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 10, 0, 0).unwrap(),
            updated_at: None,
        }
    }

    #[test]
    fn test_filter_all_is_identity() {
        let notes = vec![
            note("a", Category::Study),
            note("b", Category::Random),
            note("c", Category::Study),
        ];
        let filtered = filter_notes(&notes, NoteFilter::All);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().zip(&notes).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_filter_category_preserves_order() {
        let notes = vec![
            note("a", Category::Study),
            note("b", Category::Random),
            note("c", Category::Study),
            note("d", Category::Business),
        ];
        let titles: Vec<&str> = filter_notes(&notes, NoteFilter::Category(Category::Study))
            .iter()
            .map(|n| n.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn test_filter_with_no_matches_is_empty() {
        let notes = vec![note("a", Category::Study)];
        assert!(filter_notes(&notes, NoteFilter::Category(Category::Reminders)).is_empty());
    }
}
