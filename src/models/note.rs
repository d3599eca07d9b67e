use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Category;

/// A short user-authored text note.
///
/// Notes are kept newest-first by insertion. `title` and `content` may each be
/// empty, but never both at save time; that rule is enforced where drafts are
/// saved, not here. The serialized field names match the persisted blob
/// (`createdAt`, `updatedAt`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub category: Category,
    pub created_at: DateTime<Utc>,
    /// Set on every content edit. Absent until the first edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// First 8 characters of the id, as shown in the list view.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}

/// In-progress note values held by the editor before saving.
///
/// A draft with an `id` edits that note; a draft without one creates a new note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub id: Option<Uuid>,
    pub title: String,
    pub content: String,
    pub category: Category,
}

impl NoteDraft {
    /// An empty draft for a new note in `category`.
    pub fn new(category: Category) -> Self {
        Self {
            id: None,
            title: String::new(),
            content: String::new(),
            category,
        }
    }

    /// A draft pre-populated from an existing note.
    pub fn from_note(note: &Note) -> Self {
        Self {
            id: Some(note.id),
            title: note.title.clone(),
            content: note.content.clone(),
            category: note.category,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// True when neither title nor content has any non-whitespace text.
    pub fn is_blank(&self) -> bool {
        self.title.trim().is_empty() && self.content.trim().is_empty()
    }
}
