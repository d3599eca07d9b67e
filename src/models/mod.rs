//! Domain models for notekeeper.
//!
//! - [`Note`]: the only persisted entity, a titled text record with timestamps.
//! - [`NoteDraft`]: editor state that becomes a note when saved.
//! - [`Category`]: the static set of note classifications, each with a label,
//!   accent color and icon.
//! - [`NoteFilter`]: the list view's selection, all notes or one category.

mod category;
mod note;

pub use category::*;
pub use note::*;
