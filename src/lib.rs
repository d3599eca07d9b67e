//! Categorized notes kept in a local key-value slot.
//!
//! The [`store::NoteStore`] owns the note collection and mirrors it to a
//! [`db::KeyValueStore`] after every change. [`cli`], [`render`] and
//! [`format`] make up the terminal front end.

pub mod cli;
pub mod config;
pub mod db;
pub mod format;
pub mod models;
pub mod render;
pub mod store;
