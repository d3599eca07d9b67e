//! Plain-text rendering of the note list, note details and menus.
//!
//! Example list output:
//! ```text
//! My Notepad
//! [All]  📚 Study  💼 Business  🎨 Creativity  ⏰ Reminders  🎲 Random
//!
//! 🎲 Random · Today at 03:07 PM · 1a2b3c4d
//!   Groceries
//!   Milk, eggs
//! ```

use std::fmt::Display;

use chrono::{DateTime, TimeZone};
use yansi::Paint;

use crate::format::format_age;
use crate::models::{Category, Note, NoteFilter};

const HEADER: &str = "My Notepad";
const TITLE_WIDTH: usize = 60;
const PREVIEW_LINES: usize = 3;
const ELLIPSIS: char = '…';

/// Terminal styling. With `color` off every renderer emits plain text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Palette {
    pub color: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    fn accent(&self, text: &str, category: Category) -> String {
        if !self.color {
            return text.to_string();
        }
        let (r, g, b) = category.rgb();
        Paint::rgb(text, r, g, b).bold().to_string()
    }

    fn strong(&self, text: &str) -> String {
        if self.color {
            Paint::bold(text).to_string()
        } else {
            text.to_string()
        }
    }

    fn muted(&self, text: &str) -> String {
        if self.color {
            Paint::dim(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Cut `text` to at most `max` characters, marking the cut with an ellipsis.
pub fn truncate_with_ellipsis(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

fn badge(category: Category, palette: Palette) -> String {
    palette.accent(&format!("{} {}", category.emoji(), category.label()), category)
}

/// The "All" entry followed by one entry per category; the active one is bracketed.
pub fn render_filter_strip(selected: NoteFilter, palette: Palette) -> String {
    let mut entries = Vec::with_capacity(Category::ALL.len() + 1);

    entries.push(if selected == NoteFilter::All {
        palette.strong("[All]")
    } else {
        "All".to_string()
    });
    for category in Category::ALL {
        let label = format!("{} {}", category.emoji(), category.label());
        entries.push(if selected == NoteFilter::Category(category) {
            palette.accent(&format!("[{}]", label), category)
        } else {
            label
        });
    }

    let mut output = entries.join("  ");
    output.push('\n');
    output
}

/// One list entry: category badge, age and short id, then title and a content preview.
pub fn render_note_card<Tz>(note: &Note, now: &DateTime<Tz>, palette: Palette) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = format!(
        "{} · {} · {}\n",
        badge(note.category, palette),
        palette.muted(&format_age(note.created_at, now)),
        palette.muted(&note.short_id()),
    );

    if let Some(title) = note.title.lines().find(|l| !l.trim().is_empty()) {
        output.push_str("  ");
        output.push_str(&palette.strong(&truncate_with_ellipsis(title.trim(), TITLE_WIDTH)));
        output.push('\n');
    }

    let lines: Vec<&str> = note.content.lines().collect();
    for (i, line) in lines.iter().take(PREVIEW_LINES).enumerate() {
        output.push_str("  ");
        output.push_str(line);
        if i == PREVIEW_LINES - 1 && lines.len() > PREVIEW_LINES {
            output.push(ELLIPSIS);
        }
        output.push('\n');
    }

    output
}

/// The list screen: header, filter strip, then cards or the empty state.
pub fn render_note_list<Tz>(
    notes: &[&Note],
    filter: NoteFilter,
    now: &DateTime<Tz>,
    palette: Palette,
) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = palette.strong(HEADER);
    output.push('\n');
    output.push_str(&render_filter_strip(filter, palette));
    output.push('\n');

    if notes.is_empty() {
        output.push_str("No notes yet\n");
        output.push_str(&palette.muted("Use `nk add` to create your first note"));
        output.push('\n');
        return output;
    }

    let cards: Vec<String> = notes
        .iter()
        .map(|note| render_note_card(note, now, palette))
        .collect();
    output.push_str(&cards.join("\n"));
    output
}

/// Full note with every line of content.
pub fn render_note_detail<Tz>(note: &Note, now: &DateTime<Tz>, palette: Palette) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut output = String::new();
    if !note.title.is_empty() {
        output.push_str(&palette.strong(&note.title));
        output.push('\n');
    }
    output.push_str(&format!("{}\n", badge(note.category, palette)));
    output.push_str(&palette.muted(&format!(
        "Created {} · id {}",
        format_age(note.created_at, now),
        note.id
    )));
    output.push('\n');
    if let Some(updated_at) = note.updated_at {
        output.push_str(&palette.muted(&format!("Edited {}", format_age(updated_at, now))));
        output.push('\n');
    }
    if !note.content.is_empty() {
        output.push('\n');
        output.push_str(&note.content);
        if !note.content.ends_with('\n') {
            output.push('\n');
        }
    }
    output
}

/// The static category table.
pub fn render_categories(palette: Palette) -> String {
    let mut output = String::new();
    for category in Category::ALL {
        output.push_str(&format!(
            "{:<11} {}  {}\n",
            category.as_str(),
            badge(category, palette),
            palette.muted(category.color()),
        ));
    }
    output
}

/// Numbered category choices for the Change Category prompt.
pub fn render_category_menu(current: Category, palette: Palette) -> String {
    let mut output = String::from("Change Category\nSelect a new category\n");
    for (i, category) in Category::ALL.iter().enumerate() {
        let marker = if *category == current { " (current)" } else { "" };
        output.push_str(&format!(
            "  {}) {}{}\n",
            i + 1,
            badge(*category, palette),
            marker
        ));
    }
    output
}

/// The contextual menu shown for a single note.
pub fn render_action_sheet(note: &Note, palette: Palette) -> String {
    let heading = if note.title.trim().is_empty() {
        truncate_with_ellipsis(note.content.lines().next().unwrap_or(""), TITLE_WIDTH)
    } else {
        truncate_with_ellipsis(note.title.trim(), TITLE_WIDTH)
    };
    format!(
        "{} ({})\n  1) Edit\n  2) Change Category\n  3) Delete\n  4) Cancel\n",
        palette.strong(&heading),
        note.short_id()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use uuid::Uuid;

    fn make_note(title: &str, content: &str, category: Category) -> Note {
        Note {
            id: Uuid::parse_str("1a2b3c4d-0000-4000-8000-000000000000").unwrap(),
            title: title.to_string(),
            content: content.to_string(),
            category,
            created_at: Utc::now() - Duration::days(3),
            updated_at: None,
        }
    }

    #[test]
    fn test_filter_strip_brackets_all() {
        let output = render_filter_strip(NoteFilter::All, Palette::plain());
        assert_eq!(
            output,
            "[All]  📚 Study  💼 Business  🎨 Creativity  ⏰ Reminders  🎲 Random\n"
        );
    }

    #[test]
    fn test_filter_strip_brackets_selected_category() {
        let output = render_filter_strip(Category::Business.into(), Palette::plain());
        assert!(output.starts_with("All  📚 Study  [💼 Business]  🎨"));
    }

    #[test]
    fn test_card_layout() {
        let note = make_note("Groceries", "Milk, eggs", Category::Random);
        let output = render_note_card(&note, &Utc::now(), Palette::plain());
        assert_eq!(
            output,
            "🎲 Random · 3 days ago · 1a2b3c4d\n  Groceries\n  Milk, eggs\n"
        );
    }

    #[test]
    fn test_card_without_title() {
        let note = make_note("", "Call mom", Category::Reminders);
        let output = render_note_card(&note, &Utc::now(), Palette::plain());
        assert_eq!(output, "⏰ Reminders · 3 days ago · 1a2b3c4d\n  Call mom\n");
    }

    #[test]
    fn test_card_limits_content_preview() {
        let note = make_note("List", "one\ntwo\nthree\nfour\nfive", Category::Study);
        let output = render_note_card(&note, &Utc::now(), Palette::plain());
        assert!(output.ends_with("  one\n  two\n  three…\n"));
        assert!(!output.contains("four"));
    }

    #[test]
    fn test_card_truncates_long_title() {
        let title = "x".repeat(100);
        let note = make_note(&title, "", Category::Study);
        let output = render_note_card(&note, &Utc::now(), Palette::plain());
        let title_line = output.lines().nth(1).unwrap();
        assert_eq!(title_line.trim().chars().count(), TITLE_WIDTH);
        assert!(title_line.ends_with('…'));
    }

    #[test]
    fn test_empty_list_shows_empty_state() {
        let output = render_note_list(&[], NoteFilter::All, &Utc::now(), Palette::plain());
        assert!(output.starts_with("My Notepad\n[All]"));
        assert!(output.contains("No notes yet\n"));
    }

    #[test]
    fn test_list_separates_cards() {
        let a = make_note("A", "", Category::Study);
        let b = make_note("B", "", Category::Random);
        let output = render_note_list(&[&a, &b], NoteFilter::All, &Utc::now(), Palette::plain());
        assert!(output.contains("  A\n\n🎲 Random"));
        assert!(!output.contains("No notes yet"));
    }

    #[test]
    fn test_detail_shows_edit_age() {
        let mut note = make_note("Plan", "Line 1\nLine 2", Category::Business);
        note.updated_at = Some(Utc::now() - Duration::days(1));
        let output = render_note_detail(&note, &Utc::now(), Palette::plain());
        assert!(output.starts_with("Plan\n💼 Business\nCreated 3 days ago"));
        assert!(output.contains("Edited Yesterday\n"));
        assert!(output.ends_with("\nLine 1\nLine 2\n"));
    }

    #[test]
    fn test_category_menu_marks_current() {
        let output = render_category_menu(Category::Study, Palette::plain());
        assert!(output.contains("  1) 📚 Study (current)\n"));
        assert!(output.contains("  5) 🎲 Random\n"));
    }

    #[test]
    fn test_action_sheet_uses_content_when_untitled() {
        let note = make_note("", "Buy stamps\nand envelopes", Category::Random);
        let output = render_action_sheet(&note, Palette::plain());
        assert!(output.starts_with("Buy stamps (1a2b3c4d)\n  1) Edit\n"));
        assert!(output.ends_with("  4) Cancel\n"));
    }

    #[test]
    fn test_colored_output_contains_escape_codes() {
        let output = render_filter_strip(Category::Study.into(), Palette::colored());
        assert!(output.contains("\u{1b}["));
    }

    #[test]
    fn test_truncate_with_ellipsis() {
        assert_eq!(truncate_with_ellipsis("short", 10), "short");
        assert_eq!(truncate_with_ellipsis("abcdefghij", 5), "abcd…");
    }
}
