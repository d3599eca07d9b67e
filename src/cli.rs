//! Command-line front end: parses commands and drives the note store.
//!
//! Reads prompts from any [`BufRead`] and writes to any [`Write`], so the
//! whole flow (confirmation prompts included) runs against in-memory buffers
//! in tests.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::db::KeyValueStore;
use crate::models::*;
use crate::render::{self, Palette};
use crate::store::NoteStore;

#[derive(Debug, Parser)]
#[command(name = "nk")]
#[command(about = "Categorized notes, stored locally")]
pub struct Cli {
    /// Config file (default: <config dir>/notekeeper/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true, env = "NOTEKEEPER_DB")]
    pub db: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List notes, newest first
    #[command(alias = "ls")]
    List {
        /// "all" or a category key
        #[arg(short, long)]
        category: Option<NoteFilter>,
    },
    /// Create a note; opens the editor prompts when neither title nor content is given
    Add {
        #[arg(short, long)]
        title: Option<String>,

        /// Note body; "-" reads it from stdin
        #[arg(short = 'b', long)]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Edit a note's title, content or category
    Edit {
        /// Note id or unique id prefix
        id: String,

        #[arg(short, long)]
        title: Option<String>,

        /// Note body; "-" reads it from stdin
        #[arg(short = 'b', long)]
        content: Option<String>,

        #[arg(short, long)]
        category: Option<Category>,
    },
    /// Show a note in full
    Show { id: String },
    /// Move a note to another category
    #[command(alias = "set-category")]
    Move { id: String, category: Category },
    /// Delete a note after confirmation
    #[command(alias = "rm")]
    Delete {
        id: String,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Open the action menu for a note (edit, change category, delete)
    Actions { id: String },
    /// List the available categories
    Categories,
    /// Show or change settings
    Config {
        #[arg(long)]
        default_category: Option<Category>,

        #[arg(long)]
        default_filter: Option<NoteFilter>,

        #[arg(long)]
        color: Option<bool>,
    },
}

/// How an edit prompt answer changes a field.
#[derive(Debug, PartialEq, Eq)]
enum FieldEdit {
    Keep,
    Clear,
    Set(String),
}

impl FieldEdit {
    fn parse(answer: String) -> Self {
        let trimmed = answer.trim();
        if trimmed.is_empty() {
            Self::Keep
        } else if trimmed == "-" {
            Self::Clear
        } else {
            Self::Set(answer)
        }
    }

    fn apply(self, field: &mut String) {
        match self {
            Self::Keep => {}
            Self::Clear => field.clear(),
            Self::Set(value) => *field = value,
        }
    }
}

/// A category picked by menu number (1-based) or by key.
fn parse_category_choice(answer: &str) -> Result<Category> {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(n) if (1..=Category::ALL.len()).contains(&n) => Ok(Category::ALL[n - 1]),
        Ok(n) => anyhow::bail!("No category numbered {}", n),
        Err(_) => Ok(answer.parse()?),
    }
}

/// One command run against a loaded store.
pub struct Session<'a, S, R, W> {
    store: &'a mut NoteStore<S>,
    config: AppConfig,
    config_path: PathBuf,
    palette: Palette,
    input: R,
    output: W,
}

impl<'a, S, R, W> Session<'a, S, R, W>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    pub fn new(
        store: &'a mut NoteStore<S>,
        config: AppConfig,
        config_path: PathBuf,
        palette: Palette,
        input: R,
        output: W,
    ) -> Self {
        Self {
            store,
            config,
            config_path,
            palette,
            input,
            output,
        }
    }

    pub fn run(&mut self, command: Option<Commands>) -> Result<()> {
        match command {
            Some(Commands::List { category }) => {
                let filter = category.unwrap_or(self.config.default_filter);
                self.list(filter)
            }
            Some(Commands::Add {
                title,
                content,
                category,
            }) => self.add(title, content, category),
            Some(Commands::Edit {
                id,
                title,
                content,
                category,
            }) => self.edit(&id, title, content, category),
            Some(Commands::Show { id }) => self.show(&id),
            Some(Commands::Move { id, category }) => self.move_to(&id, category),
            Some(Commands::Delete { id, yes }) => self.delete(&id, yes),
            Some(Commands::Actions { id }) => self.actions(&id),
            Some(Commands::Categories) => {
                write!(self.output, "{}", render::render_categories(self.palette))?;
                Ok(())
            }
            Some(Commands::Config {
                default_category,
                default_filter,
                color,
            }) => self.configure(default_category, default_filter, color),
            None => self.list(self.config.default_filter),
        }
    }

    fn list(&mut self, filter: NoteFilter) -> Result<()> {
        let notes = self.store.snapshot(filter);
        let output = render::render_note_list(&notes, filter, &Local::now(), self.palette);
        write!(self.output, "{}", output)?;
        Ok(())
    }

    fn add(
        &mut self,
        title: Option<String>,
        content: Option<String>,
        category: Option<Category>,
    ) -> Result<()> {
        let category = category.unwrap_or_else(|| self.config.new_note_category());
        let mut draft = NoteDraft::new(category);

        if title.is_none() && content.is_none() {
            let Some(edited) = self.run_editor(draft)? else {
                writeln!(self.output, "Cancelled")?;
                return Ok(());
            };
            draft = edited;
        } else {
            if let Some(title) = title {
                draft.title = title;
            }
            if let Some(content) = content {
                draft.content = self.read_content(content)?;
            }
        }

        let note = self.store.save(draft)?;
        writeln!(self.output, "Created note {}", note.short_id())?;
        self.print_card(&note)
    }

    fn edit(
        &mut self,
        id: &str,
        title: Option<String>,
        content: Option<String>,
        category: Option<Category>,
    ) -> Result<()> {
        let mut draft = NoteDraft::from_note(self.store.resolve(id)?);
        if let Some(title) = title {
            draft.title = title;
        }
        if let Some(content) = content {
            draft.content = self.read_content(content)?;
        }
        if let Some(category) = category {
            draft.category = category;
        }

        let note = self.store.save(draft)?;
        writeln!(self.output, "Updated note {}", note.short_id())?;
        self.print_card(&note)
    }

    fn show(&mut self, id: &str) -> Result<()> {
        let note = self.store.resolve(id)?;
        let output = render::render_note_detail(note, &Local::now(), self.palette);
        write!(self.output, "{}", output)?;
        Ok(())
    }

    fn move_to(&mut self, id: &str, category: Category) -> Result<()> {
        let id = self.store.resolve(id)?.id;
        let note = self.store.set_category(id, category)?;
        writeln!(
            self.output,
            "Moved note {} to {} {}",
            note.short_id(),
            category.emoji(),
            category.label()
        )?;
        Ok(())
    }

    fn delete(&mut self, id: &str, confirmed: bool) -> Result<()> {
        let note = self.store.resolve(id)?.clone();
        if !confirmed && !self.confirm_delete()? {
            writeln!(self.output, "Cancelled")?;
            return Ok(());
        }

        self.store.delete(note.id);
        writeln!(self.output, "Deleted note {}", note.short_id())?;
        Ok(())
    }

    fn actions(&mut self, id: &str) -> Result<()> {
        let note = self.store.resolve(id)?.clone();
        write!(self.output, "{}", render::render_action_sheet(&note, self.palette))?;

        let choice = self.prompt("Choice: ")?.unwrap_or_default();
        match choice.trim().to_ascii_lowercase().as_str() {
            "1" | "e" | "edit" => self.edit_interactive(note),
            "2" | "c" | "category" => self.change_category_interactive(&note),
            "3" | "d" | "delete" => self.delete(&note.id.to_string(), false),
            _ => {
                writeln!(self.output, "Cancelled")?;
                Ok(())
            }
        }
    }

    fn edit_interactive(&mut self, note: Note) -> Result<()> {
        let Some(draft) = self.run_editor(NoteDraft::from_note(&note))? else {
            writeln!(self.output, "Cancelled")?;
            return Ok(());
        };

        let saved = self.store.save(draft)?;
        writeln!(self.output, "Updated note {}", saved.short_id())?;
        self.print_card(&saved)
    }

    fn change_category_interactive(&mut self, note: &Note) -> Result<()> {
        write!(
            self.output,
            "{}",
            render::render_category_menu(note.category, self.palette)
        )?;

        let Some(answer) = self.prompt("Choice: ")? else {
            writeln!(self.output, "Cancelled")?;
            return Ok(());
        };
        if answer.trim().is_empty() {
            writeln!(self.output, "Cancelled")?;
            return Ok(());
        }

        let category = parse_category_choice(&answer)?;
        self.move_to(&note.id.to_string(), category)
    }

    fn configure(
        &mut self,
        default_category: Option<Category>,
        default_filter: Option<NoteFilter>,
        color: Option<bool>,
    ) -> Result<()> {
        let changed = default_category.is_some() || default_filter.is_some() || color.is_some();
        if let Some(category) = default_category {
            self.config.default_category = category;
        }
        if let Some(filter) = default_filter {
            self.config.default_filter = filter;
        }
        if let Some(color) = color {
            self.config.color = color;
        }

        if changed {
            self.config.save(&self.config_path)?;
            writeln!(self.output, "Saved {}", self.config_path.display())?;
        }
        writeln!(self.output, "{}", serde_json::to_string_pretty(&self.config)?)?;
        Ok(())
    }

    fn confirm_delete(&mut self) -> Result<bool> {
        writeln!(self.output, "Delete Note")?;
        let answer = self.prompt("Are you sure you want to delete this note? [y/N] ")?;
        Ok(matches!(
            answer.as_deref().map(|a| a.trim().to_ascii_lowercase()).as_deref(),
            Some("y") | Some("yes")
        ))
    }

    /// The note editor: category, title, then multi-line content.
    ///
    /// Empty input keeps a field and "-" clears it. End of input before the
    /// content is started discards the draft (`None`).
    fn run_editor(&mut self, mut draft: NoteDraft) -> Result<Option<NoteDraft>> {
        let heading = if draft.id.is_some() { "Edit Note" } else { "New Note" };
        writeln!(self.output, "{}", heading)?;

        let category_prompt = format!("Category [{}] (1-5 or name): ", draft.category);
        let Some(answer) = self.prompt(&category_prompt)? else {
            return Ok(None);
        };
        if !answer.trim().is_empty() {
            draft.category = parse_category_choice(&answer)?;
        }

        let title_prompt = format!(
            "Title [{}]: ",
            render::truncate_with_ellipsis(&draft.title, 30)
        );
        let Some(answer) = self.prompt(&title_prompt)? else {
            return Ok(None);
        };
        FieldEdit::parse(answer).apply(&mut draft.title);

        let Some(edit) = self.prompt_content(&draft.content)? else {
            return Ok(None);
        };
        edit.apply(&mut draft.content);

        Ok(Some(draft))
    }

    /// Content lines up to a lone "." or end of input. `None` if input ends
    /// before the first line.
    fn prompt_content(&mut self, current: &str) -> Result<Option<FieldEdit>> {
        let preview = current.lines().next().unwrap_or("");
        let prompt = format!(
            "Content [{}] (end with a line containing only \".\"):\n",
            render::truncate_with_ellipsis(preview, 30)
        );
        let Some(first) = self.prompt(&prompt)? else {
            return Ok(None);
        };
        match first.trim() {
            "" | "." => return Ok(Some(FieldEdit::Keep)),
            "-" => return Ok(Some(FieldEdit::Clear)),
            _ => {}
        }

        let mut lines = vec![first];
        while let Some(line) = self.read_line()? {
            if line == "." {
                break;
            }
            lines.push(line);
        }
        Ok(Some(FieldEdit::Set(lines.join("\n"))))
    }

    /// Write `prompt` and read one line. `None` at end of input.
    fn prompt(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let line = self.read_line()?;
        if line.is_none() {
            writeln!(self.output)?;
        }
        Ok(line)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn read_content(&mut self, content: String) -> Result<String> {
        if content != "-" {
            return Ok(content);
        }
        let mut body = String::new();
        self.input
            .read_to_string(&mut body)
            .context("Failed to read note content from stdin")?;
        Ok(body.trim_end().to_string())
    }

    fn print_card(&mut self, note: &Note) -> Result<()> {
        let card = render::render_note_card(note, &Local::now(), self.palette);
        write!(self.output, "{}", card)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_edit_parsing() {
        assert_eq!(FieldEdit::parse("  ".to_string()), FieldEdit::Keep);
        assert_eq!(FieldEdit::parse("-".to_string()), FieldEdit::Clear);
        assert_eq!(
            FieldEdit::parse("New title".to_string()),
            FieldEdit::Set("New title".to_string())
        );
    }

    #[test]
    fn test_category_choice_by_number_or_key() {
        assert_eq!(parse_category_choice("1").unwrap(), Category::Study);
        assert_eq!(parse_category_choice(" 5 ").unwrap(), Category::Random);
        assert_eq!(parse_category_choice("business").unwrap(), Category::Business);
        assert!(parse_category_choice("0").is_err());
        assert!(parse_category_choice("6").is_err());
        assert!(parse_category_choice("groceries").is_err());
    }

    #[test]
    fn test_cli_parses_filters_and_categories() {
        let cli = Cli::try_parse_from(["nk", "list", "--category", "study"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::List {
                category: Some(NoteFilter::Category(Category::Study))
            })
        ));

        let cli = Cli::try_parse_from(["nk", "move", "abc", "reminders"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Move {
                category: Category::Reminders,
                ..
            })
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["nk", "add", "--category", "groceries"]).is_err());
    }

    #[test]
    fn test_cli_aliases() {
        let cli = Cli::try_parse_from(["nk", "rm", "abc", "--yes"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { yes: true, .. })));

        let cli = Cli::try_parse_from(["nk", "ls"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List { category: None })));
    }
}
