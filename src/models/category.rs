use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A fixed classification for notes.
///
/// Categories are static configuration rather than stored entities: the set
/// is closed and known at build time. Each entry carries a display label, an
/// accent color and an icon glyph for the list and editor views. The
/// serialized form is the lowercase key (`"study"`, `"random"`, ...).
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Study,
    Business,
    Creativity,
    Reminders,
    #[default]
    Random,
}

/// Returned when a string names no known category.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Unknown category '{0}' (expected one of: study, business, creativity, reminders, random)")]
pub struct UnknownCategory(pub String);

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Self::Study,
        Self::Business,
        Self::Creativity,
        Self::Reminders,
        Self::Random,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Study => "study",
            Self::Business => "business",
            Self::Creativity => "creativity",
            Self::Reminders => "reminders",
            Self::Random => "random",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Study => "Study",
            Self::Business => "Business",
            Self::Creativity => "Creativity",
            Self::Reminders => "Reminders",
            Self::Random => "Random",
        }
    }

    /// Accent color as a `#RRGGBB` hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::Study => "#4CAF50",
            Self::Business => "#2196F3",
            Self::Creativity => "#FF9800",
            Self::Reminders => "#F44336",
            Self::Random => "#9C27B0",
        }
    }

    /// Accent color split into RGB components.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            Self::Study => (0x4C, 0xAF, 0x50),
            Self::Business => (0x21, 0x96, 0xF3),
            Self::Creativity => (0xFF, 0x98, 0x00),
            Self::Reminders => (0xF4, 0x43, 0x36),
            Self::Random => (0x9C, 0x27, 0xB0),
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Study => "📚",
            Self::Business => "💼",
            Self::Creativity => "🎨",
            Self::Reminders => "⏰",
            Self::Random => "🎲",
        }
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "study" => Ok(Self::Study),
            "business" => Ok(Self::Business),
            "creativity" => Ok(Self::Creativity),
            "reminders" => Ok(Self::Reminders),
            "random" => Ok(Self::Random),
            _ => Err(UnknownCategory(s.to_string())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which notes the list view shows: everything, or a single category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum NoteFilter {
    #[default]
    All,
    Category(Category),
}

impl NoteFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => *c == category,
        }
    }

    /// The category this filter selects, if it selects one.
    pub fn category(&self) -> Option<Category> {
        match self {
            Self::All => None,
            Self::Category(c) => Some(*c),
        }
    }
}

impl FromStr for NoteFilter {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        s.parse().map(Self::Category)
    }
}

impl fmt::Display for NoteFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Category(c) => c.fmt(f),
        }
    }
}

impl From<Category> for NoteFilter {
    fn from(category: Category) -> Self {
        Self::Category(category)
    }
}

// Stored in config as the same string accepted on the command line.
impl Serialize for NoteFilter {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for NoteFilter {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
