//! Caller-declared positions on the fretboard.
//!
//! A position marks a (string, fret) cell as active and carries the metadata
//! used to label and colour it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tag describing the role of a placed note.
///
/// The set is open: any tag not listed here is kept as [`Category::Custom`]
/// so it survives a round trip through configuration files.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Root,
    Third,
    Fifth,
    Seventh,
    Extension,
    Other,
    Chord,
    Common,
    Scale,
    ScaleA,
    ScaleB,
    /// A caller-defined tag with no dedicated styling.
    Custom(String),
}

impl Category {
    /// Returns the tag as written in configuration files and click events.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Root => "root",
            Self::Third => "third",
            Self::Fifth => "fifth",
            Self::Seventh => "seventh",
            Self::Extension => "extension",
            Self::Other => "other",
            Self::Chord => "chord",
            Self::Common => "common",
            Self::Scale => "scale",
            Self::ScaleA => "scaleA",
            Self::ScaleB => "scaleB",
            Self::Custom(tag) => tag,
        }
    }
}

impl From<&str> for Category {
    fn from(tag: &str) -> Self {
        match tag {
            "root" => Self::Root,
            "third" => Self::Third,
            "fifth" => Self::Fifth,
            "seventh" => Self::Seventh,
            "extension" => Self::Extension,
            "other" => Self::Other,
            "chord" => Self::Chord,
            "common" => Self::Common,
            "scale" => Self::Scale,
            "scaleA" => Self::ScaleA,
            "scaleB" => Self::ScaleB,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Custom(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A note placed on the fretboard by the caller.
///
/// Positions are expected to be unique per (string, fret). This is not
/// enforced; when two share a cell the one listed first is used.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FretPosition {
    /// String index, matching the index into the tuning.
    pub string: usize,

    /// Fret number. 0 is the open string.
    pub fret: u32,

    /// Note name as the caller spelled it. Informational only: the grid
    /// always derives the sounding note from the tuning.
    #[serde(default)]
    pub note: String,

    /// Explicit root flag. When absent, root detection falls back to
    /// comparing the computed note with the configured root note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_root: Option<bool>,

    /// Role of the note, used to pick the glow colour.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Text shown instead of the computed note or interval.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_override: Option<String>,
}

impl FretPosition {
    /// Creates a position with no annotations.
    pub fn new(string: usize, fret: u32, note: impl Into<String>) -> Self {
        Self {
            string,
            fret,
            note: note.into(),
            ..Self::default()
        }
    }

    /// Sets the explicit root flag.
    pub fn with_root(mut self, is_root: bool) -> Self {
        self.is_root = Some(is_root);
        self
    }

    /// Sets the category tag.
    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Sets the display override text.
    pub fn with_display_override(mut self, text: impl Into<String>) -> Self {
        self.display_override = Some(text.into());
        self
    }
}

/// Payload delivered to the click handler when an active cell is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteClickInfo {
    /// Computed note name at the cell.
    pub note: String,
    /// MIDI pitch sounding at the cell.
    pub midi: i32,
    pub string_index: usize,
    pub fret: u32,
    /// Category of the position at the cell, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
}
