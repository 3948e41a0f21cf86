//! The renderable cell matrix.
//!
//! A [`Grid`] is derived from the tuning, the placed positions, and the
//! display options every time the fretboard is drawn. Nothing in it is
//! cached or mutated after construction.

use super::index::PositionIndex;
use super::position::{Category, FretPosition, NoteClickInfo};
use crate::pitch::{get_interval_label, get_note_at_fret};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Default highest fret shown.
pub const DEFAULT_MAX_FRETS: u32 = 12;

/// Highest fret any grid will show. Larger `max_frets` values are capped.
pub const MAX_FRET_LIMIT: u32 = 36;

/// What the label of an active cell shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DisplayMode {
    /// Note names such as "F#".
    #[default]
    Notes,
    /// Interval labels relative to the root note such as "♭3".
    Intervals,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Notes => Self::Intervals,
            Self::Intervals => Self::Notes,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Notes => "Notes",
            Self::Intervals => "Intervals",
        }
    }
}

/// Display preferences for a fretboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FretboardOptions {
    /// Highest fret shown (inclusive), capped at [`MAX_FRET_LIMIT`].
    pub max_frets: u32,
    /// Lowest fret shown. A value above `max_frets` yields no columns.
    pub start_fret: u32,
    pub display_mode: DisplayMode,
    /// Reference note for interval labels and root detection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_note: Option<String>,
    pub show_fret_numbers: bool,
    /// Fret to centre in the viewport. Changing it triggers a scroll.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_to_fret: Option<u32>,
}

impl Default for FretboardOptions {
    fn default() -> Self {
        Self {
            max_frets: DEFAULT_MAX_FRETS,
            start_fret: 0,
            display_mode: DisplayMode::Notes,
            root_note: None,
            show_fret_numbers: true,
            scroll_to_fret: None,
        }
    }
}

impl FretboardOptions {
    /// The configured root note, treating an empty string as unset.
    pub fn root(&self) -> Option<&str> {
        self.root_note.as_deref().filter(|root| !root.is_empty())
    }

    /// The highest fret actually shown.
    pub fn last_fret(&self) -> u32 {
        self.max_frets.min(MAX_FRET_LIMIT)
    }

    /// The frets shown as columns, left to right.
    pub fn fret_range(&self) -> RangeInclusive<u32> {
        fret_range(self.start_fret, self.max_frets)
    }

    /// Number of fret columns. Zero when `start_fret > max_frets`.
    pub fn column_count(&self) -> usize {
        column_count(self.start_fret, self.max_frets)
    }
}

/// Frets from `start_fret` to `max_frets` inclusive; empty if reversed.
/// The upper end never goes past [`MAX_FRET_LIMIT`].
pub fn fret_range(start_fret: u32, max_frets: u32) -> RangeInclusive<u32> {
    start_fret..=max_frets.min(MAX_FRET_LIMIT)
}

/// Number of columns in [`fret_range`].
pub fn column_count(start_fret: u32, max_frets: u32) -> usize {
    let last = max_frets.min(MAX_FRET_LIMIT);
    if start_fret > last {
        0
    } else {
        (last - start_fret) as usize + 1
    }
}

/// Colour bucket for an active cell's highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlowCategory {
    Root,
    Third,
    Fifth,
    Seventh,
    Extension,
    Other,
}

impl GlowCategory {
    /// Picks the glow for a cell.
    ///
    /// Roots always glow as root. Otherwise the category decides; chord and
    /// common tones share the fifth colour, scale tones the extension colour,
    /// and the second scale of a comparison the third colour. A missing or
    /// custom category glows as root.
    pub fn resolve(category: Option<&Category>, is_root: bool) -> Self {
        if is_root {
            return Self::Root;
        }
        match category {
            Some(Category::Root) => Self::Root,
            Some(Category::Third) => Self::Third,
            Some(Category::Fifth) => Self::Fifth,
            Some(Category::Seventh) => Self::Seventh,
            Some(Category::Extension) => Self::Extension,
            Some(Category::Other) => Self::Other,
            Some(Category::Chord) | Some(Category::Common) => Self::Fifth,
            Some(Category::Scale) | Some(Category::ScaleA) => Self::Extension,
            Some(Category::ScaleB) => Self::Third,
            Some(Category::Custom(_)) | None => Self::Root,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Third => "third",
            Self::Fifth => "fifth",
            Self::Seventh => "seventh",
            Self::Extension => "extension",
            Self::Other => "other",
        }
    }
}

/// Everything the view needs to draw one (string, fret) cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub string_index: usize,
    pub fret: u32,
    /// Canonical name of the note sounding here.
    pub note: &'static str,
    pub midi: i32,
    /// A position is placed on this cell.
    pub is_active: bool,
    pub is_root: bool,
    /// Fret 0, drawn with the nut.
    pub is_open: bool,
    pub category: Option<Category>,
    /// Label for the note marker.
    pub display_text: String,
    pub glow: GlowCategory,
    /// Active and a click handler is registered.
    pub clickable: bool,
}

impl Cell {
    /// Builds the click payload for this cell, if it accepts clicks.
    pub fn click_info(&self) -> Option<NoteClickInfo> {
        self.clickable.then(|| NoteClickInfo {
            note: self.note.to_string(),
            midi: self.midi,
            string_index: self.string_index,
            fret: self.fret,
            category: self.category.clone(),
        })
    }
}

/// Resolves a single cell.
///
/// Root detection uses the position's explicit flag when it has one, and
/// otherwise compares the computed note with the root note by exact string
/// equality. A root spelled "Bb" therefore never matches a computed "A#";
/// callers wanting enharmonic matching should normalize the root first.
fn resolve_cell(
    string_index: usize,
    string_midi: i32,
    fret: u32,
    position: Option<&FretPosition>,
    options: &FretboardOptions,
    click_enabled: bool,
) -> Cell {
    let note = get_note_at_fret(string_midi, fret);
    let midi = string_midi.saturating_add_unsigned(fret);
    let root = options.root();

    let is_active = position.is_some();
    let is_root = position
        .and_then(|p| p.is_root)
        .unwrap_or_else(|| root.is_some_and(|root| note == root));
    let category = position.and_then(|p| p.category.clone());

    let display_text = match (position.and_then(|p| p.display_override.as_ref()), root) {
        (Some(text), _) => text.clone(),
        (None, Some(root)) if options.display_mode == DisplayMode::Intervals => {
            get_interval_label(note, root).to_string()
        }
        _ => note.to_string(),
    };

    Cell {
        string_index,
        fret,
        note,
        midi,
        is_active,
        is_root,
        is_open: fret == 0,
        glow: GlowCategory::resolve(category.as_ref(), is_root),
        category,
        display_text,
        clickable: is_active && click_enabled,
    }
}

/// Row-major matrix of cells: one row per string, one column per fret.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    start_fret: u32,
    string_count: usize,
    column_count: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Derives the grid for the given inputs.
    ///
    /// `index` must have been built from `positions`. `click_enabled` says
    /// whether a click handler is registered.
    pub fn build(
        tuning: &[i32],
        positions: &[FretPosition],
        index: &PositionIndex,
        options: &FretboardOptions,
        click_enabled: bool,
    ) -> Self {
        let column_count = options.column_count();
        let mut cells = Vec::with_capacity(tuning.len() * column_count);

        for (string_index, &string_midi) in tuning.iter().enumerate() {
            for fret in options.fret_range() {
                let position = index.lookup(positions, string_index, fret);
                cells.push(resolve_cell(
                    string_index,
                    string_midi,
                    fret,
                    position,
                    options,
                    click_enabled,
                ));
            }
        }

        Self {
            start_fret: options.start_fret,
            string_count: tuning.len(),
            column_count,
            cells,
        }
    }

    pub fn string_count(&self) -> usize {
        self.string_count
    }

    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// The fret shown in each column, left to right.
    pub fn frets(&self) -> impl Iterator<Item = u32> + '_ {
        (0..self.column_count).map(move |col| self.start_fret + col as u32)
    }

    /// Column index of `fret`, if it is inside the grid.
    pub fn column_of(&self, fret: u32) -> Option<usize> {
        let column = fret.checked_sub(self.start_fret)? as usize;
        (column < self.column_count).then_some(column)
    }

    /// Cells of one string, left to right.
    pub fn row(&self, string_index: usize) -> &[Cell] {
        if string_index >= self.string_count {
            return &[];
        }
        let start = string_index * self.column_count;
        &self.cells[start..start + self.column_count]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> + '_ {
        (0..self.string_count).map(move |s| self.row(s))
    }

    pub fn cell(&self, string_index: usize, fret: u32) -> Option<&Cell> {
        let column = self.column_of(fret)?;
        self.row(string_index).get(column)
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}
