//! Fretboard position model.
//!
//! This module ties absolute pitch to grid coordinates: the caller supplies a
//! tuning, a list of placed positions, and display options, and gets back a
//! [`Grid`] of fully resolved cells plus click dispatch.

mod grid;
mod index;
mod position;
mod scroll;

pub use grid::{
    column_count, fret_range, Cell, DisplayMode, FretboardOptions, GlowCategory, Grid,
    DEFAULT_MAX_FRETS, MAX_FRET_LIMIT,
};
pub use index::PositionIndex;
pub use position::{Category, FretPosition, NoteClickInfo};
pub use scroll::{
    centered_scroll_offset, GridGeometry, ScrollAnimation, ScrollRequest,
    SCROLL_ANIMATION_DURATION,
};

use std::fmt;

/// Callback invoked when an active cell is clicked.
pub type NoteClickHandler = Box<dyn FnMut(&NoteClickInfo)>;

/// A fretboard diagram: tuning, placed notes, display options, and an
/// optional click handler.
///
/// The position list is treated as read-only. Replacing it through
/// [`Fretboard::set_positions`] rebuilds the lookup index.
pub struct Fretboard {
    /// Open-string MIDI pitches, one per string. Index 0 is the first row.
    tuning: Vec<i32>,
    /// Label for each string. Missing names render blank.
    string_names: Vec<String>,
    positions: Vec<FretPosition>,
    index: PositionIndex,
    /// Display preferences. Safe to modify between renders.
    pub options: FretboardOptions,
    on_note_click: Option<NoteClickHandler>,
}

impl fmt::Debug for Fretboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fretboard")
            .field("tuning", &self.tuning)
            .field("string_names", &self.string_names)
            .field("positions", &self.positions)
            .field("options", &self.options)
            .field("has_click_handler", &self.on_note_click.is_some())
            .finish()
    }
}

impl Fretboard {
    /// Creates a fretboard with no placed notes and default options.
    pub fn new(tuning: Vec<i32>, string_names: Vec<String>) -> Self {
        Self {
            tuning,
            string_names,
            positions: Vec::new(),
            index: PositionIndex::default(),
            options: FretboardOptions::default(),
            on_note_click: None,
        }
    }

    pub fn with_positions(mut self, positions: Vec<FretPosition>) -> Self {
        self.set_positions(positions);
        self
    }

    pub fn with_options(mut self, options: FretboardOptions) -> Self {
        self.options = options;
        self
    }

    /// Replaces the placed notes and rebuilds the lookup index.
    pub fn set_positions(&mut self, positions: Vec<FretPosition>) {
        for position in &positions {
            if position.string >= self.tuning.len() {
                tracing::warn!(
                    string = position.string,
                    fret = position.fret,
                    strings = self.tuning.len(),
                    "position is on a string outside the tuning and will not be shown"
                );
            }
        }
        self.index = PositionIndex::build(&positions);
        if self.index.len() < positions.len() {
            tracing::debug!(
                positions = positions.len(),
                distinct = self.index.len(),
                "duplicate positions share a cell; the first listed is used"
            );
        }
        self.positions = positions;
    }

    pub fn positions(&self) -> &[FretPosition] {
        &self.positions
    }

    pub fn tuning(&self) -> &[i32] {
        &self.tuning
    }

    pub fn string_count(&self) -> usize {
        self.tuning.len()
    }

    /// Label for a string, or "" if none was supplied.
    pub fn string_name(&self, string_index: usize) -> &str {
        self.string_names
            .get(string_index)
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Looks up the position placed at (string_index, fret).
    pub fn position_at(&self, string_index: usize, fret: u32) -> Option<&FretPosition> {
        self.index.lookup(&self.positions, string_index, fret)
    }

    /// Registers the handler that receives clicks on active cells.
    pub fn set_on_note_click(&mut self, handler: impl FnMut(&NoteClickInfo) + 'static) {
        self.on_note_click = Some(Box::new(handler));
    }

    pub fn clear_on_note_click(&mut self) {
        self.on_note_click = None;
    }

    pub fn has_click_handler(&self) -> bool {
        self.on_note_click.is_some()
    }

    /// Derives the cell matrix for the current inputs.
    pub fn grid(&self) -> Grid {
        Grid::build(
            &self.tuning,
            &self.positions,
            &self.index,
            &self.options,
            self.has_click_handler(),
        )
    }

    /// Handles a click on (string_index, fret).
    ///
    /// The handler is called only when the cell is clickable, meaning it is
    /// inside the grid, carries a position, and a handler is registered.
    ///
    /// # Returns
    ///
    /// The payload delivered to the handler, or None if nothing fired
    pub fn click(&mut self, string_index: usize, fret: u32) -> Option<NoteClickInfo> {
        let info = self.grid().cell(string_index, fret)?.click_info()?;
        if let Some(handler) = self.on_note_click.as_mut() {
            tracing::debug!(
                note = %info.note,
                midi = info.midi,
                string = info.string_index,
                fret = info.fret,
                "note clicked"
            );
            handler(&info);
        }
        Some(info)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn standard() -> Fretboard {
        Fretboard::new(
            vec![40, 45, 50, 55, 59, 64],
            ["E", "A", "D", "G", "B", "e"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }

    #[test]
    fn test_click_dispatches_to_handler() {
        let mut fretboard = standard().with_positions(vec![
            FretPosition::new(1, 3, "C").with_category(Category::Root)
        ]);
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        fretboard.set_on_note_click(move |info| sink.borrow_mut().push(info.clone()));

        let info = fretboard.click(1, 3).unwrap();
        assert_eq!(info.note, "C");
        assert_eq!(info.midi, 48);
        assert_eq!(info.category, Some(Category::Root));

        // Inactive cells and cells outside the grid do nothing
        assert!(fretboard.click(1, 4).is_none());
        assert!(fretboard.click(7, 3).is_none());
        assert!(fretboard.click(1, 30).is_none());

        assert_eq!(received.borrow().as_slice(), &[info]);
    }

    #[test]
    fn test_click_without_handler_is_ignored() {
        let mut fretboard = standard().with_positions(vec![FretPosition::new(0, 0, "E")]);
        assert!(!fretboard.grid().cell(0, 0).unwrap().clickable);
        assert!(fretboard.click(0, 0).is_none());

        fretboard.set_on_note_click(|_| {});
        assert!(fretboard.grid().cell(0, 0).unwrap().clickable);
        fretboard.clear_on_note_click();
        assert!(fretboard.click(0, 0).is_none());
    }

    #[test]
    fn test_set_positions_rebuilds_index() {
        let mut fretboard = standard().with_positions(vec![FretPosition::new(0, 3, "G")]);
        assert!(fretboard.position_at(0, 3).is_some());

        fretboard.set_positions(vec![FretPosition::new(2, 5, "G")]);
        assert!(fretboard.position_at(0, 3).is_none());
        assert!(fretboard.position_at(2, 5).is_some());
        assert!(fretboard.grid().cell(2, 5).unwrap().is_active);
    }

    #[test]
    fn test_positions_are_not_mutated() {
        let positions = vec![
            FretPosition::new(0, 1, "F").with_category("custom"),
            FretPosition::new(0, 1, "F").with_category(Category::Third),
            FretPosition::new(9, 1, "?"),
        ];
        let fretboard = standard().with_positions(positions.clone());
        let _ = fretboard.grid();
        assert_eq!(fretboard.positions(), positions.as_slice());
    }

    #[test]
    fn test_string_names() {
        let fretboard = Fretboard::new(vec![40, 45], vec!["E".to_string()]);
        assert_eq!(fretboard.string_name(0), "E");
        assert_eq!(fretboard.string_name(1), "");
        assert_eq!(fretboard.string_count(), 2);
    }

    #[test]
    fn test_options_apply_to_grid() {
        let fretboard = standard().with_options(FretboardOptions {
            start_fret: 3,
            max_frets: 7,
            ..FretboardOptions::default()
        });
        assert_eq!(fretboard.grid().column_count(), 5);
    }
}
