//! fretui - A terminal fretboard diagram.
//!
//! The core is usable without the terminal: [`pitch`] does note and interval
//! arithmetic, and [`fretboard`] turns a tuning plus placed notes into a grid
//! of labelled, coloured cells.

pub mod app;
pub mod config;
pub mod error;
pub mod fretboard;
pub mod pitch;
pub mod ui;

// Re-export commonly used types
pub use app::App;
pub use config::FretboardConfig;
pub use error::ConfigError;
pub use fretboard::{
    Category, Cell, DisplayMode, FretPosition, Fretboard, FretboardOptions, GlowCategory, Grid,
    NoteClickInfo,
};
pub use pitch::{get_interval_label, get_note_at_fret, midi_to_note_name, normalize_note};
