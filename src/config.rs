//! Fretboard descriptions loaded from JSON.
//!
//! A description holds everything needed to draw a fretboard: the tuning,
//! optional string labels, the placed notes, and the display options. Only
//! the tuning is required.

use crate::error::ConfigError;
use crate::fretboard::{
    Category, DisplayMode, FretPosition, Fretboard, FretboardOptions, MAX_FRET_LIMIT,
};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Standard six-string guitar tuning, low E to high E.
pub const STANDARD_TUNING: [i32; 6] = [40, 45, 50, 55, 59, 64];

/// A complete fretboard description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FretboardConfig {
    /// Open-string MIDI pitches.
    pub tuning: Vec<i32>,

    #[serde(default)]
    pub string_names: Vec<String>,

    #[serde(default)]
    pub positions: Vec<FretPosition>,

    #[serde(flatten)]
    pub options: FretboardOptions,
}

impl FretboardConfig {
    /// The built-in demo: an open C major chord in standard tuning.
    pub fn demo() -> Self {
        Self {
            tuning: STANDARD_TUNING.to_vec(),
            string_names: ["E", "A", "D", "G", "B", "e"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            positions: vec![
                FretPosition::new(1, 3, "C")
                    .with_root(true)
                    .with_category(Category::Root),
                FretPosition::new(2, 2, "E").with_category(Category::Third),
                FretPosition::new(3, 0, "G").with_category(Category::Fifth),
                FretPosition::new(4, 1, "C")
                    .with_root(true)
                    .with_category(Category::Root),
                FretPosition::new(5, 0, "E").with_category(Category::Third),
            ],
            options: FretboardOptions {
                root_note: Some("C".to_string()),
                ..FretboardOptions::default()
            },
        }
    }

    /// Parses a description from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        config.cap_max_frets();
        config.warn_on_suspicious_values();
        Ok(config)
    }

    /// Loads a description from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid description
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            strings = config.tuning.len(),
            positions = config.positions.len(),
            "loaded fretboard description"
        );
        Ok(config)
    }

    fn cap_max_frets(&mut self) {
        if self.options.max_frets > MAX_FRET_LIMIT {
            tracing::warn!(
                max_frets = self.options.max_frets,
                limit = MAX_FRET_LIMIT,
                "max frets is above the limit; capping"
            );
            self.options.max_frets = MAX_FRET_LIMIT;
        }
    }

    /// Logs values that load fine but render oddly.
    fn warn_on_suspicious_values(&self) {
        if self.tuning.is_empty() {
            tracing::warn!("tuning is empty; no strings will be shown");
        }
        if self.options.start_fret > self.options.max_frets {
            tracing::warn!(
                start_fret = self.options.start_fret,
                max_frets = self.options.max_frets,
                "start fret is above max frets; no fret columns will be shown"
            );
        }
        if !self.string_names.is_empty() && self.string_names.len() != self.tuning.len() {
            tracing::warn!(
                names = self.string_names.len(),
                strings = self.tuning.len(),
                "string name count does not match the tuning"
            );
        }
    }

    /// Builds the fretboard this description describes.
    pub fn into_fretboard(self) -> Fretboard {
        Fretboard::new(self.tuning, self.string_names)
            .with_positions(self.positions)
            .with_options(self.options)
    }
}

/// Option values given on the command line, applied over a description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub display_mode: Option<DisplayMode>,
    pub root_note: Option<String>,
    pub start_fret: Option<u32>,
    pub max_frets: Option<u32>,
    pub scroll_to_fret: Option<u32>,
    pub hide_fret_numbers: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, options: &mut FretboardOptions) {
        if let Some(mode) = self.display_mode {
            options.display_mode = mode;
        }
        if let Some(root) = &self.root_note {
            options.root_note = Some(root.clone());
        }
        if let Some(start) = self.start_fret {
            options.start_fret = start;
        }
        if let Some(max) = self.max_frets {
            options.max_frets = max.min(MAX_FRET_LIMIT);
        }
        if let Some(fret) = self.scroll_to_fret {
            options.scroll_to_fret = Some(fret);
        }
        if self.hide_fret_numbers {
            options.show_fret_numbers = false;
        }
    }
}

/// Parses a fret number given for `option`.
pub fn parse_fret(option: &str, value: &str) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidArgument {
            option: option.to_string(),
            value: value.to_string(),
        })
}
