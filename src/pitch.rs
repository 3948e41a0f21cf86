//! Pitch arithmetic for fretboard labels.
//!
//! Everything here is a pure function over constant tables: pitch-class
//! naming, enharmonic normalization, and interval labels relative to a root.

/// Canonical pitch-class names, indexed by semitone above C.
/// Sharps are preferred over flats.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Interval labels indexed by semitone distance from the root.
pub const INTERVAL_LABELS: [&str; 12] = [
    "R", "\u{266D}2", "2", "\u{266D}3", "3", "4", "\u{266D}5", "5", "\u{266D}6", "6", "\u{266D}7",
    "7",
];

/// Alternate spellings and the canonical name each one denotes.
///
/// Canonical names are absent: they already normalize to themselves.
pub const ENHARMONIC_MAP: [(&str, &str); 23] = [
    // Flats
    ("Cb", "B"),
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Fb", "E"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
    // Sharps that land on a natural
    ("E#", "F"),
    ("B#", "C"),
    // Double sharps
    ("C##", "D"),
    ("D##", "E"),
    ("E##", "F#"),
    ("F##", "G"),
    ("G##", "A"),
    ("A##", "B"),
    ("B##", "C#"),
    // Double flats
    ("Cbb", "A#"),
    ("Dbb", "C"),
    ("Ebb", "D"),
    ("Fbb", "D#"),
    ("Gbb", "F"),
    ("Abb", "G"),
    ("Bbb", "A"),
];

/// Normalizes a note spelling to its canonical pitch-class name.
///
/// Trailing octave digits are stripped first ("Bb3" becomes "Bb"). Spellings
/// that are not in the enharmonic table are returned as-is, so unknown input
/// passes through untouched.
///
/// # Examples
///
/// ```
/// use fretui::pitch::normalize_note;
///
/// assert_eq!(normalize_note("Bb"), "A#");
/// assert_eq!(normalize_note("C##4"), "D");
/// assert_eq!(normalize_note("H"), "H");
/// ```
pub fn normalize_note(note: &str) -> &str {
    let pitch_class = note.trim_end_matches(|c: char| c.is_ascii_digit());
    ENHARMONIC_MAP
        .iter()
        .find(|(spelling, _)| *spelling == pitch_class)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(pitch_class)
}

/// Returns the index of a note in [`NOTE_NAMES`] after normalization.
///
/// # Returns
///
/// The pitch class (0-11), or None if the spelling is not recognized
pub fn pitch_class_of(note: &str) -> Option<usize> {
    let normalized = normalize_note(note);
    NOTE_NAMES.iter().position(|&name| name == normalized)
}

/// Converts a MIDI pitch to its canonical pitch-class name (no octave).
///
/// Negative input wraps with a Euclidean modulo, so -1 is "B".
///
/// # Examples
///
/// ```
/// use fretui::pitch::midi_to_note_name;
///
/// assert_eq!(midi_to_note_name(40), "E");
/// assert_eq!(midi_to_note_name(-1), "B");
/// ```
pub fn midi_to_note_name(midi: i32) -> &'static str {
    NOTE_NAMES[midi.rem_euclid(12) as usize]
}

/// Returns the note sounding at `fret` on a string tuned to `string_midi`.
pub fn get_note_at_fret(string_midi: i32, fret: u32) -> &'static str {
    midi_to_note_name(string_midi.saturating_add_unsigned(fret))
}

/// Labels `note` by its interval above `root_note`.
///
/// Both inputs are normalized before comparison. If either one is not a
/// recognized spelling, `note` itself is returned instead of a label.
///
/// # Examples
///
/// ```
/// use fretui::pitch::get_interval_label;
///
/// assert_eq!(get_interval_label("G", "C"), "5");
/// assert_eq!(get_interval_label("Eb", "C"), "\u{266D}3");
/// assert_eq!(get_interval_label("X", "C"), "X");
/// ```
pub fn get_interval_label<'a>(note: &'a str, root_note: &str) -> &'a str {
    match (pitch_class_of(note), pitch_class_of(root_note)) {
        (Some(note_index), Some(root_index)) => {
            INTERVAL_LABELS[(note_index + 12 - root_index) % 12]
        }
        _ => note,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_midi_to_note_name() {
        assert_eq!(midi_to_note_name(60), "C");
        assert_eq!(midi_to_note_name(69), "A");
        assert_eq!(midi_to_note_name(40), "E");
        assert_eq!(midi_to_note_name(0), "C");
        assert_eq!(midi_to_note_name(-12), "C");
        assert_eq!(midi_to_note_name(-11), "C#");
    }

    #[test]
    fn test_octave_periodicity() {
        for midi in -48..=160 {
            let name = midi_to_note_name(midi);
            assert_eq!(name, midi_to_note_name(midi + 12));
            assert!(NOTE_NAMES.contains(&name));
        }
    }

    #[test]
    fn test_note_at_fret_standard_tuning() {
        let tuning = [40, 45, 50, 55, 59, 64];
        let open: Vec<&str> = tuning.iter().map(|&m| get_note_at_fret(m, 0)).collect();
        assert_eq!(open, ["E", "A", "D", "G", "B", "E"]);
        assert_eq!(get_note_at_fret(40, 3), "G");
        assert_eq!(get_note_at_fret(40, 12), "E");
        assert_eq!(get_note_at_fret(59, 1), "C");
    }

    #[test]
    fn test_normalize_note() {
        assert_eq!(normalize_note("Bb"), "A#");
        assert_eq!(normalize_note("C##"), "D");
        assert_eq!(normalize_note("Cbb"), "A#");
        assert_eq!(normalize_note("E#"), "F");
        assert_eq!(normalize_note("F#"), "F#");
        assert_eq!(normalize_note("A"), "A");
        assert_eq!(normalize_note("Eb5"), "D#");
        assert_eq!(normalize_note("G10"), "G");
        // Unknown spellings pass through (octave digits are still dropped)
        assert_eq!(normalize_note("Hb"), "Hb");
        assert_eq!(normalize_note("X2"), "X");
        assert_eq!(normalize_note(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let inputs = ["Bb", "C##", "Dbb3", "F#", "E#", "zz", "12", "C-1", "A##9", ""];
        for input in inputs
            .iter()
            .copied()
            .chain(ENHARMONIC_MAP.iter().map(|(s, _)| *s))
            .chain(NOTE_NAMES.iter().copied())
        {
            let once = normalize_note(input);
            assert_eq!(normalize_note(once), once, "input {input:?}");
        }
    }

    #[test]
    fn test_enharmonic_map_targets_are_canonical() {
        for (spelling, canonical) in ENHARMONIC_MAP {
            assert!(
                NOTE_NAMES.contains(&canonical),
                "{spelling} maps to non-canonical {canonical}"
            );
            assert!(!NOTE_NAMES.contains(&spelling));
        }
    }

    #[test]
    fn test_interval_labels() {
        assert_eq!(get_interval_label("G", "C"), "5");
        assert_eq!(get_interval_label("E", "C"), "3");
        assert_eq!(get_interval_label("C", "G"), "4");
        assert_eq!(get_interval_label("B", "C"), "7");
        assert_eq!(get_interval_label("Bb", "C"), "\u{266D}7");
        assert_eq!(get_interval_label("F#", "C"), "\u{266D}5");
        assert_eq!(get_interval_label("Db3", "C4"), "\u{266D}2");
    }

    #[test]
    fn test_interval_label_root_of_itself() {
        for name in NOTE_NAMES {
            assert_eq!(get_interval_label(name, name), "R");
        }
        for (spelling, canonical) in ENHARMONIC_MAP {
            assert_eq!(get_interval_label(spelling, spelling), "R");
            assert_eq!(get_interval_label(spelling, canonical), "R");
        }
    }

    #[test]
    fn test_interval_label_octave_up_is_root() {
        for pitch in 28..=76 {
            for fret in 0..=24 {
                let note = get_note_at_fret(pitch, fret);
                let octave_up = get_note_at_fret(pitch, fret + 12);
                assert_eq!(get_interval_label(note, octave_up), "R");
            }
        }
    }

    #[test]
    fn test_interval_label_unknown_falls_back_to_note() {
        assert_eq!(get_interval_label("H", "C"), "H");
        assert_eq!(get_interval_label("G", "nope"), "G");
        assert_eq!(get_interval_label("", ""), "");
    }

    #[test]
    fn test_pitch_class_of() {
        assert_eq!(pitch_class_of("C"), Some(0));
        assert_eq!(pitch_class_of("Bb2"), Some(10));
        assert_eq!(pitch_class_of("B#"), Some(0));
        assert_eq!(pitch_class_of("Q"), None);
    }
}
