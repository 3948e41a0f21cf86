//! Constant-time lookup from a grid coordinate to a placed position.

use super::position::FretPosition;
use std::collections::HashMap;

/// Maps (string, fret) to the index of the first position placed there.
///
/// Built once per position list and queried for every cell of the grid.
/// Duplicates are not reported: the position that appears first in the
/// caller's list wins, the same result a front-to-back scan would give.
#[derive(Debug, Clone, Default)]
pub struct PositionIndex {
    by_coordinate: HashMap<(usize, u32), usize>,
}

impl PositionIndex {
    /// Builds the index over `positions`.
    pub fn build(positions: &[FretPosition]) -> Self {
        let mut by_coordinate = HashMap::with_capacity(positions.len());
        for (i, position) in positions.iter().enumerate() {
            by_coordinate
                .entry((position.string, position.fret))
                .or_insert(i);
        }
        Self { by_coordinate }
    }

    /// Returns the position at (string_index, fret), if any.
    ///
    /// `positions` must be the same slice the index was built from.
    pub fn lookup<'a>(
        &self,
        positions: &'a [FretPosition],
        string_index: usize,
        fret: u32,
    ) -> Option<&'a FretPosition> {
        self.by_coordinate
            .get(&(string_index, fret))
            .and_then(|&i| positions.get(i))
    }

    /// Number of distinct occupied coordinates.
    pub fn len(&self) -> usize {
        self.by_coordinate.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_coordinate.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fretboard::Category;

    #[test]
    fn test_lookup_hits_and_misses() {
        let positions = vec![FretPosition::new(0, 3, "G"), FretPosition::new(4, 1, "C")];
        let index = PositionIndex::build(&positions);

        assert_eq!(index.lookup(&positions, 0, 3), Some(&positions[0]));
        assert_eq!(index.lookup(&positions, 4, 1), Some(&positions[1]));
        assert_eq!(index.lookup(&positions, 0, 1), None);
        assert_eq!(index.lookup(&positions, 9, 3), None);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_duplicate_coordinates_first_wins() {
        let positions = vec![
            FretPosition::new(1, 2, "B").with_category(Category::Third),
            FretPosition::new(1, 2, "B").with_category(Category::Fifth),
        ];
        let index = PositionIndex::build(&positions);

        let found = index.lookup(&positions, 1, 2).unwrap();
        assert_eq!(found.category, Some(Category::Third));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_matches_linear_scan() {
        let positions: Vec<FretPosition> = (0..40)
            .map(|i| FretPosition::new(i % 6, (i * 7 % 13) as u32, ""))
            .collect();
        let index = PositionIndex::build(&positions);

        for string in 0..6 {
            for fret in 0..=12 {
                let scanned = positions
                    .iter()
                    .find(|p| p.string == string && p.fret == fret);
                assert_eq!(index.lookup(&positions, string, fret), scanned);
            }
        }
    }

    #[test]
    fn test_empty_index() {
        let index = PositionIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(index.lookup(&[], 0, 0), None);
    }
}
