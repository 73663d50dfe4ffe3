//! Parsed puzzle definitions and the JSONL level loader.
//!
//! A level file holds one JSON object per line:
//! `{"id": 3, "size": 2, "color_regions": [["A", "B"], ["A", "B"]]}`.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::Deserialize;

use crate::error::Error;

/// A puzzle definition: an id, the board side length, and the per-cell
/// region letters.
#[derive(Debug, Clone, Deserialize)]
pub struct Level {
    pub id: u32,
    pub size: usize,
    pub color_regions: Vec<Vec<char>>,
}

impl Level {
    /// Builds a level from string rows, one character per cell.
    ///
    /// Convenient for fixtures and benchmarks; the board constructor still
    /// validates the tokens and the shape.
    pub fn from_rows(id: u32, rows: &[&str]) -> Self {
        Level {
            id,
            size: rows.len(),
            color_regions: rows.iter().map(|row| row.chars().collect()).collect(),
        }
    }
}

/// Loads every level from a JSONL file, sorted by id.
///
/// Blank lines are skipped. A line that fails to parse aborts the load with
/// [`Error::InvalidLevel`] naming the offending line.
pub fn load_levels(path: &Path) -> Result<Vec<Level>, Error> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut levels = Vec::new();
    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        let level: Level = serde_json::from_str(text).map_err(|err| Error::InvalidLevel {
            reason: format!("{}:{}: {}", path.display(), line_number + 1, err),
        })?;
        levels.push(level);
    }

    levels.sort_by_key(|level| level.id);
    Ok(levels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jsonl_record() {
        let text = r#"{"id": 7, "size": 2, "color_regions": [["A", "b"], ["a", "B"]]}"#;
        let level: Level = serde_json::from_str(text).unwrap();
        assert_eq!(level.id, 7);
        assert_eq!(level.size, 2);
        assert_eq!(level.color_regions, vec![vec!['A', 'b'], vec!['a', 'B']]);
    }

    #[test]
    fn test_from_rows() {
        let level = Level::from_rows(1, &["AAB", "ACB", "CCB"]);
        assert_eq!(level.size, 3);
        assert_eq!(level.color_regions[1], vec!['A', 'C', 'B']);
    }
}
