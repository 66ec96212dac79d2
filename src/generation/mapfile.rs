//! # Map Text Format
//!
//! Rooms can be written by hand as rows of space separated tile codes, top
//! row first:
//!
//! ```text
//! R R G R R
//! R C G G R
//! G G b G G
//! R G G Ag R
//! R R G R R
//! ```

use super::Room;
use crate::{ExplorerError, ExplorerResult, TileType};

/// Parses a room from map text.
///
/// Lines are trimmed, repeated spaces collapse and blank lines are skipped.
/// Every row must hold the same number of codes.
///
/// # Examples
///
/// ```
/// use world_explorer::{parse_map_text, Position, TileType};
///
/// let room = parse_map_text("R G\n\n  C  b \n").unwrap();
/// assert_eq!((room.width(), room.height()), (2, 2));
/// assert_eq!(room.get(Position::new(1, 1)), Some(TileType::Beacon { active: true }));
/// ```
pub fn parse_map_text(text: &str) -> ExplorerResult<Room> {
    let mut rows: Vec<Vec<TileType>> = Vec::new();

    for (line_number, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let row = line
            .split_whitespace()
            .map(|code| {
                TileType::from_code(code).ok_or_else(|| {
                    ExplorerError::InvalidMapFormat(format!(
                        "unknown tile code {:?} on line {}",
                        code,
                        line_number + 1
                    ))
                })
            })
            .collect::<ExplorerResult<Vec<_>>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(ExplorerError::InvalidMapFormat(format!(
                    "line {} has {} tiles, expected {}",
                    line_number + 1,
                    row.len(),
                    first.len()
                )));
            }
        }
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(ExplorerError::InvalidMapFormat("map is empty".to_string()));
    }

    Ok(Room::from_rows(rows))
}

impl Room {
    /// Prints the room in map text format, one line per row.
    pub fn to_map_text(&self) -> String {
        let mut text = String::with_capacity(self.width() * self.height() * 3);
        for row in 0..self.height() {
            let line: Vec<&str> = (0..self.width())
                .map(|column| self.tile_at(column, row).code())
                .collect();
            text.push_str(&line.join(" "));
            text.push('\n');
        }
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, PreciousStone};

    const SAMPLE: &str = "
        R R G R R
        R C G G R
        G G b G G
        R G G Ag R
        R R G R R
    ";

    #[test]
    fn test_parse_sample() {
        let room = parse_map_text(SAMPLE).unwrap();
        assert_eq!(room.width(), 5);
        assert_eq!(room.height(), 5);
        assert_eq!(room.get(Position::new(2, 2)), Some(TileType::Beacon { active: true }));
        assert_eq!(room.get(Position::new(1, 1)), Some(TileType::Crystal));
        assert_eq!(
            room.get(Position::new(3, 3)),
            Some(TileType::Stone(PreciousStone::Agate))
        );
    }

    #[test]
    fn test_print_then_parse() {
        let room = parse_map_text(SAMPLE).unwrap();
        let text = room.to_map_text();
        assert!(text.starts_with("R R G R R\n"));
        assert_eq!(parse_map_text(&text).unwrap(), room);
    }

    #[test]
    fn test_double_spaces_collapse() {
        let room = parse_map_text("R  G   C").unwrap();
        assert_eq!(room.width(), 3);
    }

    #[test]
    fn test_unknown_code() {
        let err = parse_map_text("R G\nR X").unwrap_err();
        assert!(matches!(err, ExplorerError::InvalidMapFormat(msg) if msg.contains("\"X\"")));
    }

    #[test]
    fn test_ragged_rows() {
        assert!(matches!(
            parse_map_text("R G R\nR G"),
            Err(ExplorerError::InvalidMapFormat(_))
        ));
    }

    #[test]
    fn test_empty_map() {
        assert!(parse_map_text("\n   \n").is_err());
    }
}
