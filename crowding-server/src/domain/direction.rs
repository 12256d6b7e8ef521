//! Travel direction along a line.

use std::fmt;

/// Error returned when parsing an invalid direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction: {input} (expected EB, WB, NB or SB)")]
pub struct InvalidDirection {
    input: String,
}

/// Travel direction, as used by the historical dataset keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Eastbound,
    Westbound,
    Northbound,
    Southbound,
}

impl Direction {
    /// Parse a direction code (`EB`, `WB`, `NB`, `SB`, case-insensitive).
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s.to_ascii_uppercase().as_str() {
            "EB" => Ok(Direction::Eastbound),
            "WB" => Ok(Direction::Westbound),
            "NB" => Ok(Direction::Northbound),
            "SB" => Ok(Direction::Southbound),
            _ => Err(InvalidDirection {
                input: s.to_string(),
            }),
        }
    }

    /// The dataset key for this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Eastbound => "EB",
            Direction::Westbound => "WB",
            Direction::Northbound => "NB",
            Direction::Southbound => "SB",
        }
    }

    /// Which of a station's two spatial coordinates applies.
    ///
    /// Each station carries a coordinate pair, one per direction of travel
    /// along the line's physical extent. Westbound and southbound services
    /// use the second entry.
    pub fn position_index(&self) -> usize {
        match self {
            Direction::Westbound | Direction::Southbound => 1,
            Direction::Eastbound | Direction::Northbound => 0,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_all_codes() {
        assert_eq!(Direction::parse("EB").unwrap(), Direction::Eastbound);
        assert_eq!(Direction::parse("WB").unwrap(), Direction::Westbound);
        assert_eq!(Direction::parse("NB").unwrap(), Direction::Northbound);
        assert_eq!(Direction::parse("SB").unwrap(), Direction::Southbound);
    }

    #[test]
    fn parse_case_insensitive() {
        assert_eq!(Direction::parse("wb").unwrap(), Direction::Westbound);
        assert_eq!(Direction::parse("Eb").unwrap(), Direction::Eastbound);
    }

    #[test]
    fn reject_unknown() {
        assert!(Direction::parse("").is_err());
        assert!(Direction::parse("UP").is_err());
        assert!(Direction::parse("EAST").is_err());
    }

    #[test]
    fn position_index_by_direction() {
        assert_eq!(Direction::Eastbound.position_index(), 0);
        assert_eq!(Direction::Northbound.position_index(), 0);
        assert_eq!(Direction::Westbound.position_index(), 1);
        assert_eq!(Direction::Southbound.position_index(), 1);
    }

    #[test]
    fn display_roundtrip() {
        for code in ["EB", "WB", "NB", "SB"] {
            assert_eq!(Direction::parse(code).unwrap().to_string(), code);
        }
    }
}
