//! Station identifier types.

use std::fmt;

/// NaPTAN prefix carried by London Underground station stop points.
///
/// The StopPoint listing also contains bus stops, entrances and platform
/// codes; only `940G…` codes identify a whole Tube station.
pub const TUBE_PREFIX: &str = "940G";

/// Error returned when parsing an invalid NaPTAN code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid NaPTAN code: {reason}")]
pub struct InvalidStationId {
    reason: &'static str,
}

/// A NaPTAN stop point code, e.g. `940GZZLUSKS` (South Kensington).
///
/// Codes are ASCII alphanumeric and non-empty; this type guarantees that
/// by construction. Use [`StationId::is_tube`] to check the mode prefix.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StationId(String);

impl StationId {
    /// Parse a NaPTAN code from a string.
    ///
    /// The input must be non-empty ASCII alphanumeric (uppercase letters
    /// and digits).
    pub fn parse(s: &str) -> Result<Self, InvalidStationId> {
        if s.is_empty() {
            return Err(InvalidStationId {
                reason: "must not be empty",
            });
        }

        for b in s.bytes() {
            if !(b.is_ascii_uppercase() || b.is_ascii_digit()) {
                return Err(InvalidStationId {
                    reason: "must be uppercase ASCII letters and digits",
                });
            }
        }

        Ok(StationId(s.to_string()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this code identifies a Tube station (carries the `940G`
    /// hub prefix).
    pub fn is_tube(&self) -> bool {
        self.0.starts_with(TUBE_PREFIX)
    }
}

impl fmt::Debug for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StationId({})", self.0)
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_codes() {
        assert!(StationId::parse("940GZZLUSKS").is_ok());
        assert!(StationId::parse("940GZZLUKSX").is_ok());
        assert!(StationId::parse("490000235Z").is_ok());
    }

    #[test]
    fn reject_empty() {
        assert!(StationId::parse("").is_err());
    }

    #[test]
    fn reject_lowercase_and_punctuation() {
        assert!(StationId::parse("940gzzlusks").is_err());
        assert!(StationId::parse("940G-ZZ").is_err());
        assert!(StationId::parse("940G ZZ").is_err());
    }

    #[test]
    fn tube_prefix() {
        assert!(StationId::parse("940GZZLUSKS").unwrap().is_tube());
        // A bus stop code is valid but not a Tube station
        assert!(!StationId::parse("490000235Z").unwrap().is_tube());
    }

    #[test]
    fn display_and_debug() {
        let id = StationId::parse("940GZZLUSKS").unwrap();
        assert_eq!(id.to_string(), "940GZZLUSKS");
        assert_eq!(format!("{:?}", id), "StationId(940GZZLUSKS)");
    }

    #[test]
    fn as_str_roundtrip() {
        let id = StationId::parse("940GZZLUHBN").unwrap();
        assert_eq!(id.as_str(), "940GZZLUHBN");
    }
}
