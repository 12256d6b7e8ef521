//! Per-line station geometry and brand colors.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::Direction;

/// Fallback theme color (Piccadilly blue) for unknown lines.
const DEFAULT_LINE_COLOR: &str = "#003688";

/// TfL brand color for a line, as a hex string.
pub fn line_color(line: &str) -> &'static str {
    match line {
        "Bakerloo" => "#B36305",
        "Central" => "#E32017",
        "Circle" => "#FFD300",
        "District" => "#00782A",
        "Hammersmith & City" => "#F3A9BB",
        "Jubilee" => "#A0A5A9",
        "Metropolitan" => "#9B0056",
        "Northern" => "#000000",
        "Piccadilly" => "#003688",
        "Victoria" => "#0098D4",
        "Waterloo & City" => "#95CDBA",
        "Elizabeth" => "#A0A5A9",
        _ => DEFAULT_LINE_COLOR,
    }
}

/// Errors loading a line geometry file.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    #[error("failed to read geometry file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse geometry file {path}: {message}")]
    Json { path: PathBuf, message: String },
}

#[derive(Debug, Deserialize)]
struct GeometryFile {
    line: String,
    stations: HashMap<String, [f64; 2]>,
}

/// Spatial layout of one line's stations.
///
/// Each station maps to a coordinate pair on the line's 0–100 physical
/// extent, one coordinate per direction of travel (platform entrances
/// sit at different ends depending on direction).
#[derive(Debug, Clone)]
pub struct LineGeometry {
    line: String,
    positions: HashMap<String, [f64; 2]>,
}

impl LineGeometry {
    /// Build a geometry from parts (tests, embedded defaults).
    pub fn from_parts(line: impl Into<String>, positions: HashMap<String, [f64; 2]>) -> Self {
        Self {
            line: line.into(),
            positions,
        }
    }

    /// Load a geometry from a JSON file of the form
    /// `{"line": "...", "stations": {"Name": [eastbound, westbound], ...}}`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GeometryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| GeometryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let file: GeometryFile =
            serde_json::from_str(&contents).map_err(|e| GeometryError::Json {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;

        Ok(Self {
            line: file.line,
            positions: file.stations,
        })
    }

    /// The line this geometry describes.
    pub fn line(&self) -> &str {
        &self.line
    }

    /// The line's brand color.
    pub fn theme_color(&self) -> &'static str {
        line_color(&self.line)
    }

    /// A station's spatial coordinate for the given travel direction.
    pub fn position(&self, station: &str, direction: Direction) -> Option<f64> {
        self.positions
            .get(station)
            .map(|pair| pair[direction.position_index()])
    }

    /// Number of stations with known positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn geometry() -> LineGeometry {
        let mut positions = HashMap::new();
        positions.insert("Acton Town".to_string(), [10.0, 90.0]);
        positions.insert("South Kensington".to_string(), [55.0, 45.0]);
        LineGeometry::from_parts("Piccadilly", positions)
    }

    #[test]
    fn position_by_direction() {
        let g = geometry();
        assert_eq!(g.position("Acton Town", Direction::Eastbound), Some(10.0));
        assert_eq!(g.position("Acton Town", Direction::Westbound), Some(90.0));
        assert_eq!(g.position("Nowhere", Direction::Eastbound), None);
    }

    #[test]
    fn theme_color_from_line() {
        assert_eq!(geometry().theme_color(), "#003688");
        assert_eq!(line_color("Central"), "#E32017");
        assert_eq!(line_color("Unknown Line"), DEFAULT_LINE_COLOR);
    }

    #[test]
    fn load_from_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("line_positions.json");
        std::fs::write(
            &path,
            r#"{"line": "Victoria", "stations": {"Brixton": [0.0, 100.0], "Oxford Circus": [48.0, 52.0]}}"#,
        )
        .unwrap();

        let g = LineGeometry::load(&path).unwrap();
        assert_eq!(g.line(), "Victoria");
        assert_eq!(g.len(), 2);
        assert_eq!(g.position("Brixton", Direction::Southbound), Some(100.0));
        assert_eq!(g.theme_color(), "#0098D4");
    }

    #[test]
    fn load_errors() {
        assert!(matches!(
            LineGeometry::load("/nonexistent/geometry.json"),
            Err(GeometryError::Io { .. })
        ));

        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            LineGeometry::load(&path),
            Err(GeometryError::Json { .. })
        ));
    }
}
