//! TfL API payload types and the crowding sample domain type.

use serde::Deserialize;

/// Raw live-crowding payload from `/crowding/{naptan}/Live`.
///
/// Absent fields are treated as unavailable data rather than errors.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveCrowdingDto {
    #[serde(default)]
    pub data_available: bool,
    #[serde(default)]
    pub percentage_of_baseline: Option<f64>,
}

/// A live crowding observation for a station.
///
/// Consumed as a multiplicative weight: an unavailable sample weighs
/// `1.0` (neutral), so missing live data leaves the historical model
/// untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CrowdingSample {
    /// Crowding as a fraction of the station's baseline (≥ 0).
    Available(f64),
    /// No live data; treat as neutral.
    Unavailable,
}

impl CrowdingSample {
    /// The multiplicative weight this sample contributes.
    pub fn weight(&self) -> f64 {
        match self {
            CrowdingSample::Available(v) => *v,
            CrowdingSample::Unavailable => 1.0,
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CrowdingSample::Available(_))
    }
}

impl From<LiveCrowdingDto> for CrowdingSample {
    fn from(dto: LiveCrowdingDto) -> Self {
        match (dto.data_available, dto.percentage_of_baseline) {
            (true, Some(v)) if v >= 0.0 && v.is_finite() => CrowdingSample::Available(v),
            _ => CrowdingSample::Unavailable,
        }
    }
}
