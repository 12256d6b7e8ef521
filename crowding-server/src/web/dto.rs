//! Request and response types for the HTTP API.

use serde::{Deserialize, Serialize};

/// Query parameters for `GET /crowding`.
#[derive(Debug, Deserialize)]
pub struct CrowdingRequest {
    /// Free-text station name (fuzzy-matched).
    pub station: String,
    /// Travel direction code: EB, WB, NB or SB.
    pub direction: String,
}

/// Response for `GET /crowding`.
#[derive(Debug, Serialize)]
pub struct CrowdingResponse {
    /// Live crowding for the queried station, as a decimal string
    /// (`"1"` when live data is unavailable).
    pub crowding: String,
    /// URL of the rendered graphic under `/static`.
    pub image_url: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crowding_request_deserializes() {
        let req: CrowdingRequest = serde_json::from_value(serde_json::json!({
            "station": "South Kensington",
            "direction": "WB",
        }))
        .unwrap();
        assert_eq!(req.station, "South Kensington");
        assert_eq!(req.direction, "WB");
    }

    #[test]
    fn crowding_response_shape() {
        let resp = CrowdingResponse {
            crowding: "0.42".to_string(),
            image_url: "/static/abc.png".to_string(),
        };
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["crowding"], "0.42");
        assert_eq!(json["image_url"], "/static/abc.png");
    }
}
