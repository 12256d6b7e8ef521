//! On-disk types for the historical route dataset.
//!
//! One bitcode-encoded file per station, structured
//! `direction → time bucket → routes`. Routes are stored in ascending
//! route-index order; the Vec order is the stable numeric order the read
//! contract requires.

use std::collections::HashMap;

use bitcode::{Decode, Encode};

/// One historical route through the station: an ordered station-name
/// sequence and the pivot marking the query station's position.
#[derive(Debug, Clone, PartialEq, Eq, Encode, Decode)]
pub struct RouteRecord {
    /// Station display names, in travel order.
    pub stations: Vec<String>,
    /// Index of the query station within `stations`.
    pub pivot_idx: u32,
}

impl RouteRecord {
    /// The upstream sub-sequence: everything from the route's start up to
    /// and including the pivot station.
    ///
    /// Returns `None` when the pivot is out of bounds (corrupt data).
    pub fn upstream(&self) -> Option<&[String]> {
        let pivot = self.pivot_idx as usize;
        if pivot < self.stations.len() {
            Some(&self.stations[..=pivot])
        } else {
            None
        }
    }
}

/// Routes for one direction/time-bucket combination.
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct BucketHistory {
    pub routes: Vec<RouteRecord>,
}

/// All historical routes for one station, keyed by direction code
/// (`EB`, `WB`, …) then time-bucket key (`HHMM`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Encode, Decode)]
pub struct StationHistory {
    pub directions: HashMap<String, HashMap<String, BucketHistory>>,
}

impl StationHistory {
    /// Encode to bytes.
    pub fn encode(&self) -> Vec<u8> {
        bitcode::encode(self)
    }

    /// Decode from bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, bitcode::Error> {
        bitcode::decode(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(stations: &[&str], pivot: u32) -> RouteRecord {
        RouteRecord {
            stations: stations.iter().map(|s| s.to_string()).collect(),
            pivot_idx: pivot,
        }
    }

    #[test]
    fn upstream_includes_pivot() {
        let r = route(&["A", "B", "C", "D"], 2);
        assert_eq!(r.upstream().unwrap(), &["A", "B", "C"]);
    }

    #[test]
    fn upstream_at_route_start() {
        let r = route(&["A", "B"], 0);
        assert_eq!(r.upstream().unwrap(), &["A"]);
    }

    #[test]
    fn upstream_rejects_out_of_bounds_pivot() {
        let r = route(&["A", "B"], 2);
        assert!(r.upstream().is_none());
        let r = route(&[], 0);
        assert!(r.upstream().is_none());
    }

    #[test]
    fn encode_decode_roundtrip() {
        let mut buckets = HashMap::new();
        buckets.insert(
            "0930".to_string(),
            BucketHistory {
                routes: vec![route(&["A", "B", "C"], 1), route(&["X", "B", "C"], 2)],
            },
        );
        let mut directions = HashMap::new();
        directions.insert("WB".to_string(), buckets);
        let history = StationHistory { directions };

        let decoded = StationHistory::decode(&history.encode()).unwrap();
        assert_eq!(decoded, history);
        // Route order survives the roundtrip.
        let routes = &decoded.directions["WB"]["0930"].routes;
        assert_eq!(routes[0].stations[0], "A");
        assert_eq!(routes[1].stations[0], "X");
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(StationHistory::decode(&[0xff, 0x01, 0x02]).is_err());
    }
}
