//! Travel segments between consecutive place activities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// How the traveler moves between two stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    Walk,
    Transit,
    Drive,
    Cycle,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Walk => "walk",
            TravelMode::Transit => "transit",
            TravelMode::Drive => "drive",
            TravelMode::Cycle => "cycle",
        }
    }
}

/// Warning attached to a travel segment by conflict detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentWarning {
    TightGap,
    LastTrain,
    RushHour,
}

/// The computed transition between two consecutive place activities.
///
/// Owned by the destination activity. A segment with `duration_minutes == 0`
/// and an empty path is the "calculating" placeholder: travel is not yet
/// known and the owning activity is awaiting recalculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelSegment {
    pub mode: TravelMode,
    pub duration_minutes: i64,
    pub distance_meters: f64,
    pub path: Vec<Coordinate>,
    pub instructions: Vec<String>,
    /// Arrival instant reported by the routing provider, when available.
    pub arrival_time: Option<DateTime<Utc>>,
    /// True when the segment came from the heuristic fallback rather than
    /// the routing provider.
    pub is_estimated: bool,
    pub warnings: Vec<SegmentWarning>,
}

impl TravelSegment {
    /// Placeholder for a segment whose route is not yet known.
    pub fn calculating(mode: TravelMode) -> Self {
        Self {
            mode,
            duration_minutes: 0,
            distance_meters: 0.0,
            path: Vec::new(),
            instructions: Vec::new(),
            arrival_time: None,
            is_estimated: true,
            warnings: Vec::new(),
        }
    }

    pub fn is_calculating(&self) -> bool {
        self.duration_minutes == 0 && self.path.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calculating_placeholder_roundtrips() {
        let seg = TravelSegment::calculating(TravelMode::Walk);
        assert!(seg.is_calculating());
        let json = serde_json::to_string(&seg).unwrap();
        let decoded: TravelSegment = serde_json::from_str(&json).unwrap();
        assert!(decoded.is_calculating());
    }

    #[test]
    fn mode_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TravelMode::Transit).unwrap(), "\"transit\"");
    }
}
