//! Geographic primitives.
//!
//! Coordinates are plain WGS84 lat/lng pairs. Distances are computed with
//! the haversine formula, which is accurate enough for intra-city
//! itinerary estimates.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in meters.
const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Straight-line (great-circle) distance to another coordinate, in meters.
    pub fn distance_meters(&self, other: &Coordinate) -> f64 {
        haversine_distance_meters(self, other)
    }
}

/// Great-circle distance between two coordinates, in meters.
pub fn haversine_distance_meters(a: &Coordinate, b: &Coordinate) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_M * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_distance_to_self() {
        let p = Coordinate::new(35.0116, 135.7681); // Kyoto
        assert_eq!(haversine_distance_meters(&p, &p), 0.0);
    }

    #[test]
    fn kyoto_station_to_kinkakuji() {
        let station = Coordinate::new(34.9858, 135.7588);
        let kinkakuji = Coordinate::new(35.0394, 135.7292);
        let d = haversine_distance_meters(&station, &kinkakuji);
        // Roughly 6.5 km as the crow flies.
        assert!((6_000.0..7_000.0).contains(&d), "unexpected distance {d}");
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Coordinate::new(48.8584, 2.2945);
        let b = Coordinate::new(48.8606, 2.3376);
        let ab = haversine_distance_meters(&a, &b);
        let ba = haversine_distance_meters(&b, &a);
        assert!((ab - ba).abs() < 1e-9);
    }
}
