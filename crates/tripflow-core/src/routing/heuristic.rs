//! Straight-line travel estimate, the fallback when the routing provider
//! is unavailable.

use async_trait::async_trait;

use crate::config::ModeSpeeds;
use crate::error::RoutingError;
use crate::geo::{haversine_distance_meters, Coordinate};
use crate::itinerary::TravelMode;

use super::{RouteRequest, RouteResponse, RoutingProvider};

/// Estimate travel as straight-line distance over a per-mode average speed.
///
/// The result is always marked `is_estimated` and its path is just the
/// two endpoints.
pub fn heuristic_estimate(
    origin: Coordinate,
    destination: Coordinate,
    mode: TravelMode,
    speeds: &ModeSpeeds,
) -> RouteResponse {
    let distance_meters = haversine_distance_meters(&origin, &destination);
    let speed_kmh = speeds.speed_for(mode).max(0.1);
    let minutes = (distance_meters / 1000.0 / speed_kmh * 60.0).ceil() as i64;
    let duration_minutes = if distance_meters > 0.0 { minutes.max(1) } else { 0 };

    RouteResponse {
        duration_minutes,
        distance_meters,
        path: vec![origin, destination],
        instructions: Vec::new(),
        arrival_time: None,
        is_estimated: true,
    }
}

/// Provider that answers every request with the heuristic estimate.
///
/// Used when no routing endpoint is configured, and as a deterministic
/// stand-in for tests.
pub struct HeuristicRouter {
    speeds: ModeSpeeds,
}

impl HeuristicRouter {
    pub fn new(speeds: ModeSpeeds) -> Self {
        Self { speeds }
    }
}

#[async_trait]
impl RoutingProvider for HeuristicRouter {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
        Ok(heuristic_estimate(
            request.origin,
            request.destination,
            request.mode,
            &self.speeds,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walking_is_slower_than_driving() {
        let speeds = ModeSpeeds::default();
        let a = Coordinate::new(35.0116, 135.7681);
        let b = Coordinate::new(35.0394, 135.7292);

        let walk = heuristic_estimate(a, b, TravelMode::Walk, &speeds);
        let drive = heuristic_estimate(a, b, TravelMode::Drive, &speeds);

        assert!(walk.is_estimated);
        assert!(walk.duration_minutes > drive.duration_minutes);
        assert_eq!(walk.distance_meters, drive.distance_meters);
    }

    #[test]
    fn zero_distance_takes_no_time() {
        let speeds = ModeSpeeds::default();
        let p = Coordinate::new(10.0, 10.0);
        let estimate = heuristic_estimate(p, p, TravelMode::Walk, &speeds);
        assert_eq!(estimate.duration_minutes, 0);
    }

    #[test]
    fn nonzero_distance_takes_at_least_a_minute() {
        let speeds = ModeSpeeds::default();
        let a = Coordinate::new(10.0, 10.0);
        let b = Coordinate::new(10.0001, 10.0001);
        let estimate = heuristic_estimate(a, b, TravelMode::Drive, &speeds);
        assert!(estimate.duration_minutes >= 1);
    }
}
