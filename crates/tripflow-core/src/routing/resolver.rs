//! SegmentResolver: routing provider with heuristic fallback.

use std::sync::Arc;

use crate::config::ModeSpeeds;
use crate::itinerary::TravelSegment;

use super::{heuristic_estimate, RouteRequest, RouteResponse, RoutingProvider};

/// Resolves travel segments. Never fails: any provider failure degrades
/// to the straight-line heuristic, marked `is_estimated`.
#[derive(Clone)]
pub struct SegmentResolver {
    provider: Arc<dyn RoutingProvider>,
    speeds: ModeSpeeds,
}

impl SegmentResolver {
    pub fn new(provider: Arc<dyn RoutingProvider>, speeds: ModeSpeeds) -> Self {
        Self { provider, speeds }
    }

    /// Resolve one segment between two known coordinates.
    ///
    /// The caller is responsible for the case where a coordinate is not
    /// available at all; no result is invented here.
    pub async fn resolve(&self, request: &RouteRequest) -> TravelSegment {
        let response = match self.provider.route(request).await {
            Ok(response) => response,
            Err(e) => {
                log::debug!(
                    "routing provider failed for {} segment ({e}), using estimate",
                    request.mode.as_str()
                );
                heuristic_estimate(request.origin, request.destination, request.mode, &self.speeds)
            }
        };
        segment_from_response(request, response)
    }
}

fn segment_from_response(request: &RouteRequest, response: RouteResponse) -> TravelSegment {
    let path = if response.path.is_empty() {
        vec![request.origin, request.destination]
    } else {
        response.path
    };
    TravelSegment {
        mode: request.mode,
        duration_minutes: response.duration_minutes,
        distance_meters: response.distance_meters,
        path,
        instructions: response.instructions,
        arrival_time: response.arrival_time,
        is_estimated: response.is_estimated,
        warnings: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoutingError;
    use crate::geo::Coordinate;
    use crate::itinerary::TravelMode;
    use async_trait::async_trait;

    struct FailingProvider;

    #[async_trait]
    impl RoutingProvider for FailingProvider {
        async fn route(&self, _request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
            Err(RoutingError::Status { status: 500 })
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl RoutingProvider for FixedProvider {
        async fn route(&self, _request: &RouteRequest) -> Result<RouteResponse, RoutingError> {
            Ok(RouteResponse {
                duration_minutes: 12,
                distance_meters: 900.0,
                path: Vec::new(),
                instructions: vec!["Take the Karasuma line".to_string()],
                arrival_time: None,
                is_estimated: false,
            })
        }
    }

    fn make_test_request() -> RouteRequest {
        RouteRequest::new(
            Coordinate::new(34.9858, 135.7588),
            Coordinate::new(35.0394, 135.7292),
            TravelMode::Transit,
        )
    }

    #[tokio::test]
    async fn provider_result_is_used_verbatim() {
        let resolver = SegmentResolver::new(Arc::new(FixedProvider), ModeSpeeds::default());
        let segment = resolver.resolve(&make_test_request()).await;

        assert_eq!(segment.duration_minutes, 12);
        assert!(!segment.is_estimated);
        // Empty provider path falls back to the endpoints.
        assert_eq!(segment.path.len(), 2);
    }

    #[tokio::test]
    async fn provider_failure_degrades_to_estimate() {
        let resolver = SegmentResolver::new(Arc::new(FailingProvider), ModeSpeeds::default());
        let segment = resolver.resolve(&make_test_request()).await;

        assert!(segment.is_estimated);
        assert!(segment.duration_minutes > 0);
        assert!(segment.distance_meters > 0.0);
    }
}
