//! Travel segment resolution.
//!
//! This module owns the contract with the external routing provider and
//! the degradation ladder around it:
//! - `HttpRoutingClient` talks to the provider over HTTP
//! - `heuristic_estimate` is the straight-line fallback
//! - `SegmentResolver` combines the two and never fails

mod client;
mod heuristic;
mod resolver;

pub use client::HttpRoutingClient;
pub use heuristic::{heuristic_estimate, HeuristicRouter};
pub use resolver::SegmentResolver;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RoutingError;
use crate::geo::Coordinate;
use crate::itinerary::TravelMode;

/// Request to the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub mode: TravelMode,
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub timezone: Option<String>,
}

impl RouteRequest {
    pub fn new(origin: Coordinate, destination: Coordinate, mode: TravelMode) -> Self {
        Self {
            origin,
            destination,
            mode,
            departure_time: None,
            timezone: None,
        }
    }

    pub fn with_departure(mut self, at: DateTime<Utc>, timezone: Option<String>) -> Self {
        self.departure_time = Some(at);
        self.timezone = timezone;
        self
    }
}

/// Response from the routing provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteResponse {
    pub duration_minutes: i64,
    pub distance_meters: f64,
    #[serde(default)]
    pub path: Vec<Coordinate>,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub arrival_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_estimated: bool,
}

/// External routing collaborator.
#[async_trait]
pub trait RoutingProvider: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<RouteResponse, RoutingError>;
}
