//! # Tripflow Core Library
//!
//! This library provides the itinerary planning and travel-time
//! scheduling engine for Tripflow. It implements a CLI-first philosophy
//! where the whole engine is drivable from a standalone CLI binary, with
//! any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Planner**: a debounced, cancellable orchestrator that reacts to
//!   user edits and publishes settled plans
//! - **Routing**: travel-segment resolution against an external provider,
//!   with a straight-line heuristic fallback
//! - **Optimizer**: greedy nearest-neighbor reordering of a day's stops
//! - **Timeline**: sequential arrival/departure propagation through a day
//! - **Conflicts**: read-only detection of overlaps, tight gaps, hours
//!   violations and transit warnings
//!
//! ## Key Components
//!
//! - [`Planner`]: the orchestration state machine
//! - [`SegmentResolver`]: routing provider + heuristic fallback
//! - [`ConflictDetector`]: scheduling problem detection
//! - [`PlannerConfig`]: every tunable of the engine

pub mod config;
pub mod conflict;
pub mod error;
pub mod events;
pub mod geo;
pub mod itinerary;
pub mod locations;
pub mod optimizer;
pub mod planner;
pub mod routing;
pub mod timeline;

pub use config::{CategoryDurations, ModeSpeeds, PlannerConfig, TimeWindow};
pub use conflict::{Conflict, ConflictCategory, ConflictDetector, Severity};
pub use error::{ConfigError, CoreError, PlanningError, Result, RoutingError, ValidationError};
pub use events::Event;
pub use geo::Coordinate;
pub use itinerary::{
    Activity, ActivityKind, Day, Itinerary, OperatingHours, PlaceCategory, Schedule,
    SegmentWarning, TravelMode, TravelSegment,
};
pub use locations::{CoordinateResolver, LocationDirectory, NullDirectory};
pub use optimizer::{optimize_day, OptimizedOrder};
pub use planner::{
    plan_itinerary, Edit, PlanOptions, PlannedItinerary, Planner, PlannerDeps, PlannerSnapshot,
    PlannerState,
};
pub use routing::{
    heuristic_estimate, HeuristicRouter, HttpRoutingClient, RouteRequest, RouteResponse,
    RoutingProvider, SegmentResolver,
};
pub use timeline::{build_day_timeline, effective_day_start};
