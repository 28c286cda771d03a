pub mod config;
pub mod conflicts;
pub mod optimize;
pub mod plan;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tripflow_core::{
    HeuristicRouter, HttpRoutingClient, Itinerary, NullDirectory, PlannerConfig, PlannerDeps,
    RoutingProvider, SegmentResolver,
};

/// Load an itinerary from a JSON file.
pub fn load_itinerary(path: &Path) -> Result<Itinerary, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&raw)?)
}

/// Build planner dependencies from an optional routing endpoint.
///
/// Without an endpoint everything runs on straight-line estimates.
pub fn build_deps(
    router_url: Option<&str>,
    config: PlannerConfig,
) -> Result<PlannerDeps, Box<dyn std::error::Error>> {
    let provider: Arc<dyn RoutingProvider> = match router_url {
        Some(url) => Arc::new(HttpRoutingClient::with_timeout(
            url,
            Duration::from_secs(config.routing_timeout_secs),
        )?),
        None => Arc::new(HeuristicRouter::new(config.mode_speeds)),
    };
    Ok(PlannerDeps {
        resolver: SegmentResolver::new(provider, config.mode_speeds),
        locations: Arc::new(NullDirectory),
        config,
    })
}
