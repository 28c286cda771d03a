//! One planning run: optimize, resolve segments, build timelines, detect
//! conflicts.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::task::JoinSet;

use crate::conflict::ConflictDetector;
use crate::error::PlanningError;
use crate::geo::Coordinate;
use crate::itinerary::{Day, Itinerary, TravelMode, TravelSegment};
use crate::locations::CoordinateResolver;
use crate::optimizer::optimize_day;
use crate::routing::RouteRequest;
use crate::timeline::{build_day_timeline, effective_day_start};

use super::diff::{reusable_segments, SegmentKey};
use super::{PlannedItinerary, PlannerDeps};

/// Per-invocation planning options.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanOptions {
    /// Bypass the route optimizer, e.g. right after a manual drag so the
    /// heuristic does not fight the user's ordering.
    pub suppress_optimization: bool,
}

/// Plan an itinerary once, outside the orchestrator.
///
/// Existing resolved segments are reused where their adjacency survives;
/// everything else is resolved fresh.
pub async fn plan_itinerary(
    itinerary: Itinerary,
    options: PlanOptions,
    deps: &PlannerDeps,
) -> Result<PlannedItinerary, PlanningError> {
    let prior = itinerary.clone();
    execute(itinerary, &prior, options, deps).await
}

/// Run the full pipeline over a snapshot. `prior` is the previously
/// published plan, mined for reusable travel segments.
pub(crate) async fn execute(
    mut itinerary: Itinerary,
    prior: &Itinerary,
    options: PlanOptions,
    deps: &PlannerDeps,
) -> Result<PlannedItinerary, PlanningError> {
    let coordinate_resolver = CoordinateResolver::new(Arc::clone(&deps.locations));
    let detector = ConflictDetector::new(&deps.config);

    for day in itinerary.days.iter_mut() {
        plan_day(day, prior.day(&day.id), &coordinate_resolver, options, deps).await?;
        detector.stamp_segment_warnings(day);
    }

    let conflicts = detector.detect(&itinerary);
    Ok(PlannedItinerary {
        itinerary,
        conflicts,
    })
}

async fn plan_day(
    day: &mut Day,
    prior_day: Option<&Day>,
    coordinate_resolver: &CoordinateResolver,
    options: PlanOptions,
    deps: &PlannerDeps,
) -> Result<(), PlanningError> {
    // Mine the previous plan before wiping computed state.
    let reusable = prior_day.map(reusable_segments).unwrap_or_default();

    for activity in day.activities.iter_mut() {
        activity.clear_computed();
    }

    let mut coordinates: HashMap<String, Coordinate> = HashMap::new();
    for activity in &day.activities {
        if let Some(coordinate) = coordinate_resolver.resolve(activity).await {
            coordinates.insert(activity.id.clone(), coordinate);
        }
    }

    if !options.suppress_optimization {
        let optimized = optimize_day(&day.activities, day.start_coordinate, &coordinates);
        if optimized.order_changed {
            day.apply_order(&optimized.order);
        }
    }

    resolve_day_segments(day, &reusable, &coordinates, deps).await?;
    build_day_timeline(day, &deps.config);
    Ok(())
}

enum Decision {
    Reuse(TravelSegment),
    Fetch(RouteRequest),
    Placeholder(TravelMode),
}

/// Fill `travel_from_previous` for each place with a preceding place.
///
/// Unchanged adjacencies reuse the prior plan's segment; pairs with both
/// coordinates known are resolved concurrently; anything else gets the
/// calculating placeholder and is marked awaiting recalculation.
async fn resolve_day_segments(
    day: &mut Day,
    reusable: &HashMap<SegmentKey, TravelSegment>,
    coordinates: &HashMap<String, Coordinate>,
    deps: &PlannerDeps,
) -> Result<(), PlanningError> {
    let departure_hint = effective_day_start(day, &deps.config);

    let mut decisions: Vec<(usize, Decision)> = Vec::new();
    let mut previous: Option<(String, Option<Coordinate>)> = None;
    for (index, activity) in day.activities.iter().enumerate() {
        if !activity.is_place() {
            continue;
        }
        let this_coordinate = coordinates.get(&activity.id).copied();
        if let Some((from_id, from_coordinate)) = &previous {
            let mode = activity.mode_override().unwrap_or(day.default_mode);
            let key = SegmentKey {
                from: from_id.clone(),
                to: activity.id.clone(),
                mode,
            };
            let decision = if let Some(segment) = reusable.get(&key) {
                Decision::Reuse(segment.clone())
            } else if let (Some(origin), Some(destination)) = (from_coordinate, this_coordinate) {
                Decision::Fetch(
                    RouteRequest::new(*origin, destination, mode)
                        .with_departure(departure_hint, day.timezone.clone()),
                )
            } else {
                Decision::Placeholder(mode)
            };
            decisions.push((index, decision));
        }
        previous = Some((activity.id.clone(), this_coordinate));
    }

    let mut fetches = JoinSet::new();
    for (index, decision) in decisions {
        match decision {
            Decision::Reuse(segment) => {
                day.activities[index].travel_from_previous = Some(segment);
            }
            Decision::Placeholder(mode) => {
                day.activities[index].travel_from_previous =
                    Some(TravelSegment::calculating(mode));
                day.activities[index].awaiting_recalculation = true;
            }
            Decision::Fetch(request) => {
                let resolver = deps.resolver.clone();
                fetches.spawn(async move { (index, resolver.resolve(&request).await) });
            }
        }
    }

    while let Some(joined) = fetches.join_next().await {
        match joined {
            Ok((index, segment)) => {
                day.activities[index].travel_from_previous = Some(segment);
            }
            Err(e) => return Err(PlanningError::Internal(e.to_string())),
        }
    }
    Ok(())
}
