//! Route optimizer: greedy nearest-neighbor reordering of a day's stops.
//!
//! Best-effort reduction of total straight-line travel, not a minimal
//! tour. Notes never move on their own: each one stays pinned behind the
//! place it followed before optimization. The whole pass is skippable per
//! invocation so it does not fight an explicit manual reorder.

use std::collections::HashMap;

use crate::geo::{haversine_distance_meters, Coordinate};
use crate::itinerary::Activity;

/// Result of one optimization pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptimizedOrder {
    /// Activity ids in visiting order.
    pub order: Vec<String>,
    pub order_changed: bool,
}

/// A place with a resolved coordinate plus the non-place activities
/// pinned behind it.
struct Stop {
    indices: Vec<usize>,
    coordinate: Coordinate,
}

/// Reorder a day's stops to reduce total travel.
///
/// `start` is the fixed anchor (accommodation or trip entry point); when
/// absent the first resolvable place anchors the tour and never moves.
/// `coordinates` maps activity ids to resolved coordinates; places missing
/// from it are treated like notes and keep their slot. Ties break on
/// original list position, so the pass is deterministic and idempotent.
pub fn optimize_day(
    activities: &[Activity],
    start: Option<Coordinate>,
    coordinates: &HashMap<String, Coordinate>,
) -> OptimizedOrder {
    let original: Vec<String> = activities.iter().map(|a| a.id.clone()).collect();

    // Group into movable stops; anything without a coordinate is pinned
    // behind the stop it currently follows.
    let mut leading: Vec<usize> = Vec::new();
    let mut stops: Vec<Stop> = Vec::new();
    for (index, activity) in activities.iter().enumerate() {
        let coordinate = activity
            .is_place()
            .then(|| coordinates.get(&activity.id).copied())
            .flatten();
        match coordinate {
            Some(coordinate) => stops.push(Stop {
                indices: vec![index],
                coordinate,
            }),
            None => match stops.last_mut() {
                Some(stop) => stop.indices.push(index),
                None => leading.push(index),
            },
        }
    }

    if stops.len() < 2 {
        return OptimizedOrder {
            order: original,
            order_changed: false,
        };
    }

    let mut remaining = stops;
    let mut visited: Vec<Stop> = Vec::new();
    let mut position = match start {
        Some(coordinate) => coordinate,
        None => {
            // No fixed anchor: the first resolvable place stays first.
            let first = remaining.remove(0);
            let coordinate = first.coordinate;
            visited.push(first);
            coordinate
        }
    };

    while !remaining.is_empty() {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, stop) in remaining.iter().enumerate() {
            let distance = haversine_distance_meters(&position, &stop.coordinate);
            if distance < best_distance {
                best_distance = distance;
                best = index;
            }
        }
        let stop = remaining.remove(best);
        position = stop.coordinate;
        visited.push(stop);
    }

    let mut order: Vec<String> = leading.iter().map(|&i| original[i].clone()).collect();
    for stop in &visited {
        for &index in &stop.indices {
            order.push(original[index].clone());
        }
    }

    let order_changed = order != original;
    OptimizedOrder {
        order,
        order_changed,
    }
}
