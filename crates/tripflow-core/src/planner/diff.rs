//! Incremental segment reuse across planning runs.
//!
//! After a reorder only the adjacency pairs that changed need a fresh
//! routing call: old neighbor pairs are broken, new ones are formed, and
//! everything else is carried over from the previously published plan.
//! Reuse is keyed on (origin activity, destination activity, mode), so a
//! mode change invalidates the pair. Always equivalent to a full replan.

use std::collections::HashMap;

use crate::itinerary::{Day, TravelMode, TravelSegment};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct SegmentKey {
    pub from: String,
    pub to: String,
    pub mode: TravelMode,
}

/// Collect the reusable segments of a previously planned day.
///
/// Placeholders ("calculating") are not reusable; they must be resolved
/// again.
pub(crate) fn reusable_segments(day: &Day) -> HashMap<SegmentKey, TravelSegment> {
    let mut segments = HashMap::new();
    let mut previous: Option<String> = None;
    for activity in &day.activities {
        if !activity.is_place() {
            continue;
        }
        if let (Some(from), Some(segment)) = (&previous, activity.travel_from_previous.as_ref()) {
            if !segment.is_calculating() {
                segments.insert(
                    SegmentKey {
                        from: from.clone(),
                        to: activity.id.clone(),
                        mode: segment.mode,
                    },
                    segment.clone(),
                );
            }
        }
        previous = Some(activity.id.clone());
    }
    segments
}
