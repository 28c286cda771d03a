//! Itinerary data model: trips, days, activities, travel segments.
//!
//! An itinerary is an ordered sequence of days; a day is an ordered
//! sequence of activities. Activity list order IS the chronological
//! visiting order. The model is a plain value: planning never mutates a
//! shared instance in place, it emits a fresh snapshot.

mod activity;
mod segment;

pub use activity::{Activity, ActivityKind, OperatingHours, PlaceCategory, Schedule};
pub use segment::{SegmentWarning, TravelMode, TravelSegment};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Metadata for a day that moves between cities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityTransition {
    pub from_city: String,
    pub to_city: String,
}

/// One day of the trip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub id: String,
    /// Midnight anchor of the day (UTC).
    pub date: DateTime<Utc>,
    /// IANA timezone name, forwarded to the routing provider.
    #[serde(default)]
    pub timezone: Option<String>,
    /// Explicit day-start override ("HH:mm"); falls back to the configured default.
    #[serde(default)]
    pub start_time: Option<String>,
    /// Where the day begins (accommodation or trip entry point).
    #[serde(default)]
    pub start_coordinate: Option<Coordinate>,
    pub default_mode: TravelMode,
    #[serde(default)]
    pub city_transition: Option<CityTransition>,
    pub activities: Vec<Activity>,
}

impl Day {
    pub fn new(date: DateTime<Utc>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            date,
            timezone: None,
            start_time: None,
            start_coordinate: None,
            default_mode: TravelMode::Walk,
            city_transition: None,
            activities: Vec::new(),
        }
    }

    pub fn activity(&self, id: &str) -> Option<&Activity> {
        self.activities.iter().find(|a| a.id == id)
    }

    pub fn activity_mut(&mut self, id: &str) -> Option<&mut Activity> {
        self.activities.iter_mut().find(|a| a.id == id)
    }

    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.activities.iter().position(|a| a.id == id)
    }

    /// Reorder activities to match the given id sequence.
    ///
    /// Ids missing from `order` keep their relative position at the end;
    /// unknown ids are ignored.
    pub fn apply_order(&mut self, order: &[String]) {
        let mut remaining: Vec<Activity> = std::mem::take(&mut self.activities);
        let mut reordered = Vec::with_capacity(remaining.len());
        for id in order {
            if let Some(pos) = remaining.iter().position(|a| &a.id == id) {
                reordered.push(remaining.remove(pos));
            }
        }
        reordered.append(&mut remaining);
        self.activities = reordered;
    }
}

/// Ordered collection of Days. Identity is stable across replans.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Itinerary {
    pub id: String,
    pub title: String,
    pub days: Vec<Day>,
}

impl Itinerary {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            days: Vec::new(),
        }
    }

    pub fn day(&self, id: &str) -> Option<&Day> {
        self.days.iter().find(|d| d.id == id)
    }

    pub fn day_mut(&mut self, id: &str) -> Option<&mut Day> {
        self.days.iter_mut().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_day() -> Day {
        let mut day = Day::new(Utc::now());
        day.activities = vec![
            Activity::place("Temple", PlaceCategory::Sight),
            Activity::note("Reminder", "Bring cash"),
            Activity::place("Museum", PlaceCategory::Museum),
        ];
        day
    }

    #[test]
    fn apply_order_reorders_by_id() {
        let mut day = make_test_day();
        let ids: Vec<String> = day.activities.iter().map(|a| a.id.clone()).collect();
        let order = vec![ids[2].clone(), ids[1].clone(), ids[0].clone()];

        day.apply_order(&order);

        let reordered: Vec<String> = day.activities.iter().map(|a| a.id.clone()).collect();
        assert_eq!(reordered, order);
    }

    #[test]
    fn apply_order_keeps_unlisted_activities() {
        let mut day = make_test_day();
        let ids: Vec<String> = day.activities.iter().map(|a| a.id.clone()).collect();

        // Only name the last activity; the others keep their relative order.
        day.apply_order(&[ids[2].clone()]);

        let reordered: Vec<String> = day.activities.iter().map(|a| a.id.clone()).collect();
        assert_eq!(reordered, vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
    }

    #[test]
    fn itinerary_serialization() {
        let mut itinerary = Itinerary::new("Kyoto long weekend");
        itinerary.days.push(make_test_day());

        let json = serde_json::to_string(&itinerary).unwrap();
        let decoded: Itinerary = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.days.len(), 1);
        assert_eq!(decoded.days[0].activities.len(), 3);
    }
}
