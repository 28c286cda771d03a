//! Coordinate resolution for activities.
//!
//! An activity's coordinate is resolved through an ordered fallback:
//! explicit coordinate on the activity, then the linked location record,
//! then a name-based lookup. Unresolvable activities are excluded from
//! travel-segment computation.

use std::sync::Arc;

use async_trait::async_trait;

use crate::geo::Coordinate;
use crate::itinerary::Activity;

/// Collaborator that owns location records and name lookup.
#[async_trait]
pub trait LocationDirectory: Send + Sync {
    /// Coordinate of a linked location record.
    async fn coordinate_of(&self, location_id: &str) -> Option<Coordinate>;

    /// Name-based lookup, the last-resort fallback.
    async fn lookup_by_name(&self, _name: &str) -> Option<Coordinate> {
        None // default no-op
    }
}

/// Directory that resolves nothing. Activities then rely on their
/// explicit coordinates.
pub struct NullDirectory;

#[async_trait]
impl LocationDirectory for NullDirectory {
    async fn coordinate_of(&self, _location_id: &str) -> Option<Coordinate> {
        None
    }
}

/// Resolves activity references to coordinates via the ordered fallback.
pub struct CoordinateResolver {
    directory: Arc<dyn LocationDirectory>,
}

impl CoordinateResolver {
    pub fn new(directory: Arc<dyn LocationDirectory>) -> Self {
        Self { directory }
    }

    /// Resolve an activity to a coordinate, or `None` if it has none.
    ///
    /// Notes never resolve; a place tries its explicit coordinate, its
    /// linked location record, then its title.
    pub async fn resolve(&self, activity: &Activity) -> Option<Coordinate> {
        if !activity.is_place() {
            return None;
        }
        if let Some(coordinate) = activity.coordinate() {
            return Some(coordinate);
        }
        if let Some(location_id) = activity.location_id() {
            if let Some(coordinate) = self.directory.coordinate_of(location_id).await {
                return Some(coordinate);
            }
        }
        self.directory.lookup_by_name(&activity.title).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::PlaceCategory;

    struct FixedDirectory;

    #[async_trait]
    impl LocationDirectory for FixedDirectory {
        async fn coordinate_of(&self, location_id: &str) -> Option<Coordinate> {
            (location_id == "loc-1").then(|| Coordinate::new(1.0, 1.0))
        }

        async fn lookup_by_name(&self, name: &str) -> Option<Coordinate> {
            (name == "Fushimi Inari").then(|| Coordinate::new(2.0, 2.0))
        }
    }

    #[tokio::test]
    async fn explicit_coordinate_wins() {
        let resolver = CoordinateResolver::new(Arc::new(FixedDirectory));
        let activity = Activity::place("Fushimi Inari", PlaceCategory::Sight)
            .with_coordinate(Coordinate::new(9.0, 9.0))
            .with_location_id("loc-1");
        assert_eq!(resolver.resolve(&activity).await, Some(Coordinate::new(9.0, 9.0)));
    }

    #[tokio::test]
    async fn falls_back_to_location_record_then_name() {
        let resolver = CoordinateResolver::new(Arc::new(FixedDirectory));

        let linked = Activity::place("Somewhere", PlaceCategory::Sight).with_location_id("loc-1");
        assert_eq!(resolver.resolve(&linked).await, Some(Coordinate::new(1.0, 1.0)));

        let by_name = Activity::place("Fushimi Inari", PlaceCategory::Sight);
        assert_eq!(resolver.resolve(&by_name).await, Some(Coordinate::new(2.0, 2.0)));
    }

    #[tokio::test]
    async fn unresolvable_activity_yields_none() {
        let resolver = CoordinateResolver::new(Arc::new(NullDirectory));
        let place = Activity::place("Mystery spot", PlaceCategory::Other);
        assert_eq!(resolver.resolve(&place).await, None);

        let note = Activity::note("Reminder", "Buy tickets");
        assert_eq!(resolver.resolve(&note).await, None);
    }
}
