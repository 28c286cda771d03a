//! Activities: place visits and free-form notes within a day.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::segment::{TravelMode, TravelSegment};
use crate::geo::Coordinate;

/// Category of a place visit. Drives the default duration estimate when the
/// user has not set one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceCategory {
    Sight,
    Museum,
    Restaurant,
    Cafe,
    Shopping,
    Nature,
    Accommodation,
    Other,
}

/// Published opening hours of a place ("HH:mm" local to the day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatingHours {
    pub open: String,
    pub close: String,
}

/// Computed visit window. Filled by planning, never by hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub arrival_time: DateTime<Utc>,
    pub departure_time: DateTime<Utc>,
}

/// The two activity variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActivityKind {
    Place {
        #[serde(default)]
        coordinate: Option<Coordinate>,
        /// Linked location record, resolved via the location directory.
        #[serde(default)]
        location_id: Option<String>,
        category: PlaceCategory,
        #[serde(default)]
        expected_duration_minutes: Option<i64>,
        #[serde(default)]
        operating_hours: Option<OperatingHours>,
        /// Overrides the day's default travel mode for the incoming segment.
        #[serde(default)]
        mode_override: Option<TravelMode>,
        #[serde(default)]
        reservation_required: bool,
        #[serde(default)]
        reservation_confirmed: bool,
    },
    Note {
        #[serde(default)]
        text: String,
        /// A note only consumes scheduled time when both fixed times are set.
        #[serde(default)]
        fixed_start: Option<DateTime<Utc>>,
        #[serde(default)]
        fixed_end: Option<DateTime<Utc>>,
    },
}

/// A place visit or free-form note within a Day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub kind: ActivityKind,
    /// Computed visit window; present after a plan has settled.
    #[serde(default)]
    pub schedule: Option<Schedule>,
    /// Travel from the preceding place activity; present only if one exists.
    #[serde(default)]
    pub travel_from_previous: Option<TravelSegment>,
    /// Set when the incoming segment could not be resolved yet.
    #[serde(default)]
    pub awaiting_recalculation: bool,
}

impl Activity {
    /// Create a place visit.
    pub fn place(title: impl Into<String>, category: PlaceCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            kind: ActivityKind::Place {
                coordinate: None,
                location_id: None,
                category,
                expected_duration_minutes: None,
                operating_hours: None,
                mode_override: None,
                reservation_required: false,
                reservation_confirmed: false,
            },
            schedule: None,
            travel_from_previous: None,
            awaiting_recalculation: false,
        }
    }

    /// Create a free-form note.
    pub fn note(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            kind: ActivityKind::Note {
                text: text.into(),
                fixed_start: None,
                fixed_end: None,
            },
            schedule: None,
            travel_from_previous: None,
            awaiting_recalculation: false,
        }
    }

    pub fn with_coordinate(mut self, coordinate: Coordinate) -> Self {
        if let ActivityKind::Place { coordinate: c, .. } = &mut self.kind {
            *c = Some(coordinate);
        }
        self
    }

    pub fn with_location_id(mut self, location_id: impl Into<String>) -> Self {
        if let ActivityKind::Place { location_id: l, .. } = &mut self.kind {
            *l = Some(location_id.into());
        }
        self
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        if let ActivityKind::Place {
            expected_duration_minutes, ..
        } = &mut self.kind
        {
            *expected_duration_minutes = Some(minutes);
        }
        self
    }

    pub fn with_operating_hours(mut self, open: impl Into<String>, close: impl Into<String>) -> Self {
        if let ActivityKind::Place { operating_hours, .. } = &mut self.kind {
            *operating_hours = Some(OperatingHours {
                open: open.into(),
                close: close.into(),
            });
        }
        self
    }

    pub fn with_mode_override(mut self, mode: TravelMode) -> Self {
        if let ActivityKind::Place { mode_override, .. } = &mut self.kind {
            *mode_override = Some(mode);
        }
        self
    }

    pub fn with_reservation(mut self, required: bool, confirmed: bool) -> Self {
        if let ActivityKind::Place {
            reservation_required,
            reservation_confirmed,
            ..
        } = &mut self.kind
        {
            *reservation_required = required;
            *reservation_confirmed = confirmed;
        }
        self
    }

    /// Pin a note to an explicit time window.
    pub fn with_fixed_times(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        if let ActivityKind::Note {
            fixed_start, fixed_end, ..
        } = &mut self.kind
        {
            *fixed_start = Some(start);
            *fixed_end = Some(end);
        }
        self
    }

    pub fn is_place(&self) -> bool {
        matches!(self.kind, ActivityKind::Place { .. })
    }

    /// Explicit coordinate, if this is a place that carries one.
    pub fn coordinate(&self) -> Option<Coordinate> {
        match &self.kind {
            ActivityKind::Place { coordinate, .. } => *coordinate,
            ActivityKind::Note { .. } => None,
        }
    }

    pub fn location_id(&self) -> Option<&str> {
        match &self.kind {
            ActivityKind::Place { location_id, .. } => location_id.as_deref(),
            ActivityKind::Note { .. } => None,
        }
    }

    pub fn expected_duration_minutes(&self) -> Option<i64> {
        match &self.kind {
            ActivityKind::Place {
                expected_duration_minutes,
                ..
            } => *expected_duration_minutes,
            ActivityKind::Note { .. } => None,
        }
    }

    pub fn place_category(&self) -> Option<PlaceCategory> {
        match &self.kind {
            ActivityKind::Place { category, .. } => Some(*category),
            ActivityKind::Note { .. } => None,
        }
    }

    pub fn operating_hours(&self) -> Option<&OperatingHours> {
        match &self.kind {
            ActivityKind::Place { operating_hours, .. } => operating_hours.as_ref(),
            ActivityKind::Note { .. } => None,
        }
    }

    pub fn mode_override(&self) -> Option<TravelMode> {
        match &self.kind {
            ActivityKind::Place { mode_override, .. } => *mode_override,
            ActivityKind::Note { .. } => None,
        }
    }

    /// Reservation required but not yet confirmed.
    pub fn needs_reservation_confirmation(&self) -> bool {
        matches!(
            self.kind,
            ActivityKind::Place {
                reservation_required: true,
                reservation_confirmed: false,
                ..
            }
        )
    }

    /// Explicit time window of a fixed-time note.
    pub fn fixed_window(&self) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        match &self.kind {
            ActivityKind::Note {
                fixed_start: Some(s),
                fixed_end: Some(e),
                ..
            } => Some((*s, *e)),
            _ => None,
        }
    }

    /// Drop everything a planning run computes, keeping only user input.
    pub fn clear_computed(&mut self) {
        self.schedule = None;
        self.travel_from_previous = None;
        self.awaiting_recalculation = false;
    }
}
