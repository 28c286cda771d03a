//! Edits supplied by the presentation layer.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::itinerary::{Activity, Itinerary, TravelMode};

/// A single user edit to the working model.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Edit {
    /// Replace the whole itinerary snapshot.
    ReplaceItinerary { itinerary: Itinerary },
    AddActivity {
        day_id: String,
        /// Insertion position; appends when absent.
        index: Option<usize>,
        activity: Activity,
    },
    RemoveActivity {
        day_id: String,
        activity_id: String,
    },
    /// Replace an activity in place, matched by its id.
    ReplaceActivity {
        day_id: String,
        activity: Activity,
    },
    /// Move an activity within its day (a drag reorder).
    MoveActivity {
        day_id: String,
        activity_id: String,
        to_index: usize,
    },
    SetDayStart {
        day_id: String,
        /// "HH:mm" override, or `None` to fall back to the default.
        start_time: Option<String>,
    },
    SetTravelMode {
        day_id: String,
        mode: TravelMode,
    },
}

impl Edit {
    /// The day this edit touches, when it targets a single day.
    pub fn day_id(&self) -> Option<&str> {
        match self {
            Edit::ReplaceItinerary { .. } => None,
            Edit::AddActivity { day_id, .. }
            | Edit::RemoveActivity { day_id, .. }
            | Edit::ReplaceActivity { day_id, .. }
            | Edit::MoveActivity { day_id, .. }
            | Edit::SetDayStart { day_id, .. }
            | Edit::SetTravelMode { day_id, .. } => Some(day_id),
        }
    }
}

/// Apply one edit to the model.
pub(crate) fn apply(model: &mut Itinerary, edit: Edit) -> Result<(), ValidationError> {
    match edit {
        Edit::ReplaceItinerary { itinerary } => {
            *model = itinerary;
        }
        Edit::AddActivity {
            day_id,
            index,
            activity,
        } => {
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            let index = index.unwrap_or(day.activities.len()).min(day.activities.len());
            day.activities.insert(index, activity);
        }
        Edit::RemoveActivity {
            day_id,
            activity_id,
        } => {
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            let position = day
                .position_of(&activity_id)
                .ok_or(ValidationError::UnknownActivity(activity_id))?;
            day.activities.remove(position);
        }
        Edit::ReplaceActivity { day_id, activity } => {
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            let position = day
                .position_of(&activity.id)
                .ok_or_else(|| ValidationError::UnknownActivity(activity.id.clone()))?;
            day.activities[position] = activity;
        }
        Edit::MoveActivity {
            day_id,
            activity_id,
            to_index,
        } => {
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            let position = day
                .position_of(&activity_id)
                .ok_or(ValidationError::UnknownActivity(activity_id))?;
            let activity = day.activities.remove(position);
            let to_index = to_index.min(day.activities.len());
            day.activities.insert(to_index, activity);
        }
        Edit::SetDayStart { day_id, start_time } => {
            if let Some(value) = &start_time {
                if crate::config::parse_hhmm(value).is_none() {
                    return Err(ValidationError::InvalidTimeOfDay(value.clone()));
                }
            }
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            day.start_time = start_time;
        }
        Edit::SetTravelMode { day_id, mode } => {
            let day = model
                .day_mut(&day_id)
                .ok_or(ValidationError::UnknownDay(day_id))?;
            day.default_mode = mode;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::itinerary::{Day, PlaceCategory};
    use chrono::Utc;

    fn make_test_model() -> Itinerary {
        let mut day = Day::new(Utc::now());
        day.activities = vec![
            Activity::place("A", PlaceCategory::Sight),
            Activity::place("B", PlaceCategory::Sight),
        ];
        let mut itinerary = Itinerary::new("Trip");
        itinerary.days.push(day);
        itinerary
    }

    #[test]
    fn move_activity_reorders() {
        let mut model = make_test_model();
        let day_id = model.days[0].id.clone();
        let first = model.days[0].activities[0].id.clone();

        apply(
            &mut model,
            Edit::MoveActivity {
                day_id,
                activity_id: first.clone(),
                to_index: 1,
            },
        )
        .unwrap();

        assert_eq!(model.days[0].activities[1].id, first);
    }

    #[test]
    fn unknown_day_is_rejected() {
        let mut model = make_test_model();
        let err = apply(
            &mut model,
            Edit::SetTravelMode {
                day_id: "missing".to_string(),
                mode: TravelMode::Transit,
            },
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::UnknownDay(_)));
    }

    #[test]
    fn invalid_day_start_is_rejected() {
        let mut model = make_test_model();
        let day_id = model.days[0].id.clone();
        let err = apply(
            &mut model,
            Edit::SetDayStart {
                day_id,
                start_time: Some("noonish".to_string()),
            },
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeOfDay(_)));
    }

    #[test]
    fn add_respects_index_bounds() {
        let mut model = make_test_model();
        let day_id = model.days[0].id.clone();
        let added = Activity::note("Note", "");
        let added_id = added.id.clone();

        apply(
            &mut model,
            Edit::AddActivity {
                day_id,
                index: Some(99),
                activity: added,
            },
        )
        .unwrap();

        assert_eq!(model.days[0].activities.last().unwrap().id, added_id);
    }
}
