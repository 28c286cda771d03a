//! Conflict detection over a fully-timed itinerary.
//!
//! A pure, read-only pass: it never edits the itinerary, only produces
//! annotations. Every conflict carries the day id and the activity id(s)
//! involved so the caller can navigate to it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{at_time_of_day, PlannerConfig, TimeWindow};
use crate::itinerary::{Activity, Day, Itinerary, SegmentWarning, TravelMode};

/// How serious a detected problem is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictCategory {
    Overlap,
    TightGap,
    OutsideOperatingHours,
    ReservationNeeded,
    LastTrain,
    RushHour,
}

/// A detected scheduling problem. Read-only annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub severity: Severity,
    pub category: ConflictCategory,
    pub day_id: String,
    pub activity_ids: Vec<String>,
    pub message: String,
}

/// Detector for scheduling problems in a timed itinerary.
pub struct ConflictDetector {
    safety_margin_minutes: i64,
    rush_hour_windows: Vec<TimeWindow>,
    late_night_window: TimeWindow,
}

impl ConflictDetector {
    pub fn new(config: &PlannerConfig) -> Self {
        Self {
            safety_margin_minutes: config.safety_margin_minutes,
            rush_hour_windows: config.rush_hour_windows.clone(),
            late_night_window: config.late_night_window.clone(),
        }
    }

    /// Scan the whole itinerary. Conflicts come out in day/list order.
    pub fn detect(&self, itinerary: &Itinerary) -> Vec<Conflict> {
        let mut conflicts = Vec::new();
        for day in &itinerary.days {
            self.detect_day(day, &mut conflicts);
        }
        conflicts
    }

    fn detect_day(&self, day: &Day, conflicts: &mut Vec<Conflict>) {
        let scheduled: Vec<&Activity> = day
            .activities
            .iter()
            .filter(|a| a.schedule.is_some())
            .collect();

        for pair in scheduled.windows(2) {
            let (previous, next) = (pair[0], pair[1]);
            let prev_schedule = previous.schedule.unwrap();
            let next_schedule = next.schedule.unwrap();

            if next_schedule.arrival_time < prev_schedule.departure_time {
                conflicts.push(Conflict {
                    severity: Severity::Error,
                    category: ConflictCategory::Overlap,
                    day_id: day.id.clone(),
                    activity_ids: vec![previous.id.clone(), next.id.clone()],
                    message: format!(
                        "\"{}\" starts before \"{}\" ends",
                        next.title, previous.title
                    ),
                });
            } else if next.fixed_window().is_some() {
                // A fixed-time stop: make sure the gap leaves room for the
                // travel into it plus the safety margin.
                let gap = (next_schedule.arrival_time - prev_schedule.departure_time).num_minutes();
                let travel = next
                    .travel_from_previous
                    .as_ref()
                    .map(|s| s.duration_minutes)
                    .unwrap_or(0);
                if gap < travel + self.safety_margin_minutes {
                    conflicts.push(Conflict {
                        severity: Severity::Warning,
                        category: ConflictCategory::TightGap,
                        day_id: day.id.clone(),
                        activity_ids: vec![previous.id.clone(), next.id.clone()],
                        message: format!(
                            "Only {gap} min before \"{}\"; travel needs {travel} min",
                            next.title
                        ),
                    });
                }
            }
        }

        for activity in &day.activities {
            self.check_operating_hours(day, activity, conflicts);

            if activity.needs_reservation_confirmation() {
                conflicts.push(Conflict {
                    severity: Severity::Warning,
                    category: ConflictCategory::ReservationNeeded,
                    day_id: day.id.clone(),
                    activity_ids: vec![activity.id.clone()],
                    message: format!("\"{}\" requires a reservation", activity.title),
                });
            }

            if let (Some(segment), Some(schedule)) =
                (activity.travel_from_previous.as_ref(), activity.schedule)
            {
                for warning in self.segment_warnings(segment.mode, schedule.arrival_time) {
                    let (category, message) = match warning {
                        SegmentWarning::LastTrain => (
                            ConflictCategory::LastTrain,
                            format!("\"{}\" is reached late at night; check the last train", activity.title),
                        ),
                        SegmentWarning::RushHour => (
                            ConflictCategory::RushHour,
                            format!("Travel to \"{}\" arrives during rush hour", activity.title),
                        ),
                        SegmentWarning::TightGap => continue,
                    };
                    conflicts.push(Conflict {
                        severity: Severity::Warning,
                        category,
                        day_id: day.id.clone(),
                        activity_ids: vec![activity.id.clone()],
                        message,
                    });
                }
            }
        }
    }

    fn check_operating_hours(&self, day: &Day, activity: &Activity, conflicts: &mut Vec<Conflict>) {
        let (Some(schedule), Some(hours)) = (activity.schedule, activity.operating_hours()) else {
            return;
        };
        let (Some(open), Some(close)) = (
            at_time_of_day(day.date, &hours.open),
            at_time_of_day(day.date, &hours.close),
        ) else {
            return;
        };
        // Hours that wrap past midnight close on the next day.
        let close = if close <= open {
            close + Duration::days(1)
        } else {
            close
        };
        if schedule.arrival_time < open || schedule.departure_time > close {
            conflicts.push(Conflict {
                severity: Severity::Error,
                category: ConflictCategory::OutsideOperatingHours,
                day_id: day.id.clone(),
                activity_ids: vec![activity.id.clone()],
                message: format!(
                    "\"{}\" visit falls outside opening hours ({}-{})",
                    activity.title, hours.open, hours.close
                ),
            });
        }
    }

    /// Warnings applicable to one travel segment's arrival instant.
    ///
    /// Used both for conflict reporting and to stamp the segment itself.
    pub fn segment_warnings(&self, mode: TravelMode, arrival: DateTime<Utc>) -> Vec<SegmentWarning> {
        let mut warnings = Vec::new();
        if mode == TravelMode::Transit && self.late_night_window.contains(arrival) {
            warnings.push(SegmentWarning::LastTrain);
        }
        if matches!(mode, TravelMode::Transit | TravelMode::Drive)
            && self.rush_hour_windows.iter().any(|w| w.contains(arrival))
        {
            warnings.push(SegmentWarning::RushHour);
        }
        warnings
    }

    /// Stamp each travel segment of a day with its applicable warnings.
    ///
    /// This is the one mutating entry point, used by the planning pipeline
    /// on its own working copy; `detect` itself never mutates.
    pub fn stamp_segment_warnings(&self, day: &mut Day) {
        for activity in day.activities.iter_mut() {
            let Some(schedule) = activity.schedule else {
                continue;
            };
            if let Some(segment) = activity.travel_from_previous.as_mut() {
                segment.warnings = self.segment_warnings(segment.mode, schedule.arrival_time);
            }
        }
    }
}
