//! Day timeline builder.
//!
//! Propagates arrival and departure times sequentially through a day:
//! travel duration, then visit duration, activity by activity. Notes pass
//! time through unless they carry explicit fixed times. A place whose
//! incoming segment is unresolved is timed with zero travel and marked
//! awaiting recalculation so the rest of the day still computes.

use chrono::{DateTime, Duration, Utc};

use crate::config::{at_time_of_day, PlannerConfig};
use crate::itinerary::{Day, Schedule};

/// The instant a day's first activity begins.
///
/// Explicit "HH:mm" override on the day wins; otherwise the configured
/// default; an unparseable override falls back to the default as well.
pub fn effective_day_start(day: &Day, config: &PlannerConfig) -> DateTime<Utc> {
    day.start_time
        .as_deref()
        .and_then(|hhmm| at_time_of_day(day.date, hhmm))
        .or_else(|| at_time_of_day(day.date, &config.default_day_start))
        .unwrap_or(day.date)
}

/// Fill in `schedule` for every activity of a day, in list order.
///
/// Replaces whatever schedules were present before: a rebuild after a
/// reorder carries no residual times from the prior order.
pub fn build_day_timeline(day: &mut Day, config: &PlannerConfig) {
    let mut t = effective_day_start(day, config);
    let mut seen_place = false;

    for activity in day.activities.iter_mut() {
        if let Some(category) = activity.place_category() {
            if seen_place {
                match &activity.travel_from_previous {
                    Some(segment) => t += Duration::minutes(segment.duration_minutes),
                    None => activity.awaiting_recalculation = true,
                }
            } else {
                // The first place has no preceding place to travel from.
                activity.travel_from_previous = None;
            }

            let visit_minutes = activity
                .expected_duration_minutes()
                .unwrap_or_else(|| config.default_durations.minutes_for(category));

            let arrival_time = t;
            t += Duration::minutes(visit_minutes);
            activity.schedule = Some(Schedule {
                arrival_time,
                departure_time: t,
            });
            seen_place = true;
        } else if let Some((start, end)) = activity.fixed_window() {
            activity.schedule = Some(Schedule {
                arrival_time: start,
                departure_time: end,
            });
            if end > t {
                t = end;
            }
        } else {
            // Untimed note: consumes no scheduled time.
            activity.schedule = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    use crate::geo::Coordinate;
    use crate::itinerary::{Activity, PlaceCategory, TravelMode, TravelSegment};

    fn make_test_day() -> Day {
        Day::new(Utc.with_ymd_and_hms(2026, 4, 10, 0, 0, 0).unwrap())
    }

    fn walk_segment(minutes: i64) -> TravelSegment {
        TravelSegment {
            mode: TravelMode::Walk,
            duration_minutes: minutes,
            distance_meters: minutes as f64 * 75.0,
            path: vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.01)],
            instructions: Vec::new(),
            arrival_time: None,
            is_estimated: false,
            warnings: Vec::new(),
        }
    }

    #[test]
    fn temple_then_museum_with_twenty_minute_walk() {
        let mut day = make_test_day();
        day.start_time = Some("09:00".to_string());

        let temple = Activity::place("Temple", PlaceCategory::Sight).with_duration(60);
        let mut museum = Activity::place("Museum", PlaceCategory::Museum).with_duration(90);
        museum.travel_from_previous = Some(walk_segment(20));
        day.activities = vec![temple, museum];

        build_day_timeline(&mut day, &PlannerConfig::default());

        let temple = day.activities[0].schedule.unwrap();
        let museum = day.activities[1].schedule.unwrap();
        let at = |h, m| Utc.with_ymd_and_hms(2026, 4, 10, h, m, 0).unwrap();

        assert_eq!(temple.arrival_time, at(9, 0));
        assert_eq!(temple.departure_time, at(10, 0));
        assert_eq!(museum.arrival_time, at(10, 20));
        assert_eq!(museum.departure_time, at(11, 50));
    }

    #[test]
    fn missing_duration_defaults_by_category() {
        let mut day = make_test_day();
        day.start_time = Some("10:00".to_string());
        day.activities = vec![Activity::place("Louvre", PlaceCategory::Museum)];

        let config = PlannerConfig::default();
        build_day_timeline(&mut day, &config);

        let schedule = day.activities[0].schedule.unwrap();
        let visit = (schedule.departure_time - schedule.arrival_time).num_minutes();
        assert_eq!(visit, config.default_durations.museum);
    }

    #[test]
    fn missing_segment_is_zero_travel_and_marked() {
        let mut day = make_test_day();
        day.start_time = Some("09:00".to_string());
        day.activities = vec![
            Activity::place("First", PlaceCategory::Sight).with_duration(30),
            Activity::place("Second", PlaceCategory::Sight).with_duration(30),
        ];

        build_day_timeline(&mut day, &PlannerConfig::default());

        let first = day.activities[0].schedule.unwrap();
        let second = day.activities[1].schedule.unwrap();
        assert_eq!(second.arrival_time, first.departure_time);
        assert!(day.activities[1].awaiting_recalculation);
        assert!(!day.activities[0].awaiting_recalculation);
    }

    #[test]
    fn untimed_note_passes_time_through() {
        let mut day = make_test_day();
        day.start_time = Some("09:00".to_string());
        let mut second = Activity::place("Second", PlaceCategory::Sight).with_duration(30);
        second.travel_from_previous = Some(walk_segment(10));
        day.activities = vec![
            Activity::place("First", PlaceCategory::Sight).with_duration(30),
            Activity::note("Remember sunscreen", ""),
            second,
        ];

        build_day_timeline(&mut day, &PlannerConfig::default());

        assert!(day.activities[1].schedule.is_none());
        let at = |h, m| Utc.with_ymd_and_hms(2026, 4, 10, h, m, 0).unwrap();
        assert_eq!(day.activities[2].schedule.unwrap().arrival_time, at(9, 40));
    }

    #[test]
    fn fixed_time_note_pins_the_cursor_forward() {
        let mut day = make_test_day();
        day.start_time = Some("09:00".to_string());
        let at = |h, m| Utc.with_ymd_and_hms(2026, 4, 10, h, m, 0).unwrap();

        day.activities = vec![
            Activity::place("Morning walk", PlaceCategory::Sight).with_duration(30),
            Activity::note("Train to Osaka", "").with_fixed_times(at(11, 0), at(11, 45)),
            Activity::place("Castle", PlaceCategory::Sight).with_duration(60),
        ];

        build_day_timeline(&mut day, &PlannerConfig::default());

        // The castle visit starts after the fixed train window.
        assert_eq!(day.activities[2].schedule.unwrap().arrival_time, at(11, 45));
    }

    #[test]
    fn rebuild_after_reorder_has_no_residual_times() {
        let mut day = make_test_day();
        day.start_time = Some("09:00".to_string());
        day.activities = vec![
            Activity::place("A", PlaceCategory::Sight).with_duration(30),
            Activity::place("B", PlaceCategory::Sight).with_duration(45),
        ];
        let config = PlannerConfig::default();
        build_day_timeline(&mut day, &config);

        let order: Vec<String> = day.activities.iter().rev().map(|a| a.id.clone()).collect();
        day.apply_order(&order);
        for activity in day.activities.iter_mut() {
            activity.clear_computed();
        }
        build_day_timeline(&mut day, &config);

        let at = |h, m| Utc.with_ymd_and_hms(2026, 4, 10, h, m, 0).unwrap();
        let b = day.activities[0].schedule.unwrap();
        let a = day.activities[1].schedule.unwrap();
        assert_eq!(b.arrival_time, at(9, 0));
        assert_eq!(b.departure_time, at(9, 45));
        assert_eq!(a.arrival_time, at(9, 45));
        assert_eq!(a.departure_time, at(10, 15));
    }

    #[test]
    fn unparseable_day_start_falls_back_to_default() {
        let mut day = make_test_day();
        day.start_time = Some("late morning".to_string());
        day.activities = vec![Activity::place("A", PlaceCategory::Sight).with_duration(10)];

        let config = PlannerConfig::default();
        build_day_timeline(&mut day, &config);

        let schedule = day.activities[0].schedule.unwrap();
        assert_eq!(
            schedule.arrival_time,
            at_time_of_day(day.date, &config.default_day_start).unwrap()
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn arrival_times_are_monotonic(
                durations in proptest::collection::vec(0i64..600, 1..12),
                travels in proptest::collection::vec(0i64..180, 0..12),
            ) {
                let mut day = make_test_day();
                day.start_time = Some("08:00".to_string());
                for (i, minutes) in durations.iter().enumerate() {
                    let mut place = Activity::place(format!("P{i}"), PlaceCategory::Sight)
                        .with_duration(*minutes);
                    if i > 0 {
                        if let Some(travel) = travels.get(i - 1) {
                            place.travel_from_previous = Some(walk_segment(*travel));
                        }
                    }
                    day.activities.push(place);
                }

                build_day_timeline(&mut day, &PlannerConfig::default());

                let schedules: Vec<Schedule> =
                    day.activities.iter().filter_map(|a| a.schedule).collect();
                for pair in schedules.windows(2) {
                    prop_assert!(pair[1].arrival_time >= pair[0].arrival_time);
                    prop_assert!(pair[1].arrival_time >= pair[0].departure_time);
                }
            }
        }
    }
}
