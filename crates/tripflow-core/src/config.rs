//! Planner configuration.
//!
//! Every tunable of the engine lives here: debounce and watchdog timing,
//! the conflict detector's margins and windows, heuristic fallback speeds,
//! and per-category default visit durations. Loaded from TOML when a file
//! is given, otherwise the defaults apply.

use std::path::Path;

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::itinerary::{PlaceCategory, TravelMode};

/// Average speeds used by the heuristic travel estimate, in km/h.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ModeSpeeds {
    pub walk_kmh: f64,
    pub cycle_kmh: f64,
    pub transit_kmh: f64,
    pub drive_kmh: f64,
}

impl ModeSpeeds {
    pub fn speed_for(&self, mode: TravelMode) -> f64 {
        match mode {
            TravelMode::Walk => self.walk_kmh,
            TravelMode::Cycle => self.cycle_kmh,
            TravelMode::Transit => self.transit_kmh,
            TravelMode::Drive => self.drive_kmh,
        }
    }
}

impl Default for ModeSpeeds {
    fn default() -> Self {
        Self {
            walk_kmh: 4.5,
            cycle_kmh: 15.0,
            transit_kmh: 25.0,
            drive_kmh: 40.0,
        }
    }
}

/// Default visit duration per place category, in minutes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CategoryDurations {
    pub sight: i64,
    pub museum: i64,
    pub restaurant: i64,
    pub cafe: i64,
    pub shopping: i64,
    pub nature: i64,
    pub accommodation: i64,
    pub other: i64,
}

impl CategoryDurations {
    pub fn minutes_for(&self, category: PlaceCategory) -> i64 {
        match category {
            PlaceCategory::Sight => self.sight,
            PlaceCategory::Museum => self.museum,
            PlaceCategory::Restaurant => self.restaurant,
            PlaceCategory::Cafe => self.cafe,
            PlaceCategory::Shopping => self.shopping,
            PlaceCategory::Nature => self.nature,
            PlaceCategory::Accommodation => self.accommodation,
            PlaceCategory::Other => self.other,
        }
    }
}

impl Default for CategoryDurations {
    fn default() -> Self {
        Self {
            sight: 60,
            museum: 90,
            restaurant: 75,
            cafe: 30,
            shopping: 60,
            nature: 90,
            accommodation: 30,
            other: 60,
        }
    }
}

/// A daily time window ("HH:mm" to "HH:mm", end may wrap past midnight).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: String,
    pub end: String,
}

impl TimeWindow {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// Whether an instant's time of day falls inside this window.
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        let (Some(start), Some(end)) = (parse_hhmm(&self.start), parse_hhmm(&self.end)) else {
            return false;
        };
        let minute = at.hour() * 60 + at.minute();
        if start <= end {
            (start..end).contains(&minute)
        } else {
            // Wraps past midnight, e.g. 23:00-05:00.
            minute >= start || minute < end
        }
    }
}

/// Parse a "HH:mm" string into minutes since midnight.
pub(crate) fn parse_hhmm(value: &str) -> Option<u32> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(hour * 60 + minute)
}

/// Resolve a "HH:mm" string against a day's midnight anchor.
pub(crate) fn at_time_of_day(anchor: DateTime<Utc>, hhmm: &str) -> Option<DateTime<Utc>> {
    let minutes = parse_hhmm(hhmm)?;
    let midnight = anchor
        .with_hour(0)?
        .with_minute(0)?
        .with_second(0)?
        .with_nanosecond(0)?;
    Some(midnight + Duration::minutes(minutes as i64))
}

/// Planner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    /// Quiet period after the last edit before a plan starts (milliseconds).
    pub debounce_ms: u64,
    /// Upper bound on one planning run before it is declared timed out (seconds).
    pub watchdog_secs: u64,
    /// Per-request timeout for the routing provider (seconds). Kept below
    /// the watchdog so a hung call degrades to the heuristic first.
    pub routing_timeout_secs: u64,
    /// Slack required beyond the travel duration before a fixed-time stop (minutes).
    pub safety_margin_minutes: i64,
    /// Day start used when a day carries no explicit override ("HH:mm").
    pub default_day_start: String,
    pub mode_speeds: ModeSpeeds,
    pub default_durations: CategoryDurations,
    /// Peak windows that trigger rush-hour warnings on transit and drive arrivals.
    pub rush_hour_windows: Vec<TimeWindow>,
    /// Late-night window that triggers last-train warnings on transit arrivals.
    pub late_night_window: TimeWindow,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 450,
            watchdog_secs: 15,
            routing_timeout_secs: 10,
            safety_margin_minutes: 5,
            default_day_start: "09:00".to_string(),
            mode_speeds: ModeSpeeds::default(),
            default_durations: CategoryDurations::default(),
            rush_hour_windows: vec![
                TimeWindow::new("07:30", "09:30"),
                TimeWindow::new("17:00", "19:30"),
            ],
            late_night_window: TimeWindow::new("23:00", "05:00"),
        }
    }
}

impl PlannerConfig {
    /// Load from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&raw).map_err(|e| ConfigError::ParseFailed(e.to_string()))
    }

    /// Load from a TOML file, falling back to defaults if it is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Save to a TOML file.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let raw = toml::to_string_pretty(self).map_err(|e| ConfigError::ParseFailed(e.to_string()))?;
        std::fs::write(path, raw).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn parse_hhmm_bounds() {
        assert_eq!(parse_hhmm("09:00"), Some(540));
        assert_eq!(parse_hhmm("23:59"), Some(1439));
        assert_eq!(parse_hhmm("24:00"), None);
        assert_eq!(parse_hhmm("9am"), None);
    }

    #[test]
    fn window_wraps_past_midnight() {
        let window = TimeWindow::new("23:00", "05:00");
        let late = Utc.with_ymd_and_hms(2026, 4, 10, 23, 30, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2026, 4, 11, 4, 0, 0).unwrap();
        let noon = Utc.with_ymd_and_hms(2026, 4, 10, 12, 0, 0).unwrap();
        assert!(window.contains(late));
        assert!(window.contains(early));
        assert!(!window.contains(noon));
    }

    #[test]
    fn toml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");

        let mut config = PlannerConfig::default();
        config.debounce_ms = 200;
        config.save(&path).unwrap();

        let loaded = PlannerConfig::load(&path).unwrap();
        assert_eq!(loaded.debounce_ms, 200);
        assert_eq!(loaded.safety_margin_minutes, 5);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = PlannerConfig::load_or_default(Path::new("/nonexistent/planner.toml"));
        assert_eq!(config.debounce_ms, 450);
        assert_eq!(config.watchdog_secs, 15);
    }
}
