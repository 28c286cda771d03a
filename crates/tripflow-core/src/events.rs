use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every externally observable planner transition produces an Event.
/// The presentation layer polls the snapshot channel for state; the
/// persistence collaborator subscribes to these to learn when a plan
/// settled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    /// A user edit was applied to the working model.
    EditApplied {
        day_id: Option<String>,
        at: DateTime<Utc>,
    },
    /// A planning run was issued.
    PlanStarted {
        run_id: u64,
        at: DateTime<Utc>,
    },
    /// A planning run completed and its result was published.
    PlanSettled {
        run_id: u64,
        conflict_count: usize,
        at: DateTime<Utc>,
    },
    /// A superseded run's result arrived and was ignored.
    PlanDiscarded {
        run_id: u64,
        at: DateTime<Utc>,
    },
    /// The watchdog fired before the run completed; the previous
    /// schedule stays visible.
    PlanTimedOut {
        run_id: u64,
        at: DateTime<Utc>,
    },
    /// A run failed unrecoverably; the previous schedule stays visible.
    PlanFailed {
        run_id: u64,
        message: String,
        at: DateTime<Utc>,
    },
}
