//! Planning orchestrator.
//!
//! Reacts to a stream of user edits with a debounced, cancellable
//! planning cycle. The orchestrator owns its timers and its in-flight
//! run; the caller injects the routing and location collaborators, so
//! tests drive the whole machine with fakes and a paused clock.
//!
//! ## State Transitions
//!
//! ```text
//! Idle -> Debouncing -> Planning -> Settled
//!                          |-> WatchdogFallback (timeout, non-fatal)
//!                          |-> Failed           (unrecoverable)
//! ```
//!
//! Any edit during Debouncing resets the timer and replaces the pending
//! target; only the most recent edit is ever planned. Entering Planning
//! supersedes the previous run: it is aborted, and a run-id guard drops
//! its result even if the abort is not honored promptly. The published
//! snapshot is always either the latest edit's base model or the most
//! recently settled plan, never anything partial.

mod diff;
mod edit;
mod run;

pub use edit::Edit;
pub use run::{plan_itinerary, PlanOptions};

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, watch};
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, Instant};

use crate::config::PlannerConfig;
use crate::conflict::Conflict;
use crate::error::PlanningError;
use crate::events::Event;
use crate::itinerary::Itinerary;
use crate::locations::LocationDirectory;
use crate::routing::SegmentResolver;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlannerState {
    Idle,
    Debouncing,
    Planning,
    Settled,
    /// Planning exceeded the watchdog; the previous schedule stays visible.
    WatchdogFallback,
    Failed,
}

/// A timed itinerary plus its conflict annotations. The value a settled
/// plan publishes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannedItinerary {
    pub itinerary: Itinerary,
    pub conflicts: Vec<Conflict>,
}

impl PlannedItinerary {
    /// An itinerary that has not been planned yet.
    pub fn unplanned(itinerary: Itinerary) -> Self {
        Self {
            itinerary,
            conflicts: Vec::new(),
        }
    }
}

/// What the presentation layer renders.
#[derive(Debug, Clone)]
pub struct PlannerSnapshot {
    pub planned: PlannedItinerary,
    pub state: PlannerState,
    pub is_planning: bool,
    pub planning_error: Option<String>,
}

/// Collaborators injected into the orchestrator.
#[derive(Clone)]
pub struct PlannerDeps {
    pub resolver: SegmentResolver,
    pub locations: Arc<dyn LocationDirectory>,
    pub config: PlannerConfig,
}

enum Msg {
    Edit { edit: Edit, options: PlanOptions },
    Retry,
    Shutdown,
    RunFinished {
        run_id: u64,
        outcome: Result<PlannedItinerary, PlanningError>,
    },
}

/// Handle to an in-flight run. Dropping it aborts the run's task; the
/// run-id guard covers the window where the task outlives the abort.
struct Inflight {
    run_id: u64,
    abort: AbortHandle,
}

impl Drop for Inflight {
    fn drop(&mut self) {
        self.abort.abort();
    }
}

/// The planning orchestrator.
///
/// Owns a background event loop; all public methods are cheap sends into
/// it. Dropping the planner tears the loop down and aborts any
/// outstanding run.
pub struct Planner {
    tx: mpsc::UnboundedSender<Msg>,
    snapshot_rx: watch::Receiver<PlannerSnapshot>,
    events_rx: Mutex<Option<mpsc::UnboundedReceiver<Event>>>,
    task: JoinHandle<()>,
}

impl Planner {
    /// Spawn the orchestrator over an initial itinerary.
    pub fn spawn(initial: Itinerary, deps: PlannerDeps) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let (event_tx, events_rx) = mpsc::unbounded_channel();
        let (snapshot_tx, snapshot_rx) = watch::channel(PlannerSnapshot {
            planned: PlannedItinerary::unplanned(initial.clone()),
            state: PlannerState::Idle,
            is_planning: false,
            planning_error: None,
        });

        let planner_loop = PlannerLoop {
            model: initial.clone(),
            planned: PlannedItinerary::unplanned(initial),
            state: PlannerState::Idle,
            planning_error: None,
            has_settled: false,
            run_seq: 0,
            inflight: None,
            pending_options: PlanOptions::default(),
            debounce_at: None,
            watchdog_at: None,
            rx,
            tx: tx.clone(),
            snapshot_tx,
            event_tx,
            deps: Arc::new(deps),
        };
        let task = tokio::spawn(planner_loop.run());

        Self {
            tx,
            snapshot_rx,
            events_rx: Mutex::new(Some(events_rx)),
            task,
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Apply an edit; (re)starts the debounce window.
    pub fn apply_edit(&self, edit: Edit) {
        self.apply_edit_with(edit, PlanOptions::default());
    }

    /// Apply an edit with explicit options, e.g. suppressing optimization
    /// right after a manual drag.
    pub fn apply_edit_with(&self, edit: Edit, options: PlanOptions) {
        let _ = self.tx.send(Msg::Edit { edit, options });
    }

    /// Re-plan the current model immediately (the manual retry action).
    pub fn retry(&self) {
        let _ = self.tx.send(Msg::Retry);
    }

    /// Stop the loop and abort any outstanding run.
    pub async fn shutdown(mut self) {
        let _ = self.tx.send(Msg::Shutdown);
        let _ = (&mut self.task).await;
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn snapshot(&self) -> PlannerSnapshot {
        self.snapshot_rx.borrow().clone()
    }

    /// Subscribe to snapshot changes (presentation layer).
    pub fn subscribe(&self) -> watch::Receiver<PlannerSnapshot> {
        self.snapshot_rx.clone()
    }

    /// Take the event stream (persistence collaborator). Yields `None`
    /// after the first call.
    pub fn take_events(&self) -> Option<mpsc::UnboundedReceiver<Event>> {
        self.events_rx.lock().ok()?.take()
    }
}

impl Drop for Planner {
    fn drop(&mut self) {
        self.task.abort();
    }
}

struct PlannerLoop {
    model: Itinerary,
    planned: PlannedItinerary,
    state: PlannerState,
    planning_error: Option<String>,
    has_settled: bool,
    run_seq: u64,
    inflight: Option<Inflight>,
    pending_options: PlanOptions,
    debounce_at: Option<Instant>,
    watchdog_at: Option<Instant>,
    rx: mpsc::UnboundedReceiver<Msg>,
    tx: mpsc::UnboundedSender<Msg>,
    snapshot_tx: watch::Sender<PlannerSnapshot>,
    event_tx: mpsc::UnboundedSender<Event>,
    deps: Arc<PlannerDeps>,
}

impl PlannerLoop {
    async fn run(mut self) {
        loop {
            let debounce_at = self.debounce_at.unwrap_or_else(Instant::now);
            let watchdog_at = self.watchdog_at.unwrap_or_else(Instant::now);

            tokio::select! {
                msg = self.rx.recv() => match msg {
                    Some(Msg::Edit { edit, options }) => self.on_edit(edit, options),
                    Some(Msg::Retry) => self.start_planning(),
                    Some(Msg::RunFinished { run_id, outcome }) => {
                        self.on_run_finished(run_id, outcome);
                    }
                    Some(Msg::Shutdown) | None => break,
                },
                _ = time::sleep_until(debounce_at), if self.debounce_at.is_some() => {
                    self.debounce_at = None;
                    self.start_planning();
                }
                _ = time::sleep_until(watchdog_at), if self.watchdog_at.is_some() => {
                    self.on_watchdog();
                }
            }
        }
        // Dropping `inflight` aborts any outstanding run; timers die with
        // the loop.
    }

    fn on_edit(&mut self, edit: Edit, options: PlanOptions) {
        let day_id = edit.day_id().map(str::to_string);
        if let Err(e) = edit::apply(&mut self.model, edit) {
            log::warn!("ignoring invalid edit: {e}");
            return;
        }

        // The in-flight run, if any, targets a stale snapshot now.
        self.inflight = None;
        self.watchdog_at = None;
        self.pending_options = options;
        // Until a first plan has completed, the visible state follows the
        // latest edit.
        if !self.has_settled {
            self.planned = PlannedItinerary::unplanned(self.model.clone());
        }
        self.state = PlannerState::Debouncing;
        self.debounce_at =
            Some(Instant::now() + Duration::from_millis(self.deps.config.debounce_ms));

        self.emit(Event::EditApplied {
            day_id,
            at: Utc::now(),
        });
        self.publish();
    }

    fn start_planning(&mut self) {
        self.run_seq += 1;
        let run_id = self.run_seq;
        self.state = PlannerState::Planning;
        self.debounce_at = None;
        self.watchdog_at =
            Some(Instant::now() + Duration::from_secs(self.deps.config.watchdog_secs));

        let snapshot = self.model.clone();
        let prior = self.planned.itinerary.clone();
        let options = self.pending_options;
        let deps = Arc::clone(&self.deps);
        let tx = self.tx.clone();
        let handle = tokio::spawn(async move {
            let outcome = run::execute(snapshot, &prior, options, &deps).await;
            let _ = tx.send(Msg::RunFinished { run_id, outcome });
        });
        self.inflight = Some(Inflight {
            run_id,
            abort: handle.abort_handle(),
        });

        log::debug!("planning run {run_id} started");
        self.emit(Event::PlanStarted {
            run_id,
            at: Utc::now(),
        });
        self.publish();
    }

    fn on_run_finished(
        &mut self,
        run_id: u64,
        outcome: Result<PlannedItinerary, PlanningError>,
    ) {
        // Stale results are discarded even if the abort was not honored
        // promptly by the transport.
        if self.inflight.as_ref().map(|i| i.run_id) != Some(run_id) {
            log::debug!("discarding superseded planning run {run_id}");
            self.emit(Event::PlanDiscarded {
                run_id,
                at: Utc::now(),
            });
            return;
        }
        self.inflight = None;
        self.watchdog_at = None;

        match outcome {
            Ok(planned) => {
                // The settled output (optimizer order included) becomes
                // the working model for subsequent edits.
                self.model = planned.itinerary.clone();
                self.planned = planned;
                self.planning_error = None;
                self.has_settled = true;
                self.state = PlannerState::Settled;
                self.emit(Event::PlanSettled {
                    run_id,
                    conflict_count: self.planned.conflicts.len(),
                    at: Utc::now(),
                });
            }
            Err(e) => {
                log::warn!("planning run {run_id} failed: {e}");
                self.planning_error = Some(e.to_string());
                self.state = PlannerState::Failed;
                self.emit(Event::PlanFailed {
                    run_id,
                    message: e.to_string(),
                    at: Utc::now(),
                });
            }
        }
        self.publish();
    }

    fn on_watchdog(&mut self) {
        let run_id = self.inflight.as_ref().map(|i| i.run_id).unwrap_or(0);
        log::warn!("planning run {run_id} exceeded the watchdog, keeping previous schedule");
        self.inflight = None; // aborts the run
        self.watchdog_at = None;
        self.state = PlannerState::WatchdogFallback;
        self.planning_error =
            Some("Planning timed out; showing the last computed schedule".to_string());
        self.emit(Event::PlanTimedOut {
            run_id,
            at: Utc::now(),
        });
        self.publish();
    }

    fn publish(&self) {
        let _ = self.snapshot_tx.send(PlannerSnapshot {
            planned: self.planned.clone(),
            state: self.state,
            is_planning: matches!(
                self.state,
                PlannerState::Debouncing | PlannerState::Planning
            ),
            planning_error: self.planning_error.clone(),
        });
    }

    fn emit(&self, event: Event) {
        let _ = self.event_tx.send(event);
    }
}
