//! Applies tracked events to the deployment dataset.
//!
//! Every input is handled: duplicate starts are ignored, terminal events
//! without a start synthesize a record, and terminal events on an already
//! finished commit overwrite it. Only store I/O can fail.

use crate::deployment::{
    Dataset, Deployment, DeploymentStatus, EventStatus, EventType, TrackedEvent,
};
use crate::error::Result;
use crate::store::Store;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackOutcome {
    /// A new in-progress record was appended.
    Started,
    /// A record for the commit already existed; nothing changed.
    DuplicateStart,
    /// An existing record was moved to a terminal status.
    Completed,
    /// No record existed; a terminal one was appended with start == end.
    Synthesized,
}

impl std::fmt::Display for TrackOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            TrackOutcome::Started => "started",
            TrackOutcome::DuplicateStart => "duplicate_start",
            TrackOutcome::Completed => "completed",
            TrackOutcome::Synthesized => "synthesized",
        };
        f.write_str(s)
    }
}

/// Mutate `dataset` in place for one event.
pub fn apply(dataset: &mut Dataset, event: &TrackedEvent) -> TrackOutcome {
    match event.event_type {
        EventType::Deployment => apply_deployment(dataset, event),
    }
}

fn apply_deployment(dataset: &mut Dataset, event: &TrackedEvent) -> TrackOutcome {
    let now = event.timestamp;
    let terminal = match event.status {
        EventStatus::Started => {
            if dataset.find_mut(&event.commit_hash).is_some() {
                return TrackOutcome::DuplicateStart;
            }
            dataset
                .deployments
                .push(Deployment::started(&event.commit_hash, now));
            return TrackOutcome::Started;
        }
        EventStatus::Success => DeploymentStatus::Success,
        EventStatus::Failure => DeploymentStatus::Failure,
    };

    match dataset.find_mut(&event.commit_hash) {
        Some(existing) => {
            existing.end_time = Some(now);
            existing.status = terminal;
            TrackOutcome::Completed
        }
        None => {
            dataset
                .deployments
                .push(Deployment::synthesized(&event.commit_hash, terminal, now));
            TrackOutcome::Synthesized
        }
    }
}

/// Load, apply `event`, and save. The dataset is written back on every path.
pub fn record(store: &impl Store, event: &TrackedEvent) -> Result<TrackOutcome> {
    let mut dataset = store.load()?;
    let outcome = apply(&mut dataset, event);
    store.save(&dataset)?;
    tracing::info!(
        commit = %event.commit_hash,
        event_type = %event.event_type,
        status = %event.status,
        outcome = %outcome,
        "tracked event"
    );
    Ok(outcome)
}

/// The one-line confirmation printed after a successful `track`.
pub fn confirmation(event: &TrackedEvent) -> String {
    format!(
        "Tracked event: {} - {} for commit {}",
        event.event_type, event.status, event.commit_hash
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
