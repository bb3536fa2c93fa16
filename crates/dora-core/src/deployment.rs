//! Deployment records, the persisted dataset, and the events that mutate it.
//!
//! Timestamps are fractional seconds since the Unix epoch so the on-disk
//! document stays readable by any JSON consumer.

use crate::error::{DoraError, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeploymentStatus {
    InProgress,
    Success,
    Failure,
    /// A status written by something else; kept verbatim and counted in totals only.
    #[serde(untagged)]
    Other(String),
}

impl std::fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            DeploymentStatus::InProgress => "in_progress",
            DeploymentStatus::Success => "success",
            DeploymentStatus::Failure => "failure",
            DeploymentStatus::Other(s) => s.as_str(),
        };
        f.write_str(s)
    }
}

/// Kind of event being tracked. Only deployments affect state today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Deployment,
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventType::Deployment => f.write_str("deployment"),
        }
    }
}

impl std::str::FromStr for EventType {
    type Err = DoraError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "deployment" => Ok(EventType::Deployment),
            _ => Err(DoraError::InvalidValue {
                field: "event",
                value: s.to_string(),
                expected: "deployment",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    Started,
    Success,
    Failure,
}

impl std::fmt::Display for EventStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EventStatus::Started => "started",
            EventStatus::Success => "success",
            EventStatus::Failure => "failure",
        };
        f.write_str(s)
    }
}

impl std::str::FromStr for EventStatus {
    type Err = DoraError;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "started" => Ok(EventStatus::Started),
            "success" => Ok(EventStatus::Success),
            "failure" => Ok(EventStatus::Failure),
            _ => Err(DoraError::InvalidValue {
                field: "status",
                value: s.to_string(),
                expected: "started, success, or failure",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Deployment
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub commit_hash: String,
    /// Always set by the recorder; tolerated as missing in hand-edited files.
    #[serde(default)]
    pub start_time: Option<f64>,
    /// `null` until the deployment reaches a terminal status.
    #[serde(default)]
    pub end_time: Option<f64>,
    pub status: DeploymentStatus,
}

impl Deployment {
    pub fn started(commit_hash: impl Into<String>, at: f64) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            start_time: Some(at),
            end_time: None,
            status: DeploymentStatus::InProgress,
        }
    }

    /// A terminal record for a commit whose start was never seen.
    /// `start_time == end_time` is an approximation.
    pub fn synthesized(commit_hash: impl Into<String>, status: DeploymentStatus, at: f64) -> Self {
        Self {
            commit_hash: commit_hash.into(),
            start_time: Some(at),
            end_time: Some(at),
            status,
        }
    }

    /// Elapsed seconds from start to end, when both are recorded.
    pub fn lead_time(&self) -> Option<f64> {
        Some(self.end_time? - self.start_time?)
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// The persisted document: all deployments in tracking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub deployments: Vec<Deployment>,
    /// Top-level keys this version does not model, kept across rewrites.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Dataset {
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }

    /// First record for `commit_hash` in insertion order.
    pub fn find_mut(&mut self, commit_hash: &str) -> Option<&mut Deployment> {
        self.deployments
            .iter_mut()
            .find(|d| d.commit_hash == commit_hash)
    }
}

// ---------------------------------------------------------------------------
// TrackedEvent
// ---------------------------------------------------------------------------

/// One incoming event, stamped with the wall-clock time it was captured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedEvent {
    pub timestamp: f64,
    pub iso_time: String,
    pub commit_hash: String,
    pub event_type: EventType,
    pub status: EventStatus,
}

impl TrackedEvent {
    pub fn now(event_type: EventType, status: EventStatus, commit_hash: impl Into<String>) -> Self {
        Self::at(Utc::now(), event_type, status, commit_hash)
    }

    pub fn at(
        when: DateTime<Utc>,
        event_type: EventType,
        status: EventStatus,
        commit_hash: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: epoch_seconds(when),
            iso_time: when.to_rfc3339_opts(SecondsFormat::Micros, true),
            commit_hash: commit_hash.into(),
            event_type,
            status,
        }
    }
}

pub fn epoch_seconds(when: DateTime<Utc>) -> f64 {
    when.timestamp_micros() as f64 / 1_000_000.0
}

/// Render an epoch-seconds timestamp for humans; falls back to the raw number.
pub fn format_epoch(secs: f64) -> String {
    let micros = (secs * 1_000_000.0).round() as i64;
    let nanos = (micros.rem_euclid(1_000_000) * 1_000) as u32;
    DateTime::<Utc>::from_timestamp(micros.div_euclid(1_000_000), nanos)
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("{secs}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_parses_accepted_values() {
        assert_eq!("started".parse::<EventStatus>().unwrap(), EventStatus::Started);
        assert_eq!("success".parse::<EventStatus>().unwrap(), EventStatus::Success);
        assert_eq!("failure".parse::<EventStatus>().unwrap(), EventStatus::Failure);
    }

    #[test]
    fn status_rejects_unknown_value() {
        let err = "done".parse::<EventStatus>().unwrap_err();
        assert!(matches!(err, DoraError::InvalidValue { field: "status", .. }));
    }

    #[test]
    fn event_type_rejects_unknown_value() {
        assert!("incident".parse::<EventType>().is_err());
        assert_eq!(
            "deployment".parse::<EventType>().unwrap(),
            EventType::Deployment
        );
    }

    #[test]
    fn started_record_serializes_null_end_time() {
        let d = Deployment::started("abc123", 100.5);
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["commit_hash"], "abc123");
        assert_eq!(json["start_time"], 100.5);
        assert!(json["end_time"].is_null());
        assert_eq!(json["status"], "in_progress");
    }

    #[test]
    fn record_without_end_time_key_deserializes() {
        let d: Deployment =
            serde_json::from_str(r#"{"commit_hash":"x","start_time":1,"status":"success"}"#)
                .unwrap();
        assert!(d.end_time.is_none());
        assert!(d.lead_time().is_none());
    }

    #[test]
    fn record_with_null_start_time_has_no_lead_time() {
        let d: Deployment = serde_json::from_str(
            r#"{"commit_hash":"odd","start_time":null,"end_time":30.0,"status":"success"}"#,
        )
        .unwrap();
        assert!(d.start_time.is_none());
        assert!(d.lead_time().is_none());

        let d: Deployment =
            serde_json::from_str(r#"{"commit_hash":"bare","status":"success"}"#).unwrap();
        assert!(d.start_time.is_none());
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let d: Deployment = serde_json::from_str(
            r#"{"commit_hash":"x","start_time":1.0,"end_time":2.0,"status":"rolled_back"}"#,
        )
        .unwrap();
        assert_eq!(d.status, DeploymentStatus::Other("rolled_back".to_string()));
        assert_eq!(d.status.to_string(), "rolled_back");

        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["status"], "rolled_back");
    }

    #[test]
    fn known_statuses_still_deserialize_to_their_variants() {
        for (raw, status) in [
            ("in_progress", DeploymentStatus::InProgress),
            ("success", DeploymentStatus::Success),
            ("failure", DeploymentStatus::Failure),
        ] {
            let parsed: DeploymentStatus =
                serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn synthesized_record_has_zero_lead_time() {
        let d = Deployment::synthesized("abc", DeploymentStatus::Failure, 42.0);
        assert_eq!(d.start_time, Some(42.0));
        assert_eq!(d.end_time, Some(42.0));
        assert_eq!(d.lead_time(), Some(0.0));
        assert_eq!(d.status, DeploymentStatus::Failure);
    }

    #[test]
    fn dataset_without_deployments_key_is_empty() {
        let ds: Dataset = serde_json::from_str("{}").unwrap();
        assert!(ds.is_empty());
    }

    #[test]
    fn dataset_keeps_unknown_top_level_keys() {
        let ds: Dataset =
            serde_json::from_str(r#"{"deployments":[],"incidents":[{"id":1}]}"#).unwrap();
        let out = serde_json::to_value(&ds).unwrap();
        assert_eq!(out["incidents"][0]["id"], 1);
        assert!(out["deployments"].as_array().unwrap().is_empty());
    }

    #[test]
    fn find_mut_returns_first_match() {
        let mut ds = Dataset::default();
        ds.deployments.push(Deployment::started("a", 1.0));
        ds.deployments.push(Deployment::started("a", 2.0));
        assert_eq!(ds.find_mut("a").unwrap().start_time, Some(1.0));
        assert!(ds.find_mut("b").is_none());
    }

    #[test]
    fn tracked_event_stamps_time() {
        let when = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let ev = TrackedEvent::at(when, EventType::Deployment, EventStatus::Started, "abc");
        assert_eq!(ev.timestamp, when.timestamp() as f64);
        assert_eq!(ev.iso_time, "2026-01-02T03:04:05.000000Z");
        assert_eq!(format_epoch(ev.timestamp), "2026-01-02 03:04:05 UTC");
    }
}
