//! Delivery metrics derived from the deployment dataset.
//!
//! All figures come from one read-only snapshot. Time to restore needs
//! incident data this system does not track, so it is always unavailable.

use crate::deployment::{Dataset, DeploymentStatus};
use serde::Serialize;

pub const NO_DEPLOYMENTS: &str = "No deployments found.";
pub const TIME_TO_RESTORE_UNAVAILABLE: &str = "Needs manual incident data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub total_deployments: usize,
    pub successful_deployments: usize,
    pub failed_deployments: usize,
    /// Mean seconds from start to end over successful deployments.
    pub average_lead_time_secs: Option<f64>,
    /// Percentage of all deployments that ended in failure.
    pub change_failure_rate: f64,
    pub time_to_restore_secs: Option<f64>,
}

/// Compute the report, or `None` when nothing has been tracked.
pub fn compute(dataset: &Dataset) -> Option<MetricsReport> {
    let deployments = &dataset.deployments;
    let total = deployments.len();
    if total == 0 {
        return None;
    }

    let successful = deployments
        .iter()
        .filter(|d| d.status == DeploymentStatus::Success)
        .count();
    let failed = deployments
        .iter()
        .filter(|d| d.status == DeploymentStatus::Failure)
        .count();

    let lead_times: Vec<f64> = deployments
        .iter()
        .filter(|d| d.status == DeploymentStatus::Success)
        .filter_map(|d| d.lead_time())
        .collect();
    let average_lead_time_secs = if lead_times.is_empty() {
        None
    } else {
        Some(lead_times.iter().sum::<f64>() / lead_times.len() as f64)
    };

    Some(MetricsReport {
        total_deployments: total,
        successful_deployments: successful,
        failed_deployments: failed,
        average_lead_time_secs,
        change_failure_rate: failed as f64 / total as f64 * 100.0,
        time_to_restore_secs: None,
    })
}

impl MetricsReport {
    /// Plain-text report, one metric per line.
    pub fn lines(&self) -> Vec<String> {
        let lead_time = match self.average_lead_time_secs {
            Some(secs) => format!("{secs:.2} seconds"),
            None => "N/A".to_string(),
        };
        vec![
            format!("Total Deployments: {}", self.total_deployments),
            format!("Successful Deployments: {}", self.successful_deployments),
            format!("Average Lead Time: {lead_time}"),
            format!("Change Failure Rate: {:.2}%", self.change_failure_rate),
            format!("Time to Restore: {TIME_TO_RESTORE_UNAVAILABLE}"),
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
