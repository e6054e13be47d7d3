//! Common API types and data structures

use crate::core::{MeasurementId, Side, NOT_ALL_LANDMARKS_DEFINED};
use serde::Serialize;

/// Catalog entry for populating measurement lists
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementInfo {
    pub id: MeasurementId,
    pub name: &'static str,
    pub description: &'static str,
}

/// Result of evaluating one measurement.
///
/// `ready` is false exactly when a required landmark has no position; the
/// label then carries the status string and there is no angle.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementOutcome {
    pub ready: bool,
    pub angle_degrees: Option<f64>,
    pub label: String,
}

impl MeasurementOutcome {
    pub fn ready(angle_degrees: f64, label: impl Into<String>) -> Self {
        Self {
            ready: true,
            angle_degrees: Some(angle_degrees),
            label: label.into(),
        }
    }

    pub fn incomplete() -> Self {
        Self {
            ready: false,
            angle_degrees: None,
            label: NOT_ALL_LANDMARKS_DEFINED.to_string(),
        }
    }
}

/// State of one row in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RowStatus {
    Ready { angle_degrees: f64, label: String },
    Incomplete,
    Failed { error: String },
}

/// One measurement's entry in a report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub id: MeasurementId,
    pub measurement: &'static str,
    #[serde(flatten)]
    pub status: RowStatus,
}

/// Every catalog measurement evaluated for one side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeasurementReport {
    pub side: Side,
    pub rows: Vec<ReportRow>,
}

impl MeasurementReport {
    /// Rows with a computed angle, as written to a measurement export
    pub fn ready_rows(&self) -> impl Iterator<Item = &ReportRow> {
        self.rows
            .iter()
            .filter(|row| matches!(row.status, RowStatus::Ready { .. }))
    }

    pub fn failed_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| matches!(row.status, RowStatus::Failed { .. }))
            .count()
    }
}
