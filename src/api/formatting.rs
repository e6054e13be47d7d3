//! Text and JSON rendering of measurement results

use super::types::{MeasurementOutcome, MeasurementReport, ReportRow, RowStatus};
use crate::utils::config::OutputConfig;

/// Human-readable formatter, e.g. `12.34° Varus`
pub struct TextFormatter {
    /// Decimal places for angles
    pub decimals: usize,
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self { decimals: 2 }
    }
}

impl TextFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            decimals: config.decimals,
        }
    }

    pub fn format_angle(&self, angle_degrees: f64, label: &str) -> String {
        format!("{:.*}\u{b0} {}", self.decimals, angle_degrees, label)
    }

    pub fn format_outcome(&self, outcome: &MeasurementOutcome) -> String {
        match outcome.angle_degrees {
            Some(angle) if outcome.ready => self.format_angle(angle, &outcome.label),
            _ => outcome.label.clone(),
        }
    }

    pub fn format_row(&self, row: &ReportRow) -> String {
        let result = match &row.status {
            RowStatus::Ready { angle_degrees, label } => self.format_angle(*angle_degrees, label),
            RowStatus::Incomplete => MeasurementOutcome::incomplete().label,
            RowStatus::Failed { error } => format!("Error executing measurement: {}", error),
        };
        format!("{}: {}", row.measurement, result)
    }

    pub fn format_report(&self, report: &MeasurementReport) -> String {
        let mut output = format!("Measurements - {}\n", report.side.as_str().to_uppercase());
        for row in &report.rows {
            output.push_str(&self.format_row(row));
            output.push('\n');
        }
        output
    }
}

/// JSON formatter for structured output
#[derive(Default)]
pub struct JsonFormatter {
    /// Pretty print JSON
    pub pretty: bool,
}

impl JsonFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pretty() -> Self {
        Self { pretty: true }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self {
            pretty: config.pretty_json,
        }
    }

    pub fn format_report(&self, report: &MeasurementReport) -> Result<String, serde_json::Error> {
        if self.pretty {
            serde_json::to_string_pretty(report)
        } else {
            serde_json::to_string(report)
        }
    }
}
