//! Entry point for callers: catalog listing, landmark discovery and evaluation

use super::types::{MeasurementInfo, MeasurementOutcome, MeasurementReport, ReportRow, RowStatus};
use crate::core::{LandmarkPositions, MeasurementId, Side};
use crate::measurements::MeasurementCatalog;
use crate::utils::config::MeterConfig;
use crate::validation::MeasurementResult;
use log::info;

/// Bone angle measurement service
pub struct BoneAngleMeter {
    catalog: MeasurementCatalog,
    config: MeterConfig,
}

impl BoneAngleMeter {
    /// Create a meter with the built-in measurements
    pub fn new(config: MeterConfig) -> MeasurementResult<Self> {
        let catalog = MeasurementCatalog::standard(config.solver.clone())?;
        Ok(Self { catalog, config })
    }

    /// Create a meter around an existing catalog
    pub fn with_catalog(catalog: MeasurementCatalog, config: MeterConfig) -> Self {
        Self { catalog, config }
    }

    pub fn config(&self) -> &MeterConfig {
        &self.config
    }

    pub fn catalog(&self) -> &MeasurementCatalog {
        &self.catalog
    }

    pub fn list_measurements(&self) -> Vec<MeasurementInfo> {
        self.catalog.list()
    }

    pub fn required_landmark_names(&self, id: MeasurementId) -> MeasurementResult<&'static [&'static str]> {
        self.catalog.required_landmark_names(id)
    }

    pub fn evaluate(
        &self,
        id: MeasurementId,
        positions: &LandmarkPositions,
        side: Side,
    ) -> MeasurementResult<MeasurementOutcome> {
        self.catalog.evaluate(id, positions, side)
    }

    /// Evaluate every measurement; a failing measurement only affects its own row
    pub fn evaluate_all(&self, positions: &LandmarkPositions, side: Side) -> MeasurementReport {
        let rows: Vec<ReportRow> = self
            .catalog
            .iter()
            .map(|measurement| {
                let status = match MeasurementCatalog::evaluate_measurement(measurement, positions, side) {
                    Ok(outcome) => match outcome.angle_degrees {
                        Some(angle_degrees) => RowStatus::Ready {
                            angle_degrees,
                            label: outcome.label,
                        },
                        None => RowStatus::Incomplete,
                    },
                    Err(e) => RowStatus::Failed { error: e.to_string() },
                };
                ReportRow {
                    id: measurement.id(),
                    measurement: measurement.name(),
                    status,
                }
            })
            .collect();

        let report = MeasurementReport { side, rows };
        info!(
            "Evaluated {} measurements for {} side: {} ready, {} failed",
            report.rows.len(),
            side,
            report.ready_rows().count(),
            report.failed_count()
        );
        report
    }
}
