//! Static registry of measurements with landmark discovery and evaluation

use super::{
    AntetorsionMeasurement, FemorotibialRotationMeasurement, LandmarkPoints, Measurement,
    TibiaTorsionMeasurement, TibiotalarRotationMeasurement, VarusValgusFemurMeasurement,
    VarusValgusTibiaMeasurement,
};
use crate::api::types::{MeasurementInfo, MeasurementOutcome};
use crate::core::{LandmarkCatalog, LandmarkPositions, MeasurementId, Side};
use crate::utils::config::SolverConfig;
use crate::validation::{ensure_finite, ensure_registered, missing_landmarks, MeasurementError, MeasurementResult};
use log::{debug, warn};

/// Immutable, ordered set of measurements.
///
/// Built once and shared; evaluation takes all inputs as arguments, so one
/// catalog can serve both sides and concurrent callers.
pub struct MeasurementCatalog {
    measurements: Vec<Box<dyn Measurement>>,
}

impl MeasurementCatalog {
    /// The six built-in measurements, checked against the standard landmark catalog
    pub fn standard(solver: SolverConfig) -> MeasurementResult<Self> {
        Self::with_measurements(Self::builtin(solver), &LandmarkCatalog::standard())
    }

    /// Register measurements after checking ids are unique and every landmark
    /// they require is known
    pub fn with_measurements(
        measurements: Vec<Box<dyn Measurement>>,
        landmarks: &LandmarkCatalog,
    ) -> MeasurementResult<Self> {
        for (index, measurement) in measurements.iter().enumerate() {
            let id = measurement.id();
            if measurements[..index].iter().any(|earlier| earlier.id() == id) {
                return Err(MeasurementError::DuplicateMeasurement(id.key().to_string()));
            }
            ensure_registered(measurement.name(), measurement.required_landmarks(), landmarks)?;
        }
        debug!("Registered {} measurements", measurements.len());
        Ok(Self { measurements })
    }

    fn builtin(solver: SolverConfig) -> Vec<Box<dyn Measurement>> {
        vec![
            Box::new(TibiaTorsionMeasurement),
            Box::new(VarusValgusTibiaMeasurement),
            Box::new(TibiotalarRotationMeasurement),
            Box::new(FemorotibialRotationMeasurement),
            Box::new(VarusValgusFemurMeasurement),
            Box::new(AntetorsionMeasurement::new(solver)),
        ]
    }

    pub fn get(&self, id: MeasurementId) -> MeasurementResult<&dyn Measurement> {
        self.measurements
            .iter()
            .find(|m| m.id() == id)
            .map(|m| m.as_ref())
            .ok_or_else(|| MeasurementError::UnknownMeasurement(id.key().to_string()))
    }

    /// Catalog entries in display order
    pub fn list(&self) -> Vec<MeasurementInfo> {
        self.measurements
            .iter()
            .map(|m| MeasurementInfo {
                id: m.id(),
                name: m.name(),
                description: m.description(),
            })
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Measurement> {
        self.measurements.iter().map(|m| m.as_ref())
    }

    pub fn len(&self) -> usize {
        self.measurements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measurements.is_empty()
    }

    /// Landmark names a measurement needs, without evaluating anything
    pub fn required_landmark_names(&self, id: MeasurementId) -> MeasurementResult<&'static [&'static str]> {
        Ok(self.get(id)?.required_landmarks())
    }

    /// Evaluate one measurement for one side.
    ///
    /// Missing landmarks produce a not-ready outcome; geometry and solver
    /// failures are returned as errors.
    pub fn evaluate(
        &self,
        id: MeasurementId,
        positions: &LandmarkPositions,
        side: Side,
    ) -> MeasurementResult<MeasurementOutcome> {
        Self::evaluate_measurement(self.get(id)?, positions, side)
    }

    /// Evaluate a measurement already taken from the catalog
    pub fn evaluate_measurement(
        measurement: &dyn Measurement,
        positions: &LandmarkPositions,
        side: Side,
    ) -> MeasurementResult<MeasurementOutcome> {
        let required = measurement.required_landmarks();

        let missing = missing_landmarks(required, positions);
        if !missing.is_empty() {
            debug!("{} ({}): missing landmarks {:?}", measurement.name(), side, missing);
            return Ok(MeasurementOutcome::incomplete());
        }
        ensure_finite(required, positions)?;

        let points = LandmarkPoints::new(measurement, positions);
        match measurement.measure(&points, side) {
            Ok(reading) => {
                debug!(
                    "{} ({}): {:.2}° {}",
                    measurement.name(),
                    side,
                    reading.angle_degrees,
                    reading.label
                );
                Ok(MeasurementOutcome::ready(reading.angle_degrees, reading.label))
            }
            Err(e) => {
                warn!("{} ({}) failed: {}", measurement.name(), side, e);
                Err(e)
            }
        }
    }
}
