//! Clinical measurement algorithms and the catalog that dispatches them
//!
//! Each measurement declares the landmark names it reads as static data, so
//! the required landmarks can be listed without running any geometry.

pub mod catalog;
pub mod femur;
pub mod labels;
pub mod tibia;

use crate::core::{LandmarkPositions, MeasurementId, Side};
use crate::validation::{MeasurementError, MeasurementResult};
use nalgebra::Point3;

pub use catalog::MeasurementCatalog;
pub use femur::{AntetorsionMeasurement, VarusValgusFemurMeasurement};
pub use labels::LabelPair;
pub use tibia::{
    FemorotibialRotationMeasurement, TibiaTorsionMeasurement, TibiotalarRotationMeasurement,
    VarusValgusTibiaMeasurement,
};

/// Angle and clinical label produced by one measurement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AngleReading {
    pub angle_degrees: f64,
    pub label: &'static str,
}

/// A landmark-based angle measurement
pub trait Measurement: Send + Sync {
    fn id(&self) -> MeasurementId;

    fn name(&self) -> &'static str {
        self.id().display_name()
    }

    fn description(&self) -> &'static str;

    /// Landmark names read by [`measure`](Self::measure), in first-use order
    fn required_landmarks(&self) -> &'static [&'static str];

    /// Compute the angle from a complete set of landmarks
    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading>;
}

/// Read access to the landmarks a measurement declared
pub struct LandmarkPoints<'a> {
    measurement: &'static str,
    declared: &'static [&'static str],
    positions: &'a LandmarkPositions,
}

impl<'a> LandmarkPoints<'a> {
    pub fn new(measurement: &dyn Measurement, positions: &'a LandmarkPositions) -> Self {
        Self {
            measurement: measurement.name(),
            declared: measurement.required_landmarks(),
            positions,
        }
    }

    /// Position of a declared landmark.
    ///
    /// Reading a name the measurement did not declare is an error even when
    /// a position for it happens to be present.
    pub fn get(&self, name: &str) -> MeasurementResult<Point3<f64>> {
        if !self.declared.iter().any(|declared| *declared == name) {
            return Err(MeasurementError::UndeclaredLandmark {
                measurement: self.measurement.to_string(),
                landmark: name.to_string(),
            });
        }
        self.positions
            .get(name)
            .copied()
            .ok_or_else(|| MeasurementError::MissingLandmark { landmark: name.to_string() })
    }
}
