use thiserror::Error;

/// Errors raised while setting up or evaluating a measurement.
///
/// An incomplete landmark set is not an error: evaluation reports it as a
/// not-ready outcome instead.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MeasurementError {
    /// Zero-length vector or normal, or an otherwise undefined angle
    #[error("degenerate geometry: {context}")]
    DegenerateGeometry { context: &'static str },

    /// A landmark coordinate is NaN or infinite
    #[error("landmark '{landmark}' has a non-finite coordinate")]
    NonFiniteCoordinate { landmark: String },

    /// Too few points for a sphere fit
    #[error("sphere fit needs at least {required} points, got {provided}")]
    InsufficientPoints { required: usize, provided: usize },

    /// Sphere fit exhausted its iteration budget
    #[error("sphere fit did not converge after {iterations} iterations (cost: {cost:.6e})")]
    FitDidNotConverge { iterations: usize, cost: f64 },

    #[error("unknown side '{0}', expected 'left' or 'right'")]
    InvalidSide(String),

    /// A measurement references a landmark missing from the landmark catalog
    #[error("measurement '{measurement}' references unknown landmark '{landmark}'")]
    UnknownLandmark { measurement: String, landmark: String },

    /// A measurement read a landmark it did not declare as required
    #[error("measurement '{measurement}' read undeclared landmark '{landmark}'")]
    UndeclaredLandmark { measurement: String, landmark: String },

    /// A declared landmark was read before it had a position
    #[error("landmark '{landmark}' has no position")]
    MissingLandmark { landmark: String },

    #[error("unknown measurement '{0}'")]
    UnknownMeasurement(String),

    /// Two catalog entries share the same id
    #[error("measurement '{0}' is registered more than once")]
    DuplicateMeasurement(String),
}

impl MeasurementError {
    pub(crate) fn degenerate(context: &'static str) -> Self {
        MeasurementError::DegenerateGeometry { context }
    }
}

/// Result type for measurement operations
pub type MeasurementResult<T> = Result<T, MeasurementError>;
