//! Error types and input validation

pub mod error;
pub mod input;

pub use error::{MeasurementError, MeasurementResult};
pub use input::{ensure_finite, ensure_registered, missing_landmarks};
