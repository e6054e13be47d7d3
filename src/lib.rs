//! Bone Angle Meter
//!
//! Clinical bone deformity angles (tibial torsion, varus/valgus, femoral
//! antetorsion and related rotations) computed from named 3D anatomical
//! landmarks.

pub mod core;
pub mod algorithms;
pub mod measurements;
pub mod validation;
pub mod utils;
pub mod api;

// Re-export commonly used types
pub use crate::core::{LandmarkCatalog, LandmarkDefinition, LandmarkPositions, MeasurementId, Side};
pub use crate::algorithms::{fit_sphere, SphereFit, SphereFitter};
pub use crate::measurements::{AngleReading, LabelPair, LandmarkPoints, Measurement, MeasurementCatalog};
pub use crate::validation::{MeasurementError, MeasurementResult};
pub use crate::utils::{ConfigError, ConfigurationManager, MeterConfig, OutputConfig, SolverConfig};
pub use crate::api::{
    BoneAngleMeter, JsonFormatter, MeasurementInfo, MeasurementOutcome, MeasurementReport, ReportRow,
    RowStatus, TextFormatter,
};
