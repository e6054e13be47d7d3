//! Caller-facing API
//!
//! `BoneAngleMeter` lists the measurement catalog, reports which landmarks a
//! measurement needs, and evaluates measurements for a given side.

pub mod formatting;
pub mod meter;
pub mod types;

pub use formatting::{JsonFormatter, TextFormatter};
pub use meter::BoneAngleMeter;
pub use types::{MeasurementInfo, MeasurementOutcome, MeasurementReport, ReportRow, RowStatus};
