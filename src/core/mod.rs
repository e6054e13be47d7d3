//! Core types and constants for bone angle measurement

pub mod types;
pub mod constants;
pub mod landmarks;

pub use types::*;
pub use constants::*;
pub use landmarks::{LandmarkCatalog, LandmarkDefinition};
