//! Configuration

pub mod config;

pub use config::{ConfigError, ConfigurationManager, MeterConfig, OutputConfig, SolverConfig};
