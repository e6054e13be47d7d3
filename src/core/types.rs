//! Core data types for landmark-based bone angle measurement

use crate::validation::error::MeasurementError;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Limb side a measurement session belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// The contralateral side
    pub fn opposite(&self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl FromStr for Side {
    type Err = MeasurementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Side::Left),
            "right" => Ok(Side::Right),
            _ => Err(MeasurementError::InvalidSide(s.to_string())),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifier of a measurement in the static catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementId {
    TibiaTorsion,
    VarusValgusTibia,
    TibiotalarRotation,
    FemorotibialRotation,
    VarusValgusFemur,
    Antetorsion,
}

impl MeasurementId {
    /// All measurements in catalog order
    pub const ALL: [MeasurementId; 6] = [
        MeasurementId::TibiaTorsion,
        MeasurementId::VarusValgusTibia,
        MeasurementId::TibiotalarRotation,
        MeasurementId::FemorotibialRotation,
        MeasurementId::VarusValgusFemur,
        MeasurementId::Antetorsion,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MeasurementId::TibiaTorsion => "Tibia Torsion",
            MeasurementId::VarusValgusTibia => "Varus Valgus Tibia",
            MeasurementId::TibiotalarRotation => "Tibiotalar Rotation",
            MeasurementId::FemorotibialRotation => "Femorotibial Rotation",
            MeasurementId::VarusValgusFemur => "Varus Valgus Femur",
            MeasurementId::Antetorsion => "Antetorsion",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            MeasurementId::TibiaTorsion => "tibia_torsion",
            MeasurementId::VarusValgusTibia => "varus_valgus_tibia",
            MeasurementId::TibiotalarRotation => "tibiotalar_rotation",
            MeasurementId::FemorotibialRotation => "femorotibial_rotation",
            MeasurementId::VarusValgusFemur => "varus_valgus_femur",
            MeasurementId::Antetorsion => "antetorsion",
        }
    }
}

impl FromStr for MeasurementId {
    type Err = MeasurementError;

    /// Accepts either the snake_case key or the display name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        MeasurementId::ALL
            .iter()
            .copied()
            .find(|id| id.key() == wanted || id.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| MeasurementError::UnknownMeasurement(s.to_string()))
    }
}

impl fmt::Display for MeasurementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Placed landmark coordinates keyed by landmark name.
///
/// A missing key means the landmark has not been placed yet. All points of
/// one session share the same coordinate frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LandmarkPositions {
    positions: HashMap<String, Point3<f64>>,
}

impl LandmarkPositions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place or move a landmark
    pub fn insert(&mut self, name: impl Into<String>, position: Point3<f64>) -> Option<Point3<f64>> {
        self.positions.insert(name.into(), position)
    }

    /// Builder-style variant of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, position: Point3<f64>) -> Self {
        self.insert(name, position);
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<Point3<f64>> {
        self.positions.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Point3<f64>> {
        self.positions.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Point3<f64>)> {
        self.positions.iter().map(|(name, point)| (name.as_str(), point))
    }
}

impl<S: Into<String>> FromIterator<(S, Point3<f64>)> for LandmarkPositions {
    fn from_iter<I: IntoIterator<Item = (S, Point3<f64>)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().map(|(name, point)| (name.into(), point)).collect(),
        }
    }
}
