//! Catalog of anatomical landmarks that can be placed by the user

use super::constants::*;
use serde::Serialize;

/// A named anatomical landmark with a short placement hint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LandmarkDefinition {
    pub name: &'static str,
    pub description: &'static str,
}

impl LandmarkDefinition {
    pub const fn new(name: &'static str, description: &'static str) -> Self {
        Self { name, description }
    }
}

/// Ordered set of landmark definitions
#[derive(Debug, Clone)]
pub struct LandmarkCatalog {
    landmarks: Vec<LandmarkDefinition>,
}

impl LandmarkCatalog {
    /// Build a catalog from explicit definitions
    pub fn new(landmarks: Vec<LandmarkDefinition>) -> Self {
        Self { landmarks }
    }

    /// Every landmark referenced by the built-in measurements
    pub fn standard() -> Self {
        let mut landmarks = vec![
            LandmarkDefinition::new(PROXIMAL_TIBIA_MIDPOINT, "Center of the tibial plateau between both intercondylar tubercles"),
            LandmarkDefinition::new(DISTAL_TIBIA_MIDPOINT, "Center of the distal tibial articular surface"),
            LandmarkDefinition::new(CONDYLUS_MEDIALIS_TIBIAE, "Most posterior point of the medial tibial condyle"),
            LandmarkDefinition::new(CONDYLUS_LATERALIS_TIBIAE, "Most posterior point of the lateral tibial condyle"),
            LandmarkDefinition::new(MEDIAL_COCHLEA, "Medial edge of the distal tibial cochlea"),
            LandmarkDefinition::new(LATERAL_COCHLEA, "Lateral edge of the distal tibial cochlea"),
            LandmarkDefinition::new(LATERAL_COCHLEA_ARTICULATION, "Lateral end of the distal tibial joint line"),
            LandmarkDefinition::new(MEDIAL_COCHLEA_ARTICULATION, "Medial end of the distal tibial joint line"),
            LandmarkDefinition::new(LATERAL_CONDYLE_ARTICULATION, "Lateral end of the proximal tibial joint line"),
            LandmarkDefinition::new(MEDIAL_CONDYLE_ARTICULATION, "Medial end of the proximal tibial joint line"),
            LandmarkDefinition::new(MEDIAL_TALUS, "Medial edge of the talar dome"),
            LandmarkDefinition::new(LATERAL_TALUS, "Lateral edge of the talar dome"),
            LandmarkDefinition::new(PROXIMAL_FEMUR_MIDPOINT, "Center of the femoral shaft below the lesser trochanter"),
            LandmarkDefinition::new(DISTAL_FEMUR_MIDPOINT, "Center of the intercondylar notch"),
            LandmarkDefinition::new(MEDIAL_FEMUR_CONDYLE, "Most posterior point of the medial femoral condyle"),
            LandmarkDefinition::new(LATERAL_FEMUR_CONDYLE, "Most posterior point of the lateral femoral condyle"),
            LandmarkDefinition::new(FEMUR_NECK, "Center of the femoral neck at its narrowest point"),
        ];
        landmarks.extend(
            FEMUR_HEAD_POINTS
                .iter()
                .map(|name| LandmarkDefinition::new(*name, "Point on the articular surface of the femoral head")),
        );
        Self { landmarks }
    }

    pub fn get(&self, name: &str) -> Option<&LandmarkDefinition> {
        self.landmarks.iter().find(|landmark| landmark.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LandmarkDefinition> {
        self.landmarks.iter()
    }

    pub fn len(&self) -> usize {
        self.landmarks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.landmarks.is_empty()
    }
}

impl Default for LandmarkCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
