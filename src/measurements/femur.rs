//! Measurements referenced to the femoral shaft axis

use super::labels::{ANTETORSION, VARUS_VALGUS};
use super::{AngleReading, LandmarkPoints, Measurement};
use crate::algorithms::geometry::{normal_from_two_vectors, signed_angle_in_plane, vector_between};
use crate::algorithms::sphere_fit::{SphereFit, SphereFitter};
use crate::core::constants::*;
use crate::core::{MeasurementId, Side};
use crate::utils::config::SolverConfig;
use crate::validation::MeasurementResult;
use log::debug;
use nalgebra::Vector3;

/// Medial to lateral posterior femoral condyle
fn femur_condyle_axis(points: &LandmarkPoints<'_>) -> MeasurementResult<Vector3<f64>> {
    Ok(vector_between(
        &points.get(MEDIAL_FEMUR_CONDYLE)?,
        &points.get(LATERAL_FEMUR_CONDYLE)?,
    ))
}

/// Frontal-plane angle between the femoral shaft and the condylar axis
#[derive(Debug, Clone, Copy, Default)]
pub struct VarusValgusFemurMeasurement;

impl Measurement for VarusValgusFemurMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::VarusValgusFemur
    }

    fn description(&self) -> &'static str {
        "Deviation from a right angle between the femoral shaft axis and the distal \
         condylar axis in the frontal plane"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            PROXIMAL_FEMUR_MIDPOINT,
            DISTAL_FEMUR_MIDPOINT,
            MEDIAL_FEMUR_CONDYLE,
            LATERAL_FEMUR_CONDYLE,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let proximal = points.get(PROXIMAL_FEMUR_MIDPOINT)?;
        let distal = points.get(DISTAL_FEMUR_MIDPOINT)?;
        let condyle_axis = femur_condyle_axis(points)?;

        let normal = normal_from_two_vectors(&vector_between(&proximal, &distal), &condyle_axis);
        let shaft_axis = vector_between(&distal, &proximal);

        let angle = signed_angle_in_plane(&normal, &shaft_axis, &condyle_axis)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees - VARUS_VALGUS_FEMUR_OFFSET_DEG,
            label: VARUS_VALGUS.classify(side, angle.handedness),
        })
    }
}

/// Femoral neck rotation relative to the distal condylar axis
#[derive(Debug, Clone, Default)]
pub struct AntetorsionMeasurement {
    fitter: SphereFitter,
}

impl AntetorsionMeasurement {
    pub fn new(solver: SolverConfig) -> Self {
        Self {
            fitter: SphereFitter::new(solver),
        }
    }

    /// Femoral head center from the sampled head surface points
    pub fn femur_head(&self, points: &LandmarkPoints<'_>) -> MeasurementResult<SphereFit> {
        let samples = FEMUR_HEAD_POINTS
            .iter()
            .map(|name| points.get(name))
            .collect::<MeasurementResult<Vec<_>>>()?;
        let fit = self.fitter.fit(&samples)?;
        debug!(
            "Femoral head center at ({:.3}, {:.3}, {:.3}), radius {:.3}",
            fit.center.x, fit.center.y, fit.center.z, fit.radius
        );
        Ok(fit)
    }
}

impl Measurement for AntetorsionMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::Antetorsion
    }

    fn description(&self) -> &'static str {
        "Angle between the femoral neck axis (head center to neck) and the distal \
         condylar axis, measured in the plane perpendicular to the femoral shaft"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            FEMUR_HEAD_POINT_1,
            FEMUR_HEAD_POINT_2,
            FEMUR_HEAD_POINT_3,
            FEMUR_HEAD_POINT_4,
            FEMUR_HEAD_POINT_5,
            DISTAL_FEMUR_MIDPOINT,
            PROXIMAL_FEMUR_MIDPOINT,
            MEDIAL_FEMUR_CONDYLE,
            LATERAL_FEMUR_CONDYLE,
            FEMUR_NECK,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let head = self.femur_head(points)?;
        let normal = vector_between(
            &points.get(DISTAL_FEMUR_MIDPOINT)?,
            &points.get(PROXIMAL_FEMUR_MIDPOINT)?,
        );
        let condyle_axis = femur_condyle_axis(points)?;
        let neck_axis = vector_between(&head.center, &points.get(FEMUR_NECK)?);

        let angle = signed_angle_in_plane(&normal, &condyle_axis, &neck_axis)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees,
            label: ANTETORSION.classify(side, angle.handedness),
        })
    }
}
