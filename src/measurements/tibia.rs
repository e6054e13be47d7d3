//! Measurements referenced to the tibial shaft axis

use super::labels::{ROTATION, VARUS_VALGUS};
use super::{AngleReading, LandmarkPoints, Measurement};
use crate::algorithms::geometry::{normal_from_two_vectors, signed_angle_in_plane, vector_between};
use crate::core::constants::*;
use crate::core::{MeasurementId, Side};
use crate::validation::MeasurementResult;
use nalgebra::Vector3;

/// Tibial shaft axis, pointing from the distal to the proximal midpoint
fn tibia_axis(points: &LandmarkPoints<'_>) -> MeasurementResult<Vector3<f64>> {
    Ok(vector_between(
        &points.get(DISTAL_TIBIA_MIDPOINT)?,
        &points.get(PROXIMAL_TIBIA_MIDPOINT)?,
    ))
}

/// Medial to lateral posterior tibial condyle
fn tibia_condyle_axis(points: &LandmarkPoints<'_>) -> MeasurementResult<Vector3<f64>> {
    Ok(vector_between(
        &points.get(CONDYLUS_MEDIALIS_TIBIAE)?,
        &points.get(CONDYLUS_LATERALIS_TIBIAE)?,
    ))
}

/// Medial to lateral edge of the distal tibial cochlea
fn cochlea_axis(points: &LandmarkPoints<'_>) -> MeasurementResult<Vector3<f64>> {
    Ok(vector_between(&points.get(MEDIAL_COCHLEA)?, &points.get(LATERAL_COCHLEA)?))
}

/// Rotation of the distal cochlea axis against the proximal condyle axis
#[derive(Debug, Clone, Copy, Default)]
pub struct TibiaTorsionMeasurement;

impl Measurement for TibiaTorsionMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::TibiaTorsion
    }

    fn description(&self) -> &'static str {
        "Torsion between the proximal condylar axis and the distal cochlea axis of the tibia, \
         measured in the plane perpendicular to the tibial shaft"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            DISTAL_TIBIA_MIDPOINT,
            PROXIMAL_TIBIA_MIDPOINT,
            MEDIAL_COCHLEA,
            LATERAL_COCHLEA,
            CONDYLUS_MEDIALIS_TIBIAE,
            CONDYLUS_LATERALIS_TIBIAE,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let normal = tibia_axis(points)?;
        let distal = cochlea_axis(points)?;
        let proximal = tibia_condyle_axis(points)?;

        let angle = signed_angle_in_plane(&normal, &proximal, &distal)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees,
            label: ROTATION.classify(side, angle.handedness),
        })
    }
}

/// Frontal-plane angle between the proximal and distal tibial joint lines
#[derive(Debug, Clone, Copy, Default)]
pub struct VarusValgusTibiaMeasurement;

impl Measurement for VarusValgusTibiaMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::VarusValgusTibia
    }

    fn description(&self) -> &'static str {
        "Angle between the proximal and distal tibial joint lines in the frontal plane \
         spanned by the tibial shaft and the condylar axis"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            DISTAL_TIBIA_MIDPOINT,
            PROXIMAL_TIBIA_MIDPOINT,
            CONDYLUS_MEDIALIS_TIBIAE,
            CONDYLUS_LATERALIS_TIBIAE,
            LATERAL_COCHLEA_ARTICULATION,
            MEDIAL_COCHLEA_ARTICULATION,
            LATERAL_CONDYLE_ARTICULATION,
            MEDIAL_CONDYLE_ARTICULATION,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let normal = normal_from_two_vectors(&tibia_axis(points)?, &tibia_condyle_axis(points)?);
        let proximal_joint_line = vector_between(
            &points.get(LATERAL_COCHLEA_ARTICULATION)?,
            &points.get(MEDIAL_COCHLEA_ARTICULATION)?,
        );
        let distal_joint_line = vector_between(
            &points.get(LATERAL_CONDYLE_ARTICULATION)?,
            &points.get(MEDIAL_CONDYLE_ARTICULATION)?,
        );

        let angle = signed_angle_in_plane(&normal, &proximal_joint_line, &distal_joint_line)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees,
            label: VARUS_VALGUS.classify(side, angle.handedness),
        })
    }
}

/// Rotation of the talus against the distal tibia
#[derive(Debug, Clone, Copy, Default)]
pub struct TibiotalarRotationMeasurement;

impl Measurement for TibiotalarRotationMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::TibiotalarRotation
    }

    fn description(&self) -> &'static str {
        "Rotation between the distal tibial cochlea axis and the talar dome axis, \
         measured in the plane perpendicular to the tibial shaft"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            DISTAL_TIBIA_MIDPOINT,
            PROXIMAL_TIBIA_MIDPOINT,
            MEDIAL_COCHLEA,
            LATERAL_COCHLEA,
            MEDIAL_TALUS,
            LATERAL_TALUS,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let normal = tibia_axis(points)?;
        let distal_tibia = cochlea_axis(points)?;
        let talus = vector_between(&points.get(MEDIAL_TALUS)?, &points.get(LATERAL_TALUS)?);

        let angle = signed_angle_in_plane(&normal, &distal_tibia, &talus)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees,
            label: ROTATION.classify(side, angle.handedness),
        })
    }
}

/// Rotation of the distal femur against the proximal tibia
#[derive(Debug, Clone, Copy, Default)]
pub struct FemorotibialRotationMeasurement;

impl Measurement for FemorotibialRotationMeasurement {
    fn id(&self) -> MeasurementId {
        MeasurementId::FemorotibialRotation
    }

    fn description(&self) -> &'static str {
        "Rotation between the posterior femoral condylar axis and the posterior tibial \
         condylar axis, measured in the plane perpendicular to the tibial shaft"
    }

    fn required_landmarks(&self) -> &'static [&'static str] {
        &[
            DISTAL_TIBIA_MIDPOINT,
            PROXIMAL_TIBIA_MIDPOINT,
            MEDIAL_FEMUR_CONDYLE,
            LATERAL_FEMUR_CONDYLE,
            CONDYLUS_MEDIALIS_TIBIAE,
            CONDYLUS_LATERALIS_TIBIAE,
        ]
    }

    fn measure(&self, points: &LandmarkPoints<'_>, side: Side) -> MeasurementResult<AngleReading> {
        let normal = tibia_axis(points)?;
        let distal_femur = vector_between(
            &points.get(MEDIAL_FEMUR_CONDYLE)?,
            &points.get(LATERAL_FEMUR_CONDYLE)?,
        );
        let proximal_tibia = tibia_condyle_axis(points)?;

        let angle = signed_angle_in_plane(&normal, &distal_femur, &proximal_tibia)?;

        Ok(AngleReading {
            angle_degrees: angle.degrees,
            label: ROTATION.classify(side, angle.handedness),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LandmarkPositions;
    use approx::assert_relative_eq;
    use nalgebra::Point3;

    fn torsion_landmarks(distal_angle_deg: f64) -> LandmarkPositions {
        let (sin, cos) = distal_angle_deg.to_radians().sin_cos();
        LandmarkPositions::new()
            .with(DISTAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 0.0))
            .with(PROXIMAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 10.0))
            .with(CONDYLUS_MEDIALIS_TIBIAE, Point3::new(0.0, 0.0, 10.0))
            .with(CONDYLUS_LATERALIS_TIBIAE, Point3::new(1.0, 0.0, 10.5))
            .with(MEDIAL_COCHLEA, Point3::new(0.0, 0.0, 1.0))
            .with(LATERAL_COCHLEA, Point3::new(cos, sin, 0.7))
    }

    #[test]
    fn test_tibia_torsion_right_and_left() {
        let positions = torsion_landmarks(30.0);
        let measurement = TibiaTorsionMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        let right = measurement.measure(&points, Side::Right).unwrap();
        assert_relative_eq!(right.angle_degrees, 30.0, epsilon = 1e-10);
        assert_eq!(right.label, "Innenrotation");

        let left = measurement.measure(&points, Side::Left).unwrap();
        assert_relative_eq!(left.angle_degrees, 30.0, epsilon = 1e-10);
        assert_eq!(left.label, "Aussenrotation");
    }

    #[test]
    fn test_tibia_torsion_opposite_rotation() {
        let positions = torsion_landmarks(-20.0);
        let measurement = TibiaTorsionMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        let right = measurement.measure(&points, Side::Right).unwrap();
        assert_relative_eq!(right.angle_degrees, 20.0, epsilon = 1e-10);
        assert_eq!(right.label, "Aussenrotation");
    }

    #[test]
    fn test_varus_valgus_tibia_in_frontal_plane() {
        // Shaft along z, condyles along x: the frontal plane is xz
        let (sin, cos) = 8.0f64.to_radians().sin_cos();
        let positions = LandmarkPositions::new()
            .with(DISTAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 0.0))
            .with(PROXIMAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 10.0))
            .with(CONDYLUS_MEDIALIS_TIBIAE, Point3::new(-1.0, 0.0, 10.0))
            .with(CONDYLUS_LATERALIS_TIBIAE, Point3::new(1.0, 0.0, 10.0))
            .with(LATERAL_COCHLEA_ARTICULATION, Point3::new(1.0, 0.0, 0.5))
            .with(MEDIAL_COCHLEA_ARTICULATION, Point3::new(0.0, 0.0, 0.5))
            .with(LATERAL_CONDYLE_ARTICULATION, Point3::new(1.0, 3.0, 9.5))
            .with(MEDIAL_CONDYLE_ARTICULATION, Point3::new(1.0 - cos, 3.0, 9.5 + sin));
        let measurement = VarusValgusTibiaMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        let right = measurement.measure(&points, Side::Right).unwrap();
        assert_relative_eq!(right.angle_degrees, 8.0, epsilon = 1e-10);
        assert_eq!(right.label, "Varus");
        assert_eq!(measurement.measure(&points, Side::Left).unwrap().label, "Valgus");
    }

    #[test]
    fn test_tibiotalar_rotation() {
        let positions = LandmarkPositions::new()
            .with(DISTAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 0.0))
            .with(PROXIMAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 10.0))
            .with(MEDIAL_COCHLEA, Point3::new(-1.0, 0.0, 0.5))
            .with(LATERAL_COCHLEA, Point3::new(1.0, 0.0, 0.5))
            .with(MEDIAL_TALUS, Point3::new(-1.0, 1.0, -1.0))
            .with(LATERAL_TALUS, Point3::new(1.0, -1.0, -1.0));
        let measurement = TibiotalarRotationMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        // Talus axis (2,-2,0) turns clockwise from the cochlea axis (2,0,0) about +z
        let right = measurement.measure(&points, Side::Right).unwrap();
        assert_relative_eq!(right.angle_degrees, 45.0, epsilon = 1e-10);
        assert_eq!(right.label, "Aussenrotation");
        assert_eq!(measurement.measure(&points, Side::Left).unwrap().label, "Innenrotation");
    }

    #[test]
    fn test_femorotibial_rotation() {
        let positions = LandmarkPositions::new()
            .with(DISTAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 0.0))
            .with(PROXIMAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 10.0))
            .with(MEDIAL_FEMUR_CONDYLE, Point3::new(-2.0, 0.0, 12.0))
            .with(LATERAL_FEMUR_CONDYLE, Point3::new(2.0, 0.0, 12.0))
            .with(CONDYLUS_MEDIALIS_TIBIAE, Point3::new(-1.0, 0.0, 10.0))
            .with(CONDYLUS_LATERALIS_TIBIAE, Point3::new(1.0, 2.0 / 3.0f64.sqrt(), 10.0));
        let measurement = FemorotibialRotationMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        let right = measurement.measure(&points, Side::Right).unwrap();
        assert_relative_eq!(right.angle_degrees, 30.0, epsilon = 1e-10);
        assert_eq!(right.label, "Innenrotation");
    }

    #[test]
    fn test_collinear_shaft_is_degenerate() {
        let positions = torsion_landmarks(30.0).with(PROXIMAL_TIBIA_MIDPOINT, Point3::new(0.0, 0.0, 0.0));
        let measurement = TibiaTorsionMeasurement;
        let points = LandmarkPoints::new(&measurement, &positions);

        assert!(matches!(
            measurement.measure(&points, Side::Right),
            Err(crate::validation::MeasurementError::DegenerateGeometry { .. })
        ));
    }
}
