//! Checks on supplied landmark positions before a measurement runs

use super::error::{MeasurementError, MeasurementResult};
use crate::core::{LandmarkCatalog, LandmarkPositions};

/// Required landmarks that have no position yet, in declaration order
pub fn missing_landmarks<'a>(required: &[&'a str], positions: &LandmarkPositions) -> Vec<&'a str> {
    required
        .iter()
        .copied()
        .filter(|name| !positions.contains(name))
        .collect()
}

/// Reject NaN or infinite coordinates among the required landmarks
pub fn ensure_finite(required: &[&str], positions: &LandmarkPositions) -> MeasurementResult<()> {
    for name in required {
        if let Some(point) = positions.get(name) {
            if !point.coords.iter().all(|c| c.is_finite()) {
                return Err(MeasurementError::NonFiniteCoordinate {
                    landmark: name.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Every required landmark must exist in the landmark catalog
pub fn ensure_registered(
    measurement: &str,
    required: &[&str],
    catalog: &LandmarkCatalog,
) -> MeasurementResult<()> {
    match required.iter().find(|name| !catalog.contains(name)) {
        Some(name) => Err(MeasurementError::UnknownLandmark {
            measurement: measurement.to_string(),
            landmark: name.to_string(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn test_missing_landmarks_keeps_order() {
        let positions = LandmarkPositions::new().with("b", Point3::origin());
        assert_eq!(missing_landmarks(&["a", "b", "c"], &positions), vec!["a", "c"]);
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected() {
        let positions = LandmarkPositions::new()
            .with("a", Point3::new(0.0, 1.0, 2.0))
            .with("b", Point3::new(f64::NAN, 0.0, 0.0));

        assert!(ensure_finite(&["a"], &positions).is_ok());
        assert_eq!(
            ensure_finite(&["a", "b"], &positions),
            Err(MeasurementError::NonFiniteCoordinate { landmark: "b".into() })
        );
    }

    #[test]
    fn test_unregistered_landmark_is_reported() {
        let catalog = LandmarkCatalog::standard();
        let err = ensure_registered("Custom", &["femur neck", "patella apex"], &catalog).unwrap_err();
        assert_eq!(
            err,
            MeasurementError::UnknownLandmark {
                measurement: "Custom".into(),
                landmark: "patella apex".into()
            }
        );
    }
}
