//! Vector geometry kernel: plane projection and angles between anatomical axes
//!
//! All functions are pure. Degenerate inputs (zero-length vectors or normals,
//! non-finite values) are reported as errors rather than propagated as NaN.

use crate::core::DEGENERATE_NORM_EPSILON;
use crate::validation::{MeasurementError, MeasurementResult};
use nalgebra::{Point3, Vector3};

/// Unsigned angle between two in-plane vectors plus the handedness of the rotation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignedPlaneAngle {
    /// Unsigned angle in degrees, within [0, 180]
    pub degrees: f64,
    /// `(from × to) · normal`; its sign tells the two rotational senses apart
    pub handedness: f64,
}

/// Vector pointing from `from` to `to`
pub fn vector_between(from: &Point3<f64>, to: &Point3<f64>) -> Vector3<f64> {
    to - from
}

/// Normal of the plane through three points, `(l - k) × (l - m)`.
///
/// Collinear points give a zero vector; this is caught later by the projection.
pub fn normal_from_three_points(k: &Point3<f64>, l: &Point3<f64>, m: &Point3<f64>) -> Vector3<f64> {
    (l - k).cross(&(l - m))
}

pub fn normal_from_two_vectors(v1: &Vector3<f64>, v2: &Vector3<f64>) -> Vector3<f64> {
    v1.cross(v2)
}

/// In-plane component of `vector` for the plane with the given normal
pub fn project_onto_plane(normal: &Vector3<f64>, vector: &Vector3<f64>) -> MeasurementResult<Vector3<f64>> {
    let norm_squared = normal.norm_squared();
    if !norm_squared.is_finite() || normal.norm() <= DEGENERATE_NORM_EPSILON {
        return Err(MeasurementError::degenerate("zero-length plane normal"));
    }
    let normal_component = normal * (normal.dot(vector) / norm_squared);
    Ok(vector - normal_component)
}

/// Projection onto the plane spanned by two vectors
pub fn project_onto_plane_from_two_vectors(
    v1: &Vector3<f64>,
    v2: &Vector3<f64>,
    vector: &Vector3<f64>,
) -> MeasurementResult<Vector3<f64>> {
    let normal = normal_from_two_vectors(v1, v2);
    project_onto_plane(&normal, vector)
}

/// Unsigned angle between `u` and `v` in radians, within [0, π]
pub fn angle_between(u: &Vector3<f64>, v: &Vector3<f64>) -> MeasurementResult<f64> {
    let denominator = u.norm() * v.norm();
    if !denominator.is_finite() || u.norm() <= DEGENERATE_NORM_EPSILON || v.norm() <= DEGENERATE_NORM_EPSILON {
        return Err(MeasurementError::degenerate("zero-length vector in angle"));
    }
    let cosine = u.dot(v) / denominator;
    if cosine.is_nan() {
        return Err(MeasurementError::degenerate("undefined angle"));
    }
    // Rounding can push |cos| slightly above 1 for (anti)parallel vectors
    Ok(cosine.clamp(-1.0, 1.0).acos())
}

/// Angle in degrees between `a` and `b` after projecting both onto the plane with `normal`
pub fn angle_in_plane_with_normal(
    normal: &Vector3<f64>,
    a: &Vector3<f64>,
    b: &Vector3<f64>,
) -> MeasurementResult<f64> {
    let a_proj = project_onto_plane(normal, a)?;
    let b_proj = project_onto_plane(normal, b)?;
    Ok(angle_between(&a_proj, &b_proj)?.to_degrees())
}

/// Angle in degrees between `a` and `b` within the plane spanned by two vectors
pub fn angle_in_plane_from_two_vectors(
    plane_v1: &Vector3<f64>,
    plane_v2: &Vector3<f64>,
    a: &Vector3<f64>,
    b: &Vector3<f64>,
) -> MeasurementResult<f64> {
    let normal = normal_from_two_vectors(plane_v1, plane_v2);
    angle_in_plane_with_normal(&normal, a, b)
}

/// Project `from` and `to` onto the plane and measure the angle between them.
///
/// The handedness is `(from_proj × to_proj) · normal`, so swapping the
/// arguments flips its sign but leaves the angle unchanged.
pub fn signed_angle_in_plane(
    normal: &Vector3<f64>,
    from: &Vector3<f64>,
    to: &Vector3<f64>,
) -> MeasurementResult<SignedPlaneAngle> {
    let from_proj = project_onto_plane(normal, from)?;
    let to_proj = project_onto_plane(normal, to)?;
    let degrees = angle_between(&from_proj, &to_proj)?.to_degrees();
    let handedness = from_proj.cross(&to_proj).dot(normal);

    Ok(SignedPlaneAngle { degrees, handedness })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_vector_between_points_from_first_to_second() {
        let a = Point3::new(1.0, 2.0, 3.0);
        let b = Point3::new(4.0, 0.0, 3.5);
        assert_eq!(vector_between(&a, &b), Vector3::new(3.0, -2.0, 0.5));
    }

    #[test]
    fn test_normal_from_three_points() {
        let k = Point3::new(0.0, 0.0, 0.0);
        let l = Point3::new(1.0, 0.0, 0.0);
        let m = Point3::new(1.0, 1.0, 0.0);
        // (l - k) × (l - m) = (1,0,0) × (0,-1,0)
        assert_eq!(normal_from_three_points(&k, &l, &m), Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_collinear_points_fail_on_projection() {
        let k = Point3::new(0.0, 0.0, 0.0);
        let l = Point3::new(1.0, 1.0, 1.0);
        let m = Point3::new(2.0, 2.0, 2.0);
        let normal = normal_from_three_points(&k, &l, &m);

        let result = project_onto_plane(&normal, &Vector3::x());
        assert!(matches!(result, Err(MeasurementError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_projection_is_orthogonal_to_normal() {
        let normals = [
            Vector3::new(0.0, 0.0, 3.0),
            Vector3::new(1.0, -2.0, 0.5),
            Vector3::new(-7.5, 0.1, 2.2),
        ];
        let vectors = [
            Vector3::new(1.0, 1.0, 1.0),
            Vector3::new(-3.0, 0.25, 9.0),
            Vector3::new(0.0, 4.0, -1.0),
        ];

        for normal in &normals {
            for vector in &vectors {
                let projected = project_onto_plane(normal, vector).unwrap();
                assert_abs_diff_eq!(normal.dot(&projected), 0.0, epsilon = 1e-10);
            }
        }
    }

    #[test]
    fn test_projection_from_two_vectors_drops_out_of_plane_part() {
        let projected =
            project_onto_plane_from_two_vectors(&Vector3::x(), &Vector3::y(), &Vector3::new(2.0, 3.0, 4.0)).unwrap();
        assert_relative_eq!(projected, Vector3::new(2.0, 3.0, 0.0));
    }

    #[test]
    fn test_angle_between_is_symmetric_and_bounded() {
        let pairs = [
            (Vector3::new(1.0, 0.0, 0.0), Vector3::new(0.0, 1.0, 0.0)),
            (Vector3::new(1.0, 2.0, 3.0), Vector3::new(-3.0, 0.5, 1.0)),
            (Vector3::new(0.2, -1.0, 0.0), Vector3::new(-0.3, 1.0, 0.1)),
        ];

        for (u, v) in &pairs {
            let uv = angle_between(u, v).unwrap().to_degrees();
            let vu = angle_between(v, u).unwrap().to_degrees();
            assert!((0.0..=180.0).contains(&uv));
            assert_relative_eq!(uv, vu);
        }
        assert_relative_eq!(
            angle_between(&pairs[0].0, &pairs[0].1).unwrap(),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn test_angle_between_parallel_vectors_is_clamped() {
        let u = Vector3::new(0.1, 0.2, 0.3);
        let v = u * 3.0;
        assert_abs_diff_eq!(angle_between(&u, &v).unwrap(), 0.0, epsilon = 1e-7);
        assert_abs_diff_eq!(angle_between(&u, &(-v)).unwrap(), std::f64::consts::PI, epsilon = 1e-7);
    }

    #[test]
    fn test_angle_with_zero_vector_is_degenerate() {
        let result = angle_between(&Vector3::zeros(), &Vector3::x());
        assert!(matches!(result, Err(MeasurementError::DegenerateGeometry { .. })));
    }

    #[test]
    fn test_angle_in_plane_helpers_agree() {
        let a = Vector3::new(1.0, 0.0, 5.0);
        let b = Vector3::new(1.0, 1.0, -2.0);
        let with_normal = angle_in_plane_with_normal(&Vector3::z(), &a, &b).unwrap();
        let from_vectors = angle_in_plane_from_two_vectors(&Vector3::x(), &Vector3::y(), &a, &b).unwrap();

        assert_relative_eq!(with_normal, 45.0, epsilon = 1e-10);
        assert_relative_eq!(with_normal, from_vectors, epsilon = 1e-10);
    }

    #[test]
    fn test_signed_angle_handedness_follows_argument_order() {
        let normal = Vector3::z();
        let from = Vector3::new(1.0, 0.0, 0.3);
        let to = Vector3::new(1.0, 1.0, -0.8);

        let forward = signed_angle_in_plane(&normal, &from, &to).unwrap();
        let backward = signed_angle_in_plane(&normal, &to, &from).unwrap();

        assert_relative_eq!(forward.degrees, 45.0, epsilon = 1e-10);
        assert_relative_eq!(forward.degrees, backward.degrees);
        assert!(forward.handedness > 0.0);
        assert!(backward.handedness < 0.0);
    }
}
