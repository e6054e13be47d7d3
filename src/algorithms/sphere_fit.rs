//! Least-squares sphere fit used to locate the femoral head center
//!
//! Minimizes `Σ (‖p_i - c‖ - r)²` over `(c_x, c_y, c_z, r)` with a
//! Levenberg-Marquardt iteration. The Jacobian is estimated with central
//! (3-point) finite differences.

use crate::core::{DEGENERATE_NORM_EPSILON, MIN_SPHERE_FIT_POINTS};
use crate::utils::config::SolverConfig;
use crate::validation::{MeasurementError, MeasurementResult};
use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector, Point3};

const PARAMETER_COUNT: usize = 4;

/// Smallest-to-largest spread ratio below which samples count as coplanar
const COPLANAR_RATIO: f64 = 1e-9;

/// Best-fit sphere and fit diagnostics
#[derive(Debug, Clone, PartialEq)]
pub struct SphereFit {
    pub center: Point3<f64>,
    pub radius: f64,
    /// Iterations used by the solver
    pub iterations: usize,
    /// Root mean square of the radial residuals
    pub rms_residual: f64,
}

/// Levenberg-Marquardt sphere fitter
#[derive(Debug, Clone, Default)]
pub struct SphereFitter {
    pub config: SolverConfig,
}

impl SphereFitter {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Fit a sphere to at least four non-coplanar points
    pub fn fit(&self, points: &[Point3<f64>]) -> MeasurementResult<SphereFit> {
        if points.len() < MIN_SPHERE_FIT_POINTS {
            return Err(MeasurementError::InsufficientPoints {
                required: MIN_SPHERE_FIT_POINTS,
                provided: points.len(),
            });
        }
        if points.iter().any(|p| !p.coords.iter().all(|c| c.is_finite())) {
            return Err(MeasurementError::degenerate("non-finite sphere sample point"));
        }
        check_spread(points)?;

        let mut params = initial_guess(points);
        let mut residuals = compute_residuals(points, &params);
        let mut cost = 0.5 * residuals.norm_squared();
        let mut lambda = self.config.initial_damping;
        let mut nu = 2.0;
        let mut first_iteration = true;

        for iteration in 1..=self.config.max_iterations {
            let jacobian = compute_jacobian(points, &params);
            let gradient = jacobian.transpose() * &residuals;
            let jt_j = jacobian.transpose() * &jacobian;

            if gradient.amax() <= self.config.gradient_tolerance {
                return Ok(self.finish(points, &params, iteration, "gradient"));
            }

            if first_iteration {
                // Scale the damping to the problem
                lambda *= jt_j.diagonal().max().max(1.0);
                first_iteration = false;
            }

            // Marquardt scaling of the damping term
            let mut augmented = jt_j.clone();
            for i in 0..PARAMETER_COUNT {
                augmented[(i, i)] += lambda * jt_j[(i, i)].max(1e-12);
            }

            let step = match solve_linear_system(&augmented, &(-&gradient)) {
                Some(step) if step.iter().all(|s| s.is_finite()) => step,
                _ => {
                    warn!("Sphere fit: damped normal equations could not be solved");
                    return Err(MeasurementError::FitDidNotConverge {
                        iterations: iteration,
                        cost,
                    });
                }
            };

            let tolerance = self.config.parameter_tolerance;
            let step_converged = step.norm() <= tolerance * (params.norm() + tolerance);

            let candidate = &params + &step;
            let candidate_residuals = compute_residuals(points, &candidate);
            let candidate_cost = 0.5 * candidate_residuals.norm_squared();

            let predicted_reduction = -(gradient.dot(&step) + 0.5 * step.dot(&(&jt_j * &step)));
            let actual_reduction = cost - candidate_cost;
            let gain_ratio = if predicted_reduction.abs() > 1e-300 {
                actual_reduction / predicted_reduction
            } else {
                0.0
            };

            trace!(
                "Sphere fit iteration {}: cost={:.6e} lambda={:.3e} gain={:.3}",
                iteration, cost, lambda, gain_ratio
            );

            if candidate_cost.is_finite() && actual_reduction > 0.0 && gain_ratio > 0.0 {
                params = candidate;
                residuals = candidate_residuals;
                let previous_cost = cost;
                cost = candidate_cost;

                lambda *= (1.0 / 3.0f64).max(1.0 - (2.0 * gain_ratio - 1.0).powi(3));
                nu = 2.0;

                // Both the achieved and the model-predicted reduction must be negligible
                let negligible = self.config.function_tolerance * previous_cost;
                if actual_reduction <= negligible && predicted_reduction <= negligible {
                    return Ok(self.finish(points, &params, iteration, "cost reduction"));
                }
            } else {
                lambda *= nu;
                nu *= 2.0;
            }

            if step_converged {
                return Ok(self.finish(points, &params, iteration, "step size"));
            }
        }

        warn!(
            "Sphere fit did not converge within {} iterations (cost {:.6e})",
            self.config.max_iterations, cost
        );
        Err(MeasurementError::FitDidNotConverge {
            iterations: self.config.max_iterations,
            cost,
        })
    }

    fn finish(&self, points: &[Point3<f64>], params: &DVector<f64>, iterations: usize, criterion: &str) -> SphereFit {
        // The objective is not symmetric in r, but a negative radius is meaningless;
        // diagnostics are computed at the reported radius
        let mut reported = params.clone();
        reported[3] = params[3].abs();
        let residuals = compute_residuals(points, &reported);
        let rms_residual = (residuals.norm_squared() / residuals.len() as f64).sqrt();
        debug!(
            "Sphere fit converged on {} after {} iterations (rms residual {:.3e})",
            criterion, iterations, rms_residual
        );
        SphereFit {
            center: Point3::new(reported[0], reported[1], reported[2]),
            radius: reported[3],
            iterations,
            rms_residual,
        }
    }
}

/// Convenience wrapper using the default solver configuration
pub fn fit_sphere(points: &[Point3<f64>]) -> MeasurementResult<SphereFit> {
    SphereFitter::default().fit(points)
}

/// Centroid of the points and half the diagonal of their bounding box
fn initial_guess(points: &[Point3<f64>]) -> DVector<f64> {
    let centroid = points.iter().fold(nalgebra::Vector3::<f64>::zeros(), |acc, p| acc + p.coords) / points.len() as f64;

    let mut min_corner = points[0].coords;
    let mut max_corner = points[0].coords;
    for point in &points[1..] {
        min_corner = min_corner.inf(&point.coords);
        max_corner = max_corner.sup(&point.coords);
    }
    let radius = (min_corner - max_corner).norm() / 2.0;

    DVector::from_column_slice(&[centroid.x, centroid.y, centroid.z, radius])
}

/// Reject coincident or coplanar samples, which do not determine a unique sphere
fn check_spread(points: &[Point3<f64>]) -> MeasurementResult<()> {
    let centroid = points.iter().fold(nalgebra::Vector3::<f64>::zeros(), |acc, p| acc + p.coords) / points.len() as f64;
    let centered = DMatrix::from_fn(3, points.len(), |row, col| points[col][row] - centroid[row]);
    let singular_values = centered.singular_values();

    let largest = singular_values.max();
    if largest <= DEGENERATE_NORM_EPSILON {
        return Err(MeasurementError::degenerate("coincident sphere sample points"));
    }
    if singular_values.min() <= COPLANAR_RATIO * largest {
        return Err(MeasurementError::degenerate("coplanar sphere sample points"));
    }
    Ok(())
}

/// Radial residual `‖p_i - c‖ - r` for every point
fn compute_residuals(points: &[Point3<f64>], params: &DVector<f64>) -> DVector<f64> {
    let center = Point3::new(params[0], params[1], params[2]);
    DVector::from_iterator(
        points.len(),
        points.iter().map(|p| (p - center).norm() - params[3]),
    )
}

/// Central-difference Jacobian of the residuals with respect to the parameters
fn compute_jacobian(points: &[Point3<f64>], params: &DVector<f64>) -> DMatrix<f64> {
    let mut jacobian = DMatrix::zeros(points.len(), PARAMETER_COUNT);
    let relative_step = f64::EPSILON.cbrt();

    for j in 0..PARAMETER_COUNT {
        let h = relative_step * params[j].abs().max(1.0);
        let mut forward = params.clone();
        let mut backward = params.clone();
        forward[j] += h;
        backward[j] -= h;

        let column = (compute_residuals(points, &forward) - compute_residuals(points, &backward)) / (2.0 * h);
        jacobian.set_column(j, &column);
    }

    jacobian
}

fn solve_linear_system(a: &DMatrix<f64>, b: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = a.clone().svd(true, true);
    svd.solve(b, 1e-14).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn points_on_sphere(center: Point3<f64>, radius: f64) -> Vec<Point3<f64>> {
        let directions = [
            (1.0, 0.0, 0.0),
            (0.0, 1.0, 0.0),
            (0.0, 0.0, 1.0),
            (-1.0, 0.0, 0.0),
            (0.0, -0.6, 0.8),
            (0.48, 0.6, -0.64),
            (-0.36, -0.48, -0.8),
            (0.0, 0.0, -1.0),
        ];
        directions
            .iter()
            .map(|&(x, y, z)| center + nalgebra::Vector3::new(x, y, z) * radius)
            .collect()
    }

    #[test]
    fn test_exact_sphere_is_recovered() {
        let center = Point3::new(1.0, -2.0, 3.0);
        let radius = 5.0;
        let fit = fit_sphere(&points_on_sphere(center, radius)).unwrap();

        assert_relative_eq!(fit.center, center, epsilon = 1e-6);
        assert_relative_eq!(fit.radius, radius, max_relative = 1e-6);
        assert!(fit.rms_residual < 1e-6);
    }

    #[test]
    fn test_partial_cap_of_femoral_head() {
        // Five points clustered on one hemisphere, as placed on a femoral head
        let center = Point3::new(-40.0, 12.5, 310.0);
        let radius = 23.0;
        let directions = [
            nalgebra::Vector3::new(0.0, 0.0, 1.0),
            nalgebra::Vector3::new(0.6, 0.0, 0.8),
            nalgebra::Vector3::new(-0.6, 0.0, 0.8),
            nalgebra::Vector3::new(0.0, 0.6, 0.8),
            nalgebra::Vector3::new(0.0, -0.8, 0.6),
        ];
        let points: Vec<_> = directions.iter().map(|d| center + d * radius).collect();

        let fit = fit_sphere(&points).unwrap();
        assert_relative_eq!(fit.center, center, epsilon = 1e-5);
        assert_relative_eq!(fit.radius, radius, max_relative = 1e-6);
    }

    #[test]
    fn test_noisy_points_give_close_fit() {
        let center = Point3::new(0.0, 0.0, 0.0);
        let mut points = points_on_sphere(center, 10.0);
        let noise = [0.05, -0.03, 0.02, -0.04, 0.01, 0.03, -0.02, -0.01];
        for (point, n) in points.iter_mut().zip(noise.iter()) {
            let direction = point.coords.normalize();
            *point += direction * *n;
        }

        let fit = fit_sphere(&points).unwrap();
        assert!((fit.center - center).norm() < 0.1);
        assert!((fit.radius - 10.0).abs() < 0.1);
    }

    #[test]
    fn test_too_few_points() {
        let points = vec![Point3::origin(), Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 0.0)];
        assert_eq!(
            fit_sphere(&points),
            Err(MeasurementError::InsufficientPoints { required: 4, provided: 3 })
        );
    }

    #[test]
    fn test_coplanar_points_are_rejected() {
        let points = vec![
            Point3::new(1.0, 0.0, 2.0),
            Point3::new(0.0, 1.0, 2.0),
            Point3::new(-1.0, 0.0, 2.0),
            Point3::new(0.0, -1.0, 2.0),
            Point3::new(0.6, 0.8, 2.0),
        ];
        assert!(matches!(
            fit_sphere(&points),
            Err(MeasurementError::DegenerateGeometry { context: "coplanar sphere sample points" })
        ));
    }

    #[test]
    fn test_coincident_points_are_rejected() {
        let points = vec![Point3::new(2.0, 2.0, 2.0); 5];
        assert!(matches!(
            fit_sphere(&points),
            Err(MeasurementError::DegenerateGeometry { context: "coincident sphere sample points" })
        ));
    }

    #[test]
    fn test_iteration_budget_is_respected() {
        let config = SolverConfig {
            max_iterations: 1,
            ..SolverConfig::default()
        };
        let center = Point3::new(100.0, 50.0, -20.0);
        let result = SphereFitter::new(config).fit(&points_on_sphere(center, 3.0));

        assert!(matches!(result, Err(MeasurementError::FitDidNotConverge { iterations: 1, .. })));
    }

    #[test]
    fn test_initial_guess_uses_centroid_and_half_diagonal() {
        let points = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
            Point3::new(2.0, 2.0, 2.0),
        ];
        let guess = initial_guess(&points);

        assert_relative_eq!(guess[0], 1.0);
        assert_relative_eq!(guess[1], 1.0);
        assert_relative_eq!(guess[2], 0.5);
        assert_relative_eq!(guess[3], 12.0f64.sqrt() / 2.0);
    }

    #[test]
    fn test_diagnostics_use_reported_radius() {
        let center = Point3::new(1.0, 2.0, 3.0);
        let points = points_on_sphere(center, 2.0);
        let params = DVector::from_column_slice(&[1.0, 2.0, 3.0, -2.0]);

        let fit = SphereFitter::default().finish(&points, &params, 7, "test");
        assert_relative_eq!(fit.radius, 2.0);
        assert!(fit.rms_residual < 1e-12);
        assert_eq!(fit.iterations, 7);
    }

    #[test]
    fn test_narrow_caps_are_recovered() {
        // Pole, a ring at the half-angle and one point in between
        let caps: [(Point3<f64>, f64, f64); 3] = [
            (Point3::new(12.0, -7.0, 95.0), 21.5, 0.54),
            (Point3::new(-3.0, 40.0, 10.0), 8.0, 0.45),
            (Point3::new(0.5, 0.5, -60.0), 30.0, 0.6),
        ];
        for (center, radius, half_angle) in caps {
            let mut directions = vec![nalgebra::Vector3::new(0.0, 0.0, 1.0)];
            for k in 0..3 {
                let azimuth = k as f64 * 2.0 * std::f64::consts::PI / 3.0;
                directions.push(nalgebra::Vector3::new(
                    half_angle.sin() * azimuth.cos(),
                    half_angle.sin() * azimuth.sin(),
                    half_angle.cos(),
                ));
            }
            let polar: f64 = half_angle / 2.0;
            directions.push(nalgebra::Vector3::new(0.0, polar.sin(), polar.cos()));

            let points: Vec<_> = directions.iter().map(|d| center + d * radius).collect();
            let fit = fit_sphere(&points).unwrap();

            assert_relative_eq!(fit.center, center, epsilon = 1e-4);
            assert_relative_eq!(fit.radius, radius, max_relative = 1e-5);
        }
    }
}
