//! Geometry kernel and sphere fitting

pub mod geometry;
pub mod sphere_fit;

pub use geometry::SignedPlaneAngle;
pub use sphere_fit::{fit_sphere, SphereFit, SphereFitter};
