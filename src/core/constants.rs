//! Landmark names, status strings and numeric thresholds

/// Status reported when a measurement is evaluated before all of its landmarks are placed
pub const NOT_ALL_LANDMARKS_DEFINED: &str = "Not all landmarks defined";

/// Vectors and normals shorter than this are treated as degenerate
pub const DEGENERATE_NORM_EPSILON: f64 = 1e-12;

/// Fixed calibration offset subtracted from the raw Varus/Valgus Femur angle (degrees)
pub const VARUS_VALGUS_FEMUR_OFFSET_DEG: f64 = 90.0;

/// Minimum number of surface points for a sphere fit
pub const MIN_SPHERE_FIT_POINTS: usize = 4;

// Tibia
pub const DISTAL_TIBIA_MIDPOINT: &str = "distal tibia midpoint";
pub const PROXIMAL_TIBIA_MIDPOINT: &str = "proximal tibia midpoint";
pub const CONDYLUS_MEDIALIS_TIBIAE: &str = "condylus medialis tibiae";
pub const CONDYLUS_LATERALIS_TIBIAE: &str = "condylus lateralis tibiae";
pub const MEDIAL_COCHLEA: &str = "medial cochlea";
pub const LATERAL_COCHLEA: &str = "lateral cochlea";
pub const LATERAL_COCHLEA_ARTICULATION: &str = "lateral cochlea articulation point tibia";
pub const MEDIAL_COCHLEA_ARTICULATION: &str = "medial cochlea articulation point tibia";
pub const LATERAL_CONDYLE_ARTICULATION: &str = "lateral condyle articulation point tibia";
pub const MEDIAL_CONDYLE_ARTICULATION: &str = "medial condyle articulation point tibia";

// Talus
pub const MEDIAL_TALUS: &str = "medial talus";
pub const LATERAL_TALUS: &str = "lateral talus";

// Femur
pub const PROXIMAL_FEMUR_MIDPOINT: &str = "proximal femur midpoint";
pub const DISTAL_FEMUR_MIDPOINT: &str = "distal femur midpoint";
pub const MEDIAL_FEMUR_CONDYLE: &str = "medial femur condyle";
pub const LATERAL_FEMUR_CONDYLE: &str = "lateral femur condyle";
pub const FEMUR_NECK: &str = "femur neck";
pub const FEMUR_HEAD_POINT_1: &str = "point on femur head 1";
pub const FEMUR_HEAD_POINT_2: &str = "point on femur head 2";
pub const FEMUR_HEAD_POINT_3: &str = "point on femur head 3";
pub const FEMUR_HEAD_POINT_4: &str = "point on femur head 4";
pub const FEMUR_HEAD_POINT_5: &str = "point on femur head 5";
pub const FEMUR_HEAD_POINTS: [&str; 5] = [
    FEMUR_HEAD_POINT_1,
    FEMUR_HEAD_POINT_2,
    FEMUR_HEAD_POINT_3,
    FEMUR_HEAD_POINT_4,
    FEMUR_HEAD_POINT_5,
];
