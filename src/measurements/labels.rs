//! Side-dependent mapping from rotational sense to clinical label

use crate::core::Side;

/// The two clinical labels of a measurement.
///
/// `positive` is reported for a right limb with positive handedness; the
/// left limb and negative handedness each flip the choice. Zero handedness
/// counts as negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelPair {
    pub positive: &'static str,
    pub negative: &'static str,
}

pub const ROTATION: LabelPair = LabelPair {
    positive: "Innenrotation",
    negative: "Aussenrotation",
};

pub const VARUS_VALGUS: LabelPair = LabelPair {
    positive: "Varus",
    negative: "Valgus",
};

pub const ANTETORSION: LabelPair = LabelPair {
    positive: "no Antetorsion",
    negative: "Antetorsion",
};

impl LabelPair {
    pub fn classify(&self, side: Side, handedness: f64) -> &'static str {
        match (side, handedness > 0.0) {
            (Side::Right, true) | (Side::Left, false) => self.positive,
            (Side::Right, false) | (Side::Left, true) => self.negative,
        }
    }
}
