use serde::{Deserialize, Serialize};

use super::Gender;

/// Sinclair formula constants for the current Olympic cycle.
///
/// Coefficient = 10 ^ (A · log10(BW / b)²), where `b` is the body weight of
/// the world record holder in the heaviest category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SinclairFormula {
    pub men: SinclairConstants,
    pub women: SinclairConstants,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SinclairConstants {
    pub a: f64,
    pub world_record_bodyweight: f64,
}

impl SinclairFormula {
    pub fn constants_for_gender(&self, gender: Gender) -> SinclairConstants {
        match gender {
            Gender::Male => self.men,
            Gender::Female => self.women,
        }
    }
}

impl Default for SinclairFormula {
    fn default() -> Self {
        Self {
            men: SinclairConstants {
                a: 0.704358141,
                world_record_bodyweight: 174.393,
            },
            women: SinclairConstants {
                a: 0.897260740,
                world_record_bodyweight: 148.026,
            },
        }
    }
}

/// Upper body-weight limits (kg) of each weight class, ascending. Anyone
/// heavier than the last limit lifts in the open-ended top class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightClassTable {
    pub men: Vec<u32>,
    pub women: Vec<u32>,
}

impl WeightClassTable {
    pub fn thresholds_for_gender(&self, gender: Gender) -> &[u32] {
        match gender {
            Gender::Male => &self.men,
            Gender::Female => &self.women,
        }
    }
}

impl Default for WeightClassTable {
    fn default() -> Self {
        Self {
            men: vec![56, 62, 69, 77, 85, 94, 105],
            women: vec![48, 53, 58, 63, 69, 75],
        }
    }
}

/// Lookup tables used by the scoring calculators. Loaded once and shared
/// read-only by every competition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    #[serde(default)]
    pub sinclair: SinclairFormula,
    #[serde(default)]
    pub weight_classes: WeightClassTable,
}
