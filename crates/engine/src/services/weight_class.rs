use rust_decimal::Decimal;

use crate::models::{Gender, WeightClassTable};

/// 1-based weight class of a lifter: one more than the number of class limits
/// the body weight exceeds. Lifters above the last limit share the top class.
pub fn find_weight_class(gender: Gender, body_weight: Decimal, table: &WeightClassTable) -> u32 {
    let exceeded = table
        .thresholds_for_gender(gender)
        .iter()
        .filter(|&&limit| body_weight > Decimal::from(limit))
        .count();
    exceeded as u32 + 1
}
