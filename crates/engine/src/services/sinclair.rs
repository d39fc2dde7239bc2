use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::models::{Participant, SinclairConstants, SinclairFormula};

/// Sinclair coefficient for a lifter of the given body weight.
///
/// Coefficient = 10 ^ (A · log10(BW / b)²)
pub fn sinclair_coefficient(body_weight: Decimal, constants: &SinclairConstants) -> f64 {
    let body_weight = body_weight.to_f64().unwrap_or(0.0);
    let exponent = constants.a * (body_weight / constants.world_record_bodyweight).log10().powi(2);
    10f64.powf(exponent)
}

/// Unrounded Sinclair score of a participant: total multiplied by the
/// coefficient. Zero without a total or without a body weight.
pub fn sinclair_points(participant: &Participant, formula: &SinclairFormula) -> f64 {
    let total = participant.total_score();
    let body_weight = match participant.body_weight() {
        Some(bw) if bw > Decimal::ZERO => bw,
        _ => return 0.0,
    };
    if total == 0 {
        return 0.0;
    }

    let constants = formula.constants_for_gender(participant.gender());
    f64::from(total) * sinclair_coefficient(body_weight, &constants)
}

/// Sinclair score rounded to two decimals, for display.
pub fn compute_sinclair(participant: &Participant, formula: &SinclairFormula) -> Decimal {
    Decimal::from_f64_retain(sinclair_points(participant, formula))
        .map(|d| d.round_dp(2))
        .unwrap_or(Decimal::ZERO)
}
