use std::cmp::Ordering;

use crate::models::participant::{ATTEMPTS_PER_LIFT, TOTAL_ATTEMPTS};
use crate::models::{GroupPurpose, Participant, ScoringConfig, SinclairFormula};

/// How the members of a group are ordered. Each group purpose maps to
/// exactly one strategy.
#[derive(Debug, Clone, Copy)]
pub enum OrderingStrategy<'a> {
    /// Lifting order: who is next on the platform.
    Competing,
    /// Placement by Sinclair score, best first.
    SinclairRanking(&'a SinclairFormula),
    /// Placement by total, best first.
    TotalWeightRanking,
}

impl<'a> OrderingStrategy<'a> {
    pub fn for_purpose(purpose: GroupPurpose, scoring: &'a ScoringConfig) -> Self {
        match purpose {
            GroupPurpose::Competing => Self::Competing,
            GroupPurpose::SinclairRanking => Self::SinclairRanking(&scoring.sinclair),
            GroupPurpose::TotalWeightRanking => Self::TotalWeightRanking,
        }
    }

    pub fn compare(&self, p1: &Participant, p2: &Participant) -> Ordering {
        match self {
            Self::Competing => compare_competing(p1, p2),
            Self::SinclairRanking(formula) => compare_sinclair(p1, p2, formula),
            Self::TotalWeightRanking => compare_total_weight(p1, p2),
        }
    }
}

pub fn compare_sinclair(p1: &Participant, p2: &Participant, formula: &SinclairFormula) -> Ordering {
    let s1 = crate::services::sinclair::sinclair_points(p1, formula);
    let s2 = crate::services::sinclair::sinclair_points(p2, formula);
    s2.total_cmp(&s1)
}

pub fn compare_total_weight(p1: &Participant, p2: &Participant) -> Ordering {
    p2.total_score().cmp(&p1.total_score())
}

/// Lifting order within a competing group.
///
/// Everyone finishes the snatch before anyone starts the clean & jerk, and
/// finished participants go last. Otherwise the lightest bar goes first,
/// then the one with fewer attempts, then whoever started the current
/// discipline earlier, and finally the lower start number.
pub fn compare_competing(p1: &Participant, p2: &Participant) -> Ordering {
    compare_completions(p1, p2)
        .then_with(|| p1.current_weight().cmp(&p2.current_weight()))
        .then_with(|| p1.lifts_count().cmp(&p2.lifts_count()))
        .then_with(|| compare_timestamps(p1, p2))
        .then_with(|| p1.start_number().cmp(&p2.start_number()))
}

fn compare_completions(p1: &Participant, p2: &Participant) -> Ordering {
    let in_snatch_1 = p1.lifts_count() < ATTEMPTS_PER_LIFT;
    let in_snatch_2 = p2.lifts_count() < ATTEMPTS_PER_LIFT;
    if in_snatch_1 != in_snatch_2 {
        return if in_snatch_1 {
            Ordering::Less
        } else {
            Ordering::Greater
        };
    }

    let done_1 = p1.lifts_count() == TOTAL_ATTEMPTS;
    let done_2 = p2.lifts_count() == TOTAL_ATTEMPTS;
    if done_1 != done_2 {
        return if done_1 {
            Ordering::Greater
        } else {
            Ordering::Less
        };
    }

    Ordering::Equal
}

fn compare_timestamps(p1: &Participant, p2: &Participant) -> Ordering {
    let mid_snatch = |c: usize| c > 0 && c < ATTEMPTS_PER_LIFT;
    let mid_clean_and_jerk = |c: usize| c > ATTEMPTS_PER_LIFT && c < TOTAL_ATTEMPTS;
    let (c1, c2) = (p1.lifts_count(), p2.lifts_count());

    let first_of_phase = if mid_snatch(c1) && mid_snatch(c2) {
        0
    } else if mid_clean_and_jerk(c1) && mid_clean_and_jerk(c2) {
        ATTEMPTS_PER_LIFT
    } else {
        return Ordering::Equal;
    };

    p1.lifts()[first_of_phase]
        .timestamp()
        .cmp(&p2.lifts()[first_of_phase].timestamp())
}
