use chrono::{NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Gender, Lift, LiftOutcome, LiftType, Lifter, ScoringConfig};
use crate::error::{Result, RuleViolation};
use crate::services::{sinclair, weight_class};

/// Attempts allowed per lift type.
pub const ATTEMPTS_PER_LIFT: usize = 3;
/// Attempts allowed in a whole competition.
pub const TOTAL_ATTEMPTS: usize = 2 * ATTEMPTS_PER_LIFT;
/// Weight changes a participant may request between two attempts.
pub const MAX_WEIGHT_CHANGES: u8 = 2;
/// Heaviest weight that can be declared or requested for an attempt.
pub const MAX_LIFT_WEIGHT: u32 = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub Uuid);

impl ParticipantId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ParticipantId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The participation of one lifter in one competition.
///
/// A participant makes six lifts: three snatches followed by three clean &
/// jerks. Which lift comes next is always derived from the recorded lifts,
/// so it is impossible to record a seventh lift or a fourth lift of a type.
///
/// Between two attempts the participant may raise the weight on the bar at
/// most [`MAX_WEIGHT_CHANGES`] times. A passed attempt raises it by 1 kg.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    participant_id: ParticipantId,
    lifter: Lifter,
    start_number: u32,
    starting_snatch_weight: u32,
    starting_clean_and_jerk_weight: u32,
    lifts: Vec<Lift>,
    current_weight: u32,
    previous_weight: u32,
    weight_changes: u8,
    weighed_in: bool,
}

impl PartialEq for Participant {
    fn eq(&self, other: &Self) -> bool {
        self.participant_id == other.participant_id
    }
}

impl Eq for Participant {}

impl Participant {
    pub fn new(lifter: Lifter, start_number: u32) -> Self {
        Self {
            participant_id: ParticipantId::new(),
            lifter,
            start_number,
            starting_snatch_weight: 0,
            starting_clean_and_jerk_weight: 0,
            lifts: Vec::with_capacity(TOTAL_ATTEMPTS),
            current_weight: 0,
            previous_weight: 0,
            weight_changes: 0,
            weighed_in: false,
        }
    }

    pub fn id(&self) -> ParticipantId {
        self.participant_id
    }

    pub fn lifter(&self) -> &Lifter {
        &self.lifter
    }

    pub fn full_name(&self) -> String {
        self.lifter.full_name()
    }

    pub fn gender(&self) -> Gender {
        self.lifter.gender
    }

    pub fn body_weight(&self) -> Option<Decimal> {
        self.lifter.body_weight
    }

    pub fn start_number(&self) -> u32 {
        self.start_number
    }

    pub fn starting_snatch_weight(&self) -> u32 {
        self.starting_snatch_weight
    }

    pub fn starting_clean_and_jerk_weight(&self) -> u32 {
        self.starting_clean_and_jerk_weight
    }

    pub fn current_weight(&self) -> u32 {
        self.current_weight
    }

    pub fn previous_weight(&self) -> u32 {
        self.previous_weight
    }

    pub fn weight_changes(&self) -> u8 {
        self.weight_changes
    }

    pub fn is_weighed_in(&self) -> bool {
        self.weighed_in
    }

    /// Records the official body weight and the declared opening weights.
    /// The bar starts at the opening snatch.
    pub fn weigh_in(
        &mut self,
        body_weight: Decimal,
        starting_snatch_weight: u32,
        starting_clean_and_jerk_weight: u32,
    ) -> Result<()> {
        validate_lift_weight(starting_snatch_weight)?;
        validate_lift_weight(starting_clean_and_jerk_weight)?;
        if body_weight <= Decimal::ZERO {
            return Err(RuleViolation::NonPositiveBodyWeight.into());
        }
        if !self.lifts.is_empty() {
            return Err(RuleViolation::LiftsAlreadyRecorded.into());
        }

        self.lifter.body_weight = Some(body_weight);
        self.starting_snatch_weight = starting_snatch_weight;
        self.starting_clean_and_jerk_weight = starting_clean_and_jerk_weight;
        self.current_weight = starting_snatch_weight;
        self.previous_weight = starting_snatch_weight;
        self.weighed_in = true;

        Ok(())
    }

    pub fn lifts(&self) -> &[Lift] {
        &self.lifts
    }

    pub fn lifts_count(&self) -> usize {
        self.lifts.len()
    }

    pub fn lifts_remaining(&self) -> usize {
        TOTAL_ATTEMPTS - self.lifts_count()
    }

    pub fn all_lifts_complete(&self) -> bool {
        self.lifts_count() == TOTAL_ATTEMPTS
    }

    pub fn snatch_count(&self) -> usize {
        self.lifts.iter().filter(|l| l.is_snatch()).count()
    }

    pub fn clean_and_jerk_count(&self) -> usize {
        self.lifts.iter().filter(|l| l.is_clean_and_jerk()).count()
    }

    /// The type of the next attempt, or `None` once all six lifts are done.
    pub fn current_lift_type(&self) -> Option<LiftType> {
        if self.snatch_count() < ATTEMPTS_PER_LIFT {
            Some(LiftType::Snatch)
        } else if self.clean_and_jerk_count() < ATTEMPTS_PER_LIFT {
            Some(LiftType::CleanAndJerk)
        } else {
            None
        }
    }

    pub fn record_pass(&mut self) -> Result<()> {
        self.record_attempt(LiftOutcome::Pass)
    }

    pub fn record_fail(&mut self) -> Result<()> {
        self.record_attempt(LiftOutcome::Fail)
    }

    pub fn record_abstain(&mut self) -> Result<()> {
        self.record_attempt(LiftOutcome::Abstain)
    }

    pub fn record_attempt(&mut self, outcome: LiftOutcome) -> Result<()> {
        self.record_attempt_at(outcome, Utc::now().naive_utc())
    }

    /// Records an attempt at the current weight, made at `timestamp`.
    pub fn record_attempt_at(&mut self, outcome: LiftOutcome, timestamp: NaiveDateTime) -> Result<()> {
        let lift_type = self
            .current_lift_type()
            .ok_or(RuleViolation::AllLiftsComplete)?;
        if !self.weighed_in {
            return Err(RuleViolation::NotWeighedIn.into());
        }

        // The next attempt must be at least 1 kg heavier than a good lift.
        let next_weight = match outcome {
            LiftOutcome::Pass => self.current_weight.checked_add(1).ok_or(
                RuleViolation::WeightTooHeavy {
                    max: MAX_LIFT_WEIGHT,
                    requested: self.current_weight,
                },
            )?,
            _ => self.current_weight,
        };

        self.lifts
            .push(Lift::new(lift_type, self.current_weight, outcome, timestamp));

        if outcome == LiftOutcome::Pass {
            self.set_current_weight(next_weight);
        }
        self.weight_changes = 0;

        if self.lifts_count() == ATTEMPTS_PER_LIFT
            && self.current_weight < self.starting_clean_and_jerk_weight
        {
            tracing::debug!(
                "Participant {} moves on to clean & jerk at {} kg",
                self.start_number,
                self.starting_clean_and_jerk_weight
            );
            self.set_current_weight(self.starting_clean_and_jerk_weight);
        }

        Ok(())
    }

    pub fn can_increase_weight(&self, new_weight: u32) -> bool {
        new_weight > self.current_weight
    }

    pub fn can_change_weight(&self) -> bool {
        self.weight_changes < MAX_WEIGHT_CHANGES
    }

    /// Raises the weight for the next attempt. Counts against the weight
    /// change budget.
    pub fn increase_weight(&mut self, new_weight: u32) -> Result<()> {
        validate_lift_weight(new_weight)?;
        if !self.can_increase_weight(new_weight) {
            return Err(RuleViolation::NotGreater {
                current: self.current_weight,
                requested: new_weight,
            }
            .into());
        }
        if !self.can_change_weight() {
            return Err(RuleViolation::TooManyChanges.into());
        }

        self.set_current_weight(new_weight);
        self.weight_changes += 1;
        Ok(())
    }

    /// Administrative override for a weight entered in error. Does not count
    /// as a weight change and may lower the bar, but the weight must still
    /// lie between 1 kg and [`MAX_LIFT_WEIGHT`].
    pub fn correct_weight(&mut self, new_weight: u32) -> Result<()> {
        validate_lift_weight(new_weight)?;
        self.set_current_weight(new_weight);
        Ok(())
    }

    /// Undoes the last weight increase.
    pub fn revert_weight(&mut self) {
        self.set_current_weight(self.previous_weight);
        self.weight_changes = self.weight_changes.saturating_sub(1);
    }

    fn set_current_weight(&mut self, new_weight: u32) {
        self.previous_weight = self.current_weight;
        self.current_weight = new_weight;
    }

    pub fn snatch_lifts(&self) -> impl Iterator<Item = &Lift> {
        self.lifts.iter().filter(|l| l.is_snatch())
    }

    pub fn clean_and_jerk_lifts(&self) -> impl Iterator<Item = &Lift> {
        self.lifts.iter().filter(|l| l.is_clean_and_jerk())
    }

    /// Heaviest passed snatch, or 0 if none passed.
    pub fn best_snatch(&self) -> u32 {
        self.snatch_lifts().map(Lift::score).max().unwrap_or(0)
    }

    /// Heaviest passed clean & jerk, or 0 if none passed.
    pub fn best_clean_and_jerk(&self) -> u32 {
        self.clean_and_jerk_lifts().map(Lift::score).max().unwrap_or(0)
    }

    /// Best snatch plus best clean & jerk. A participant without a good lift
    /// in either discipline has no total.
    pub fn total_score(&self) -> u32 {
        let snatch = self.best_snatch();
        let clean_and_jerk = self.best_clean_and_jerk();
        if snatch == 0 || clean_and_jerk == 0 {
            0
        } else {
            snatch.saturating_add(clean_and_jerk)
        }
    }

    pub fn weight_class(&self, scoring: &ScoringConfig) -> u32 {
        weight_class::find_weight_class(
            self.gender(),
            self.body_weight().unwrap_or(Decimal::ZERO),
            &scoring.weight_classes,
        )
    }

    pub fn sinclair_score(&self, scoring: &ScoringConfig) -> Decimal {
        sinclair::compute_sinclair(self, &scoring.sinclair)
    }
}

fn validate_lift_weight(weight: u32) -> Result<()> {
    if weight < 1 {
        return Err(RuleViolation::NonPositiveWeight(weight).into());
    }
    if weight > MAX_LIFT_WEIGHT {
        return Err(RuleViolation::WeightTooHeavy {
            max: MAX_LIFT_WEIGHT,
            requested: weight,
        }
        .into());
    }
    Ok(())
}
