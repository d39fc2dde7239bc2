use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{CompetitionError, Result};
use crate::models::{
    Competition, CompetitionSettings, CompetitionType, Gender, LiftOutcome, Lifter, ParticipantId,
};

/// Request payload for creating a new competition
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCompetitionRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(custom(function = "validate_competition_type"))]
    pub competition_type: String,

    pub competition_date: NaiveDate,

    pub registration_deadline: NaiveDateTime,

    #[validate(range(
        min = 1,
        max = 999,
        message = "Max participants must be between 1 and 999"
    ))]
    pub max_participants: u32,
}

impl CreateCompetitionRequest {
    /// Additional validation that requires multiple fields
    pub fn validate_dates(&self) -> std::result::Result<(), &'static str> {
        if self.registration_deadline.date() > self.competition_date {
            return Err("Registration deadline must be on or before the competition date");
        }
        Ok(())
    }

    pub fn into_settings(self) -> Result<CompetitionSettings> {
        self.validate()?;
        self.validate_dates()
            .map_err(|msg| CompetitionError::InvalidInput(msg.to_string()))?;

        Ok(CompetitionSettings {
            competition_type: self.competition_type.parse()?,
            name: self.name.trim().to_string(),
            competition_date: self.competition_date,
            registration_deadline: self.registration_deadline,
            max_participants: self.max_participants,
        })
    }
}

/// Request payload for signing a lifter up
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterLifterRequest {
    #[validate(length(min = 1, max = 100))]
    pub forename: String,

    #[validate(length(min = 1, max = 100))]
    pub surname: String,

    #[validate(custom(function = "validate_gender"))]
    pub gender: String,

    pub date_of_birth: Option<NaiveDate>,

    #[validate(length(max = 255))]
    pub club: Option<String>,
}

impl RegisterLifterRequest {
    pub fn into_lifter(self) -> Result<Lifter> {
        self.validate()?;
        let gender: Gender = self.gender.parse()?;

        let mut lifter = Lifter::new(self.forename.trim(), self.surname.trim(), gender);
        if let Some(club) = self.club.filter(|c| !c.trim().is_empty()) {
            lifter = lifter.with_club(club.trim());
        }
        if let Some(date_of_birth) = self.date_of_birth {
            lifter = lifter.with_date_of_birth(date_of_birth);
        }
        Ok(lifter)
    }
}

/// Official body weight and opening weights, recorded at the weigh-in
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeighInRequest {
    #[validate(custom(function = "validate_body_weight"))]
    pub body_weight: Decimal,

    #[validate(range(
        min = 1,
        max = 500,
        message = "Starting snatch weight must be between 1 and 500 kg"
    ))]
    pub starting_snatch_weight: u32,

    #[validate(range(
        min = 1,
        max = 500,
        message = "Starting clean & jerk weight must be between 1 and 500 kg"
    ))]
    pub starting_clean_and_jerk_weight: u32,
}

impl WeighInRequest {
    pub fn apply(&self, competition: &mut Competition, id: ParticipantId) -> Result<()> {
        self.validate()?;
        competition.weigh_in(
            id,
            self.body_weight,
            self.starting_snatch_weight,
            self.starting_clean_and_jerk_weight,
        )
    }
}

/// Referee decision for the attempt a participant just made
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AttemptRequest {
    #[validate(custom(function = "validate_outcome"))]
    pub outcome: String,
}

impl AttemptRequest {
    pub fn outcome(&self) -> Result<LiftOutcome> {
        self.validate()?;
        self.outcome.parse()
    }

    pub fn apply(
        &self,
        competition: &mut Competition,
        id: ParticipantId,
        at: NaiveDateTime,
    ) -> Result<()> {
        competition.record_attempt_at(id, self.outcome()?, at)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeightChangeKind {
    Increase,
    Correct,
    Revert,
}

/// Change of the weight on the bar between two attempts
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WeightChangeRequest {
    pub kind: WeightChangeKind,

    #[validate(range(min = 1, max = 500, message = "Weight must be between 1 and 500 kg"))]
    pub weight: Option<u32>,
}

impl WeightChangeRequest {
    /// Increases and corrections need a weight, reverts must not carry one.
    pub fn validate_weight(&self) -> std::result::Result<(), &'static str> {
        match (self.kind, self.weight) {
            (WeightChangeKind::Revert, Some(_)) => Err("A revert does not take a weight"),
            (WeightChangeKind::Revert, None) => Ok(()),
            (_, None) => Err("Weight is required"),
            (_, Some(_)) => Ok(()),
        }
    }

    pub fn apply(&self, competition: &mut Competition, id: ParticipantId) -> Result<()> {
        self.validate()?;
        self.validate_weight()
            .map_err(|msg| CompetitionError::InvalidInput(msg.to_string()))?;

        match (self.kind, self.weight) {
            (WeightChangeKind::Increase, Some(weight)) => competition.increase_weight(id, weight),
            (WeightChangeKind::Correct, Some(weight)) => competition.correct_weight(id, weight),
            (WeightChangeKind::Revert, _) => competition.revert_weight(id),
            (_, None) => Err(CompetitionError::InvalidInput(
                "Weight is required".to_string(),
            )),
        }
    }
}

// Validation helpers
fn validate_competition_type(value: &str) -> std::result::Result<(), validator::ValidationError> {
    value
        .parse::<CompetitionType>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_competition_type"))
}

fn validate_gender(value: &str) -> std::result::Result<(), validator::ValidationError> {
    value
        .parse::<Gender>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_gender"))
}

fn validate_outcome(value: &str) -> std::result::Result<(), validator::ValidationError> {
    value
        .parse::<LiftOutcome>()
        .map(|_| ())
        .map_err(|_| validator::ValidationError::new("invalid_outcome"))
}

fn validate_body_weight(value: &Decimal) -> std::result::Result<(), validator::ValidationError> {
    if *value > Decimal::ZERO && *value < Decimal::from(500) {
        Ok(())
    } else {
        Err(validator::ValidationError::new("invalid_body_weight"))
    }
}
