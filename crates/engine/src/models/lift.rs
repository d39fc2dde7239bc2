use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::CompetitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LiftType {
    Snatch,
    CleanAndJerk,
}

impl LiftType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Snatch => "Snatch",
            Self::CleanAndJerk => "Clean & Jerk",
        }
    }
}

impl std::fmt::Display for LiftType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Judges' decision on an attempt. Transport layers hand these over as the
/// codes `PASS`, `FAIL` and `ABSTAIN`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LiftOutcome {
    Pass,
    Fail,
    Abstain,
}

impl LiftOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Abstain => "ABSTAIN",
        }
    }

    fn parse_str(s: &str) -> Result<Self, CompetitionError> {
        match s.trim().to_uppercase().as_str() {
            "PASS" => Ok(Self::Pass),
            "FAIL" => Ok(Self::Fail),
            "ABSTAIN" => Ok(Self::Abstain),
            _ => Err(CompetitionError::InvalidInput(format!(
                "Unknown lift outcome: '{}'. Expected one of PASS, FAIL, ABSTAIN",
                s
            ))),
        }
    }
}

impl std::str::FromStr for LiftOutcome {
    type Err = CompetitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for LiftOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One attempt made by a participant. Lifts are only ever created by
/// [`Participant`](super::Participant) when an attempt is recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lift {
    lift_type: LiftType,
    weight: u32,
    outcome: LiftOutcome,
    timestamp: NaiveDateTime,
}

impl Lift {
    pub(crate) fn new(
        lift_type: LiftType,
        weight: u32,
        outcome: LiftOutcome,
        timestamp: NaiveDateTime,
    ) -> Self {
        Self {
            lift_type,
            weight,
            outcome,
            timestamp,
        }
    }

    pub fn lift_type(&self) -> LiftType {
        self.lift_type
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn outcome(&self) -> LiftOutcome {
        self.outcome
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn is_snatch(&self) -> bool {
        self.lift_type == LiftType::Snatch
    }

    pub fn is_clean_and_jerk(&self) -> bool {
        self.lift_type == LiftType::CleanAndJerk
    }

    pub fn is_passed(&self) -> bool {
        self.outcome == LiftOutcome::Pass
    }

    /// The weight counted towards the total: the lifted weight if the attempt
    /// passed, otherwise nothing.
    pub fn score(&self) -> u32 {
        if self.is_passed() { self.weight } else { 0 }
    }
}
