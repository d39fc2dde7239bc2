use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::CompetitionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LifterId(pub Uuid);

impl LifterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for LifterId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for LifterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
        }
    }

    pub fn is_female(&self) -> bool {
        matches!(self, Self::Female)
    }

    fn parse_str(s: &str) -> Result<Self, CompetitionError> {
        match s.trim().to_lowercase().as_str() {
            "m" | "male" | "men" => Ok(Self::Male),
            "f" | "female" | "women" => Ok(Self::Female),
            _ => Err(CompetitionError::InvalidInput(format!(
                "Invalid gender: '{}'. Must be 'M' or 'F'",
                s
            ))),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = CompetitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A weightlifter as known to the competition. Body weight is only
/// authoritative once the lifter has been weighed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lifter {
    pub lifter_id: LifterId,
    pub forename: String,
    pub surname: String,
    pub gender: Gender,
    pub body_weight: Option<Decimal>,
    pub date_of_birth: Option<NaiveDate>,
    pub club: Option<String>,
}

impl Lifter {
    pub fn new(forename: impl Into<String>, surname: impl Into<String>, gender: Gender) -> Self {
        Self {
            lifter_id: LifterId::new(),
            forename: forename.into(),
            surname: surname.into(),
            gender,
            body_weight: None,
            date_of_birth: None,
            club: None,
        }
    }

    pub fn with_club(mut self, club: impl Into<String>) -> Self {
        self.club = Some(club.into());
        self
    }

    pub fn with_date_of_birth(mut self, date_of_birth: NaiveDate) -> Self {
        self.date_of_birth = Some(date_of_birth);
        self
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.forename, self.surname)
    }

    pub fn club_name(&self) -> &str {
        self.club.as_deref().unwrap_or("")
    }
}
