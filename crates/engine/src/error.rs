use thiserror::Error;

/// A broken competition rule. These are recoverable: the caller is expected to
/// report them back to whoever issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("participant has already completed six lifts")]
    AllLiftsComplete,

    #[error(
        "new weight must be greater than existing weight; current weight of {current} kg \
         is greater than or equal to new weight of {requested} kg"
    )]
    NotGreater { current: u32, requested: u32 },

    #[error("unable to change weight: two changes have already been made")]
    TooManyChanges,

    #[error("weight must be greater than 0 kg, got {0} kg")]
    NonPositiveWeight(u32),

    #[error("weight must not exceed {max} kg, got {requested} kg")]
    WeightTooHeavy { max: u32, requested: u32 },

    #[error("body weight must be greater than 0 kg")]
    NonPositiveBodyWeight,

    #[error("participant has not been weighed in")]
    NotWeighedIn,

    #[error("participant has already started lifting")]
    LiftsAlreadyRecorded,

    #[error("participant is not in this group")]
    NotInGroup,

    #[error("unable to find participant within any ranking group")]
    ParticipantNotFound,

    #[error("weigh-in has already been finished")]
    WeighInClosed,

    #[error("weigh-in has not been finished yet")]
    WeighInNotFinished,

    #[error("no start numbers left, competition is limited to {0} participants")]
    CompetitionFull(u32),

    #[error("lifter is already registered for this competition")]
    AlreadyRegistered,

    #[error("lifter is not registered for this competition")]
    LifterNotRegistered,
}

#[derive(Debug, Error)]
pub enum CompetitionError {
    #[error("Rule violation: {0}")]
    Rule(#[from] RuleViolation),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found")]
    NotFound,
}

pub type Result<T> = std::result::Result<T, CompetitionError>;

impl CompetitionError {
    /// Returns the rule that was broken, if this error is a rule violation.
    pub fn rule(&self) -> Option<&RuleViolation> {
        match self {
            CompetitionError::Rule(rule) => Some(rule),
            _ => None,
        }
    }

    pub fn is_configuration_error(&self) -> bool {
        matches!(self, CompetitionError::Configuration(_))
    }
}

impl From<validator::ValidationErrors> for CompetitionError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CompetitionError::InvalidInput(errors.to_string())
    }
}
