use engine::dto::{
    AttemptRequest, CreateCompetitionRequest, RankingGroupResult, RegisterLifterRequest,
    WeighInRequest, WeightChangeRequest,
};
use engine::models::{CompetitionState, CompetitionType};
use serde::{Deserialize, Serialize};

pub const FORMAT_VERSION: &str = "1.0.0";

/// A recorded meet: the competition, who signed up, and everything that
/// happened on the platform in order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetFile {
    pub format_version: String,
    pub competition: CreateCompetitionRequest,
    pub lifters: Vec<MeetLifter>,
    #[serde(default)]
    pub events: Vec<MeetEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetLifter {
    /// Short handle the events refer to.
    pub key: String,
    #[serde(flatten)]
    pub registration: RegisterLifterRequest,
    /// Missing when the lifter did not show up for the weigh-in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weigh_in: Option<WeighInRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeetEvent {
    pub lifter: String,
    #[serde(flatten)]
    pub action: MeetAction,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum MeetAction {
    Attempt(AttemptRequest),
    WeightChange(WeightChangeRequest),
}

impl MeetAction {
    pub fn is_attempt(&self) -> bool {
        matches!(self, Self::Attempt(_))
    }
}

/// What `meet run` writes for every replayed competition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingsReport {
    pub competition: String,
    pub competition_type: CompetitionType,
    pub state: CompetitionState,
    pub groups: Vec<RankingGroupResult>,
    pub dropped: Vec<String>,
    pub rejected_events: Vec<RejectedEvent>,
}

/// An event the competition refused, e.g. a third weight change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectedEvent {
    pub index: usize,
    pub lifter: String,
    pub reason: String,
}
