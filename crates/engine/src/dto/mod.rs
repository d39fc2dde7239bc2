pub mod requests;
pub mod results;

pub use requests::{
    AttemptRequest, CreateCompetitionRequest, RegisterLifterRequest, WeighInRequest,
    WeightChangeKind, WeightChangeRequest,
};
pub use results::{RankingGroupResult, StandingEntry};
