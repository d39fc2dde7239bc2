pub mod competition;
pub mod group;
pub mod lift;
pub mod lifter;
pub mod participant;
pub mod roster;
pub mod scoring;

pub use competition::{
    Competition, CompetitionId, CompetitionSettings, CompetitionState, CompetitionType,
};
pub use group::{Group, GroupPurpose};
pub use lift::{Lift, LiftOutcome, LiftType};
pub use lifter::{Gender, Lifter, LifterId};
pub use participant::{Participant, ParticipantId};
pub use roster::Roster;
pub use scoring::{ScoringConfig, SinclairConstants, SinclairFormula, WeightClassTable};
