pub mod competition;

pub use competition::{CompetitionRepository, InMemoryCompetitionRepository};
