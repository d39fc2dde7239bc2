use std::collections::BTreeMap;

use crate::error::{CompetitionError, Result};
use crate::models::{Competition, CompetitionId};

/// Storage for whole competition aggregates.
pub trait CompetitionRepository {
    fn find_by_id(&self, id: CompetitionId) -> Result<&Competition>;

    fn find_by_id_mut(&mut self, id: CompetitionId) -> Result<&mut Competition>;

    /// Ids of every stored competition, in id order.
    fn list_ids(&self) -> Vec<CompetitionId>;

    /// Inserts the competition or replaces the stored one with the same id.
    fn save(&mut self, competition: Competition);

    fn delete(&mut self, id: CompetitionId) -> Result<Competition>;
}

/// Keeps competitions in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct InMemoryCompetitionRepository {
    competitions: BTreeMap<CompetitionId, Competition>,
}

impl InMemoryCompetitionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.competitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitions.is_empty()
    }
}

impl CompetitionRepository for InMemoryCompetitionRepository {
    fn find_by_id(&self, id: CompetitionId) -> Result<&Competition> {
        self.competitions.get(&id).ok_or(CompetitionError::NotFound)
    }

    fn find_by_id_mut(&mut self, id: CompetitionId) -> Result<&mut Competition> {
        self.competitions
            .get_mut(&id)
            .ok_or(CompetitionError::NotFound)
    }

    fn list_ids(&self) -> Vec<CompetitionId> {
        self.competitions.keys().copied().collect()
    }

    fn save(&mut self, competition: Competition) {
        tracing::debug!("Saving competition {} ({})", competition.name(), competition.id());
        self.competitions.insert(competition.id(), competition);
    }

    fn delete(&mut self, id: CompetitionId) -> Result<Competition> {
        self.competitions
            .remove(&id)
            .ok_or(CompetitionError::NotFound)
    }
}
