use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{Gender, Group, GroupPurpose, ParticipantId, Roster, ScoringConfig};

/// Placement of the members of one ranking group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingGroupResult {
    pub purpose: GroupPurpose,
    pub gender: Option<Gender>,
    /// Only set for total-weight groups, which are split by weight class.
    pub weight_class: Option<u32>,
    pub entries: Vec<StandingEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandingEntry {
    pub rank: u32,
    pub participant_id: ParticipantId,
    pub start_number: u32,
    pub name: String,
    pub club: Option<String>,
    pub body_weight: Option<Decimal>,
    pub best_snatch: u32,
    pub best_clean_and_jerk: u32,
    pub total: u32,
    pub sinclair: Decimal,
}

impl RankingGroupResult {
    pub fn from_group(group: &Group, roster: &Roster, scoring: &ScoringConfig) -> Self {
        let entries: Vec<StandingEntry> = group
            .rankings(roster, scoring)
            .into_iter()
            .filter_map(|(id, rank)| {
                let participant = roster.get(id)?;
                Some(StandingEntry {
                    rank,
                    participant_id: id,
                    start_number: participant.start_number(),
                    name: participant.full_name(),
                    club: participant.lifter().club.clone(),
                    body_weight: participant.body_weight(),
                    best_snatch: participant.best_snatch(),
                    best_clean_and_jerk: participant.best_clean_and_jerk(),
                    total: participant.total_score(),
                    sinclair: participant.sinclair_score(scoring),
                })
            })
            .collect();

        let weight_class = match group.purpose() {
            GroupPurpose::TotalWeightRanking => group
                .first_participant()
                .and_then(|id| roster.get(id))
                .map(|p| p.weight_class(scoring)),
            _ => None,
        };

        Self {
            purpose: group.purpose(),
            gender: group.gender(roster),
            weight_class,
            entries,
        }
    }

    /// Entry in first place, if anyone has a result.
    pub fn winner(&self) -> Option<&StandingEntry> {
        self.entries.first().filter(|e| e.total > 0)
    }
}
