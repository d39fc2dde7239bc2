use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::{Gender, ParticipantId, Roster, ScoringConfig};
use crate::error::{CompetitionError, Result, RuleViolation};
use crate::services::ordering::OrderingStrategy;

/// What a group is used for, which also decides how its members are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupPurpose {
    Competing,
    SinclairRanking,
    TotalWeightRanking,
}

impl GroupPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Competing => "competing",
            Self::SinclairRanking => "sinclair_ranking",
            Self::TotalWeightRanking => "total_weight_ranking",
        }
    }

    pub fn all() -> &'static [GroupPurpose] {
        &[
            Self::Competing,
            Self::SinclairRanking,
            Self::TotalWeightRanking,
        ]
    }

    pub fn is_ranking(&self) -> bool {
        !matches!(self, Self::Competing)
    }

    fn parse_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "competing" => Ok(Self::Competing),
            "sinclair_ranking" => Ok(Self::SinclairRanking),
            "total_weight_ranking" => Ok(Self::TotalWeightRanking),
            _ => Err(CompetitionError::Configuration(format!(
                "Unknown group purpose: '{}'. Available: {}",
                s,
                Self::all()
                    .iter()
                    .map(|p| p.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl std::str::FromStr for GroupPurpose {
    type Err = CompetitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for GroupPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An ordered cluster of participants.
///
/// Competing groups decide who lifts next; ranking groups decide placement.
/// The group only holds participant ids; the participants themselves live in
/// the competition's [`Roster`]. Members stay in the order of the last
/// [`Group::sort`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    purpose: GroupPurpose,
    members: Vec<ParticipantId>,
}

impl Group {
    pub fn new(purpose: GroupPurpose, members: Vec<ParticipantId>) -> Self {
        Self { purpose, members }
    }

    pub fn purpose(&self) -> GroupPurpose {
        self.purpose
    }

    pub fn is_competing(&self) -> bool {
        self.purpose == GroupPurpose::Competing
    }

    pub fn is_ranking(&self) -> bool {
        self.purpose.is_ranking()
    }

    pub fn members(&self) -> &[ParticipantId] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, id: ParticipantId) -> bool {
        self.members.contains(&id)
    }

    /// Next to lift in a competing group, current leader in a ranking group.
    pub fn first_participant(&self) -> Option<ParticipantId> {
        self.members.first().copied()
    }

    /// Gender of the group, taken from its first member.
    pub fn gender(&self, roster: &Roster) -> Option<Gender> {
        self.first_participant()
            .and_then(|id| roster.get(id))
            .map(|p| p.gender())
    }

    /// Reorders the members with the ordering bound to the group's purpose.
    /// The sort is stable, so equal members keep their relative order.
    pub fn sort(&mut self, roster: &Roster, scoring: &ScoringConfig) {
        self.members = self.sorted_members(roster, scoring);
    }

    fn sorted_members(&self, roster: &Roster, scoring: &ScoringConfig) -> Vec<ParticipantId> {
        let strategy = OrderingStrategy::for_purpose(self.purpose, scoring);
        let index = roster.index();
        let mut members = self.members.clone();
        members.sort_by(|a, b| match (index.get(a), index.get(b)) {
            (Some(p1), Some(p2)) => strategy.compare(p1, p2),
            _ => Ordering::Equal,
        });
        members
    }

    /// Rank of every member, in sorted order.
    ///
    /// Members that compare equal to the member before them share its rank;
    /// everyone else is ranked by position, so ties leave gaps (1, 1, 3, 4).
    pub fn rankings(&self, roster: &Roster, scoring: &ScoringConfig) -> Vec<(ParticipantId, u32)> {
        let strategy = OrderingStrategy::for_purpose(self.purpose, scoring);
        let index = roster.index();
        let members = self.sorted_members(roster, scoring);

        let mut ranks: Vec<(ParticipantId, u32)> = Vec::with_capacity(members.len());
        for (position, id) in members.iter().enumerate() {
            let rank = match ranks.last() {
                Some(&(previous, previous_rank)) => {
                    let tied = match (index.get(&previous), index.get(id)) {
                        (Some(p1), Some(p2)) => strategy.compare(p1, p2) == Ordering::Equal,
                        _ => false,
                    };
                    if tied { previous_rank } else { position as u32 + 1 }
                }
                None => 1,
            };
            ranks.push((*id, rank));
        }
        ranks
    }

    pub fn rank(&self, id: ParticipantId, roster: &Roster, scoring: &ScoringConfig) -> Result<u32> {
        if !self.contains(id) {
            return Err(RuleViolation::NotInGroup.into());
        }
        self.rankings(roster, scoring)
            .into_iter()
            .find(|(member, _)| *member == id)
            .map(|(_, rank)| rank)
            .ok_or_else(|| RuleViolation::NotInGroup.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::participant::tests::{minute, weighed_in};
    use crate::models::{LiftOutcome, Participant};
    use rust_decimal::Decimal;

    /// Lifts three snatches and three clean & jerks, passing the first
    /// `passes` attempts of each.
    fn lift_session(p: &mut Participant, passes: usize) {
        for i in 0..6 {
            let outcome = if i % 3 < passes {
                LiftOutcome::Pass
            } else {
                LiftOutcome::Fail
            };
            p.record_attempt_at(outcome, minute(i as i64)).unwrap();
        }
    }

    fn roster_with_totals() -> Roster {
        // Totals: 1 -> 220, 2 -> 222, 3 -> 220, 4 -> 0
        let mut p1 = weighed_in(Gender::Male, 1, Decimal::from(77), 100, 120);
        let mut p2 = weighed_in(Gender::Male, 2, Decimal::from(77), 100, 120);
        let mut p3 = weighed_in(Gender::Male, 3, Decimal::from(77), 100, 120);
        let mut p4 = weighed_in(Gender::Male, 4, Decimal::from(77), 100, 120);
        lift_session(&mut p1, 1);
        lift_session(&mut p2, 2);
        lift_session(&mut p3, 1);
        lift_session(&mut p4, 0);
        [p4, p3, p1, p2].into_iter().collect()
    }

    fn ids(roster: &Roster) -> Vec<ParticipantId> {
        roster.iter().map(Participant::id).collect()
    }

    #[test]
    fn test_group_purpose_parsing() {
        assert_eq!(
            "sinclair_ranking".parse::<GroupPurpose>().unwrap(),
            GroupPurpose::SinclairRanking
        );
        assert_eq!(
            "Total-Weight-Ranking".parse::<GroupPurpose>().unwrap(),
            GroupPurpose::TotalWeightRanking
        );

        let err = "podium".parse::<GroupPurpose>().unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_sort_by_total() {
        let roster = roster_with_totals();
        let scoring = ScoringConfig::default();
        let mut group = Group::new(GroupPurpose::TotalWeightRanking, ids(&roster));
        group.sort(&roster, &scoring);

        let start_numbers: Vec<u32> = group
            .members()
            .iter()
            .map(|id| roster.get(*id).unwrap().start_number())
            .collect();
        // p3 and p1 tie at 220 and keep their roster order
        assert_eq!(start_numbers, vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_sorting_twice_is_idempotent() {
        let roster = roster_with_totals();
        let scoring = ScoringConfig::default();

        for purpose in GroupPurpose::all() {
            let mut group = Group::new(*purpose, ids(&roster));
            group.sort(&roster, &scoring);
            let once = group.clone();
            group.sort(&roster, &scoring);
            assert_eq!(group, once);
        }
    }

    #[test]
    fn test_ties_share_rank_and_leave_gap() {
        let roster = roster_with_totals();
        let scoring = ScoringConfig::default();
        let group = Group::new(GroupPurpose::TotalWeightRanking, ids(&roster));

        let ranks: Vec<u32> = group
            .rankings(&roster, &scoring)
            .into_iter()
            .map(|(_, rank)| rank)
            .collect();
        assert_eq!(ranks, vec![1, 2, 2, 4]);

        let leader = roster.iter().find(|p| p.start_number() == 2).unwrap();
        assert_eq!(group.rank(leader.id(), &roster, &scoring).unwrap(), 1);
    }

    #[test]
    fn test_sinclair_ranks_on_unrounded_score() {
        // Both total 220; the lighter lifter is ahead by less than 0.005 points
        let mut lighter = weighed_in(Gender::Male, 1, Decimal::new(800000, 4), 100, 120);
        let mut heavier = weighed_in(Gender::Male, 2, Decimal::new(800005, 4), 100, 120);
        lift_session(&mut lighter, 1);
        lift_session(&mut heavier, 1);
        let scoring = ScoringConfig::default();
        assert_eq!(lighter.sinclair_score(&scoring), heavier.sinclair_score(&scoring));

        let roster: Roster = [heavier, lighter].into_iter().collect();
        let group = Group::new(GroupPurpose::SinclairRanking, ids(&roster));
        let ranks: Vec<(u32, u32)> = group
            .rankings(&roster, &scoring)
            .into_iter()
            .map(|(id, rank)| (roster.get(id).unwrap().start_number(), rank))
            .collect();
        assert_eq!(ranks, vec![(1, 1), (2, 2)]);
    }

    #[test]
    fn test_rank_of_stranger_fails() {
        let roster = roster_with_totals();
        let scoring = ScoringConfig::default();
        let group = Group::new(GroupPurpose::TotalWeightRanking, ids(&roster)[..2].to_vec());

        let outsider = ids(&roster)[3];
        let err = group.rank(outsider, &roster, &scoring).unwrap_err();
        assert_eq!(err.rule(), Some(&RuleViolation::NotInGroup));
    }

    #[test]
    fn test_everyone_tied_ranks_first() {
        let roster: Roster = (1..=3)
            .map(|n| weighed_in(Gender::Female, n, Decimal::from(58), 60, 80))
            .collect();
        let scoring = ScoringConfig::default();
        let group = Group::new(GroupPurpose::SinclairRanking, ids(&roster));

        assert!(
            group
                .rankings(&roster, &scoring)
                .iter()
                .all(|(_, rank)| *rank == 1)
        );
    }

    #[test]
    fn test_first_participant_and_gender() {
        let roster: Roster = [
            weighed_in(Gender::Female, 5, Decimal::from(58), 70, 90),
            weighed_in(Gender::Female, 3, Decimal::from(58), 60, 80),
        ]
        .into_iter()
        .collect();
        let scoring = ScoringConfig::default();
        let mut group = Group::new(GroupPurpose::Competing, ids(&roster));
        group.sort(&roster, &scoring);

        let first = roster.get(group.first_participant().unwrap()).unwrap();
        assert_eq!(first.start_number(), 3);
        assert_eq!(group.gender(&roster), Some(Gender::Female));
        assert!(group.is_competing());
        assert!(Group::new(GroupPurpose::Competing, vec![]).first_participant().is_none());
    }

    #[test]
    fn test_equality_needs_same_members_and_purpose() {
        let roster = roster_with_totals();
        let a = Group::new(GroupPurpose::Competing, ids(&roster));
        let b = Group::new(GroupPurpose::Competing, ids(&roster));
        let c = Group::new(GroupPurpose::SinclairRanking, ids(&roster));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
