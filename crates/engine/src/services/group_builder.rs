use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::models::{
    Gender, Group, GroupPurpose, Participant, ParticipantId, Roster, ScoringConfig,
};

/// Maximum number of participants lifting in the same competing group.
pub const COMPETING_GROUP_MAX_SIZE: usize = 10;

/// Key that decides which ranking group a participant is placed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupingKey {
    Gender(Gender),
    GenderAndWeightClass(Gender, u32),
}

/// Splits the participants of a competition into ranking groups and, from
/// those, into competing groups.
///
/// Implementors only describe how to group and order; building the groups is
/// shared.
pub trait GroupBuilder: Send + Sync {
    fn grouping_key(&self, participant: &Participant, scoring: &ScoringConfig) -> GroupingKey;

    fn ranking_purpose(&self) -> GroupPurpose;

    fn compare_ranking_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Ordering;

    fn compare_competing_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Ordering;

    fn competing_group_max_size(&self) -> usize {
        COMPETING_GROUP_MAX_SIZE
    }

    fn name(&self) -> &'static str;

    /// Orders participants by opening snatch, partitions them by grouping key
    /// and orders the resulting groups.
    fn build_ranking_groups(&self, roster: &Roster, scoring: &ScoringConfig) -> Vec<Group> {
        let mut participants: Vec<&Participant> = roster.iter().collect();
        participants.sort_by_key(|p| p.starting_snatch_weight());

        let mut partitions: BTreeMap<GroupingKey, Vec<ParticipantId>> = BTreeMap::new();
        for participant in participants {
            partitions
                .entry(self.grouping_key(participant, scoring))
                .or_default()
                .push(participant.id());
        }

        let mut groups: Vec<Group> = partitions
            .into_values()
            .map(|members| Group::new(self.ranking_purpose(), members))
            .collect();
        groups.sort_by(|g1, g2| self.compare_ranking_groups(g1, g2, roster, scoring));
        groups
    }

    /// Splits every ranking group into balanced competing groups of at most
    /// [`competing_group_max_size`](Self::competing_group_max_size) members.
    fn build_competing_groups(
        &self,
        ranking_groups: &[Group],
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Vec<Group> {
        let mut groups: Vec<Group> = ranking_groups
            .iter()
            .flat_map(|group| chunk_members(group.members(), self.competing_group_max_size()))
            .map(|members| Group::new(GroupPurpose::Competing, members))
            .collect();
        groups.sort_by(|g1, g2| self.compare_competing_groups(g1, g2, roster, scoring));
        groups
    }
}

/// Splits `members` into the fewest chunks of at most `max_size`, with sizes
/// differing by at most one and the larger chunks first.
pub fn chunk_members(members: &[ParticipantId], max_size: usize) -> Vec<Vec<ParticipantId>> {
    if members.is_empty() || max_size == 0 {
        return Vec::new();
    }

    let chunk_count = members.len().div_ceil(max_size);
    let base_size = members.len() / chunk_count;
    let oversized = members.len() % chunk_count;

    let mut chunks = Vec::with_capacity(chunk_count);
    let mut start = 0;
    for i in 0..chunk_count {
        let size = if i < oversized { base_size + 1 } else { base_size };
        chunks.push(members[start..start + size].to_vec());
        start += size;
    }
    chunks
}

/// Female groups go before male groups; `then` decides within a gender.
fn compare_first_by_gender(
    g1: &Group,
    g2: &Group,
    roster: &Roster,
    then: impl FnOnce() -> Ordering,
) -> Ordering {
    let female_1 = g1.gender(roster).is_some_and(|g| g.is_female());
    let female_2 = g2.gender(roster).is_some_and(|g| g.is_female());
    match (female_1, female_2) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => then(),
    }
}

fn first_member<'a>(group: &Group, roster: &'a Roster) -> Option<&'a Participant> {
    group.first_participant().and_then(|id| roster.get(id))
}

fn first_member_snatch(group: &Group, roster: &Roster) -> u32 {
    first_member(group, roster)
        .map(Participant::starting_snatch_weight)
        .unwrap_or(0)
}

fn first_member_weight_class(group: &Group, roster: &Roster, scoring: &ScoringConfig) -> u32 {
    first_member(group, roster)
        .map(|p| p.weight_class(scoring))
        .unwrap_or(0)
}

/// Sinclair competitions rank men and women separately, regardless of body
/// weight.
#[derive(Debug, Clone, Copy, Default)]
pub struct SinclairGroupBuilder;

impl GroupBuilder for SinclairGroupBuilder {
    fn grouping_key(&self, participant: &Participant, _scoring: &ScoringConfig) -> GroupingKey {
        GroupingKey::Gender(participant.gender())
    }

    fn ranking_purpose(&self) -> GroupPurpose {
        GroupPurpose::SinclairRanking
    }

    fn compare_ranking_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        _scoring: &ScoringConfig,
    ) -> Ordering {
        compare_first_by_gender(g1, g2, roster, || Ordering::Equal)
    }

    fn compare_competing_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        _scoring: &ScoringConfig,
    ) -> Ordering {
        compare_first_by_gender(g1, g2, roster, || {
            first_member_snatch(g1, roster).cmp(&first_member_snatch(g2, roster))
        })
    }

    fn name(&self) -> &'static str {
        "Sinclair"
    }
}

/// Total-weight competitions rank every weight class of each gender
/// separately.
#[derive(Debug, Clone, Copy, Default)]
pub struct TotalWeightGroupBuilder;

impl TotalWeightGroupBuilder {
    fn compare_weight_class_then_snatch(
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Ordering {
        first_member_weight_class(g1, roster, scoring)
            .cmp(&first_member_weight_class(g2, roster, scoring))
            .then_with(|| first_member_snatch(g1, roster).cmp(&first_member_snatch(g2, roster)))
    }
}

impl GroupBuilder for TotalWeightGroupBuilder {
    fn grouping_key(&self, participant: &Participant, scoring: &ScoringConfig) -> GroupingKey {
        GroupingKey::GenderAndWeightClass(participant.gender(), participant.weight_class(scoring))
    }

    fn ranking_purpose(&self) -> GroupPurpose {
        GroupPurpose::TotalWeightRanking
    }

    fn compare_ranking_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Ordering {
        compare_first_by_gender(g1, g2, roster, || {
            Self::compare_weight_class_then_snatch(g1, g2, roster, scoring)
        })
    }

    fn compare_competing_groups(
        &self,
        g1: &Group,
        g2: &Group,
        roster: &Roster,
        scoring: &ScoringConfig,
    ) -> Ordering {
        compare_first_by_gender(g1, g2, roster, || {
            Self::compare_weight_class_then_snatch(g1, g2, roster, scoring)
        })
    }

    fn name(&self) -> &'static str {
        "Total weight"
    }
}
