use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime, Utc};
use rand::Rng;
use rand::seq::IndexedRandom;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    Group, LiftOutcome, Lifter, LifterId, Participant, ParticipantId, Roster, ScoringConfig,
};
use crate::dto::results::RankingGroupResult;
use crate::error::{CompetitionError, Result, RuleViolation};
use crate::services::group_builder::{GroupBuilder, SinclairGroupBuilder, TotalWeightGroupBuilder};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CompetitionId(pub Uuid);

impl CompetitionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CompetitionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CompetitionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a competition is scored, which also decides how participants are
/// grouped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionType {
    Sinclair,
    TotalWeight,
}

impl CompetitionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sinclair => "sinclair",
            Self::TotalWeight => "total_weight",
        }
    }

    pub fn all() -> &'static [CompetitionType] {
        &[Self::Sinclair, Self::TotalWeight]
    }

    pub fn group_builder(&self) -> &'static dyn GroupBuilder {
        match self {
            Self::Sinclair => &SinclairGroupBuilder,
            Self::TotalWeight => &TotalWeightGroupBuilder,
        }
    }

    fn parse_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        match normalized.as_str() {
            "sinclair" => Ok(Self::Sinclair),
            "total_weight" | "totalweight" => Ok(Self::TotalWeight),
            _ => Err(CompetitionError::Configuration(format!(
                "Unknown competition type: '{}'. Available: {}",
                s,
                Self::all()
                    .iter()
                    .map(|t| t.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            ))),
        }
    }
}

impl std::str::FromStr for CompetitionType {
    type Err = CompetitionError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for CompetitionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompetitionSettings {
    pub name: String,
    pub competition_type: CompetitionType,
    pub competition_date: NaiveDate,
    pub registration_deadline: NaiveDateTime,
    pub max_participants: u32,
}

impl CompetitionSettings {
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(CompetitionError::Configuration(
                "Competition name must not be empty".to_string(),
            ));
        }
        if self.max_participants < 1 {
            return Err(CompetitionError::Configuration(
                "Competition must allow at least one participant".to_string(),
            ));
        }
        if self.registration_deadline.date() > self.competition_date {
            return Err(CompetitionError::Configuration(format!(
                "Registration deadline {} is after the competition date {}",
                self.registration_deadline, self.competition_date
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompetitionState {
    SignUpOpen,
    SignUpClosed,
    WeighInOpen,
    Competing,
    Complete,
}

impl CompetitionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignUpOpen => "sign_up_open",
            Self::SignUpClosed => "sign_up_closed",
            Self::WeighInOpen => "weigh_in_open",
            Self::Competing => "competing",
            Self::Complete => "complete",
        }
    }
}

impl std::fmt::Display for CompetitionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Groups {
    competing: Vec<Group>,
    ranking: Vec<Group>,
}

/// A single weightlifting competition.
///
/// The competition owns its participants and, once the weigh-in is finished,
/// the competing and ranking groups built from them. The state is never
/// stored; it is derived from the dates, the groups and the recorded lifts.
///
/// Lifts and weight changes go through the competition so the groups of the
/// affected participant are re-sorted right away.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Competition {
    competition_id: CompetitionId,
    settings: CompetitionSettings,
    roster: Roster,
    groups: Option<Groups>,
    #[serde(skip)]
    scoring: Arc<ScoringConfig>,
}

impl Competition {
    pub fn new(settings: CompetitionSettings, scoring: Arc<ScoringConfig>) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            competition_id: CompetitionId::new(),
            settings,
            roster: Roster::new(),
            groups: None,
            scoring,
        })
    }

    pub fn id(&self) -> CompetitionId {
        self.competition_id
    }

    pub fn settings(&self) -> &CompetitionSettings {
        &self.settings
    }

    pub fn name(&self) -> &str {
        &self.settings.name
    }

    pub fn competition_type(&self) -> CompetitionType {
        self.settings.competition_type
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Swaps the scoring tables, e.g. after loading a stored snapshot.
    pub fn set_scoring(&mut self, scoring: Arc<ScoringConfig>) {
        self.scoring = scoring;
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn participants(&self) -> impl Iterator<Item = &Participant> {
        self.roster.iter()
    }

    pub fn participant(&self, id: ParticipantId) -> Option<&Participant> {
        self.roster.get(id)
    }

    pub fn participant_by_lifter(&self, lifter_id: LifterId) -> Option<&Participant> {
        self.roster.by_lifter(lifter_id)
    }

    pub fn competing_groups(&self) -> &[Group] {
        self.groups
            .as_ref()
            .map(|g| g.competing.as_slice())
            .unwrap_or_default()
    }

    pub fn ranking_groups(&self) -> &[Group] {
        self.groups
            .as_ref()
            .map(|g| g.ranking.as_slice())
            .unwrap_or_default()
    }

    pub fn is_weigh_in_finished(&self) -> bool {
        self.groups.is_some()
    }

    pub fn state(&self) -> CompetitionState {
        self.state_at(Utc::now().naive_utc())
    }

    /// Phase of the competition at `now`. Once the weigh-in is finished the
    /// dates no longer matter: the competition is complete when every
    /// remaining participant has made all lifts, which includes the case
    /// where nobody weighed in and no groups were built.
    pub fn state_at(&self, now: NaiveDateTime) -> CompetitionState {
        if self.is_weigh_in_finished() {
            if self.roster.iter().all(Participant::all_lifts_complete) {
                CompetitionState::Complete
            } else {
                CompetitionState::Competing
            }
        } else if now <= self.settings.registration_deadline {
            CompetitionState::SignUpOpen
        } else if now.date() < self.settings.competition_date {
            CompetitionState::SignUpClosed
        } else {
            CompetitionState::WeighInOpen
        }
    }

    /// Start numbers in `1..=max_participants` not yet handed out, ascending.
    pub fn available_start_numbers(&self) -> Vec<u32> {
        let taken: Vec<u32> = self.roster.start_numbers().collect();
        (1..=self.settings.max_participants)
            .filter(|n| !taken.contains(n))
            .collect()
    }

    /// Registers a lifter with a start number drawn at random.
    pub fn add_participant(&mut self, lifter: Lifter) -> Result<ParticipantId> {
        self.add_participant_with_rng(lifter, &mut rand::rng())
    }

    pub fn add_participant_with_rng<R: Rng + ?Sized>(
        &mut self,
        lifter: Lifter,
        rng: &mut R,
    ) -> Result<ParticipantId> {
        self.ensure_weigh_in_open()?;
        if self.roster.by_lifter(lifter.lifter_id).is_some() {
            return Err(RuleViolation::AlreadyRegistered.into());
        }

        let start_number = *self
            .available_start_numbers()
            .choose(rng)
            .ok_or(RuleViolation::CompetitionFull(self.settings.max_participants))?;

        tracing::info!(
            "Registered {} for {} with start number {}",
            lifter.full_name(),
            self.settings.name,
            start_number
        );

        let participant = Participant::new(lifter, start_number);
        let id = participant.id();
        self.roster.push(participant);
        Ok(id)
    }

    pub fn remove_participant(&mut self, lifter_id: LifterId) -> Result<Participant> {
        self.ensure_weigh_in_open()?;
        let participant = self
            .roster
            .remove_lifter(lifter_id)
            .ok_or(RuleViolation::LifterNotRegistered)?;

        tracing::info!(
            "Removed {} (start number {}) from {}",
            participant.full_name(),
            participant.start_number(),
            self.settings.name
        );
        Ok(participant)
    }

    pub fn weigh_in(
        &mut self,
        id: ParticipantId,
        body_weight: Decimal,
        starting_snatch_weight: u32,
        starting_clean_and_jerk_weight: u32,
    ) -> Result<()> {
        self.ensure_weigh_in_open()?;
        let participant = self.roster.get_mut(id).ok_or(CompetitionError::NotFound)?;
        participant.weigh_in(
            body_weight,
            starting_snatch_weight,
            starting_clean_and_jerk_weight,
        )?;

        tracing::debug!(
            "Weighed in {} at {} kg, openers {}/{}",
            participant.full_name(),
            body_weight,
            starting_snatch_weight,
            starting_clean_and_jerk_weight
        );
        Ok(())
    }

    /// Closes the weigh-in: drops everyone who did not weigh in and builds the
    /// ranking groups, then the competing groups. Can only happen once.
    pub fn finish_weigh_in(&mut self) -> Result<Vec<Participant>> {
        self.ensure_weigh_in_open()?;

        let dropped = self.roster.drain_unless(Participant::is_weighed_in);
        for participant in &dropped {
            tracing::warn!(
                "Dropping {} (start number {}): not weighed in",
                participant.full_name(),
                participant.start_number()
            );
        }

        let builder = self.settings.competition_type.group_builder();
        let ranking = builder.build_ranking_groups(&self.roster, &self.scoring);
        let mut competing =
            builder.build_competing_groups(&ranking, &self.roster, &self.scoring);
        for group in &mut competing {
            group.sort(&self.roster, &self.scoring);
        }

        tracing::info!(
            "Weigh-in finished for {} ({} grouping): {} participants, {} ranking groups, {} competing groups",
            self.settings.name,
            builder.name(),
            self.roster.len(),
            ranking.len(),
            competing.len()
        );

        self.groups = Some(Groups { competing, ranking });
        Ok(dropped)
    }

    pub fn record_attempt(&mut self, id: ParticipantId, outcome: LiftOutcome) -> Result<()> {
        self.record_attempt_at(id, outcome, Utc::now().naive_utc())
    }

    pub fn record_attempt_at(
        &mut self,
        id: ParticipantId,
        outcome: LiftOutcome,
        timestamp: NaiveDateTime,
    ) -> Result<()> {
        self.update_participant(id, |participant| {
            let weight = participant.current_weight();
            participant.record_attempt_at(outcome, timestamp)?;
            tracing::info!(
                "{} {} at {} kg ({} of 6)",
                participant.full_name(),
                outcome,
                weight,
                participant.lifts_count()
            );
            Ok(())
        })
    }

    pub fn increase_weight(&mut self, id: ParticipantId, new_weight: u32) -> Result<()> {
        self.update_participant(id, |participant| {
            participant.increase_weight(new_weight)?;
            tracing::debug!(
                "{} raised the bar to {} kg",
                participant.full_name(),
                new_weight
            );
            Ok(())
        })
    }

    pub fn correct_weight(&mut self, id: ParticipantId, new_weight: u32) -> Result<()> {
        self.update_participant(id, |participant| {
            participant.correct_weight(new_weight)?;
            tracing::debug!(
                "Corrected bar for {} to {} kg",
                participant.full_name(),
                new_weight
            );
            Ok(())
        })
    }

    pub fn revert_weight(&mut self, id: ParticipantId) -> Result<()> {
        self.update_participant(id, |participant| {
            participant.revert_weight();
            tracing::debug!(
                "Reverted bar for {} to {} kg",
                participant.full_name(),
                participant.current_weight()
            );
            Ok(())
        })
    }

    /// Rank of a participant within its ranking group.
    pub fn rank(&self, id: ParticipantId) -> Result<u32> {
        let group = self
            .ranking_groups()
            .iter()
            .find(|g| g.contains(id))
            .ok_or(RuleViolation::ParticipantNotFound)?;
        group.rank(id, &self.roster, &self.scoring)
    }

    pub fn current_competing_group(&self) -> Option<&Group> {
        self.first_unfinished(self.competing_groups())
    }

    pub fn current_ranking_group(&self) -> Option<&Group> {
        self.first_unfinished(self.ranking_groups())
    }

    /// The participant due on the platform next.
    pub fn current_participant(&self) -> Option<&Participant> {
        self.current_competing_group()
            .and_then(Group::first_participant)
            .and_then(|id| self.roster.get(id))
    }

    /// Results of every ranking group, in group order.
    pub fn standings(&self) -> Vec<RankingGroupResult> {
        self.ranking_groups()
            .iter()
            .map(|group| RankingGroupResult::from_group(group, &self.roster, &self.scoring))
            .collect()
    }

    fn first_unfinished<'a>(&self, groups: &'a [Group]) -> Option<&'a Group> {
        groups.iter().find(|group| {
            group
                .members()
                .iter()
                .filter_map(|id| self.roster.get(*id))
                .any(|p| !p.all_lifts_complete())
        })
    }

    fn ensure_weigh_in_open(&self) -> Result<()> {
        if self.is_weigh_in_finished() {
            return Err(RuleViolation::WeighInClosed.into());
        }
        Ok(())
    }

    fn update_participant<F>(&mut self, id: ParticipantId, update: F) -> Result<()>
    where
        F: FnOnce(&mut Participant) -> Result<()>,
    {
        let Some(groups) = self.groups.as_mut() else {
            return Err(RuleViolation::WeighInNotFinished.into());
        };
        let participant = self.roster.get_mut(id).ok_or(CompetitionError::NotFound)?;
        update(participant)?;

        for group in groups
            .competing
            .iter_mut()
            .chain(groups.ranking.iter_mut())
            .filter(|g| g.contains(id))
        {
            group.sort(&self.roster, &self.scoring);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, GroupPurpose};
    use chrono::Duration;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn competition_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 2).unwrap()
    }

    fn settings(competition_type: CompetitionType, max_participants: u32) -> CompetitionSettings {
        CompetitionSettings {
            name: "Aalborg Open".to_string(),
            competition_type,
            competition_date: competition_date(),
            registration_deadline: NaiveDate::from_ymd_opt(2026, 4, 25)
                .unwrap()
                .and_hms_opt(23, 59, 0)
                .unwrap(),
            max_participants,
        }
    }

    fn competition(competition_type: CompetitionType, max_participants: u32) -> Competition {
        Competition::new(
            settings(competition_type, max_participants),
            Arc::new(ScoringConfig::default()),
        )
        .unwrap()
    }

    fn at(n: i64) -> NaiveDateTime {
        competition_date().and_hms_opt(10, 0, 0).unwrap() + Duration::minutes(n)
    }

    fn register(
        competition: &mut Competition,
        rng: &mut StdRng,
        gender: Gender,
        body_weight: Decimal,
        snatch: u32,
        clean_and_jerk: u32,
    ) -> ParticipantId {
        let id = competition
            .add_participant_with_rng(Lifter::new("Test", "Lifter", gender), rng)
            .unwrap();
        competition
            .weigh_in(id, body_weight, snatch, clean_and_jerk)
            .unwrap();
        id
    }

    /// Ten men and ten women weighed in, Sinclair scoring.
    fn sinclair_competition() -> Competition {
        let mut competition = competition(CompetitionType::Sinclair, 50);
        let mut rng = StdRng::seed_from_u64(42);
        for i in 0..10 {
            register(&mut competition, &mut rng, Gender::Male, Decimal::from(85), 50 + i * 10, 80 + i * 10);
            register(&mut competition, &mut rng, Gender::Female, Decimal::from(63), 40 + i * 3, 60 + i * 3);
        }
        competition
    }

    fn rule(error: CompetitionError) -> RuleViolation {
        error.rule().cloned().expect("expected a rule violation")
    }

    #[test]
    fn test_competition_type_parsing() {
        assert_eq!(
            "sinclair".parse::<CompetitionType>().unwrap(),
            CompetitionType::Sinclair
        );
        assert_eq!(
            "Total-Weight".parse::<CompetitionType>().unwrap(),
            CompetitionType::TotalWeight
        );
        assert!(
            "robi"
                .parse::<CompetitionType>()
                .unwrap_err()
                .is_configuration_error()
        );
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let mut bad = settings(CompetitionType::Sinclair, 0);
        let err = Competition::new(bad.clone(), Arc::default()).unwrap_err();
        assert!(err.is_configuration_error());

        bad.max_participants = 10;
        bad.registration_deadline = at(60 * 24);
        assert!(Competition::new(bad, Arc::default()).is_err());
    }

    #[test]
    fn test_state_follows_dates_and_groups() {
        let mut competition = sinclair_competition();
        let deadline = competition.settings().registration_deadline;

        assert_eq!(competition.state_at(deadline), CompetitionState::SignUpOpen);
        assert_eq!(
            competition.state_at(deadline + Duration::minutes(1)),
            CompetitionState::SignUpClosed
        );
        assert_eq!(competition.state_at(at(0)), CompetitionState::WeighInOpen);

        competition.finish_weigh_in().unwrap();
        assert_eq!(competition.state_at(at(0)), CompetitionState::Competing);
        assert_eq!(competition.state_at(deadline), CompetitionState::Competing);
    }

    #[test]
    fn test_competition_completes_after_all_lifts() {
        let mut competition = competition(CompetitionType::TotalWeight, 5);
        let mut rng = StdRng::seed_from_u64(1);
        register(&mut competition, &mut rng, Gender::Female, Decimal::from(58), 60, 80);
        register(&mut competition, &mut rng, Gender::Female, Decimal::from(58), 62, 82);
        competition.finish_weigh_in().unwrap();

        let mut minute = 0;
        while let Some(next) = competition.current_participant().map(Participant::id) {
            competition
                .record_attempt_at(next, LiftOutcome::Pass, at(minute))
                .unwrap();
            minute += 1;
        }

        assert_eq!(minute, 12);
        assert_eq!(competition.state_at(at(minute)), CompetitionState::Complete);
        assert!(competition.current_competing_group().is_none());
        assert!(competition.current_ranking_group().is_none());
    }

    #[test]
    fn test_start_numbers_are_unique() {
        let mut competition = competition(CompetitionType::Sinclair, 8);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..8 {
            competition
                .add_participant_with_rng(Lifter::new("A", "B", Gender::Male), &mut rng)
                .unwrap();
        }

        let mut numbers: Vec<u32> = competition.roster().start_numbers().collect();
        numbers.sort_unstable();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
        assert!(competition.available_start_numbers().is_empty());

        let err = competition
            .add_participant_with_rng(Lifter::new("C", "D", Gender::Male), &mut rng)
            .unwrap_err();
        assert_eq!(rule(err), RuleViolation::CompetitionFull(8));
    }

    #[test]
    fn test_available_start_numbers_exclude_taken() {
        let mut competition = competition(CompetitionType::Sinclair, 5);
        let id = competition
            .add_participant(Lifter::new("A", "B", Gender::Female))
            .unwrap();
        let taken = competition.participant(id).unwrap().start_number();

        let available = competition.available_start_numbers();
        assert_eq!(available.len(), 4);
        assert!(!available.contains(&taken));
    }

    #[test]
    fn test_register_and_remove_lifter() {
        let mut competition = competition(CompetitionType::Sinclair, 5);
        let lifter = Lifter::new("Anna", "Berg", Gender::Female);
        let lifter_id = lifter.lifter_id;
        competition.add_participant(lifter.clone()).unwrap();

        let err = competition.add_participant(lifter).unwrap_err();
        assert_eq!(rule(err), RuleViolation::AlreadyRegistered);

        let removed = competition.remove_participant(lifter_id).unwrap();
        assert_eq!(removed.full_name(), "Anna Berg");
        assert!(competition.participant_by_lifter(lifter_id).is_none());

        let err = competition.remove_participant(lifter_id).unwrap_err();
        assert_eq!(rule(err), RuleViolation::LifterNotRegistered);
    }

    #[test]
    fn test_finish_weigh_in_builds_groups() {
        let mut competition = sinclair_competition();
        assert!(competition.competing_groups().is_empty());
        assert!(competition.ranking_groups().is_empty());

        competition.finish_weigh_in().unwrap();

        assert_eq!(competition.ranking_groups().len(), 2);
        assert_eq!(competition.competing_groups().len(), 2);
        assert!(
            competition
                .ranking_groups()
                .iter()
                .all(|g| g.purpose() == GroupPurpose::SinclairRanking)
        );
    }

    #[test]
    fn test_finish_weigh_in_drops_lifters_not_weighed_in() {
        let mut competition = sinclair_competition();
        let before = competition.roster().len();
        competition
            .add_participant(Lifter::new("No", "Show", Gender::Male))
            .unwrap();

        let dropped = competition.finish_weigh_in().unwrap();

        assert_eq!(dropped.len(), 1);
        assert_eq!(dropped[0].full_name(), "No Show");
        assert_eq!(competition.roster().len(), before);
    }

    #[test]
    fn test_finish_weigh_in_is_one_way() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let err = competition.finish_weigh_in().unwrap_err();
        assert_eq!(rule(err), RuleViolation::WeighInClosed);

        let err = competition
            .add_participant(Lifter::new("Late", "Comer", Gender::Male))
            .unwrap_err();
        assert_eq!(rule(err), RuleViolation::WeighInClosed);
    }

    #[test]
    fn test_weigh_in_without_participants_completes() {
        let mut competition = competition(CompetitionType::TotalWeight, 5);
        competition
            .add_participant(Lifter::new("No", "Show", Gender::Female))
            .unwrap();

        let dropped = competition.finish_weigh_in().unwrap();

        assert_eq!(dropped.len(), 1);
        assert!(competition.competing_groups().is_empty());
        assert!(competition.ranking_groups().is_empty());
        assert!(competition.current_participant().is_none());
        assert!(competition.standings().is_empty());
        assert_eq!(competition.state_at(at(0)), CompetitionState::Complete);
    }

    #[test]
    fn test_lifting_requires_finished_weigh_in() {
        let mut competition = sinclair_competition();
        let id = competition.participants().next().unwrap().id();

        let err = competition
            .record_attempt_at(id, LiftOutcome::Pass, at(0))
            .unwrap_err();
        assert_eq!(rule(err), RuleViolation::WeighInNotFinished);

        let err = competition.increase_weight(id, 200).unwrap_err();
        assert_eq!(rule(err), RuleViolation::WeighInNotFinished);
    }

    #[test]
    fn test_current_group_and_participant() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let first_group = &competition.competing_groups()[0];
        assert_eq!(competition.current_competing_group(), Some(first_group));
        assert_eq!(
            competition.current_ranking_group(),
            Some(&competition.ranking_groups()[0])
        );

        let current = competition.current_participant().unwrap();
        assert_eq!(Some(current.id()), first_group.first_participant());
        // Women lift first, lightest opener first.
        assert_eq!(current.gender(), Gender::Female);
        assert_eq!(current.starting_snatch_weight(), 40);
    }

    #[test]
    fn test_lift_reorders_competing_group() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let first = competition.current_participant().unwrap().id();
        competition
            .record_attempt_at(first, LiftOutcome::Pass, at(0))
            .unwrap();

        // 41 kg now, still behind the 43 kg opener but ahead of 46 kg.
        let next = competition.current_participant().unwrap();
        assert_eq!(next.current_weight(), 41);
        assert_eq!(next.id(), first);

        competition.increase_weight(first, 50).unwrap();
        let next = competition.current_participant().unwrap();
        assert_eq!(next.starting_snatch_weight(), 43);

        competition.revert_weight(first).unwrap();
        assert_eq!(competition.current_participant().unwrap().id(), first);
    }

    #[test]
    fn test_rank_updates_with_lifts() {
        let mut competition = competition(CompetitionType::TotalWeight, 10);
        let mut rng = StdRng::seed_from_u64(9);
        let a = register(&mut competition, &mut rng, Gender::Male, Decimal::from(77), 100, 120);
        let b = register(&mut competition, &mut rng, Gender::Male, Decimal::from(77), 100, 120);
        competition.finish_weigh_in().unwrap();

        assert_eq!(competition.rank(a).unwrap(), 1);
        assert_eq!(competition.rank(b).unwrap(), 1);

        let mut minute = 0;
        for outcome in [LiftOutcome::Pass, LiftOutcome::Fail, LiftOutcome::Fail] {
            for id in [a, b] {
                competition.record_attempt_at(id, outcome, at(minute)).unwrap();
                minute += 1;
            }
        }
        competition.record_attempt_at(a, LiftOutcome::Pass, at(minute)).unwrap();
        competition.record_attempt_at(b, LiftOutcome::Fail, at(minute + 1)).unwrap();
        competition.correct_weight(b, 130).unwrap();
        competition.record_attempt_at(b, LiftOutcome::Pass, at(minute + 2)).unwrap();

        assert_eq!(competition.participant(a).unwrap().total_score(), 220);
        assert_eq!(competition.participant(b).unwrap().total_score(), 230);
        assert_eq!(competition.rank(b).unwrap(), 1);
        assert_eq!(competition.rank(a).unwrap(), 2);
    }

    #[test]
    fn test_rank_of_unknown_participant_fails() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let err = competition.rank(ParticipantId::new()).unwrap_err();
        assert_eq!(rule(err), RuleViolation::ParticipantNotFound);
    }

    #[test]
    fn test_forty_participant_total_weight_meet() {
        let mut competition = competition(CompetitionType::TotalWeight, 40);
        let mut rng = StdRng::seed_from_u64(40);
        for i in 0..40 {
            let (gender, body_weight) = match i {
                0..15 => (Gender::Male, Decimal::from(55)),
                15..30 => (Gender::Male, Decimal::from(61)),
                _ => (Gender::Female, Decimal::from(47)),
            };
            register(&mut competition, &mut rng, gender, body_weight, 50 + i, 70 + i);
        }
        competition.finish_weigh_in().unwrap();

        let ranking = competition.ranking_groups();
        assert_eq!(ranking.len(), 3);
        assert_eq!(ranking[0].gender(competition.roster()), Some(Gender::Female));
        assert_eq!(ranking[1].len(), 15);
        assert_eq!(ranking[2].len(), 15);

        let sizes: Vec<usize> = competition.competing_groups().iter().map(Group::len).collect();
        assert_eq!(sizes, vec![10, 8, 7, 8, 7]);
    }

    #[test]
    fn test_standings_follow_ranking_groups() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let standings = competition.standings();
        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].gender, Some(Gender::Female));
        assert_eq!(standings[0].entries.len(), 10);
        assert!(standings.iter().flat_map(|s| &s.entries).all(|e| e.rank == 1));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut competition = sinclair_competition();
        competition.finish_weigh_in().unwrap();

        let json = serde_json::to_string(&competition).unwrap();
        let restored: Competition = serde_json::from_str(&json).unwrap();

        assert_eq!(restored.id(), competition.id());
        assert_eq!(restored.competing_groups(), competition.competing_groups());
        assert_eq!(restored.state_at(at(0)), CompetitionState::Competing);
    }
}
