use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use engine::CompetitionError;
use engine::models::{Competition, ParticipantId, ScoringConfig};
use rand::Rng;

use super::models::{MeetAction, MeetFile, RejectedEvent, StandingsReport};
use crate::{Result, RunnerError};

/// Hour of the competition day at which the first attempt is made.
const FIRST_LIFT_HOUR: i64 = 10;

fn first_lift(competition_date: NaiveDate) -> NaiveDateTime {
    competition_date.and_time(NaiveTime::default()) + Duration::hours(FIRST_LIFT_HOUR)
}

/// Hands out attempt timestamps one minute apart.
#[derive(Debug, Clone)]
pub struct SyntheticClock {
    next: NaiveDateTime,
    step: Duration,
}

impl SyntheticClock {
    pub fn starting_at(start: NaiveDateTime) -> Self {
        Self {
            next: start,
            step: Duration::minutes(1),
        }
    }

    pub fn now(&self) -> NaiveDateTime {
        self.next
    }

    pub fn tick(&mut self) -> NaiveDateTime {
        let now = self.next;
        self.next += self.step;
        now
    }
}

/// A finished replay: the competition in its final state plus everything the
/// competition refused along the way.
#[derive(Debug)]
pub struct ReplayOutcome {
    pub competition: Competition,
    pub dropped: Vec<String>,
    pub rejected: Vec<RejectedEvent>,
    pub finished_at: NaiveDateTime,
}

impl ReplayOutcome {
    pub fn standings_report(&self) -> StandingsReport {
        StandingsReport {
            competition: self.competition.name().to_string(),
            competition_type: self.competition.competition_type(),
            state: self.competition.state_at(self.finished_at),
            groups: self.competition.standings(),
            dropped: self.dropped.clone(),
            rejected_events: self.rejected.clone(),
        }
    }
}

/// Runs a meet file through a competition: sign-up, weigh-in and every
/// recorded event, in file order.
pub struct MeetReplay {
    scoring: Arc<ScoringConfig>,
}

impl MeetReplay {
    pub fn new(scoring: Arc<ScoringConfig>) -> Self {
        Self { scoring }
    }

    pub fn run(&self, meet: MeetFile) -> Result<ReplayOutcome> {
        self.run_with_rng(meet, &mut rand::rng())
    }

    /// Broken rules are collected as rejected events and the replay goes on;
    /// anything else aborts it.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, meet: MeetFile, rng: &mut R) -> Result<ReplayOutcome> {
        let settings = meet.competition.into_settings()?;
        let mut clock = SyntheticClock::starting_at(first_lift(settings.competition_date));
        let mut competition = Competition::new(settings, Arc::clone(&self.scoring))?;

        tracing::info!(
            "Replaying {} ({}, {} lifters, {} events)",
            competition.name(),
            competition.competition_type(),
            meet.lifters.len(),
            meet.events.len()
        );

        let mut participants: HashMap<String, ParticipantId> = HashMap::new();
        for lifter in meet.lifters {
            let key = lifter.key;
            let id = competition.add_participant_with_rng(lifter.registration.into_lifter()?, rng)?;
            if let Some(weigh_in) = lifter.weigh_in {
                weigh_in.apply(&mut competition, id)?;
            }
            participants.insert(key, id);
        }

        let dropped: Vec<String> = competition
            .finish_weigh_in()?
            .into_iter()
            .map(|p| p.full_name())
            .collect();

        let mut rejected = Vec::new();
        for (index, event) in meet.events.into_iter().enumerate() {
            let id = participants
                .get(&event.lifter)
                .copied()
                .filter(|id| competition.participant(*id).is_some())
                .ok_or_else(|| {
                    RunnerError::ReplayError(format!(
                        "Event {} refers to lifter '{}' who is not competing",
                        index + 1,
                        event.lifter
                    ))
                })?;

            let result = match &event.action {
                MeetAction::Attempt(attempt) => attempt.apply(&mut competition, id, clock.tick()),
                MeetAction::WeightChange(change) => change.apply(&mut competition, id),
            };

            match result {
                Ok(()) => {}
                Err(CompetitionError::Rule(rule)) => {
                    tracing::warn!("Event {} for '{}' rejected: {}", index + 1, event.lifter, rule);
                    rejected.push(RejectedEvent {
                        index,
                        lifter: event.lifter,
                        reason: rule.to_string(),
                    });
                }
                Err(e) => return Err(e.into()),
            }
        }

        let finished_at = clock.now();
        tracing::info!(
            "Replay of {} finished: {} ({} rejected events)",
            competition.name(),
            competition.state_at(finished_at),
            rejected.len()
        );

        Ok(ReplayOutcome {
            competition,
            dropped,
            rejected,
            finished_at,
        })
    }
}
