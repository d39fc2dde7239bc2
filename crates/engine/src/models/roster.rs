use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{LifterId, Participant, ParticipantId};

/// All participants of a competition, in registration order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Roster {
    participants: Vec<Participant>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.participants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter()
    }

    pub fn as_slice(&self) -> &[Participant] {
        &self.participants
    }

    pub fn get(&self, id: ParticipantId) -> Option<&Participant> {
        self.participants.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: ParticipantId) -> Option<&mut Participant> {
        self.participants.iter_mut().find(|p| p.id() == id)
    }

    pub fn by_lifter(&self, lifter_id: LifterId) -> Option<&Participant> {
        self.participants
            .iter()
            .find(|p| p.lifter().lifter_id == lifter_id)
    }

    pub fn start_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.participants.iter().map(Participant::start_number)
    }

    pub(crate) fn push(&mut self, participant: Participant) {
        self.participants.push(participant);
    }

    pub(crate) fn remove_lifter(&mut self, lifter_id: LifterId) -> Option<Participant> {
        let index = self
            .participants
            .iter()
            .position(|p| p.lifter().lifter_id == lifter_id)?;
        Some(self.participants.remove(index))
    }

    /// Drops every participant that does not satisfy `keep`, returning them.
    pub(crate) fn drain_unless(&mut self, keep: impl Fn(&Participant) -> bool) -> Vec<Participant> {
        let (kept, dropped) = std::mem::take(&mut self.participants)
            .into_iter()
            .partition(|p| keep(p));
        self.participants = kept;
        dropped
    }

    /// Participants indexed by id, for lookups during sorting.
    pub(crate) fn index(&self) -> HashMap<ParticipantId, &Participant> {
        self.participants.iter().map(|p| (p.id(), p)).collect()
    }
}

impl FromIterator<Participant> for Roster {
    fn from_iter<I: IntoIterator<Item = Participant>>(iter: I) -> Self {
        Self {
            participants: iter.into_iter().collect(),
        }
    }
}
