use std::collections::{HashMap, HashSet};

use engine::models::participant::TOTAL_ATTEMPTS;
use tracing::warn;
use validator::Validate;

use super::models::{FORMAT_VERSION, MeetAction, MeetFile};
use crate::{Result, RunnerError};

pub struct MeetValidator;

impl MeetValidator {
    /// Checks a meet file before it is replayed. Problems that would make the
    /// replay fail are errors, everything else is a warning.
    pub fn validate(meet: &MeetFile) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();

        if meet.format_version != FORMAT_VERSION {
            report.errors.push(format!(
                "Unsupported format version: {}. Expected {}",
                meet.format_version, FORMAT_VERSION
            ));
        }

        if let Err(errors) = meet.competition.validate() {
            report
                .errors
                .push(format!("Invalid competition: {}", errors));
        }
        if let Err(msg) = meet.competition.validate_dates() {
            report.errors.push(msg.to_string());
        }

        if meet.lifters.is_empty() {
            report
                .errors
                .push("At least one lifter is required".to_string());
        }
        if meet.lifters.len() > meet.competition.max_participants as usize {
            report.errors.push(format!(
                "{} lifters signed up but the competition is limited to {}",
                meet.lifters.len(),
                meet.competition.max_participants
            ));
        }

        let mut keys = HashSet::new();
        let mut weighed_in = HashSet::new();
        for lifter in &meet.lifters {
            let label = format!(
                "{} ({} {})",
                lifter.key, lifter.registration.forename, lifter.registration.surname
            );

            if lifter.key.trim().is_empty() {
                report.errors.push(format!(
                    "Lifter '{} {}' has an empty key",
                    lifter.registration.forename, lifter.registration.surname
                ));
            }
            if !keys.insert(lifter.key.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate lifter key: '{}'", lifter.key));
            }
            if let Err(errors) = lifter.registration.validate() {
                report
                    .errors
                    .push(format!("Lifter '{}' is invalid: {}", label, errors));
            }
            if lifter.registration.club.is_none() {
                report
                    .warnings
                    .push(format!("Lifter '{}' has no club", label));
            }

            match &lifter.weigh_in {
                Some(weigh_in) => {
                    if let Err(errors) = weigh_in.validate() {
                        report
                            .errors
                            .push(format!("Lifter '{}' has an invalid weigh-in: {}", label, errors));
                    }
                    weighed_in.insert(lifter.key.as_str());
                }
                None => report.warnings.push(format!(
                    "Lifter '{}' was not weighed in and will be dropped",
                    label
                )),
            }
        }

        let mut attempts: HashMap<&str, usize> = HashMap::new();
        for (index, event) in meet.events.iter().enumerate() {
            let position = index + 1;
            if !keys.contains(event.lifter.as_str()) {
                report.errors.push(format!(
                    "Event {} refers to unknown lifter '{}'",
                    position, event.lifter
                ));
                continue;
            }
            if !weighed_in.contains(event.lifter.as_str()) {
                report.errors.push(format!(
                    "Event {} refers to lifter '{}' who was not weighed in",
                    position, event.lifter
                ));
                continue;
            }

            match &event.action {
                MeetAction::Attempt(attempt) => {
                    if let Err(errors) = attempt.validate() {
                        report
                            .errors
                            .push(format!("Event {} is invalid: {}", position, errors));
                    }
                    let count = attempts.entry(event.lifter.as_str()).or_default();
                    *count += 1;
                    if *count == TOTAL_ATTEMPTS + 1 {
                        report.errors.push(format!(
                            "Lifter '{}' has more than {} attempts",
                            event.lifter, TOTAL_ATTEMPTS
                        ));
                    }
                }
                MeetAction::WeightChange(change) => {
                    if let Err(errors) = change.validate() {
                        report
                            .errors
                            .push(format!("Event {} is invalid: {}", position, errors));
                    }
                    if let Err(msg) = change.validate_weight() {
                        report
                            .errors
                            .push(format!("Event {} is invalid: {}", position, msg));
                    }
                }
            }
        }

        let mut unfinished: Vec<&str> = weighed_in
            .iter()
            .copied()
            .filter(|key| attempts.get(key).copied().unwrap_or(0) < TOTAL_ATTEMPTS)
            .collect();
        unfinished.sort_unstable();
        for key in unfinished {
            report.warnings.push(format!(
                "Lifter '{}' has fewer than {} attempts, the competition will not complete",
                key, TOTAL_ATTEMPTS
            ));
        }

        if !report.errors.is_empty() {
            Err(RunnerError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}
