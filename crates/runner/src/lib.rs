pub mod error;
pub mod meet;

pub use error::{Result, RunnerError};
pub use meet::{
    loader::{load_meet, load_scoring, write_standings},
    models::MeetFile,
    replay::{MeetReplay, ReplayOutcome},
    validator::{MeetValidator, ValidationReport},
};
