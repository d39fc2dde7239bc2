use thiserror::Error;

pub type Result<T> = std::result::Result<T, RunnerError>;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to parse JSON: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Competition error: {0}")]
    CompetitionError(#[from] engine::CompetitionError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Replay error: {0}")]
    ReplayError(String),
}
