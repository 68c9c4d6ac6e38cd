use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeskError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Unterminated quote in: {0}")]
    UnterminatedQuote(String),

    #[error(transparent)]
    Schedule(#[from] area_schedule::ScheduleError),
}

pub type Result<T> = std::result::Result<T, DeskError>;
