use std::{io, path::PathBuf};
use thiserror::Error;

use crate::config::Variant;

pub type Result<T> = std::result::Result<T, ScheduleError>;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV parse error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid CSV Header: {0}")]
    CsvHeader(String),

    #[error("CSV file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to open CSV file {path}")]
    OpenInput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("No CSV files given")]
    NoInputs,

    #[error("No valid data found in CSV files")]
    NoValidData,

    #[error("The {variant} variant takes exactly one CSV file, got {got}")]
    InputCount { variant: Variant, got: usize },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write file {path}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<toml::de::Error> for ScheduleError {
    fn from(err: toml::de::Error) -> Self {
        ScheduleError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for ScheduleError {
    fn from(err: toml::ser::Error) -> Self {
        ScheduleError::Config(format!("TOML encode error: {}", err))
    }
}
