use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Failed to access schedule file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Schedule file {} is not a valid schedule: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid time of day '{value}': {reason}")]
    Parse { value: String, reason: String },

    #[error("Duplicate person name: {0}")]
    DuplicatePerson(String),

    #[error("Person not found: {0}")]
    PersonNotFound(String),

    #[error("Failed to encode schedule: {0}")]
    Encode(#[from] serde_json::Error),
}

impl ScheduleError {
    pub(crate) fn parse(value: &str, reason: impl Into<String>) -> Self {
        ScheduleError::Parse {
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScheduleError>;
