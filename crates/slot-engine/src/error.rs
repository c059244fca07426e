//! Error types for slot-engine operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SlotError {
    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("No performing units: {0}")]
    NoPerformingUnits(String),
}

pub type Result<T> = std::result::Result<T, SlotError>;
