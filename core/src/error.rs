use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid card position")]
    InvalidPosition,
    #[error("Board is locked, no card can be selected right now")]
    InputLocked,
    #[error("Two cards must be selected before evaluating a pair")]
    NothingToEvaluate,
}

pub type Result<T> = core::result::Result<T, GameError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Stored value is malformed: {0}")]
    Malformed(String),
    #[error("Storage backend failed: {0}")]
    Backend(String),
}

pub type StorageResult<T> = core::result::Result<T, StorageError>;
