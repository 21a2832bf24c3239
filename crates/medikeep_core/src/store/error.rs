use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Business-rule refusal surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The sole remaining profile cannot be deleted.
    LastProfile,
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastProfile => write!(f, "you must keep at least one profile"),
        }
    }
}

impl Error for StoreError {}
