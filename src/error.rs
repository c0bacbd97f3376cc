use thiserror::Error;

use crate::model::LocationId;

/// Errors raised by the dataset repository and the ranking engine.
///
/// Numeric edge cases (all-zero criteria, zero raw values, empty sets) are never
/// errors; they are handled as scoring policy inside the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed criterion or location data. Holds every problem found, not just the first.
    #[error("invalid input: {}", .0.join("; "))]
    InvalidInput(Vec<String>),

    #[error("criterion '{0}' already exists")]
    DuplicateCriterion(String),

    #[error("unknown criterion '{0}'")]
    UnknownCriterion(String),

    #[error("unknown location {0}")]
    UnknownLocation(LocationId),
}

impl Error {
    pub fn invalid(message: impl Into<String>) -> Self {
        Error::InvalidInput(vec![message.into()])
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_joins_messages() {
        let err = Error::InvalidInput(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "invalid input: a; b");
    }

    #[test]
    fn test_unknown_location_display() {
        assert_eq!(Error::UnknownLocation(7).to_string(), "unknown location 7");
    }
}
