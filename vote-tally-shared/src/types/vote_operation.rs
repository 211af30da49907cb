use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A vote lifecycle transition.
///
/// Each transition of a user's vote on a target drives exactly one counter
/// update on that target.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VoteOperation {
    /// The user voted on the target for the first time.
    Create,
    /// The user changed the value of an existing vote.
    Update,
    /// The user retracted their vote.
    Delete,
}

impl VoteOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoteOperation::Create => "create",
            VoteOperation::Update => "update",
            VoteOperation::Delete => "delete",
        }
    }
}

impl fmt::Display for VoteOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when an operation name is not one of `create`, `update` or `delete`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Invalid vote operation: {0}")]
pub struct InvalidVoteOperation(pub String);

impl FromStr for VoteOperation {
    type Err = InvalidVoteOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(VoteOperation::Create),
            "update" => Ok(VoteOperation::Update),
            "delete" => Ok(VoteOperation::Delete),
            other => Err(InvalidVoteOperation(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_operations() {
        assert_eq!("create".parse::<VoteOperation>(), Ok(VoteOperation::Create));
        assert_eq!("update".parse::<VoteOperation>(), Ok(VoteOperation::Update));
        assert_eq!("delete".parse::<VoteOperation>(), Ok(VoteOperation::Delete));
    }

    #[test]
    fn test_parse_is_case_sensitive() {
        let err = "Create".parse::<VoteOperation>().unwrap_err();
        assert_eq!(err, InvalidVoteOperation("Create".to_string()));
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = "upsert".parse::<VoteOperation>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid vote operation: upsert");
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for op in [VoteOperation::Create, VoteOperation::Update, VoteOperation::Delete] {
            assert_eq!(op.to_string().parse::<VoteOperation>(), Ok(op));
        }
    }
}
