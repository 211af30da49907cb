use crate::errors::ProcessorError;
use vote_tally_shared::types::{VoteDelta, VoteOperation};

fn require(
    operation: VoteOperation,
    field: &'static str,
    value: Option<bool>,
) -> Result<bool, ProcessorError> {
    value.ok_or(ProcessorError::MissingValue { operation, field })
}

/// Translates a vote lifecycle transition into counter deltas.
///
/// `new_value` is the vote after the transition and `old_value` the vote
/// before it (`true` is an upvote). `create` needs `new_value`, `delete` needs
/// `old_value` and `update` needs both. An `update` that keeps the same value
/// resolves to `VoteDelta::ZERO`.
///
/// # Errors
///
/// Returns `ProcessorError::MissingValue` when a required value is absent.
pub fn resolve_delta(
    operation: VoteOperation,
    new_value: Option<bool>,
    old_value: Option<bool>,
) -> Result<VoteDelta, ProcessorError> {
    let delta = match operation {
        VoteOperation::Create => match require(operation, "new_value", new_value)? {
            true => VoteDelta::new(1, 0, 1),
            false => VoteDelta::new(0, 1, 1),
        },
        VoteOperation::Delete => match require(operation, "old_value", old_value)? {
            true => VoteDelta::new(-1, 0, -1),
            false => VoteDelta::new(0, -1, -1),
        },
        VoteOperation::Update => {
            let new_value = require(operation, "new_value", new_value)?;
            let old_value = require(operation, "old_value", old_value)?;
            match (old_value, new_value) {
                (false, true) => VoteDelta::new(1, -1, 0),
                (true, false) => VoteDelta::new(-1, 1, 0),
                _ => VoteDelta::ZERO,
            }
        }
    };
    Ok(delta)
}

/// Same as [`resolve_delta`] for an operation given by name.
///
/// # Errors
///
/// Returns `ProcessorError::InvalidOperation` when `operation` is not one of
/// `create`, `update` or `delete`.
pub fn resolve_delta_str(
    operation: &str,
    new_value: Option<bool>,
    old_value: Option<bool>,
) -> Result<VoteDelta, ProcessorError> {
    resolve_delta(operation.parse()?, new_value, old_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vote_tally_shared::types::VoteCounters;

    fn apply(start: (i64, i64, i64), delta: VoteDelta) -> (i64, i64, i64) {
        let counters = VoteCounters::new(start.0, start.1, start.2).apply(&delta);
        (counters.upvote_count, counters.downvote_count, counters.vote_count)
    }

    #[test]
    fn test_create_upvote() {
        let delta = resolve_delta(VoteOperation::Create, Some(true), None).unwrap();
        assert_eq!(delta, VoteDelta::new(1, 0, 1));
        assert_eq!(apply((0, 0, 0), delta), (1, 0, 1));
    }

    #[test]
    fn test_create_downvote() {
        let delta = resolve_delta(VoteOperation::Create, Some(false), None).unwrap();
        assert_eq!(apply((0, 0, 0), delta), (0, 1, 1));
    }

    #[test]
    fn test_delete_upvote() {
        let delta = resolve_delta(VoteOperation::Delete, None, Some(true)).unwrap();
        assert_eq!(apply((4, 1, 5), delta), (3, 1, 4));
    }

    #[test]
    fn test_delete_downvote() {
        let delta = resolve_delta(VoteOperation::Delete, None, Some(false)).unwrap();
        assert_eq!(delta, VoteDelta::new(0, -1, -1));
    }

    #[test]
    fn test_update_upvote_to_downvote() {
        let delta = resolve_delta(VoteOperation::Update, Some(false), Some(true)).unwrap();
        assert_eq!(apply((2, 3, 5), delta), (1, 4, 5));
    }

    #[test]
    fn test_update_downvote_to_upvote() {
        let delta = resolve_delta(VoteOperation::Update, Some(true), Some(false)).unwrap();
        assert_eq!(apply((3, 2, 5), delta), (4, 1, 5));
    }

    #[test]
    fn test_update_same_value_is_zero() {
        for value in [true, false] {
            let delta = resolve_delta(VoteOperation::Update, Some(value), Some(value)).unwrap();
            assert!(delta.is_zero());
        }
    }

    #[test]
    fn test_ignores_unused_value() {
        let delta = resolve_delta(VoteOperation::Create, Some(true), Some(false)).unwrap();
        assert_eq!(delta, VoteDelta::new(1, 0, 1));
    }

    #[test]
    fn test_vote_count_delta_matches_parts() {
        for operation in [VoteOperation::Create, VoteOperation::Update, VoteOperation::Delete] {
            for new_value in [true, false] {
                for old_value in [true, false] {
                    let delta = resolve_delta(operation, Some(new_value), Some(old_value)).unwrap();
                    assert_eq!(delta.vote_count, delta.upvotes + delta.downvotes);
                }
            }
        }
    }

    #[test]
    fn test_create_without_value() {
        let err = resolve_delta(VoteOperation::Create, None, Some(true)).unwrap_err();
        assert_eq!(
            err,
            ProcessorError::MissingValue {
                operation: VoteOperation::Create,
                field: "new_value"
            }
        );
    }

    #[test]
    fn test_delete_without_value() {
        let err = resolve_delta(VoteOperation::Delete, Some(true), None).unwrap_err();
        assert_eq!(
            err,
            ProcessorError::MissingValue {
                operation: VoteOperation::Delete,
                field: "old_value"
            }
        );
    }

    #[test]
    fn test_update_with_one_value() {
        let err = resolve_delta(VoteOperation::Update, Some(true), None).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingValue { field: "old_value", .. }));

        let err = resolve_delta(VoteOperation::Update, None, Some(true)).unwrap_err();
        assert!(matches!(err, ProcessorError::MissingValue { field: "new_value", .. }));
    }

    #[test]
    fn test_invalid_operation_name() {
        let err = resolve_delta_str("flip", Some(true), Some(false)).unwrap_err();
        assert_eq!(err, ProcessorError::InvalidOperation("flip".to_string()));
    }

    #[test]
    fn test_operation_by_name() {
        let delta = resolve_delta_str("delete", None, Some(false)).unwrap();
        assert_eq!(delta, VoteDelta::new(0, -1, -1));
    }
}
