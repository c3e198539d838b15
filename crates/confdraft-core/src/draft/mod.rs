// Draft engine: rotation, allocation ledger, state machine, and session.

pub mod ledger;
pub mod pick;
pub mod rotation;
pub mod session;
pub mod setup;
pub mod state;

use thiserror::Error;

/// Errors raised by the draft engine.
///
/// Validation errors are reported before a draft starts. Pick errors
/// (`InvalidItem`, `DuplicateItem`, `DuplicateParticipantPick`) leave the
/// draft untouched so the operator can choose again. `NotActive` and
/// `AlreadyStarted` are sequencing mistakes by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("validation error for `{field}`: {message}")]
    Validation { field: String, message: String },

    #[error("'{item}' is not in the {category} catalog")]
    InvalidItem { category: String, item: String },

    #[error("'{item}' has already been taken in {category}")]
    DuplicateItem { category: String, item: String },

    #[error("{participant} already has a pick in {category}")]
    DuplicateParticipantPick {
        category: String,
        participant: String,
    },

    #[error("no draft is in progress")]
    NotActive,

    #[error("a draft has already been started; reset it first")]
    AlreadyStarted,

    #[error("no unclaimed items left in {category} for {participant}")]
    CatalogExhausted {
        category: String,
        participant: String,
    },
}

impl DraftError {
    pub(crate) fn validation(field: &str, message: impl Into<String>) -> Self {
        DraftError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Whether the operator can recover by making a different choice.
    pub fn is_rejected_pick(&self) -> bool {
        matches!(
            self,
            DraftError::InvalidItem { .. }
                | DraftError::DuplicateItem { .. }
                | DraftError::DuplicateParticipantPick { .. }
        )
    }
}
