//! Engine error type.
//!
//! Every fallible operation in the crate returns [`Result`]. Conditions the
//! engine must never paper over (missing states, unknown actions, catalog
//! mismatches, malformed seeds) each get their own variant so callers can
//! decide what is fatal.

use thiserror::Error;

use crate::rules::ActionKind;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("State not found: {key}")]
    NotFound { key: String },

    #[error("Action {action_id} not found at {key}")]
    ActionNotFound { key: String, action_id: String },

    #[error("No execution rule for action kind {0}")]
    UnimplementedAction(ActionKind),

    #[error("Malformed {kind} action: {detail}")]
    MalformedAction { kind: ActionKind, detail: String },

    #[error("Card {key} is already in the graph")]
    DuplicateCard { key: String },

    #[error("Card {key} is not in the graph")]
    MissingCard { key: String },

    #[error("Card not found in catalog: {name}")]
    UnknownCard { name: String },

    #[error("Invalid seed format: {seed}")]
    InvalidSeed { seed: String },

    #[error("Hand index {index} out of range (deck has {unique} unique cards)")]
    HandIndexOutOfRange { index: usize, unique: usize },

    #[error("Not enough copies of '{name}' for hand")]
    NotEnoughCopies { name: String },

    #[error("Invalid decklist line {line}: {detail}")]
    InvalidDecklist { line: usize, detail: String },

    #[error("Parse error: {detail}")]
    Parse { detail: String },

    #[error("Configuration error: {detail}")]
    InvalidConfig { detail: String },

    #[error("Catalog error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    pub(crate) fn parse(detail: impl Into<String>) -> Self {
        EngineError::Parse {
            detail: detail.into(),
        }
    }

    pub(crate) fn not_found(key: impl std::fmt::Display) -> Self {
        EngineError::NotFound {
            key: key.to_string(),
        }
    }

    /// True for the "nothing stored at this key" condition.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, EngineError::NotFound { .. })
    }
}
