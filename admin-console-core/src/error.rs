//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

pub use admin_console_client::ClientError;

use crate::form::ValidationErrors;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Backend call failed (converted from the client library)
    #[error("{0}")]
    Client(#[from] ClientError),

    /// Draft failed local validation; nothing was sent
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A mutating call is already in flight
    #[error("A submission is already in progress")]
    SubmitInProgress,

    /// Another modal is already open
    #[error("Another dialog is already open")]
    ModalAlreadyOpen,

    /// The action does not apply to the current workflow state
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// No record with this key in the loaded set
    #[error("Record not found: {0}")]
    RecordNotFound(String),

    /// Field is unknown or not sortable
    #[error("Field is not sortable: {0}")]
    NotSortable(String),

    /// Record has no usable primary key
    #[error("Record has no key field: {0}")]
    MissingKey(String),
}

impl CoreError {
    /// Whether this is expected behavior (user input, stale key and so on).
    ///
    /// Log at `warn` when `true` and at `error` when `false`.
    /// **Update this method when adding variants.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::Validation(_)
            | Self::SubmitInProgress
            | Self::ModalAlreadyOpen
            | Self::InvalidState(_)
            | Self::RecordNotFound(_)
            | Self::NotSortable(_) => true,
            Self::Client(e) => e.is_expected(),
            Self::MissingKey(_) => false,
        }
    }

    /// Text for the page's error banner.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Client(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
