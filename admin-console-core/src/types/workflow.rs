//! 增删改流程状态

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

/// What the add/edit modal is editing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum FormMode {
    Add,
    Edit { key: String },
}

/// The mutating call in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum Submission {
    Create,
    Update { key: String },
    Delete { key: String },
}

impl Submission {
    /// State to return to when the call fails.
    ///
    /// Form submissions reopen their modal with the draft intact; a failed
    /// delete returns to `Idle`.
    #[must_use]
    pub fn on_failure(&self) -> Workflow {
        match self {
            Self::Create => Workflow::ModalOpen(FormMode::Add),
            Self::Update { key } => Workflow::ModalOpen(FormMode::Edit { key: key.clone() }),
            Self::Delete { .. } => Workflow::Idle,
        }
    }

    /// Past-tense verb for the success notice.
    #[must_use]
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Create => "created",
            Self::Update { .. } => "updated",
            Self::Delete { .. } => "deleted",
        }
    }
}

/// Workflow state of one list page.
///
/// ```text
/// Idle → ModalOpen → Submitting → Idle            (success)
///                               → ModalOpen       (failure)
/// Idle → ConfirmingDelete → Submitting → Idle
/// ```
///
/// At most one modal is open; `Submitting` refuses further submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum Workflow {
    #[default]
    Idle,
    ModalOpen(FormMode),
    ConfirmingDelete {
        key: String,
    },
    Submitting(Submission),
}

impl Workflow {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting(_))
    }

    /// Whether a modal (form or delete confirmation) is showing.
    pub fn has_modal(&self) -> bool {
        matches!(self, Self::ModalOpen(_) | Self::ConfirmingDelete { .. })
    }
}

/// Transient success message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
    pub raised_at: Instant,
}

impl Notice {
    #[must_use]
    pub fn new(message: impl Into<String>, raised_at: Instant) -> Self {
        Self {
            message: message.into(),
            raised_at,
        }
    }

    /// Whether `ttl` has elapsed at `now`.
    pub fn is_expired(&self, now: Instant, ttl: Duration) -> bool {
        now.saturating_duration_since(self.raised_at) >= ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_targets() {
        assert_eq!(
            Submission::Create.on_failure(),
            Workflow::ModalOpen(FormMode::Add)
        );
        assert_eq!(
            Submission::Update { key: "3".into() }.on_failure(),
            Workflow::ModalOpen(FormMode::Edit { key: "3".into() })
        );
        assert_eq!(
            Submission::Delete { key: "3".into() }.on_failure(),
            Workflow::Idle
        );
    }

    #[test]
    fn notice_expiry() {
        let start = Instant::now();
        let notice = Notice::new("Role created successfully", start);
        let ttl = Duration::from_secs(3);
        assert!(!notice.is_expired(start, ttl));
        assert!(!notice.is_expired(start + Duration::from_millis(2999), ttl));
        assert!(notice.is_expired(start + ttl, ttl));
    }
}
