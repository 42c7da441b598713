//! Rendering-independent result of an inventory workflow step.

use serde::Serialize;

/// What the caller should present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeStatus {
    /// Operation done; continue to `redirect`.
    Success,
    /// Nothing changed; ask the user whether to follow `redirect` or `cancel`.
    Confirm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkflowResult {
    pub status: OutcomeStatus,
    pub message: String,
    pub redirect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel: Option<String>,
}

impl WorkflowResult {
    pub fn success(message: impl Into<String>, redirect: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Success,
            message: message.into(),
            redirect: redirect.into(),
            cancel: None,
        }
    }

    pub fn confirm(
        message: impl Into<String>,
        redirect: impl Into<String>,
        cancel: impl Into<String>,
    ) -> Self {
        Self {
            status: OutcomeStatus::Confirm,
            message: message.into(),
            redirect: redirect.into(),
            cancel: Some(cancel.into()),
        }
    }
}
