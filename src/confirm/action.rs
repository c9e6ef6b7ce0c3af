//! Submit actions and their outcomes

use std::future::Future;

use thiserror::Error;

use crate::i18n::Translator;
use crate::types::QueueEntry;

/// Status codes treated as success
pub const SUCCESS_STATUS: std::ops::Range<u16> = 200..300;

/// Resolved result of a submit action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// HTTP-style status code
    pub status: u16,
    /// Detail supplied by the action, e.g. the reason phrase of a failed
    /// response. Used for logging only; the flow never shows it.
    pub message: Option<String>,
}

impl ActionOutcome {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn with_message(mut self, message: Option<String>) -> Self {
        self.message = message;
        self
    }

    pub fn is_success(&self) -> bool {
        SUCCESS_STATUS.contains(&self.status)
    }

    /// Turn a resolved outcome into a result: out-of-range statuses become
    /// [`SubmitError::UnexpectedStatus`].
    pub fn into_result(self) -> Result<Self, SubmitError> {
        if self.is_success() {
            Ok(self)
        } else {
            tracing::debug!(status = self.status, message = ?self.message, "unexpected status");
            Err(SubmitError::UnexpectedStatus(self.status))
        }
    }
}

/// Why a submission did not succeed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// The action resolved, but with a status outside the success range
    #[error("unexpected server response (status {0})")]
    UnexpectedStatus(u16),

    /// The action itself failed
    #[error("{}", .message.as_deref().unwrap_or("submission rejected"))]
    Rejected { message: Option<String> },
}

impl SubmitError {
    pub fn rejected(message: impl Into<String>) -> Self {
        SubmitError::Rejected {
            message: Some(message.into()),
        }
    }

    /// Rejection that carries no message
    pub fn rejected_silently() -> Self {
        SubmitError::Rejected { message: None }
    }

    /// Text shown as the error snackbar's subtitle
    pub fn user_message(&self, translator: &dyn Translator) -> Option<String> {
        match self {
            SubmitError::UnexpectedStatus(_) => Some(
                translator.t("unexpectedServerResponse", "Unexpected Server Response"),
            ),
            SubmitError::Rejected { message } => message.clone(),
        }
    }
}

impl From<reqwest::Error> for SubmitError {
    fn from(error: reqwest::Error) -> Self {
        SubmitError::rejected(error.to_string())
    }
}

/// An asynchronous state change against a queue entry
pub trait SubmitAction: Send + Sync {
    fn submit(
        &self,
        entry: &QueueEntry,
    ) -> impl Future<Output = Result<ActionOutcome, SubmitError>> + Send;
}

/// Adapts a closure into a [`SubmitAction`]. The closure receives its own
/// copy of the entry so the returned future can be `'static`.
#[derive(Debug, Clone)]
pub struct FnAction<F>(pub F);

impl<F, Fut> SubmitAction for FnAction<F>
where
    F: Fn(QueueEntry) -> Fut + Send + Sync,
    Fut: Future<Output = Result<ActionOutcome, SubmitError>> + Send,
{
    fn submit(
        &self,
        entry: &QueueEntry,
    ) -> impl Future<Output = Result<ActionOutcome, SubmitError>> + Send {
        (self.0)(entry.clone())
    }
}
