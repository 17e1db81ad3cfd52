use shared::error::{failure_reason, OrderRejection};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("failed to reach order service: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("order service rejected the order (HTTP {status}): {}", reason.as_deref().unwrap_or("no reason given"))]
    Rejected { status: u16, reason: Option<String> },
    #[error("invalid order service response: {0}")]
    MalformedResponse(String),
}

impl SubmitError {
    pub fn rejected(status: u16, rejection: OrderRejection) -> Self {
        Self::Rejected {
            status,
            reason: rejection.reason,
        }
    }

    /// Text shown to the user. Only a service-provided reason is surfaced verbatim.
    pub fn display_reason(&self) -> String {
        match self {
            Self::Rejected { reason, .. } => failure_reason(reason.as_deref()),
            Self::Transport(_) | Self::MalformedResponse(_) => failure_reason(None),
        }
    }
}
