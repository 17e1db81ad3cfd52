//! UI/backend events and error modeling for the order form controller.

use client_core::SubmitError;
use shared::protocol::OrderConfirmation;

#[derive(Debug)]
pub enum UiEvent {
    Info(String),
    Error(UiError),
    OrderConfirmed(OrderConfirmation),
    OrderFailed(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Transport,
    Rejected,
    Validation,
    Unknown,
}

impl UiErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::Transport => "Network",
            Self::Rejected => "Order service",
            Self::Validation => "Validation",
            Self::Unknown => "Unexpected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    SubmitOrder,
}

/// `message` is what the user sees; `detail` carries the underlying error for the status line.
#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
    detail: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("connection")
            || lower.contains("timed out")
            || lower.contains("dns")
            || lower.contains("unreachable")
            || lower.contains("disconnected")
        {
            UiErrorCategory::Transport
        } else if lower.contains("invalid")
            || lower.contains("missing")
            || lower.contains("required")
        {
            UiErrorCategory::Validation
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            detail: message.clone(),
            message,
        }
    }

    pub fn from_submit_error(err: &SubmitError) -> Self {
        let category = match err {
            SubmitError::Transport(_) => UiErrorCategory::Transport,
            SubmitError::Rejected { .. } => UiErrorCategory::Rejected,
            SubmitError::MalformedResponse(_) => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context: UiErrorContext::SubmitOrder,
            message: err.display_reason(),
            detail: err.to_string(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}
