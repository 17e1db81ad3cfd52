use serde::{Deserialize, Serialize};

/// Shown when a failed submission carries no usable reason.
pub const FALLBACK_FAILURE_REASON: &str = "Something went wrong";

/// Body returned by the order service when it refuses an order. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRejection {
    #[serde(default)]
    pub reason: Option<String>,
}

impl OrderRejection {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    pub fn display_reason(&self) -> String {
        failure_reason(self.reason.as_deref())
    }
}

/// Uses `reason` verbatim unless it is missing or empty.
pub fn failure_reason(reason: Option<&str>) -> String {
    match reason {
        Some(reason) if !reason.is_empty() => reason.to_string(),
        _ => FALLBACK_FAILURE_REASON.to_string(),
    }
}
