//! Order form controller state: customer fields, editable item rows and the
//! submission outcome. Independent of any UI toolkit; front ends render from
//! the accessors here and route every edit through the mutating methods.

use shared::{
    domain::{Customer, CustomerField, ItemField, ItemLine, DEFAULT_ITEM_QUANTITY},
    protocol::{CreateOrderRequest, OrderConfirmation},
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::error::SubmitError;

pub const SUBMIT_LABEL: &str = "Submit Order";
pub const SUBMITTING_LABEL: &str = "Submitting...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("quantity is required")]
    Empty,
    #[error("quantity must be a whole number")]
    NotANumber,
    #[error("quantity must be at least 1")]
    BelowMinimum,
    #[error("quantity is too large")]
    TooLarge,
}

pub fn parse_quantity(text: &str) -> Result<u32, QuantityError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(QuantityError::Empty);
    }
    match trimmed.parse::<i64>() {
        Ok(value) if value < 1 => Err(QuantityError::BelowMinimum),
        Ok(value) => u32::try_from(value).map_err(|_| QuantityError::TooLarge),
        Err(_) => Err(QuantityError::NotANumber),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("an order submission is already in progress")]
    SubmissionInFlight,
    #[error("customer name is required")]
    MissingName,
    #[error("customer email is required")]
    MissingEmail,
    #[error("customer email '{0}' is not a valid address")]
    InvalidEmail(String),
    #[error("item {} needs an item id", .index + 1)]
    MissingItemId { index: usize },
    #[error("item {}: {source}", .index + 1)]
    InvalidQuantity {
        index: usize,
        source: QuantityError,
    },
}

/// An item line as it is being edited. The raw quantity text is kept so that
/// partial input survives re-rendering; the parse result decides validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemRow {
    id: String,
    quantity_text: String,
    quantity: Result<u32, QuantityError>,
}

impl ItemRow {
    fn new() -> Self {
        Self {
            id: String::new(),
            quantity_text: DEFAULT_ITEM_QUANTITY.to_string(),
            quantity: Ok(DEFAULT_ITEM_QUANTITY),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn quantity_text(&self) -> &str {
        &self.quantity_text
    }

    pub fn quantity(&self) -> Result<u32, QuantityError> {
        self.quantity
    }

    fn to_line(&self, index: usize) -> Result<ItemLine, FormError> {
        if self.id.trim().is_empty() {
            return Err(FormError::MissingItemId { index });
        }
        let quantity = self
            .quantity
            .map_err(|source| FormError::InvalidQuantity { index, source })?;
        Ok(ItemLine {
            id: self.id.clone(),
            quantity,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum SubmissionOutcome {
    #[default]
    Idle,
    Pending,
    Succeeded(OrderConfirmation),
    Failed {
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelTone {
    Success,
    Failure,
}

/// What the result panel shows for a settled submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutcomePanel {
    pub tone: PanelTone,
    pub lines: Vec<String>,
}

impl OutcomePanel {
    pub fn for_outcome(outcome: &SubmissionOutcome) -> Option<Self> {
        match outcome {
            SubmissionOutcome::Idle | SubmissionOutcome::Pending => None,
            SubmissionOutcome::Succeeded(confirmation) => {
                let mut lines = vec![
                    format!("Order ID: {}", confirmation.order_id),
                    format!("Status: {}", confirmation.status),
                ];
                if let Some(total) = confirmation.total {
                    lines.push(format!("Total: {total}"));
                }
                if let Some(reason) = confirmation.reason.as_deref().filter(|r| !r.is_empty()) {
                    lines.push(format!("Reason: {reason}"));
                }
                Some(Self {
                    tone: PanelTone::Success,
                    lines,
                })
            }
            SubmissionOutcome::Failed { reason } => Some(Self {
                tone: PanelTone::Failure,
                lines: vec![reason.clone()],
            }),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OrderForm {
    customer: Customer,
    items: Vec<ItemRow>,
    outcome: SubmissionOutcome,
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderForm {
    pub fn new() -> Self {
        Self {
            customer: Customer::default(),
            items: vec![ItemRow::new()],
            outcome: SubmissionOutcome::Idle,
        }
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn items(&self) -> &[ItemRow] {
        &self.items
    }

    pub fn outcome(&self) -> &SubmissionOutcome {
        &self.outcome
    }

    pub fn is_pending(&self) -> bool {
        self.outcome == SubmissionOutcome::Pending
    }

    pub fn can_remove_items(&self) -> bool {
        self.items.len() > 1
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_pending() {
            SUBMITTING_LABEL
        } else {
            SUBMIT_LABEL
        }
    }

    pub fn outcome_panel(&self) -> Option<OutcomePanel> {
        OutcomePanel::for_outcome(&self.outcome)
    }

    pub fn set_customer_field(&mut self, field: CustomerField, value: impl Into<String>) {
        let value = value.into();
        match field {
            CustomerField::Name => self.customer.name = value,
            CustomerField::Email => self.customer.email = value,
        }
    }

    /// Returns `false` and changes nothing when `index` is out of range.
    pub fn set_item_field(
        &mut self,
        index: usize,
        field: ItemField,
        value: impl Into<String>,
    ) -> bool {
        let Some(row) = self.items.get_mut(index) else {
            debug!(index, len = self.items.len(), "ignoring edit for missing item row");
            return false;
        };
        let value = value.into();
        match field {
            ItemField::Id => row.id = value,
            ItemField::Quantity => {
                row.quantity = parse_quantity(&value);
                row.quantity_text = value;
            }
        }
        true
    }

    pub fn add_item(&mut self) {
        self.items.push(ItemRow::new());
        debug!(len = self.items.len(), "added item row");
    }

    /// Refuses to remove the last remaining row.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if !self.can_remove_items() || index >= self.items.len() {
            debug!(index, len = self.items.len(), "refusing item row removal");
            return false;
        }
        self.items.remove(index);
        true
    }

    /// Checks the input constraints and snapshots the order without touching the outcome.
    pub fn validate(&self) -> Result<CreateOrderRequest, FormError> {
        let name = self.customer.field(CustomerField::Name);
        if name.trim().is_empty() {
            return Err(FormError::MissingName);
        }
        let email = self.customer.field(CustomerField::Email);
        if email.trim().is_empty() {
            return Err(FormError::MissingEmail);
        }
        if !looks_like_email(email) {
            return Err(FormError::InvalidEmail(email.to_string()));
        }
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(index, row)| row.to_line(index))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CreateOrderRequest {
            customer: self.customer.clone(),
            items,
        })
    }

    /// Moves the form to `Pending` and returns the payload to send.
    pub fn begin_submission(&mut self) -> Result<CreateOrderRequest, FormError> {
        if self.is_pending() {
            return Err(FormError::SubmissionInFlight);
        }
        let request = self.validate()?;
        self.outcome = SubmissionOutcome::Pending;
        info!(items = request.items.len(), "order submission started");
        Ok(request)
    }

    /// Applies the result of the in-flight submission. Returns `false` when
    /// nothing was pending.
    pub fn complete_submission(
        &mut self,
        result: Result<OrderConfirmation, SubmitError>,
    ) -> bool {
        match result {
            Ok(confirmation) => {
                info!(
                    order_id = %confirmation.order_id,
                    status = %confirmation.status,
                    "order accepted"
                );
                self.settle(SubmissionOutcome::Succeeded(confirmation))
            }
            Err(err) => {
                warn!(error = %err, "order submission failed");
                self.fail_submission(err.display_reason())
            }
        }
    }

    pub fn fail_submission(&mut self, reason: impl Into<String>) -> bool {
        self.settle(SubmissionOutcome::Failed {
            reason: reason.into(),
        })
    }

    fn settle(&mut self, outcome: SubmissionOutcome) -> bool {
        if !self.is_pending() {
            warn!(?outcome, "dropping submission result with no submission pending");
            return false;
        }
        self.outcome = outcome;
        true
    }
}

fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
