//! State transitions for the order form driven by user actions and backend events.

use client_core::{FormError, OrderForm};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiErrorContext, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    Queued,
    AlreadyPending,
    Invalid(FormError),
    QueueFailed,
}

/// Starts a submission and hands the payload to the backend worker. A queue
/// failure settles the form as failed straight away.
pub fn request_submission(
    form: &mut OrderForm,
    cmd_tx: &Sender<BackendCommand>,
    status: &mut String,
) -> SubmitAttempt {
    let request = match form.begin_submission() {
        Ok(request) => request,
        Err(FormError::SubmissionInFlight) => return SubmitAttempt::AlreadyPending,
        Err(err) => {
            *status = err.to_string();
            return SubmitAttempt::Invalid(err);
        }
    };

    if dispatch_backend_command(cmd_tx, BackendCommand::SubmitOrder { request }, status) {
        *status = "Submitting order...".to_string();
        SubmitAttempt::Queued
    } else {
        form.fail_submission(status.clone());
        SubmitAttempt::QueueFailed
    }
}

pub fn apply_ui_event(form: &mut OrderForm, status: &mut String, event: UiEvent) {
    match event {
        UiEvent::Info(message) => {
            *status = message;
        }
        UiEvent::Error(err) => {
            *status = format!("{} error: {}", err.category().label(), err.detail());
            if err.context() == UiErrorContext::SubmitOrder {
                form.fail_submission(err.message());
            }
        }
        UiEvent::OrderConfirmed(confirmation) => {
            let order_id = confirmation.order_id.clone();
            if form.complete_submission(Ok(confirmation)) {
                *status = format!("Order {order_id} submitted");
            }
        }
        UiEvent::OrderFailed(err) => {
            if form.fail_submission(err.message()) {
                *status = format!("{} error: {}", err.category().label(), err.detail());
            }
        }
    }
}
