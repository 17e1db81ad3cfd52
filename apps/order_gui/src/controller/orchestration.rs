//! Command orchestration helpers from UI actions to backend command queue.

use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;

pub const QUEUE_FULL_MESSAGE: &str = "UI command queue is full; please retry";
pub const QUEUE_DISCONNECTED_MESSAGE: &str =
    "Backend command processor disconnected (possible startup/runtime failure); restart the app";

/// Returns `false` when the command could not be queued; `status` then says why.
pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
    status: &mut String,
) -> bool {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            true
        }
        Err(TrySendError::Full(_)) => {
            tracing::warn!(command = cmd_name, "ui->backend command queue full");
            *status = QUEUE_FULL_MESSAGE.to_string();
            false
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::error!(command = cmd_name, "backend command processor disconnected");
            *status = QUEUE_DISCONNECTED_MESSAGE.to_string();
            false
        }
    }
}
