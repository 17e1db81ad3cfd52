//! Backend worker: owns the tokio runtime and runs queued commands one at a time.

use std::{sync::Arc, thread};

use client_core::OrderService;
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    service: Arc<dyn OrderService>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                deliver(
                    &ui_tx,
                    UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: failed to build runtime: {err}"),
                    )),
                );
                return;
            }
        };

        runtime.block_on(async move {
            deliver(&ui_tx, UiEvent::Info("Ready".to_string()));
            while let Ok(cmd) = cmd_rx.recv() {
                tracing::debug!(command = cmd.name(), "backend worker picked up command");
                match cmd {
                    BackendCommand::SubmitOrder { request } => {
                        let event = match service.create_order(&request).await {
                            Ok(confirmation) => UiEvent::OrderConfirmed(confirmation),
                            Err(err) => UiEvent::OrderFailed(UiError::from_submit_error(&err)),
                        };
                        deliver(&ui_tx, event);
                    }
                }
            }
            tracing::debug!("command queue closed; backend worker exiting");
        });
    })
}

// Blocks rather than dropping: a lost order result would leave the form pending.
fn deliver(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    if ui_tx.send(event).is_err() {
        tracing::warn!("ui event queue disconnected; dropping backend event");
    }
}
