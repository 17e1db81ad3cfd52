use std::sync::Arc;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Result};
use clap::Parser;
use client_core::{config::load_settings, HttpOrderClient};
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{OrderFormView, ShellApp};

const COMMAND_QUEUE_CAPACITY: usize = 16;
const EVENT_QUEUE_CAPACITY: usize = 64;

#[derive(Parser, Debug)]
#[command(about = "Desktop order entry form")]
struct Args {
    /// Order-creation endpoint; overrides ORDER_ENDPOINT.
    #[arg(long)]
    endpoint: Option<String>,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = Args::parse();
    let settings = load_settings(args.endpoint.as_deref())?;
    tracing::info!(endpoint = %settings.order_endpoint, "starting order form");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(COMMAND_QUEUE_CAPACITY);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(EVENT_QUEUE_CAPACITY);
    backend_bridge::runtime::launch(
        cmd_rx,
        ui_tx,
        Arc::new(HttpOrderClient::new(settings.order_endpoint)),
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Create Order")
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([480.0, 520.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Order Entry",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::light());
            Ok(Box::new(ShellApp::new(OrderFormView::new(cmd_tx, ui_rx))))
        }),
    )
    .map_err(|err| anyhow!("order form window failed: {err}"))
}
