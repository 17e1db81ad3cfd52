//! Root window frame. Owns no form state; it mounts a single order form view.

use std::time::Duration;

use eframe::egui;

use crate::ui::order_form::OrderFormView;

const SHELL_PADDING: i8 = 20;
const EVENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

pub struct ShellApp {
    form: OrderFormView,
}

impl ShellApp {
    pub fn new(form: OrderFormView) -> Self {
        Self { form }
    }
}

impl eframe::App for ShellApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.form.process_ui_events();

        egui::CentralPanel::default()
            .frame(
                egui::Frame::new()
                    .fill(egui::Color32::WHITE)
                    .inner_margin(egui::Margin::same(SHELL_PADDING)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| self.form.show(ui));
            });

        // Worker results arrive on a channel, not through egui input.
        ctx.request_repaint_after(EVENT_POLL_INTERVAL);
    }
}
