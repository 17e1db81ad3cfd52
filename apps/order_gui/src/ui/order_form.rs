//! The order form view: customer fields, editable item rows, submit control and result panel.

use client_core::{OrderForm, PanelTone, QuantityError};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::domain::{CustomerField, ItemField};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::reducer::{apply_ui_event, request_submission, SubmitAttempt};

const FORM_MAX_WIDTH: f32 = 600.0;
const FORM_TOP_MARGIN: f32 = 50.0;
const INPUT_HEIGHT: f32 = 30.0;
const REMOVE_BUTTON_WIDTH: f32 = 80.0;
const CATALOGUE_HINT: &str = "Known items: item_1, item_2, item_3, item_4";

const SUBMIT_FILL: egui::Color32 = egui::Color32::from_rgb(0x00, 0x7B, 0xFF);
const SUCCESS_FILL: egui::Color32 = egui::Color32::from_rgb(0xD4, 0xED, 0xDA);
const SUCCESS_TEXT: egui::Color32 = egui::Color32::from_rgb(0x15, 0x57, 0x24);
const FAILURE_FILL: egui::Color32 = egui::Color32::from_rgb(0xF8, 0xD7, 0xDA);
const FAILURE_TEXT: egui::Color32 = egui::Color32::from_rgb(0x72, 0x1C, 0x24);

enum RowAction {
    Edit {
        index: usize,
        field: ItemField,
        value: String,
    },
    Remove(usize),
}

struct RowSnapshot {
    id: String,
    quantity_text: String,
    quantity: Result<u32, QuantityError>,
}

pub struct OrderFormView {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    form: OrderForm,
    status: String,
    validation_error: Option<String>,
}

impl OrderFormView {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            form: OrderForm::new(),
            status: "Starting backend worker...".to_string(),
            validation_error: None,
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            apply_ui_event(&mut self.form, &mut self.status, event);
        }
    }

    fn submit(&mut self) {
        match request_submission(&mut self.form, &self.cmd_tx, &mut self.status) {
            SubmitAttempt::Invalid(err) => self.validation_error = Some(err.to_string()),
            SubmitAttempt::Queued | SubmitAttempt::QueueFailed => self.validation_error = None,
            SubmitAttempt::AlreadyPending => {}
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        ui.add_space(FORM_TOP_MARGIN);
        let width = ui.available_width().min(FORM_MAX_WIDTH);
        let side = ((ui.available_width() - width) / 2.0).max(0.0);

        ui.horizontal(|ui| {
            ui.add_space(side);
            ui.vertical(|ui| {
                ui.set_width(width);
                egui::Frame::new()
                    .fill(egui::Color32::WHITE)
                    .inner_margin(egui::Margin::same(20))
                    .shadow(egui::Shadow {
                        offset: [0, 0],
                        blur: 10,
                        spread: 0,
                        color: egui::Color32::from_black_alpha(26),
                    })
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading("Create Order");
                        });
                        ui.add_space(12.0);
                        self.show_customer_fields(ui);
                        ui.add_space(20.0);
                        self.show_item_rows(ui);
                        ui.add_space(20.0);
                        self.show_submit_button(ui);
                        self.show_validation_error(ui);
                        self.show_result_panel(ui);
                        ui.add_space(10.0);
                        ui.horizontal_wrapped(|ui| {
                            ui.small("Status:");
                            ui.small(egui::RichText::new(&self.status).weak());
                        });
                    });
            });
        });
    }

    fn show_customer_fields(&mut self, ui: &mut egui::Ui) {
        for (field, id, label) in [
            (CustomerField::Name, "customer_name", "Name:"),
            (CustomerField::Email, "customer_email", "Email:"),
        ] {
            ui.label(label);
            let mut buf = self.form.customer().field(field).to_string();
            let edit = egui::TextEdit::singleline(&mut buf)
                .id_salt(id)
                .desired_width(f32::INFINITY);
            if ui.add_sized([ui.available_width(), INPUT_HEIGHT], edit).changed() {
                self.form.set_customer_field(field, buf);
            }
        }
    }

    fn show_item_rows(&mut self, ui: &mut egui::Ui) {
        ui.label(egui::RichText::new("Items").strong());
        ui.weak(CATALOGUE_HINT);
        ui.add_space(6.0);

        let can_remove = self.form.can_remove_items();
        let rows: Vec<RowSnapshot> = self
            .form
            .items()
            .iter()
            .map(|row| RowSnapshot {
                id: row.id().to_string(),
                quantity_text: row.quantity_text().to_string(),
                quantity: row.quantity(),
            })
            .collect();

        let mut actions = Vec::new();
        for (index, row) in rows.into_iter().enumerate() {
            ui.horizontal(|ui| {
                let spacing = ui.spacing().item_spacing.x;
                let remove_width = if can_remove {
                    REMOVE_BUTTON_WIDTH + spacing
                } else {
                    0.0
                };
                let inputs_width = (ui.available_width() - remove_width - spacing).max(0.0);

                let mut id_buf = row.id;
                let id_edit = egui::TextEdit::singleline(&mut id_buf)
                    .id_salt(("item_id", index))
                    .hint_text("Item ID");
                if ui.add_sized([inputs_width * 2.0 / 3.0, INPUT_HEIGHT], id_edit).changed() {
                    actions.push(RowAction::Edit {
                        index,
                        field: ItemField::Id,
                        value: id_buf,
                    });
                }

                let mut quantity_buf = row.quantity_text;
                let quantity_edit = egui::TextEdit::singleline(&mut quantity_buf)
                    .id_salt(("item_quantity", index))
                    .hint_text("Quantity");
                if ui.add_sized([inputs_width / 3.0, INPUT_HEIGHT], quantity_edit).changed() {
                    actions.push(RowAction::Edit {
                        index,
                        field: ItemField::Quantity,
                        value: quantity_buf,
                    });
                }

                if can_remove
                    && ui
                        .add_sized([REMOVE_BUTTON_WIDTH, INPUT_HEIGHT], egui::Button::new("Remove"))
                        .clicked()
                {
                    actions.push(RowAction::Remove(index));
                }
            });
            if let Err(err) = row.quantity {
                ui.small(egui::RichText::new(err.to_string()).color(FAILURE_TEXT));
            }
            ui.add_space(4.0);
        }

        for action in actions {
            match action {
                RowAction::Edit {
                    index,
                    field,
                    value,
                } => {
                    self.form.set_item_field(index, field, value);
                }
                RowAction::Remove(index) => {
                    self.form.remove_item(index);
                }
            }
        }

        ui.add_space(6.0);
        if ui.button("Add Item").clicked() {
            self.form.add_item();
        }
    }

    fn show_submit_button(&mut self, ui: &mut egui::Ui) {
        let label = egui::RichText::new(self.form.submit_label())
            .color(egui::Color32::WHITE)
            .strong();
        let button = egui::Button::new(label)
            .fill(SUBMIT_FILL)
            .min_size(egui::vec2(ui.available_width(), 38.0));
        if ui.add_enabled(!self.form.is_pending(), button).clicked() {
            self.submit();
        }
    }

    fn show_validation_error(&mut self, ui: &mut egui::Ui) {
        let Some(message) = self.validation_error.clone() else {
            return;
        };
        ui.add_space(8.0);
        ui.horizontal_wrapped(|ui| {
            ui.label(egui::RichText::new(message).color(FAILURE_TEXT));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.small_button("Dismiss").clicked() {
                    self.validation_error = None;
                }
            });
        });
    }

    fn show_result_panel(&self, ui: &mut egui::Ui) {
        let Some(panel) = self.form.outcome_panel() else {
            return;
        };
        let (fill, text) = match panel.tone {
            PanelTone::Success => (SUCCESS_FILL, SUCCESS_TEXT),
            PanelTone::Failure => (FAILURE_FILL, FAILURE_TEXT),
        };

        ui.add_space(20.0);
        egui::Frame::new()
            .fill(fill)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                for line in &panel.lines {
                    ui.label(egui::RichText::new(line).color(text));
                }
            });
    }
}
