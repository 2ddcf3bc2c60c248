use std::{collections::HashSet, time::Duration};

use client_core::{ResultView, UiState};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use shared::{
    domain::{FieldConstraint, FormField, SelectOption},
    error::ViolationKind,
    form::FormState,
};
use tokio::sync::watch;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::theme;

const INTRO_TEXT: &str = "Fill out the form below to get your personalized diabetes prediction. \
All information is kept confidential.";

pub struct AssessmentApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    state_rx: watch::Receiver<UiState>,
    ui_state: UiState,

    form: FormState,
    touched: HashSet<FormField>,
    submit_attempted: bool,
    // Set between queueing a submission and the backend publishing Loading.
    awaiting_backend: bool,

    status: String,
    status_banner: Option<UiError>,
}

impl AssessmentApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        state_rx: watch::Receiver<UiState>,
    ) -> Self {
        let ui_state = state_rx.borrow().clone();
        Self {
            cmd_tx,
            ui_rx,
            state_rx,
            ui_state,
            form: FormState::default(),
            touched: HashSet::new(),
            submit_attempted: false,
            awaiting_backend: false,
            status: "Starting...".to_string(),
            status_banner: None,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    tracing::warn!(context = ?err.context(), "backend reported error: {}", err.message());
                    self.status = err.banner_text();
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn sync_ui_state(&mut self) {
        if self.state_rx.has_changed().unwrap_or(false) {
            self.ui_state = self.state_rx.borrow_and_update().clone();
            self.awaiting_backend = false;
        }
    }

    fn submit_enabled(&self) -> bool {
        !self.ui_state.is_loading() && !self.awaiting_backend
    }

    fn visible_violation(&self, field: FormField) -> Option<ViolationKind> {
        if self.submit_attempted || self.touched.contains(&field) {
            self.form.check(field)
        } else {
            None
        }
    }

    fn try_submit(&mut self) {
        if !self.submit_enabled() {
            return;
        }

        if let Err(violations) = self.form.validate() {
            self.submit_attempted = true;
            self.status = format!("{} field(s) need attention", violations.len());
            return;
        }

        let cmd = BackendCommand::Submit {
            form: self.form.clone(),
        };
        match dispatch_backend_command(&self.cmd_tx, cmd) {
            Ok(()) => {
                self.awaiting_backend = true;
                self.status_banner = None;
                self.status = "Prediction requested".to_string();
            }
            Err(err) => {
                self.status = err.banner_text();
                self.status_banner = Some(err);
            }
        }
    }

    fn show_field(&mut self, ui: &mut egui::Ui, field: FormField) {
        ui.label(egui::RichText::new(field.label()).strong());
        let changed = match field.constraint() {
            FieldConstraint::OneOf(options) => {
                select_input(ui, field, options, self.form.field_mut(field))
            }
            FieldConstraint::Number(_) => number_input(ui, field, self.form.field_mut(field)),
        };
        if changed {
            self.touched.insert(field);
        }

        if let Some(kind) = self.visible_violation(field) {
            ui.label(
                egui::RichText::new(kind.to_string())
                    .small()
                    .color(theme::ERROR_TEXT),
            );
        }
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.weak(&self.status);
            });
        });
    }

    fn show_result(&self, ui: &mut egui::Ui) {
        if let Some(message) = self.ui_state.error_message() {
            ui.add_space(12.0);
            ui.label(egui::RichText::new(message).color(theme::ERROR_TEXT));
        }

        let Some(label) = self.ui_state.result_label() else {
            return;
        };
        let view = ResultView::for_label(label);
        let palette = theme::result_palette(view.variant);

        ui.add_space(20.0);
        egui::Frame::NONE
            .fill(palette.fill)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .corner_radius(16.0)
            .inner_margin(egui::Margin::symmetric(24, 16))
            .show(ui, |ui| {
                ui.set_max_width(420.0);
                ui.vertical_centered(|ui| {
                    ui.label(
                        egui::RichText::new(view.heading())
                            .strong()
                            .size(17.0)
                            .color(palette.text),
                    );
                    ui.label(
                        egui::RichText::new(view.label)
                            .strong()
                            .size(21.0)
                            .color(palette.text),
                    );
                    ui.label(
                        egui::RichText::new(view.advice())
                            .size(13.0)
                            .color(palette.text),
                    );
                });
            });
    }

    fn show_form_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(theme::PAGE_BACKGROUND)
                    .inner_margin(egui::Margin::same(24)),
            )
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(16.0);
                        ui.label(
                            egui::RichText::new("🩺 Diabetes Assessment")
                                .size(28.0)
                                .strong()
                                .color(theme::TITLE),
                        );
                        ui.add_space(8.0);
                        ui.set_max_width(640.0);
                        ui.label(egui::RichText::new(INTRO_TEXT).color(theme::MUTED_TEXT));
                        ui.add_space(16.0);

                        if let Some(banner) = &self.status_banner {
                            ui.label(
                                egui::RichText::new(banner.banner_text())
                                    .color(theme::ERROR_TEXT),
                            );
                            ui.add_space(8.0);
                        }

                        egui::Frame::NONE
                            .fill(theme::CARD_BACKGROUND)
                            .stroke(egui::Stroke::new(1.0, theme::CARD_BORDER))
                            .corner_radius(16.0)
                            .inner_margin(egui::Margin::symmetric(28, 24))
                            .show(ui, |ui| {
                                self.show_form_card(ui);
                            });

                        self.show_result(ui);
                        ui.add_space(16.0);
                    });
                });
            });
    }

    fn show_form_card(&mut self, ui: &mut egui::Ui) {
        let column_width = ((ui.available_width() - 20.0) / 2.0).max(180.0);
        egui::Grid::new("assessment_fields")
            .num_columns(2)
            .spacing([20.0, 14.0])
            .show(ui, |ui| {
                for (index, field) in FormField::ALL.into_iter().enumerate() {
                    ui.vertical(|ui| {
                        ui.set_width(column_width);
                        self.show_field(ui, field);
                    });
                    if index % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(18.0);
        let button = egui::Button::new(
            egui::RichText::new(self.ui_state.submit_label())
                .strong()
                .color(egui::Color32::WHITE),
        )
        .fill(theme::BUTTON_FILL)
        .min_size(egui::vec2(ui.available_width(), 42.0));
        if ui.add_enabled(self.submit_enabled(), button).clicked() {
            self.try_submit();
        }
    }
}

fn select_input(
    ui: &mut egui::Ui,
    field: FormField,
    options: &[SelectOption],
    value: &mut String,
) -> bool {
    let before = value.clone();
    let selected_text = options
        .iter()
        .find(|option| option.value == value.as_str())
        .map_or(field.placeholder(), |option| option.label);

    egui::ComboBox::from_id_salt(field.wire_name())
        .selected_text(selected_text)
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut *value, String::new(), field.placeholder());
            for option in options {
                ui.selectable_value(&mut *value, option.value.to_string(), option.label);
            }
        });

    *value != before
}

fn number_input(ui: &mut egui::Ui, field: FormField, value: &mut String) -> bool {
    let edit = egui::TextEdit::singleline(value)
        .id_salt(field.wire_name())
        .hint_text(field.placeholder())
        .desired_width(f32::INFINITY);
    ui.add_sized([ui.available_width(), 30.0], edit).changed()
}

impl eframe::App for AssessmentApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.sync_ui_state();

        if ctx.input(|input| input.key_pressed(egui::Key::Enter)) {
            self.try_submit();
        }

        self.show_status_bar(ctx);
        self.show_form_screen(ctx);

        if self.ui_state.is_loading() || self.awaiting_backend {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
