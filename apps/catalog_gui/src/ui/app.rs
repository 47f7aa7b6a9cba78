use std::time::{Duration, Instant};

use client_core::{CatalogScreen, Phase, ScreenEvent, ServiceRequest};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::{events::UiEvent, orchestration::dispatch_service_request};
use crate::ui::table::{show_table, RowAction, TableSort};
use crate::ui::toasts::ToastStack;

const BANNER_BLUE: egui::Color32 = egui::Color32::from_rgb(0, 123, 255);
const LOADING_STATUS: &str = "Cargando departamentos...";

pub struct CatalogApp {
    screen: CatalogScreen<ToastStack>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    search_text: String,
    sort: TableSort,
    status: String,
}

impl CatalogApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        toast_auto_close: Duration,
    ) -> Self {
        let (screen, initial) = CatalogScreen::mount(ToastStack::new(toast_auto_close));
        let mut app = Self {
            screen,
            cmd_tx,
            ui_rx,
            search_text: String::new(),
            sort: TableSort::default(),
            status: LOADING_STATUS.to_string(),
        };
        app.dispatch(initial);
        app
    }

    /// Sends requests to the backend. Requests the queue refuses are answered
    /// locally, and their follow-ups go through the same path.
    fn dispatch(&mut self, requests: Vec<ServiceRequest>) {
        let mut pending = requests;
        while let Some(request) = pending.pop() {
            if let Some(failed) = dispatch_service_request(&self.cmd_tx, request, &mut self.status)
            {
                pending.extend(self.screen.apply(failed));
            }
        }
    }

    fn handle_event(&mut self, event: ScreenEvent) {
        match self.screen.handle(event) {
            Ok(requests) => self.dispatch(requests),
            Err(err) => self.status = err.to_string(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady => {
                    tracing::debug!("backend bridge ready");
                }
                UiEvent::BackendFailed(message) => {
                    tracing::error!("{message}");
                    self.status = message;
                }
                UiEvent::Service(response) => {
                    let follow_up = self.screen.apply(response);
                    self.dispatch(follow_up);
                    if self.screen.phase() != Phase::Loading && self.status == LOADING_STATUS {
                        self.status.clear();
                    }
                }
            }
        }
    }

    fn show_banner(ui: &mut egui::Ui) {
        egui::Frame::NONE
            .fill(BANNER_BLUE)
            .corner_radius(6.0)
            .inner_margin(egui::Margin::symmetric(12, 10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    egui::RichText::new("Catálogo Departamento")
                        .size(22.0)
                        .color(egui::Color32::WHITE)
                        .strong(),
                );
            });
    }

    /// Draws the record form window; returns the event the user triggered.
    fn show_modal(&mut self, ctx: &egui::Context) -> Option<ScreenEvent> {
        let submitting = self.screen.is_submitting();
        let form = self.screen.form_mut()?;
        let mut open = true;
        let mut event = None;

        egui::Window::new(form.title())
            .collapsible(false)
            .resizable(false)
            .open(&mut open)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.label("Nombre");
                ui.add(
                    egui::TextEdit::singleline(&mut form.nombre)
                        .id_salt("departamento_nombre")
                        .hint_text("Nombre")
                        .desired_width(f32::INFINITY),
                );
                ui.label("Descripcion");
                ui.add(
                    egui::TextEdit::singleline(&mut form.descripcion)
                        .id_salt("departamento_descripcion")
                        .hint_text("Descripcion")
                        .desired_width(f32::INFINITY),
                );
                if let Some(err) = form.last_error() {
                    ui.colored_label(egui::Color32::from_rgb(198, 40, 40), err.to_string());
                }
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(form.can_submit() && !submitting, egui::Button::new("Guardar"))
                        .clicked()
                    {
                        event = Some(ScreenEvent::SubmitForm);
                    }
                    if ui.button("Cancelar").clicked() {
                        event = Some(ScreenEvent::CloseModal);
                    }
                    if submitting {
                        ui.spinner();
                    }
                });
            });

        if !open {
            event = Some(ScreenEvent::CloseModal);
        }
        event
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.screen.notifier_mut().expire(Instant::now());

        let mut events = Vec::new();
        let phase = self.screen.phase();
        let list_actions_enabled = matches!(phase, Phase::Idle | Phase::Loading);

        egui::CentralPanel::default().show(ctx, |ui| {
            Self::show_banner(ui);
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(
                        list_actions_enabled,
                        egui::Button::new("Agregar nuevo registro"),
                    )
                    .clicked()
                {
                    events.push(ScreenEvent::OpenCreate);
                }
                if ui.button("⟳").on_hover_text("Recargar").clicked() {
                    events.push(ScreenEvent::Refresh);
                }
                if phase == Phase::Loading {
                    ui.spinner();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let search = ui.add(
                        egui::TextEdit::singleline(&mut self.search_text)
                            .id_salt("departamento_search")
                            .hint_text("Buscar...")
                            .desired_width(240.0),
                    );
                    if search.changed() {
                        events.push(ScreenEvent::Search(self.search_text.clone()));
                    }
                });
            });
            ui.add_space(8.0);

            if let Some(action) = show_table(
                ui,
                self.screen.visible_records(),
                &mut self.sort,
                list_actions_enabled,
            ) {
                events.push(match action {
                    RowAction::Edit(record) => ScreenEvent::OpenEdit(record),
                    RowAction::Delete(record) => ScreenEvent::RequestDelete(record),
                });
            }

            if !self.status.is_empty() {
                ui.add_space(6.0);
                ui.label(egui::RichText::new(&self.status).weak());
            }
        });

        if let Some(event) = self.show_modal(ctx) {
            events.push(event);
        }
        let deleting = self.screen.is_deleting();
        if let Some(event) = self.screen.notifier_mut().show(ctx, deleting) {
            events.push(event);
        }

        for event in events {
            self.handle_event(event);
        }

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

impl Drop for CatalogApp {
    fn drop(&mut self) {
        if self.screen.is_mounted() {
            self.screen.unmount();
        }
        let _ = self.cmd_tx.try_send(BackendCommand::Shutdown);
    }
}
