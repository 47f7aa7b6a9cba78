//! Top-center toast stack. Success and error toasts close themselves; delete
//! prompts stay until the screen dismisses them.

use std::time::{Duration, Instant};

use client_core::{NotificationChannel, PromptActions, PromptHandle, ScreenEvent};
use eframe::egui;
use shared::protocol::messages;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Prompt {
        handle: PromptHandle,
        actions: PromptActions,
    },
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub kind: ToastKind,
    pub message: String,
    shown_at: Instant,
}

impl Toast {
    fn auto_closes(&self) -> bool {
        !matches!(self.kind, ToastKind::Prompt { .. })
    }
}

#[derive(Debug)]
pub struct ToastStack {
    next_id: u64,
    auto_close: Duration,
    toasts: Vec<Toast>,
}

impl ToastStack {
    pub fn new(auto_close: Duration) -> Self {
        Self {
            next_id: 0,
            auto_close,
            toasts: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn close(&mut self, id: u64) {
        self.toasts.retain(|toast| toast.id != id);
    }

    /// Drops success and error toasts shown longer than the auto-close delay.
    pub fn expire(&mut self, now: Instant) {
        let auto_close = self.auto_close;
        self.toasts.retain(|toast| {
            !toast.auto_closes() || now.saturating_duration_since(toast.shown_at) < auto_close
        });
    }

    /// Draws the stack and returns the event picked from a prompt, if any.
    /// Prompt buttons are disabled while `busy`.
    pub fn show(&mut self, ctx: &egui::Context, busy: bool) -> Option<ScreenEvent> {
        if self.toasts.is_empty() {
            return None;
        }

        let mut picked = None;
        let mut closed = None;
        egui::Area::new(egui::Id::new("catalog_toasts"))
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 12.0))
            .order(egui::Order::Foreground)
            .show(ctx, |ui| {
                ui.set_max_width(360.0);
                for toast in &self.toasts {
                    let (fill, accent) = match toast.kind {
                        ToastKind::Success => (
                            egui::Color32::from_rgb(232, 245, 233),
                            egui::Color32::from_rgb(46, 125, 50),
                        ),
                        ToastKind::Error => (
                            egui::Color32::from_rgb(253, 236, 234),
                            egui::Color32::from_rgb(198, 40, 40),
                        ),
                        ToastKind::Prompt { .. } => (
                            egui::Color32::from_rgb(255, 248, 225),
                            egui::Color32::from_rgb(237, 108, 2),
                        ),
                    };
                    egui::Frame::NONE
                        .fill(fill)
                        .stroke(egui::Stroke::new(1.0, accent))
                        .corner_radius(8.0)
                        .inner_margin(egui::Margin::symmetric(10, 8))
                        .show(ui, |ui| {
                            ui.horizontal(|ui| {
                                ui.label(
                                    egui::RichText::new(&toast.message)
                                        .color(accent)
                                        .strong(),
                                );
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| match &toast.kind {
                                        ToastKind::Prompt { actions, .. } => {
                                            if ui
                                                .add_enabled(
                                                    !busy,
                                                    egui::Button::new(messages::CONFIRM_NO),
                                                )
                                                .clicked()
                                            {
                                                picked = Some(actions.cancel.clone());
                                            }
                                            if ui
                                                .add_enabled(
                                                    !busy,
                                                    egui::Button::new(messages::CONFIRM_YES),
                                                )
                                                .clicked()
                                            {
                                                picked = Some(actions.confirm.clone());
                                            }
                                        }
                                        _ => {
                                            if ui.small_button("✕").clicked() {
                                                closed = Some(toast.id);
                                            }
                                        }
                                    },
                                );
                            });
                        });
                    ui.add_space(6.0);
                }
            });

        if let Some(id) = closed {
            self.close(id);
        }
        picked
    }

    fn push(&mut self, kind: ToastKind, message: &str) -> u64 {
        self.next_id += 1;
        self.toasts.push(Toast {
            id: self.next_id,
            kind,
            message: message.to_string(),
            shown_at: Instant::now(),
        });
        self.next_id
    }
}

impl NotificationChannel for ToastStack {
    fn notify_success(&mut self, message: &str) {
        self.push(ToastKind::Success, message);
    }

    fn notify_error(&mut self, message: &str) {
        self.push(ToastKind::Error, message);
    }

    fn prompt_confirmation(&mut self, message: &str, actions: PromptActions) -> PromptHandle {
        let handle = PromptHandle(self.next_id + 1);
        self.push(ToastKind::Prompt { handle, actions }, message);
        handle
    }

    fn dismiss(&mut self, handle: PromptHandle) {
        self.toasts.retain(|toast| {
            !matches!(&toast.kind, ToastKind::Prompt { handle: h, .. } if *h == handle)
        });
    }
}
