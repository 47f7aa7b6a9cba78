//! Transient user notifications and the non-blocking delete confirmation prompt.

use crate::screen::ScreenEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PromptHandle(pub u64);

/// Continuations attached to a confirmation prompt. The host routes whichever the
/// user picks back into `CatalogScreen::handle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptActions {
    pub confirm: ScreenEvent,
    pub cancel: ScreenEvent,
}

pub trait NotificationChannel {
    fn notify_success(&mut self, message: &str);
    fn notify_error(&mut self, message: &str);
    fn prompt_confirmation(&mut self, message: &str, actions: PromptActions) -> PromptHandle;
    fn dismiss(&mut self, handle: PromptHandle);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Success(String),
    Error(String),
    Prompt {
        handle: PromptHandle,
        message: String,
        actions: PromptActions,
    },
    Dismissed(PromptHandle),
}

/// In-memory channel that keeps every notification in order.
#[derive(Debug, Default)]
pub struct RecordingNotifications {
    next_handle: u64,
    history: Vec<Notification>,
}

impl RecordingNotifications {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Notification] {
        &self.history
    }

    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.history)
    }

    pub fn successes(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|n| match n {
                Notification::Success(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<&str> {
        self.history
            .iter()
            .filter_map(|n| match n {
                Notification::Error(message) => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Prompts shown and not yet dismissed.
    pub fn open_prompts(&self) -> Vec<(PromptHandle, &PromptActions)> {
        self.history
            .iter()
            .filter_map(|n| match n {
                Notification::Prompt {
                    handle, actions, ..
                } if !self.is_dismissed(*handle) => Some((*handle, actions)),
                _ => None,
            })
            .collect()
    }

    fn is_dismissed(&self, handle: PromptHandle) -> bool {
        self.history
            .iter()
            .any(|n| matches!(n, Notification::Dismissed(h) if *h == handle))
    }
}

impl NotificationChannel for RecordingNotifications {
    fn notify_success(&mut self, message: &str) {
        self.history.push(Notification::Success(message.to_string()));
    }

    fn notify_error(&mut self, message: &str) {
        self.history.push(Notification::Error(message.to_string()));
    }

    fn prompt_confirmation(&mut self, message: &str, actions: PromptActions) -> PromptHandle {
        self.next_handle += 1;
        let handle = PromptHandle(self.next_handle);
        self.history.push(Notification::Prompt {
            handle,
            message: message.to_string(),
            actions,
        });
        handle
    }

    fn dismiss(&mut self, handle: PromptHandle) {
        self.history.push(Notification::Dismissed(handle));
    }
}
