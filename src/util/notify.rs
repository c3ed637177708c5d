//! User-visible notices (toasts).

#[cfg(test)]
#[path = "notify_test.rs"]
mod notify_test;

use leptos::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Success, message: message.into() }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: NoticeLevel::Error, message: message.into() }
    }
}

pub trait Notifier {
    fn show(&self, notice: Notification);
}

/// Writes notices to the log; used when no view layer is attached.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn show(&self, notice: Notification) {
        match notice.level {
            NoticeLevel::Success => log::info!("[notice] {}", notice.message),
            NoticeLevel::Error => log::warn!("[notice] {}", notice.message),
        }
    }
}

/// Toast queue rendered by the view layer.
impl Notifier for RwSignal<Vec<Notification>> {
    fn show(&self, notice: Notification) {
        self.update(|queue| queue.push(notice));
    }
}
