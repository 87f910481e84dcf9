//! Toast notifications
//!
//! Every user action and outcome raises a transient toast: a title, an
//! optional description, a severity variant and an auto-dismiss
//! duration. Toasts queue on the page and render as stacked cards in
//! the top-right corner each frame.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use egui::{Align2, RichText, Rounding, Stroke};

use crate::page::theme::Palette;

/// Auto-dismiss delay unless a toast overrides it
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(4);
/// Oldest toasts are dropped beyond this depth
const MAX_QUEUED: usize = 6;

/// Severity variant controlling the accent color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

impl ToastKind {
    pub fn color(&self, palette: &Palette) -> egui::Color32 {
        match self {
            ToastKind::Info => palette.accent,
            ToastKind::Success => palette.accent_success,
            ToastKind::Error => palette.accent_error,
        }
    }
}

/// One transient message
#[derive(Debug, Clone)]
pub struct Toast {
    pub title: String,
    pub description: Option<String>,
    pub kind: ToastKind,
    pub duration: Duration,
    raised_at: Instant,
}

impl Toast {
    pub fn new(kind: ToastKind, title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            kind,
            duration: DEFAULT_TOAST_DURATION,
            raised_at: Instant::now(),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, title)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    fn expired_at(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.duration
    }
}

/// Page-owned toast queue
#[derive(Default)]
pub struct ToastCenter {
    toasts: VecDeque<Toast>,
}

impl ToastCenter {
    pub fn push(&mut self, toast: Toast) {
        tracing::info!(title = %toast.title, kind = ?toast.kind, "toast");
        self.toasts.push_back(toast);
        while self.toasts.len() > MAX_QUEUED {
            self.toasts.pop_front();
        }
    }

    /// Drop toasts whose dismiss delay has elapsed as of `now`
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| !toast.expired_at(now));
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&Toast> {
        self.toasts.back()
    }

    #[cfg(test)]
    pub fn titles(&self) -> Vec<&str> {
        self.toasts.iter().map(|toast| toast.title.as_str()).collect()
    }

    /// Prune and paint the queue in the window corner
    pub fn render(&mut self, ctx: &egui::Context, palette: &Palette) {
        self.prune(Instant::now());
        if self.toasts.is_empty() {
            return;
        }

        egui::Area::new(egui::Id::new("toast_center"))
            .anchor(Align2::RIGHT_TOP, egui::vec2(-16.0, 56.0))
            .order(egui::Order::Foreground)
            .interactable(false)
            .show(ctx, |ui| {
                for toast in &self.toasts {
                    let accent = toast.kind.color(palette);
                    egui::Frame::none()
                        .fill(palette.bg_medium)
                        .stroke(Stroke::new(1.0, accent))
                        .rounding(Rounding::same(8.0))
                        .inner_margin(12.0)
                        .show(ui, |ui| {
                            ui.set_min_width(220.0);
                            ui.set_max_width(320.0);
                            ui.label(
                                RichText::new(&toast.title)
                                    .size(15.0)
                                    .color(accent)
                                    .strong(),
                            );
                            if let Some(description) = &toast.description {
                                ui.add_space(2.0);
                                ui.label(
                                    RichText::new(description)
                                        .size(13.0)
                                        .color(palette.text_secondary),
                                );
                            }
                        });
                    ui.add_space(6.0);
                }
            });

        // Keep repainting so toasts dismiss without further input.
        ctx.request_repaint_after(Duration::from_millis(250));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_their_duration() {
        let mut center = ToastCenter::default();
        let now = Instant::now();
        center.push(Toast::info("short").with_duration(Duration::from_secs(1)));
        center.push(Toast::success("long").with_duration(Duration::from_secs(30)));
        assert_eq!(center.len(), 2);

        center.prune(now + Duration::from_secs(2));
        assert_eq!(center.len(), 1);
        assert_eq!(center.last().unwrap().title, "long");

        center.prune(now + Duration::from_secs(60));
        assert!(center.is_empty());
    }

    #[test]
    fn queue_depth_is_capped_at_the_oldest_end() {
        let mut center = ToastCenter::default();
        for i in 0..10 {
            center.push(Toast::info(format!("toast {i}")));
        }
        assert_eq!(center.len(), MAX_QUEUED);
        assert_eq!(center.last().unwrap().title, "toast 9");
    }

    #[test]
    fn builder_carries_description_and_kind() {
        let toast = Toast::error("OCR failed").with_description("Try another image or language.");
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(
            toast.description.as_deref(),
            Some("Try another image or language.")
        );
        assert_eq!(toast.duration, DEFAULT_TOAST_DURATION);
    }
}
