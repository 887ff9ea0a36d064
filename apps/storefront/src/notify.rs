//! # Notifications
//!
//! Toasts raised by commands after a mutation or a rejected form.
//!
//! Fire-and-forget: a notifier has no way to report failure back to the
//! command that raised the toast.

use std::cell::RefCell;
use std::rc::Rc;

use serde::Serialize;
use tracing::{info, warn};

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    #[default]
    Default,
    Destructive,
}

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    pub fn success(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Default,
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Toast {
            title: title.into(),
            description: description.into(),
            variant: ToastVariant::Destructive,
        }
    }
}

/// Receives toasts from commands.
pub trait Notifier {
    fn notify(&self, toast: Toast);
}

/// Writes toasts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => warn!(title = %toast.title, "{}", toast.description),
        }
    }
}

/// Keeps every toast; clones share the same list.
///
/// ## Usage
/// ```rust
/// use storefront::notify::{Notifier, RecordingNotifier, Toast};
///
/// let recorder = RecordingNotifier::default();
/// let handle = recorder.clone();
/// recorder.notify(Toast::success("Added to cart", "1 Phone(s) added to your cart."));
/// assert_eq!(handle.titles(), vec!["Added to cart"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    toasts: Rc<RefCell<Vec<Toast>>>,
}

impl RecordingNotifier {
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.borrow().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.toasts.borrow().iter().map(|t| t.title.clone()).collect()
    }

    pub fn last(&self) -> Option<Toast> {
        self.toasts.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.borrow_mut().push(toast);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_notifier_keeps_order() {
        let recorder = RecordingNotifier::default();
        recorder.notify(Toast::success("One", "first"));
        recorder.notify(Toast::destructive("Two", "second"));

        assert_eq!(recorder.titles(), vec!["One", "Two"]);
        assert_eq!(recorder.last().map(|t| t.variant), Some(ToastVariant::Destructive));
    }

    #[test]
    fn test_toast_serializes_variant_lowercase() {
        let json = serde_json::to_value(Toast::destructive("Missing Information", "x")).unwrap();
        assert_eq!(json["variant"], "destructive");
    }
}
