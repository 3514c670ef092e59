//! Busy-State Controller
//!
//! Marks a panel busy for the lifetime of a [`BusyGuard`]. Releasing the
//! guard, by [`BusyGuard::release`] or by dropping it on an early return,
//! an unwinding panic or a cancelled future, always leaves the panel idle:
//! button enabled, status back to [`READY_TEXT`], and the label captured at
//! acquisition put back.
//!
//! Guards on one panel may overlap and finish in any order. A guard that
//! captured another guard's busy label restores the panel's own idle label
//! instead, so the last release never leaves a busy label behind.

use crate::ui::{Button, Panel, TextSlot, Ui, READY_TEXT};

/// Prefix shown on a busy button
pub const BUSY_GLYPH: &str = "⏳";

/// Status text shown while a request is in flight
pub const LOADING_TEXT: &str = "Loading…";

struct Held {
    button: Button,
    status: TextSlot,
    label: String,
}

/// Returns a panel to idle exactly once
#[must_use = "dropping the guard immediately releases the busy state"]
pub struct BusyGuard {
    panel: Panel,
    held: Option<Held>,
}

impl BusyGuard {
    /// Mark `panel` busy with `label` as the in-progress text
    ///
    /// If the panel's button or status line is missing the guard is inert:
    /// nothing is changed and releasing it does nothing.
    pub fn acquire(ui: &dyn Ui, panel: Panel, label: &str) -> Self {
        let (Some(button), Some(status)) = (ui.button(panel), ui.status(panel)) else {
            tracing::debug!(%panel, "busy target missing, skipping");
            return Self { panel, held: None };
        };

        let prior = button.label();
        let label_to_restore = if prior.starts_with(BUSY_GLYPH) {
            panel.button_label().to_string()
        } else {
            prior
        };
        let held = Held {
            label: label_to_restore,
            button,
            status,
        };

        held.button.set_disabled(true);
        held.button.set_label(format!("{BUSY_GLYPH} {label}"));
        held.status.set(LOADING_TEXT);
        tracing::trace!(%panel, "busy acquired");

        Self {
            panel,
            held: Some(held),
        }
    }

    /// Whether this guard actually changed the UI
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.held.is_some()
    }

    /// Put the panel back to idle now
    pub fn release(mut self) {
        self.restore();
    }

    fn restore(&mut self) {
        if let Some(held) = self.held.take() {
            held.button.set_disabled(false);
            held.button.set_label(held.label);
            held.status.set(READY_TEXT);
            tracing::trace!(panel = %self.panel, "busy released");
        }
    }
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::{Element, Page};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_acquire_marks_busy() {
        let page = Page::new();

        let guard = BusyGuard::acquire(&page, Panel::Health, "Checking");

        let button = page.button(Panel::Health).unwrap();
        assert!(guard.is_active());
        assert!(button.is_disabled());
        assert_eq!(button.label(), "⏳ Checking");
        assert_eq!(page.status(Panel::Health).unwrap().get(), LOADING_TEXT);
        guard.release();
    }

    #[test]
    fn test_release_keeps_label_and_goes_idle() {
        let page = Page::new();
        let button = page.button(Panel::Echo).unwrap();
        button.set_label("Custom label");
        button.set_disabled(true);
        page.status(Panel::Echo).unwrap().set("Idle");

        BusyGuard::acquire(&page, Panel::Echo, "Sending").release();

        assert_eq!(button.label(), "Custom label");
        assert!(!button.is_disabled());
        assert_eq!(page.status(Panel::Echo).unwrap().get(), READY_TEXT);
    }

    #[test]
    fn test_drop_releases() {
        let page = Page::new();
        {
            let _guard = BusyGuard::acquire(&page, Panel::Hello, "Calling");
            assert!(page.button(Panel::Hello).unwrap().is_disabled());
        }
        let button = page.button(Panel::Hello).unwrap();
        assert!(!button.is_disabled());
        assert_eq!(button.label(), Panel::Hello.button_label());
        assert_eq!(page.status(Panel::Hello).unwrap().get(), READY_TEXT);
    }

    #[test]
    fn test_release_on_panic_unwind() {
        let page = Page::new();
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = BusyGuard::acquire(&page, Panel::Chat, "Thinking");
            panic!("render failed");
        }));
        assert!(result.is_err());
        assert!(!page.button(Panel::Chat).unwrap().is_disabled());
        assert_eq!(page.button(Panel::Chat).unwrap().label(), "Send");
    }

    #[test]
    fn test_missing_elements_give_inert_guard() {
        let page = Page::new().without(Element::Status(Panel::Health));

        let guard = BusyGuard::acquire(&page, Panel::Health, "Checking");

        assert!(!guard.is_active());
        // the button exists but must be left alone
        let button = page.button(Panel::Health).unwrap();
        assert!(!button.is_disabled());
        assert_eq!(button.label(), "Check health");
        guard.release();
        assert_eq!(button.label(), "Check health");
    }

    #[test]
    fn test_overlapping_guards_end_idle_in_any_order() {
        let page = Page::new();
        let button = page.button(Panel::Chat).unwrap();

        let first = BusyGuard::acquire(&page, Panel::Chat, "Thinking");
        let second = BusyGuard::acquire(&page, Panel::Chat, "Thinking");
        first.release();
        assert!(!button.is_disabled());
        second.release();

        assert_eq!(button.label(), "Send");
        assert!(!button.is_disabled());
        assert_eq!(page.status(Panel::Chat).unwrap().get(), READY_TEXT);

        let outer = BusyGuard::acquire(&page, Panel::Chat, "Thinking");
        let inner = BusyGuard::acquire(&page, Panel::Chat, "Thinking");
        inner.release();
        outer.release();

        assert_eq!(button.label(), "Send");
        assert!(!button.is_disabled());
    }
}
