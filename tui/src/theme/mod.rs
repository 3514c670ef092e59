//! Theme and Colors
//!
//! A quiet palette: panels stay neutral, colour is reserved for state
//! (busy, focus, who said what, success vs. error notifications).

use ratatui::style::{Color, Modifier, Style};

// ============================================================================
// Text Colors
// ============================================================================

/// Accent for focus and titles
pub const ACCENT: Color = Color::Cyan;

/// User bubbles
pub const USER_GREEN: Color = Color::Rgb(130, 220, 130);

/// Assistant bubbles
pub const ASSISTANT_BLUE: Color = Color::Rgb(150, 180, 255);

/// System/dim text
pub const DIM_GRAY: Color = Color::Rgb(100, 100, 100);

/// Busy button label
pub const BUSY_AMBER: Color = Color::Rgb(255, 200, 90);

// ============================================================================
// Notification Colors
// ============================================================================

/// Error notification text
pub const TOAST_ERROR_FG: Color = Color::Rgb(153, 27, 27);

/// Error notification background
pub const TOAST_ERROR_BG: Color = Color::Rgb(254, 226, 226);

/// Success notification text
pub const TOAST_OK_FG: Color = Color::Rgb(12, 74, 110);

/// Success notification background
pub const TOAST_OK_BG: Color = Color::Rgb(236, 254, 255);

// ============================================================================
// Styles
// ============================================================================

/// Style of a button given its state
#[must_use]
pub fn button_style(focused: bool, disabled: bool) -> Style {
    let style = if disabled {
        Style::default().fg(BUSY_AMBER)
    } else {
        Style::default().fg(ACCENT)
    };
    if focused {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

/// Style of a notification
#[must_use]
pub fn toast_style(is_error: bool) -> Style {
    if is_error {
        Style::default().fg(TOAST_ERROR_FG).bg(TOAST_ERROR_BG)
    } else {
        Style::default().fg(TOAST_OK_FG).bg(TOAST_OK_BG)
    }
}
