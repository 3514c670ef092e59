//! Chat Transcript
//!
//! Ordered, append-only, in-memory log of chat bubbles. Each bubble keeps
//! the raw text for plain-text surfaces and a pre-rendered HTML fragment in
//! which the text is escaped, so message content can never be read as
//! markup.
//!
//! The log also owns its scroll position: appending re-pins the view to the
//! newest bubble.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Local};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Who wrote a bubble
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person at the keyboard
    User,
    /// The backend's reply
    Assistant,
}

impl Role {
    /// CSS class of the bubble
    #[must_use]
    pub fn css_class(self) -> &'static str {
        match self {
            Self::User => "me",
            Self::Assistant => "ai",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User => write!(f, "You"),
            Self::Assistant => write!(f, "Assistant"),
        }
    }
}

/// One chat message as displayed
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bubble {
    /// Author
    pub role: Role,
    /// Raw message text
    pub text: String,
    /// Wall-clock time it was appended
    pub timestamp: DateTime<Local>,
    /// Escaped HTML fragment for the bubble
    pub html: String,
}

impl Bubble {
    fn new(role: Role, text: String, timestamp: DateTime<Local>) -> Self {
        let html = format!(
            r#"<div class="bubble {}">{}<span class="time">{}</span></div>"#,
            role.css_class(),
            escape_html(&text),
            time_of_day(&timestamp),
        );
        Self {
            role,
            text,
            timestamp,
            html,
        }
    }

    /// Locale-style time of day, e.g. `3:07:09 PM`
    #[must_use]
    pub fn time(&self) -> String {
        time_of_day(&self.timestamp)
    }
}

fn time_of_day(timestamp: &DateTime<Local>) -> String {
    timestamp.format("%-I:%M:%S %p").to_string()
}

const SPECIALS: &[char] = &['&', '<', '>', '"', '\''];

/// Replace `& < > " '` with HTML entities
#[must_use]
pub fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.contains(SPECIALS) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

#[derive(Debug, Default)]
struct Log {
    bubbles: Vec<Bubble>,
    /// Lines scrolled up from the newest entry (0 = pinned to bottom)
    scroll_back: usize,
}

/// Shared handle to the chat log
#[derive(Clone, Debug, Default)]
pub struct Transcript {
    log: Arc<RwLock<Log>>,
}

impl Transcript {
    /// Empty transcript
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bubble stamped with the current time and scroll to it
    pub fn append_bubble(&self, role: Role, text: impl Into<String>) {
        self.push(Bubble::new(role, text.into(), Local::now()));
    }

    fn push(&self, bubble: Bubble) {
        let mut log = self.log.write();
        log.bubbles.push(bubble);
        log.scroll_back = 0;
    }

    /// Remove every bubble
    pub fn clear(&self) {
        let mut log = self.log.write();
        log.bubbles.clear();
        log.scroll_back = 0;
    }

    /// Copy of all bubbles, oldest first
    #[must_use]
    pub fn bubbles(&self) -> Vec<Bubble> {
        self.log.read().bubbles.clone()
    }

    /// Number of bubbles
    #[must_use]
    pub fn len(&self) -> usize {
        self.log.read().bubbles.len()
    }

    /// Whether the log is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.log.read().bubbles.is_empty()
    }

    /// Markup of the whole log, bubbles in order
    #[must_use]
    pub fn html(&self) -> String {
        self.log
            .read()
            .bubbles
            .iter()
            .map(|b| b.html.as_str())
            .collect()
    }

    /// Lines scrolled back from the newest bubble
    #[must_use]
    pub fn scroll_back(&self) -> usize {
        self.log.read().scroll_back
    }

    /// Scroll towards older bubbles
    pub fn scroll_up(&self, lines: usize) {
        let mut log = self.log.write();
        log.scroll_back = log.scroll_back.saturating_add(lines);
    }

    /// Scroll towards the newest bubble
    pub fn scroll_down(&self, lines: usize) {
        let mut log = self.log.write();
        log.scroll_back = log.scroll_back.saturating_sub(lines);
    }

    /// Cap the scroll position to what a surface can actually show
    pub fn clamp_scroll(&self, max: usize) {
        let mut log = self.log.write();
        log.scroll_back = log.scroll_back.min(max);
    }
}
