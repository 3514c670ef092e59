//! UI Bindings
//!
//! Typed access to the page elements the components touch. Every accessor
//! returns an `Option` because any element may be absent; callers treat a
//! missing element as a no-op rather than an error.
//!
//! Handles ([`Button`], [`TextSlot`], [`Transcript`], [`Notifier`]) are cheap
//! clones of shared state, so a handle obtained by one task and a render pass
//! on another always see the same element.
//!
//! [`Page`] is the in-memory implementation used both by the terminal surface
//! and by tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;

use crate::notify::Notifier;
use crate::transcript::Transcript;

/// One backend capability and its group of elements
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Panel {
    /// `GET /health`
    Health,
    /// `GET /api/hello`
    Hello,
    /// `POST /api/echo`
    Echo,
    /// `POST /api/chat`
    Chat,
}

impl Panel {
    /// All panels in display order
    pub const ALL: [Panel; 4] = [Panel::Health, Panel::Hello, Panel::Echo, Panel::Chat];

    /// Panel heading
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::Health => "Health",
            Self::Hello => "Hello",
            Self::Echo => "Echo",
            Self::Chat => "Chat",
        }
    }

    /// Label the panel's button shows when idle
    #[must_use]
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Health => "Check health",
            Self::Hello => "Say hello",
            Self::Echo => "Send echo",
            Self::Chat => "Send",
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Free-text input fields
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputId {
    /// Message sent by the echo action
    EchoMessage,
    /// Message sent by the chat action
    ChatMessage,
}

/// Any addressable element, used to build pages with pieces missing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Element {
    /// The action button of a panel
    Button(Panel),
    /// The status line of a panel
    Status(Panel),
    /// The JSON output area of a panel
    Output(Panel),
    /// An input field
    Input(InputId),
    /// The chat transcript
    ChatLog,
}

/// Snapshot of a button
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ButtonState {
    /// Visible label
    pub label: String,
    /// Whether activation is ignored
    pub disabled: bool,
}

/// Shared handle to a button element
#[derive(Clone, Debug, Default)]
pub struct Button(Arc<RwLock<ButtonState>>);

impl Button {
    /// Create an enabled button
    pub fn new(label: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(ButtonState {
            label: label.into(),
            disabled: false,
        })))
    }

    /// Current label
    #[must_use]
    pub fn label(&self) -> String {
        self.0.read().label.clone()
    }

    /// Replace the label
    pub fn set_label(&self, label: impl Into<String>) {
        self.0.write().label = label.into();
    }

    /// Whether the button is disabled
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.0.read().disabled
    }

    /// Enable or disable the button
    pub fn set_disabled(&self, disabled: bool) {
        self.0.write().disabled = disabled;
    }

    /// Copy of the whole state
    #[must_use]
    pub fn snapshot(&self) -> ButtonState {
        self.0.read().clone()
    }
}

/// Shared handle to a text-bearing element (status line, output, input)
#[derive(Clone, Debug, Default)]
pub struct TextSlot(Arc<RwLock<String>>);

impl TextSlot {
    /// Create a slot holding `text`
    pub fn new(text: impl Into<String>) -> Self {
        Self(Arc::new(RwLock::new(text.into())))
    }

    /// Current text
    #[must_use]
    pub fn get(&self) -> String {
        self.0.read().clone()
    }

    /// Replace the text
    pub fn set(&self, text: impl Into<String>) {
        *self.0.write() = text.into();
    }

    /// Return the text and leave the slot empty
    #[must_use]
    pub fn take(&self) -> String {
        std::mem::take(&mut *self.0.write())
    }

    /// Append one character
    pub fn push(&self, c: char) {
        self.0.write().push(c);
    }

    /// Remove the last character
    pub fn pop(&self) {
        self.0.write().pop();
    }
}

/// Typed view of the page
///
/// Implementations hand out handles to live elements; `None` means the
/// element does not exist on this page.
pub trait Ui: Send + Sync {
    /// The action button of `panel`
    fn button(&self, panel: Panel) -> Option<Button>;

    /// The status line of `panel`
    fn status(&self, panel: Panel) -> Option<TextSlot>;

    /// The JSON output area of `panel`
    fn output(&self, panel: Panel) -> Option<TextSlot>;

    /// An input field
    fn input(&self, id: InputId) -> Option<TextSlot>;

    /// The chat transcript
    fn chat_log(&self) -> Option<Transcript>;

    /// The notification area; always present
    fn notifier(&self) -> Notifier;
}

/// Status text shown while a panel is idle
pub const READY_TEXT: &str = "Ready";

/// In-memory page with every element the actions use
#[derive(Clone, Debug)]
pub struct Page {
    buttons: HashMap<Panel, Button>,
    statuses: HashMap<Panel, TextSlot>,
    outputs: HashMap<Panel, TextSlot>,
    inputs: HashMap<InputId, TextSlot>,
    chat_log: Option<Transcript>,
    notifier: Notifier,
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

impl Page {
    /// A complete page with the default notification lifetime
    #[must_use]
    pub fn new() -> Self {
        Self::with_notifier(Notifier::new())
    }

    /// A complete page whose notifications live for `ttl`
    #[must_use]
    pub fn with_notification_ttl(ttl: Duration) -> Self {
        Self::with_notifier(Notifier::with_ttl(ttl))
    }

    fn with_notifier(notifier: Notifier) -> Self {
        let buttons = Panel::ALL
            .iter()
            .map(|&panel| (panel, Button::new(panel.button_label())))
            .collect();
        let statuses = Panel::ALL
            .iter()
            .map(|&panel| (panel, TextSlot::new(READY_TEXT)))
            .collect();
        // chat renders into the transcript, not a JSON area
        let outputs = [Panel::Health, Panel::Hello, Panel::Echo]
            .iter()
            .map(|&panel| (panel, TextSlot::default()))
            .collect();
        let inputs = [InputId::EchoMessage, InputId::ChatMessage]
            .iter()
            .map(|&id| (id, TextSlot::default()))
            .collect();

        Self {
            buttons,
            statuses,
            outputs,
            inputs,
            chat_log: Some(Transcript::new()),
            notifier,
        }
    }

    /// Drop one element from the page
    #[must_use]
    pub fn without(mut self, element: Element) -> Self {
        match element {
            Element::Button(panel) => {
                self.buttons.remove(&panel);
            }
            Element::Status(panel) => {
                self.statuses.remove(&panel);
            }
            Element::Output(panel) => {
                self.outputs.remove(&panel);
            }
            Element::Input(id) => {
                self.inputs.remove(&id);
            }
            Element::ChatLog => self.chat_log = None,
        }
        self
    }
}

impl Ui for Page {
    fn button(&self, panel: Panel) -> Option<Button> {
        self.buttons.get(&panel).cloned()
    }

    fn status(&self, panel: Panel) -> Option<TextSlot> {
        self.statuses.get(&panel).cloned()
    }

    fn output(&self, panel: Panel) -> Option<TextSlot> {
        self.outputs.get(&panel).cloned()
    }

    fn input(&self, id: InputId) -> Option<TextSlot> {
        self.inputs.get(&id).cloned()
    }

    fn chat_log(&self) -> Option<Transcript> {
        self.chat_log.clone()
    }

    fn notifier(&self) -> Notifier {
        self.notifier.clone()
    }
}
