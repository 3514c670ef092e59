//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin client over
//! `switchboard-core`:
//! - Event loop (keyboard, frame tick)
//! - Focus and text entry
//! - Dispatching endpoint actions as independent tokio tasks
//!
//! Rendering reads the shared [`Page`] directly, so whatever an in-flight
//! action writes shows up on the next frame.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::JoinHandle;

use switchboard_core::{Actions, InputId, Page, Panel, Ui};

use crate::display;

/// Redraw interval while idle
const FRAME: Duration = Duration::from_millis(100);

/// Lines moved per PageUp/PageDown in the transcript
const SCROLL_STEP: usize = 5;

/// Focusable elements, in Tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Health panel button
    HealthButton,
    /// Hello panel button
    HelloButton,
    /// Echo message field (Enter sends)
    EchoInput,
    /// Chat message field (Enter sends)
    ChatInput,
    /// Clear-chat button
    ClearButton,
}

impl Focus {
    const ORDER: [Focus; 5] = [
        Focus::HealthButton,
        Focus::HelloButton,
        Focus::EchoInput,
        Focus::ChatInput,
        Focus::ClearButton,
    ];

    fn index(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next element in Tab order
    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.index() + 1) % Self::ORDER.len()]
    }

    /// Previous element in Tab order
    #[must_use]
    pub fn prev(self) -> Self {
        Self::ORDER[(self.index() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    /// The input field this focus edits, if any
    #[must_use]
    pub fn input(self) -> Option<InputId> {
        match self {
            Self::EchoInput => Some(InputId::EchoMessage),
            Self::ChatInput => Some(InputId::ChatMessage),
            _ => None,
        }
    }
}

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// Endpoint actions bound to `page`
    actions: Actions,
    /// The page every action renders into
    page: Arc<Page>,
    /// Focused element
    focus: Focus,
    /// Backend the actions talk to, for the footer
    base_url: String,
    /// Spawned actions that may still be running
    in_flight: Vec<(Panel, JoinHandle<()>)>,
}

impl App {
    /// Create a new App instance
    pub fn new(actions: Actions, page: Arc<Page>, base_url: impl Into<String>) -> Self {
        Self {
            running: true,
            actions,
            page,
            focus: Focus::HealthButton,
            base_url: base_url.into(),
            in_flight: Vec::new(),
        }
    }

    /// The page being displayed
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Focused element
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Backend base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Is the app still running?
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // Create async event stream for non-blocking terminal events
        let mut event_stream = EventStream::new();

        // Render initial frame immediately so user sees UI
        terminal.draw(|frame| display::render(frame, &*self))?;

        while self.running {
            tokio::select! {
                maybe_event = event_stream.next() => match maybe_event {
                    // Only handle Press events (not Release or Repeat)
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        self.handle_key(key);
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => tracing::warn!("terminal event error: {}", e),
                    None => self.running = false,
                },

                // Frame tick - in-flight actions may have changed the page
                _ = tokio::time::sleep(FRAME) => {}
            }

            self.in_flight.retain(|(_, handle)| !handle.is_finished());
            terminal.draw(|frame| display::render(frame, &*self))?;
        }

        Ok(())
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            // Quit
            KeyCode::Esc => self.running = false,
            KeyCode::Char('c') if ctrl => self.running = false,

            KeyCode::Char('l') if ctrl => self.actions.clear_chat(),

            // Focus
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),

            KeyCode::Enter => self.activate(),

            // Transcript scrolling
            KeyCode::PageUp => {
                if let Some(log) = self.page.chat_log() {
                    log.scroll_up(SCROLL_STEP);
                }
            }
            KeyCode::PageDown => {
                if let Some(log) = self.page.chat_log() {
                    log.scroll_down(SCROLL_STEP);
                }
            }

            // Typing
            KeyCode::Char(c) if !ctrl => {
                if let Some(input) = self.focused_input() {
                    input.push(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(input) = self.focused_input() {
                    input.pop();
                }
            }

            _ => {}
        }
    }

    fn focused_input(&self) -> Option<switchboard_core::TextSlot> {
        self.focus.input().and_then(|id| self.page.input(id))
    }

    /// Enter on the focused element
    fn activate(&mut self) {
        match self.focus {
            Focus::HealthButton => self.trigger(Panel::Health),
            Focus::HelloButton => self.trigger(Panel::Hello),
            Focus::EchoInput => self.submit(Panel::Echo),
            Focus::ChatInput => self.submit(Panel::Chat),
            Focus::ClearButton => self.actions.clear_chat(),
        }
    }

    /// Press the button of `panel`; a disabled button does nothing
    ///
    /// A task spawned by an earlier press that has not run yet also counts
    /// as busy, since it has not had the chance to disable the button.
    pub fn trigger(&mut self, panel: Panel) {
        let disabled = self
            .page
            .button(panel)
            .is_some_and(|button| button.is_disabled());
        let pending = self
            .in_flight
            .iter()
            .any(|(p, handle)| *p == panel && !handle.is_finished());
        if disabled || pending {
            tracing::debug!(%panel, "button busy, ignoring");
            return;
        }
        self.spawn(panel);
    }

    /// Enter in the input field of `panel`: always sends, even while busy
    pub fn submit(&mut self, panel: Panel) {
        self.spawn(panel);
    }

    fn spawn(&mut self, panel: Panel) {
        let actions = self.actions.clone();
        let handle = tokio::spawn(async move { actions.run(panel).await });
        self.in_flight.push((panel, handle));
    }

    /// Wait for every in-flight action to finish
    pub async fn settle(&mut self) {
        for (panel, handle) in self.in_flight.drain(..) {
            if let Err(e) = handle.await {
                tracing::error!(%panel, "action task failed: {}", e);
            }
        }
    }
}
