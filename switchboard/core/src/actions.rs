//! Endpoint Actions
//!
//! One action per backend capability. Every action has the same shape:
//! mark the panel busy, make one request, render the payload or the error,
//! notify on failure, and restore the panel. The [`BusyGuard`] is released
//! explicitly on the normal path and by `Drop` on every other path, so a
//! dropped (cancelled) action still leaves the panel usable.
//!
//! Actions never return errors. All [`RequestError`] kinds are handled the
//! same way at the action boundary.

use std::sync::Arc;

use serde_json::{json, Value};

use crate::busy::BusyGuard;
use crate::error::RequestError;
use crate::http::{ApiClient, RequestOptions};
use crate::transcript::Role;
use crate::ui::{InputId, Panel, Ui};

/// Sent by echo when its input is empty
pub const ECHO_FALLBACK: &str = "Hello from the frontend!";

/// Sent by chat when its input is empty or blank
pub const CHAT_FALLBACK: &str = "Explain how the frontend talks to the backend.";

/// Shown when the chat response carries no usable `reply`
pub const NO_REPLY: &str = "(no reply)";

/// Prefix of a failed chat reply
pub const WARNING_GLYPH: &str = "⚠️";

/// Static description of a JSON-rendering action
struct Route {
    panel: Panel,
    busy_label: &'static str,
    path: &'static str,
    failure_notice: &'static str,
}

const HEALTH: Route = Route {
    panel: Panel::Health,
    busy_label: "Checking",
    path: "/health",
    failure_notice: "Health check failed",
};

const HELLO: Route = Route {
    panel: Panel::Hello,
    busy_label: "Calling",
    path: "/api/hello?name=Student",
    failure_notice: "Hello failed",
};

const ECHO: Route = Route {
    panel: Panel::Echo,
    busy_label: "Sending",
    path: "/api/echo",
    failure_notice: "Echo failed",
};

const CHAT_PATH: &str = "/api/chat";
const CHAT_BUSY_LABEL: &str = "Thinking";
const CHAT_FAILURE_NOTICE: &str = "Chat request failed";

/// The user-triggered operations, bound to one page and one backend
///
/// Cheap to clone; each clone can run its own action on its own task.
#[derive(Clone)]
pub struct Actions {
    ui: Arc<dyn Ui>,
    client: ApiClient,
}

impl std::fmt::Debug for Actions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Actions")
            .field("client", &self.client)
            .finish_non_exhaustive()
    }
}

impl Actions {
    /// Bind actions to a page and a backend client
    pub fn new(ui: Arc<dyn Ui>, client: ApiClient) -> Self {
        Self { ui, client }
    }

    /// The page these actions render into
    #[must_use]
    pub fn ui(&self) -> &Arc<dyn Ui> {
        &self.ui
    }

    /// Run the action behind `panel`
    pub async fn run(&self, panel: Panel) {
        match panel {
            Panel::Health => self.health().await,
            Panel::Hello => self.hello().await,
            Panel::Echo => self.echo().await,
            Panel::Chat => self.chat().await,
        }
    }

    /// `GET /health`
    pub async fn health(&self) {
        self.fetch_and_show(&HEALTH, RequestOptions::default()).await;
    }

    /// `GET /api/hello?name=Student`
    pub async fn hello(&self) {
        self.fetch_and_show(&HELLO, RequestOptions::default()).await;
    }

    /// `POST /api/echo` with the echo input (or [`ECHO_FALLBACK`])
    pub async fn echo(&self) {
        let message = self
            .ui
            .input(InputId::EchoMessage)
            .map(|input| input.get())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| ECHO_FALLBACK.to_string());

        let body = json!({ "message": message });
        self.fetch_and_show(&ECHO, RequestOptions::post_json(&body))
            .await;
    }

    /// `POST /api/chat` with the chat input (or [`CHAT_FALLBACK`])
    ///
    /// The input is cleared and the user's bubble appended before the
    /// request goes out.
    pub async fn chat(&self) {
        let message = self
            .ui
            .input(InputId::ChatMessage)
            .map(|input| input.take().trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| CHAT_FALLBACK.to_string());

        let log = self.ui.chat_log();
        if let Some(log) = &log {
            log.append_bubble(Role::User, message.as_str());
        } else {
            tracing::debug!("chat log missing, not rendering user bubble");
        }

        let guard = BusyGuard::acquire(self.ui.as_ref(), Panel::Chat, CHAT_BUSY_LABEL);
        let body = json!({ "message": message });

        let reply = match self.client.post_json(CHAT_PATH, &body).await {
            Ok(data) => reply_text(&data),
            Err(err) => {
                tracing::warn!(kind = err.kind(), error = %err, "chat request failed");
                self.ui.notifier().notify(CHAT_FAILURE_NOTICE, true);
                format!("{WARNING_GLYPH} {}", error_string(&err))
            }
        };

        if let Some(log) = &log {
            log.append_bubble(Role::Assistant, reply);
        }
        guard.release();
    }

    /// Empty the chat transcript
    pub fn clear_chat(&self) {
        match self.ui.chat_log() {
            Some(log) => log.clear(),
            None => tracing::debug!("chat log missing, nothing to clear"),
        }
    }

    async fn fetch_and_show(&self, route: &Route, options: RequestOptions) {
        let guard = BusyGuard::acquire(self.ui.as_ref(), route.panel, route.busy_label);

        let shown = match self.client.request(route.path, options).await {
            Ok(data) => data,
            Err(err) => {
                tracing::warn!(
                    panel = %route.panel,
                    kind = err.kind(),
                    error = %err,
                    "request failed"
                );
                self.ui.notifier().notify(route.failure_notice, true);
                json!({ "error": error_string(&err) })
            }
        };

        self.show_json(route.panel, &shown);
        guard.release();
    }

    fn show_json(&self, panel: Panel, value: &Value) {
        let Some(output) = self.ui.output(panel) else {
            tracing::debug!(%panel, "output missing, dropping result");
            return;
        };
        let text = serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());
        output.set(text);
    }
}

/// How an error reads on screen
fn error_string(err: &RequestError) -> String {
    format!("Error: {err}")
}

fn reply_text(data: &Value) -> String {
    data.get("reply")
        .and_then(Value::as_str)
        .filter(|reply| !reply.is_empty())
        .unwrap_or(NO_REPLY)
        .to_string()
}
