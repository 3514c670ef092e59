//! Switchboard Core - Headless Client Logic for the Backend Demo
//!
//! This crate holds everything the demo client does besides drawing:
//! talking to the backend, bookkeeping for busy buttons, transient
//! notifications, and the chat transcript. It drives any surface that can
//! implement the [`Ui`] binding trait; the terminal client in `switchboard-tui`
//! is one, the in-memory [`Page`] used by tests is another.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        UI Surface                            │
//! │        (TUI renders a Page; tests inspect a Page)            │
//! └───────────────▲──────────────────────────────┬───────────────┘
//!                 │ Ui handles                   │ key press
//!                 │ (Button, TextSlot,           │ -> tokio::spawn
//!                 │  Transcript, Notifier)       ▼
//! ┌───────────────┴──────────────────────────────────────────────┐
//! │                         Actions                              │
//! │   health · hello · echo · chat · clear_chat                  │
//! │   BusyGuard ─ ApiClient ─ render / notify ─ release          │
//! └───────────────────────────────┬──────────────────────────────┘
//!                                 │ Transport
//!                                 ▼
//!                      reqwest ── demo backend
//! ```
//!
//! # Module Overview
//!
//! - [`actions`]: The four endpoint actions plus chat clearing
//! - [`busy`]: Busy-state guard with guaranteed restoration
//! - [`config`]: TOML/build-time configuration
//! - [`error`]: Request error taxonomy
//! - [`http`]: HTTP client wrapper and transport abstraction
//! - [`notify`]: Transient notifications
//! - [`transcript`]: Chat transcript and HTML escaping
//! - [`ui`]: Typed UI bindings and the in-memory page
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod actions;
pub mod busy;
pub mod config;
pub mod error;
pub mod http;
pub mod notify;
pub mod transcript;
pub mod ui;

pub use actions::Actions;
pub use busy::BusyGuard;
pub use config::{
    default_config_path, load_config, load_config_from_path, ClientConfig, ConfigError,
    ConfigSource,
};
pub use error::RequestError;
pub use http::{
    ApiClient, HttpRequest, HttpResponse, Method, Outcome, RequestOptions, ReqwestTransport,
    Transport,
};
pub use notify::{Notification, Notifier};
pub use transcript::{escape_html, Bubble, Role, Transcript};
pub use ui::{Button, ButtonState, Element, InputId, Page, Panel, TextSlot, Ui};
