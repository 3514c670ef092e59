//! Switchboard TUI - Terminal client for the backend demo
//!
//! A full-screen terminal stand-in for the demo web page: three panels that
//! call the health, hello and echo endpoints and show their JSON, and a chat
//! panel that keeps a scrolling transcript.
//!
//! # Architecture
//!
//! - **App**: Owns the page, turns key presses into fire-and-forget tasks
//! - **Display**: Draws the page every frame; holds no state of its own
//! - **Widgets**: Borderless scrollable text blocks
//! - **Theme**: Colours and styles
//!
//! All request, busy-state and transcript logic lives in `switchboard-core`.

pub mod app;
pub mod display;
pub mod theme;
pub mod widgets;

pub use app::{App, Focus};
