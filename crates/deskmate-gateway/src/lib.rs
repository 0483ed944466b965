//! # Deskmate Gateway
//!
//! HTTP/WebSocket front door for the response selector. The gateway parses
//! requests, forwards them to `ResponseSelector::respond`, and delivers the
//! reply; it owns no matching logic of its own.

pub mod routes;
pub mod server;
pub mod ws;

pub use server::{AppState, start};
