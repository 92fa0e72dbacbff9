//! Kairan CLI client library.
//!
//! Connects to a Kairan realtime share server over WebSocket, shares text
//! and files from the terminal, and displays every update other sessions
//! broadcast.

pub mod domain;
pub mod error;
pub mod formatter;
pub mod runner;
pub mod session;
pub mod ui;

pub use runner::run_client;
