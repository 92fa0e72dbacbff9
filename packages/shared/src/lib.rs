//! Shared utilities for the Kairan realtime share application.
//!
//! Cross-cutting concerns used by both the server and the CLI client:
//! logging setup and time handling.

pub mod logger;
pub mod time;
