//! Kairan realtime share server library.
//!
//! This library implements a shared pastebin / file-drop server: a single
//! shared text slot and a single shared file slot, replaced on every share
//! (last write wins) and fanned out to all connected WebSocket sessions.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
