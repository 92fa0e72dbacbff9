//! UI 層（Connection Gateway）
//!
//! axum による WebSocket / HTTP の受付と、UseCase 層への委譲。

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
