//! Infrastructure 層
//!
//! ドメイン層の trait（Repository / Registry / RateLimiter /
//! MessagePusher）の具体的な実装と、ワイヤ形式の DTO 定義。

pub mod dto;
pub mod message_pusher;
pub mod rate_limit;
pub mod repository;
