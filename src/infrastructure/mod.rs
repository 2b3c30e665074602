//! Infrastructure layer - Adapters for persistence, HTTP and notifications

pub mod config;
pub mod http;
pub mod notifications;
pub mod persistence;
pub mod state;
pub mod websocket;
