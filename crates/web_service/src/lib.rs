//! web_service - HTTP webhook endpoint and reply delivery
//!
//! Receives inbound chat events over HTTP, hands them to a per-conversation
//! dispatch worker and delivers the router's replies through the transport
//! adapter. The webhook always acknowledges immediately; message handling
//! happens on the conversation's worker.

pub mod config;
pub mod controllers;
pub mod dispatch;
pub mod error;
pub mod models;
pub mod server;
pub mod transport;

pub use config::{AppConfig, StoreBackend};
pub use error::{AppError, Result};
