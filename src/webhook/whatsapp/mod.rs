//! WhatsApp webhook integration module
//!
//! ## Submodules
//!
//! - [`handler`] - Parsing and storage of incoming webhook deliveries
//! - [`routes`] - HTTP endpoint handlers for WhatsApp webhooks
//! - [`schemas`] - Data structures for WhatsApp payloads (incoming and outgoing)
//! - [`security`] - Verify token and payload signature checks

pub mod handler;
pub mod routes;
pub mod schemas;
pub mod security;

pub use routes::{receive, verify};
