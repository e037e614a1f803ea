//! # API Module
//!
//! Business logic of the bridge, independent of the web layer. Each function
//! receives the repository and the Meta client it needs.
//!
//! ## Modules
//!
//! - [`connection`] - Connecting WhatsApp Business accounts and their status
//! - [`message`] - Listing received messages and relaying outbound ones

pub mod connection;
pub mod message;
