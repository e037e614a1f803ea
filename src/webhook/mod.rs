//! Webhook handlers for external integrations
//!
//! - [`whatsapp`] - WhatsApp Business API webhook handlers

pub mod routes;
pub mod whatsapp;
