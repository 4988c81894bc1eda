//! Business logic services.
//!
//! Services contain logic shared between handlers and middleware, kept
//! separate from HTTP extraction and response shaping.

pub mod auth_service;
