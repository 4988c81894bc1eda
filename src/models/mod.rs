//! Data models representing stored entities and API payloads.

/// Schema-free product, review and booking documents
pub mod document;
/// User accounts and auth payloads
pub mod user;
