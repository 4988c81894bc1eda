//! Elegant Weds API
//!
//! REST API for a bridal-services storefront: users, dresses, accessories,
//! reviews and bookings, with Basic credential authentication.
//!
//! # Architecture
//!
//! - **Web Framework**: Axum (async HTTP server)
//! - **Storage**: PostgreSQL with sqlx (JSONB documents), or in-memory
//! - **Authentication**: `Authorization: Basic` checked against Argon2id hashes
//! - **Format**: JSON requests/responses

pub mod config;
pub mod db;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
