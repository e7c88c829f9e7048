//! HTTP/REST API layer for folio.
//!
//! Axum routes under `/api/`, envelope response format, optional admin token
//! on the operator endpoints, CORS from config.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod response;
pub mod router;
