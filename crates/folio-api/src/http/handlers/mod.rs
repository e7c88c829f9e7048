//! HTTP request handlers for the REST API.

pub mod cache;
pub mod chat;
pub mod health;
pub mod history;
pub mod suggestions;
