//! Infrastructure layer for folio.
//!
//! Implements the repository and provider traits defined in `folio-core`:
//! Supabase (PostgREST) and SQLite stores, the OpenAI-compatible completion
//! provider, and the config/secrets loader.

pub mod config;
pub mod llm;
pub mod sqlite;
pub mod store;
pub mod supabase;
