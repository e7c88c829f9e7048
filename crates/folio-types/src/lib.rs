//! Shared domain types for folio.
//!
//! This crate contains the domain types used across the folio service:
//! knowledge-base entities and snapshots, conversation turns, LLM
//! request/response shapes, configuration, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod knowledge;
pub mod llm;
