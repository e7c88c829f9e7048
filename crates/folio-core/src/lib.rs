//! Business logic and repository trait definitions for folio.
//!
//! This crate defines the "ports" (repository and provider traits) that the
//! infrastructure layer implements, plus the knowledge snapshot cache, the
//! prompt composer and the chat pipeline. It depends only on `folio-types`
//! (and `folio-observe` for span attribute names) -- never on `folio-infra`
//! or any database/IO crate.

pub mod chat;
pub mod knowledge;
pub mod llm;
pub mod prompt;

#[cfg(test)]
pub(crate) mod test_support;
