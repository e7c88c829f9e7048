//! Chat pipeline for folio.
//!
//! Validation, prompt composition, one completion attempt with a fixed
//! fallback, and fire-and-forget persistence of each turn.

pub mod generator;
pub mod logger;
pub mod repository;
pub mod service;
