//! Knowledge base: store port, snapshot loader, period formatting and the
//! in-process snapshot cache.

pub mod cache;
pub mod loader;
pub mod period;
pub mod repository;
