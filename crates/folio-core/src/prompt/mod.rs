//! Prompt construction and the static suggestion table.

pub mod composer;
pub mod suggestions;
