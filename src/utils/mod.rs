//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Random identifiers and slugs minted on creation

pub mod code_generator;
