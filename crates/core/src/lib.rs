//! Domain logic shared across the AI-stagram backend.
//!
//! Everything here is pure: the error taxonomy, the generation parameter
//! resolver, creator-profile text parsing, and cache/blob key builders.
//! No I/O, no clients — those live in the `replicate`, `pipeline`, and
//! `db` crates.

pub mod error;
pub mod keys;
pub mod params;
pub mod profile;
pub mod types;
