//! Shared test infrastructure.

pub mod encoding;
