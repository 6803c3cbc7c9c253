//! Execution-semantics tests, grouped by extension family.

pub mod amo;
pub mod mul;
pub mod system;
