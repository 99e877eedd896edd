//! Advertisement selection core.
//!
//! Given a customer and a marketplace, the library evaluates targeting
//! predicates concurrently against an immutable request context and returns
//! the eligible advertisement with the highest click-through rate, or an
//! explicit empty advertisement when none qualifies.

pub mod ads;
pub mod config;
pub mod error;
pub mod telemetry;
