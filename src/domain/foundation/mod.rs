//! Foundation module - Shared domain primitives.
//!
//! Contains the identifier and time value objects used across the
//! planning domain.

mod ids;
mod timestamp;

pub use ids::SessionId;
pub use timestamp::Timestamp;
