//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (identifiers, timestamps)
//! - `conversation` - Planning sessions, preference extraction, prompts

pub mod conversation;
pub mod foundation;
