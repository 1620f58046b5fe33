//! Conversation turn entity.
//!
//! Turns are immutable records of user/assistant exchanges within a planning
//! session. History is append-only and defines the replay order used when
//! building the model context.

use crate::domain::foundation::Timestamp;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a turn's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// System instructions (never shown to the traveler).
    System,
    /// Traveler input.
    User,
    /// Assistant reply, conversational text only.
    Assistant,
}

impl Role {
    /// Label used when replaying history as plain text ("User", "Assistant").
    pub fn label(&self) -> &'static str {
        match self {
            Self::System => "System",
            Self::User => "User",
            Self::Assistant => "Assistant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single immutable entry in the conversation history.
///
/// Content is not validated: blank input is rejected by the application
/// layer, and an assistant reply may legitimately be empty when the model
/// answered with nothing but a preference trailer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    role: Role,
    content: String,
    created_at: Timestamp,
}

impl ConversationTurn {
    /// Creates a new turn stamped with the current time.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Timestamp::now(),
        }
    }

    /// Creates a user turn.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates an assistant turn.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Returns the role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns when the turn was recorded.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Renders the turn as a transcript line, e.g. `User: I want to go to Bali`.
    pub fn transcript_line(&self) -> String {
        format!("{}: {}", self.role.label(), self.content)
    }
}
