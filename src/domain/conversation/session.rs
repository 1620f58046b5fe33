//! Planning session aggregate.
//!
//! One session holds one traveler's dialogue history and the preferences
//! learned from it. Sessions live only in memory: created when the traveler
//! starts planning, mutated once per turn, discarded on reset.

use serde::Serialize;

use super::extractor::{merge_preferences, split_response, ExtractionOutcome};
use super::{ConversationTurn, PreferenceSet, Readiness};
use crate::domain::foundation::{SessionId, Timestamp};

/// Result of folding one exchange into a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedExchange {
    /// Conversational text, trailer removed.
    pub reply: String,
    /// What the extractor made of the trailer.
    pub extraction: ExtractionOutcome,
}

/// State of a single planning conversation.
///
/// # Invariants
///
/// - `turns` is append-only; every exchange adds exactly one user turn
///   followed by one assistant turn.
/// - Assistant turns never contain the structured trailer.
/// - `preferences` only changes through the extractor merge.
#[derive(Debug, Clone, Serialize)]
pub struct PlanningSession {
    id: SessionId,
    turns: Vec<ConversationTurn>,
    preferences: PreferenceSet,
    created_at: Timestamp,
}

impl PlanningSession {
    /// Starts an empty session.
    pub fn new() -> Self {
        Self::with_id(SessionId::new())
    }

    /// Starts an empty session under a known id.
    pub fn with_id(id: SessionId) -> Self {
        Self {
            id,
            turns: Vec::new(),
            preferences: PreferenceSet::new(),
            created_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn preferences(&self) -> &PreferenceSet {
        &self.preferences
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Progress toward the given readiness threshold.
    pub fn readiness(&self, threshold: usize) -> Readiness {
        Readiness::of(&self.preferences, threshold)
    }

    /// Renders the transcript sent with a pending user message.
    ///
    /// Lines look like `User: ...` / `Assistant: ...`, newline separated.
    /// The pending message is rendered as if already recorded and then
    /// repeated as the closing `User:` line, so it appears twice at the end.
    /// The session itself is not modified.
    pub fn transcript_with(&self, pending_user_text: &str) -> String {
        let pending = ConversationTurn::user(pending_user_text).transcript_line();
        self.turns
            .iter()
            .map(ConversationTurn::transcript_line)
            .chain([pending.clone(), pending])
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Records a completed exchange.
    ///
    /// Appends the user turn, splits the raw model reply, merges any
    /// trailer into the preferences and appends the conversational half
    /// as the assistant turn.
    pub fn apply_exchange(&mut self, user_text: &str, raw_response: &str) -> AppliedExchange {
        self.turns.push(ConversationTurn::user(user_text));

        let split = split_response(raw_response);
        let extraction = match split.trailer {
            Some(trailer) => merge_preferences(trailer, &mut self.preferences),
            None => ExtractionOutcome::NoTrailer,
        };

        let reply = split.conversational.to_string();
        self.turns.push(ConversationTurn::assistant(reply.clone()));

        AppliedExchange { reply, extraction }
    }
}

impl Default for PlanningSession {
    fn default() -> Self {
        Self::new()
    }
}
