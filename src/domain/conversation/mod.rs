//! Conversation domain module.
//!
//! Holds the planning session aggregate, the preference extractor that
//! parses structured trailers out of model replies, the readiness gate and
//! the prompt templates.

mod turn;
mod preferences;
mod readiness;
mod session;
pub mod extractor;
pub mod prompts;

pub use turn::{ConversationTurn, Role};
pub use preferences::{PreferenceSet, SUGGESTED_PREFERENCE_KEYS};
pub use readiness::{Readiness, DEFAULT_READINESS_THRESHOLD};
pub use session::{AppliedExchange, PlanningSession};
pub use extractor::{
    merge_preferences, parse_trailer, split_response, ExtractionError, ExtractionOutcome,
    SplitResponse,
};
