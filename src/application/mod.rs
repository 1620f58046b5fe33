//! Application layer - Engine, Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The engine owns the model calls; handlers own session lookup, locking and
//! input validation.

pub mod engine;
pub mod handlers;

pub use engine::{
    ConversationEngine, EngineSettings, ProcessTurnError, SummaryError, TurnOutcome,
};
pub use handlers::{
    GenerateItineraryError, GenerateItineraryHandler, GetPlanningStateHandler, Itinerary,
    PlanningState, ResetSessionHandler, SendMessageCommand, SendMessageError,
    SendMessageHandler, SendMessageResult, StartSessionHandler,
};
