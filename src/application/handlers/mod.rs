//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod planning;

pub use planning::{
    // Commands
    GenerateItineraryError, GenerateItineraryHandler, Itinerary,
    ResetSessionHandler,
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
    StartSessionHandler,
    // Queries
    GetPlanningStateHandler, PlanningState,
};
