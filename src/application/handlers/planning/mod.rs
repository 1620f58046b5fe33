//! Planning session command and query handlers.

mod generate_itinerary;
mod get_planning_state;
mod reset_session;
mod send_message;
mod start_session;

pub use generate_itinerary::{GenerateItineraryError, GenerateItineraryHandler, Itinerary};
pub use get_planning_state::{GetPlanningStateHandler, PlanningState};
pub use reset_session::ResetSessionHandler;
pub use send_message::{
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
};
pub use start_session::StartSessionHandler;
