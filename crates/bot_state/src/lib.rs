//! bot_state - Session state machine for the conversational flows
//!
//! This crate provides the per-conversation state tracking:
//! - `step` - per-flow step enums joined in the `FlowStep` tagged union
//! - `session` - the session snapshot (step, collected fields, cursor)
//! - `store` - the `SessionStore` trait and in-memory implementation

pub mod session;
pub mod step;
pub mod store;

// Re-export commonly used types
pub use session::Session;
pub use step::{
    AttendanceEditStep, AttendanceRegistrationStep, FlowKind, FlowStep, ScheduleDeletionStep,
    ScheduleEditStep, ScheduleRegistrationStep,
};
pub use store::{InMemorySessionStore, SessionStore};
