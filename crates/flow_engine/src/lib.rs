//! flow_engine - Conversational flows and the command router
//!
//! Everything between the transport and the stores lives here:
//! - `router` - universal keywords, the Idle command table, step dispatch
//! - `flows` - the five session flows (schedule registration / edit /
//!   deletion, attendance registration / edit)
//! - `queries` - the three stateless list operations
//! - `replies` - the user-facing message catalogue
//!
//! The router consumes one inbound message at a time and returns the ordered
//! reply messages; delivering them is the caller's concern.

pub mod error;
pub mod flows;
pub mod queries;
pub mod replies;
pub mod router;

pub use error::FlowError;
pub use flows::FlowServices;
pub use router::{InboundMessage, Router};
