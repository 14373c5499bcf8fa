//! Dialogue module - per-session conversation state and intent routing
//!
//! Public interface:
//! - `DialogueOrchestrator` for routing each message to an action,
//!   a templated reply, or the retrieval fallback
//! - `ConversationTurn` / `Speaker` for session history entries
//!
//! Session history and context are keyed by a caller-supplied session id
//! and live in a registry the orchestrator looks up - there is no shared
//! process-wide conversation state.

mod orchestrator;
mod session;

pub use orchestrator::{extract_order_id, DialogueOrchestrator};
pub use session::{ConversationTurn, Speaker};
