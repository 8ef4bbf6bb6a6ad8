//! Session domain module.
//!
//! # Module Structure
//!
//! - `model`: the per-applicant `Session` (wizard + log + suggestions)
//! - `message`: conversation message types (`MessageRole`, `Message`)
//! - `log`: append-only `ConversationLog`
//! - `suggestions`: `SuggestionSet` and its default literals
//! - `greeting`: greeting rendered when the profile is complete

mod greeting;
mod log;
mod message;
mod model;
mod suggestions;

// Re-export public API
pub use greeting::render_greeting;
pub use log::ConversationLog;
pub use message::{Message, MessageRole};
pub use model::Session;
pub use suggestions::{DEFAULT_SUGGESTIONS, MAX_SUGGESTIONS, SuggestionSet};
