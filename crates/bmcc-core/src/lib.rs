//! Domain types for the BMCC international guide.
//!
//! The intake wizard (`wizard`) builds an `ApplicantProfile` (`profile`);
//! a `Session` (`session`) owns that wizard together with the conversation
//! log and the suggestion list. Nothing here performs I/O.

pub mod config;
pub mod error;
pub mod knowledge;
pub mod profile;
pub mod secret;
pub mod session;
pub mod wizard;

// Re-export common types
pub use error::{GuideError, Result};
pub use knowledge::KnowledgeBase;
pub use profile::{
    AcademicType, ApplicantProfile, ImmigrationNeed, Location, SchoolType, VisaStatus,
};
pub use session::{ConversationLog, Message, MessageRole, Session, SuggestionSet};
pub use wizard::{Transition, Wizard, WizardChoice, WizardStage};
