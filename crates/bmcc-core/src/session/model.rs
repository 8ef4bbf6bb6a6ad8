//! Session domain model.

use super::greeting::render_greeting;
use super::log::ConversationLog;
use super::message::Message;
use super::suggestions::SuggestionSet;
use crate::error::{GuideError, Result};
use crate::profile::ApplicantProfile;
use crate::wizard::{Transition, Wizard, WizardChoice, WizardStage};

/// Everything one applicant's session owns.
///
/// Sessions share nothing with each other. The only way back to the first
/// wizard stage is [`Session::reset`].
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    created_at: String,
    wizard: Wizard,
    log: ConversationLog,
    suggestions: SuggestionSet,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            wizard: Wizard::new(),
            log: ConversationLog::new(),
            suggestions: SuggestionSet::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    pub fn stage(&self) -> WizardStage {
        self.wizard.stage()
    }

    pub fn profile(&self) -> &ApplicantProfile {
        self.wizard.profile()
    }

    pub fn log(&self) -> &ConversationLog {
        &self.log
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        &self.suggestions
    }

    pub fn is_chat_ready(&self) -> bool {
        self.stage().is_terminal()
    }

    /// Applies a wizard choice. On first entry into `ChatReady` the greeting
    /// for the final profile is appended to the log.
    pub fn choose(&mut self, choice: WizardChoice) -> Transition {
        let transition = self.wizard.choose(choice);
        self.greet_if_completed(transition);
        transition
    }

    /// Applies the n-th choice (0-based) of the current stage.
    pub fn choose_index(&mut self, index: usize) -> Transition {
        let transition = self.wizard.choose_index(index);
        self.greet_if_completed(transition);
        transition
    }

    fn greet_if_completed(&mut self, transition: Transition) {
        if !transition.completed_profile() || !self.log.is_empty() {
            return;
        }
        let greeting = render_greeting(self.wizard.profile()).unwrap_or_else(|e| {
            tracing::error!("[Session] greeting template failed: {}", e);
            format!(
                "Welcome! Based on your answers, you are an {}.",
                self.wizard.profile().academic_type()
            )
        });
        self.log.push(Message::assistant(greeting));
    }

    /// Appends the applicant's message for a new chat turn.
    pub fn push_user(&mut self, text: impl Into<String>) -> Result<()> {
        if !self.is_chat_ready() {
            return Err(GuideError::WizardIncomplete);
        }
        self.log.push(Message::user(text));
        Ok(())
    }

    /// Appends the assistant's reply and refreshes the suggestions from it.
    /// Returns whether the suggestion set changed.
    pub fn push_assistant(&mut self, answer: impl Into<String>, suggestions: &[String]) -> bool {
        self.log.push(Message::assistant(answer));
        self.suggestions.refresh(suggestions)
    }

    /// Starts over: first wizard stage, blank profile, empty log, default
    /// suggestions. The session id is kept.
    pub fn reset(&mut self) {
        self.wizard.reset();
        self.log.clear();
        self.suggestions.reset();
        tracing::info!("[Session] {} reset", self.id);
    }
}
