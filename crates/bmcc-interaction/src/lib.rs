//! Chat side of the BMCC guide.
//!
//! [`InteractionManager`] owns one applicant [`Session`] and the
//! [`CompletionClient`] that answers its questions. Each call on the manager
//! is one user action: a wizard button, a typed message, a suggestion pick or
//! a reset.

pub mod completion;
pub mod gemini_api_agent;
pub mod prompt;
pub mod retry;
pub mod transport;

pub use completion::{Completion, CompletionClient};
pub use gemini_api_agent::GeminiTransport;
pub use retry::{RetryPolicy, Sleeper, TokioSleeper};
pub use transport::{CompletionRequest, CompletionTransport, TransportResponse};

use bmcc_core::{
    GuideError, Result, Session, SuggestionSet, Transition, WizardChoice, WizardStage,
};

/// Outcome of one user action, for the front end to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractionResult {
    /// Input did not apply to the current state; nothing changed.
    NoOp,
    /// The wizard moved on to another question.
    StageChanged(WizardStage),
    /// The wizard finished; the greeting is the first log entry.
    ChatReady { greeting: String },
    /// The model answered.
    Answer {
        text: String,
        suggestions_changed: bool,
    },
    /// The turn failed. `text` was logged as the assistant's reply.
    TurnFailed { error: GuideError, text: String },
    /// The session was started over.
    Reset,
}

/// Manages the wizard and chat turns of a single session.
pub struct InteractionManager {
    session: Session,
    client: CompletionClient,
}

impl InteractionManager {
    pub fn new(client: CompletionClient) -> Self {
        Self::with_session(Session::new(), client)
    }

    pub fn with_session(session: Session, client: CompletionClient) -> Self {
        tracing::info!("[InteractionManager] session {} started", session.id());
        Self { session, client }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn stage(&self) -> WizardStage {
        self.session.stage()
    }

    pub fn suggestions(&self) -> &SuggestionSet {
        self.session.suggestions()
    }

    pub fn handle_choice(&mut self, choice: WizardChoice) -> InteractionResult {
        let transition = self.session.choose(choice);
        self.transition_result(transition)
    }

    /// Applies the n-th (0-based) choice offered by the current stage.
    pub fn choose_index(&mut self, index: usize) -> InteractionResult {
        let transition = self.session.choose_index(index);
        self.transition_result(transition)
    }

    fn transition_result(&self, transition: Transition) -> InteractionResult {
        match transition {
            Transition::Ignored => InteractionResult::NoOp,
            Transition::Advanced { to, .. } if to.is_terminal() => {
                let greeting = self
                    .session
                    .log()
                    .last()
                    .map(|m| m.text().to_string())
                    .unwrap_or_default();
                InteractionResult::ChatReady { greeting }
            }
            Transition::Advanced { to, .. } => InteractionResult::StageChanged(to),
        }
    }

    /// Runs one chat turn for typed text.
    ///
    /// Blank input is a no-op. Before the wizard is complete this returns
    /// `GuideError::WizardIncomplete` and logs nothing. Completion failures
    /// are not errors here: they are logged as the assistant's reply and
    /// reported as [`InteractionResult::TurnFailed`], leaving the profile,
    /// the earlier log and the suggestions as they were.
    pub async fn handle_input(&mut self, text: &str) -> Result<InteractionResult> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(InteractionResult::NoOp);
        }
        self.run_turn(text.to_string()).await
    }

    /// Sends the `index`-th (0-based) suggestion as if it had been typed.
    /// The stored text is sent unchanged.
    pub async fn select_suggestion(&mut self, index: usize) -> Result<InteractionResult> {
        match self.session.suggestions().get(index).map(str::to_string) {
            Some(question) => self.run_turn(question).await,
            None => Ok(InteractionResult::NoOp),
        }
    }

    async fn run_turn(&mut self, text: String) -> Result<InteractionResult> {
        self.session.push_user(text.as_str())?;
        tracing::info!(
            "[InteractionManager] turn {} started",
            self.session.log().len()
        );

        let result = match self.client.try_generate(&text, self.session.profile()).await {
            Ok(completion) => {
                let suggestions_changed = self
                    .session
                    .push_assistant(completion.answer.clone(), &completion.suggestions);
                InteractionResult::Answer {
                    text: completion.answer,
                    suggestions_changed,
                }
            }
            Err(error) => {
                let failed = Completion::from_error(&error);
                self.session.push_assistant(failed.answer.clone(), &failed.suggestions);
                InteractionResult::TurnFailed {
                    error,
                    text: failed.answer,
                }
            }
        };
        Ok(result)
    }

    pub fn reset(&mut self) -> InteractionResult {
        self.session.reset();
        InteractionResult::Reset
    }

    /// Rows for the profile panel. While the wizard runs, only the current
    /// question is shown.
    pub fn profile_panel(&self) -> Vec<(&'static str, String)> {
        if !self.session.is_chat_ready() {
            return vec![("Current step", self.stage().question().to_string())];
        }
        let profile = self.session.profile();
        vec![
            ("Location", profile.location().to_string()),
            ("Visa", profile.visa_status().to_string()),
            ("Academic type", profile.academic_type().to_string()),
            ("Action", profile.immigration_need().to_string()),
        ]
    }
}
