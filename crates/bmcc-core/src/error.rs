//! Error types for the BMCC guide.

use thiserror::Error;

/// A shared error type for the whole guide.
///
/// Every variant is scoped to the single action that raised it. None of them
/// leave the applicant profile, the wizard stage or earlier conversation
/// entries in a modified state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuideError {
    /// No API key could be found in `secret.json` or the environment.
    #[error("Gemini API key is not configured")]
    MissingCredential,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The completion endpoint kept answering 503 until the attempt budget ran out.
    #[error("Completion service is overloaded (gave up after {attempts} attempts)")]
    ServiceBusy { attempts: u32 },

    /// Non-success HTTP status other than 503.
    #[error("Completion service returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// Connection-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// A single attempt exceeded its time ceiling.
    #[error("Request timed out")]
    Timeout,

    /// The model answered, but not with the `answer`/`suggestions` object.
    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Prompt or greeting template failed to render.
    #[error("Template error: {0}")]
    Template(String),

    /// Chat was requested before the profile questions were answered.
    #[error("The applicant profile is not complete yet")]
    WizardIncomplete,
}

impl GuideError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a missing-credential error
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, Self::MissingCredential)
    }

    /// Check if the service gave up after repeated overload responses
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::ServiceBusy { .. })
    }

    /// Check if this is a malformed-response error
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse(_))
    }

    /// Check if this is a transport failure (network or timeout)
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Timeout)
    }

    /// Text shown to the applicant in place of an answer.
    pub fn user_message(&self) -> String {
        match self {
            Self::MissingCredential => {
                "Error: API key missing. Add your Gemini key to secret.json or set GEMINI_API_KEY."
                    .to_string()
            }
            Self::ServiceBusy { .. } => {
                "The advising service is busy right now, please try again in a moment.".to_string()
            }
            Self::Http { status, message } => {
                format!("Error connecting to AI: {status} ({message})")
            }
            Self::Network(detail) => format!("Error: could not reach the AI service ({detail})"),
            Self::Timeout => "Error: the AI service did not answer within the time limit.".to_string(),
            Self::MalformedResponse(detail) => {
                format!("Error: the AI service returned an answer I could not read ({detail})")
            }
            Self::WizardIncomplete => {
                "Please finish the profile questions before asking a question.".to_string()
            }
            other => format!("Error: {other}"),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for GuideError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for GuideError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for GuideError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<minijinja::Error> for GuideError {
    fn from(err: minijinja::Error) -> Self {
        Self::Template(err.to_string())
    }
}

/// A type alias for `Result<T, GuideError>`.
pub type Result<T> = std::result::Result<T, GuideError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_keeps_status_code() {
        let err = GuideError::Http {
            status: 400,
            message: "INVALID_ARGUMENT: bad key".to_string(),
        };
        let text = err.user_message();
        assert!(text.contains("400"));
        assert!(text.contains("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_predicates() {
        assert!(GuideError::MissingCredential.is_missing_credential());
        assert!(GuideError::ServiceBusy { attempts: 5 }.is_busy());
        assert!(GuideError::malformed("no answer key").is_malformed());
        assert!(GuideError::Timeout.is_transport());
        assert!(GuideError::network("refused").is_transport());
        assert!(!GuideError::config("x").is_transport());
    }

    #[test]
    fn test_from_json_error() {
        let err: GuideError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        match err {
            GuideError::Serialization { format, .. } => assert_eq!(format, "JSON"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
