//! Grounding facts sent with every completion request.

use std::sync::Arc;

const BMCC_FACTS: &str = r#"GENERAL BMCC RULES:
- BMCC is a CUNY college. Applications go through CUNY.
- Application Fee: $65.
- English Proficiency: TOEFL (45), IELTS (5.0), Duolingo (75), or PTE (39).
- Exempt from English test if: From English-speaking country or completed English Comp I at a US college with C or better.

TRANSCRIPT EVALUATION (For education outside US):
- Must use a NACES member agency (like WES, ECE, Josef Silny).
- Required for all students with non-US transcripts.

SEVIS TRANSFER (For F-1 Students Currently in US):
- ACADEMIC STATUS: If coming from ESL school -> Apply as Freshman. If coming from University -> Apply as Transfer.
- IMMIGRATION STATUS: Both must do "SEVIS Transfer".
- Process: 1. Get Acceptance Letter. 2. Fill out Transfer Release Form. 3. Current school releases SEVIS record.

CHANGE OF STATUS (B1/B2/J1 to F-1):
- BMCC does NOT assist with the legal application (Form I-539).
- BMCC ONLY provides the Form I-20 labeled "Initial Attendance - Change of Status".
- User must consult an immigration lawyer.
- B1/B2 holders CANNOT study until status is officially changed to F-1.

DEADLINES:
- Fall: Feb 1 (Priority).
- Spring: Sep 15 (Priority).
"#;

/// Opaque block of admission facts. Never parsed, only passed along.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeBase {
    text: Arc<str>,
}

impl KnowledgeBase {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: Arc::from(text.into()),
        }
    }

    /// The built-in BMCC international admissions facts.
    pub fn bmcc() -> Self {
        Self::new(BMCC_FACTS)
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        Self::bmcc()
    }
}
