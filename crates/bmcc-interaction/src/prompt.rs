//! System instruction sent with every completion request.

use bmcc_core::{ApplicantProfile, KnowledgeBase, Result};
use minijinja::{Environment, context};

const SYSTEM_INSTRUCTION_TEMPLATE: &str = r#"You are an expert International Admissions Advisor for BMCC (CUNY).

CONTEXT:
{{ knowledge }}

USER PROFILE: {{ profile }}

RULES:
1. Answer ONLY based on the context and user profile.
2. If user is F-1 at an ESL school, treat them as an ACADEMIC FRESHMAN but explain the SEVIS TRANSFER process.
3. If user is B1/B2/J1, EXPLICITLY state BMCC only provides the I-20 and they MUST consult a lawyer for status change.
4. Keep answers concise, friendly, and structured (Step 1, Step 2, Step 3).
5. Format any link found in the context as markdown: [title](url).

Respond with a JSON object of exactly this shape:
{"answer": "<your answer>", "suggestions": ["<question>", "<question>", "<question>"]}
"suggestions" must hold exactly 3 short follow-up questions the user is likely to ask next, each one step further along their application."#;

/// Renders the instruction block for one request: persona, knowledge,
/// profile summary, answer rules and the response shape.
pub fn render_system_instruction(
    knowledge: &KnowledgeBase,
    profile: &ApplicantProfile,
) -> Result<String> {
    let env = Environment::new();
    let text = env.render_str(
        SYSTEM_INSTRUCTION_TEMPLATE,
        context! {
            knowledge => knowledge.text().trim_end(),
            profile => profile.summary(),
        },
    )?;
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bmcc_core::{Session, WizardChoice};

    #[test]
    fn test_instruction_embeds_knowledge_and_profile() {
        let mut session = Session::new();
        session.choose(WizardChoice::InsideUs);
        session.choose(WizardChoice::B1B2Visitor);

        let knowledge = KnowledgeBase::new("DEADLINES:\n- Fall: Feb 1.");
        let text = render_system_instruction(&knowledge, session.profile()).unwrap();

        assert!(text.starts_with("You are an expert International Admissions Advisor"));
        assert!(text.contains("DEADLINES:\n- Fall: Feb 1."));
        assert!(text.contains("USER PROFILE: User is Inside US. Visa Status: B-1/B-2 Visitor."));
        assert!(text.contains("MUST consult a lawyer"));
        assert!(text.contains(r#""suggestions""#));
        assert!(text.contains("exactly 3"));
    }

    #[test]
    fn test_knowledge_is_not_html_escaped() {
        let knowledge = KnowledgeBase::new("Fee: $65 <CUNY> & \"apply\"");
        let text =
            render_system_instruction(&knowledge, &ApplicantProfile::default()).unwrap();
        assert!(text.contains("Fee: $65 <CUNY> & \"apply\""));
    }
}
