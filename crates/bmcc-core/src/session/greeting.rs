//! Greeting added to the log when the wizard completes.

use crate::error::Result;
use crate::profile::{ApplicantProfile, ImmigrationNeed};
use minijinja::{Environment, context};

const GREETING_TEMPLATE: &str = "Welcome! Based on your answers, you are an **{{ academic_type }}**.\
{% if path == \"sevis\" %} Since you are on F-1, I can guide you through the **SEVIS Transfer** process.\
{% elif path == \"change_of_status\" %} ⚠️ **Important:** Since your current status is {{ visa }}, you will need a **Change of Status**. BMCC can provide the I-20, but you must work with an immigration lawyer for the legal process, and you cannot start classes until the change is approved.\
{% elif path == \"consular\" %} Your path is: get accepted to BMCC, receive your **I-20**, travel to your home country, and attend your **F-1 visa interview** at a US consulate before returning to study.\
{% else %} I can help you with the application and **F-1 Visa Interview** steps.\
{% endif %}";

fn clause_key(need: ImmigrationNeed) -> &'static str {
    match need {
        ImmigrationNeed::SevisTransfer => "sevis",
        ImmigrationNeed::ChangeOfStatus => "change_of_status",
        ImmigrationNeed::ConsularProcessing => "consular",
        ImmigrationNeed::ApplyForF1Visa
        | ImmigrationNeed::ConsultOffice
        | ImmigrationNeed::Unset => "general",
    }
}

/// Renders the greeting for a completed profile. Same profile, same text.
pub fn render_greeting(profile: &ApplicantProfile) -> Result<String> {
    let env = Environment::new();
    let text = env.render_str(
        GREETING_TEMPLATE,
        context! {
            academic_type => profile.academic_type().label(),
            visa => profile.visa_status().label(),
            path => clause_key(profile.immigration_need()),
        },
    )?;
    Ok(text)
}
