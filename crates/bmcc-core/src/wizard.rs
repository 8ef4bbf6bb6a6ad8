//! Intake wizard: named stages and their transition table.
//!
//! The wizard is a small decision tree. Each stage offers a fixed set of
//! choices; picking one writes a few profile fields and moves to the next
//! stage. Choices that do not belong to the current stage are ignored.

use crate::profile::{
    AcademicType, ApplicantProfile, ImmigrationNeed, Location, ProfileWrite, SchoolType,
    VisaStatus,
};
use serde::{Deserialize, Serialize};

/// A stage of the intake wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WizardStage {
    #[default]
    AskLocation,
    AskVisaStatus,
    /// Only reachable for F-1 holders.
    AskSchoolType,
    /// Only reachable for non-F-1 visa holders inside the US.
    AskStatusPlan,
    AskEducationHistory,
    /// Terminal stage; the profile no longer changes.
    ChatReady,
}

/// A button the applicant can press during the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WizardChoice {
    InsideUs,
    OutsideUs,
    F1Student,
    B1B2Visitor,
    J1Exchange,
    OtherVisa,
    University,
    EslSchool,
    ChangeStatusInside,
    TravelAndApplyOutside,
    NotSureYet,
    HighSchoolOnly,
    SomeUniversity,
}

impl WizardChoice {
    /// Button caption.
    pub fn label(self) -> &'static str {
        match self {
            WizardChoice::InsideUs => "I am Inside the US",
            WizardChoice::OutsideUs => "I am Outside the US",
            WizardChoice::F1Student => "F-1 Student",
            WizardChoice::B1B2Visitor => "B-1 / B-2 (Visitor)",
            WizardChoice::J1Exchange => "J-1 (Exchange)",
            WizardChoice::OtherVisa => "Other / Not Sure",
            WizardChoice::University => "I attend a College or University",
            WizardChoice::EslSchool => "I attend an ESL / Language School",
            WizardChoice::ChangeStatusInside => "Change my status inside the US",
            WizardChoice::TravelAndApplyOutside => "Travel and apply for the visa outside the US",
            WizardChoice::NotSureYet => "I'm not sure yet",
            WizardChoice::HighSchoolOnly => "I have High School / Secondary School only",
            WizardChoice::SomeUniversity => {
                "I have attended some University (Inside or Outside US)"
            }
        }
    }
}

impl WizardStage {
    /// Question shown for this stage.
    pub fn question(self) -> &'static str {
        match self {
            WizardStage::AskLocation => "Step 1: Where are you currently located?",
            WizardStage::AskVisaStatus => "Step 2: What is your current Visa Status?",
            WizardStage::AskSchoolType => "Step 2b: What type of school do you attend?",
            WizardStage::AskStatusPlan => {
                "Step 2b: How do you plan to get F-1 student status?"
            }
            WizardStage::AskEducationHistory => "Step 3: What is your education history?",
            WizardStage::ChatReady => "Profile complete. Ask me anything about applying to BMCC.",
        }
    }

    /// Extra guidance printed under the question, if any.
    pub fn hint(self) -> Option<&'static str> {
        match self {
            WizardStage::AskSchoolType => {
                Some("This determines if you apply as a Transfer student or a Freshman.")
            }
            WizardStage::AskStatusPlan => Some(
                "Changing status inside the US requires an immigration lawyer; \
                 you cannot study until it is approved.",
            ),
            _ => None,
        }
    }

    /// Choices offered at this stage, in display order.
    pub fn choices(self) -> &'static [WizardChoice] {
        use WizardChoice::*;
        match self {
            WizardStage::AskLocation => &[InsideUs, OutsideUs],
            WizardStage::AskVisaStatus => &[F1Student, B1B2Visitor, J1Exchange, OtherVisa],
            WizardStage::AskSchoolType => &[University, EslSchool],
            WizardStage::AskStatusPlan => &[ChangeStatusInside, TravelAndApplyOutside, NotSureYet],
            WizardStage::AskEducationHistory => &[HighSchoolOnly, SomeUniversity],
            WizardStage::ChatReady => &[],
        }
    }

    pub fn is_terminal(self) -> bool {
        self == WizardStage::ChatReady
    }
}

/// Transition table: `(stage, choice) -> (next stage, field writes)`.
///
/// Returns `None` for any pair not listed, which leaves the wizard untouched.
pub(crate) fn transition(
    stage: WizardStage,
    choice: WizardChoice,
) -> Option<(WizardStage, ProfileWrite)> {
    use WizardChoice as C;
    use WizardStage as S;

    let none = ProfileWrite::default();
    let step = match (stage, choice) {
        (S::AskLocation, C::InsideUs) => (
            S::AskVisaStatus,
            ProfileWrite {
                location: Some(Location::InsideUs),
                ..none
            },
        ),
        (S::AskLocation, C::OutsideUs) => (
            S::AskEducationHistory,
            ProfileWrite {
                location: Some(Location::OutsideUs),
                visa_status: Some(VisaStatus::None),
                immigration_need: Some(ImmigrationNeed::ApplyForF1Visa),
                ..none
            },
        ),

        (S::AskVisaStatus, C::F1Student) => (
            S::AskSchoolType,
            ProfileWrite {
                visa_status: Some(VisaStatus::F1Student),
                immigration_need: Some(ImmigrationNeed::SevisTransfer),
                ..none
            },
        ),
        (S::AskVisaStatus, C::B1B2Visitor) => (
            S::AskStatusPlan,
            ProfileWrite {
                visa_status: Some(VisaStatus::B1B2Visitor),
                ..none
            },
        ),
        (S::AskVisaStatus, C::J1Exchange) => (
            S::AskStatusPlan,
            ProfileWrite {
                visa_status: Some(VisaStatus::J1Exchange),
                ..none
            },
        ),
        (S::AskVisaStatus, C::OtherVisa) => (
            S::AskStatusPlan,
            ProfileWrite {
                visa_status: Some(VisaStatus::Other),
                ..none
            },
        ),

        (S::AskSchoolType, C::University) => (
            S::ChatReady,
            ProfileWrite {
                school_type: Some(SchoolType::University),
                academic_type: Some(AcademicType::Transfer),
                ..none
            },
        ),
        // ESL-school F-1 holders enter as freshmen regardless of prior enrollment.
        (S::AskSchoolType, C::EslSchool) => (
            S::ChatReady,
            ProfileWrite {
                school_type: Some(SchoolType::Esl),
                academic_type: Some(AcademicType::Freshman),
                ..none
            },
        ),

        (S::AskStatusPlan, C::ChangeStatusInside) => (
            S::AskEducationHistory,
            ProfileWrite {
                immigration_need: Some(ImmigrationNeed::ChangeOfStatus),
                ..none
            },
        ),
        (S::AskStatusPlan, C::TravelAndApplyOutside) => (
            S::AskEducationHistory,
            ProfileWrite {
                immigration_need: Some(ImmigrationNeed::ConsularProcessing),
                ..none
            },
        ),
        (S::AskStatusPlan, C::NotSureYet) => (
            S::AskEducationHistory,
            ProfileWrite {
                immigration_need: Some(ImmigrationNeed::ConsultOffice),
                ..none
            },
        ),

        (S::AskEducationHistory, C::HighSchoolOnly) => (
            S::ChatReady,
            ProfileWrite {
                academic_type: Some(AcademicType::Freshman),
                ..none
            },
        ),
        (S::AskEducationHistory, C::SomeUniversity) => (
            S::ChatReady,
            ProfileWrite {
                academic_type: Some(AcademicType::Transfer),
                ..none
            },
        ),

        _ => return None,
    };
    Some(step)
}

/// Result of feeding one choice to the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The choice was accepted and the stage moved.
    Advanced { from: WizardStage, to: WizardStage },
    /// The choice is not offered at the current stage; nothing changed.
    Ignored,
}

impl Transition {
    /// True when this transition just entered the terminal stage.
    pub fn completed_profile(&self) -> bool {
        matches!(self, Transition::Advanced { to, .. } if to.is_terminal())
    }
}

/// Wizard state for one session: the active stage plus the profile it builds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    stage: WizardStage,
    profile: ApplicantProfile,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage(&self) -> WizardStage {
        self.stage
    }

    pub fn profile(&self) -> &ApplicantProfile {
        &self.profile
    }

    /// Applies one choice. Field writes and the stage change happen together
    /// or not at all.
    pub fn choose(&mut self, choice: WizardChoice) -> Transition {
        let from = self.stage;
        match transition(from, choice) {
            Some((to, write)) => {
                self.profile.apply(&write);
                self.stage = to;
                tracing::info!("[Wizard] {:?} --{:?}--> {:?}", from, choice, to);
                Transition::Advanced { from, to }
            }
            None => {
                tracing::debug!("[Wizard] ignored {:?} at {:?}", choice, from);
                Transition::Ignored
            }
        }
    }

    /// Picks the n-th choice (0-based) offered at the current stage.
    pub fn choose_index(&mut self, index: usize) -> Transition {
        match self.stage.choices().get(index) {
            Some(choice) => self.choose(*choice),
            None => Transition::Ignored,
        }
    }

    /// Back to `AskLocation` with a blank profile.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
