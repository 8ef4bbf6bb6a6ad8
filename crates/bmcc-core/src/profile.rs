//! Applicant profile built by the intake wizard.
//!
//! Every field starts as `Unset`. Fields are only written by the wizard's
//! transition table (see [`crate::wizard`]); the derived fields
//! (`academic_type`, `immigration_need`) have no public setter at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where the applicant is right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Location {
    #[default]
    Unset,
    InsideUs,
    OutsideUs,
}

impl Location {
    pub fn label(self) -> &'static str {
        match self {
            Location::Unset => "Not provided",
            Location::InsideUs => "Inside US",
            Location::OutsideUs => "Outside US",
        }
    }
}

/// Current US visa held by the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VisaStatus {
    #[default]
    Unset,
    /// No US visa (applicant is abroad).
    None,
    F1Student,
    B1B2Visitor,
    J1Exchange,
    Other,
}

impl VisaStatus {
    pub fn label(self) -> &'static str {
        match self {
            VisaStatus::Unset => "Not provided",
            VisaStatus::None => "None",
            VisaStatus::F1Student => "F-1 Student",
            VisaStatus::B1B2Visitor => "B-1/B-2 Visitor",
            VisaStatus::J1Exchange => "J-1 Exchange",
            VisaStatus::Other => "Other",
        }
    }
}

/// School currently attended by an F-1 holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SchoolType {
    #[default]
    Unset,
    University,
    Esl,
}

impl SchoolType {
    pub fn label(self) -> &'static str {
        match self {
            SchoolType::Unset => "Not provided",
            SchoolType::University => "University",
            SchoolType::Esl => "ESL School",
        }
    }
}

/// Admission category, derived from school type or education history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum AcademicType {
    #[default]
    Unset,
    Freshman,
    Transfer,
}

impl AcademicType {
    pub fn label(self) -> &'static str {
        match self {
            AcademicType::Unset => "Not determined",
            AcademicType::Freshman => "International Freshman",
            AcademicType::Transfer => "International Transfer",
        }
    }
}

/// Immigration action the applicant will have to take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ImmigrationNeed {
    #[default]
    Unset,
    ApplyForF1Visa,
    SevisTransfer,
    ChangeOfStatus,
    ConsularProcessing,
    ConsultOffice,
}

impl ImmigrationNeed {
    pub fn label(self) -> &'static str {
        match self {
            ImmigrationNeed::Unset => "Not determined",
            ImmigrationNeed::ApplyForF1Visa => "Apply for F-1 Visa",
            ImmigrationNeed::SevisTransfer => "SEVIS Transfer",
            ImmigrationNeed::ChangeOfStatus => "Change of Status (Requires Lawyer)",
            ImmigrationNeed::ConsularProcessing => "Consular Processing (Travel and Apply Abroad)",
            ImmigrationNeed::ConsultOffice => "Consult International Office",
        }
    }
}

macro_rules! display_via_label {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

display_via_label!(Location, VisaStatus, SchoolType, AcademicType, ImmigrationNeed);

/// The applicant profile for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantProfile {
    location: Location,
    visa_status: VisaStatus,
    school_type: SchoolType,
    academic_type: AcademicType,
    immigration_need: ImmigrationNeed,
}

impl ApplicantProfile {
    pub fn location(&self) -> Location {
        self.location
    }

    pub fn visa_status(&self) -> VisaStatus {
        self.visa_status
    }

    pub fn school_type(&self) -> SchoolType {
        self.school_type
    }

    pub fn academic_type(&self) -> AcademicType {
        self.academic_type
    }

    pub fn immigration_need(&self) -> ImmigrationNeed {
        self.immigration_need
    }

    /// True when no field has been written yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// One-paragraph summary of every field, as given to the model.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "User is {}. Visa Status: {}. ",
            self.location, self.visa_status
        );
        if self.visa_status == VisaStatus::F1Student {
            summary.push_str(&format!("Current School: {}. ", self.school_type));
        }
        summary.push_str(&format!(
            "Academic Type: {}. Immigration Need: {}.",
            self.academic_type, self.immigration_need
        ));
        summary
    }

    pub(crate) fn apply(&mut self, write: &ProfileWrite) {
        if let Some(location) = write.location {
            self.location = location;
        }
        if let Some(visa_status) = write.visa_status {
            self.visa_status = visa_status;
        }
        if let Some(school_type) = write.school_type {
            self.school_type = school_type;
        }
        if let Some(academic_type) = write.academic_type {
            self.academic_type = academic_type;
        }
        if let Some(immigration_need) = write.immigration_need {
            self.immigration_need = immigration_need;
        }
    }
}

/// Field writes carried by a single wizard transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ProfileWrite {
    pub location: Option<Location>,
    pub visa_status: Option<VisaStatus>,
    pub school_type: Option<SchoolType>,
    pub academic_type: Option<AcademicType>,
    pub immigration_need: Option<ImmigrationNeed>,
}
