//! Expressions of interest: the job applications submitted through `/apply`.
//!
//! Closed vocabularies (states, genders, skills, statuses) are enums with a
//! stable wire/storage spelling so handlers and adapters never pass free
//! strings around once a submission has been validated.

mod query;
mod validation;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub use query::{EoiFilter, EoiQuery, FilterKind, SortDirection, SortField};
pub use validation::{DATE_INPUT_FORMAT, MAX_AGE, MIN_AGE, validate_eoi};

/// Sequential EOI number assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EoiId(i32);

impl EoiId {
    /// Wrap a raw EOI number.
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    /// Raw EOI number.
    pub const fn get(self) -> i32 {
        self.0
    }
}

impl fmt::Display for EoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a closed-vocabulary value is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} `{value}`")]
pub struct UnknownValue {
    kind: &'static str,
    value: String,
}

impl UnknownValue {
    fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Generates `as_str`, `ALL`, `Display` and `FromStr` for a closed
/// vocabulary enum from its variant/spelling table.
macro_rules! closed_vocabulary {
    ($name:ident, $kind:literal, { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $name {
            /// Every value in display order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Stable spelling used on forms and in storage.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text),+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = UnknownValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok(Self::$variant),)+
                    other => Err(UnknownValue::new($kind, other)),
                }
            }
        }
    };
}

/// Review status of an application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum EoiStatus {
    #[default]
    New,
    Current,
    Final,
}

closed_vocabulary!(EoiStatus, "status", {
    New => "New",
    Current => "Current",
    Final => "Final",
});

/// Australian state or territory code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum AustralianState {
    Vic,
    Nsw,
    Qld,
    Nt,
    Wa,
    Sa,
    Tas,
    Act,
}

closed_vocabulary!(AustralianState, "state", {
    Vic => "VIC",
    Nsw => "NSW",
    Qld => "QLD",
    Nt => "NT",
    Wa => "WA",
    Sa => "SA",
    Tas => "TAS",
    Act => "ACT",
});

impl AustralianState {
    /// Inclusive postcode range allocated to the state.
    pub const fn postcode_range(self) -> (u16, u16) {
        match self {
            Self::Vic => (3000, 3999),
            Self::Nsw => (2000, 2999),
            Self::Qld => (4000, 4999),
            Self::Nt => (800, 999),
            Self::Wa => (6000, 6999),
            Self::Sa => (5000, 5999),
            Self::Tas => (7000, 7999),
            Self::Act => (2600, 2699),
        }
    }

    /// Full name shown in the state selector.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vic => "Victoria",
            Self::Nsw => "New South Wales",
            Self::Qld => "Queensland",
            Self::Nt => "Northern Territory",
            Self::Wa => "Western Australia",
            Self::Sa => "South Australia",
            Self::Tas => "Tasmania",
            Self::Act => "Australian Capital Territory",
        }
    }

    /// Whether `postcode` falls inside the state's range.
    pub fn accepts_postcode(self, postcode: u16) -> bool {
        let (low, high) = self.postcode_range();
        (low..=high).contains(&postcode)
    }
}

/// Gender choices offered on the application form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Gender {
    Male,
    Female,
    NonBinary,
    PreferNotToSay,
}

closed_vocabulary!(Gender, "gender", {
    Male => "male",
    Female => "female",
    NonBinary => "non-binary",
    PreferNotToSay => "prefer-not-to-say",
});

impl Gender {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::NonBinary => "Non-binary",
            Self::PreferNotToSay => "Prefer not to say",
        }
    }
}

/// Technical skill tags; at most one column per tag in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Html5,
    Css3,
    Javascript,
    React,
    Vue,
    Typescript,
    Git,
    Responsive,
}

closed_vocabulary!(Skill, "skill", {
    Html5 => "html5",
    Css3 => "css3",
    Javascript => "javascript",
    React => "react",
    Vue => "vue",
    Typescript => "typescript",
    Git => "git",
    Responsive => "responsive",
});

impl Skill {
    /// Label shown next to the checkbox.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Html5 => "HTML5",
            Self::Css3 => "CSS3",
            Self::Javascript => "JavaScript",
            Self::React => "React",
            Self::Vue => "Vue.js",
            Self::Typescript => "TypeScript",
            Self::Git => "Git",
            Self::Responsive => "Responsive Design",
        }
    }
}

/// Raw application form values exactly as submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EoiSubmission {
    pub job_reference: String,
    pub first_name: String,
    pub last_name: String,
    /// `DD/MM/YYYY`.
    pub date_of_birth: String,
    pub gender: String,
    pub street_address: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<String>,
    pub other_skills: String,
}

/// A validated, normalised application ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEoi {
    pub job_reference: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub street_address: String,
    pub suburb: String,
    pub state: AustralianState,
    /// Four ASCII digits, leading zeros kept.
    pub postcode: String,
    pub email: String,
    /// Digits only.
    pub phone: String,
    pub skills: Vec<Skill>,
    pub other_skills: String,
}

impl NewEoi {
    /// Whether `skill` was ticked.
    pub fn has_skill(&self, skill: Skill) -> bool {
        self.skills.contains(&skill)
    }
}

/// A stored application as listed on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Eoi {
    pub id: EoiId,
    pub job_reference: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub street_address: String,
    pub suburb: String,
    pub state: AustralianState,
    pub postcode: String,
    pub email: String,
    pub phone: String,
    pub skills: Vec<Skill>,
    pub other_skills: String,
    pub status: EoiStatus,
    pub submitted_date: DateTime<Utc>,
}

impl Eoi {
    /// Assemble the stored record for a freshly inserted application.
    pub fn from_new(id: EoiId, new: NewEoi, submitted_date: DateTime<Utc>) -> Self {
        Self {
            id,
            job_reference: new.job_reference,
            first_name: new.first_name,
            last_name: new.last_name,
            date_of_birth: new.date_of_birth,
            gender: new.gender,
            street_address: new.street_address,
            suburb: new.suburb,
            state: new.state,
            postcode: new.postcode,
            email: new.email,
            phone: new.phone,
            skills: new.skills,
            other_skills: new.other_skills,
            status: EoiStatus::New,
            submitted_date,
        }
    }

    /// Date of birth in the `DD/MM/YYYY` display form.
    pub fn display_date_of_birth(&self) -> String {
        self.date_of_birth.format(DATE_INPUT_FORMAT).to_string()
    }
}

/// Confirmation returned after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EoiReceipt {
    pub eoi_number: EoiId,
    pub first_name: String,
    pub last_name: String,
    pub job_reference: String,
    pub email: String,
}
