//! Job postings shown on `/jobs` and offered on the application form.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Publication status of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum JobStatus {
    Active,
    Inactive,
}

impl JobStatus {
    /// Storage spelling; only `Active` is matched on read.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// Anything other than `Active` is treated as inactive.
    pub fn from_stored(raw: &str) -> Self {
        if raw == "Active" {
            Self::Active
        } else {
            Self::Inactive
        }
    }
}

/// A published job advert.
///
/// The multi-line columns are exposed as bullet lists; see
/// [`bullet_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub reference: String,
    pub title: String,
    pub status: JobStatus,
    pub overview: String,
    pub salary_range: String,
    pub reports_to: String,
    pub location: String,
    pub job_type: String,
    pub key_responsibilities: Vec<String>,
    pub essential_requirements: Vec<String>,
    pub preferable_skills: Vec<String>,
    pub posted_date: NaiveDate,
}

/// Reference and title pair offered in the application form's job selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JobSummary {
    pub reference: String,
    pub title: String,
}

impl From<&JobPosting> for JobSummary {
    fn from(posting: &JobPosting) -> Self {
        Self {
            reference: posting.reference.clone(),
            title: posting.title.clone(),
        }
    }
}

/// Split a stored multi-line column into bullet items.
///
/// Lines are split on `\n`, stripped of leading/trailing `•` and
/// whitespace, and blank lines are dropped.
///
/// # Examples
/// ```
/// use careers::domain::bullet_items;
///
/// let items = bullet_items("• Build UIs\r\n\n•Review code •\n");
/// assert_eq!(items, vec!["Build UIs", "Review code"]);
/// ```
pub fn bullet_items(text: &str) -> Vec<String> {
    text.split('\n')
        .map(|line| line.trim_matches(|ch: char| ch == '•' || ch.is_whitespace()))
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}
