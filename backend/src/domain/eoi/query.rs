//! Dashboard filter and sort selections.
//!
//! Raw query-string values are folded into closed enums here; anything
//! unrecognised falls back to a safe default instead of failing, so no
//! caller-supplied text ever reaches the SQL as an identifier.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Eoi;

/// Which column(s) a dashboard filter applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Exact match on the job reference.
    JobReference,
    /// Case-insensitive substring of the first name.
    FirstName,
    /// Case-insensitive substring of the last name.
    LastName,
    /// Case-insensitive substring of either name.
    BothNames,
}

impl FilterKind {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "job_reference" => Some(Self::JobReference),
            "first_name" => Some(Self::FirstName),
            "last_name" => Some(Self::LastName),
            "both_names" => Some(Self::BothNames),
            _ => None,
        }
    }
}

/// A filter with a non-empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct EoiFilter {
    kind: FilterKind,
    value: String,
}

impl EoiFilter {
    /// Build a filter; `None` when the trimmed value is empty.
    pub fn new(kind: FilterKind, value: &str) -> Option<Self> {
        let value = value.trim();
        (!value.is_empty()).then(|| Self {
            kind,
            value: value.to_owned(),
        })
    }

    /// Column selection.
    pub fn kind(&self) -> FilterKind {
        self.kind
    }

    /// Trimmed search value exactly as typed.
    pub fn value(&self) -> &str {
        self.value.as_str()
    }

    /// `ILIKE` pattern matching the value anywhere, with `\`, `%` and `_`
    /// escaped so they match literally.
    ///
    /// # Examples
    /// ```
    /// use careers::domain::eoi::{EoiFilter, FilterKind};
    ///
    /// let filter = EoiFilter::new(FilterKind::FirstName, "50%_off").unwrap();
    /// assert_eq!(filter.like_pattern(), r"%50\%\_off%");
    /// ```
    pub fn like_pattern(&self) -> String {
        let mut pattern = String::with_capacity(self.value.len() + 2);
        pattern.push('%');
        for ch in self.value.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        pattern
    }

    /// Evaluate the filter against a stored application.
    pub fn matches(&self, eoi: &Eoi) -> bool {
        let needle = self.value.to_lowercase();
        let contains = |haystack: &str| haystack.to_lowercase().contains(&needle);
        match self.kind {
            FilterKind::JobReference => eoi.job_reference == self.value,
            FilterKind::FirstName => contains(&eoi.first_name),
            FilterKind::LastName => contains(&eoi.last_name),
            FilterKind::BothNames => contains(&eoi.first_name) || contains(&eoi.last_name),
        }
    }
}

/// Sortable dashboard columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    Id,
    JobReference,
    FirstName,
    LastName,
    #[default]
    SubmittedDate,
    Status,
}

impl SortField {
    /// Parse a column name, falling back to `submitted_date`.
    pub fn parse_or_default(raw: &str) -> Self {
        match raw {
            "id" | "EOInumber" => Self::Id,
            "job_reference" => Self::JobReference,
            "first_name" => Self::FirstName,
            "last_name" => Self::LastName,
            "submitted_date" => Self::SubmittedDate,
            "status" => Self::Status,
            _ => Self::default(),
        }
    }

    fn compare(self, a: &Eoi, b: &Eoi) -> Ordering {
        match self {
            Self::Id => a.id.get().cmp(&b.id.get()),
            Self::JobReference => a.job_reference.cmp(&b.job_reference),
            Self::FirstName => a.first_name.cmp(&b.first_name),
            Self::LastName => a.last_name.cmp(&b.last_name),
            Self::SubmittedDate => a.submitted_date.cmp(&b.submitted_date),
            Self::Status => a.status.as_str().cmp(b.status.as_str()),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// `ASC` selects ascending; anything else is descending.
    pub fn parse_or_default(raw: &str) -> Self {
        if raw == "ASC" { Self::Asc } else { Self::Desc }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Asc => ordering,
            Self::Desc => ordering.reverse(),
        }
    }
}

/// Complete dashboard read request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EoiQuery {
    pub filter: Option<EoiFilter>,
    pub sort: SortField,
    pub direction: SortDirection,
}

impl EoiQuery {
    /// Fold raw query-string values into a query, dropping anything
    /// unrecognised.
    ///
    /// # Examples
    /// ```
    /// use careers::domain::eoi::{EoiQuery, SortDirection, SortField};
    ///
    /// let query = EoiQuery::from_raw(None, None, Some("status; DROP TABLE eoi"), Some("up"));
    /// assert_eq!(query.sort, SortField::SubmittedDate);
    /// assert_eq!(query.direction, SortDirection::Desc);
    /// assert!(query.filter.is_none());
    /// ```
    pub fn from_raw(
        filter_type: Option<&str>,
        filter_value: Option<&str>,
        sort: Option<&str>,
        direction: Option<&str>,
    ) -> Self {
        let filter = filter_type
            .and_then(FilterKind::parse)
            .zip(filter_value)
            .and_then(|(kind, value)| EoiFilter::new(kind, value));
        Self {
            filter,
            sort: sort.map(SortField::parse_or_default).unwrap_or_default(),
            direction: direction
                .map(SortDirection::parse_or_default)
                .unwrap_or_default(),
        }
    }

    /// Order two applications: by the sort column, then by id, both in the
    /// selected direction.
    pub fn compare(&self, a: &Eoi, b: &Eoi) -> Ordering {
        let primary = self.sort.compare(a, b);
        let ordering = primary.then_with(|| a.id.get().cmp(&b.id.get()));
        self.direction.apply(ordering)
    }

    /// Filter and sort an in-memory collection the way the SQL read does.
    pub fn apply(&self, eois: impl IntoIterator<Item = Eoi>) -> Vec<Eoi> {
        let mut selected: Vec<Eoi> = eois
            .into_iter()
            .filter(|eoi| self.filter.as_ref().is_none_or(|filter| filter.matches(eoi)))
            .collect();
        selected.sort_by(|a, b| self.compare(a, b));
        selected
    }
}
