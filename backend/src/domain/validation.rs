//! Shared helpers for accumulate-all form validation.
//!
//! Form validators push every failure into [`ValidationErrors`] rather than
//! returning at the first problem, so the caller can redisplay the whole form
//! with all messages at once.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use serde_json::{Value, json};
use utoipa::ToSchema;

use super::Error;

/// Summary message attached to every form validation failure.
pub const VALIDATION_FAILED_MESSAGE: &str = "Please correct the errors below.";

/// A single failed rule for one form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    /// Form field name as submitted by the client.
    pub field: &'static str,
    /// Human readable message shown next to the field.
    pub message: String,
}

/// Ordered list of field errors, in the order the rules were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Start with no errors recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed rule for `field`.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Whether no rule has failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the recorded failures in check order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Messages only, in check order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|err| err.message.as_str()).collect()
    }

    /// Whether `field` has at least one failure recorded.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|err| err.field == field)
    }

    /// Return `value` when nothing failed, otherwise the accumulated errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }

    /// Convert into an `InvalidRequest` error carrying the failures and the
    /// submitted values so the form can be redisplayed.
    pub fn into_error(self, values: Value) -> Error {
        Error::invalid_request(VALIDATION_FAILED_MESSAGE).with_details(json!({
            "errors": self.0,
            "values": values,
        }))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages = self.messages().join(" ");
        f.write_str(&messages)
    }
}

impl std::error::Error for ValidationErrors {}

/// Longest email address the stores accept.
pub const MAX_EMAIL_LENGTH: usize = 100;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        // Local part, then dot-separated DNS labels with at least one dot.
        Regex::new(
            r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)+$",
        )
        .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Syntactic email check shared by the application and registration forms.
///
/// # Examples
/// ```
/// use careers::domain::is_valid_email;
///
/// assert!(is_valid_email("jane.doe@example.com.au"));
/// assert!(!is_valid_email("jane.doe@localhost"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH
        && !email.contains("..")
        && !email.starts_with('.')
        && email_regex().is_match(email)
}

/// Trim surrounding whitespace and drop backslash escapes.
///
/// Rules that inspect characters run against this form so an escaped
/// apostrophe still counts as an apostrophe.
pub fn clean(input: &str) -> String {
    let trimmed = input.trim();
    let mut unslashed = String::with_capacity(trimmed.len());
    let mut chars = trimmed.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            // A backslash escapes the next character; a doubled one keeps one.
            if let Some(next) = chars.next() {
                unslashed.push(next);
            }
        } else {
            unslashed.push(ch);
        }
    }
    unslashed
}

/// Escape the HTML special characters `& < > " '`.
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Normalise free text from a form for storage: [`clean`] then
/// [`escape_html`].
///
/// # Examples
/// ```
/// use careers::domain::sanitize;
///
/// assert_eq!(sanitize("  <b>O\\'Brien</b> "), "&lt;b&gt;O&#039;Brien&lt;/b&gt;");
/// ```
pub fn sanitize(input: &str) -> String {
    escape_html(&clean(input))
}
