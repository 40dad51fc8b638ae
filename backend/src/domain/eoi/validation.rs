//! Accumulate-all validation of the application form.
//!
//! Rules run in form order and every failure is recorded, so one submission
//! reports everything wrong with it. Character rules inspect the cleaned
//! text (trimmed, backslashes dropped); length limits apply to the HTML
//! escaped text that is stored, so an accepted value always fits its column.

use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::{AustralianState, EoiSubmission, Gender, NewEoi, Skill};
use crate::domain::{
    MAX_EMAIL_LENGTH, ValidationErrors, clean, escape_html, is_valid_email, sanitize,
};

/// `strftime` pattern of the date of birth field.
pub const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";
/// Youngest accepted applicant, in whole years.
pub const MIN_AGE: i32 = 15;
/// Oldest accepted applicant, in whole years.
pub const MAX_AGE: i32 = 80;

const JOB_REFERENCE_MAX_CHARS: usize = 10;
const NAME_MAX_CHARS: usize = 20;
const ADDRESS_MAX_CHARS: usize = 40;

/// Length of `value` once HTML escaped for storage.
fn stored_len(value: &str) -> usize {
    escape_html(value).chars().count()
}

fn name_regex() -> &'static Regex {
    static NAME_RE: OnceLock<Regex> = OnceLock::new();
    NAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z' -]{1,20}$")
            .unwrap_or_else(|error| panic!("name regex failed to compile: {error}"))
    })
}

fn date_shape_regex() -> &'static Regex {
    static DATE_RE: OnceLock<Regex> = OnceLock::new();
    DATE_RE.get_or_init(|| {
        Regex::new(r"^\d{2}/\d{2}/\d{4}$")
            .unwrap_or_else(|error| panic!("date regex failed to compile: {error}"))
    })
}

/// Validate a raw submission against the application rules at `today`.
///
/// On success the returned [`NewEoi`] carries sanitised text, the parsed
/// date of birth, a digits-only phone number and de-duplicated skills.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use careers::domain::eoi::{EoiSubmission, validate_eoi};
///
/// let today = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
/// let errors = validate_eoi(&EoiSubmission::default(), today).unwrap_err();
/// assert_eq!(errors.messages()[0], "Job reference number is required.");
/// ```
pub fn validate_eoi(raw: &EoiSubmission, today: NaiveDate) -> Result<NewEoi, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let job_reference = clean(&raw.job_reference);
    if job_reference.is_empty() {
        errors.push("job_reference", "Job reference number is required.");
    } else if stored_len(&job_reference) > JOB_REFERENCE_MAX_CHARS {
        errors.push(
            "job_reference",
            format!("Job reference number must be maximum {JOB_REFERENCE_MAX_CHARS} characters."),
        );
    }

    let first_name = check_name(&mut errors, "first_name", "First name", &raw.first_name);
    let last_name = check_name(&mut errors, "last_name", "Last name", &raw.last_name);
    let date_of_birth = check_date_of_birth(&mut errors, &raw.date_of_birth, today);
    let gender = check_gender(&mut errors, &raw.gender);
    let street_address = check_bounded(
        &mut errors,
        "street_address",
        "Street address",
        &raw.street_address,
    );
    let suburb = check_bounded(&mut errors, "suburb", "Suburb/town", &raw.suburb);
    let state_selected = !clean(&raw.state).is_empty();
    let state = check_state(&mut errors, &raw.state);
    let postcode = check_postcode(&mut errors, &raw.postcode, state, state_selected);

    let email = clean(&raw.email);
    if email.is_empty() {
        errors.push("email", "Email address is required.");
    } else if !is_valid_email(&email) || stored_len(&email) > MAX_EMAIL_LENGTH {
        errors.push("email", "Invalid email address format.");
    }

    let phone = check_phone(&mut errors, &raw.phone);
    let skills = check_skills(&mut errors, &raw.skills);

    let other_skills = clean(&raw.other_skills);
    if !skills.is_empty() && other_skills.is_empty() {
        errors.push("other_skills", "Please describe your other skills.");
    }

    match (date_of_birth, gender, state) {
        (Some(date_of_birth), Some(gender), Some(state)) if errors.is_empty() => Ok(NewEoi {
            job_reference: sanitize(&job_reference),
            first_name: sanitize(&first_name),
            last_name: sanitize(&last_name),
            date_of_birth,
            gender,
            street_address: sanitize(&street_address),
            suburb: sanitize(&suburb),
            state,
            postcode,
            email: sanitize(&email),
            phone,
            skills,
            other_skills: sanitize(&other_skills),
        }),
        _ => Err(errors),
    }
}

fn check_name(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> String {
    let value = clean(raw);
    if value.is_empty() {
        errors.push(field, format!("{label} is required."));
    } else if !name_regex().is_match(&value) || stored_len(&value) > NAME_MAX_CHARS {
        errors.push(
            field,
            format!("{label} must be maximum {NAME_MAX_CHARS} alphabetic characters."),
        );
    }
    value
}

fn check_date_of_birth(
    errors: &mut ValidationErrors,
    raw: &str,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let value = clean(raw);
    if value.is_empty() {
        errors.push("date_of_birth", "Date of birth is required.");
        return None;
    }

    let parsed = date_shape_regex()
        .is_match(&value)
        .then(|| NaiveDate::parse_from_str(&value, DATE_INPUT_FORMAT).ok())
        .flatten();
    let Some(date) = parsed else {
        errors.push("date_of_birth", "Date of birth must be in DD/MM/YYYY format.");
        return None;
    };

    let age = age_on(date, today);
    if !(MIN_AGE..=MAX_AGE).contains(&age) {
        errors.push(
            "date_of_birth",
            format!("Age must be between {MIN_AGE} and {MAX_AGE} years."),
        );
        return None;
    }
    Some(date)
}

/// Whole years between `birth` and `today`; negative for future dates.
fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

fn check_gender(errors: &mut ValidationErrors, raw: &str) -> Option<Gender> {
    let value = clean(raw);
    if value.is_empty() {
        errors.push("gender", "Gender is required.");
        return None;
    }
    let parsed = value.parse::<Gender>().ok();
    if parsed.is_none() {
        errors.push("gender", "Invalid gender selection.");
    }
    parsed
}

fn check_bounded(
    errors: &mut ValidationErrors,
    field: &'static str,
    label: &str,
    raw: &str,
) -> String {
    let value = clean(raw);
    if value.is_empty() {
        errors.push(field, format!("{label} is required."));
    } else if stored_len(&value) > ADDRESS_MAX_CHARS {
        errors.push(
            field,
            format!("{label} must be maximum {ADDRESS_MAX_CHARS} characters."),
        );
    }
    value
}

fn check_state(errors: &mut ValidationErrors, raw: &str) -> Option<AustralianState> {
    let value = clean(raw);
    if value.is_empty() {
        errors.push("state", "State is required.");
        return None;
    }
    let parsed = value.parse::<AustralianState>().ok();
    if parsed.is_none() {
        errors.push("state", "Invalid state selection.");
    }
    parsed
}

fn check_postcode(
    errors: &mut ValidationErrors,
    raw: &str,
    state: Option<AustralianState>,
    state_selected: bool,
) -> String {
    let value = clean(raw);
    if value.is_empty() {
        errors.push("postcode", "Postcode is required.");
        return value;
    }
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        errors.push("postcode", "Postcode must be exactly 4 digits.");
        return value;
    }
    let in_range = match (value.parse::<u16>(), state) {
        (Ok(number), Some(state)) => state.accepts_postcode(number),
        // An unrecognised state matches no range; a missing one is skipped.
        (_, None) => !state_selected,
        (Err(_), Some(_)) => false,
    };
    if !in_range {
        errors.push("postcode", "Postcode does not match selected state.");
    }
    value
}

fn check_phone(errors: &mut ValidationErrors, raw: &str) -> String {
    let value = clean(raw);
    if value.is_empty() {
        errors.push("phone", "Phone number is required.");
        return value;
    }
    let digits: String = value.chars().filter(|ch| *ch != ' ').collect();
    let valid = (8..=12).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit());
    if !valid {
        errors.push("phone", "Phone number must be 8 to 12 digits.");
    }
    digits
}

fn check_skills(errors: &mut ValidationErrors, raw: &[String]) -> Vec<Skill> {
    let mut skills = Vec::new();
    let mut unknown = false;
    for tag in raw.iter().map(|tag| tag.trim()).filter(|tag| !tag.is_empty()) {
        match tag.parse::<Skill>() {
            Ok(skill) if !skills.contains(&skill) => skills.push(skill),
            Ok(_) => {}
            Err(_) => unknown = true,
        }
    }

    if unknown {
        errors.push("skills", "Invalid skill selection.");
    } else if skills.is_empty() {
        errors.push("skills", "At least one technical skill must be selected.");
    }
    skills
}
