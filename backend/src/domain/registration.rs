//! Manager self-registration form and its rules.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use super::{ValidationErrors, is_valid_email};

const USERNAME_MIN: usize = 3;
const USERNAME_MAX: usize = 50;
const PASSWORD_MIN: usize = 8;
const FULL_NAME_MAX: usize = 100;
/// Special characters a password must draw at least one from.
pub const PASSWORD_SPECIALS: &str = "@$!%*?&";

fn username_regex() -> &'static Regex {
    static USERNAME_RE: OnceLock<Regex> = OnceLock::new();
    USERNAME_RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Registration form values as submitted.
#[derive(Clone, Default, PartialEq, Eq, Deserialize, ToSchema)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
}

impl std::fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .finish_non_exhaustive()
    }
}

impl RegistrationForm {
    /// Values safe to echo back when the form is redisplayed.
    pub fn redisplay_values(&self) -> Value {
        json!({
            "username": self.username.trim(),
            "email": self.email.trim(),
            "fullName": self.full_name.trim(),
        })
    }
}

/// Registration that passed every rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidRegistration {
    pub username: String,
    pub password: Zeroizing<String>,
    pub email: String,
    pub full_name: String,
}

/// Confirmation returned once an account exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationReceipt {
    pub username: String,
    pub message: String,
}

/// Apply every registration rule, accumulating failures.
pub fn validate_registration(form: &RegistrationForm) -> Result<ValidRegistration, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let username = form.username.trim();
    if username.is_empty() {
        errors.push("username", "Username is required.");
    } else if !(USERNAME_MIN..=USERNAME_MAX).contains(&username.len()) {
        errors.push(
            "username",
            format!("Username must be between {USERNAME_MIN} and {USERNAME_MAX} characters."),
        );
    } else if !username_regex().is_match(username) {
        errors.push(
            "username",
            "Username can only contain letters, numbers, and underscores.",
        );
    }

    let password = form.password.as_str();
    if password.is_empty() {
        errors.push("password", "Password is required.");
    } else if password.chars().count() < PASSWORD_MIN {
        errors.push(
            "password",
            format!("Password must be at least {PASSWORD_MIN} characters long."),
        );
    } else if !is_strong_password(password) {
        errors.push(
            "password",
            "Password must contain at least one uppercase letter, one lowercase letter, one number, and one special character.",
        );
    }

    if form.password != form.confirm_password {
        errors.push("confirm_password", "Passwords do not match.");
    }

    let email = form.email.trim();
    if email.is_empty() {
        errors.push("email", "Email is required.");
    } else if !is_valid_email(email) {
        errors.push("email", "Invalid email format.");
    }

    let full_name = form.full_name.trim();
    if full_name.is_empty() {
        errors.push("full_name", "Full name is required.");
    } else if full_name.chars().count() > FULL_NAME_MAX {
        errors.push(
            "full_name",
            format!("Full name must be less than {FULL_NAME_MAX} characters."),
        );
    }

    errors.into_result(|| ValidRegistration {
        username: username.to_owned(),
        password: Zeroizing::new(form.password.clone()),
        email: email.to_owned(),
        full_name: full_name.to_owned(),
    })
}

fn is_strong_password(password: &str) -> bool {
    password.chars().any(|ch| ch.is_ascii_lowercase())
        && password.chars().any(|ch| ch.is_ascii_uppercase())
        && password.chars().any(|ch| ch.is_ascii_digit())
        && password.chars().any(|ch| PASSWORD_SPECIALS.contains(ch))
}
