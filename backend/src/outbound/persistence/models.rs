//! Internal Diesel row structs.
//!
//! These mirror `schema.rs` column for column and never leave the
//! persistence layer; repositories convert them into domain types.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;

use super::schema::{eoi, jobs, managers};

/// Row read from `jobs`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub job_reference: String,
    pub job_title: String,
    pub status: String,
    pub job_overview: String,
    pub salary_range: String,
    pub reports_to: String,
    pub location: String,
    pub job_type: String,
    pub key_responsibilities: String,
    pub essential_requirements: String,
    pub preferable_skills: String,
    pub posted_date: NaiveDate,
}

/// Row read from `eoi`; field order follows the table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = eoi)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct EoiRow {
    pub eoi_number: i32,
    pub job_reference: String,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub gender: String,
    pub street_address: String,
    pub suburb: String,
    pub state: String,
    pub postcode: String,
    pub email: String,
    pub phone: String,
    pub skill1: Option<String>,
    pub skill2: Option<String>,
    pub skill3: Option<String>,
    pub skill4: Option<String>,
    pub skill5: Option<String>,
    pub skill6: Option<String>,
    pub skill7: Option<String>,
    pub skill8: Option<String>,
    pub other_skills: String,
    pub status: String,
    pub submitted_date: DateTime<Utc>,
}

impl EoiRow {
    /// Occupied skill slots in column order.
    pub fn skill_slots(&self) -> impl Iterator<Item = &str> {
        [
            &self.skill1,
            &self.skill2,
            &self.skill3,
            &self.skill4,
            &self.skill5,
            &self.skill6,
            &self.skill7,
            &self.skill8,
        ]
        .into_iter()
        .filter_map(|slot| slot.as_deref())
    }
}

/// Insertable application; `status` and `eoi_number` use column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = eoi)]
pub(crate) struct NewEoiRow<'a> {
    pub job_reference: &'a str,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub date_of_birth: NaiveDate,
    pub gender: &'a str,
    pub street_address: &'a str,
    pub suburb: &'a str,
    pub state: &'a str,
    pub postcode: &'a str,
    pub email: &'a str,
    pub phone: &'a str,
    pub skill1: Option<&'a str>,
    pub skill2: Option<&'a str>,
    pub skill3: Option<&'a str>,
    pub skill4: Option<&'a str>,
    pub skill5: Option<&'a str>,
    pub skill6: Option<&'a str>,
    pub skill7: Option<&'a str>,
    pub skill8: Option<&'a str>,
    pub other_skills: &'a str,
    pub submitted_date: DateTime<Utc>,
}

/// Row read from `managers`.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = managers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ManagerRow {
    pub manager_id: i32,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub full_name: String,
    pub created_date: DateTime<Utc>,
    pub last_login: Option<DateTime<Utc>>,
    pub login_attempts: i32,
    pub account_locked: bool,
    pub locked_until: Option<DateTime<Utc>>,
}

/// Insertable manager account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = managers)]
pub(crate) struct NewManagerRow<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub email: &'a str,
    pub full_name: &'a str,
}
