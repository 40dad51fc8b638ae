//! PostgreSQL-backed `EoiRepository`.
//!
//! The dashboard read is assembled as a boxed query so filter values are
//! always bound parameters and ordering only ever names known columns.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::eoi::{
    AustralianState, Eoi, EoiId, EoiQuery, EoiStatus, FilterKind, Gender, NewEoi, Skill,
    SortDirection, SortField,
};
use crate::domain::ports::{EoiRepository, EoiRepositoryError};

use super::diesel_error_mapping::StoreFailure;
use super::models::{EoiRow, NewEoiRow};
use super::pool::DbPool;
use super::schema::eoi;

/// Diesel implementation of the EOI repository port.
#[derive(Clone)]
pub struct DieselEoiRepository {
    pool: DbPool,
}

impl DieselEoiRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> EoiRepositoryError {
    match failure.into() {
        StoreFailure::Connection(message) => EoiRepositoryError::connection(message),
        StoreFailure::Conflict(message) | StoreFailure::Query(message) => {
            EoiRepositoryError::query(message)
        }
    }
}

macro_rules! order_by_column {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            SortDirection::Asc => $query
                .order($column.asc())
                .then_order_by(eoi::eoi_number.asc()),
            SortDirection::Desc => $query
                .order($column.desc())
                .then_order_by(eoi::eoi_number.desc()),
        }
    };
}

/// Build the dashboard read for `query`.
pub(crate) fn list_statement(query: &EoiQuery) -> eoi::BoxedQuery<'static, Pg> {
    let mut statement = eoi::table.into_boxed::<Pg>();

    if let Some(filter) = &query.filter {
        statement = match filter.kind() {
            FilterKind::JobReference => {
                statement.filter(eoi::job_reference.eq(filter.value().to_owned()))
            }
            FilterKind::FirstName => statement.filter(eoi::first_name.ilike(filter.like_pattern())),
            FilterKind::LastName => statement.filter(eoi::last_name.ilike(filter.like_pattern())),
            FilterKind::BothNames => statement.filter(
                eoi::first_name
                    .ilike(filter.like_pattern())
                    .or(eoi::last_name.ilike(filter.like_pattern())),
            ),
        };
    }

    match query.sort {
        SortField::Id => order_by_column!(statement, eoi::eoi_number, query.direction),
        SortField::JobReference => {
            order_by_column!(statement, eoi::job_reference, query.direction)
        }
        SortField::FirstName => order_by_column!(statement, eoi::first_name, query.direction),
        SortField::LastName => order_by_column!(statement, eoi::last_name, query.direction),
        SortField::SubmittedDate => {
            order_by_column!(statement, eoi::submitted_date, query.direction)
        }
        SortField::Status => order_by_column!(statement, eoi::status, query.direction),
    }
}

fn parse_column<T: std::str::FromStr>(
    value: &str,
    column: &str,
    id: i32,
) -> Result<T, EoiRepositoryError> {
    value.parse::<T>().map_err(|_| {
        EoiRepositoryError::query(format!("eoi {id} has unexpected {column} `{value}`"))
    })
}

fn row_to_eoi(row: EoiRow) -> Result<Eoi, EoiRepositoryError> {
    let id = row.eoi_number;
    let skills = row
        .skill_slots()
        .map(|tag| parse_column::<Skill>(tag, "skill", id))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Eoi {
        id: EoiId::new(id),
        gender: parse_column::<Gender>(&row.gender, "gender", id)?,
        state: parse_column::<AustralianState>(&row.state, "state", id)?,
        status: parse_column::<EoiStatus>(&row.status, "status", id)?,
        skills,
        job_reference: row.job_reference,
        first_name: row.first_name,
        last_name: row.last_name,
        date_of_birth: row.date_of_birth,
        street_address: row.street_address,
        suburb: row.suburb,
        postcode: row.postcode,
        email: row.email,
        phone: row.phone,
        other_skills: row.other_skills,
        submitted_date: row.submitted_date,
    })
}

fn new_row(eoi: &NewEoi, submitted_at: DateTime<Utc>) -> NewEoiRow<'_> {
    let slot = |index: usize| eoi.skills.get(index).map(|skill| skill.as_str());
    NewEoiRow {
        job_reference: &eoi.job_reference,
        first_name: &eoi.first_name,
        last_name: &eoi.last_name,
        date_of_birth: eoi.date_of_birth,
        gender: eoi.gender.as_str(),
        street_address: &eoi.street_address,
        suburb: &eoi.suburb,
        state: eoi.state.as_str(),
        postcode: &eoi.postcode,
        email: &eoi.email,
        phone: &eoi.phone,
        skill1: slot(0),
        skill2: slot(1),
        skill3: slot(2),
        skill4: slot(3),
        skill5: slot(4),
        skill6: slot(5),
        skill7: slot(6),
        skill8: slot(7),
        other_skills: &eoi.other_skills,
        submitted_date: submitted_at,
    }
}

#[async_trait]
impl EoiRepository for DieselEoiRepository {
    async fn insert(
        &self,
        eoi: &NewEoi,
        submitted_at: DateTime<Utc>,
    ) -> Result<EoiId, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let id: i32 = diesel::insert_into(eoi::table)
            .values(new_row(eoi, submitted_at))
            .returning(eoi::eoi_number)
            .get_result(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(EoiId::new(id))
    }

    async fn list(&self, query: &EoiQuery) -> Result<Vec<Eoi>, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows: Vec<EoiRow> = list_statement(query)
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        rows.into_iter().map(row_to_eoi).collect()
    }

    async fn job_references(&self) -> Result<Vec<String>, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        eoi::table
            .select(eoi::job_reference)
            .distinct()
            .order(eoi::job_reference.asc())
            .load(&mut conn)
            .await
            .map_err(map_failure)
    }

    async fn update_status(
        &self,
        id: EoiId,
        status: EoiStatus,
    ) -> Result<bool, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let updated = diesel::update(eoi::table.find(id.get()))
            .set(eoi::status.eq(status.as_str()))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(updated > 0)
    }

    async fn delete(&self, id: EoiId) -> Result<bool, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let deleted = diesel::delete(eoi::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(deleted > 0)
    }

    async fn delete_by_job(&self, job_reference: &str) -> Result<usize, EoiRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::delete(eoi::table.filter(eoi::job_reference.eq(job_reference)))
            .execute(&mut conn)
            .await
            .map_err(map_failure)
    }
}

#[cfg(test)]
mod tests {
    //! SQL shape checks that need no database.
    use super::*;
    use diesel::debug_query;
    use rstest::rstest;

    fn sql_for(query: &EoiQuery) -> String {
        debug_query::<Pg, _>(&list_statement(query)).to_string()
    }

    #[rstest]
    fn default_read_is_newest_first_with_id_tiebreak() {
        let sql = sql_for(&EoiQuery::default());
        assert!(sql.contains(r#"ORDER BY "eoi"."submitted_date" DESC, "eoi"."eoi_number" DESC"#));
        assert!(!sql.contains("WHERE"));
    }

    #[rstest]
    fn hostile_sort_falls_back_to_submitted_date() {
        let query = EoiQuery::from_raw(None, None, Some("status; DROP TABLE eoi"), Some("ASC"));
        let sql = sql_for(&query);
        assert!(sql.contains(r#"ORDER BY "eoi"."submitted_date" ASC, "eoi"."eoi_number" ASC"#));
        assert!(!sql.contains("DROP"));
    }

    #[rstest]
    fn name_filters_are_bound_parameters() {
        let query = EoiQuery::from_raw(Some("both_names"), Some("o'neil%"), None, None);
        let sql = sql_for(&query);
        assert!(sql.contains(r#""eoi"."first_name" ILIKE $1"#));
        assert!(sql.contains(r#""eoi"."last_name" ILIKE $2"#));
        let (statement, binds) = sql.split_once("-- binds").expect("debug output lists binds");
        assert!(!statement.contains("o'neil"), "value leaked into SQL text: {statement}");
        assert!(binds.contains(r#"%o'neil\\%%"#), "binds missing escaped pattern: {binds}");
    }

    #[rstest]
    fn job_reference_filter_is_exact() {
        let query = EoiQuery::from_raw(Some("job_reference"), Some("TVFED01"), Some("id"), None);
        let sql = sql_for(&query);
        assert!(sql.contains(r#""eoi"."job_reference" = $1"#));
        assert!(sql.contains(r#"ORDER BY "eoi"."eoi_number" DESC"#));
    }

    #[rstest]
    fn skills_fill_slots_in_order() {
        let eoi = NewEoi {
            job_reference: "TVFED01".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            date_of_birth: chrono::NaiveDate::from_ymd_opt(1990, 1, 1).expect("valid date"),
            gender: Gender::Female,
            street_address: "1 Test St".into(),
            suburb: "Carlton".into(),
            state: AustralianState::Vic,
            postcode: "3053".into(),
            email: "jane@example.com".into(),
            phone: "0412345678".into(),
            skills: vec![Skill::React, Skill::Git],
            other_skills: "Testing".into(),
        };
        let row = new_row(&eoi, Utc::now());
        assert_eq!(row.skill1, Some("react"));
        assert_eq!(row.skill2, Some("git"));
        assert_eq!(row.skill3, None);
    }
}
