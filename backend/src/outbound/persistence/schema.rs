//! Diesel table definitions for the PostgreSQL schema.
//!
//! These must match `migrations/` exactly. `diesel print-schema` against a
//! migrated database regenerates them.

diesel::table! {
    /// Published job adverts, seeded by the initial migration.
    jobs (job_reference) {
        job_reference -> Varchar,
        job_title -> Varchar,
        /// `Active` or any other value for withdrawn postings.
        status -> Varchar,
        job_overview -> Text,
        salary_range -> Varchar,
        reports_to -> Varchar,
        location -> Varchar,
        job_type -> Varchar,
        /// Newline separated bullet items.
        key_responsibilities -> Text,
        essential_requirements -> Text,
        preferable_skills -> Text,
        posted_date -> Date,
    }
}

diesel::table! {
    /// Submitted expressions of interest.
    eoi (eoi_number) {
        eoi_number -> Int4,
        job_reference -> Varchar,
        first_name -> Varchar,
        last_name -> Varchar,
        date_of_birth -> Date,
        gender -> Varchar,
        street_address -> Varchar,
        suburb -> Varchar,
        state -> Varchar,
        postcode -> Bpchar,
        email -> Varchar,
        phone -> Varchar,
        /// Skill tags stored positionally; unused slots are NULL.
        skill1 -> Nullable<Varchar>,
        skill2 -> Nullable<Varchar>,
        skill3 -> Nullable<Varchar>,
        skill4 -> Nullable<Varchar>,
        skill5 -> Nullable<Varchar>,
        skill6 -> Nullable<Varchar>,
        skill7 -> Nullable<Varchar>,
        skill8 -> Nullable<Varchar>,
        other_skills -> Text,
        status -> Varchar,
        submitted_date -> Timestamptz,
    }
}

diesel::table! {
    /// HR manager accounts.
    managers (manager_id) {
        manager_id -> Int4,
        username -> Varchar,
        password_hash -> Varchar,
        email -> Varchar,
        full_name -> Varchar,
        created_date -> Timestamptz,
        last_login -> Nullable<Timestamptz>,
        login_attempts -> Int4,
        account_locked -> Bool,
        locked_until -> Nullable<Timestamptz>,
    }
}
