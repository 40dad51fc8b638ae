//! Application form and submission.
//!
//! ```text
//! GET  /apply?ref=TVFED01
//! POST /apply   (form-encoded; `skills` may repeat)
//! ```

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::eoi::{AustralianState, EoiReceipt, EoiSubmission, Gender, Skill};
use crate::domain::{Error, JobSummary};
use crate::inbound::http::ApiResult;
use crate::inbound::http::form::FormFields;
use crate::inbound::http::page::PageView;
use crate::inbound::http::state::HttpState;

/// Query string of the application form.
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApplyQuery {
    /// Job reference to preselect.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
}

/// One option of a select, radio or checkbox group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Choice {
    pub value: &'static str,
    pub label: &'static str,
}

/// Everything the application form needs to render.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyFormBody {
    pub jobs: Vec<JobSummary>,
    pub selected_reference: Option<String>,
    pub genders: Vec<Choice>,
    pub states: Vec<Choice>,
    pub skills: Vec<Choice>,
}

/// Confirmation shown after a stored submission.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmittedBody {
    pub receipt: EoiReceipt,
}

fn choices<T: Copy>(all: &[T], value: fn(T) -> &'static str, label: fn(T) -> &'static str) -> Vec<Choice> {
    all.iter()
        .map(|item| Choice {
            value: value(*item),
            label: label(*item),
        })
        .collect()
}

fn submission_from(form: &FormFields) -> EoiSubmission {
    EoiSubmission {
        job_reference: form.value("job_reference"),
        first_name: form.value("first_name"),
        last_name: form.value("last_name"),
        date_of_birth: form.value("date_of_birth"),
        gender: form.value("gender"),
        street_address: form.value("street_address"),
        suburb: form.value("suburb"),
        state: form.value("state"),
        postcode: form.value("postcode"),
        email: form.value("email"),
        phone: form.value("phone"),
        skills: form.all(&["skills", "skills[]"]),
        other_skills: form.value("other_skills"),
    }
}

/// Data for the application form.
///
/// A `ref` that is not an active posting is ignored.
#[utoipa::path(
    get,
    path = "/apply",
    params(ApplyQuery),
    responses(
        (status = 200, description = "Application form data", body = PageView<ApplyFormBody>),
        (status = 503, description = "Job store unavailable", body = Error)
    ),
    tags = ["applications"],
    operation_id = "applicationForm",
    security([])
)]
#[get("/apply")]
pub async fn application_form(
    state: web::Data<HttpState>,
    query: web::Query<ApplyQuery>,
) -> ApiResult<HttpResponse> {
    let jobs = state.jobs.application_choices().await?;
    let selected_reference = query
        .into_inner()
        .reference
        .map(|reference| reference.trim().to_owned())
        .filter(|reference| jobs.iter().any(|job| job.reference == *reference));

    let body = ApplyFormBody {
        jobs,
        selected_reference,
        genders: choices(Gender::ALL, Gender::as_str, Gender::label),
        states: choices(AustralianState::ALL, AustralianState::as_str, AustralianState::label),
        skills: choices(Skill::ALL, Skill::as_str, Skill::label),
    };
    Ok(PageView::new("Job Application", "Apply for a position at TechHive.", body).ok())
}

/// Submit an expression of interest.
///
/// Validation failures answer `400` with every field error and the
/// submitted values under `details`.
#[utoipa::path(
    post,
    path = "/apply",
    request_body(content = EoiSubmission, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Application stored", body = PageView<ApplicationSubmittedBody>),
        (status = 400, description = "Validation failed", body = Error),
        (status = 503, description = "Application store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["applications"],
    operation_id = "submitApplication",
    security([])
)]
#[post("/apply")]
pub async fn submit_application(
    state: web::Data<HttpState>,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    let submission = submission_from(&form);
    let receipt = state.intake.submit(&submission).await?;
    Ok(PageView::new(
        "Application Submitted",
        "Thank you for applying to TechHive.",
        ApplicationSubmittedBody { receipt },
    )
    .respond(StatusCode::CREATED))
}
