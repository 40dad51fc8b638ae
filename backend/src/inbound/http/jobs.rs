//! Public job board.
//!
//! ```text
//! GET /jobs
//! ```

use actix_web::{HttpResponse, get, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Error, JobPosting};
use crate::inbound::http::ApiResult;
use crate::inbound::http::page::PageView;
use crate::inbound::http::state::HttpState;

/// Body of the job board page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobBoardBody {
    pub jobs: Vec<JobPosting>,
}

/// Active postings, newest first.
#[utoipa::path(
    get,
    path = "/jobs",
    responses(
        (status = 200, description = "Active job postings", body = PageView<JobBoardBody>),
        (status = 503, description = "Job store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["jobs"],
    operation_id = "listJobs",
    security([])
)]
#[get("/jobs")]
pub async fn list_jobs(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let jobs = state.jobs.active_postings().await?;
    Ok(PageView::new(
        "Career Opportunities",
        "Explore current career opportunities at TechHive.",
        JobBoardBody { jobs },
    )
    .ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockJobBoard;
    use crate::inbound::http::test_utils::MockPorts;
    use crate::outbound::memory::seeded_job_postings;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::Value;

    fn state_with(jobs: MockJobBoard) -> web::Data<HttpState> {
        MockPorts {
            jobs,
            ..MockPorts::default()
        }
        .into_state()
    }

    #[actix_web::test]
    async fn lists_postings_in_page_view() {
        let mut jobs = MockJobBoard::new();
        jobs.expect_active_postings()
            .times(1)
            .returning(|| Ok(seeded_job_postings()));
        let app = test::init_service(App::new().app_data(state_with(jobs)).service(list_jobs)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/jobs").to_request()).await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Career Opportunities | TechHive");
        assert_eq!(body["body"]["jobs"][0]["reference"], "TVFED01");
        assert_eq!(body["body"]["jobs"][0]["postedDate"], "2025-10-01");
        assert!(body["body"]["jobs"][1]["keyResponsibilities"].is_array());
    }

    #[actix_web::test]
    async fn store_outage_is_service_unavailable() {
        let mut jobs = MockJobBoard::new();
        jobs.expect_active_postings()
            .returning(|| Err(Error::service_unavailable("job repository unavailable")));
        let app = test::init_service(App::new().app_data(state_with(jobs)).service(list_jobs)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/jobs").to_request()).await;
        assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
