//! HR dashboard: list, filter, sort and mutate applications.
//!
//! ```text
//! GET  /manager/manage?search_type=first_name&search_value=an&sort_by=last_name&sort_order=ASC
//! POST /manager/manage  action=update_status&eoi_id=4&new_status=Current
//! POST /manager/manage  action=delete_single&eoi_id=4
//! POST /manager/manage  action=delete_by_job&job_reference=TVFED01
//! ```
//!
//! Both routes redirect to the login page when no manager is signed in.

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::{IntoParams, ToSchema};

use crate::domain::eoi::{Eoi, EoiId, EoiQuery, EoiStatus};
use crate::domain::ports::DashboardChange;
use crate::domain::{Error, ManagerIdentity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{DASHBOARD_PATH, LOGIN_PATH};
use crate::inbound::http::form::FormFields;
use crate::inbound::http::page::{PageView, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Filter and sort selections as they arrive in the query string.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct DashboardQuery {
    /// `job_reference`, `first_name`, `last_name` or `both_names`.
    pub search_type: Option<String>,
    pub search_value: Option<String>,
    /// Column name; unknown names sort by submission date.
    pub sort_by: Option<String>,
    /// `ASC`; anything else sorts descending.
    pub sort_order: Option<String>,
}

impl DashboardQuery {
    fn to_query(&self) -> EoiQuery {
        EoiQuery::from_raw(
            self.search_type.as_deref(),
            self.search_value.as_deref(),
            self.sort_by.as_deref(),
            self.sort_order.as_deref(),
        )
    }
}

/// Body of the dashboard page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardBody {
    pub manager: ManagerIdentity,
    pub applications: Vec<Eoi>,
    pub count: usize,
    pub job_references: Vec<String>,
    pub query: EoiQuery,
    pub statuses: Vec<&'static str>,
    pub flash: Option<String>,
}

/// A dashboard mutation decoded from the posted form.
#[derive(Debug, PartialEq, Eq)]
enum DashboardAction {
    UpdateStatus { id: EoiId, status: String },
    DeleteSingle(EoiId),
    DeleteByJob(String),
}

fn parse_eoi_id(raw: &str) -> Result<EoiId, Error> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .map(EoiId::new)
        .ok_or_else(|| Error::invalid_request("Invalid application number."))
}

impl DashboardAction {
    /// `None` for an unrecognised or missing `action`.
    fn from_form(form: &FormFields) -> Result<Option<Self>, Error> {
        let action = match form.value("action").as_str() {
            "update_status" => Self::UpdateStatus {
                id: parse_eoi_id(&form.value("eoi_id"))?,
                status: form.value("new_status"),
            },
            "delete_single" => Self::DeleteSingle(parse_eoi_id(&form.value("eoi_id"))?),
            "delete_by_job" => Self::DeleteByJob(form.value("job_reference")),
            _ => return Ok(None),
        };
        Ok(Some(action))
    }
}

/// Applications matching the query, for a signed-in manager.
#[utoipa::path(
    get,
    path = "/manager/manage",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard", body = PageView<DashboardBody>),
        (status = 303, description = "Not signed in; redirect to login"),
        (status = 503, description = "Application store unavailable", body = Error)
    ),
    tags = ["manager"],
    operation_id = "dashboard",
    security(("SessionCookie" = []))
)]
#[get("/manager/manage")]
pub async fn dashboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<DashboardQuery>,
) -> ApiResult<HttpResponse> {
    let Some(manager) = session.manager()? else {
        return Ok(see_other(LOGIN_PATH));
    };
    let query = query.to_query();
    let applications = state.dashboard.list(&query).await?;
    let job_references = state.dashboard.job_references().await?;

    let body = DashboardBody {
        manager,
        count: applications.len(),
        applications,
        job_references,
        query,
        statuses: EoiStatus::ALL.iter().map(|status| status.as_str()).collect(),
        flash: session.take_flash(),
    };
    Ok(PageView::new("Manage Applications", "Review and manage job applications.", body).ok())
}

/// Apply one dashboard action, then redirect back to the dashboard.
///
/// The confirmation is shown once on the next dashboard view.
#[utoipa::path(
    post,
    path = "/manager/manage",
    request_body(content = String, content_type = "application/x-www-form-urlencoded",
        description = "`action` plus `eoi_id`/`new_status` or `job_reference`"),
    responses(
        (status = 303, description = "Action applied; back to the dashboard or to login"),
        (status = 400, description = "Malformed application number or job reference", body = Error),
        (status = 503, description = "Application store unavailable", body = Error)
    ),
    tags = ["manager"],
    operation_id = "dashboardAction",
    security(("SessionCookie" = []))
)]
#[post("/manager/manage")]
pub async fn dashboard_action(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: FormFields,
) -> ApiResult<HttpResponse> {
    if session.manager()?.is_none() {
        return Ok(see_other(LOGIN_PATH));
    }
    let Some(action) = DashboardAction::from_form(&form)? else {
        debug!(action = %form.value("action"), "ignoring unknown dashboard action");
        return Ok(see_other(DASHBOARD_PATH));
    };

    let change: DashboardChange = match action {
        DashboardAction::UpdateStatus { id, status } => {
            state.dashboard.update_status(id, &status).await?
        }
        DashboardAction::DeleteSingle(id) => state.dashboard.delete(id).await?,
        DashboardAction::DeleteByJob(reference) => state.dashboard.delete_by_job(&reference).await?,
    };
    if let Some(message) = change.message() {
        session.set_flash(&message)?;
    }
    Ok(see_other(DASHBOARD_PATH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ManagerId;
    use crate::domain::eoi::{SortDirection, SortField};
    use crate::domain::ports::MockEoiDashboard;
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_web::cookie::Cookie;
    use actix_web::http::StatusCode;
    use actix_web::http::header::{self, ContentType};
    use actix_web::{App, test};
    use mockall::predicate::eq;
    use rstest::rstest;
    use serde_json::Value;

    fn manager() -> ManagerIdentity {
        ManagerIdentity {
            id: ManagerId::new(3),
            username: "hrlead".into(),
            full_name: "HR Lead".into(),
        }
    }

    async fn sign_in_route(session: SessionContext) -> ApiResult<HttpResponse> {
        session.sign_in(&manager())?;
        Ok(HttpResponse::Ok().finish())
    }

    macro_rules! dashboard_app {
        ($dashboard:expr) => {
            test::init_service(
                App::new()
                    .wrap(test_session_middleware())
                    .app_data(
                        MockPorts {
                            dashboard: $dashboard,
                            ..MockPorts::default()
                        }
                        .into_state(),
                    )
                    .route("/test/sign-in", web::get().to(sign_in_route))
                    .service(dashboard)
                    .service(dashboard_action),
            )
            .await
        };
    }

    macro_rules! signed_in {
        ($app:expr) => {{
            let res = test::call_service(
                $app,
                test::TestRequest::get().uri("/test/sign-in").to_request(),
            )
            .await;
            session_cookie(&res)
        }};
    }

    fn post_action(payload: &'static str, cookie: Cookie<'static>) -> test::TestRequest {
        test::TestRequest::post()
            .uri(DASHBOARD_PATH)
            .insert_header(ContentType::form_url_encoded())
            .cookie(cookie)
            .set_payload(payload)
    }

    #[actix_web::test]
    async fn anonymous_requests_redirect_to_login() {
        let app = dashboard_app!(MockEoiDashboard::new());

        let res = test::call_service(&app, test::TestRequest::get().uri(DASHBOARD_PATH).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).map(|v| v.as_bytes()), Some(LOGIN_PATH.as_bytes()));

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri(DASHBOARD_PATH)
                .insert_header(ContentType::form_url_encoded())
                .set_payload("action=delete_single&eoi_id=1")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[actix_web::test]
    async fn dashboard_folds_hostile_query_into_defaults() {
        let mut ports = MockEoiDashboard::new();
        ports
            .expect_list()
            .withf(|query| {
                query.sort == SortField::SubmittedDate
                    && query.direction == SortDirection::Desc
                    && query.filter.as_ref().map(|f| f.value()) == Some("an")
            })
            .times(1)
            .returning(|_| Ok(Vec::new()));
        ports
            .expect_job_references()
            .returning(|| Ok(vec!["TVFED01".to_owned()]));
        let app = dashboard_app!(ports);
        let cookie = signed_in!(&app);

        let res = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/manager/manage?search_type=first_name&search_value=an&sort_by=status%3B%20DROP%20TABLE%20eoi&sort_order=up")
                .cookie(cookie)
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Manage Applications | TechHive");
        assert_eq!(body["body"]["manager"]["fullName"], "HR Lead");
        assert_eq!(body["body"]["count"], 0);
        assert_eq!(body["body"]["jobReferences"][0], "TVFED01");
        assert_eq!(body["body"]["statuses"], serde_json::json!(["New", "Current", "Final"]));
        assert!(body["body"]["flash"].is_null());
    }

    #[actix_web::test]
    async fn status_update_flashes_once_after_redirect() {
        let mut ports = MockEoiDashboard::new();
        ports
            .expect_update_status()
            .with(eq(EoiId::new(4)), eq("Current"))
            .times(1)
            .returning(|id, _| Ok(DashboardChange::StatusUpdated(id)));
        ports.expect_list().returning(|_| Ok(Vec::new()));
        ports.expect_job_references().returning(|| Ok(Vec::new()));
        let app = dashboard_app!(ports);
        let cookie = signed_in!(&app);

        let res = test::call_service(
            &app,
            post_action("action=update_status&eoi_id=4&new_status=Current", cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(DASHBOARD_PATH).cookie(cookie).to_request(),
        )
        .await;
        let cookie = session_cookie(&res);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["body"]["flash"], "Status updated for application #4.");

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(DASHBOARD_PATH).cookie(cookie).to_request(),
        )
        .await;
        let body: Value = test::read_body_json(res).await;
        assert!(body["body"]["flash"].is_null());
    }

    #[actix_web::test]
    async fn bulk_delete_passes_reference() {
        let mut ports = MockEoiDashboard::new();
        ports
            .expect_delete_by_job()
            .with(eq("TVUXD01"))
            .times(1)
            .returning(|reference| {
                Ok(DashboardChange::DeletedByJob {
                    job_reference: reference.to_owned(),
                    count: 2,
                })
            });
        let app = dashboard_app!(ports);
        let cookie = signed_in!(&app);

        let res = test::call_service(
            &app,
            post_action("action=delete_by_job&job_reference=TVUXD01", cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[rstest]
    #[case("action=delete_single&eoi_id=abc")]
    #[case("action=delete_single&eoi_id=-3")]
    #[case("action=update_status&new_status=Final")]
    #[actix_rt::test]
    async fn malformed_ids_are_bad_request(#[case] payload: &'static str) {
        let app = dashboard_app!(MockEoiDashboard::new());
        let cookie = signed_in!(&app);

        let res = test::call_service(&app, post_action(payload, cookie).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_action_is_ignored() {
        let app = dashboard_app!(MockEoiDashboard::new());
        let cookie = signed_in!(&app);

        let res = test::call_service(&app, post_action("action=archive_all", cookie).to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).map(|v| v.as_bytes()),
            Some(DASHBOARD_PATH.as_bytes())
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn decodes_delete_single() {
        let form = FormFields::parse(b"action=delete_single&eoi_id=%207%20");
        assert_eq!(
            DashboardAction::from_form(&form).expect("valid"),
            Some(DashboardAction::DeleteSingle(EoiId::new(7)))
        );
    }
}
