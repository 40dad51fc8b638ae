//! Manager authentication pages.
//!
//! ```text
//! GET  /manager/login
//! POST /manager/login     username=admin&password=...
//! GET  /manager/register
//! POST /manager/register  username=...&password=...&confirm_password=...&email=...&full_name=...
//! POST /manager/logout
//! ```

use actix_web::{HttpResponse, get, http::StatusCode, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::domain::{
    Error, LoginCredentials, LoginOutcome, RegistrationForm, RegistrationReceipt,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::page::{PageView, see_other};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

pub(crate) const LOGIN_PATH: &str = "/manager/login";
pub(crate) const DASHBOARD_PATH: &str = "/manager/manage";
const LOGGED_OUT_PATH: &str = "/manager/login?logout=success";

/// Login form body.
#[derive(Deserialize, ToSchema)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

impl std::fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Query string of the login page.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LoginPageQuery {
    /// `success` right after signing out.
    pub logout: Option<String>,
}

/// Body of the login page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPageBody {
    pub logout_success: bool,
}

/// Body of the registration page.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterPageBody {
    pub username_rule: &'static str,
    pub password_rule: &'static str,
}

/// Body returned once an account was created.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredBody {
    pub receipt: RegistrationReceipt,
    pub login_path: &'static str,
}

/// Login page; signed-in managers go straight to the dashboard.
#[utoipa::path(
    get,
    path = "/manager/login",
    params(LoginPageQuery),
    responses(
        (status = 200, description = "Login page", body = PageView<LoginPageBody>),
        (status = 303, description = "Already signed in")
    ),
    tags = ["manager"],
    operation_id = "loginPage",
    security([])
)]
#[get("/manager/login")]
pub async fn login_page(
    session: SessionContext,
    query: web::Query<LoginPageQuery>,
) -> ApiResult<HttpResponse> {
    if session.manager()?.is_some() {
        return Ok(see_other(DASHBOARD_PATH));
    }
    let logout_success = query.logout.as_deref() == Some("success");
    Ok(PageView::new(
        "Manager Login",
        "Sign in to manage applications.",
        LoginPageBody { logout_success },
    )
    .ok())
}

/// Check credentials and start a manager session.
///
/// Wrong credentials never say whether the username exists.
#[utoipa::path(
    post,
    path = "/manager/login",
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 303, description = "Signed in", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing username or password", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 423, description = "Account locked", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["manager"],
    operation_id = "login",
    security([])
)]
#[post("/manager/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<LoginForm>,
) -> ApiResult<HttpResponse> {
    let credentials = LoginCredentials::try_from_parts(&form.username, &form.password)
        .map_err(|_| Error::invalid_request("Please enter both username and password."))?;

    match state.login.attempt_login(&credentials).await? {
        LoginOutcome::Success(manager) => {
            session.sign_in(&manager)?;
            Ok(see_other(DASHBOARD_PATH))
        }
        LoginOutcome::InvalidCredentials { .. } => {
            Err(Error::unauthorized("Invalid username or password."))
        }
        LoginOutcome::AccountLocked { minutes_remaining } => {
            Err(Error::locked(lock_message(minutes_remaining))
                .with_details(json!({ "minutesRemaining": minutes_remaining })))
        }
    }
}

fn lock_message(minutes: i64) -> String {
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    format!("Account is locked. Please try again in {minutes} {unit}.")
}

/// Registration page.
#[utoipa::path(
    get,
    path = "/manager/register",
    responses((status = 200, description = "Registration page", body = PageView<RegisterPageBody>)),
    tags = ["manager"],
    operation_id = "registerPage",
    security([])
)]
#[get("/manager/register")]
pub async fn register_page() -> HttpResponse {
    PageView::new(
        "Manager Registration",
        "Create a manager account.",
        RegisterPageBody {
            username_rule: "3-50 characters: letters, numbers and underscores.",
            password_rule: "At least 8 characters with an uppercase letter, a lowercase letter, \
                            a number and a special character.",
        },
    )
    .ok()
}

/// Create a manager account.
#[utoipa::path(
    post,
    path = "/manager/register",
    request_body(content = RegistrationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 201, description = "Account created", body = PageView<RegisteredBody>),
        (status = 400, description = "Validation failed", body = Error),
        (status = 409, description = "Username or email already registered", body = Error),
        (status = 503, description = "Account store unavailable", body = Error)
    ),
    tags = ["manager"],
    operation_id = "register",
    security([])
)]
#[post("/manager/register")]
pub async fn register(
    state: web::Data<HttpState>,
    form: web::Form<RegistrationForm>,
) -> ApiResult<HttpResponse> {
    let receipt = state.registration.register(&form).await?;
    Ok(PageView::new(
        "Manager Registration",
        "Create a manager account.",
        RegisteredBody {
            receipt,
            login_path: LOGIN_PATH,
        },
    )
    .respond(StatusCode::CREATED))
}

/// End the manager session.
#[utoipa::path(
    post,
    path = "/manager/logout",
    responses((status = 303, description = "Signed out")),
    tags = ["manager"],
    operation_id = "logout",
    security([])
)]
#[post("/manager/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.sign_out();
    see_other(LOGGED_OUT_PATH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockLoginService, MockManagerRegistration};
    use crate::domain::{ManagerId, ManagerIdentity};
    use crate::inbound::http::test_utils::{MockPorts, session_cookie, test_session_middleware};
    use actix_web::http::header::{self, ContentType};
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    fn admin() -> ManagerIdentity {
        ManagerIdentity {
            id: ManagerId::new(1),
            username: "admin".into(),
            full_name: "System Administrator".into(),
        }
    }

    fn login_request(payload: &'static str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(LOGIN_PATH)
            .insert_header(ContentType::form_url_encoded())
            .set_payload(payload)
    }

    fn location<B>(res: &actix_web::dev::ServiceResponse<B>) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[actix_web::test]
    async fn successful_login_redirects_and_later_skips_login_page() {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_attempt_login()
            .withf(|creds| creds.username() == "admin" && creds.password() == "Admin@123")
            .times(1)
            .returning(|_| Ok(LoginOutcome::Success(admin())));
        let state = MockPorts {
            login: login_port,
            ..MockPorts::default()
        }
        .into_state();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state)
                .service(login)
                .service(login_page),
        )
        .await;

        let res = test::call_service(
            &app,
            login_request("username=+admin+&password=Admin%40123").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(DASHBOARD_PATH));
        let cookie = session_cookie(&res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri(LOGIN_PATH).cookie(cookie).to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
    }

    #[rstest]
    #[case("username=&password=secret")]
    #[case("username=admin")]
    #[actix_rt::test]
    async fn blank_fields_are_rejected_before_lookup(#[case] payload: &'static str) {
        let state = MockPorts::default().into_state();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state)
                .service(login),
        )
        .await;

        let res = test::call_service(&app, login_request(payload).to_request()).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Please enter both username and password.");
    }

    #[actix_web::test]
    async fn wrong_password_is_generic_unauthorized() {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_attempt_login()
            .returning(|_| Ok(LoginOutcome::InvalidCredentials { attempts_remaining: 2 }));
        let state = MockPorts {
            login: login_port,
            ..MockPorts::default()
        }
        .into_state();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state)
                .service(login),
        )
        .await;

        let res = test::call_service(&app, login_request("username=admin&password=nope").to_request()).await;
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Invalid username or password.");
    }

    #[rstest]
    #[case(29, "Account is locked. Please try again in 29 minutes.")]
    #[case(1, "Account is locked. Please try again in 1 minute.")]
    #[actix_web::test]
    async fn locked_account_reports_minutes(#[case] minutes: i64, #[case] expected: &str) {
        let mut login_port = MockLoginService::new();
        login_port
            .expect_attempt_login()
            .returning(move |_| Ok(LoginOutcome::AccountLocked { minutes_remaining: minutes }));
        let state = MockPorts {
            login: login_port,
            ..MockPorts::default()
        }
        .into_state();
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .app_data(state)
                .service(login),
        )
        .await;

        let res = test::call_service(&app, login_request("username=admin&password=x").to_request()).await;
        assert_eq!(res.status(), StatusCode::LOCKED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], expected);
        assert_eq!(body["details"]["minutesRemaining"], minutes);
    }

    #[actix_web::test]
    async fn login_page_flags_logout() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .service(login_page),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri(LOGGED_OUT_PATH).to_request()).await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["title"], "Manager Login | TechHive");
        assert_eq!(body["body"]["logoutSuccess"], true);
    }

    #[actix_web::test]
    async fn logout_clears_session() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .service(logout),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::post().uri("/manager/logout").to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(LOGGED_OUT_PATH));
    }

    #[actix_web::test]
    async fn registration_returns_created_receipt() {
        let mut registration = MockManagerRegistration::new();
        registration
            .expect_register()
            .withf(|form| form.username == "hr_lead" && form.full_name == "HR Lead")
            .returning(|form| {
                Ok(RegistrationReceipt {
                    username: form.username.clone(),
                    message: "Registration successful! You can now login.".into(),
                })
            });
        let state = MockPorts {
            registration,
            ..MockPorts::default()
        }
        .into_state();
        let app = test::init_service(App::new().app_data(state).service(register)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/manager/register")
                .insert_header(ContentType::form_url_encoded())
                .set_payload(
                    "username=hr_lead&password=Str0ng%21pw&confirm_password=Str0ng%21pw\
                     &email=hr%40example.com&full_name=HR+Lead",
                )
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["body"]["receipt"]["username"], "hr_lead");
        assert_eq!(body["body"]["loginPath"], LOGIN_PATH);
    }

    #[actix_web::test]
    async fn duplicate_registration_is_conflict() {
        let mut registration = MockManagerRegistration::new();
        registration
            .expect_register()
            .returning(|_| Err(Error::conflict("Username or email already exists.")));
        let state = MockPorts {
            registration,
            ..MockPorts::default()
        }
        .into_state();
        let app = test::init_service(App::new().app_data(state).service(register)).await;

        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/manager/register")
                .insert_header(ContentType::form_url_encoded())
                .set_payload("username=admin")
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CONFLICT);
    }
}
