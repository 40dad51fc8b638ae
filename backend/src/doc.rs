//! OpenAPI document for the careers site.
//!
//! Registers every route in the inbound HTTP layer plus the shared schemas.
//! Swagger UI serves it under `/docs` in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::eoi::{
    AustralianState, Eoi, EoiFilter, EoiQuery, EoiReceipt, EoiStatus, EoiSubmission, FilterKind,
    Gender, Skill, SortDirection, SortField,
};
use crate::domain::{
    Error, ErrorCode, JobPosting, JobStatus, JobSummary, ManagerIdentity, RegistrationForm,
    RegistrationReceipt,
};
use crate::inbound::http::applications::{ApplicationSubmittedBody, ApplyFormBody, Choice};
use crate::inbound::http::auth::{LoginForm, LoginPageBody, RegisterPageBody, RegisteredBody};
use crate::inbound::http::dashboard::DashboardBody;
use crate::inbound::http::jobs::JobBoardBody;

/// Adds the manager session cookie scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /manager/login.",
            ))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "TechHive careers API",
        description = "Job listings, application intake and the HR dashboard. \
                       Requests are form-encoded; responses are JSON page views."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::jobs::list_jobs,
        crate::inbound::http::applications::application_form,
        crate::inbound::http::applications::submit_application,
        crate::inbound::http::auth::login_page,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register_page,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::dashboard::dashboard,
        crate::inbound::http::dashboard::dashboard_action,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        JobPosting,
        JobStatus,
        JobSummary,
        EoiSubmission,
        EoiReceipt,
        Eoi,
        EoiStatus,
        EoiQuery,
        EoiFilter,
        FilterKind,
        SortField,
        SortDirection,
        AustralianState,
        Gender,
        Skill,
        ManagerIdentity,
        RegistrationForm,
        RegistrationReceipt,
        LoginForm,
        Choice,
        ApplyFormBody,
        ApplicationSubmittedBody,
        LoginPageBody,
        RegisterPageBody,
        RegisteredBody,
        DashboardBody,
        JobBoardBody,
    )),
    tags(
        (name = "jobs", description = "Public job board"),
        (name = "applications", description = "Expression of interest intake"),
        (name = "manager", description = "Manager authentication and the HR dashboard"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/jobs")]
    #[case("/apply")]
    #[case("/manager/login")]
    #[case("/manager/register")]
    #[case("/manager/logout")]
    #[case("/manager/manage")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }

    #[rstest]
    fn submission_schema_uses_form_field_names() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let submission = schemas.get("EoiSubmission").expect("EoiSubmission schema");

        for field in ["job_reference", "date_of_birth", "skills", "other_skills"] {
            assert_object_schema_has_field(submission, field);
        }
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
