//! Page view envelope returned by every HTML-facing handler.
//!
//! Rendering happens elsewhere; handlers only say which page this is and
//! hand over a typed body.

use actix_web::{HttpResponse, http::StatusCode, http::header};
use serde::Serialize;
use utoipa::ToSchema;

/// Suffix appended to every page title.
pub const SITE_NAME: &str = "TechHive";

/// Title, description and body of one page.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct PageView<B> {
    pub title: String,
    pub description: String,
    pub body: B,
}

impl<B: Serialize> PageView<B> {
    /// Build a page titled `"{heading} | TechHive"`.
    ///
    /// # Examples
    /// ```
    /// use careers::inbound::http::page::PageView;
    ///
    /// let page = PageView::new("Career Opportunities", "Open roles", ());
    /// assert_eq!(page.title, "Career Opportunities | TechHive");
    /// ```
    pub fn new(heading: &str, description: impl Into<String>, body: B) -> Self {
        Self {
            title: format!("{heading} | {SITE_NAME}"),
            description: description.into(),
            body,
        }
    }

    /// `200 OK` with the page as JSON.
    pub fn ok(self) -> HttpResponse {
        self.respond(StatusCode::OK)
    }

    /// Respond with `status`; page views are never cached.
    pub fn respond(self, status: StatusCode) -> HttpResponse {
        HttpResponse::build(status)
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(self)
    }
}

/// `303 See Other` to `location`.
pub fn see_other(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}
