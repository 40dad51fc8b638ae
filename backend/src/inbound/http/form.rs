//! `application/x-www-form-urlencoded` bodies with repeated keys.
//!
//! `web::Form` keeps only one value per key, which loses checkbox groups
//! such as the skills list. [`FormFields`] keeps every pair in order.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::Error;

const MAX_FORM_BYTES: usize = 64 * 1024;

/// Every decoded `(name, value)` pair from a form body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Decode `body`.
    ///
    /// # Examples
    /// ```
    /// use careers::inbound::http::form::FormFields;
    ///
    /// let form = FormFields::parse(b"skills=html5&skills%5B%5D=git&first_name=Ana+Li");
    /// assert_eq!(form.all(&["skills", "skills[]"]), vec!["html5", "git"]);
    /// assert_eq!(form.value("first_name"), "Ana Li");
    /// ```
    pub fn parse(body: &[u8]) -> Self {
        Self(
            url::form_urlencoded::parse(body)
                .map(|(name, value)| (name.into_owned(), value.into_owned()))
                .collect(),
        )
    }

    /// Last value submitted for `name`, or empty.
    pub fn value(&self, name: &str) -> String {
        self.0
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
            .unwrap_or_default()
    }

    /// Every value submitted under any of `names`, in body order.
    pub fn all(&self, names: &[&str]) -> Vec<String> {
        self.0
            .iter()
            .filter(|(key, _)| names.contains(&key.as_str()))
            .map(|(_, value)| value.clone())
            .collect()
    }
}

impl FromRequest for FormFields {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let body = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let bytes = body
                .await
                .map_err(|_| Error::invalid_request("Form body could not be read."))?;
            if bytes.len() > MAX_FORM_BYTES {
                return Err(Error::invalid_request("Form body is too large."));
            }
            Ok(Self::parse(&bytes))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn missing_fields_read_as_empty() {
        let form = FormFields::parse(b"first_name=Ana");
        assert_eq!(form.value("last_name"), "");
        assert!(form.all(&["skills"]).is_empty());
    }

    #[rstest]
    fn later_values_win_for_single_fields() {
        let form = FormFields::parse(b"state=VIC&state=NSW");
        assert_eq!(form.value("state"), "NSW");
    }

    #[rstest]
    fn percent_encoding_is_decoded() {
        let form = FormFields::parse(b"email=ana%40example.com&other_skills=a%26b");
        assert_eq!(form.value("email"), "ana@example.com");
        assert_eq!(form.value("other_skills"), "a&b");
    }
}
