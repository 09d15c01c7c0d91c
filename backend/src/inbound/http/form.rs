//! URL-encoded form extractor that keeps repeated keys.
//!
//! `web::Form` deserialises into a struct and drops repeated fields; the
//! registration form submits one `roles` entry per checked box.

use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;
use url::form_urlencoded;

use crate::domain::{Error, PairChoices};

/// Upper bound on accepted form bodies.
const FORM_LIMIT: usize = 16 * 1024;

/// Decoded form fields in submission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormFields(Vec<(String, String)>);

impl FormFields {
    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn parse(body: &[u8]) -> Self {
        Self(form_urlencoded::parse(body).into_owned().collect())
    }

    /// First value submitted for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value.as_str())
    }

    /// First value for `key`, owned.
    pub fn owned(&self, key: &str) -> Option<String> {
        self.get(key).map(str::to_owned)
    }

    /// Every value submitted for `key`.
    pub fn get_all(&self, key: &str) -> Vec<String> {
        self.0
            .iter()
            .filter(|(name, _)| name == key)
            .map(|(_, value)| value.clone())
            .collect()
    }

    /// Values of `pair_{i}` fields keyed by pair index.
    pub fn pair_choices(&self) -> PairChoices {
        self.0
            .iter()
            .filter_map(|(name, value)| {
                let index = name.strip_prefix("pair_")?.parse::<usize>().ok()?;
                Some((index, value.clone()))
            })
            .collect()
    }
}

impl FromRequest for FormFields {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = web::Bytes::from_request(req, payload);
        Box::pin(async move {
            let body = fut.await?;
            if body.len() > FORM_LIMIT {
                return Err(Error::invalid_request("form body too large").into());
            }
            Ok(FormFields::parse(&body))
        })
    }
}
