//! Request extractors.

use async_trait::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::error::ApiError;
use crate::domain::schema::Schema;
use crate::domain::validation::{parse_payload, Violations};

/// JSON body decoded with defaults applied and constraints checked.
/// Rejections never reach a handler, so nothing invalid is persisted.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: Schema + DeserializeOwned + Validate,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(parse_payload(&body)?))
    }
}

/// Query string decoded parameter by parameter. A value that does not parse
/// as its declared type is a validation failure naming that parameter.
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = parts.uri.query().unwrap_or_default();
        let deserializer = serde_urlencoded::Deserializer::new(form_urlencoded::parse(query.as_bytes()));
        serde_path_to_error::deserialize(deserializer).map(Self).map_err(|err| {
            let path = err.path().to_string();
            let field = if path == "." { "query".to_string() } else { path };
            ApiError::Validation(Violations::single(field, err.into_inner().to_string()))
        })
    }
}
