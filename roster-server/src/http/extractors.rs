//! Custom Axum extractors

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use crate::models::ValidationError;
use super::error::ApiError;

/// Extract and validate an integer id from path
pub struct ValidId(pub i64);

impl<S> FromRequestParts<S> for ValidId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::Validation(ValidationError::InvalidParams { reason: e.body_text() }))?;

        let id = raw.trim().parse::<i64>().map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "id",
                reason: "must be an integer",
            })
        })?;

        Ok(Self(id))
    }
}

/// Request parameters from a urlencoded form body, or from the query
/// string when the request has no form body.
pub struct ValidForm<T>(pub T);

impl<S, T> FromRequest<S> for ValidForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let uri = req.uri().clone();

        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(Self(value)),
            Err(FormRejection::InvalidFormContentType(_)) => {
                let Query(value) = Query::<T>::try_from_uri(&uri).map_err(|e| {
                    ApiError::Validation(ValidationError::InvalidParams { reason: e.body_text() })
                })?;
                Ok(Self(value))
            }
            Err(rejection) => Err(ApiError::Validation(ValidationError::InvalidParams {
                reason: rejection.body_text(),
            })),
        }
    }
}
