//! Query string extractor that runs `validator` rules.

use crate::errors::AppError;
use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Like [`ValidatedJson`](super::ValidatedJson) for query parameters.
///
/// Unparseable values (`?page=abc`, `?page=-1` into a `u64`) reject with
/// `400 INVALID_QUERY`; rule violations with `400 VALIDATION_ERROR`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<T>::from_request_parts(parts, state).await?;
        params.validate()?;
        Ok(ValidatedQuery(params))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
        routing::get,
    };
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Deserialize, Validate)]
    struct Window {
        #[serde(default)]
        page: u64,
        #[validate(range(min = 1, max = 100))]
        #[serde(default = "default_size")]
        size: u64,
    }

    fn default_size() -> u64 {
        10
    }

    async fn status_for(uri: &str) -> StatusCode {
        let app = Router::new().route(
            "/",
            get(|ValidatedQuery(w): ValidatedQuery<Window>| async move {
                format!("{}:{}", w.page, w.size)
            }),
        );
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn test_defaults_apply() {
        assert_eq!(status_for("/").await, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_out_of_range_rejected() {
        assert_eq!(status_for("/?size=0").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?size=101").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unparseable_rejected() {
        assert_eq!(status_for("/?page=abc").await, StatusCode::BAD_REQUEST);
        assert_eq!(status_for("/?page=-1").await, StatusCode::BAD_REQUEST);
    }
}
