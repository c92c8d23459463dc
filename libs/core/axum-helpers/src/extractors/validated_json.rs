//! JSON body extractor that runs `validator` rules.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// Deserializes the body as JSON and validates it.
///
/// - malformed or mistyped JSON: `400 INVALID_JSON`
/// - missing `Content-Type: application/json`: `415`
/// - rule violations: `400 VALIDATION_ERROR` with per-field details
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct NewProduct {
///     #[validate(length(min = 3, max = 30))]
///     name: String,
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<NewProduct>) -> String {
///     payload.name
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(data) = Json::<T>::from_request(req, state).await?;
        data.validate()?;
        Ok(ValidatedJson(data))
    }
}
