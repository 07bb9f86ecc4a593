use crate::error::ApiError;
use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

/// `Json` whose rejections (bad syntax, wrong shape, missing content type)
/// come back as the usual `{"error": ...}` body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                tracing::debug!(status = %rejection.status(), "rejected JSON body");
                Err(ApiError::Validation(format!(
                    "Invalid request body: {}",
                    rejection.body_text()
                )))
            }
        }
    }
}
