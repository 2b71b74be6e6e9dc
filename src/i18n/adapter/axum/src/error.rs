/* src/i18n/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use seam_i18n::I18nError;

/// Newtype wrapper to implement `IntoResponse` for `I18nError`.
#[derive(Debug)]
pub struct AxumError(pub I18nError);

impl AxumError {
  fn status(&self) -> StatusCode {
    match self.0 {
      I18nError::InvalidLocale(_) => StatusCode::BAD_REQUEST,
      I18nError::MissingMessage { .. } => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let status = self.status();
    let body = serde_json::json!({
      "ok": false,
      "error": {
        "code": self.0.code(),
        "message": self.0.to_string(),
        "transient": false,
      }
    });
    (status, axum::Json(body)).into_response()
  }
}

impl From<I18nError> for AxumError {
  fn from(err: I18nError) -> Self {
    Self(err)
  }
}
