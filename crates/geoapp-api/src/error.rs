use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use geoapp_core::error::GeoappError;
use serde_json::json;

/// Error half of every handler: a status plus the `{"error": ...}` body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into(), details: None }
    }

    pub fn with_details(self, details: impl Into<String>) -> Self {
        Self { details: Some(details.into()), ..self }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut body = json!({ "error": self.message });
        if let Some(details) = self.details {
            body["details"] = details.into();
        }
        (self.status, Json(body)).into_response()
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        Self::new(StatusCode::BAD_REQUEST, "Invalid query string").with_details(rejection.body_text())
    }
}

impl From<GeoappError> for ApiError {
    fn from(err: GeoappError) -> Self {
        if err.is_client_error() {
            tracing::debug!(error = %err, "Rejected request");
        }

        match &err {
            GeoappError::UnknownTable { .. } => Self::new(StatusCode::NOT_FOUND, err.to_string()),
            GeoappError::InvalidFilters { .. } => Self::new(StatusCode::BAD_REQUEST, err.to_string()),
            GeoappError::InvalidCoordinates { reason } => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid coordinates").with_details(reason.clone())
            }
            GeoappError::InvalidParameter { .. } => {
                Self::new(StatusCode::BAD_REQUEST, "Invalid parameter").with_details(err.to_string())
            }
            _ => {
                tracing::error!(error = %err, "Request failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
                    .with_details(err.to_string())
            }
        }
    }
}
