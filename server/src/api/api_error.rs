use poem::{error::ResponseError, http::StatusCode, IntoResponse, Response};
use poem_openapi::{payload::Json, Object};
use serde_json::Value;
use visa_directory_macros::{DisplayUpperSnake, JsonParameters};

use crate::directory::DirectoryError;

#[derive(Debug, DisplayUpperSnake, JsonParameters, thiserror::Error)]
pub enum ApiError {
    DataUnavailable,
    InvalidQuery { parameter: &'static str },
    NotFound { country: String },
}

#[derive(Object)]
#[oai(rename_all = "camelCase", skip_serializing_if_is_none = true)]
pub struct ApiErrorBody {
    code: String,
    parameters: Option<Vec<Value>>,
}

impl ResponseError for ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::DataUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            Self::InvalidQuery { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn as_response(&self) -> Response {
        Json(ApiErrorBody {
            code: self.to_string(),
            parameters: self.parameters(),
        })
        .with_status(self.status())
        .into_response()
    }
}

impl From<DirectoryError> for ApiError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::DataUnavailable => Self::DataUnavailable,
            DirectoryError::InvalidQuery(parameter) => Self::InvalidQuery { parameter },
            DirectoryError::NotFound(country) => Self::NotFound { country },
        }
    }
}
