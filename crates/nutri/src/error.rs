use crate::config::ConfigError;
use crate::ingest::{BulkImportError, InputError};
use crate::nutriscore::NutriscoreError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Scoring(NutriscoreError),
    Input(InputError),
    Import(BulkImportError),
}

impl AppError {
    /// Stable tag letting clients branch on the failure class.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Scoring(NutriscoreError::UnsupportedCategory(_)) => "unsupported_category",
            AppError::Input(_) | AppError::Import(BulkImportError::InvalidRow { .. }) => {
                "malformed_input"
            }
            AppError::Import(BulkImportError::UnrecognizedFileFormat { .. }) => {
                "unrecognized_file_format"
            }
            AppError::Import(BulkImportError::UploadTooLarge { .. }) => "payload_too_large",
            AppError::Import(BulkImportError::Io(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => "internal",
            AppError::Import(_) => "invalid_upload",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Scoring(_) => StatusCode::BAD_REQUEST,
            AppError::Input(_) | AppError::Import(BulkImportError::InvalidRow { .. }) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::Import(BulkImportError::UploadTooLarge { .. }) => {
                StatusCode::PAYLOAD_TOO_LARGE
            }
            AppError::Import(BulkImportError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Config(_) | AppError::Telemetry(_) | AppError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Scoring(err) => write!(f, "{}", err),
            AppError::Input(err) => write!(f, "invalid product: {}", err),
            AppError::Import(err) => write!(f, "bulk import failed: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Input(err) => Some(err),
            AppError::Import(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string(), "kind": self.kind() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<NutriscoreError> for AppError {
    fn from(value: NutriscoreError) -> Self {
        Self::Scoring(value)
    }
}

impl From<InputError> for AppError {
    fn from(value: InputError) -> Self {
        Self::Input(value)
    }
}

impl From<BulkImportError> for AppError {
    fn from(value: BulkImportError) -> Self {
        Self::Import(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nutriscore::ProductCategory;

    #[test]
    fn unsupported_category_is_a_client_error() {
        let error = AppError::from(NutriscoreError::UnsupportedCategory(ProductCategory::Fats));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.kind(), "unsupported_category");
        assert!(error.to_string().contains("'fats'"));
    }

    #[test]
    fn malformed_rows_and_fields_are_unprocessable() {
        let field = AppError::from(InputError::Missing { field: "sugar_g" });
        assert_eq!(field.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let row = AppError::from(BulkImportError::InvalidRow {
            row: 3,
            source: InputError::Missing { field: "sugar_g" },
        });
        assert_eq!(row.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(row.kind(), "malformed_input");
    }

    #[test]
    fn unrecognized_upload_is_bad_request() {
        let error = AppError::from(BulkImportError::UnrecognizedFileFormat {
            file_name: "data.json".to_string(),
        });
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error.kind(), "unrecognized_file_format");
    }

    #[test]
    fn undecodable_body_is_malformed_input() {
        let error = AppError::from(InputError::Undecodable {
            reason: "missing field `energy_kj`".to_string(),
        });
        assert_eq!(error.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(error.kind(), "malformed_input");
        assert!(error.to_string().contains("energy_kj"));
    }

    #[test]
    fn oversized_upload_is_payload_too_large() {
        let error = AppError::from(BulkImportError::UploadTooLarge {
            reason: "length limit exceeded".to_string(),
        });
        assert_eq!(error.status(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(error.kind(), "payload_too_large");
    }

    #[test]
    fn configuration_failures_are_internal() {
        let error = AppError::from(ConfigError::InvalidPort);
        assert_eq!(error.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error.kind(), "internal");
    }
}
