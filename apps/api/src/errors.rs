use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::normalize::NormalizeError;
use crate::llm_client::LlmError;
use crate::render::pdf::ExportError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Every variant renders as `{"error": <message>, "code": <CODE>}`. Upstream
/// details are logged here and never echoed to the client.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unsupported media type: {0}")]
    UnsupportedMedia(String),

    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Upstream rate limit reached")]
    RateLimited,

    #[error("Upstream billing gate")]
    BillingGate,

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Upstream returned empty content")]
    EmptyResponse,

    #[error("Malformed model output: {0}")]
    MalformedModelOutput(String),

    #[error("Export error: {0}")]
    Export(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable code for the variant.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::UnsupportedMedia(_) => "UNSUPPORTED_MEDIA_TYPE",
            AppError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::RateLimited => "RATE_LIMITED",
            AppError::BillingGate => "BILLING_GATE",
            AppError::Upstream(_) => "UPSTREAM_FAILURE",
            AppError::EmptyResponse => "EMPTY_RESPONSE",
            AppError::MalformedModelOutput(_) => "MALFORMED_MODEL_OUTPUT",
            AppError::Export(_) => "EXPORT_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::MissingCredential => {
                AppError::Configuration("gateway credential is not configured".to_string())
            }
            LlmError::RateLimited => AppError::RateLimited,
            LlmError::PaymentRequired => AppError::BillingGate,
            LlmError::EmptyContent => AppError::EmptyResponse,
            other => AppError::Upstream(other.to_string()),
        }
    }
}

impl From<NormalizeError> for AppError {
    fn from(err: NormalizeError) -> Self {
        AppError::MalformedModelOutput(err.to_string())
    }
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        AppError::Export(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(rejection.body_text())
        } else {
            AppError::Validation(rejection.body_text())
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::UnsupportedMedia(msg) => (StatusCode::UNSUPPORTED_MEDIA_TYPE, msg.clone()),
            AppError::PayloadTooLarge(msg) => (StatusCode::PAYLOAD_TOO_LARGE, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Serviço indisponível no momento. Tente novamente mais tarde.".to_string(),
                )
            }
            AppError::RateLimited => {
                tracing::warn!("Upstream rate limit reached");
                (
                    StatusCode::TOO_MANY_REQUESTS,
                    "Muitos pedidos! Espera um pouquinho e tenta de novo. 🔥".to_string(),
                )
            }
            AppError::BillingGate => {
                tracing::error!("Upstream payment required");
                (
                    StatusCode::PAYMENT_REQUIRED,
                    "Serviço temporariamente indisponível. Tente novamente mais tarde.".to_string(),
                )
            }
            AppError::Upstream(detail) => {
                tracing::error!("Gateway error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao processar o CV. Tente novamente.".to_string(),
                )
            }
            AppError::EmptyResponse => {
                tracing::error!("No content in gateway response");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Resposta vazia da IA. Tente novamente.".to_string(),
                )
            }
            AppError::MalformedModelOutput(detail) => {
                tracing::error!("Malformed model output: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro ao processar resposta da IA. Tente novamente.".to_string(),
                )
            }
            AppError::Export(detail) => {
                tracing::error!("Export error: {detail}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Não foi possível gerar o documento. Tente novamente.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Erro inesperado. Tente novamente.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
            "code": code,
        }));

        (status, body).into_response()
    }
}
