// src/common/error.rs

use std::collections::HashMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::{common::i18n::I18nStore, middleware::i18n::Locale};

// Erro interno da aplicação. Os handlers nunca respondem com ele diretamente:
// ele é convertido em `ApiError` já traduzido para o idioma do cliente.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Corpo da requisição inválido: {0}")]
    MalformedBody(String),

    #[error("Parâmetro '{param}' inválido: {value}")]
    InvalidQueryParam { param: &'static str, value: String },

    #[error("Token inválido")]
    InvalidToken,

    #[error("Fornecedor não encontrado")]
    SupplierNotFound,

    #[error("Página inválida")]
    InvalidPage,

    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

// O que de fato vai para o cliente.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: String,
    pub details: Option<Value>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_)
            | AppError::MalformedBody(_)
            | AppError::InvalidQueryParam { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::SupplierNotFound | AppError::InvalidPage => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::InternalServerError(_)
            | AppError::JwtError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Converte o erro para a resposta HTTP, traduzindo as mensagens para o idioma do cliente.
    pub fn to_api_error(self, locale: &Locale, store: &I18nStore) -> ApiError {
        let status = self.status();
        let lang = locale.0.as_str();

        match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            let code = e.message.as_deref().unwrap_or(&*e.code);
                            store.translate(lang, code)
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status,
                    error: store.translate(lang, "validation_error"),
                    details: Some(json!(details)),
                }
            }
            AppError::MalformedBody(reason) => ApiError {
                status,
                error: store.translate(lang, "malformed_body"),
                details: Some(json!({ "body": [reason] })),
            },
            AppError::InvalidQueryParam { param, value } => {
                let mut details = serde_json::Map::new();
                details.insert(
                    param.to_string(),
                    json!([store.translate(lang, "invalid_uuid"), value]),
                );
                ApiError {
                    status,
                    error: store.translate(lang, "invalid_query_param"),
                    details: Some(Value::Object(details)),
                }
            }
            AppError::InvalidToken => ApiError {
                status,
                error: store.translate(lang, "invalid_token"),
                details: None,
            },
            AppError::SupplierNotFound => ApiError {
                status,
                error: store.translate(lang, "supplier_not_found"),
                details: None,
            },
            AppError::InvalidPage => ApiError {
                status,
                error: store.translate(lang, "invalid_page"),
                details: None,
            },
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError {
                    status,
                    error: store.translate(lang, "internal_error"),
                    details: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.error, "details": details }),
            None => json!({ "error": self.error }),
        };
        (self.status, Json(body)).into_response()
    }
}

// Para rejeições fora de um handler (sem acesso ao idioma pedido).
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}
