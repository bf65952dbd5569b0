use std::collections::HashMap;
use std::path::PathBuf;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::QueryRejection;
use serde_json::json;
use thiserror::Error;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Erros de leitura do dataset. Todos são fatais na inicialização.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("arquivo obrigatório não encontrado: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("{file}: coluna obrigatória '{column}' ausente")]
    MissingColumn { file: String, column: String },

    #[error("{file}, linha {line}: valor inválido '{value}' na coluna '{column}'")]
    Malformed {
        file: String,
        line: u64,
        column: String,
        value: String,
    },

    #[error("{file}: falha ao ler CSV: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Query string que nem chega a ser desserializada (ex.: year=abc)
    #[error("Query string inválida: {0}")]
    InvalidQuery(QueryRejection),
}

/// O erro que realmente sai na resposta HTTP, já traduzido.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<HashMap<String, Vec<String>>>,
}

impl AppError {
    pub fn to_api_error(&self, locale: &Locale, store: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            AppError::ValidationError(errors) => {
                let mut details = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| store.translate(lang, &format!("error.{}", e.code)))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: store.translate(lang, "error.validation"),
                    details: Some(details),
                }
            }
            AppError::InvalidQuery(rejection) => {
                tracing::debug!("Query rejeitada: {}", rejection);
                ApiError {
                    status: StatusCode::BAD_REQUEST,
                    message: store.translate(lang, "error.validation"),
                    details: None,
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match self.details {
            Some(details) => json!({ "error": self.message, "details": details }),
            None => json!({ "error": self.message }),
        };
        (self.status, Json(body)).into_response()
    }
}
