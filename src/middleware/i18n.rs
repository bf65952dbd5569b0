// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

const SUPPORTED_LANGS: &[&str] = &["en", "pt"];

// Extrator de idioma (a partir do Accept-Language)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale(pub String);

impl Locale {
    pub fn from_header(header_str: &str) -> Self {
        // "pt-BR,pt;q=0.9,en;q=0.8" -> primeiro idioma que sabemos responder
        let lang = accept_language::parse(header_str)
            .into_iter()
            .map(|tag| tag.split('-').next().unwrap_or(&tag).to_ascii_lowercase())
            .find(|primary| SUPPORTED_LANGS.contains(&primary.as_str()))
            .unwrap_or_else(|| DEFAULT_LANG.to_string());

        Locale(lang)
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}
