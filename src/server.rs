//! HTTP service translating keys for the language a client asks for.
//!
//! The language of a request is taken from the `lang` query parameter, then
//! from the best ranked `Accept-Language` entry the document has a branch for,
//! then from the translator's own language.

use crate::config::Config;
use crate::i18n::{
    base_language, parse_accept_language, FormatArg, LanguagePreference, Translator,
};
use anyhow::{Context, Result};
use axum::{
    extract::{Path, Query, State},
    http::{header::ACCEPT_LANGUAGE, HeaderMap},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state for all handlers.
pub struct AppState {
    pub translator: Translator,
}

#[derive(Debug, Default, Deserialize)]
pub struct TranslateQuery {
    /// Explicit language, overrides `Accept-Language`
    pub lang: Option<String>,
    /// Comma-separated template arguments
    pub args: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TranslateResponse {
    pub key: String,
    pub language: String,
    pub text: String,
}

/// Build the application router.
pub fn router(translator: Translator) -> Router {
    let state = Arc::new(AppState { translator });

    Router::new()
        .route("/health", get(health))
        .route("/languages", get(languages))
        .route("/preferences", get(preferences))
        .route("/translate/:key", get(translate))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind to the configured port and serve until the process exits.
pub async fn run_server(config: &Config, translator: Translator) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("Listening on {}", addr);
    axum::serve(listener, router(translator))
        .await
        .context("Server error")?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

async fn languages(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    let mut languages: Vec<String> = state
        .translator
        .languages()
        .into_iter()
        .map(String::from)
        .collect();
    languages.sort();

    Json(languages)
}

/// Echo the ranked `Accept-Language` preferences of the request.
async fn preferences(headers: HeaderMap) -> Json<Vec<LanguagePreference>> {
    let header = headers
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    Json(parse_accept_language(header))
}

async fn translate(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
    Query(query): Query<TranslateQuery>,
    headers: HeaderMap,
) -> Json<TranslateResponse> {
    let language = query.lang.unwrap_or_else(|| {
        let accept_language = headers
            .get(ACCEPT_LANGUAGE)
            .and_then(|value| value.to_str().ok());
        select_language(&state.translator, accept_language)
    });

    let args: Vec<FormatArg> = query
        .args
        .as_deref()
        .map(|args| args.split(',').map(FormatArg::from).collect())
        .unwrap_or_default();

    let text = state.translator.tl(&language, &key, &args);

    Json(TranslateResponse {
        key,
        language,
        text,
    })
}

/// Pick the best ranked preference whose base language exists in the document.
///
/// Falls back to the translator's current language when nothing matches.
pub fn select_language(translator: &Translator, accept_language: Option<&str>) -> String {
    let available = translator.languages();

    accept_language
        .map(parse_accept_language)
        .unwrap_or_default()
        .iter()
        .map(base_language)
        .find(|base| available.contains(base))
        .map_or_else(|| translator.language().to_string(), str::to_string)
}
