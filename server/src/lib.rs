use anyhow::Result;
use axum::{extract::{Path, Query, State}, http::HeaderValue, routing::get, Json, Router};
use minisearch_core::{clean_token, find_query_matches_with, load_corpus, DocUrl, InvertedIndex, ModifierMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Deserialize)]
pub struct SearchParams {
    pub q: String,
    #[serde(default)]
    pub mode: ModifierMode,
}

#[derive(Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub mode: ModifierMode,
    pub took_s: f64,
    pub total_hits: usize,
    pub results: Vec<DocUrl>,
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub num_docs: usize,
    pub num_terms: usize,
}

#[derive(Serialize)]
pub struct TermResponse {
    pub term: String,
    pub postings: Vec<DocUrl>,
}

/// The index is never written after startup, so handlers share it without a lock.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<InvertedIndex>,
    pub num_docs: usize,
}

impl AppState {
    pub fn new(num_docs: usize, index: InvertedIndex) -> Self {
        Self { index: Arc::new(index), num_docs }
    }
}

/// Index the corpus at `corpus` and build the router. Fails if the corpus cannot be read.
pub fn build_app(corpus: &std::path::Path) -> Result<Router> {
    let (num_docs, index) = load_corpus(corpus)?;
    tracing::info!(num_docs, num_terms = index.num_terms(), corpus = %corpus.display(), "indexed corpus");
    Ok(router(AppState::new(num_docs, index)))
}

pub fn router(state: AppState) -> Router {
    let cors = cors_layer(std::env::var("CORS_ALLOW_ORIGIN").ok().as_deref());
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/stats", get(stats_handler))
        .route("/search", get(search_handler))
        .route("/term/:term", get(term_handler))
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Origins listed in a comma-separated `CORS_ALLOW_ORIGIN` value. Entries that
/// are not valid header values are skipped.
pub fn allowed_origins(list: &str) -> Vec<HeaderValue> {
    list.split(',').filter_map(|s| s.trim().parse().ok()).collect()
}

/// Any origin may query the index unless `allow_origin` names at least one valid origin.
pub fn cors_layer(allow_origin: Option<&str>) -> CorsLayer {
    let origins = allow_origin.map(allowed_origins).unwrap_or_default();
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(AllowOrigin::list(origins))
    }
}

pub async fn search_handler(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let start = std::time::Instant::now();
    let matches = find_query_matches_with(&state.index, &params.q, params.mode);
    let total_hits = matches.len();
    let elapsed = start.elapsed();
    Json(SearchResponse {
        query: params.q,
        mode: params.mode,
        took_s: elapsed.as_secs_f64(),
        total_hits,
        results: matches.into_iter().collect(),
    })
}

pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse { num_docs: state.num_docs, num_terms: state.index.num_terms() })
}

pub async fn term_handler(State(state): State<AppState>, Path(raw): Path<String>) -> Json<TermResponse> {
    let term = clean_token(&raw);
    let postings = state.index.postings(&term).iter().cloned().collect();
    Json(TermResponse { term, postings })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_list_skips_blank_and_invalid_entries() {
        let origins = allowed_origins("https://a.example, ,https://b.example,bad\norigin");
        assert_eq!(origins, vec![HeaderValue::from_static("https://a.example"), HeaderValue::from_static("https://b.example")]);
    }

    #[test]
    fn empty_origin_list_is_empty() {
        assert!(allowed_origins("").is_empty());
        assert!(allowed_origins(" , ").is_empty());
    }
}
