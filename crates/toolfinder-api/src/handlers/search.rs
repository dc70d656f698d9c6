//! Search endpoints.
//!
//! - `POST /api/search`: classify, compile and execute a free-text query
//! - `POST /api/search/compile`: compile a caller-supplied classification
//!   without touching the catalogue

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use toolfinder_core::{
    Classification, CompiledQuery, Error, FieldJoin, SearchRequest, SearchResponse,
};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn search_tools(
    State(state): State<AppState>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload?;
    let response = state.search.search(&request).await?;
    Ok(Json(response))
}

/// Decoded straight from the body stream so keyword order survives; a
/// non-object `classification` is rejected by the extractor.
#[derive(Debug, Deserialize)]
pub struct CompileRequest {
    #[serde(default)]
    pub classification: Option<Classification>,
    #[serde(default, rename = "match")]
    pub field_join: Option<FieldJoin>,
}

pub async fn compile_query(
    State(state): State<AppState>,
    payload: Result<Json<CompileRequest>, JsonRejection>,
) -> Result<Json<CompiledQuery>, ApiError> {
    let Json(request) = payload?;
    let classification = request.classification.ok_or_else(|| {
        Error::InvalidInput("Missing field `classification`".to_string())
    })?;
    Ok(Json(state.search.compile(&classification, request.field_join)))
}
