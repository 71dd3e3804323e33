use super::service::{GlossarySearch, ServiceError};
use super::types::{QueryError, SearchOpts, SuggestAllReply, SuggestParams};
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde_json::{Map, Value};
use std::sync::Arc;

type RecordsReply = Result<Json<Vec<Map<String, Value>>>, (StatusCode, String)>;
type WordsReply = Result<Json<Vec<String>>, (StatusCode, String)>;

fn reply_error(error: ServiceError) -> (StatusCode, String) {
    match &error {
        ServiceError::Query(_) => (StatusCode::BAD_REQUEST, error.to_string()),
        ServiceError::Store(store_error) => {
            tracing::error!("search store failure: {store_error}");
            (
                StatusCode::BAD_GATEWAY,
                "search store unavailable".to_string(),
            )
        }
    }
}

pub async fn handle_search_field(
    Query(params): Query<Vec<(String, String)>>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> RecordsReply {
    // Extracted as a pair list, not a map: repeated parameter names count as
    // separate field arguments.
    let mut pairs = params.into_iter();
    let (field, word) = match (pairs.next(), pairs.next()) {
        (Some(pair), None) => pair,
        _ => {
            return Err((
                StatusCode::BAD_REQUEST,
                QueryError::FieldArgCount.to_string(),
            ))
        }
    };
    let results = service
        .run_field(&field, &word)
        .await
        .map_err(reply_error)?;
    Ok(Json(results))
}

pub async fn handle_search_word(
    Path(word): Path<String>,
    Query(opts): Query<SearchOpts>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> RecordsReply {
    let results = service.run(&word, &opts).await.map_err(reply_error)?;
    Ok(Json(results))
}

pub async fn handle_search_all(
    Query(opts): Query<SearchOpts>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> RecordsReply {
    let results = service.list_all(&opts).await.map_err(reply_error)?;
    Ok(Json(results))
}

pub async fn handle_suggest(
    Path(word): Path<String>,
    Query(params): Query<SuggestParams>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> WordsReply {
    let words = service
        .suggest(&word, params.count)
        .await
        .map_err(reply_error)?;
    Ok(Json(words))
}

pub async fn handle_completion(
    Path(word): Path<String>,
    Query(params): Query<SuggestParams>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> WordsReply {
    let words = service
        .complete(&word, params.count)
        .await
        .map_err(reply_error)?;
    Ok(Json(words))
}

pub async fn handle_suggest_all(
    Path(word): Path<String>,
    Query(params): Query<SuggestParams>,
    Extension(service): Extension<Arc<GlossarySearch>>,
) -> Result<Json<SuggestAllReply>, (StatusCode, String)> {
    let merged = service
        .suggest_all(&word, params.count)
        .await
        .map_err(reply_error)?;
    Ok(Json(merged))
}
