use crate::error::ChunkError;
use crate::store::ChunkStore;
use std::sync::Arc;
use axum::{
    routing::get,
    Router,
    Json,
    extract::{ Path, State },
    response::{ IntoResponse, Response },
    http::StatusCode,
};
use serde::Serialize;
use tower_http::cors::{ Any, CorsLayer };
use log::{ debug, error };

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Clone)]
struct AppState {
    store: Arc<ChunkStore>,
}

impl IntoResponse for ChunkError {
    fn into_response(self) -> Response {
        let code = match &self {
            ChunkError::NotFound(_) => StatusCode::NOT_FOUND,
            ChunkError::Config(_) | ChunkError::Format(_) | ChunkError::Io { .. } => {
                error!("Request failed: {}", self);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        (code, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Builds the HTTP routes over a loaded store.
pub fn router(store: Arc<ChunkStore>) -> Router {
    let app_state = AppState { store };

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/chunks", get(list_chunks_handler))
        .route("/chunk/{index}", get(get_chunk_handler))
        .layer(cors)
        .with_state(app_state)
}

async fn list_chunks_handler(State(state): State<AppState>) -> Response {
    debug!("Listing {} chunks", state.store.len());
    Json(state.store.list()).into_response()
}

async fn get_chunk_handler(
    State(state): State<AppState>,
    Path(index): Path<String>
) -> Response {
    match state.store.get_by_segment(&index) {
        Ok(chunk) => Json(chunk).into_response(),
        Err(e) => {
            debug!("{}", e);
            e.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::chat::{ Chunk, Message };
    use axum::body::{ to_bytes, Body };
    use axum::http;
    use serde_json::{ json, Value };
    use tower::ServiceExt;

    fn store() -> Arc<ChunkStore> {
        let chunks = ["a", "b", "c"]
            .iter()
            .map(|t| {
                let msg: Message = json!({ "content": t }).as_object().cloned().unwrap();
                Chunk::new(vec![msg])
            })
            .collect();
        Arc::new(ChunkStore::new(chunks))
    }

    async fn send(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(http::Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn lists_all_chunks_in_order() {
        let (status, body) = send(router(store()), "/chunks").await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            json!([
                { "messages": [{ "content": "a" }] },
                { "messages": [{ "content": "b" }] },
                { "messages": [{ "content": "c" }] }
            ])
        );
    }

    #[tokio::test]
    async fn empty_store_lists_empty_array() {
        let (status, body) = send(router(Arc::new(ChunkStore::default())), "/chunks").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_slice::<Value>(&body).unwrap(), json!([]));
    }

    #[tokio::test]
    async fn returns_chunk_by_index() {
        for (index, text) in ["a", "b", "c"].iter().enumerate() {
            let (status, body) = send(router(store()), &format!("/chunk/{}", index)).await;
            assert_eq!(status, StatusCode::OK);
            let value: Value = serde_json::from_slice(&body).unwrap();
            assert_eq!(value, json!({ "messages": [{ "content": text }] }));
        }
    }

    #[tokio::test]
    async fn bad_indices_are_not_found() {
        for uri in ["/chunk/3", "/chunk/-1", "/chunk/abc", "/chunk/1.0", "/chunk/"] {
            let (status, _) = send(router(store()), uri).await;
            assert_eq!(status, StatusCode::NOT_FOUND, "uri {}", uri);
        }
    }

    #[tokio::test]
    async fn repeated_requests_are_all_served() {
        let app = router(store());
        for _ in 0..50 {
            let (status, _) = send(app.clone(), "/chunks").await;
            assert_eq!(status, StatusCode::OK);
        }
        let (status, _) = send(app.clone(), "/chunk/9").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = send(app, "/chunk/0").await;
        assert_eq!(status, StatusCode::OK);
    }
}
