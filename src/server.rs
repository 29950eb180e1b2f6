use async_openai::Client;
use async_openai::config::OpenAIConfig;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::AppError;
use crate::ai::OAIGenerator;
use crate::classify::dbscan::DbscanClusterer;
use crate::classify::openai::OAIEmbedder;
use crate::classify::{ClusterParams, ClusterResult, TabClassifier};
use crate::cli::Cli;
use crate::tabs::TabContent;

/// Shared handles for the request handlers. The model client is
/// connection-pooled and safe to share across concurrent requests.
#[derive(Clone)]
pub struct AppState {
    client: Client<OpenAIConfig>,
    embed_model: String,
    name_model: String,
    params: ClusterParams,
}

impl AppState {
    pub fn new(client: Client<OpenAIConfig>, cli: &Cli) -> Self {
        Self {
            client,
            embed_model: cli.embed_model.clone(),
            name_model: cli.name_model.clone(),
            params: cli.cluster_params(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ClusterRequest {
    pub tabs: Vec<TabContent>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
}

/// The caller is a browser extension, so CORS stays wide open.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/cluster", post(cluster_tabs))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy"}))
}

async fn cluster_tabs(
    State(state): State<AppState>,
    Json(request): Json<ClusterRequest>,
) -> Result<Json<Vec<ClusterResult>>, (StatusCode, Json<ErrorBody>)> {
    info!("Clustering {} tabs", request.tabs.len());

    let embedder = OAIEmbedder::new(&state.client, state.embed_model.clone());
    let namer = OAIGenerator::new(&state.client, state.name_model.clone());
    let clusterer = DbscanClusterer::new(state.params.eps, state.params.min_samples);
    let classifier = TabClassifier::new(embedder, clusterer, namer, state.params.clone());

    let results = classifier
        .classify(&request.tabs)
        .await
        .map_err(service_error)?;

    info!("Returning {} tab groups", results.len());
    Ok(Json(results))
}

fn service_error(err: AppError) -> (StatusCode, Json<ErrorBody>) {
    let status = match &err {
        AppError::EmbeddingUnavailable(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error!("Cluster request failed: {err}");
    (
        status,
        Json(ErrorBody {
            message: err.to_string(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn test_state() -> AppState {
        let cli = Cli::parse_from(["chronicle"]);
        AppState::new(Client::with_config(OpenAIConfig::default()), &cli)
    }

    #[tokio::test]
    async fn health_reports_a_static_body() {
        let Json(body) = health().await;
        assert_eq!(body, json!({"status": "healthy"}));
    }

    #[tokio::test]
    async fn an_empty_tab_list_returns_an_empty_result_without_model_calls() {
        // the fast path returns before any collaborator call, so the
        // unconfigured client in the state is never exercised
        let response = cluster_tabs(
            State(test_state()),
            Json(ClusterRequest { tabs: Vec::new() }),
        )
        .await;

        let Json(results) = response.unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn cluster_request_accepts_the_wire_format() {
        let request: ClusterRequest = serde_json::from_str(
            r#"{"tabs": [{"tabId": 1, "url": "https://a.dev/", "title": "A", "text": ""}]}"#,
        )
        .unwrap();
        assert_eq!(request.tabs.len(), 1);
        assert_eq!(request.tabs[0].tab_id, 1);
    }
}
