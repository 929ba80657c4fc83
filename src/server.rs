use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tower_http::cors::{Any, CorsLayer};
use utoipa::ToSchema;

use crate::bridge::ToolServerClient;
use crate::config::ServerSettings;
use crate::error::CoreResult;
use crate::llm::{build_model, LanguageModel, LlmSettings};
use crate::rpc::IdAllocator;

pub mod assist;
pub mod error;
pub mod openapi;
pub mod proxy;
pub mod stream;

pub struct Server {
    addr: SocketAddr,
    shutdown: Option<oneshot::Sender<()>>,
}

impl Server {
    /// Bind and serve in a background task. The language model is built up
    /// front from configuration; a missing key only disables the assist
    /// routes, the proxy surface stays available.
    pub async fn start(settings: &ServerSettings, llm: &LlmSettings) -> Result<Self, String> {
        let model = build_model(llm);
        if let Err(error) = &model {
            tracing::warn!(%error, provider = %llm.provider, "language model unavailable");
        }
        Self::start_with_model(settings, llm.provider.clone(), llm.temperature, model).await
    }

    pub async fn start_with_model(
        settings: &ServerSettings,
        provider: String,
        temperature: f64,
        model: CoreResult<Arc<dyn LanguageModel>>,
    ) -> Result<Self, String> {
        let ids = Arc::new(IdAllocator::new());
        let state = Arc::new(ServerState {
            bridge: ToolServerClient::new(ids),
            model,
            provider,
            temperature,
            action_delay: settings.action_delay,
        });
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        let app = Router::new()
            .route("/health", get(health))
            .route("/proxy", post(proxy::proxy))
            .route("/proxy/stream", post(stream::proxy_stream))
            .route("/proxy/ai", post(assist::assist))
            .route("/proxy/ai/execute", post(assist::execute))
            .with_state(state)
            .layer(cors);
        let listener = TcpListener::bind(settings.bind_addr())
            .await
            .map_err(|error| error.to_string())?;
        let addr = listener
            .local_addr()
            .map_err(|error| error.to_string())?;
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        tokio::spawn(async move {
            let _ = axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    let _ = shutdown_rx.await;
                })
                .await;
        });

        Ok(Server {
            addr,
            shutdown: Some(shutdown_tx),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn shutdown(&mut self) -> Result<(), String> {
        if let Some(sender) = self.shutdown.take() {
            sender
                .send(())
                .map_err(|_| "failed to send server shutdown signal".to_string())
        } else {
            Ok(())
        }
    }
}

impl Drop for Server {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service liveness", body = HealthResponse),
    )
)]
pub(crate) async fn health(State(_state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub(crate) struct ServerState {
    pub(crate) bridge: ToolServerClient,
    pub(crate) model: CoreResult<Arc<dyn LanguageModel>>,
    pub(crate) provider: String,
    pub(crate) temperature: f64,
    pub(crate) action_delay: Duration,
}
