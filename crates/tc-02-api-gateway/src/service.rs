//! API Gateway service: JSON-RPC over HTTP.

use crate::error::{ApiError, PARSE_ERROR};
use crate::rpc::RpcHandlers;
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tc_01_chain_state::ChainStateApi;
use tokio::sync::oneshot;
use tracing::{info, warn};

/// Application state shared across handlers.
#[derive(Clone)]
struct AppState {
    handlers: Arc<RpcHandlers>,
}

/// The HTTP JSON-RPC server for the gateway.
pub struct ApiGatewayService {
    addr: SocketAddr,
    handlers: Arc<RpcHandlers>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ApiGatewayService {
    pub fn new(addr: SocketAddr, chain: Arc<dyn ChainStateApi>) -> Self {
        ApiGatewayService {
            addr,
            handlers: Arc::new(RpcHandlers::new(chain)),
            shutdown_tx: None,
        }
    }

    /// Builds the router: JSON-RPC at `/`, liveness at `/health`.
    pub fn router(&self) -> Router {
        let state = AppState {
            handlers: Arc::clone(&self.handlers),
        };
        Router::new()
            .route("/", post(handle_json_rpc))
            .route("/health", get(health_check))
            .with_state(state)
    }

    /// Binds and serves until [`ApiGatewayService::shutdown`] is called or
    /// the listener fails.
    pub async fn start(&mut self) -> std::io::Result<()> {
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let router = self.router();
        info!(addr = %self.addr, "starting API gateway");
        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await?;
        info!("API gateway stopped");
        Ok(())
    }

    /// Triggers graceful shutdown.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Handles a single JSON-RPC 2.0 request.
async fn handle_json_rpc(State(state): State<AppState>, body: String) -> impl IntoResponse {
    let request: Value = match serde_json::from_str(&body) {
        Ok(v) => v,
        Err(e) => {
            return Json(error_response(
                Value::Null,
                PARSE_ERROR,
                &format!("parse error: {e}"),
            ));
        }
    };

    let id = request.get("id").cloned().unwrap_or(Value::Null);
    let method = request.get("method").and_then(Value::as_str).unwrap_or("");
    let params = request.get("params");

    match route_method(&state, method, params) {
        Ok(result) => Json(json!({
            "jsonrpc": "2.0",
            "result": result,
            "id": id,
        })),
        Err(err) => {
            warn!(method, %err, "RPC request failed");
            Json(error_response(id, err.code(), &err.to_string()))
        }
    }
}

/// Routes a JSON-RPC method to its typed handler.
fn route_method(state: &AppState, method: &str, params: Option<&Value>) -> Result<Value, ApiError> {
    match method {
        "tempo_proposeBlock" => {
            let args = parse_params(params)?;
            let reply = state.handlers.propose_block(args)?;
            to_value(&reply)
        }
        "tempo_getBlock" => {
            let args = match params {
                None | Some(Value::Null) => Default::default(),
                some => parse_params(some)?,
            };
            let reply = state.handlers.get_block(args)?;
            to_value(&reply)
        }
        "" => Err(ApiError::InvalidRequest("missing method".into())),
        other => Err(ApiError::MethodNotFound(other.to_string())),
    }
}

/// Accepts params as an object, or as a single-element positional array.
fn parse_params<T: serde::de::DeserializeOwned>(params: Option<&Value>) -> Result<T, ApiError> {
    let value = match params {
        Some(Value::Array(items)) if items.len() == 1 => items[0].clone(),
        Some(v) => v.clone(),
        None => Value::Null,
    };
    serde_json::from_value(value).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn to_value<T: serde::Serialize>(reply: &T) -> Result<Value, ApiError> {
    serde_json::to_value(reply).map_err(|e| ApiError::InvalidRequest(e.to_string()))
}

fn error_response(id: Value, code: i32, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "error": { "code": code, "message": message },
        "id": id,
    })
}
