//! HTTP transport for the query tool: JSON-RPC over `POST {endpoint}`.

use anyhow::Result;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use carrier_core::{
    config::ServerConfig,
    query::QueryService,
    tool_rpc::{RpcRequest, RpcResponse, ToolRouter, INVALID_REQUEST, PARSE_ERROR},
};
use serde_json::Value;
use std::sync::Arc;

pub async fn serve(config: ServerConfig) -> Result<()> {
    let app = app(&config);
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!(
        "{} serving {} at http://{addr}{}",
        config.server_name,
        config.db_path,
        config.endpoint
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// The tool endpoint as an axum router, ready to serve or drive directly.
pub fn app(config: &ServerConfig) -> Router {
    let router = Arc::new(ToolRouter::new(
        QueryService::new(config.db_path.clone()),
        config.server_name.clone(),
        config.default_limit,
    ));
    Router::new()
        .route(&config.endpoint, post(handle_rpc))
        .with_state(router)
}

async fn handle_rpc(State(router): State<Arc<ToolRouter>>, body: Bytes) -> Response {
    let value: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => {
            return Json(RpcResponse::err(Value::Null, PARSE_ERROR, e.to_string())).into_response()
        }
    };
    let request: RpcRequest = match serde_json::from_value(value) {
        Ok(r) => r,
        Err(e) => {
            return Json(RpcResponse::err(Value::Null, INVALID_REQUEST, e.to_string()))
                .into_response()
        }
    };

    // SQLite work runs on the blocking pool, one connection per call.
    let outcome = tokio::task::spawn_blocking(move || router.handle(request)).await;
    match outcome {
        Ok(Some(response)) => Json(response).into_response(),
        Ok(None) => StatusCode::ACCEPTED.into_response(),
        Err(e) => {
            log::error!("tool call panicked: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
