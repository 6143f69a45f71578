//! JSON-RPC 2.0 tool dispatch for the query service.
//!
//! Transport-free: the HTTP layer hands every decoded request to
//! [`ToolRouter::handle`] and writes back whatever it returns. Requests
//! without an `id` are notifications and get no response.

use crate::{
    error::CarrierError,
    query::QueryService,
    store::JsonRow,
    types::CustomerId,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

pub const PROTOCOL_VERSION: &str = "2025-03-26";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;

#[derive(Debug, Clone, Deserialize)]
pub struct RpcRequest {
    #[serde(default)]
    pub jsonrpc: String,
    /// `None` only when the member is absent; `"id": null` is `Some(Null)`.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

fn present_id<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Value>, D::Error> {
    Value::deserialize(d).map(Some)
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcResponse {
    pub fn ok(id: Value, result: Value) -> Self {
        Self { jsonrpc: "2.0", id, result: Some(result), error: None }
    }

    pub fn err(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            result: None,
            error: Some(RpcError { code, message: message.into() }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct CallParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct RunQueryArgs {
    sql: String,
    #[serde(default)]
    limit: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct CustomerCallsArgs {
    customer_id: CustomerId,
    #[serde(default)]
    limit: Option<usize>,
}

pub struct ToolRouter {
    service: QueryService,
    server_name: String,
    default_limit: usize,
}

impl ToolRouter {
    pub fn new(service: QueryService, server_name: impl Into<String>, default_limit: usize) -> Self {
        Self { service, server_name: server_name.into(), default_limit }
    }

    /// Dispatch one request. Returns `None` for notifications.
    pub fn handle(&self, req: RpcRequest) -> Option<RpcResponse> {
        let id = req.id.clone()?;
        if req.jsonrpc != "2.0" {
            return Some(RpcResponse::err(id, INVALID_REQUEST, "jsonrpc must be \"2.0\""));
        }
        let response = match req.method.as_str() {
            "initialize" => RpcResponse::ok(id, self.initialize()),
            "ping" => RpcResponse::ok(id, json!({})),
            "tools/list" => RpcResponse::ok(id, json!({ "tools": tool_definitions() })),
            "tools/call" => self.call(id, req.params),
            other => {
                log::debug!("unknown method {other}");
                RpcResponse::err(id, METHOD_NOT_FOUND, format!("Method not found: {other}"))
            }
        };
        Some(response)
    }

    fn initialize(&self) -> Value {
        json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": { "tools": { "listChanged": false } },
            "serverInfo": {
                "name": self.server_name,
                "version": env!("CARGO_PKG_VERSION"),
            },
        })
    }

    fn call(&self, id: Value, params: Value) -> RpcResponse {
        let params: CallParams = match serde_json::from_value(params) {
            Ok(p) => p,
            Err(e) => return RpcResponse::err(id, INVALID_PARAMS, e.to_string()),
        };
        let arguments = match params.arguments {
            Value::Null => json!({}),
            other => other,
        };

        let outcome = match params.name.as_str() {
            "run_query" => match serde_json::from_value::<RunQueryArgs>(arguments) {
                Ok(a) => self
                    .service
                    .run_query(&a.sql, a.limit.unwrap_or(self.default_limit)),
                Err(e) => return RpcResponse::err(id, INVALID_PARAMS, e.to_string()),
            },
            "get_customer_calls" => match serde_json::from_value::<CustomerCallsArgs>(arguments) {
                Ok(a) => self
                    .service
                    .get_customer_calls(a.customer_id, a.limit.unwrap_or(self.default_limit)),
                Err(e) => return RpcResponse::err(id, INVALID_PARAMS, e.to_string()),
            },
            "get_plan_summary" => self.service.get_plan_summary(),
            other => {
                return RpcResponse::err(id, INVALID_PARAMS, format!("Unknown tool: {other}"))
            }
        };

        log::info!("tools/call {} ok={}", params.name, outcome.is_ok());
        RpcResponse::ok(id, tool_result(outcome))
    }
}

/// Tool failures are results with `isError`, not protocol errors.
fn tool_result(outcome: Result<Vec<JsonRow>, CarrierError>) -> Value {
    match outcome {
        Ok(rows) => {
            let text = serde_json::to_string(&rows).unwrap_or_else(|_| "[]".into());
            json!({
                "content": [{ "type": "text", "text": text }],
                "structuredContent": { "result": rows },
                "isError": false,
            })
        }
        Err(e) => json!({
            "content": [{ "type": "text", "text": e.to_string() }],
            "isError": true,
        }),
    }
}

fn tool_definitions() -> Value {
    json!([
        {
            "name": "run_query",
            "description": "Run a read-only SELECT query against the R-Mobile SQLite database. \
                            Returns rows as objects.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "sql": { "type": "string", "description": "A SELECT query, e.g. \"SELECT * FROM customers LIMIT 10\"" },
                    "limit": { "type": "integer", "minimum": 0, "default": 50, "description": "Max number of rows to return." }
                },
                "required": ["sql"]
            }
        },
        {
            "name": "get_customer_calls",
            "description": "Get recent call records for a customer, joined with customer info, newest first.",
            "inputSchema": {
                "type": "object",
                "properties": {
                    "customer_id": { "type": "integer", "description": "ID from the customers table." },
                    "limit": { "type": "integer", "minimum": 0, "default": 50, "description": "Max number of call records to return." }
                },
                "required": ["customer_id"]
            }
        },
        {
            "name": "get_plan_summary",
            "description": "Number of customers and average data usage per plan.",
            "inputSchema": { "type": "object", "properties": {} }
        }
    ])
}
