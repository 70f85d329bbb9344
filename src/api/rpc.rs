//! JSON-RPC shim over the registry for clients without a Streamable HTTP MCP stack.

use axum::body::Bytes;
use axum::Json;
use serde_json::{json, Value as J};

use crate::core::error::GatewayError;
use crate::core::mcp::{InitializeResult, RpcReq, RpcResp};
use crate::core::tool::ToolError;
use crate::infra::http::json as http_json;
use crate::tools::registry::Registry;

fn tools_list(reg: &Registry) -> J {
    let tools: Vec<J> = reg
        .list_tools()
        .into_iter()
        .map(|t| json!({ "name": t.name, "description": t.description, "inputSchema": t.input_schema }))
        .collect();
    json!({ "tools": tools })
}

fn resources_list(reg: &Registry) -> J {
    let resources: Vec<J> = reg
        .list_resources()
        .into_iter()
        .map(|r| {
            json!({
                "uri": r.uri(),
                "name": r.name,
                "description": r.description,
                "mimeType": "application/json",
            })
        })
        .collect();
    json!({ "resources": resources })
}

async fn call_tool(reg: &Registry, params: &J) -> Result<J, GatewayError> {
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or(ToolError::MissingArgument("name"))?;
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    Ok(reg.call_tool(name, &args).await?)
}

/// `resources/read` accepts either `{"uri": "edu://name/value"}` or `{"name", "arguments"}`.
async fn read_resource(reg: &Registry, params: &J) -> Result<J, GatewayError> {
    if let Some(uri) = params.get("uri").and_then(|v| v.as_str()) {
        let body = reg.read_resource_uri(uri).await?;
        return Ok(json!({
            "contents": [{ "uri": uri, "mimeType": "application/json", "text": body.to_string() }]
        }));
    }
    let name = params
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or(ToolError::MissingArgument("uri"))?;
    let args = params.get("arguments").cloned().unwrap_or_else(|| json!({}));
    Ok(reg.read_resource(name, &args).await?)
}

pub async fn http(axum::extract::State(reg): axum::extract::State<Registry>, body: Bytes) -> Json<RpcResp> {
    let req: RpcReq = match serde_json::from_slice(&body) {
        Ok(req) => req,
        Err(e) => {
            tracing::warn!(error = %e, "rpc request did not parse");
            return http_json::parse_error(format!("parse error: {e}"));
        }
    };
    tracing::debug!(method = %req.method, id = ?req.id, "rpc handler invoked");
    let id = req.id.clone();
    let outcome = match req.method.as_str() {
        "initialize" => serde_json::to_value(InitializeResult::for_gateway())
            .map_err(|e| GatewayError::Message(e.to_string())),
        "shutdown" => Ok(J::Null),
        "tools.list" | "tools/list" => Ok(tools_list(&reg)),
        "tools.call" | "tools/call" => call_tool(&reg, &req.params).await,
        "resources.list" | "resources/list" => Ok(resources_list(&reg)),
        "resources.read" | "resources/read" => read_resource(&reg, &req.params).await,
        _ => {
            return http_json::error(id, -32601, format!("unknown method: {}", req.method));
        }
    };
    let resp = match outcome {
        Ok(out) => http_json::ok(id, out),
        Err(e) => {
            tracing::warn!(method = %req.method, error = %e, "rpc call failed");
            http_json::from_gateway_error(id, e)
        }
    };
    tracing::trace!(response = ?resp.0, "rpc handler completed");
    resp
}
