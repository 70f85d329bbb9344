//! Shared MCP protocol surface (lightweight shim to avoid tool coupling)

use serde::{Deserialize, Serialize};
use serde_json::Value as J;

// --- JSON-RPC structures used by the `/rpc` shim and tests ---

#[derive(Deserialize, Debug)]
pub struct RpcReq {
    pub jsonrpc: String,
    #[serde(default)]
    pub id: J,
    pub method: String,
    #[serde(default)]
    pub params: J,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcResp {
    pub jsonrpc: &'static str,
    pub id: J,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<J>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcErr>,
}

#[derive(Serialize, Debug, Clone)]
pub struct RpcErr {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<J>,
}

pub fn ok(id: J, result: J) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: Some(result), error: None }
}
pub fn err(id: J, code: i32, msg: impl Into<String>, data: Option<J>) -> RpcResp {
    RpcResp { jsonrpc: "2.0", id, result: None, error: Some(RpcErr { code, message: msg.into(), data }) }
}

// --- Initialize result returned by the shim ---

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InitializeResult {
    pub server_info: ServerInfo,
    pub capabilities: J,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

impl InitializeResult {
    pub fn for_gateway() -> Self {
        Self {
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
            },
            capabilities: serde_json::json!({ "tools": {}, "resources": {} }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_serializes_initialize_result_in_camel_case() {
        let v = serde_json::to_value(InitializeResult::for_gateway()).unwrap();
        assert_eq!(v["serverInfo"]["name"], "edu-mcp-gateway");
        assert!(v["capabilities"]["resources"].is_object());
    }

    #[test]
    fn error_envelope_omits_result() {
        let s = serde_json::to_string(&err(J::from(1), -32601, "nope", None)).unwrap();
        assert!(!s.contains("result"));
        assert!(s.contains("-32601"));
    }

    #[test]
    fn request_without_id_or_params_parses() {
        let req: RpcReq = serde_json::from_str(r#"{"jsonrpc":"2.0","method":"tools/list"}"#).unwrap();
        assert!(req.id.is_null());
        assert!(req.params.is_null());
    }
}
