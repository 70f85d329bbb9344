use thiserror::Error;

use crate::core::tool::ToolError;

/// Gateway-wide error model for uniform HTTP/JSON mapping.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("{0}")]
    Message(String),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Tool(#[from] ToolError),
}

impl From<anyhow::Error> for GatewayError {
    fn from(e: anyhow::Error) -> Self {
        GatewayError::Message(e.to_string())
    }
}

impl GatewayError {
    /// JSON-RPC error code for this error.
    pub fn rpc_code(&self) -> i32 {
        match self {
            GatewayError::Tool(ToolError::MissingArgument(_))
            | GatewayError::Tool(ToolError::InvalidArgument(_)) => -32602,
            _ => -32000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_displays_message() {
        let e = GatewayError::Message("boom".into());
        assert_eq!(e.to_string(), "boom");
    }

    #[test]
    fn it_converts_from_anyhow() {
        let any: anyhow::Error = anyhow::anyhow!("nope");
        let gw: GatewayError = any.into();
        assert_eq!(gw.to_string(), "nope");
    }

    #[test]
    fn tool_errors_pass_through_display_and_map_codes() {
        let gw: GatewayError = ToolError::MissingArgument("topic").into();
        assert_eq!(gw.to_string(), "missing required field: topic");
        assert_eq!(gw.rpc_code(), -32602);

        let gw: GatewayError = ToolError::Upstream("upstream status 500".into()).into();
        assert_eq!(gw.rpc_code(), -32000);
    }
}
