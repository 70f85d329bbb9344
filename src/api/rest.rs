//! Plain REST surface over the registry: `POST /tool/{name}` and `POST /resource/{name}`
//! with the argument object as the JSON body.

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value as J};

use crate::core::tool::ToolError;
use crate::tools::registry::Registry;

pub struct ApiError(ToolError);

impl From<ToolError> for ApiError {
    fn from(e: ToolError) -> Self {
        ApiError(e)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self.0 {
            ToolError::MissingArgument(_) | ToolError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            ToolError::UnknownName { .. } => StatusCode::NOT_FOUND,
            ToolError::NotConfigured(_) => StatusCode::SERVICE_UNAVAILABLE,
            ToolError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// An empty body means "no arguments"; anything else must be a JSON object.
fn parse_args(body: &Bytes) -> Result<J, ToolError> {
    if body.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(json!({}));
    }
    match serde_json::from_slice::<J>(body) {
        Ok(v @ J::Object(_)) => Ok(v),
        Ok(_) => Err(ToolError::InvalidArgument("request body must be a JSON object".into())),
        Err(e) => Err(ToolError::InvalidArgument(format!("malformed JSON body: {e}"))),
    }
}

pub async fn call_tool(
    State(reg): State<Registry>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<J>, ApiError> {
    tracing::debug!(tool = %name, "REST tool call");
    let args = parse_args(&body)?;
    Ok(Json(reg.call_tool(&name, &args).await?))
}

pub async fn read_resource(
    State(reg): State<Registry>,
    Path(name): Path<String>,
    body: Bytes,
) -> Result<Json<J>, ApiError> {
    tracing::debug!(resource = %name, "REST resource read");
    let args = parse_args(&body)?;
    Ok(Json(reg.read_resource(&name, &args).await?))
}
