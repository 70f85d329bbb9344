use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("missing required field: {0}")]
    MissingArgument(&'static str),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{0} not configured")]
    NotConfigured(&'static str),
    #[error("{0}")]
    Upstream(String),
    #[error("unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },
}

/// Minimal metadata every tool must expose.
pub trait ToolSpec {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn input_schema(&self) -> serde_json::Value;
}

/// Tool = Spec + callable implementation
#[async_trait]
pub trait Tool: ToolSpec + Send + Sync {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

/// Resources are read by name with a single keyed parameter (eg. `subject`).
#[async_trait]
pub trait Resource: Send + Sync {
    fn name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    /// Argument that the trailing URI segment binds to in `edu://{name}/{value}`.
    fn param(&self) -> &'static str;
    async fn read(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError>;
}

/// Fetch a required non-empty string argument.
pub fn required_str<'a>(
    arguments: &'a serde_json::Value,
    field: &'static str,
) -> Result<&'a str, ToolError> {
    arguments
        .get(field)
        .and_then(|v| v.as_str())
        .filter(|s| !s.trim().is_empty())
        .ok_or(ToolError::MissingArgument(field))
}

/// Fetch an optional unsigned integer argument bounded to `range`.
pub fn optional_count(
    arguments: &serde_json::Value,
    field: &'static str,
    range: std::ops::RangeInclusive<u64>,
) -> Result<Option<usize>, ToolError> {
    match arguments.get(field) {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => {
            let n = v
                .as_u64()
                .ok_or_else(|| ToolError::InvalidArgument(format!("{field} must be an integer")))?;
            if !range.contains(&n) {
                return Err(ToolError::InvalidArgument(format!(
                    "{field} must be between {} and {}",
                    range.start(),
                    range.end()
                )));
            }
            Ok(Some(n as usize))
        }
    }
}
