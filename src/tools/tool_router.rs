//! rmcp service exposing the registry over real MCP transports (Streamable HTTP + stdio).
//!
//! Tools return plain JSON objects that land in `structuredContent`; the
//! `lesson_plan` resource is served as `edu://lesson_plan/{subject}`.

use std::future::Future;

use rmcp::{
    handler::server::tool::{Parameters, ToolRouter},
    model::{
        AnnotateAble, Implementation, JsonObject, ListResourcesResult, PaginatedRequestParam,
        RawResource, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
    ErrorData as McpError, RoleServer,
};

use crate::core::tool::ToolError;
use crate::infra::runtime::mcp_transport::ServerHandler;
use crate::tools::registry::Registry;

#[derive(Clone)]
pub struct EduSvc {
    registry: Registry,
}

impl EduSvc {
    pub fn new(registry: Registry) -> Self {
        Self { registry }
    }

    async fn dispatch(
        &self,
        name: &'static str,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        tracing::debug!(tool = name, params = ?params.0, "mcp tool invoked");
        let args = serde_json::Value::Object(params.0);
        let payload = self
            .registry
            .call_tool(name, &args)
            .await
            .map_err(to_mcp_error)?;
        tracing::trace!(payload = %payload, "mcp tool returning payload");
        Ok(rmcp::Json(payload))
    }
}

pub fn to_mcp_error(e: ToolError) -> McpError {
    match e {
        ToolError::MissingArgument(_) | ToolError::InvalidArgument(_) => {
            McpError::invalid_params(e.to_string(), None)
        }
        ToolError::UnknownName { .. } => McpError::resource_not_found(e.to_string(), None),
        ToolError::NotConfigured(_) | ToolError::Upstream(_) => {
            McpError::internal_error(e.to_string(), None)
        }
    }
}

#[rmcp::tool_router]
impl EduSvc {
    #[rmcp::tool(
        name = "generate_mcqs",
        description = "Generate multiple-choice question stubs. Input {\"topic\": string, \"num_questions\"?: int}"
    )]
    async fn generate_mcqs(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        self.dispatch("generate_mcqs", params).await
    }

    #[rmcp::tool(name = "flashcards", description = "Return a flashcard deck. Input {\"subject\": string}")]
    async fn flashcards(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        self.dispatch("flashcards", params).await
    }

    #[rmcp::tool(
        name = "consulting_framework",
        description = "Suggest a consulting framework for a business case. Input {\"prompt\": string}"
    )]
    async fn consulting_framework(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        self.dispatch("consulting_framework", params).await
    }

    #[rmcp::tool(
        name = "guesstimate",
        description = "Generate a guesstimate problem with an approach. Input {\"prompt\": string}"
    )]
    async fn guesstimate(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        self.dispatch("guesstimate", params).await
    }

    #[rmcp::tool(
        name = "consulting_mcqs",
        description = "LLM-generated MCQs with answers. Input {\"topic\": string, \"num\"?: int, \"difficulty\"?: string}"
    )]
    async fn consulting_mcqs(
        &self,
        params: Parameters<JsonObject>,
    ) -> Result<rmcp::Json<serde_json::Value>, McpError> {
        self.dispatch("consulting_mcqs", params).await
    }
}

pub type EduRouter = ToolRouter<EduSvc>;

impl EduSvc {
    pub fn router() -> EduRouter {
        // Wrapper to expose the macro-generated private tool_router
        Self::tool_router()
    }
}

impl ServerHandler for EduSvc {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .build(),
            server_info: Implementation {
                name: env!("CARGO_PKG_NAME").into(),
                version: env!("CARGO_PKG_VERSION").into(),
                ..Default::default()
            },
            instructions: Some(
                "Educational content tools. Read lesson plans as edu://lesson_plan/{subject}.".into(),
            ),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let resources = self
            .registry
            .list_resources()
            .into_iter()
            .map(|meta| {
                let mut raw = RawResource::new(meta.uri(), meta.name.to_string());
                raw.description = Some(format!("{} (append /{{{}}})", meta.description, meta.param));
                raw.mime_type = Some("application/json".into());
                raw.no_annotation()
            })
            .collect();
        Ok(ListResourcesResult { resources, next_cursor: None })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let uri = request.uri;
        let body = self
            .registry
            .read_resource_uri(&uri)
            .await
            .map_err(to_mcp_error)?;
        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(body.to_string(), uri)],
        })
    }
}

/// Factory required by rmcp Streamable HTTP & stdio transports:
/// must return a `(handler, ToolRouter<handler>)` pair.
pub fn factory_with_registry(
    registry: Registry,
) -> impl Fn() -> (EduSvc, EduRouter) + Clone + Send + Sync + 'static {
    move || (EduSvc::new(registry.clone()), EduSvc::router())
}
