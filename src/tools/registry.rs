use std::collections::HashMap;
use std::sync::Arc;

use crate::clients::gemini::GeminiRemote;
use crate::clients::web::WebFetcher;
use crate::core::tool::{Resource, Tool, ToolError};
use crate::infra::config::AppConfig;
use crate::prep::PrepService;

use super::consulting::{ConsultingMcqsTool, FrameworkTool, GuesstimateTool, LLM_TOOL_NAMES};
use super::flashcards::FlashcardsTool;
use super::lesson_plan::LessonPlanResource;
use super::mcqs::GenerateMcqsTool;

/// Tool and resource mappings. Populated once, read-only afterwards.
#[derive(Clone)]
pub struct Registry {
    tools: Arc<HashMap<&'static str, Arc<dyn Tool>>>,
    resources: Arc<HashMap<&'static str, Arc<dyn Resource>>>,
}

#[derive(Default)]
pub struct RegistryBuilder {
    tools: HashMap<&'static str, Arc<dyn Tool>>,
    resources: HashMap<&'static str, Arc<dyn Resource>>,
}

impl RegistryBuilder {
    pub fn tool<T: Tool + 'static>(mut self, tool: T) -> Self {
        self.tools.insert(tool.name(), Arc::new(tool));
        self
    }

    pub fn resource<R: Resource + 'static>(mut self, resource: R) -> Self {
        self.resources.insert(resource.name(), Arc::new(resource));
        self
    }

    pub fn build(self) -> Registry {
        Registry {
            tools: Arc::new(self.tools),
            resources: Arc::new(self.resources),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMeta {
    pub name: &'static str,
    pub description: &'static str,
    pub param: &'static str,
}

impl ResourceMeta {
    pub fn uri(&self) -> String {
        format!("{RESOURCE_SCHEME}{}", self.name)
    }
}

pub const RESOURCE_SCHEME: &str = "edu://";

/// Split `edu://{name}/{value}` into its name and optional value.
pub fn parse_resource_uri(uri: &str) -> Option<(&str, Option<&str>)> {
    let rest = uri.strip_prefix(RESOURCE_SCHEME)?;
    match rest.split_once('/') {
        Some((name, value)) if !name.is_empty() => {
            Some((name, Some(value).filter(|v| !v.is_empty())))
        }
        Some(_) => None,
        None if !rest.is_empty() => Some((rest, None)),
        None => None,
    }
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registered tool names, sorted.
    pub fn tool_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn resource_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.resources.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn list_tools(&self) -> Vec<ToolMeta> {
        self.tool_names()
            .into_iter()
            .filter_map(|n| self.tools.get(n))
            .map(|t| ToolMeta {
                name: t.name(),
                description: t.description(),
                input_schema: t.input_schema(),
            })
            .collect()
    }

    pub fn list_resources(&self) -> Vec<ResourceMeta> {
        self.resource_names()
            .into_iter()
            .filter_map(|n| self.resources.get(n))
            .map(|r| ResourceMeta {
                name: r.name(),
                description: r.description(),
                param: r.param(),
            })
            .collect()
    }

    pub async fn call_tool(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let tool = match self.tools.get(name) {
            Some(tool) => tool,
            None if LLM_TOOL_NAMES.iter().any(|n| *n == name) => {
                return Err(ToolError::NotConfigured("language model"))
            }
            None => {
                return Err(ToolError::UnknownName {
                    kind: "tool",
                    name: name.to_owned(),
                })
            }
        };
        tracing::debug!(tool = name, "tool call");
        let res = tool.call(args).await;
        crate::infra::logging::log_metric(name, "call_total", 1.0);
        if let Err(e) = &res {
            tracing::warn!(tool = name, error = %e, "tool call failed");
            crate::infra::logging::log_metric(name, "call_error_total", 1.0);
        }
        res
    }

    pub async fn read_resource(
        &self,
        name: &str,
        args: &serde_json::Value,
    ) -> Result<serde_json::Value, ToolError> {
        let resource = self.resources.get(name).ok_or_else(|| ToolError::UnknownName {
            kind: "resource",
            name: name.to_owned(),
        })?;
        tracing::debug!(resource = name, "resource read");
        resource.read(args).await
    }

    /// Read a resource addressed as `edu://{name}/{value}`; the value binds to the
    /// resource's parameter.
    pub async fn read_resource_uri(&self, uri: &str) -> Result<serde_json::Value, ToolError> {
        let (name, value) = parse_resource_uri(uri)
            .ok_or_else(|| ToolError::InvalidArgument(format!("invalid resource URI: {uri}")))?;
        let param = self
            .resources
            .get(name)
            .map(|r| r.param())
            .ok_or_else(|| ToolError::UnknownName {
                kind: "resource",
                name: name.to_owned(),
            })?;
        let mut args = serde_json::Map::new();
        if let Some(v) = value {
            args.insert(param.to_owned(), serde_json::Value::String(v.to_owned()));
        }
        self.read_resource(name, &serde_json::Value::Object(args)).await
    }

    /// Log what the server exposes at startup.
    pub fn announce(&self, addr: &str) {
        tracing::info!(addr = %addr, "MCP server started");
        tracing::info!(tools = ?self.tool_names(), "Available tools");
        tracing::info!(resources = ?self.resource_names(), "Available resources");
    }
}

/// The fixed content registry: `generate_mcqs`, `flashcards` and `lesson_plan`.
pub fn build_registry() -> Registry {
    base_builder().build()
}

fn base_builder() -> RegistryBuilder {
    Registry::builder()
        .tool(GenerateMcqsTool::default())
        .tool(FlashcardsTool)
        .resource(LessonPlanResource::default())
}

/// Base registry plus the LLM-backed consulting tools when an API key is configured.
pub fn build_registry_from_config(cfg: &AppConfig) -> Registry {
    match GeminiRemote::from_config(&cfg.llm) {
        Some(llm) => {
            tracing::info!(model = llm.model(), "language model configured");
            let prep = PrepService::new(Arc::new(llm), WebFetcher::from_config(&cfg.fetch));
            with_prep(prep)
        }
        None => {
            tracing::info!("no GOOGLE_API_KEY configured; consulting tools disabled");
            build_registry()
        }
    }
}

pub fn with_prep(prep: PrepService) -> Registry {
    base_builder()
        .tool(FrameworkTool::new(prep.clone()))
        .tool(GuesstimateTool::new(prep.clone()))
        .tool(ConsultingMcqsTool::new(prep))
        .build()
}
