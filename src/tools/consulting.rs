//! LLM-backed consulting prep tools. Registered only when a model is configured.

use async_trait::async_trait;
use serde_json::json;

use crate::core::tool::{optional_count, required_str, Tool, ToolError, ToolSpec};
use crate::domain::Difficulty;
use crate::prep::{input, PrepService, PREP_NUM_QUESTIONS};

/// Names of the tools that need a language model.
pub const LLM_TOOL_NAMES: [&str; 3] = ["consulting_framework", "guesstimate", "consulting_mcqs"];

fn case_schema() -> serde_json::Value {
    json!({
      "type":"object",
      "properties": { "prompt": { "type":"string", "minLength": input::MIN_PROMPT_CHARS } },
      "required": ["prompt"]
    })
}

/// Validated case prompt, with the same rule the interactive front end applies.
fn case_prompt(arguments: &serde_json::Value) -> Result<&str, ToolError> {
    let prompt = required_str(arguments, "prompt")?;
    input::validate_prompt(prompt).map_err(|e| ToolError::InvalidArgument(e.to_string()))?;
    Ok(prompt)
}

#[derive(Clone)]
pub struct FrameworkTool {
    prep: PrepService,
}

impl FrameworkTool {
    pub fn new(prep: PrepService) -> Self {
        Self { prep }
    }
}

impl ToolSpec for FrameworkTool {
    fn name(&self) -> &'static str {
        "consulting_framework"
    }
    fn description(&self) -> &'static str {
        "Suggest a structured consulting framework for a business case"
    }
    fn input_schema(&self) -> serde_json::Value {
        case_schema()
    }
}

#[async_trait]
impl Tool for FrameworkTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let prompt = case_prompt(arguments)?;
        let framework = self.prep.framework(prompt).await?;
        Ok(json!({ "framework": framework }))
    }
}

#[derive(Clone)]
pub struct GuesstimateTool {
    prep: PrepService,
}

impl GuesstimateTool {
    pub fn new(prep: PrepService) -> Self {
        Self { prep }
    }
}

impl ToolSpec for GuesstimateTool {
    fn name(&self) -> &'static str {
        "guesstimate"
    }
    fn description(&self) -> &'static str {
        "Generate a guesstimate problem and a structured approach to it"
    }
    fn input_schema(&self) -> serde_json::Value {
        case_schema()
    }
}

#[async_trait]
impl Tool for GuesstimateTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let prompt = case_prompt(arguments)?;
        let guesstimate = self.prep.guesstimate(prompt).await?;
        Ok(json!({ "guesstimate": guesstimate }))
    }
}

#[derive(Clone)]
pub struct ConsultingMcqsTool {
    prep: PrepService,
}

impl ConsultingMcqsTool {
    pub fn new(prep: PrepService) -> Self {
        Self { prep }
    }
}

impl ToolSpec for ConsultingMcqsTool {
    fn name(&self) -> &'static str {
        "consulting_mcqs"
    }
    fn description(&self) -> &'static str {
        "Generate multiple-choice questions with answers using the language model"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
          "type":"object",
          "properties": {
            "topic": { "type":"string" },
            "num": { "type":"integer", "minimum": 1, "maximum": 20, "default": PREP_NUM_QUESTIONS },
            "difficulty": { "type":"string", "enum": ["Beginner", "Intermediate", "Advanced"] }
          },
          "required": ["topic"]
        })
    }
}

#[async_trait]
impl Tool for ConsultingMcqsTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let topic = required_str(arguments, "topic")?;
        let num = optional_count(arguments, "num", 1..=20)?.unwrap_or(PREP_NUM_QUESTIONS);
        let difficulty = match arguments.get("difficulty").and_then(|v| v.as_str()) {
            Some(d) => d.parse::<Difficulty>().map_err(ToolError::InvalidArgument)?,
            None => Difficulty::default(),
        };
        let questions = self.prep.questions(topic, num, difficulty).await?;
        Ok(json!({ "topic": topic, "difficulty": difficulty, "questions": questions }))
    }
}
