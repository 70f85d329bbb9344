use async_trait::async_trait;
use serde_json::json;

use crate::content::mcq::{McqGenerator, DEFAULT_NUM_QUESTIONS};
use crate::core::tool::{optional_count, required_str, Tool, ToolError, ToolSpec};

#[derive(Clone, Default)]
pub struct GenerateMcqsTool {
    generator: McqGenerator,
}

impl ToolSpec for GenerateMcqsTool {
    fn name(&self) -> &'static str {
        "generate_mcqs"
    }
    fn description(&self) -> &'static str {
        "Generate multiple-choice question stubs for a topic"
    }
    fn input_schema(&self) -> serde_json::Value {
        json!({
          "type":"object",
          "properties": {
            "topic": { "type":"string" },
            "num_questions": { "type":"integer", "minimum": 1, "maximum": 50, "default": DEFAULT_NUM_QUESTIONS }
          },
          "required": ["topic"]
        })
    }
}

#[async_trait]
impl Tool for GenerateMcqsTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let topic = required_str(arguments, "topic")?;
        let num = optional_count(arguments, "num_questions", 1..=50)?.unwrap_or(DEFAULT_NUM_QUESTIONS);
        let questions = self.generator.generate(topic, num);
        Ok(json!({ "topic": topic, "questions": questions }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn defaults_to_five_questions() {
        let out = GenerateMcqsTool::default()
            .call(&json!({"topic":"Python functions"}))
            .await
            .unwrap();
        let qs = out["questions"].as_array().unwrap();
        assert_eq!(qs.len(), 5);
        assert_eq!(out["topic"], "Python functions");
        assert!(qs.iter().all(|q| q.as_str().unwrap().contains("Python functions")));
    }

    #[tokio::test]
    async fn honours_requested_count() {
        let out = GenerateMcqsTool::default()
            .call(&json!({"topic":"sets","num_questions":2}))
            .await
            .unwrap();
        assert_eq!(out["questions"], json!(["MCQ 1 on sets", "MCQ 2 on sets"]));
    }

    #[tokio::test]
    async fn validates_arguments() {
        let tool = GenerateMcqsTool::default();
        let err = tool.call(&json!({})).await.unwrap_err();
        assert!(err.to_string().contains("missing required field: topic"));
        let err = tool.call(&json!({"topic":"x","num_questions":500})).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
    }
}
