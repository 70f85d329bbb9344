use async_trait::async_trait;
use serde_json::json;

use crate::content::flashcards;
use crate::core::tool::{required_str, Tool, ToolError, ToolSpec};

#[derive(Clone, Default)]
pub struct FlashcardsTool;

impl ToolSpec for FlashcardsTool {
    fn name(&self) -> &'static str { "flashcards" }
    fn description(&self) -> &'static str { "Return a flashcard deck for a subject" }
    fn input_schema(&self) -> serde_json::Value {
        json!({ "type":"object", "properties": { "subject": { "type":"string" } }, "required": ["subject"] })
    }
}

#[async_trait]
impl Tool for FlashcardsTool {
    async fn call(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let subject = required_str(arguments, "subject")?;
        Ok(json!({ "subject": subject, "flashcards": flashcards(subject) }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_fixed_deck() {
        let out = FlashcardsTool.call(&json!({"subject":"OOP"})).await.unwrap();
        assert_eq!(out["flashcards"][0]["term"], "Loop");
        assert_eq!(out["flashcards"][1]["term"], "Variable");
    }

    #[tokio::test]
    async fn requires_subject() {
        assert!(FlashcardsTool.call(&json!({"topic":"OOP"})).await.is_err());
    }
}
