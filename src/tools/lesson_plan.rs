use async_trait::async_trait;

use crate::content::LessonPlanner;
use crate::core::tool::{required_str, Resource, ToolError};

#[derive(Clone, Default)]
pub struct LessonPlanResource {
    planner: LessonPlanner,
}

#[async_trait]
impl Resource for LessonPlanResource {
    fn name(&self) -> &'static str {
        "lesson_plan"
    }
    fn description(&self) -> &'static str {
        "Lesson plan (objectives and activities) for a subject"
    }
    fn param(&self) -> &'static str {
        "subject"
    }
    async fn read(&self, arguments: &serde_json::Value) -> Result<serde_json::Value, ToolError> {
        let subject = required_str(arguments, "subject")?;
        serde_json::to_value(self.planner.create(subject))
            .map_err(|e| ToolError::Upstream(e.to_string()))
    }
}
