pub mod consulting;
pub mod flashcards;
pub mod lesson_plan;
pub mod mcqs;
pub mod registry;
pub mod tool_router;
