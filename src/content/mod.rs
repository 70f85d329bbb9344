//! Local content library: deterministic generators used by the registry tools.

pub mod flashcards;
pub mod lesson;
pub mod mcq;

pub use flashcards::flashcards;
pub use lesson::LessonPlanner;
pub use mcq::McqGenerator;
