/// Default number of questions produced when the caller does not ask for a count.
pub const DEFAULT_NUM_QUESTIONS: usize = 5;

#[derive(Debug, Clone, Copy, Default)]
pub struct McqGenerator;

impl McqGenerator {
    /// Produce `num_questions` placeholder questions, each naming the topic.
    pub fn generate(&self, topic: &str, num_questions: usize) -> Vec<String> {
        (1..=num_questions)
            .map(|i| format!("MCQ {i} on {topic}"))
            .collect()
    }
}
