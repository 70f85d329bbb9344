//! Prompt templates sent to the model.

use crate::domain::Difficulty;

pub fn framework(case: &str) -> String {
    format!(
        "You are a management consulting expert. Based on the following business case or problem, \
         suggest a structured framework that can be used to approach and solve the case:\n\n\
         {case}\n\n\
         Provide the framework in clear bullet points."
    )
}

pub fn guesstimate(case: &str) -> String {
    format!(
        "You are helping a candidate prepare for consulting interviews. \
         Generate a guesstimate problem based on this prompt:\n\n\
         {case}\n\n\
         Also, provide a structured approach to solve this guesstimate."
    )
}

/// Case text used for framework generation when the material is a PDF or web page.
pub fn framework_from_source(label: &str) -> String {
    format!(
        "Based on the uploaded {label} content, identify a business case and create a \
         structured consulting framework to approach it."
    )
}

pub fn guesstimate_from_source(label: &str) -> String {
    format!(
        "Based on the uploaded {label} content, create a relevant guesstimate problem that \
         would be appropriate for a consulting interview."
    )
}

pub fn questions(topic: &str, num: usize, difficulty: Difficulty, instructions: Option<&str>) -> String {
    let extra = instructions
        .map(|i| format!("Additional instructions: {i}\n"))
        .unwrap_or_default();
    format!(
        "Generate {num} Multiple Choice questions at {difficulty} difficulty about:\n\n\
         {topic}\n\n\
         {extra}\
         Respond with JSON only, no prose, in exactly this shape:\n\
         {{\"questions\": [{{\"question\": \"...\", \"options\": [\"...\", \"...\", \"...\", \"...\"], \
         \"answer\": \"...\", \"explanation\": \"...\"}}]}}"
    )
}
