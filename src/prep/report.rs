use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::Write;

use crate::domain::{Difficulty, Mcq};

#[derive(Debug, Clone, Serialize)]
pub struct PrepReport {
    pub difficulty: Difficulty,
    pub questions: Vec<Mcq>,
    pub framework: String,
    pub guesstimate: String,
    pub generated_at: DateTime<Utc>,
}

/// Option label for a 1-based index: 1 → 'A'.
fn letter(idx: usize) -> char {
    char::from_u32(64 + idx as u32).unwrap_or('?')
}

impl PrepReport {
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "🔍 Multiple Choice Questions (MCQs)");
        for (idx, q) in self.questions.iter().enumerate() {
            let _ = writeln!(out, "{}. {}", idx + 1, q.question);
            for (opt_idx, opt) in q.options.iter().enumerate() {
                let _ = writeln!(out, " - {}. {}", letter(opt_idx + 1), opt);
            }
            if let Some(answer) = q.answer.as_deref().filter(|a| !a.is_empty()) {
                let _ = writeln!(out, "Correct Answer: {answer}");
                if let Some(expl) = q.explanation.as_deref().filter(|e| !e.is_empty()) {
                    let _ = writeln!(out, "Explanation: {expl}");
                }
            }
            let _ = writeln!(out, "---");
        }
        let _ = writeln!(out, "\n📝 Suggested Framework\n{}", self.framework.trim_end());
        let _ = writeln!(out, "\n📊 Guesstimate Problem\n{}", self.guesstimate.trim_end());
        out
    }
}
