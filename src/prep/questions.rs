use serde::Deserialize;

use crate::domain::Mcq;

#[derive(Deserialize)]
struct QuestionList {
    questions: Vec<Mcq>,
}

/// Strip a surrounding ```json fence if the model added one.
fn unfence(raw: &str) -> &str {
    let t = raw.trim();
    let Some(rest) = t.strip_prefix("```") else {
        return t;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Parse the model's reply into questions. Accepts `{"questions": [...]}` or a bare array.
pub fn parse_questions(raw: &str) -> Result<Vec<Mcq>, String> {
    let body = unfence(raw);
    let parsed = serde_json::from_str::<QuestionList>(body)
        .map(|l| l.questions)
        .or_else(|_| serde_json::from_str::<Vec<Mcq>>(body))
        .map_err(|e| format!("model reply was not valid question JSON: {e}"))?;
    let questions: Vec<Mcq> = parsed
        .into_iter()
        .filter(|q| !q.question.trim().is_empty())
        .collect();
    if questions.is_empty() {
        return Err("model reply contained no questions".into());
    }
    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_object() {
        let qs = parse_questions(
            r#"{"questions":[{"question":"Q1?","options":["a","b"],"answer":"a","explanation":"because"}]}"#,
        )
        .unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].options, ["a", "b"]);
        assert_eq!(qs[0].answer.as_deref(), Some("a"));
    }

    #[test]
    fn parses_fenced_bare_array() {
        let raw = "```json\n[{\"question\":\"Q?\",\"options\":[\"x\"]}]\n```";
        let qs = parse_questions(raw).unwrap();
        assert_eq!(qs[0].question, "Q?");
        assert!(qs[0].explanation.is_none());
    }

    #[test]
    fn rejects_prose_and_empty_lists() {
        assert!(parse_questions("Here are some questions!").is_err());
        assert!(parse_questions(r#"{"questions":[]}"#).unwrap_err().contains("no questions"));
        assert!(parse_questions(r#"{"questions":[{"question":"  "}]}"#).is_err());
    }
}
