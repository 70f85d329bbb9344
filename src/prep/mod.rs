//! Consulting interview preparation: validated case input in, questions, a
//! framework and a guesstimate out.

pub mod input;
pub mod prompts;
pub mod questions;
pub mod report;

use async_trait::async_trait;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::clients::gemini::{GeminiRemote, Part};
use crate::clients::web::WebFetcher;
use crate::core::tool::ToolError;
use crate::domain::{Difficulty, Mcq};

pub use input::{InputError, PrepInput};
pub use report::PrepReport;

/// Number of questions generated for a prep session.
pub const PREP_NUM_QUESTIONS: usize = 3;
const SOURCE_INSTRUCTIONS: &str = "Generate consulting related MCQs";

/// Anything that can turn prompt parts into model text.
#[async_trait]
pub trait Completion: Send + Sync + 'static {
    async fn complete(&self, parts: Vec<Part>) -> Result<String, String>;
}

#[async_trait]
impl Completion for GeminiRemote {
    async fn complete(&self, parts: Vec<Part>) -> Result<String, String> {
        self.complete_with_parts(parts).await
    }
}

type CompletionFuture = Pin<Box<dyn Future<Output = Result<String, String>> + Send>>;

/// Thin wrapper around a boxed async fn, for tests and offline demos.
pub struct FnCompletion {
    inner: Arc<dyn Fn(Vec<Part>) -> CompletionFuture + Send + Sync>,
}

impl FnCompletion {
    pub fn new<F, Fut>(f: F) -> Self
    where
        F: Fn(Vec<Part>) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<String, String>> + Send + 'static,
    {
        Self { inner: Arc::new(move |p| Box::pin(f(p))) }
    }
}

#[async_trait]
impl Completion for FnCompletion {
    async fn complete(&self, parts: Vec<Part>) -> Result<String, String> {
        (self.inner)(parts).await
    }
}

#[derive(Clone)]
pub struct PrepService {
    llm: Arc<dyn Completion>,
    fetcher: WebFetcher,
}

impl PrepService {
    pub fn new(llm: Arc<dyn Completion>, fetcher: WebFetcher) -> Self {
        Self { llm, fetcher }
    }

    async fn ask(&self, parts: Vec<Part>) -> Result<String, ToolError> {
        self.llm.complete(parts).await.map_err(ToolError::Upstream)
    }

    pub async fn framework(&self, case: &str) -> Result<String, ToolError> {
        self.ask(vec![Part::text(prompts::framework(case))]).await
    }

    pub async fn guesstimate(&self, case: &str) -> Result<String, ToolError> {
        self.ask(vec![Part::text(prompts::guesstimate(case))]).await
    }

    pub async fn questions(
        &self,
        topic: &str,
        num: usize,
        difficulty: Difficulty,
    ) -> Result<Vec<Mcq>, ToolError> {
        let raw = self
            .ask(vec![Part::text(prompts::questions(topic, num, difficulty, None))])
            .await?;
        questions::parse_questions(&raw).map_err(ToolError::Upstream)
    }

    /// Resolve PDF/URL input into a prompt part carrying the source material.
    async fn material(&self, input: &PrepInput) -> Result<Option<Part>, ToolError> {
        match input {
            PrepInput::Manual(_) => Ok(None),
            PrepInput::Pdf { bytes, .. } => Ok(Some(Part::inline("application/pdf", bytes))),
            PrepInput::Url(url) => {
                let text = self.fetcher.fetch_text(url).await.map_err(ToolError::Upstream)?;
                Ok(Some(Part::text(format!("Source content from {url}:\n\n{text}"))))
            }
        }
    }

    /// Run a full prep session: questions, then framework, then guesstimate.
    pub async fn run(&self, input: &PrepInput, difficulty: Difficulty) -> Result<PrepReport, ToolError> {
        tracing::info!(source = input.source_label().unwrap_or("prompt"), %difficulty, "prep session started");
        let (questions, framework, guesstimate) = match (input, self.material(input).await?) {
            (PrepInput::Manual(prompt), _) => (
                self.questions(prompt, PREP_NUM_QUESTIONS, difficulty).await?,
                self.framework(prompt).await?,
                self.guesstimate(prompt).await?,
            ),
            (_, material) => {
                let label = input.source_label().unwrap_or("source");
                let with_material = |text: String| -> Vec<Part> {
                    material.iter().cloned().chain([Part::text(text)]).collect()
                };
                let raw = self
                    .ask(with_material(prompts::questions(
                        &format!("the uploaded {label} content"),
                        PREP_NUM_QUESTIONS,
                        difficulty,
                        Some(SOURCE_INSTRUCTIONS),
                    )))
                    .await?;
                let questions = questions::parse_questions(&raw).map_err(ToolError::Upstream)?;
                let framework = self
                    .ask(with_material(prompts::framework(&prompts::framework_from_source(label))))
                    .await?;
                let guesstimate = self
                    .ask(with_material(prompts::guesstimate(&prompts::guesstimate_from_source(label))))
                    .await?;
                (questions, framework, guesstimate)
            }
        };
        Ok(PrepReport {
            difficulty,
            questions,
            framework,
            guesstimate,
            generated_at: chrono::Utc::now(),
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Mutex;

    const QUESTIONS_JSON: &str =
        r#"{"questions":[{"question":"Q1?","options":["a","b"],"answer":"a","explanation":"e"}]}"#;

    /// Scripted model: answers by prompt kind and records every call.
    pub(crate) fn scripted(log: Arc<Mutex<Vec<Vec<Part>>>>) -> Arc<dyn Completion> {
        Arc::new(FnCompletion::new(move |parts: Vec<Part>| {
            let log = log.clone();
            async move {
                let text = parts
                    .iter()
                    .filter_map(|p| match p {
                        Part::Text { text } => Some(text.clone()),
                        Part::Inline { .. } => None,
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                log.lock().unwrap().push(parts);
                let reply = if text.contains("Multiple Choice") {
                    QUESTIONS_JSON.to_string()
                } else if text.contains("management consulting expert") {
                    "- Revenue\n- Costs".to_string()
                } else {
                    "How many coffees are sold in Galway each day?".to_string()
                };
                Ok(reply)
            }
        }))
    }

    #[tokio::test]
    async fn manual_prompt_runs_all_three_generators() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let svc = PrepService::new(scripted(log.clone()), WebFetcher::new());
        let input = input::validate_prompt("Profitability case for an e-commerce company").unwrap();
        let report = svc.run(&input, Difficulty::Intermediate).await.unwrap();

        assert_eq!(report.questions.len(), 1);
        assert_eq!(report.framework, "- Revenue\n- Costs");
        assert!(report.guesstimate.contains("Galway"));
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 3);
        assert!(matches!(&calls[0][0], Part::Text { text } if text.contains("Intermediate")));
    }

    #[tokio::test]
    async fn pdf_input_attaches_document_to_every_call() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let svc = PrepService::new(scripted(log.clone()), WebFetcher::new());
        let input = input::validate_pdf("case.pdf", b"%PDF-1.7".to_vec()).unwrap();
        let report = svc.run(&input, Difficulty::Beginner).await.unwrap();

        assert_eq!(report.framework, "- Revenue\n- Costs");
        let calls = log.lock().unwrap();
        assert_eq!(calls.len(), 3);
        for call in calls.iter() {
            assert!(matches!(call[0], Part::Inline { .. }));
        }
        assert!(matches!(&calls[1][1], Part::Text { text } if text.contains("uploaded PDF content")));
    }

    #[tokio::test]
    async fn url_input_fetches_page_text() {
        use httpmock::prelude::*;
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/case");
            then.status(200).body("<h1>Airline market entry</h1>");
        });
        let log = Arc::new(Mutex::new(Vec::new()));
        let svc = PrepService::new(scripted(log.clone()), WebFetcher::new());
        let input = input::validate_url(&format!("{}/case", server.base_url())).unwrap();
        svc.run(&input, Difficulty::Advanced).await.unwrap();

        let calls = log.lock().unwrap();
        assert!(matches!(&calls[2][0], Part::Text { text } if text.contains("Airline market entry")));
        assert!(matches!(&calls[2][1], Part::Text { text } if text.contains("uploaded website content")));
    }

    #[tokio::test]
    async fn model_failures_surface_as_upstream_errors() {
        let failing: Arc<dyn Completion> =
            Arc::new(FnCompletion::new(|_| async { Err("upstream status 403".to_string()) }));
        let svc = PrepService::new(failing, WebFetcher::new());
        let err = svc.framework("anything at all").await.unwrap_err();
        assert!(matches!(err, ToolError::Upstream(ref m) if m.contains("403")));
    }

    #[tokio::test]
    async fn unparseable_questions_are_reported() {
        let prose: Arc<dyn Completion> =
            Arc::new(FnCompletion::new(|_| async { Ok("Sure! Here you go.".to_string()) }));
        let svc = PrepService::new(prose, WebFetcher::new());
        let err = svc.questions("pricing", 3, Difficulty::Beginner).await.unwrap_err();
        assert!(err.to_string().contains("valid question JSON"));
    }
}
