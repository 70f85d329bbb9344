use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::infra::config::LlmConfig;
use crate::infra::http::headers::{add_standard_headers, generate_request_id};
use crate::infra::runtime::limits::{make_http_client_with, retry_async};

/// One piece of a prompt: plain text or inline bytes (eg. a PDF casebook).
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    Inline { inline_data: InlineData },
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

impl Part {
    pub fn text(s: impl Into<String>) -> Self {
        Part::Text { text: s.into() }
    }

    pub fn inline(mime_type: impl Into<String>, bytes: &[u8]) -> Self {
        Part::Inline {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: BASE64.encode(bytes),
            },
        }
    }
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct GeminiRemote {
    base: String,
    model: String,
    api_key: String,
    http: Client,
    retries: u32,
}

impl GeminiRemote {
    pub fn new(base: impl Into<String>, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base: base.into(),
            model: model.into(),
            api_key: api_key.into(),
            http: crate::infra::runtime::limits::make_http_client(),
            retries: 2,
        }
    }

    /// Returns `None` when no API key is configured.
    pub fn from_config(cfg: &LlmConfig) -> Option<Self> {
        let api_key = cfg.api_key()?.to_owned();
        Some(Self {
            base: cfg.base_url(),
            model: cfg.model(),
            api_key,
            http: make_http_client_with(&cfg.http),
            retries: cfg.http.retries.unwrap_or(2),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub async fn complete(&self, prompt: &str) -> Result<String, String> {
        self.complete_with_parts(vec![Part::text(prompt)]).await
    }

    pub async fn complete_with_parts(&self, parts: Vec<Part>) -> Result<String, String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base.trim_end_matches('/'),
            self.model
        );
        tracing::debug!(endpoint = %url, parts = parts.len(), "gemini.generate_content request");
        let payload = GenerateReq { contents: vec![ContentWire { parts }] };
        let http = self.http.clone();
        let api_key = self.api_key.clone();
        let req_id = generate_request_id();
        let start = Instant::now();
        let res: Result<GenerateResp, RemoteError> = retry_async(
            self.retries,
            |e: &RemoteError| e.retryable,
            |_| {
                let http = http.clone();
                let url = url.clone();
                let api_key = api_key.clone();
                let req_id = req_id.clone();
                let payload = &payload;
                async move {
                    let (builder, _rid) = add_standard_headers(http.post(url), Some(req_id));
                    let resp = builder
                        .header("x-goog-api-key", api_key)
                        .json(payload)
                        .send()
                        .await
                        .map_err(|e| RemoteError::transient(e.to_string()))?;
                    let status = resp.status();
                    if !status.is_success() {
                        if status.is_server_error() || status.as_u16() == 429 {
                            return Err(RemoteError::transient(format!("retryable status {status}")));
                        }
                        return Err(RemoteError::fatal(format!("upstream status {status}")));
                    }
                    resp.json::<GenerateResp>()
                        .await
                        .map_err(|e| RemoteError::fatal(e.to_string()))
                }
            },
        )
        .await;
        let resp = match res {
            Ok(resp) => resp,
            Err(e) => {
                crate::infra::logging::log_metric("llm.complete", "remote_error_total", 1.0);
                return Err(e.message);
            }
        };
        let elapsed_ms = start.elapsed().as_millis() as f64;
        crate::infra::logging::log_metric("llm.complete", "remote_latency_ms", elapsed_ms);
        resp.into_text()
    }
}

struct RemoteError {
    message: String,
    retryable: bool,
}

impl RemoteError {
    fn transient(message: String) -> Self {
        Self { message, retryable: true }
    }
    fn fatal(message: String) -> Self {
        Self { message, retryable: false }
    }
}

#[derive(Serialize)]
struct GenerateReq {
    contents: Vec<ContentWire>,
}

#[derive(Serialize)]
struct ContentWire {
    parts: Vec<Part>,
}

#[derive(Deserialize, Serialize)]
struct GenerateResp {
    #[serde(default)]
    candidates: Vec<CandidateWire>,
}

#[derive(Deserialize, Serialize)]
struct CandidateWire {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Serialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<TextPartWire>,
}

#[derive(Deserialize, Serialize)]
struct TextPartWire {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResp {
    fn into_text(self) -> Result<String, String> {
        let content = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .ok_or_else(|| "model returned no candidates".to_string())?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
        if text.trim().is_empty() {
            return Err("model returned an empty response".into());
        }
        Ok(text)
    }
}
