use regex::Regex;
use reqwest::Client;
use std::sync::OnceLock;

use crate::infra::config::ToolConfig;
use crate::infra::http::headers::add_standard_headers;
use crate::infra::runtime::limits::{make_http_client_with, retry_async};

/// Characters of page text forwarded to the model.
pub const MAX_PAGE_CHARS: usize = 20_000;

/// Redirect hops followed when `[fetch].max_redirects` is unset.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Fetches a web page and reduces it to plain text for prompting.
#[derive(Clone)]
pub struct WebFetcher {
    http: Client,
    retries: u32,
}

impl WebFetcher {
    pub fn new() -> Self {
        Self::from_config(&ToolConfig::default())
    }

    pub fn from_config(cfg: &ToolConfig) -> Self {
        let mut cfg = cfg.clone();
        cfg.max_redirects.get_or_insert(DEFAULT_MAX_REDIRECTS);
        Self {
            http: make_http_client_with(&cfg),
            retries: cfg.retries.unwrap_or(1),
        }
    }

    pub async fn fetch_text(&self, url: &str) -> Result<String, String> {
        tracing::debug!(url = %url, "web.fetch request");
        let http = self.http.clone();
        let body = retry_async(
            self.retries,
            |e: &String| e.starts_with("retryable"),
            |_| {
                let http = http.clone();
                async move {
                    let (builder, _rid) = add_standard_headers(http.get(url), None);
                    let resp = builder
                        .send()
                        .await
                        .map_err(|e| format!("retryable transport error: {e}"))?;
                    let status = resp.status();
                    if status.is_server_error() {
                        return Err(format!("retryable status {status}"));
                    }
                    if !status.is_success() {
                        return Err(format!("upstream status {status}"));
                    }
                    resp.text().await.map_err(|e| e.to_string())
                }
            },
        )
        .await?;
        Ok(html_to_text(&body, MAX_PAGE_CHARS))
    }
}

impl Default for WebFetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn patterns() -> &'static (Regex, Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"(?is)<(script|style)[^>]*>.*?</(script|style)>").expect("static regex"),
            Regex::new(r"(?s)<[^>]*>").expect("static regex"),
            Regex::new(r"\s+").expect("static regex"),
        )
    })
}

/// Strip markup, collapse whitespace and cap the result at `max_chars` characters.
pub fn html_to_text(html: &str, max_chars: usize) -> String {
    let (blocks, tags, ws) = patterns();
    let no_blocks = blocks.replace_all(html, " ");
    let no_tags = tags.replace_all(&no_blocks, " ");
    let collapsed = ws.replace_all(&no_tags, " ");
    collapsed.trim().chars().take(max_chars).collect()
}
