use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use crate::config::{ApiToken, GithubConfig};
use crate::error::SearchError;
use crate::models::{RawPage, RawRecord, PAGE_SIZE};
use crate::upstream::PageSource;

const USER_AGENT: &str = concat!("repo-rank/", env!("CARGO_PKG_VERSION"));

/// Client for GitHub's `GET /search/repositories`.
#[derive(Debug, Clone)]
pub struct GithubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<ApiToken>,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self> {
        let timeout = Duration::from_secs(config.timeout_secs.min(30));
        let http = reqwest::Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build GitHub HTTP client")?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

#[async_trait]
impl PageSource for GithubClient {
    async fn fetch_page(&self, query: &str, page: u32) -> Result<RawPage, SearchError> {
        let url = format!("{}/search/repositories", self.base_url);
        let page_param = page.to_string();
        let per_page = PAGE_SIZE.to_string();

        let mut req = self
            .http
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&[
                ("q", query),
                ("per_page", per_page.as_str()),
                ("page", page_param.as_str()),
                ("sort", "stars"),
                ("order", "desc"),
            ]);
        if let Some(token) = &self.token {
            req = req.header(AUTHORIZATION, format!("token {}", token.expose()));
        }

        tracing::debug!("Fetching GitHub search page {page} for {query:?}");
        let resp = req
            .send()
            .await
            .map_err(|e| SearchError::Transport(e.without_url().to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(classify_failure(status, &body));
        }

        // A body that stops arriving is a transport failure, not a malformed page.
        let body = resp
            .bytes()
            .await
            .map_err(|e| SearchError::Transport(e.without_url().to_string()))?;
        Ok(parse_page(&body))
    }
}

/// Message field of a GitHub error body.
#[derive(Deserialize)]
struct GithubErrorBody {
    message: String,
}

fn classify_failure(status: StatusCode, body: &str) -> SearchError {
    let code = status.as_u16();
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            let message = serde_json::from_str::<GithubErrorBody>(body)
                .map(|b| b.message)
                .unwrap_or_else(|_| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("Forbidden").to_string()
                    } else {
                        body.trim().to_string()
                    }
                });
            tracing::warn!("GitHub search rejected with {code}: {message}");
            SearchError::RateLimited {
                status: code,
                message,
            }
        }
        _ => {
            let details = serde_json::from_str::<Value>(body)
                .unwrap_or_else(|_| Value::String(body.to_string()));
            tracing::warn!("GitHub search failed with {code}");
            SearchError::Upstream {
                status: code,
                details,
            }
        }
    }
}

#[derive(Deserialize)]
struct SearchPageBody {
    items: Option<Vec<Value>>,
    total_count: Option<Value>,
}

/// Decode a 2xx body. Anything unusable becomes an empty page; items that
/// are not JSON objects are skipped individually.
fn parse_page(body: &[u8]) -> RawPage {
    match serde_json::from_slice::<SearchPageBody>(body) {
        Ok(SearchPageBody {
            items: Some(items),
            total_count,
        }) => {
            let received = items.len();
            let items: Vec<RawRecord> = items
                .into_iter()
                .filter_map(|item| match item {
                    Value::Object(map) => Some(RawRecord::from_map(map)),
                    _ => None,
                })
                .collect();
            if items.len() < received {
                tracing::warn!(
                    "Skipped {} non-object items in GitHub search response",
                    received - items.len()
                );
            }
            let total_count = total_count
                .as_ref()
                .and_then(Value::as_u64)
                .unwrap_or(items.len() as u64);
            RawPage { items, total_count }
        }
        Ok(_) => {
            tracing::warn!("GitHub search response had no items; treating as empty page");
            RawPage::default()
        }
        Err(e) => {
            tracing::warn!("Malformed GitHub search response ({e}); treating as empty page");
            RawPage::default()
        }
    }
}
