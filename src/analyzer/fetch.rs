//! HTTP fetching for the page analyzer
//!
//! Uses ureq (sync HTTP). Status codes are returned, not raised, so the
//! analyzer can report a 404 page the same way as a 200 one.

use super::{AnalyzerError, AnalyzerResult};
use std::time::Duration;
use tracing::debug;

/// Raw response of a single GET
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: u16,
    pub body: String,
}

/// Anything that can GET a URL
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> AnalyzerResult<FetchedPage>;
}

/// ureq-backed fetcher
pub struct HttpFetcher {
    agent: ureq::Agent,
    user_agent: String,
}

fn make_agent(timeout: Duration) -> ureq::Agent {
    ureq::config::Config::builder()
        .http_status_as_error(false) // status codes are data here
        .timeout_global(Some(timeout))
        .build()
        .new_agent()
}

impl HttpFetcher {
    pub fn new(user_agent: impl Into<String>, timeout: Duration) -> Self {
        Self {
            agent: make_agent(timeout),
            user_agent: user_agent.into(),
        }
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> AnalyzerResult<FetchedPage> {
        debug!("GET {}", url);
        let response = self
            .agent
            .get(url)
            .header("User-Agent", &self.user_agent)
            .header("Accept", "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8")
            .call()
            .map_err(|e| AnalyzerError::Request {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .into_body()
            .read_to_string()
            .map_err(|e| AnalyzerError::Body {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        debug!("GET {} -> {} ({} bytes)", url, status, body.len());
        Ok(FetchedPage { status, body })
    }
}
