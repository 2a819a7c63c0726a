//! Best-effort page analyzer
//!
//! Fetches a single page plus the site's robots.txt and sniffs out the
//! metadata an auditor would otherwise look up by hand. Results are hints:
//! nothing here is authoritative and nothing is written into an answers
//! file unless the caller asks for it (see [`suggest`]).
//!
//! [`analyze`] never fails. Fetch errors end up in [`PageAnalysis::error`]
//! and the remaining fields stay at their defaults.

mod extract;
mod fetch;
mod robots;
pub mod suggest;

pub use extract::SocialLink;
pub use fetch::{FetchedPage, HttpFetcher, PageFetcher};
pub use robots::RobotsTxt;
pub use suggest::{apply_suggestions, suggestions, Suggestion};

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Invalid URL '{0}': expected http(s)://host/...")]
    InvalidUrl(String),

    #[error("Request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("Failed to read response body from {url}: {message}")]
    Body { url: String, message: String },
}

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Everything the analyzer could find out about one page
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageAnalysis {
    pub url: String,
    pub status_code: Option<u16>,
    pub https: bool,
    pub title: Option<String>,
    /// Length of the title in characters
    pub title_length: Option<usize>,
    pub meta_description: Option<String>,
    pub canonical: Option<String>,
    pub robots_meta: Option<String>,
    pub lang: Option<String>,
    pub has_viewport: bool,
    pub h1: Vec<String>,
    pub open_graph: BTreeMap<String, String>,
    pub twitter: BTreeMap<String, String>,
    pub schema_types: Vec<String>,
    pub social_links: Vec<SocialLink>,
    pub images_total: usize,
    pub images_missing_alt: usize,
    /// `None` when robots.txt could not be fetched at all
    pub robots_txt: Option<RobotsTxt>,
    pub error: Option<String>,
}

impl PageAnalysis {
    /// Page carries a `noindex` robots directive
    pub fn is_noindex(&self) -> bool {
        self.robots_meta
            .as_deref()
            .is_some_and(|r| r.to_ascii_lowercase().contains("noindex"))
    }

    /// Page fetched and parsed without errors
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Add `https://` when no scheme was given
pub fn normalize_url(input: &str) -> AnalyzerResult<String> {
    let trimmed = input.trim();
    let url = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed.trim_start_matches('/'))
    };
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return Err(AnalyzerError::InvalidUrl(input.to_string()));
    }
    if extract::host_of(&url).is_none() {
        return Err(AnalyzerError::InvalidUrl(input.to_string()));
    }
    Ok(url)
}

/// `scheme://host[:port]/robots.txt` for a page URL
pub fn robots_url(url: &str) -> Option<String> {
    let (scheme, rest) = url.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    if authority.is_empty() {
        return None;
    }
    Some(format!("{}://{}/robots.txt", scheme, authority))
}

/// Analyze one page. Never fails; see [`PageAnalysis::error`].
pub fn analyze(fetcher: &dyn PageFetcher, url: &str) -> PageAnalysis {
    let url = match normalize_url(url) {
        Ok(url) => url,
        Err(e) => {
            return PageAnalysis {
                url: url.to_string(),
                error: Some(e.to_string()),
                ..Default::default()
            }
        }
    };

    let mut analysis = PageAnalysis {
        https: url.to_ascii_lowercase().starts_with("https://"),
        url: url.clone(),
        ..Default::default()
    };

    match fetcher.fetch(&url) {
        Ok(page) => {
            analysis.status_code = Some(page.status);
            if page.status >= 400 {
                analysis.error = Some(format!("{} returned HTTP {}", url, page.status));
            }
            fill_from_html(&mut analysis, &page.body);
        }
        Err(e) => {
            warn!("{}", e);
            analysis.error = Some(e.to_string());
            return analysis;
        }
    }

    analysis.robots_txt = robots_url(&url).and_then(|robots| fetch_robots(fetcher, &robots));

    debug!(
        "Analyzed {}: status={:?} title={:?} schema={:?}",
        analysis.url, analysis.status_code, analysis.title, analysis.schema_types
    );
    analysis
}

fn fill_from_html(analysis: &mut PageAnalysis, html: &str) {
    analysis.title = extract::title(html);
    analysis.title_length = analysis.title.as_ref().map(|t| t.chars().count());
    analysis.meta_description = extract::meta_named(html, "description");
    analysis.robots_meta = extract::meta_named(html, "robots");
    analysis.has_viewport = extract::meta_named(html, "viewport").is_some();
    analysis.canonical = extract::canonical(html);
    analysis.lang = extract::html_lang(html);
    analysis.h1 = extract::h1_texts(html);
    analysis.open_graph = extract::meta_with_prefix(html, "og:");
    analysis.twitter = extract::meta_with_prefix(html, "twitter:");
    analysis.schema_types = extract::schema_types(html);
    analysis.social_links = extract::social_links(html);
    let (total, missing) = extract::image_alt_counts(html);
    analysis.images_total = total;
    analysis.images_missing_alt = missing;
}

fn fetch_robots(fetcher: &dyn PageFetcher, robots_url: &str) -> Option<RobotsTxt> {
    match fetcher.fetch(robots_url) {
        Ok(page) if (200..300).contains(&page.status) => Some(RobotsTxt::parse(&page.body)),
        Ok(page) => {
            debug!("{} returned HTTP {}", robots_url, page.status);
            Some(RobotsTxt::missing())
        }
        Err(e) => {
            warn!("Could not fetch robots.txt: {}", e);
            None
        }
    }
}
