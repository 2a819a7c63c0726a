//! Regex-based metadata extraction
//!
//! This is text pattern matching, not an HTML parser. It handles the
//! markup real sites tend to emit and gives up quietly on the rest.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::OnceLock;

static TITLE: OnceLock<Regex> = OnceLock::new();
static META_TAG: OnceLock<Regex> = OnceLock::new();
static LINK_TAG: OnceLock<Regex> = OnceLock::new();
static HTML_TAG: OnceLock<Regex> = OnceLock::new();
static H1: OnceLock<Regex> = OnceLock::new();
static IMG_TAG: OnceLock<Regex> = OnceLock::new();
static ANCHOR_TAG: OnceLock<Regex> = OnceLock::new();
static ATTRIBUTE: OnceLock<Regex> = OnceLock::new();
static JSON_LD: OnceLock<Regex> = OnceLock::new();
static JSON_LD_TYPE: OnceLock<Regex> = OnceLock::new();
static ITEMTYPE: OnceLock<Regex> = OnceLock::new();
static ANY_TAG: OnceLock<Regex> = OnceLock::new();
static WHITESPACE: OnceLock<Regex> = OnceLock::new();

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("valid regex"))
}

/// Known social networks, matched against link hosts
const SOCIAL_NETWORKS: &[(&str, &str)] = &[
    ("facebook.com", "Facebook"),
    ("instagram.com", "Instagram"),
    ("linkedin.com", "LinkedIn"),
    ("twitter.com", "X"),
    ("x.com", "X"),
    ("youtube.com", "YouTube"),
    ("tiktok.com", "TikTok"),
    ("pinterest.com", "Pinterest"),
    ("threads.net", "Threads"),
    ("github.com", "GitHub"),
];

/// Share-button URLs point at the network but are not profiles
const SHARE_MARKERS: &[&str] = &["/sharer", "/share", "/intent/", "shareArticle"];

/// A link to an official social profile
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SocialLink {
    pub network: String,
    pub url: String,
}

/// Attributes of every tag matching `tag`
fn tag_attributes(html: &str, tag: &Regex) -> Vec<HashMap<String, String>> {
    tag.find_iter(html)
        .map(|m| parse_attributes(m.as_str()))
        .collect()
}

/// Parse `name="value"` pairs out of a single tag. Names are lowercased.
pub(crate) fn parse_attributes(tag: &str) -> HashMap<String, String> {
    let attr = regex(
        &ATTRIBUTE,
        r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+))"#,
    );
    attr.captures_iter(tag)
        .filter_map(|caps| {
            let name = caps.get(1)?.as_str().to_lowercase();
            let value = caps
                .get(2)
                .or_else(|| caps.get(3))
                .or_else(|| caps.get(4))
                .map(|v| decode_entities(v.as_str()))
                .unwrap_or_default();
            Some((name, value))
        })
        .collect()
}

fn meta_tags(html: &str) -> Vec<HashMap<String, String>> {
    tag_attributes(html, regex(&META_TAG, r"(?is)<meta\b[^>]*>"))
}

pub fn title(html: &str) -> Option<String> {
    regex(&TITLE, r"(?is)<title\b[^>]*>(.*?)</title>")
        .captures(html)
        .and_then(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .filter(|t| !t.is_empty())
}

/// `content` of the first `<meta name=...>` with the given name
pub fn meta_named(html: &str, name: &str) -> Option<String> {
    meta_tags(html)
        .into_iter()
        .find(|attrs| {
            attrs
                .get("name")
                .is_some_and(|n| n.eq_ignore_ascii_case(name))
        })
        .and_then(|mut attrs| attrs.remove("content"))
        .map(|c| c.trim().to_string())
}

/// Meta tags whose `property` or `name` starts with `prefix` (e.g. `og:`)
pub fn meta_with_prefix(html: &str, prefix: &str) -> BTreeMap<String, String> {
    let mut found = BTreeMap::new();
    for attrs in meta_tags(html) {
        let key = attrs
            .get("property")
            .or_else(|| attrs.get("name"))
            .map(|k| k.to_lowercase());
        let (Some(key), Some(content)) = (key, attrs.get("content")) else {
            continue;
        };
        if key.starts_with(prefix) {
            found.entry(key).or_insert_with(|| content.trim().to_string());
        }
    }
    found
}

pub fn canonical(html: &str) -> Option<String> {
    tag_attributes(html, regex(&LINK_TAG, r"(?is)<link\b[^>]*>"))
        .into_iter()
        .find(|attrs| {
            attrs
                .get("rel")
                .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("canonical")))
        })
        .and_then(|mut attrs| attrs.remove("href"))
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
}

pub fn html_lang(html: &str) -> Option<String> {
    regex(&HTML_TAG, r"(?is)<html\b[^>]*>")
        .find(html)
        .and_then(|m| parse_attributes(m.as_str()).remove("lang"))
        .filter(|l| !l.trim().is_empty())
}

pub fn h1_texts(html: &str) -> Vec<String> {
    regex(&H1, r"(?is)<h1\b[^>]*>(.*?)</h1>")
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| clean_text(m.as_str()))
        .collect()
}

/// (total images, images without an `alt` attribute)
pub fn image_alt_counts(html: &str) -> (usize, usize) {
    let images = tag_attributes(html, regex(&IMG_TAG, r"(?is)<img\b[^>]*>"));
    let missing = images.iter().filter(|a| !a.contains_key("alt")).count();
    (images.len(), missing)
}

/// schema.org types from JSON-LD `@type` and microdata `itemtype`
pub fn schema_types(html: &str) -> Vec<String> {
    let mut types = BTreeSet::new();

    let json_ld = regex(
        &JSON_LD,
        r#"(?is)<script\b[^>]*type\s*=\s*["']?application/ld\+json["']?[^>]*>(.*?)</script>"#,
    );
    for caps in json_ld.captures_iter(html) {
        let Some(body) = caps.get(1) else { continue };
        match serde_json::from_str::<serde_json::Value>(body.as_str().trim()) {
            Ok(value) => collect_json_ld_types(&value, &mut types),
            Err(_) => {
                // Broken JSON is common; fall back to a plain pattern
                let fallback = regex(&JSON_LD_TYPE, r#""@type"\s*:\s*"([^"]+)""#);
                for t in fallback.captures_iter(body.as_str()) {
                    types.insert(t[1].to_string());
                }
            }
        }
    }

    let itemtype = regex(
        &ITEMTYPE,
        r#"(?i)itemtype\s*=\s*["']https?://schema\.org/([A-Za-z]+)["']"#,
    );
    for caps in itemtype.captures_iter(html) {
        types.insert(caps[1].to_string());
    }

    types.into_iter().collect()
}

fn collect_json_ld_types(value: &serde_json::Value, out: &mut BTreeSet<String>) {
    match value {
        serde_json::Value::Object(map) => {
            match map.get("@type") {
                Some(serde_json::Value::String(t)) => {
                    out.insert(strip_schema_prefix(t));
                }
                Some(serde_json::Value::Array(list)) => {
                    for t in list.iter().filter_map(|t| t.as_str()) {
                        out.insert(strip_schema_prefix(t));
                    }
                }
                _ => {}
            }
            for (key, nested) in map {
                if key != "@type" {
                    collect_json_ld_types(nested, out);
                }
            }
        }
        serde_json::Value::Array(list) => {
            for item in list {
                collect_json_ld_types(item, out);
            }
        }
        _ => {}
    }
}

fn strip_schema_prefix(t: &str) -> String {
    t.trim_start_matches("https://schema.org/")
        .trim_start_matches("http://schema.org/")
        .to_string()
}

/// Links to known social networks, share buttons excluded
pub fn social_links(html: &str) -> Vec<SocialLink> {
    let mut links = BTreeSet::new();
    for attrs in tag_attributes(html, regex(&ANCHOR_TAG, r"(?is)<a\b[^>]*>")) {
        let Some(href) = attrs.get("href") else { continue };
        let Some(host) = host_of(href) else { continue };
        if SHARE_MARKERS.iter().any(|m| href.contains(m)) {
            continue;
        }
        let network = SOCIAL_NETWORKS.iter().find(|(domain, _)| {
            host == *domain || host.ends_with(&format!(".{}", domain))
        });
        if let Some((_, name)) = network {
            links.insert(SocialLink {
                network: name.to_string(),
                url: href.trim().to_string(),
            });
        }
    }
    links.into_iter().collect()
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

/// Lowercased host of an absolute http(s) URL
pub(crate) fn host_of(url: &str) -> Option<String> {
    let url = url.trim();
    let rest = strip_prefix_ignore_case(url, "https://")
        .or_else(|| strip_prefix_ignore_case(url, "http://"))
        .or_else(|| url.strip_prefix("//"))?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host = authority.rsplit('@').next()?.split(':').next()?;
    if host.is_empty() {
        None
    } else {
        Some(host.to_lowercase())
    }
}

/// Strip nested tags, decode entities, collapse whitespace
fn clean_text(raw: &str) -> String {
    let no_tags = regex(&ANY_TAG, r"(?s)<[^>]*>").replace_all(raw, " ");
    let decoded = decode_entities(&no_tags);
    regex(&WHITESPACE, r"\s+")
        .replace_all(decoded.trim(), " ")
        .to_string()
}

fn decode_entities(s: &str) -> String {
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html lang="en-GB">
<head>
  <meta charset="utf-8">
  <title>
    Acme Widgets &amp; Gadgets | Acme
  </title>
  <meta name="Description" content="Hand-made widgets shipped worldwide.">
  <meta name="robots" content="index, follow">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <meta property="og:title" content="Acme Widgets">
  <meta property='og:image' content='https://acme.test/og.png'>
  <meta name="twitter:card" content="summary_large_image">
  <link rel="stylesheet" href="/main.css">
  <link href="https://acme.test/" rel="canonical">
  <script type="application/ld+json">
  {"@context": "https://schema.org", "@graph": [
    {"@type": "Organization", "name": "Acme"},
    {"@type": ["WebSite", "https://schema.org/WebPage"]}
  ]}
  </script>
</head>
<body itemscope itemtype="https://schema.org/Store">
  <h1>Widgets <span>for everyone</span></h1>
  <img src="a.png" alt="A widget">
  <img src="b.png">
  <img src="spacer.gif" alt="">
  <a href="https://www.facebook.com/acme">Facebook</a>
  <a href="https://x.com/acme">X</a>
  <a href="https://www.facebook.com/sharer/sharer.php?u=acme">Share</a>
  <a href="/about">About</a>
</body>
</html>"#;

    #[test]
    fn test_title_is_cleaned() {
        assert_eq!(title(PAGE).as_deref(), Some("Acme Widgets & Gadgets | Acme"));
        assert_eq!(title("<html><title>  </title></html>"), None);
    }

    #[test]
    fn test_meta_named_is_case_insensitive() {
        assert_eq!(
            meta_named(PAGE, "description").as_deref(),
            Some("Hand-made widgets shipped worldwide.")
        );
        assert_eq!(meta_named(PAGE, "robots").as_deref(), Some("index, follow"));
        assert_eq!(meta_named(PAGE, "keywords"), None);
    }

    #[test]
    fn test_open_graph_and_twitter() {
        let og = meta_with_prefix(PAGE, "og:");
        assert_eq!(og.get("og:title").map(String::as_str), Some("Acme Widgets"));
        assert_eq!(
            og.get("og:image").map(String::as_str),
            Some("https://acme.test/og.png")
        );
        let twitter = meta_with_prefix(PAGE, "twitter:");
        assert_eq!(twitter.len(), 1);
    }

    #[test]
    fn test_canonical_and_lang() {
        assert_eq!(canonical(PAGE).as_deref(), Some("https://acme.test/"));
        assert_eq!(html_lang(PAGE).as_deref(), Some("en-GB"));
        assert_eq!(canonical("<link rel=\"icon\" href=\"/x.ico\">"), None);
    }

    #[test]
    fn test_h1_strips_nested_tags() {
        assert_eq!(h1_texts(PAGE), vec!["Widgets for everyone".to_string()]);
    }

    #[test]
    fn test_image_alt_counts() {
        // empty alt counts as present (decorative)
        assert_eq!(image_alt_counts(PAGE), (3, 1));
    }

    #[test]
    fn test_schema_types_from_json_ld_and_microdata() {
        assert_eq!(
            schema_types(PAGE),
            vec!["Organization", "Store", "WebPage", "WebSite"]
        );
    }

    #[test]
    fn test_schema_types_from_broken_json_ld() {
        let html = r#"<script type="application/ld+json">{"@type": "LocalBusiness", "name": "Bob's",}</script>"#;
        assert_eq!(schema_types(html), vec!["LocalBusiness"]);
    }

    #[test]
    fn test_social_links_skip_share_buttons() {
        let links = social_links(PAGE);
        assert_eq!(links.len(), 2);
        assert!(links.iter().any(|l| l.network == "Facebook"));
        assert!(links.iter().any(|l| l.network == "X" && l.url == "https://x.com/acme"));
    }

    #[test]
    fn test_host_of() {
        assert_eq!(host_of("https://Example.com:8080/a?b").as_deref(), Some("example.com"));
        assert_eq!(host_of("//cdn.example.com/x").as_deref(), Some("cdn.example.com"));
        assert_eq!(host_of("HTTPS://Example.com/").as_deref(), Some("example.com"));
        assert_eq!(host_of("Http://shop.example.com").as_deref(), Some("shop.example.com"));
        assert_eq!(host_of("/relative/path"), None);
        assert_eq!(host_of("mailto:a@b.c"), None);
    }

    #[test]
    fn test_unquoted_attributes() {
        let attrs = parse_attributes("<meta name=robots content=noindex>");
        assert_eq!(attrs.get("name").map(String::as_str), Some("robots"));
        assert_eq!(attrs.get("content").map(String::as_str), Some("noindex"));
    }
}
